use crate::error::{Error, Result};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const USER_TEMP: &str = "User Temp";
pub const SYSTEM_TEMP: &str = "System Temp";

/// A directory whose contents get emptied. The directory itself is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupTarget {
    pub label: &'static str,
    pub root: PathBuf,
}

impl CleanupTarget {
    pub fn new(label: &'static str, root: impl Into<PathBuf>) -> Self {
        Self {
            label,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// The two fixed temp locations, user first.
pub fn system_targets() -> Result<Vec<CleanupTarget>> {
    Ok(vec![
        CleanupTarget::new(USER_TEMP, user_temp_root(env::var_os("LOCALAPPDATA"))?),
        CleanupTarget::new(
            SYSTEM_TEMP,
            system_temp_root(env::var_os("SystemRoot"), env::var_os("windir")),
        ),
    ])
}

fn user_temp_root(local_app_data: Option<OsString>) -> Result<PathBuf> {
    let base = local_app_data
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::data_local_dir)
        .ok_or_else(|| Error::TargetUnresolved {
            label: USER_TEMP,
            hint: "LOCALAPPDATA is not set and no local data directory is known".to_string(),
        })?;
    Ok(base.join("Temp"))
}

fn system_temp_root(system_root: Option<OsString>, windir: Option<OsString>) -> PathBuf {
    system_root
        .filter(|v| !v.is_empty())
        .or_else(|| windir.filter(|v| !v.is_empty()))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\Windows"))
        .join("Temp")
}
