//! The filesystem operations the cleaner needs, behind a trait so the walk
//! can be driven against a simulated disk in tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular files and symlinks. A symlink is removed as a link, never followed.
    File,
    Dir,
    /// A directory symlink or junction on Windows. Removed with `remove_dir`
    /// and never descended into.
    LinkDir,
}

impl EntryKind {
    pub fn of(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            return EntryKind::Dir;
        }
        #[cfg(windows)]
        {
            use std::os::windows::fs::FileTypeExt;
            if file_type.is_symlink_dir() {
                return EntryKind::LinkDir;
            }
        }
        EntryKind::File
    }
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// A path the walk could not read, typically a directory without list access.
#[derive(Debug)]
pub struct WalkError {
    pub path: PathBuf,
    pub source: io::Error,
}

pub type Walk<'a> = Box<dyn Iterator<Item = Result<Entry, WalkError>> + 'a>;

pub trait Filesystem {
    /// Succeeds when `root` is a directory that can be listed.
    fn probe(&self, root: &Path) -> io::Result<()>;

    /// Every entry strictly below `root`, depth-first, each directory after
    /// its contents.
    fn walk<'a>(&'a self, root: &Path) -> Walk<'a>;

    fn file_size(&self, path: &Path) -> io::Result<u64>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes an empty directory or a directory link.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

/// The real disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn probe(&self, root: &Path) -> io::Result<()> {
        fs::read_dir(root).map(|_| ())
    }

    fn walk<'a>(&'a self, root: &Path) -> Walk<'a> {
        let root = root.to_path_buf();
        let entries = WalkDir::new(&root)
            .min_depth(1)
            .follow_links(false)
            .contents_first(true)
            .into_iter()
            .map(move |entry| match entry {
                Ok(entry) => Ok(Entry {
                    kind: EntryKind::of(entry.file_type()),
                    path: entry.into_path(),
                }),
                Err(err) => {
                    let path = err.path().map_or_else(|| root.clone(), Path::to_path_buf);
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("filesystem loop"));
                    Err(WalkError { path, source })
                }
            });
        Box::new(entries)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        fs::symlink_metadata(path).map(|m| m.len())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }
}
