//! Empties a directory tree, tolerating entries that cannot be removed.
//!
//! Files are deleted first, then each directory once everything beneath it
//! is gone. An entry that fails to delete is recorded as [`Skipped`] and the
//! walk moves on; directories above it are left in place.

use crate::fs::{Entry, EntryKind, Filesystem, LocalFs, WalkError};
use crate::progress::{Progress, Silent};
use std::collections::HashSet;
use std::io;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// Why an entry was left behind.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("in use by another process")]
    InUse,
    #[error("permission denied")]
    PermissionDenied,
    #[error("vanished during cleanup")]
    Vanished,
    #[error("directory not empty")]
    NotEmpty,
    #[error("{0}")]
    Other(String),
}

impl SkipReason {
    /// Whether the entry may still be on disk, keeping its parent non-empty.
    pub fn leaves_entry(&self) -> bool {
        !matches!(self, SkipReason::Vanished)
    }
}

impl From<&io::Error> for SkipReason {
    fn from(err: &io::Error) -> Self {
        // ERROR_SHARING_VIOLATION and ERROR_LOCK_VIOLATION
        if cfg!(windows) && matches!(err.raw_os_error(), Some(32 | 33)) {
            return SkipReason::InUse;
        }
        match err.kind() {
            io::ErrorKind::NotFound => SkipReason::Vanished,
            io::ErrorKind::PermissionDenied => SkipReason::PermissionDenied,
            io::ErrorKind::DirectoryNotEmpty => SkipReason::NotEmpty,
            io::ErrorKind::ResourceBusy => SkipReason::InUse,
            _ => SkipReason::Other(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of cleaning one or more targets.
///
/// Every entry the walk sees ends up either deleted or skipped, except
/// directories kept because something under them was skipped; those are
/// only tallied in `dirs_retained`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    pub bytes_freed: u64,
    pub files_deleted: u64,
    pub dirs_removed: u64,
    pub dirs_retained: u64,
    pub skipped: Vec<Skipped>,
}

impl CleanupResult {
    pub fn deleted_count(&self) -> u64 {
        self.files_deleted + self.dirs_removed
    }

    pub fn skipped_count(&self) -> u64 {
        self.skipped.len() as u64
    }

    /// Items accounted for so far: deleted plus skipped.
    pub fn processed(&self) -> u64 {
        self.deleted_count() + self.skipped_count()
    }

    pub fn is_empty(&self) -> bool {
        self.processed() == 0 && self.dirs_retained == 0
    }

    pub fn merge(&mut self, other: CleanupResult) {
        self.bytes_freed += other.bytes_freed;
        self.files_deleted += other.files_deleted;
        self.dirs_removed += other.dirs_removed;
        self.dirs_retained += other.dirs_retained;
        self.skipped.extend(other.skipped);
    }

    fn skip(&mut self, path: PathBuf, err: &io::Error) -> SkipReason {
        let reason = SkipReason::from(err);
        debug!(path = %path.display(), %reason, "skipped");
        self.skipped.push(Skipped {
            path,
            reason: reason.clone(),
        });
        reason
    }
}

impl AddAssign for CleanupResult {
    fn add_assign(&mut self, rhs: CleanupResult) {
        self.merge(rhs);
    }
}

impl Add for CleanupResult {
    type Output = CleanupResult;

    fn add(mut self, rhs: CleanupResult) -> CleanupResult {
        self.merge(rhs);
        self
    }
}

impl Sum for CleanupResult {
    fn sum<I: Iterator<Item = CleanupResult>>(iter: I) -> Self {
        iter.fold(CleanupResult::default(), Add::add)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Cleaner<F = LocalFs> {
    fs: F,
}

impl<F: Filesystem> Cleaner<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Empties `root` without reporting progress.
    pub fn clean(&self, root: &Path) -> CleanupResult {
        self.clean_with_progress(root, &mut Silent)
    }

    /// Empties `root`, keeping the directory itself. A missing root is a
    /// no-op; a root that cannot be listed comes back as one skipped item.
    pub fn clean_with_progress(&self, root: &Path, progress: &mut dyn Progress) -> CleanupResult {
        self.try_clean(root, progress).unwrap_or_default()
    }

    /// Like [`Cleaner::clean_with_progress`], but `None` when `root` does not exist.
    pub fn try_clean(&self, root: &Path, progress: &mut dyn Progress) -> Option<CleanupResult> {
        let mut result = CleanupResult::default();

        match self.fs.probe(root) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(root = %root.display(), "target does not exist, nothing to clean");
                return None;
            }
            Err(err) => {
                warn!(root = %root.display(), error = %err, "cannot access target");
                result.skip(root.to_path_buf(), &err);
                progress.advance(result.processed(), result.bytes_freed);
                return Some(result);
            }
        }

        // Directories known to still hold something.
        let mut occupied: HashSet<PathBuf> = HashSet::new();

        for entry in self.fs.walk(root) {
            match entry {
                Err(WalkError { path, source }) => {
                    result.skip(path.clone(), &source);
                    if path != root {
                        occupied.insert(path);
                    }
                }
                Ok(Entry { path, .. }) if path == root => continue,
                Ok(Entry {
                    path,
                    kind: kind @ (EntryKind::File | EntryKind::LinkDir),
                }) => {
                    if !self.delete_file(&path, kind, &mut result) {
                        hold_parent(&mut occupied, root, &path);
                    }
                }
                Ok(Entry {
                    path,
                    kind: EntryKind::Dir,
                }) => {
                    if occupied.remove(&path) {
                        trace!(path = %path.display(), "directory retained");
                        result.dirs_retained += 1;
                        hold_parent(&mut occupied, root, &path);
                    } else if !self.remove_dir(&path, &mut result) {
                        hold_parent(&mut occupied, root, &path);
                    }
                }
            }
            progress.advance(result.processed(), result.bytes_freed);
        }

        debug!(
            root = %root.display(),
            freed = result.bytes_freed,
            deleted = result.deleted_count(),
            skipped = result.skipped_count(),
            "target cleaned"
        );
        Some(result)
    }

    /// Deletes a file or link. Returns false when it may still exist.
    fn delete_file(&self, path: &Path, kind: EntryKind, result: &mut CleanupResult) -> bool {
        let outcome = self.fs.file_size(path).and_then(|size| {
            let removed = if kind == EntryKind::LinkDir {
                self.fs.remove_dir(path)
            } else {
                self.fs.remove_file(path)
            };
            removed.map(|()| size)
        });

        match outcome {
            Ok(size) => {
                trace!(path = %path.display(), size, "deleted file");
                result.bytes_freed += size;
                result.files_deleted += 1;
                true
            }
            Err(err) => !result.skip(path.to_path_buf(), &err).leaves_entry(),
        }
    }

    /// Returns false when the directory may still exist.
    fn remove_dir(&self, path: &Path, result: &mut CleanupResult) -> bool {
        match self.fs.remove_dir(path) {
            Ok(()) => {
                trace!(path = %path.display(), "removed directory");
                result.dirs_removed += 1;
                true
            }
            Err(err) => !result.skip(path.to_path_buf(), &err).leaves_entry(),
        }
    }
}

fn hold_parent(occupied: &mut HashSet<PathBuf>, root: &Path, path: &Path) {
    if let Some(parent) = path.parent() {
        if parent != root && parent.starts_with(root) {
            occupied.insert(parent.to_path_buf());
        }
    }
}
