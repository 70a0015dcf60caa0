use crate::fs::{EntryKind, Filesystem};
use std::path::Path;

/// What a target holds before cleaning.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Survey {
    pub items: u64,
    pub bytes: u64,
}

impl Survey {
    pub fn size_human(&self) -> String {
        crate::report::format_size(self.bytes)
    }
}

/// Counts entries below `root` and sums file sizes. Anything unreadable is
/// left out, so this is an estimate.
pub fn survey(fs: &dyn Filesystem, root: &Path) -> Survey {
    if fs.probe(root).is_err() {
        return Survey::default();
    }

    fs.walk(root)
        .filter_map(|e| e.ok())
        .fold(Survey::default(), |mut acc, entry| {
            acc.items += 1;
            if entry.kind != EntryKind::Dir {
                acc.bytes += fs.file_size(&entry.path).unwrap_or(0);
            }
            acc
        })
}
