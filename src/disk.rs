use std::path::Path;
use sysinfo::Disks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub total: u64,
    pub available: u64,
    pub used: u64,
}

impl DiskUsage {
    pub fn new(total: u64, available: u64) -> Self {
        Self {
            total,
            available,
            used: total.saturating_sub(available),
        }
    }

    pub fn usage_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f64 / self.total as f64 * 100.0
    }
}

/// Usage of the disk holding `path`: the one with the longest matching mount point.
pub fn usage_for(path: &Path) -> Option<DiskUsage> {
    let disks = Disks::new_with_refreshed_list();
    disks
        .list()
        .iter()
        .filter(|d| path.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().as_os_str().len())
        .map(|d| DiskUsage::new(d.total_space(), d.available_space()))
}
