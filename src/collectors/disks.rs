use crate::error::{MonitorError, Result};
use crate::models::disk::DiskUsage;
use sysinfo::Disks;

/// Pseudo and packaging filesystems to keep out of the disk table.
const SKIP_FS: &[&str] = &["squashfs", "overlay", "tmpfs", "devtmpfs", "ramfs"];

/// Disk-usage table source.
pub struct DiskCollector {
    disks: Disks,
}

impl DiskCollector {
    pub fn new() -> Self {
        Self { disks: Disks::new_with_refreshed_list() }
    }

    pub fn collect(&mut self) -> Vec<DiskUsage> {
        self.disks.refresh();

        let mut out: Vec<DiskUsage> = self
            .disks
            .iter()
            .filter_map(|d| {
                let fs_type = d.file_system().to_string_lossy().to_string();
                let device  = d.name().to_string_lossy().to_string();
                if SKIP_FS.contains(&fs_type.as_str()) || device.starts_with("/dev/loop") {
                    return None;
                }
                Some(DiskUsage {
                    device,
                    mount: d.mount_point().to_string_lossy().to_string(),
                    fs_type,
                    total_bytes: d.total_space(),
                    avail_bytes: d.available_space(),
                })
            })
            .collect();

        out.sort_by(|a, b| a.mount.cmp(&b.mount));
        out.dedup_by(|a, b| a.mount == b.mount);
        out
    }

    /// Usage of the mount covering `/`, for the header gauge. The
    /// caller defaults the field when no root mount is readable.
    pub fn root_usage(list: &[DiskUsage]) -> Result<f64> {
        list.iter()
            .find(|d| d.mount == "/")
            .map(|d| d.used_pct())
            .ok_or(MonitorError::ProviderField("root filesystem"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(mount: &str, total: u64, avail: u64) -> DiskUsage {
        DiskUsage {
            device:      format!("/dev/{}", mount.trim_matches('/')),
            mount:       mount.to_string(),
            fs_type:     "ext4".to_string(),
            total_bytes: total,
            avail_bytes: avail,
        }
    }

    #[test]
    fn root_usage_finds_the_root_mount() {
        let list = vec![disk("/home", 100, 50), disk("/", 200, 50)];
        assert_eq!(DiskCollector::root_usage(&list).unwrap(), 75.0);
    }

    #[test]
    fn missing_root_is_a_provider_field_error() {
        let list = vec![disk("/home", 100, 50)];
        assert!(matches!(
            DiskCollector::root_usage(&list),
            Err(MonitorError::ProviderField(_))
        ));
    }

    #[test]
    fn used_pct_handles_empty_disk() {
        let d = disk("/", 0, 0);
        assert_eq!(d.used_pct(), 0.0);
    }
}
