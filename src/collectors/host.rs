use crate::models::snapshot::HostSnapshot;
use sysinfo::System;

/// Host-level snapshot source: CPU, memory, hostname, uptime. The
/// root-disk figure is filled in by the sampler from the disk collector.
pub struct HostCollector {
    sys: System,
}

impl HostCollector {
    pub fn new() -> Self {
        let mut sys = System::new();
        // Baseline reading; CPU usage is a delta against the previous refresh.
        sys.refresh_cpu();
        sys.refresh_memory();
        Self { sys }
    }

    pub fn collect(&mut self) -> HostSnapshot {
        self.sys.refresh_cpu();
        self.sys.refresh_memory();

        let cpu_pct = if self.sys.cpus().is_empty() {
            0.0
        } else {
            self.sys.global_cpu_info().cpu_usage() as f64
        };

        let total = self.sys.total_memory();
        let mem_pct = if total == 0 {
            0.0
        } else {
            self.sys.used_memory() as f64 / total as f64 * 100.0
        };

        HostSnapshot {
            hostname:    System::host_name().unwrap_or_else(|| "unknown".to_string()),
            uptime_secs: System::uptime(),
            cpu_pct,
            mem_pct,
            disk_pct: 0.0,
        }
    }
}
