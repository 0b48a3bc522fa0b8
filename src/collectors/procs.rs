use crate::models::process::{rank_processes, ProcessEntry};
use sysinfo::System;

/// Process table source. Owns its own `System` so per-process CPU
/// deltas accumulate between refreshes.
pub struct ProcCollector {
    sys: System,
}

impl ProcCollector {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_processes();
        sys.refresh_memory();
        Self { sys }
    }

    /// Ranked top-`limit` processes by CPU. A process that vanishes
    /// mid-enumeration simply does not appear; that is never an error.
    pub fn collect(&mut self, limit: usize) -> Vec<ProcessEntry> {
        self.sys.refresh_processes();
        self.sys.refresh_memory();
        let total_mem = self.sys.total_memory();

        let entries: Vec<ProcessEntry> = self
            .sys
            .processes()
            .values()
            .map(|p| ProcessEntry {
                pid:     p.pid().as_u32(),
                name:    p.name().to_string(),
                cpu_pct: p.cpu_usage() as f64,
                mem_pct: if total_mem == 0 {
                    0.0
                } else {
                    p.memory() as f64 / total_mem as f64 * 100.0
                },
            })
            .collect();

        rank_processes(entries, limit)
    }
}
