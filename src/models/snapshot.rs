/// One point-in-time reading of host-level metrics. Immutable once
/// produced; the sampler builds a fresh one every tick.
#[derive(Debug, Clone, Default)]
pub struct HostSnapshot {
    pub hostname:    String,
    pub uptime_secs: u64,
    pub cpu_pct:     f64,
    pub mem_pct:     f64,
    /// Usage of the root filesystem. Defaults to 0 when no root mount
    /// is readable.
    pub disk_pct:    f64,
}
