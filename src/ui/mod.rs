pub mod dashboard;
pub mod disk_table;
pub mod footer;
pub mod help;
pub mod kill_popup;
pub mod net_panel;
pub mod process_table;
pub mod theme;
pub mod usage_bars;

use crate::models::disk::DiskUsage;
use crate::models::process::ProcessEntry;
use crate::models::speedtest::SpeedtestProgress;

/// Immutable input for one rendered frame. The render loop caches the
/// last one and replays it while the view is frozen or the kill prompt
/// is up, so those redraws are identical.
#[derive(Clone)]
pub struct ViewModel {
    pub hostname: String,
    pub uptime:   String,
    pub clock:    String,
    pub frozen:   bool,

    pub cpu_pct:  f64,
    pub mem_pct:  f64,
    pub disk_pct: f64,
    pub warn_pct: f64,
    pub crit_pct: f64,

    pub processes: Vec<ProcessEntry>,
    pub disks:     Vec<DiskUsage>,

    /// `None` while the network panel is hidden.
    pub net: Option<NetPanel>,
}

#[derive(Clone)]
pub struct NetPanel {
    pub sent_bps: f64,
    pub recv_bps: f64,
    pub status:   NetStatus,
}

#[derive(Clone)]
pub enum NetStatus {
    Idle,
    Starting,
    Running(SpeedtestProgress),
    Done { download_bps: f64, upload_bps: f64 },
    Failed(String),
}
