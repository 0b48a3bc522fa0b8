#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedtestPhase {
    Download,
    Upload,
}

impl SpeedtestPhase {
    pub fn label(&self) -> &'static str {
        match self {
            SpeedtestPhase::Download => "download",
            SpeedtestPhase::Upload   => "upload",
        }
    }
}

/// Incremental progress published after each measurement slice.
#[derive(Debug, Clone, Copy)]
pub struct SpeedtestProgress {
    pub phase:   SpeedtestPhase,
    pub percent: u8,
    pub bps:     f64,
}

/// Terminal outcome of one speed-test run.
#[derive(Debug, Clone)]
pub enum SpeedtestOutcome {
    Done { download_bps: f64, upload_bps: f64 },
    Failed(String),
}
