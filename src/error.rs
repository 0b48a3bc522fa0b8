use thiserror::Error;

/// Non-fatal failure classes. Every variant is handled at the component
/// it occurs in; none may tear down the render loop or the listener.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("process {0} no longer exists")]
    ProcessNotFound(u32),

    #[error("permission denied for process {0}")]
    PermissionDenied(u32),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("measurement failed: {0}")]
    Measurement(String),

    #[error("metric unavailable: {0}")]
    ProviderField(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MonitorError>;

impl MonitorError {
    pub fn measurement<S: Into<String>>(msg: S) -> Self {
        Self::Measurement(msg.into())
    }
}
