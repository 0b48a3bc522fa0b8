use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

pub fn log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("smon").join("events.log"))
}

/// Append one operator-relevant event (kill outcome, speed-test result)
/// to the persistent log file. Best-effort: a missing or read-only
/// data directory is silently ignored.
pub fn append(kind: &str, message: &str) {
    let path = match log_path() {
        Some(p) => p,
        None    => return,
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
        let _ = writeln!(file, "{} [{}] {}", now, kind, message);
    }
}
