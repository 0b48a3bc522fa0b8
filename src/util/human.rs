/// Format bytes/s into a human-readable string: "12.5 MB/s"
pub fn fmt_rate(bytes_per_sec: f64) -> String {
    fmt_bytes_f(bytes_per_sec) + "/s"
}

/// Format a raw byte count into a human-readable string: "12.5 MB"
pub fn fmt_bytes(bytes: u64) -> String {
    fmt_bytes_f(bytes as f64)
}

fn fmt_bytes_f(b: f64) -> String {
    const TB: f64 = 1_099_511_627_776.0;
    const GB: f64 = 1_073_741_824.0;
    const MB: f64 = 1_048_576.0;
    const KB: f64 = 1_024.0;
    if b >= TB      { format!("{:.1} TB", b / TB) }
    else if b >= GB { format!("{:.1} GB", b / GB) }
    else if b >= MB { format!("{:.1} MB", b / MB) }
    else if b >= KB { format!("{:.1} KB", b / KB) }
    else            { format!("{:.0} B",  b) }
}

/// Format a percentage with no decimals: "84%"
pub fn fmt_pct(pct: f64) -> String {
    format!("{:.0}%", pct)
}

/// Format an uptime in seconds as "3d 04:05:12" (days omitted when zero).
pub fn fmt_uptime(secs: u64) -> String {
    let days  = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let mins  = (secs % 3_600) / 60;
    let s     = secs % 60;
    if days > 0 {
        format!("{}d {:02}:{:02}:{:02}", days, hours, mins, s)
    } else {
        format!("{:02}:{:02}:{:02}", hours, mins, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_rates() {
        assert_eq!(fmt_rate(512.0), "512 B/s");
        assert_eq!(fmt_rate(2048.0), "2.0 KB/s");
        assert_eq!(fmt_rate(3.5 * 1_048_576.0), "3.5 MB/s");
        assert_eq!(fmt_rate(2.0 * 1_073_741_824.0), "2.0 GB/s");
    }

    #[test]
    fn formats_uptime_with_and_without_days() {
        assert_eq!(fmt_uptime(59), "00:00:59");
        assert_eq!(fmt_uptime(3_661), "01:01:01");
        assert_eq!(fmt_uptime(90_000), "1d 01:00:00");
    }

    #[test]
    fn formats_percent() {
        assert_eq!(fmt_pct(84.6), "85%");
        assert_eq!(fmt_pct(0.0), "0%");
    }
}
