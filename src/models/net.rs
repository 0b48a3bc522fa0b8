use std::time::Instant;

/// Raw cumulative traffic counters, aggregated over all non-loopback
/// interfaces (one snapshot).
#[derive(Debug, Clone, Copy)]
pub struct NetCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub at:         Instant,
}

/// Per-second throughput derived from two counter readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetRate {
    pub sent_bps: f64,
    pub recv_bps: f64,
}

/// Rate between two counter readings. Zero when there is no previous
/// reading, when no time has passed, and when a counter went backwards
/// (interface reset): never negative, never a division by zero.
pub fn rate_between(prev: Option<&NetCounters>, cur: &NetCounters) -> NetRate {
    let prev = match prev {
        Some(p) => p,
        None    => return NetRate::default(),
    };
    let dt = cur.at.saturating_duration_since(prev.at).as_secs_f64();
    if dt <= 0.0 {
        return NetRate::default();
    }
    NetRate {
        sent_bps: cur.bytes_sent.saturating_sub(prev.bytes_sent) as f64 / dt,
        recv_bps: cur.bytes_recv.saturating_sub(prev.bytes_recv) as f64 / dt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn counters(sent: u64, recv: u64, at: Instant) -> NetCounters {
        NetCounters { bytes_sent: sent, bytes_recv: recv, at }
    }

    #[test]
    fn no_previous_reading_is_zero() {
        let cur = counters(5000, 9000, Instant::now());
        let r = rate_between(None, &cur);
        assert_eq!(r.sent_bps, 0.0);
        assert_eq!(r.recv_bps, 0.0);
    }

    #[test]
    fn zero_elapsed_is_zero() {
        let t = Instant::now();
        let prev = counters(1000, 1000, t);
        let cur  = counters(9000, 9000, t);
        let r = rate_between(Some(&prev), &cur);
        assert_eq!(r.sent_bps, 0.0);
        assert_eq!(r.recv_bps, 0.0);
    }

    #[test]
    fn two_second_window() {
        // 1000 → 3000 bytes over 2 s = 1000 B/s
        let t0 = Instant::now();
        let prev = counters(1000, 2000, t0);
        let cur  = counters(3000, 6000, t0 + Duration::from_secs(2));
        let r = rate_between(Some(&prev), &cur);
        assert_eq!(r.sent_bps, 1000.0);
        assert_eq!(r.recv_bps, 2000.0);
    }

    #[test]
    fn counter_regression_clamps_to_zero() {
        let t0 = Instant::now();
        let prev = counters(5000, 5000, t0);
        let cur  = counters(100, 7000, t0 + Duration::from_secs(1));
        let r = rate_between(Some(&prev), &cur);
        assert_eq!(r.sent_bps, 0.0);
        assert_eq!(r.recv_bps, 2000.0);
    }
}
