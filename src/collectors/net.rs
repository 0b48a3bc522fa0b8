use crate::models::net::NetCounters;
use std::time::Instant;
use sysinfo::Networks;

/// Aggregate traffic counter source. Loopback is skipped so local
/// chatter does not inflate the displayed rates.
pub struct NetCollector {
    networks: Networks,
}

impl NetCollector {
    pub fn new() -> Self {
        Self { networks: Networks::new_with_refreshed_list() }
    }

    pub fn read_counters(&mut self) -> NetCounters {
        self.networks.refresh();

        let mut sent = 0u64;
        let mut recv = 0u64;
        for (name, data) in &self.networks {
            if name == "lo" || name.starts_with("lo") {
                continue;
            }
            sent = sent.saturating_add(data.total_transmitted());
            recv = recv.saturating_add(data.total_received());
        }

        NetCounters { bytes_sent: sent, bytes_recv: recv, at: Instant::now() }
    }

    /// Pick up interfaces that appeared since startup.
    pub fn rescan(&mut self) {
        self.networks.refresh_list();
    }
}
