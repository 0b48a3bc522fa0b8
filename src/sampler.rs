use crate::collectors::disks::DiskCollector;
use crate::collectors::host::HostCollector;
use crate::collectors::net::NetCollector;
use crate::collectors::procs::ProcCollector;
use crate::models::net::{rate_between, NetCounters};
use crate::state::StateStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Re-list network interfaces every this many ticks (hotplug, VPNs).
const NET_RESCAN_TICKS: u64 = 30;

/// Pulls one full reading from every collector per tick and publishes
/// it. The previous traffic counters are private to this struct: they
/// advance on every tick, frozen or not, so unfreezing computes the
/// next rate against fresh counters instead of stale ones.
pub struct Sampler {
    host:  HostCollector,
    net:   NetCollector,
    procs: ProcCollector,
    disks: DiskCollector,
    prev_counters: Option<NetCounters>,
    top_n: usize,
}

impl Sampler {
    pub fn new(top_n: usize) -> Self {
        Self {
            host:  HostCollector::new(),
            net:   NetCollector::new(),
            procs: ProcCollector::new(),
            disks: DiskCollector::new(),
            prev_counters: None,
            top_n,
        }
    }

    /// One sampling pass. Any single field that cannot be read is
    /// defaulted; a pass as a whole never fails.
    pub fn sample_once(&mut self, store: &StateStore) {
        let counters = self.net.read_counters();
        let rate = rate_between(self.prev_counters.as_ref(), &counters);
        self.prev_counters = Some(counters);

        let disks = self.disks.collect();
        let mut snapshot = self.host.collect();
        snapshot.disk_pct = DiskCollector::root_usage(&disks).unwrap_or(0.0);

        let processes = self.procs.collect(self.top_n);

        store.publish_sample(snapshot, rate, processes, disks);
    }

    /// Move onto a background thread ticking at `interval` until the
    /// shutdown flag is raised. Detached by the caller; there is
    /// nothing to flush on exit.
    pub fn spawn(
        mut self,
        store: StateStore,
        interval: Duration,
        shutdown: Arc<AtomicBool>,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            let mut tick: u64 = 0;
            while !shutdown.load(Ordering::Relaxed) {
                let started = Instant::now();
                self.sample_once(&store);

                tick += 1;
                if tick % NET_RESCAN_TICKS == 0 {
                    self.net.rescan();
                }

                let elapsed = started.elapsed();
                if elapsed < interval {
                    thread::sleep(interval - elapsed);
                }
            }
        })
    }
}
