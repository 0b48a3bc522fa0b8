use crate::models::disk::DiskUsage;
use crate::models::net::NetRate;
use crate::models::process::ProcessEntry;
use crate::models::snapshot::HostSnapshot;
use crate::models::speedtest::{SpeedtestOutcome, SpeedtestProgress};
use std::sync::{Arc, Mutex, PoisonError};

/// Everything the actors share. Lives behind one mutex for the process
/// lifetime; every cross-thread read and write goes through `StateStore`.
#[derive(Debug, Clone)]
pub struct DashboardState {
    // Latest sampled view data
    pub snapshot:  HostSnapshot,
    pub net_rate:  NetRate,
    pub processes: Vec<ProcessEntry>,
    pub disks:     Vec<DiskUsage>,

    // View flags
    pub frozen:        bool,
    pub network_panel: bool,

    // Kill flow
    pub kill_requested: bool,
    pub prompt_active:  bool,

    // Speed test
    pub speedtest_requested: bool,
    pub speedtest_running:   bool,
    pub speedtest_progress:  Option<SpeedtestProgress>,
    pub speedtest_result:    Option<SpeedtestOutcome>,

    pub should_quit: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            snapshot:  HostSnapshot::default(),
            net_rate:  NetRate::default(),
            processes: Vec::new(),
            disks:     Vec::new(),
            frozen:        false,
            network_panel: true,
            kill_requested: false,
            prompt_active:  false,
            speedtest_requested: false,
            speedtest_running:   false,
            speedtest_progress:  None,
            speedtest_result:    None,
            should_quit: false,
        }
    }
}

/// Shared handle to the dashboard state. `read` returns a consistent
/// clone; `update` applies one all-or-nothing mutation. Clones share
/// the same underlying state.
#[derive(Clone)]
pub struct StateStore {
    inner: Arc<Mutex<DashboardState>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(Mutex::new(DashboardState::default())) }
    }

    pub fn read(&self) -> DashboardState {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Sampler publication point. While frozen the displayed data must
    /// not move, so this is a no-op; the sampler keeps its own counter
    /// state current regardless.
    pub fn publish_sample(
        &self,
        snapshot: HostSnapshot,
        net_rate: NetRate,
        processes: Vec<ProcessEntry>,
        disks: Vec<DiskUsage>,
    ) {
        self.update(|s| {
            if s.frozen {
                return;
            }
            s.snapshot  = snapshot;
            s.net_rate  = net_rate;
            s.processes = processes;
            s.disks     = disks;
        });
    }

    /// Single-flight gate for the speed test: claims the running slot
    /// and clears the previous outcome, or reports that a run is
    /// already in flight. The request flag is consumed either way.
    pub fn try_begin_speedtest(&self) -> bool {
        self.update(|s| {
            s.speedtest_requested = false;
            if s.speedtest_running {
                return false;
            }
            s.speedtest_running  = true;
            s.speedtest_progress = None;
            s.speedtest_result   = None;
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot(cpu: f64) -> HostSnapshot {
        HostSnapshot { cpu_pct: cpu, ..Default::default() }
    }

    #[test]
    fn publish_updates_view_data() {
        let store = StateStore::new();
        store.publish_sample(
            sample_snapshot(42.0),
            NetRate { sent_bps: 1.0, recv_bps: 2.0 },
            vec![],
            vec![],
        );
        let st = store.read();
        assert_eq!(st.snapshot.cpu_pct, 42.0);
        assert_eq!(st.net_rate.recv_bps, 2.0);
    }

    #[test]
    fn frozen_blocks_publication() {
        let store = StateStore::new();
        store.publish_sample(sample_snapshot(10.0), NetRate::default(), vec![], vec![]);
        store.update(|s| s.frozen = true);

        for i in 0..5 {
            store.publish_sample(
                sample_snapshot(90.0 + i as f64),
                NetRate { sent_bps: 999.0, recv_bps: 999.0 },
                vec![],
                vec![],
            );
        }
        let st = store.read();
        assert_eq!(st.snapshot.cpu_pct, 10.0);
        assert_eq!(st.net_rate.sent_bps, 0.0);

        store.update(|s| s.frozen = false);
        store.publish_sample(sample_snapshot(55.0), NetRate::default(), vec![], vec![]);
        assert_eq!(store.read().snapshot.cpu_pct, 55.0);
    }

    #[test]
    fn speedtest_start_is_single_flight() {
        let store = StateStore::new();
        store.update(|s| s.speedtest_requested = true);
        assert!(store.try_begin_speedtest());

        // A second request while running is a no-op and leaves state alone.
        store.update(|s| s.speedtest_requested = true);
        assert!(!store.try_begin_speedtest());
        let st = store.read();
        assert!(st.speedtest_running);
        assert!(!st.speedtest_requested);
    }

    #[test]
    fn begin_clears_previous_outcome() {
        let store = StateStore::new();
        store.update(|s| {
            s.speedtest_result = Some(SpeedtestOutcome::Failed("timeout".into()));
        });
        assert!(store.try_begin_speedtest());
        assert!(store.read().speedtest_result.is_none());
    }

    #[test]
    fn freeze_toggle_twice_returns_to_prior_state() {
        let store = StateStore::new();
        store.update(|s| s.frozen = !s.frozen);
        store.update(|s| s.frozen = !s.frozen);
        assert!(!store.read().frozen);
    }
}
