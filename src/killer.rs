use crate::error::{MonitorError, Result};
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::thread;
use std::time::{Duration, Instant};
use sysinfo::System;

const WAIT_POLL: Duration = Duration::from_millis(100);

/// What happened to one process tree.
#[derive(Debug, Clone)]
pub struct KillReport {
    pub target:     u32,
    pub signalled:  usize,
    pub escalated:  usize,
    pub denied:     usize,
}

impl KillReport {
    pub fn summary(&self, name: &str) -> String {
        if self.signalled == 0 {
            return if self.denied > 0 {
                format!("Could not terminate {} (pid {}): permission denied", name, self.target)
            } else {
                format!("{} (pid {}) had already exited", name, self.target)
            };
        }
        let children = self.signalled.saturating_sub(1);
        let mut msg = if children > 0 {
            format!("Terminated {} (pid {}) and {} descendants", name, self.target, children)
        } else {
            format!("Terminated {} (pid {})", name, self.target)
        };
        if self.escalated > 0 {
            msg.push_str(&format!(", {} needed SIGKILL", self.escalated));
        }
        if self.denied > 0 {
            msg.push_str(&format!(", {} denied", self.denied));
        }
        msg
    }
}

/// Terminate `root` and every descendant: SIGTERM each descendant and
/// then the parent, wait up to `term_timeout` for them to exit, and
/// SIGKILL whatever is still alive. Per-pid ESRCH (already gone) and
/// EPERM (not ours) are tolerated and counted, never fatal.
pub fn terminate_tree(root: u32, term_timeout: Duration) -> Result<KillReport> {
    let mut sys = System::new();
    sys.refresh_processes();

    if !sys.processes().contains_key(&sysinfo::Pid::from_u32(root)) {
        return Err(MonitorError::ProcessNotFound(root));
    }

    let links: Vec<(u32, Option<u32>)> = sys
        .processes()
        .values()
        .map(|p| (p.pid().as_u32(), p.parent().map(|pp| pp.as_u32())))
        .collect();

    // Descendants first, parent last.
    let mut targets = descendants_of(&links, root);
    targets.push(root);

    let mut denied = 0usize;
    let mut signalled: Vec<u32> = Vec::new();
    for &pid in &targets {
        match request_terminate(pid) {
            Ok(()) => signalled.push(pid),
            Err(MonitorError::PermissionDenied(_)) => denied += 1,
            // Exited between enumeration and signalling; nothing to do.
            Err(MonitorError::ProcessNotFound(_)) => {}
            Err(_) => {}
        }
    }

    let stragglers = wait_for_exit(&signalled, term_timeout);
    let mut escalated = 0usize;
    for &pid in &stragglers {
        if force_kill(pid).is_ok() {
            escalated += 1;
        }
    }

    Ok(KillReport { target: root, signalled: signalled.len(), escalated, denied })
}

/// All transitive children of `root` in `(pid, parent)` links.
/// Deepest entries come last; the caller decides signalling order.
fn descendants_of(links: &[(u32, Option<u32>)], root: u32) -> Vec<u32> {
    let mut out = Vec::new();
    let mut frontier = vec![root];
    while let Some(parent) = frontier.pop() {
        for &(pid, pp) in links {
            if pp == Some(parent) && pid != root && !out.contains(&pid) {
                out.push(pid);
                frontier.push(pid);
            }
        }
    }
    out
}

pub fn request_terminate(pid: u32) -> Result<()> {
    send_signal(pid, Some(Signal::SIGTERM))
}

pub fn force_kill(pid: u32) -> Result<()> {
    send_signal(pid, Some(Signal::SIGKILL))
}

/// Poll pid liveness (signal 0) until everything exited or the timeout
/// lapses; returns the pids still alive.
pub fn wait_for_exit(pids: &[u32], timeout: Duration) -> Vec<u32> {
    let deadline = Instant::now() + timeout;
    let mut alive: Vec<u32> = pids.to_vec();
    loop {
        alive.retain(|&pid| is_alive(pid));
        if alive.is_empty() || Instant::now() >= deadline {
            return alive;
        }
        thread::sleep(WAIT_POLL.min(timeout));
    }
}

fn is_alive(pid: u32) -> bool {
    // EPERM still proves existence.
    matches!(
        kill(Pid::from_raw(pid as i32), None),
        Ok(()) | Err(Errno::EPERM)
    )
}

fn send_signal(pid: u32, sig: Option<Signal>) -> Result<()> {
    match kill(Pid::from_raw(pid as i32), sig) {
        Ok(()) => Ok(()),
        Err(Errno::ESRCH) => Err(MonitorError::ProcessNotFound(pid)),
        Err(Errno::EPERM) => Err(MonitorError::PermissionDenied(pid)),
        Err(e) => Err(std::io::Error::from_raw_os_error(e as i32).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_nested_descendants() {
        // 1 ── 2 ── 4
        //   └─ 3      5 (unrelated)
        let links = vec![
            (1, None),
            (2, Some(1)),
            (3, Some(1)),
            (4, Some(2)),
            (5, Some(99)),
        ];
        let mut got = descendants_of(&links, 1);
        got.sort_unstable();
        assert_eq!(got, vec![2, 3, 4]);
    }

    #[test]
    fn leaf_process_has_no_descendants() {
        let links = vec![(1, None), (2, Some(1))];
        assert!(descendants_of(&links, 2).is_empty());
    }

    #[test]
    fn summary_counts_children_and_escalations() {
        let report = KillReport { target: 42, signalled: 3, escalated: 1, denied: 0 };
        let msg = report.summary("firefox");
        assert!(msg.contains("firefox"));
        assert!(msg.contains("pid 42"));
        assert!(msg.contains("2 descendants"));
        assert!(msg.contains("SIGKILL"));
    }

    #[test]
    fn summary_for_single_process() {
        let report = KillReport { target: 7, signalled: 1, escalated: 0, denied: 0 };
        assert_eq!(report.summary("sleep"), "Terminated sleep (pid 7)");
    }

    #[test]
    fn summary_reports_denied_and_vanished_trees() {
        let denied = KillReport { target: 1, signalled: 0, escalated: 0, denied: 1 };
        assert!(denied.summary("init").contains("permission denied"));

        let gone = KillReport { target: 9, signalled: 0, escalated: 0, denied: 0 };
        assert!(gone.summary("ghost").contains("already exited"));
    }
}
