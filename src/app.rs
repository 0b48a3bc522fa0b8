use crate::config::Config;
use crate::error::MonitorError;
use crate::killer;
use crate::listener;
use crate::models::process::ProcessEntry;
use crate::models::speedtest::SpeedtestOutcome;
use crate::sampler::Sampler;
use crate::speedtest;
use crate::state::StateStore;
use crate::ui::theme::{Theme, ThemeVariant};
use crate::ui::{dashboard, help, kill_popup, NetPanel, NetStatus, ViewModel};
use crate::util::{event_log, human};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Redraw cadence inside the kill prompt while waiting for a key.
const PROMPT_POLL: Duration = Duration::from_millis(150);
/// How long a kill / speed-test outcome stays in the footer.
const FEEDBACK_TTL: Duration = Duration::from_secs(5);

// ── Kill-prompt selection ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Cancelled,
    Invalid(String),
    Confirmed(ProcessEntry),
}

/// Map the typed digits to a prompt outcome. `0` cancels; anything
/// that is not a 1-based index into `procs` is an invalid selection
/// with no side effect.
pub fn resolve_selection(input: &str, procs: &[ProcessEntry]) -> Selection {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Selection::Invalid("nothing entered".to_string());
    }
    let index: usize = match trimmed.parse() {
        Ok(n) => n,
        Err(_) => return Selection::Invalid(format!("'{}' is not a number", trimmed)),
    };
    if index == 0 {
        return Selection::Cancelled;
    }
    match procs.get(index - 1) {
        Some(entry) => Selection::Confirmed(entry.clone()),
        None => Selection::Invalid(format!("{} is out of range (1-{})", index, procs.len())),
    }
}

// ── App ───────────────────────────────────────────────────────────────

pub struct App {
    config: Config,
    store:  StateStore,

    theme:         Theme,
    theme_variant: ThemeVariant,
    show_help:     bool,

    /// Raised once on quit; sampler and speed-test worker observe it at
    /// their suspension points. Background threads are detached.
    shutdown: Arc<AtomicBool>,

    /// Keys the listener does not consume: everything while the kill
    /// prompt is active, plus theme/help keys in normal mode.
    key_rx: mpsc::Receiver<KeyEvent>,

    /// Replayed verbatim while frozen or prompting.
    last_view: Option<ViewModel>,

    feedback: Option<(String, Instant)>,
}

impl App {
    pub fn new(config: Config, initial_theme: ThemeVariant) -> Self {
        let store = StateStore::new();
        let shutdown = Arc::new(AtomicBool::new(false));
        let (key_tx, key_rx) = mpsc::channel();

        // Prime the store so the first frame has real data, then hand
        // the sampler its own thread.
        let mut sampler = Sampler::new(config.general.top_processes);
        sampler.sample_once(&store);
        let _ = sampler.spawn(
            store.clone(),
            Duration::from_millis(config.general.sample_interval_ms.max(100)),
            shutdown.clone(),
        );

        let _ = listener::spawn(store.clone(), key_tx, shutdown.clone());

        Self {
            theme: Theme::for_variant(initial_theme),
            theme_variant: initial_theme,
            show_help: false,
            shutdown,
            key_rx,
            last_view: None,
            feedback: None,
            config,
            store,
        }
    }

    // ── Main render loop ──────────────────────────────────────────────

    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        let tick = Duration::from_millis(self.config.general.render_interval_ms.max(50));

        loop {
            let st = self.store.read();
            if st.should_quit {
                break;
            }

            // A pending kill request outranks the normal tick.
            if st.kill_requested {
                self.run_kill_prompt(terminal)?;
                continue;
            }

            if st.speedtest_requested && self.store.try_begin_speedtest() {
                speedtest::spawn(
                    self.store.clone(),
                    self.config.speedtest.clone(),
                    self.shutdown.clone(),
                );
            }

            while let Ok(key) = self.key_rx.try_recv() {
                self.handle_local_key(key);
            }
            self.expire_feedback();

            let vm = if st.frozen {
                self.cached_view()
            } else {
                let vm = self.build_view();
                self.last_view = Some(vm.clone());
                vm
            };

            let feedback = self.feedback.as_ref().map(|(m, _)| m.clone());
            let theme = self.theme.clone();
            let show_help = self.show_help;
            terminal.draw(|f| {
                dashboard::render(f, &vm, feedback.as_deref(), &theme);
                if show_help {
                    help::render(f, &theme);
                }
            })?;

            thread::sleep(tick);
        }

        self.shutdown.store(true, Ordering::Relaxed);
        Ok(())
    }

    // ── Kill prompt: pause-render, confirm, act, resume ───────────────

    fn run_kill_prompt<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        let procs = self.store.read().processes.clone();
        self.store.update(|s| s.prompt_active = true);

        // Drop keys typed before the prompt came up.
        while self.key_rx.try_recv().is_ok() {}

        let mut input = String::new();
        let selection = loop {
            let vm = self.cached_view();
            let theme = self.theme.clone();
            terminal.draw(|f| {
                dashboard::render(f, &vm, None, &theme);
                kill_popup::render(f, &procs, &input, &theme);
            })?;

            match self.key_rx.recv_timeout(PROMPT_POLL) {
                Ok(key) => match (key.code, key.modifiers) {
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                        self.store.update(|s| s.should_quit = true);
                        break Selection::Cancelled;
                    }
                    (KeyCode::Char(c), _) if c.is_ascii_digit() => input.push(c),
                    (KeyCode::Backspace, _) => {
                        input.pop();
                    }
                    (KeyCode::Enter, _) => break resolve_selection(&input, &procs),
                    (KeyCode::Esc, _) => break Selection::Cancelled,
                    _ => {}
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break Selection::Cancelled,
            }
        };

        let message = match selection {
            Selection::Cancelled => "Kill cancelled".to_string(),
            Selection::Invalid(reason) => MonitorError::InvalidSelection(reason).to_string(),
            Selection::Confirmed(entry) => {
                let timeout = Duration::from_millis(self.config.kill.term_timeout_ms);
                let message = match killer::terminate_tree(entry.pid, timeout) {
                    Ok(report) => report.summary(&entry.name),
                    Err(e) => format!("Kill failed: {}", e),
                };
                event_log::append("KILL", &message);
                message
            }
        };

        // One atomic update: a repeated `k` pressed mid-prompt cannot
        // re-enter the flow on the way out.
        self.store.update(|s| {
            s.kill_requested = false;
            s.prompt_active = false;
        });
        self.feedback = Some((message, Instant::now()));
        Ok(())
    }

    // ── View model construction ───────────────────────────────────────

    fn build_view(&self) -> ViewModel {
        let st = self.store.read();

        let net = if st.network_panel {
            let status = if let Some(p) = st.speedtest_progress {
                NetStatus::Running(p)
            } else if st.speedtest_running {
                NetStatus::Starting
            } else {
                match st.speedtest_result {
                    Some(SpeedtestOutcome::Done { download_bps, upload_bps }) => {
                        NetStatus::Done { download_bps, upload_bps }
                    }
                    Some(SpeedtestOutcome::Failed(reason)) => NetStatus::Failed(reason),
                    None => NetStatus::Idle,
                }
            };
            Some(NetPanel {
                sent_bps: st.net_rate.sent_bps,
                recv_bps: st.net_rate.recv_bps,
                status,
            })
        } else {
            None
        };

        ViewModel {
            hostname: st.snapshot.hostname.clone(),
            uptime:   human::fmt_uptime(st.snapshot.uptime_secs),
            clock:    Local::now().format("%H:%M:%S").to_string(),
            frozen:   st.frozen,
            cpu_pct:  st.snapshot.cpu_pct,
            mem_pct:  st.snapshot.mem_pct,
            disk_pct: st.snapshot.disk_pct,
            warn_pct: self.config.thresholds.warn_pct,
            crit_pct: self.config.thresholds.crit_pct,
            processes: st.processes,
            disks:     st.disks,
            net,
        }
    }

    /// The last rendered frame, built fresh only when none exists yet.
    fn cached_view(&mut self) -> ViewModel {
        match &self.last_view {
            Some(vm) => vm.clone(),
            None => {
                let vm = self.build_view();
                self.last_view = Some(vm.clone());
                vm
            }
        }
    }

    // ── Render-loop-local keys (forwarded by the listener) ────────────

    fn handle_local_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('t') => {
                self.theme_variant = self.theme_variant.next();
                self.theme = Theme::for_variant(self.theme_variant);
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = !self.show_help;
            }
            _ => {}
        }
    }

    fn expire_feedback(&mut self) {
        if let Some((_, at)) = &self.feedback {
            if at.elapsed() > FEEDBACK_TTL {
                self.feedback = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn procs(n: usize) -> Vec<ProcessEntry> {
        (0..n)
            .map(|i| ProcessEntry {
                pid: 100 + i as u32,
                name: format!("proc{}", i),
                cpu_pct: 10.0 * i as f64,
                mem_pct: 1.0,
            })
            .collect()
    }

    #[test]
    fn zero_cancels() {
        assert_eq!(resolve_selection("0", &procs(2)), Selection::Cancelled);
    }

    #[test]
    fn empty_and_garbage_are_invalid() {
        assert!(matches!(resolve_selection("", &procs(2)), Selection::Invalid(_)));
        assert!(matches!(resolve_selection("   ", &procs(2)), Selection::Invalid(_)));
        assert!(matches!(resolve_selection("abc", &procs(2)), Selection::Invalid(_)));
    }

    #[test]
    fn out_of_range_is_invalid() {
        // 3 with only 2 ranked processes
        assert!(matches!(resolve_selection("3", &procs(2)), Selection::Invalid(_)));
    }

    #[test]
    fn valid_index_resolves_the_right_pid() {
        match resolve_selection("2", &procs(3)) {
            Selection::Confirmed(entry) => assert_eq!(entry.pid, 101),
            other => panic!("expected Confirmed, got {:?}", other),
        }
    }
}
