use crate::input::{handle_key, Action};
use crate::state::StateStore;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

/// Key listener: a long-lived thread and the only reader of terminal
/// input. Dashboard commands are applied straight to the store; while
/// the kill prompt is active every raw key event is forwarded over the
/// channel instead, and keys the store does not care about (theme,
/// help) are forwarded for the render loop to handle.
///
/// The thread is detached: it may sit blocked in `event::read()` at
/// shutdown; there is nothing to flush.
pub fn spawn(
    store: StateStore,
    tx: mpsc::Sender<KeyEvent>,
    shutdown: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(_) => break,
            };
            let key = match ev {
                Event::Key(key) if key.kind == KeyEventKind::Press => key,
                _ => continue,
            };

            if store.read().prompt_active {
                if tx.send(key).is_err() {
                    break;
                }
                continue;
            }

            match handle_key(key) {
                Action::Quit => {
                    store.update(|s| s.should_quit = true);
                    break;
                }
                Action::KillPrompt => {
                    store.update(|s| s.kill_requested = true);
                }
                Action::NetworkPanel => {
                    // Toggling the panel on also kicks off a measurement;
                    // the single-flight gate makes repeats harmless.
                    store.update(|s| {
                        s.network_panel = !s.network_panel;
                        if s.network_panel {
                            s.speedtest_requested = true;
                        }
                    });
                }
                Action::ToggleFreeze => {
                    store.update(|s| s.frozen = !s.frozen);
                }
                Action::CycleTheme | Action::ShowHelp => {
                    // Render-loop-local concerns; hand the key over.
                    if tx.send(key).is_err() {
                        break;
                    }
                }
                Action::None => {}
            }
        }
    })
}
