use crate::config::SpeedtestConfig;
use crate::error::{MonitorError, Result};
use crate::models::speedtest::{SpeedtestOutcome, SpeedtestPhase, SpeedtestProgress};
use crate::state::StateStore;
use crate::util::{event_log, human};
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Progress percent after slice `i` of `steps`. The last slice always
/// maps to exactly 100, whatever the step count.
pub fn step_percent(i: usize, steps: usize) -> u8 {
    let steps = steps.max(1);
    (((i + 1) * 100) / steps).min(100) as u8
}

/// Start the two-phase measurement worker. The caller has already won
/// the single-flight gate (`StateStore::try_begin_speedtest`); this
/// thread owns `speedtest_running` until it exits and clears the flag
/// on every path out.
pub fn spawn(store: StateStore, cfg: SpeedtestConfig, shutdown: Arc<AtomicBool>) {
    thread::spawn(move || {
        let outcome = match run(&store, &cfg, &shutdown) {
            Ok(Some((download_bps, upload_bps))) => {
                Some(SpeedtestOutcome::Done { download_bps, upload_bps })
            }
            // Shutdown mid-run: abandon quietly, publish nothing.
            Ok(None) => None,
            Err(e) => Some(SpeedtestOutcome::Failed(e.to_string())),
        };

        if let Some(o) = &outcome {
            let line = match o {
                SpeedtestOutcome::Done { download_bps, upload_bps } => format!(
                    "down {} up {}",
                    human::fmt_rate(*download_bps),
                    human::fmt_rate(*upload_bps)
                ),
                SpeedtestOutcome::Failed(reason) => format!("failed: {}", reason),
            };
            event_log::append("SPEEDTEST", &line);
        }

        store.update(|s| {
            s.speedtest_progress = None;
            if let Some(o) = outcome {
                s.speedtest_result = Some(o);
            }
            s.speedtest_running = false;
        });
    });
}

/// `Ok(None)` means the shutdown flag interrupted the run.
fn run(
    store: &StateStore,
    cfg: &SpeedtestConfig,
    shutdown: &Arc<AtomicBool>,
) -> Result<Option<(f64, f64)>> {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(10))
        .timeout_read(Duration::from_secs(cfg.timeout_secs))
        .timeout_write(Duration::from_secs(cfg.timeout_secs))
        .build();

    let download_bps = match download_phase(&agent, store, cfg, shutdown)? {
        Some(bps) => bps,
        None => return Ok(None),
    };
    let upload_bps = match upload_phase(&agent, store, cfg, shutdown)? {
        Some(bps) => bps,
        None => return Ok(None),
    };
    Ok(Some((download_bps, upload_bps)))
}

fn download_phase(
    agent: &ureq::Agent,
    store: &StateStore,
    cfg: &SpeedtestConfig,
    shutdown: &Arc<AtomicBool>,
) -> Result<Option<f64>> {
    let steps = cfg.steps.max(1);
    let slice = (cfg.download_bytes / steps as u64).max(1);

    let resp = agent
        .get(&cfg.download_url)
        .call()
        .map_err(|e| MonitorError::measurement(format!("download request: {}", e)))?;
    let mut body = resp.into_reader();

    let started = Instant::now();
    let mut total: u64 = 0;
    let mut buf = vec![0u8; 64 * 1024];

    for i in 0..steps {
        if shutdown.load(Ordering::Relaxed) {
            return Ok(None);
        }

        let mut got: u64 = 0;
        while got < slice {
            let want = buf.len().min((slice - got) as usize);
            let n = body
                .read(&mut buf[..want])
                .map_err(|e| MonitorError::measurement(format!("download read: {}", e)))?;
            if n == 0 {
                break;
            }
            got += n as u64;
        }
        total += got;

        let bps = total as f64 / started.elapsed().as_secs_f64().max(1e-6);
        // A short read means the server sent everything it had; the
        // phase is complete, so the published percent is 100.
        let ended = got < slice;
        let percent = if ended { 100 } else { step_percent(i, steps) };
        store.update(|s| {
            s.speedtest_progress = Some(SpeedtestProgress {
                phase: SpeedtestPhase::Download,
                percent,
                bps,
            });
        });
        if ended {
            break;
        }
    }

    if total == 0 {
        return Err(MonitorError::measurement("download returned no data"));
    }
    Ok(Some(total as f64 / started.elapsed().as_secs_f64().max(1e-6)))
}

fn upload_phase(
    agent: &ureq::Agent,
    store: &StateStore,
    cfg: &SpeedtestConfig,
    shutdown: &Arc<AtomicBool>,
) -> Result<Option<f64>> {
    let steps = cfg.steps.max(1);
    let chunk = (cfg.upload_bytes / steps as u64).max(1) as usize;
    let payload = vec![0u8; chunk];

    let started = Instant::now();
    let mut total: u64 = 0;

    for i in 0..steps {
        if shutdown.load(Ordering::Relaxed) {
            return Ok(None);
        }

        agent
            .post(&cfg.upload_url)
            .set("Content-Type", "application/octet-stream")
            .send_bytes(&payload)
            .map_err(|e| MonitorError::measurement(format!("upload request: {}", e)))?;
        total += chunk as u64;

        let bps = total as f64 / started.elapsed().as_secs_f64().max(1e-6);
        store.update(|s| {
            s.speedtest_progress = Some(SpeedtestProgress {
                phase: SpeedtestPhase::Upload,
                percent: step_percent(i, steps),
                bps,
            });
        });
    }

    Ok(Some(total as f64 / started.elapsed().as_secs_f64().max(1e-6)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_step_is_always_one_hundred() {
        for steps in [1usize, 2, 3, 7, 20, 100] {
            assert_eq!(step_percent(steps - 1, steps), 100, "steps = {}", steps);
        }
    }

    #[test]
    fn percent_is_monotone_and_bounded() {
        let steps = 20;
        let mut prev = 0u8;
        for i in 0..steps {
            let p = step_percent(i, steps);
            assert!(p >= prev);
            assert!(p <= 100);
            prev = p;
        }
    }

    #[test]
    fn even_twenty_step_mapping() {
        assert_eq!(step_percent(0, 20), 5);
        assert_eq!(step_percent(9, 20), 50);
        assert_eq!(step_percent(19, 20), 100);
    }

    #[test]
    fn zero_steps_is_clamped() {
        assert_eq!(step_percent(0, 0), 100);
    }
}
