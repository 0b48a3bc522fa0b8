use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub thresholds: ThresholdConfig,

    #[serde(default)]
    pub speedtest: SpeedtestConfig,

    #[serde(default)]
    pub kill: KillConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Render tick interval in milliseconds
    pub render_interval_ms: u64,
    /// Sampler tick interval in milliseconds (decoupled from rendering)
    pub sample_interval_ms: u64,
    /// Depth of the ranked process table
    pub top_processes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Gauge turns to the warning tier at this usage percent
    pub warn_pct: f64,
    /// Gauge turns to the critical tier at this usage percent
    pub crit_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedtestConfig {
    /// Download measurement endpoint; must serve at least `download_bytes`
    pub download_url: String,
    /// Upload measurement endpoint; must accept arbitrary POST bodies
    pub upload_url: String,
    /// Progress steps per phase; the last step always lands on 100%
    pub steps: usize,
    /// Bytes transferred in the download phase
    pub download_bytes: u64,
    /// Bytes transferred in the upload phase
    pub upload_bytes: u64,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KillConfig {
    /// How long to wait for SIGTERM to take before escalating to SIGKILL
    pub term_timeout_ms: u64,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            general:    GeneralConfig::default(),
            thresholds: ThresholdConfig::default(),
            speedtest:  SpeedtestConfig::default(),
            kill:       KillConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            render_interval_ms: 200,
            sample_interval_ms: 1000,
            top_processes: 10,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self { warn_pct: 50.0, crit_pct: 80.0 }
    }
}

impl Default for SpeedtestConfig {
    fn default() -> Self {
        Self {
            download_url:   "https://speed.cloudflare.com/__down?bytes=10000000".to_string(),
            upload_url:     "https://speed.cloudflare.com/__up".to_string(),
            steps:          20,
            download_bytes: 10_000_000,
            upload_bytes:   4_000_000,
            timeout_secs:   30,
        }
    }
}

impl Default for KillConfig {
    fn default() -> Self {
        Self { term_timeout_ms: 3000 }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        match try_load() {
            Ok(c)  => c,
            Err(_) => {
                // Write defaults on first run (best-effort)
                let _ = try_write_defaults();
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("smon").join("smon.toml"))
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    let text = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&text)?;
    Ok(cfg)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# smon configuration\n# Generated on first run — edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.general.top_processes, 10);
        assert_eq!(cfg.general.sample_interval_ms, 1000);
        assert_eq!(cfg.thresholds.warn_pct, 50.0);
        assert_eq!(cfg.thresholds.crit_pct, 80.0);
        assert_eq!(cfg.speedtest.steps, 20);
        assert_eq!(cfg.kill.term_timeout_ms, 3000);
    }

    #[test]
    fn round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.general.render_interval_ms, 200);
        assert_eq!(back.speedtest.download_bytes, 10_000_000);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let back: Config = toml::from_str("[general]\nrender_interval_ms = 500\nsample_interval_ms = 2000\ntop_processes = 5\n").unwrap();
        assert_eq!(back.general.top_processes, 5);
        assert_eq!(back.thresholds.crit_pct, 80.0);
        assert_eq!(back.speedtest.steps, 20);
    }
}
