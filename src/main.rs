mod app;
mod collectors;
mod config;
mod error;
mod input;
mod killer;
mod listener;
mod models;
mod sampler;
mod speedtest;
mod state;
mod ui;
mod util;

use anyhow::Result;
use app::App;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;

#[derive(Parser, Debug)]
#[command(name = "smon", about = "btop-style host monitor", version = "0.1")]
struct Cli {
    /// Render interval in milliseconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Sampler interval in milliseconds
    #[arg(long)]
    sample_interval: Option<u64>,

    /// Number of processes in the ranked table
    #[arg(long)]
    top: Option<usize>,

    /// Color theme: default, dracula, gruvbox, nord
    #[arg(short = 't', long, default_value = "default")]
    theme: String,

    /// Print a one-shot JSON snapshot of all dashboard data and exit
    #[arg(long)]
    json: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::Config::load();
    if let Some(ms) = cli.interval {
        cfg.general.render_interval_ms = ms;
    }
    if let Some(ms) = cli.sample_interval {
        cfg.general.sample_interval_ms = ms;
    }
    if let Some(n) = cli.top {
        cfg.general.top_processes = n;
    }

    if cli.json {
        return run_json_snapshot(&cfg);
    }
    if cli.config {
        return run_print_config(&cfg);
    }

    let initial_theme = ui::theme::ThemeVariant::from_name(&cli.theme);

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let result = run(cfg, initial_theme);
    restore_terminal()?;
    result
}

fn run_json_snapshot(cfg: &config::Config) -> Result<()> {
    use sampler::Sampler;
    use serde_json::{json, Value};
    use state::StateStore;
    use util::human::fmt_bytes;

    let store = StateStore::new();
    let mut sampler = Sampler::new(cfg.general.top_processes);

    // CPU usage and network rates are deltas; take two readings.
    sampler.sample_once(&store);
    std::thread::sleep(std::time::Duration::from_millis(250));
    sampler.sample_once(&store);

    let st = store.read();

    let processes: Vec<Value> = st.processes.iter().map(|p| {
        json!({
            "pid":     p.pid,
            "name":    p.name,
            "cpu_pct": p.cpu_pct,
            "mem_pct": p.mem_pct,
        })
    }).collect();

    let disks: Vec<Value> = st.disks.iter().map(|d| {
        json!({
            "device":   d.device,
            "mount":    d.mount,
            "fstype":   d.fs_type,
            "total":    d.total_bytes,
            "avail":    d.avail_bytes,
            "total_hr": fmt_bytes(d.total_bytes),
            "used_hr":  fmt_bytes(d.used_bytes()),
            "use_pct":  d.used_pct(),
        })
    }).collect();

    let snapshot = json!({
        "smon_version": "0.1",
        "timestamp": chrono::Local::now().to_rfc3339(),
        "host": {
            "hostname":    st.snapshot.hostname,
            "uptime_secs": st.snapshot.uptime_secs,
            "cpu_pct":     st.snapshot.cpu_pct,
            "mem_pct":     st.snapshot.mem_pct,
            "disk_pct":    st.snapshot.disk_pct,
        },
        "network": {
            "sent_bps": st.net_rate.sent_bps,
            "recv_bps": st.net_rate.recv_bps,
        },
        "processes": processes,
        "disks":     disks,
    });

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_print_config(cfg: &config::Config) -> Result<()> {
    let path = config::Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  render_interval_ms = {}", cfg.general.render_interval_ms);
    println!("  sample_interval_ms = {}", cfg.general.sample_interval_ms);
    println!("  top_processes      = {}", cfg.general.top_processes);
    println!();
    println!("[thresholds]");
    println!("  warn_pct = {}%", cfg.thresholds.warn_pct);
    println!("  crit_pct = {}%", cfg.thresholds.crit_pct);
    println!();
    println!("[speedtest]");
    println!("  download_url   = {}", cfg.speedtest.download_url);
    println!("  upload_url     = {}", cfg.speedtest.upload_url);
    println!("  steps          = {}", cfg.speedtest.steps);
    println!("  download_bytes = {}", cfg.speedtest.download_bytes);
    println!("  upload_bytes   = {}", cfg.speedtest.upload_bytes);
    println!("  timeout_secs   = {}", cfg.speedtest.timeout_secs);
    println!();
    println!("[kill]");
    println!("  term_timeout_ms = {}", cfg.kill.term_timeout_ms);
    Ok(())
}

fn run(cfg: config::Config, initial_theme: ui::theme::ThemeVariant) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let mut app = App::new(cfg, initial_theme);
    app.run(&mut term)?;

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
