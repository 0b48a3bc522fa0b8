use crate::ui::theme::Theme;
use crate::ui::{NetPanel, NetStatus};
use crate::util::human::fmt_rate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Live throughput plus the speed-test status line. Measurement
/// failures render inline here, never as a crash or a blank panel.
pub fn render(f: &mut Frame, area: Rect, net: &NetPanel, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled("Network", theme.title));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let rates = Line::from(vec![
        Span::styled("  up ", theme.text_dim),
        Span::styled(format!("{:>10}", fmt_rate(net.sent_bps)), theme.text),
        Span::styled("   down ", theme.text_dim),
        Span::styled(format!("{:>10}", fmt_rate(net.recv_bps)), theme.text),
    ]);
    f.render_widget(Paragraph::new(rates), rows[0]);

    match &net.status {
        NetStatus::Idle => {
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  speedtest: press n to measure bandwidth",
                    theme.text_dim,
                ))),
                rows[1],
            );
        }
        NetStatus::Starting => {
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  speedtest: connecting…",
                    theme.text_dim,
                ))),
                rows[1],
            );
        }
        NetStatus::Running(p) => {
            let gauge = Gauge::default()
                .gauge_style(theme.ok)
                .ratio(f64::from(p.percent) / 100.0)
                .label(format!(
                    "{} {:>3}%  {}",
                    p.phase.label(),
                    p.percent,
                    fmt_rate(p.bps)
                ));
            f.render_widget(gauge, rows[1]);
        }
        NetStatus::Done { download_bps, upload_bps } => {
            let line = Line::from(vec![
                Span::styled("  speedtest: ", theme.text_dim),
                Span::styled(format!("down {}", fmt_rate(*download_bps)), theme.ok),
                Span::styled("   ", theme.text_dim),
                Span::styled(format!("up {}", fmt_rate(*upload_bps)), theme.ok),
            ]);
            f.render_widget(Paragraph::new(line), rows[1]);
        }
        NetStatus::Failed(reason) => {
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("  Speedtest failed: {}", reason),
                    theme.crit,
                ))),
                rows[1],
            );
        }
    }
}
