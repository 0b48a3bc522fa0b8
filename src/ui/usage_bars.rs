use crate::ui::theme::Theme;
use crate::ui::ViewModel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Gauge},
    Frame,
};

/// The three headline gauges: CPU, memory, root disk. Colors follow
/// the configured tier policy.
pub fn render(f: &mut Frame, area: Rect, vm: &ViewModel, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled("Usage", theme.title));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let bars = [
        ("CPU",    vm.cpu_pct),
        ("Memory", vm.mem_pct),
        ("Disk",   vm.disk_pct),
    ];

    for (row, (label, pct)) in rows.iter().zip(bars) {
        let style = theme.tier_style(pct, vm.warn_pct, vm.crit_pct);
        let gauge = Gauge::default()
            .gauge_style(style)
            .ratio((pct / 100.0).clamp(0.0, 1.0))
            .label(format!("{:<6} {:>5.1}%", label, pct));
        f.render_widget(gauge, *row);
    }
}
