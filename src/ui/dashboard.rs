use crate::ui::theme::Theme;
use crate::ui::{disk_table, footer, net_panel, process_table, usage_bars, ViewModel};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Paint one frame from a finished view model. Pure presentation: all
/// sampling and policy decisions happened when the model was built.
pub fn render(f: &mut Frame, vm: &ViewModel, feedback: Option<&str>, theme: &Theme) {
    let area = f.area();

    // ── Root: header (2 lines) | body | footer ─────────────────────
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header line 1: title + hostname + frozen badge + clock ─────
    let left = format!(" smon v0.1 — {} ", vm.hostname);
    let badge = if vm.frozen { "  ● FROZEN  " } else { "" };
    let right = format!(" {} ", vm.clock);

    let pad = (area.width as usize).saturating_sub(left.len() + badge.len() + right.len());
    let header_line1 = Line::from(vec![
        Span::styled(left, theme.title),
        Span::styled(badge, theme.warn),
        Span::styled(" ".repeat(pad), theme.header),
        Span::styled(right, theme.text_dim),
    ]);

    // ── Header line 2: uptime + table depth ────────────────────────
    let header_line2 = Line::from(vec![Span::styled(
        format!(" up {}   {} procs shown ", vm.uptime, vm.processes.len()),
        theme.text_dim,
    )]);

    f.render_widget(
        Paragraph::new(vec![header_line1, header_line2]).style(theme.header),
        root[0],
    );

    // ── Body: gauges | tables | optional network panel ─────────────
    let mut constraints = vec![Constraint::Length(5), Constraint::Min(6)];
    if vm.net.is_some() {
        constraints.push(Constraint::Length(5));
    }
    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(root[1]);

    usage_bars::render(f, body[0], vm, theme);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(body[1]);

    process_table::render(f, middle[0], vm, theme);
    disk_table::render(f, middle[1], vm, theme);

    if let Some(net) = &vm.net {
        net_panel::render(f, body[2], net, theme);
    }

    // ── Footer ─────────────────────────────────────────────────────
    footer::render(f, root[2], feedback, theme);
}
