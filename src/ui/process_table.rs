use crate::ui::theme::Theme;
use crate::ui::ViewModel;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// Ranked top-CPU process table. Row indices are 1-based to match the
/// numbers the kill prompt accepts.
pub fn render(f: &mut Frame, area: Rect, vm: &ViewModel, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(
            format!("Top {} Processes", vm.processes.len()),
            theme.title,
        ));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let header_cells = ["#", "PID", "NAME", "CPU%", "MEM%"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.text_dim));
    let header = Row::new(header_cells)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .height(1);

    let rows: Vec<Row> = vm
        .processes
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let cpu_style = theme.tier_style(p.cpu_pct, vm.warn_pct, vm.crit_pct);
            Row::new(vec![
                Cell::from(format!("{}", i + 1)).style(theme.text_dim),
                Cell::from(p.pid.to_string()).style(theme.text_dim),
                Cell::from(truncate(&p.name, 24)).style(theme.text),
                Cell::from(format!("{:>5.1}", p.cpu_pct)).style(cpu_style),
                Cell::from(format!("{:>5.1}", p.mem_pct)).style(theme.text),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Min(12),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(header);

    f.render_widget(table, inner);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}
