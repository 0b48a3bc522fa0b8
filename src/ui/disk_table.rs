use crate::ui::theme::Theme;
use crate::ui::ViewModel;
use crate::util::human::fmt_bytes;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, vm: &ViewModel, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled("Disk Usage", theme.title));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let header_cells = ["MOUNT", "TYPE", "USED", "TOTAL", "USE%"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.text_dim));
    let header = Row::new(header_cells)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .height(1);

    let rows: Vec<Row> = vm
        .disks
        .iter()
        .map(|d| {
            let pct = d.used_pct();
            let pct_style = theme.tier_style(pct, vm.warn_pct, vm.crit_pct);
            Row::new(vec![
                Cell::from(d.mount.clone()).style(theme.text),
                Cell::from(d.fs_type.clone()).style(theme.text_dim),
                Cell::from(fmt_bytes(d.used_bytes())).style(theme.text),
                Cell::from(fmt_bytes(d.total_bytes)).style(theme.text_dim),
                Cell::from(format!("{:>4.0}%", pct)).style(pct_style),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(5),
        ],
    )
    .header(header);

    f.render_widget(table, inner);
}
