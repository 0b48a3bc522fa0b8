use crate::models::process::ProcessEntry;
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Modal process picker shown while the render loop is paused. Lists
/// the last ranking with 1-based indices and the digits typed so far.
pub fn render(f: &mut Frame, procs: &[ProcessEntry], input: &str, theme: &Theme) {
    let height = (procs.len() as u16).saturating_add(6).min(f.area().height);
    let area = centered_rect(56, height, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(" Kill process tree ", theme.title));

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (i, p) in procs.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>2}  ", i + 1), theme.text_dim),
            Span::styled(format!("{:<24}", clip(&p.name, 24)), theme.text),
            Span::styled(format!("{:>8}  ", p.pid), theme.text_dim),
            Span::styled(format!("{:>5.1}%", p.cpu_pct), theme.text),
        ]));
    }
    if procs.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (no processes sampled yet)",
            theme.text_dim,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Number to kill (0 cancels): ", theme.text),
        Span::styled(format!("{}_", input), theme.title),
    ]));
    lines.push(Line::from(Span::styled(
        "  Enter confirm   Esc cancel",
        theme.text_dim,
    )));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    Rect::new(
        r.x + (r.width.saturating_sub(w)) / 2,
        r.y + (r.height.saturating_sub(h)) / 2,
        w, h,
    )
}
