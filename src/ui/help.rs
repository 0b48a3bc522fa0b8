use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(52, 14, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(" smon — Keybindings (? to close) ", theme.title));

    let lines = vec![
        Line::from(""),
        key_line(theme, "  k",          "Kill a process tree (pick from table)"),
        key_line(theme, "  n",          "Toggle network panel / run speed test"),
        key_line(theme, "  f",          "Freeze the view (sampling continues)"),
        key_line(theme, "  t",          "Cycle color theme"),
        key_line(theme, "  ? / F1",     "Toggle this help"),
        key_line(theme, "  q / Ctrl-C", "Quit"),
        Line::from(""),
        key_line(theme, "Kill prompt", ""),
        key_line(theme, "  0-9 Enter",  "Pick a 1-based row, 0 cancels"),
        key_line(theme, "  Esc",        "Cancel"),
        Line::from(""),
        key_line(theme, "Config  ~/.config/smon/smon.toml", ""),
    ];

    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), inner);
}

fn key_line<'a>(theme: &Theme, key: &'a str, desc: &'a str) -> Line<'a> {
    if desc.is_empty() {
        Line::from(vec![Span::styled(key, theme.title)])
    } else {
        Line::from(vec![
            Span::styled(format!("{:<16}", key), theme.footer_key),
            Span::styled(desc, theme.text_dim),
        ])
    }
}

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
