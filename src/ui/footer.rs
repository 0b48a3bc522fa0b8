use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEYS: &[(&str, &str)] = &[
    ("k", "Kill"),
    ("n", "Net/Speedtest"),
    ("f", "Freeze"),
    ("t", "Theme"),
    ("?", "Help"),
    ("q", "Quit"),
];

/// One-line key legend, with the latest kill / speed-test outcome
/// flashed on the right while it is fresh.
pub fn render(f: &mut Frame, area: Rect, feedback: Option<&str>, theme: &Theme) {
    let mut spans: Vec<Span> = vec![Span::styled(" ", theme.footer_bg)];

    for (key, desc) in KEYS {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        spans.push(Span::styled(format!("{}  ", desc), theme.footer_text));
    }

    if let Some(msg) = feedback {
        spans.push(Span::styled("  \u{2502}  ", theme.footer_text));
        spans.push(Span::styled(msg.to_string(), theme.footer_bg));
    }

    let para = Paragraph::new(Line::from(spans)).style(theme.footer_bg);
    f.render_widget(para, area);
}
