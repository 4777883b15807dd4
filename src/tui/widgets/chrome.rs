// Page chrome: title bar and footer, fed by the directory's page_config
// pseudo-entry. Absent fields fall back to built-in defaults.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

const DEFAULT_TITLE: &str = "navdeck";

/// Render the top title bar: `title — subtitle`.
pub fn render_title_bar(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = state.page.title.as_deref().unwrap_or(DEFAULT_TITLE);

    let mut spans = vec![Span::styled(
        format!(" {title}"),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(subtitle) = state.page.subtitle.as_deref() {
        spans.push(Span::styled(
            format!("  {subtitle}"),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Render the footer: footer text and ICP notice from page config, then the
/// key hints.
pub fn render_footer(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut left = String::new();
    if let Some(text) = state.page.footer_text.as_deref() {
        left.push_str(&format!(" {text}"));
    }
    if let Some(icp) = state.page.icp.as_deref() {
        left.push_str(&format!("  {icp}"));
    }

    let hints = " /:Search  Tab:Engine  r:Refresh  Enter:Open  q:Quit";
    let line = Line::from(vec![
        Span::styled(left, Style::default().fg(Color::Gray)),
        Span::styled(
            hints,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::DIM),
        ),
    ]);

    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
