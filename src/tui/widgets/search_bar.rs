// Search box widget: the query input, the engine mode, and the clear hint.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::search::SearchMode;
use crate::tui::{InputMode, ViewState};

/// Render the search box into its zone.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.input_mode == InputMode::SearchInput;

    let border_style = if focused {
        Style::default().fg(Color::Blue)
    } else {
        Style::default()
    };

    let cursor = if focused { "▏" } else { "" };
    let mut input_spans = vec![
        Span::raw(" 🔍 "),
        Span::styled(
            format!("{}{cursor}", state.search.input()),
            Style::default().fg(Color::White),
        ),
    ];
    if state.search.clear_visible() {
        input_spans.push(Span::styled(
            "  [^U clear]",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mode_line = Line::from(vec![
        Span::raw(" engine: "),
        Span::styled(
            mode_label(state.search.mode()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Tab:switch  Enter:go", Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph = Paragraph::new(vec![Line::from(input_spans), mode_line]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Search"),
    );
    frame.render_widget(paragraph, area);
}

fn mode_label(mode: SearchMode) -> &'static str {
    mode.label()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
