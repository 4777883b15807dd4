// Search results overlay: grouped matches drawn over the dashboard while
// the search panel is in its Results state.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::search::{PanelState, ResultsView, SearchResult};
use crate::tui::layout::overlay_rect;
use crate::tui::ViewState;

const BACK_LABEL: &str = "[Back: Esc/b]";

/// Render the overlay when the panel is open; a closed panel renders
/// nothing, leaving the dashboard untouched.
pub fn render(frame: &mut Frame, state: &ViewState) {
    let PanelState::Results(view) = state.search.state() else {
        return;
    };

    let area = overlay_rect(frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Search Results")
        .title(Line::from(BACK_LABEL).right_aligned())
        .border_style(Style::default().fg(Color::Blue));

    let paragraph = Paragraph::new(content_lines(view))
        .wrap(Wrap { trim: false })
        .scroll((state.results_scroll as u16, 0))
        .block(block);
    frame.render_widget(paragraph, area);
}

/// The overlay body: a summary (or the no-results literal) followed by the
/// grouped matches.
pub fn content_lines(view: &ResultsView) -> Vec<Line<'static>> {
    if view.is_empty() {
        return vec![
            Line::default(),
            Line::from(Span::styled(
                format!(" No results found for \"{}\"", view.query),
                Style::default().fg(Color::Gray),
            )),
        ];
    }

    let mut lines = vec![Line::from(Span::styled(
        format!(" Found {} results for \"{}\"", view.total, view.query),
        Style::default().fg(Color::Gray),
    ))];

    for group in &view.groups {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!(" {}", group.category),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )));

        for item in &group.items {
            lines.push(result_line(item));
        }
    }

    lines
}

fn result_line(result: &SearchResult) -> Line<'static> {
    match result {
        SearchResult::Category {
            match_text, icon, ..
        } => Line::from(vec![
            Span::styled(
                format!("   ◆ Category: {match_text}"),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("  ({icon})"),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        SearchResult::Site {
            name, desc, href, ..
        } => {
            let mut spans = vec![Span::styled(
                format!("   ▸ {name}"),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if !desc.is_empty() {
                spans.push(Span::styled(
                    format!("  {desc}"),
                    Style::default().fg(Color::Gray),
                ));
            }
            spans.push(Span::styled(
                format!("  {href}"),
                Style::default().fg(Color::DarkGray),
            ));
            Line::from(spans)
        }
    }
}

/// Where the back button sits: the right-aligned title on the overlay's
/// top border.
pub fn back_button_rect(overlay: Rect) -> Rect {
    let width = BACK_LABEL.chars().count() as u16;
    Rect {
        x: overlay
            .x
            .saturating_add(overlay.width.saturating_sub(width + 1)),
        y: overlay.y,
        width,
        height: 1,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ResultsView;

    fn site_result(category: &str, name: &str) -> SearchResult {
        SearchResult::Site {
            category: category.to_string(),
            name: name.to_string(),
            desc: "desc".to_string(),
            href: "http://x".to_string(),
            logo: "/static/logo.svg".to_string(),
            match_text: name.to_string(),
        }
    }

    fn category_result(category: &str) -> SearchResult {
        SearchResult::Category {
            category: category.to_string(),
            icon: "i1".to_string(),
            match_text: category.to_string(),
        }
    }

    fn lines_text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_results_show_the_no_results_literal_with_query() {
        let view = ResultsView::new("nothing here", vec![]);
        let text = lines_text(&content_lines(&view));
        assert!(text.contains("No results found for \"nothing here\""));
    }

    #[test]
    fn summary_counts_and_grouping_order() {
        let view = ResultsView::new(
            "o",
            vec![
                category_result("Tools"),
                site_result("Tools", "Foo"),
                category_result("Docs"),
                site_result("Docs", "Book"),
            ],
        );
        let text = lines_text(&content_lines(&view));
        assert!(text.contains("Found 4 results for \"o\""));

        let tools = text.find("Tools").unwrap();
        let docs = text.find("Docs").unwrap();
        assert!(tools < docs, "groups must keep first-seen order");

        let category_line = text.find("Category: Tools").unwrap();
        let site_line = text.find("Foo").unwrap();
        assert!(category_line < site_line, "category entry renders first");
    }

    #[test]
    fn closed_panel_renders_nothing() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::for_tests();
        terminal.draw(|frame| render(frame, &state)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(!text.contains("Search Results"));
    }

    #[test]
    fn open_panel_renders_overlay() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::for_tests();
        state
            .search
            .open_results(ResultsView::new("foo", vec![site_result("Tools", "Foo")]));
        terminal.draw(|frame| render(frame, &state)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Search Results"));
        assert!(text.contains("Foo"));
    }

    #[test]
    fn back_button_sits_on_the_top_border() {
        let overlay = Rect::new(10, 5, 60, 20);
        let back = back_button_rect(overlay);
        assert_eq!(back.y, overlay.y);
        assert!(back.x > overlay.x);
        assert!(back.x + back.width <= overlay.x + overlay.width);
    }
}
