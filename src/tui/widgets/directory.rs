// Directory widgets: the category list and the selected category's site
// boxes. Custom-module entries come first and carry the `[Custom]` label,
// the way the original page prepended them.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the left-hand category list.
pub fn render_category_nav(frame: &mut Frame, area: Rect, state: &ViewState) {
    let count = state.category_count();
    let mut lines: Vec<Line> = Vec::with_capacity(count);

    for i in 0..count {
        let label = state.category_label(i);
        let selected = i == state.selected_category;
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let marker = if selected { "▸" } else { " " };
        lines.push(Line::from(Span::styled(
            format!("{marker} {label}"),
            style,
        )));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            " Loading...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Categories"),
    );
    frame.render_widget(paragraph, area);
}

/// Render the selected category's sites.
pub fn render_sites(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = if state.category_count() == 0 {
        "Sites".to_string()
    } else {
        state.category_label(state.selected_category)
    };

    let sites = state.selected_sites();
    let mut lines: Vec<Line> = Vec::with_capacity(sites.len());

    for (i, site) in sites.iter().enumerate() {
        let selected = i == state.selected_site;
        let marker = if selected { "▸" } else { " " };
        let name_style = if selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = vec![Span::styled(format!("{marker} {}", site.name), name_style)];
        if !site.desc.is_empty() {
            spans.push(Span::styled(
                format!("  {}", site.desc),
                Style::default().fg(Color::Gray),
            ));
        }
        if selected {
            spans.push(Span::styled(
                format!("  {}", site.href),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            " No sites in this category",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title),
    );
    frame.render_widget(paragraph, area);
}

/// Map a click row inside the category list to a category index.
pub fn category_at(area: Rect, count: usize, row: u16) -> Option<usize> {
    list_row(area, count, row)
}

/// Map a click row inside the sites panel to a site index.
pub fn site_at(area: Rect, count: usize, row: u16) -> Option<usize> {
    list_row(area, count, row)
}

fn list_row(area: Rect, count: usize, row: u16) -> Option<usize> {
    let first = area.y + 1;
    if row < first {
        return None;
    }
    let index = (row - first) as usize;
    if index < count && row < area.y + area.height.saturating_sub(1) {
        Some(index)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom::CustomEntry;
    use crate::directory::{DirectoryEntry, Site};

    fn entry(classify: &str, site_names: &[&str]) -> DirectoryEntry {
        DirectoryEntry {
            id: format!("cat-{classify}"),
            classify: classify.to_string(),
            icon: "ti-panel".to_string(),
            sites: site_names
                .iter()
                .map(|n| Site {
                    name: n.to_string(),
                    href: format!("http://{n}"),
                    desc: format!("{n} site"),
                    logo: "no-logo".to_string(),
                })
                .collect(),
        }
    }

    fn populated_state() -> ViewState {
        let mut state = ViewState::for_tests();
        state.entries = vec![entry("Tools", &["Foo", "Bar"]), entry("Docs", &["Book"])];
        state.custom_entries = vec![CustomEntry {
            id: "c1".to_string(),
            classify: "Lab".to_string(),
            icon: "ti-flask".to_string(),
            filter: "lab".to_string(),
            sites: vec![Site {
                name: "Bench".to_string(),
                href: "http://bench".to_string(),
                desc: String::new(),
                logo: "no-logo".to_string(),
            }],
        }];
        state
    }

    fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn nav_lists_custom_entries_first_with_label() {
        let state = populated_state();
        assert_eq!(state.category_count(), 3);
        assert_eq!(state.category_label(0), "Lab[Custom]");
        assert_eq!(state.category_label(1), "Tools");
        assert_eq!(state.category_label(2), "Docs");
    }

    #[test]
    fn render_nav_and_sites() {
        let backend = ratatui::backend::TestBackend::new(80, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = populated_state();
        state.selected_category = 1; // Tools
        terminal
            .draw(|frame| {
                let area = frame.area();
                let halves = ratatui::layout::Layout::default()
                    .direction(ratatui::layout::Direction::Horizontal)
                    .constraints([
                        ratatui::layout::Constraint::Length(24),
                        ratatui::layout::Constraint::Min(10),
                    ])
                    .split(area);
                render_category_nav(frame, halves[0], &state);
                render_sites(frame, halves[1], &state);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Lab[Custom]"));
        assert!(text.contains("Foo"));
        assert!(text.contains("Bar"));
    }

    #[test]
    fn render_empty_state_shows_loading() {
        let backend = ratatui::backend::TestBackend::new(40, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::for_tests();
        terminal
            .draw(|frame| render_category_nav(frame, frame.area(), &state))
            .unwrap();
        assert!(buffer_text(&terminal).contains("Loading..."));
    }

    #[test]
    fn click_rows_map_to_indices() {
        let area = Rect::new(0, 2, 24, 8);
        assert_eq!(category_at(area, 3, 3), Some(0));
        assert_eq!(category_at(area, 3, 5), Some(2));
        assert_eq!(category_at(area, 3, 6), None); // past the list
        assert_eq!(category_at(area, 3, 2), None); // border row
        assert_eq!(site_at(area, 2, 4), Some(1));
    }
}
