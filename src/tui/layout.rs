// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the navigation dashboard:
//
// +---------------------------------------------------------------+
// | Title Bar (1 row)                                              |
// +---------------------------------------+-----------------------+
// | Announcement Carousel (4 rows)        | Search Box (4 rows)   |
// +--------------+------------------------+-----------------------+
// | Category Nav | Sites Panel            | Clock (55%)           |
// | (24 cols)    | (fill)                 +-----------------------+
// |              |                        | Calendar (45%)        |
// +--------------+------------------------+-----------------------+
// | Footer Bar (1 row)                                             |
// +---------------------------------------------------------------+
//
// The search-results overlay is not a zone; it is drawn on top of the
// middle section when the search panel is in its Results state.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: page title and subtitle.
    pub title_bar: Rect,
    /// Rotating announcement line plus its indicator row.
    pub announcement: Rect,
    /// Search input, engine mode, and hints.
    pub search_bar: Rect,
    /// Left column: category list.
    pub category_nav: Rect,
    /// Center: the selected category's site boxes.
    pub sites: Rect,
    /// Right sidebar top: world clock.
    pub clock: Rect,
    /// Right sidebar bottom: calendar.
    pub calendar: Rect,
    /// Bottom row: footer text, ICP notice, key hints.
    pub footer: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: title(1) | notice(4) | middle(fill) | footer(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Length(4), // announcement + search row
            Constraint::Min(10),   // middle section
            Constraint::Length(1), // footer
        ])
        .split(area);

    let title_bar = vertical[0];
    let notice_row = vertical[1];
    let middle = vertical[2];
    let footer = vertical[3];

    // Notice row: announcement (fill) | search (44 cols)
    let notice = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(44)])
        .split(notice_row);

    let announcement = notice[0];
    let search_bar = notice[1];

    // Middle: category nav (24) | sites (fill) | sidebar (30)
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Min(24),
            Constraint::Length(30),
        ])
        .split(middle);

    let category_nav = columns[0];
    let sites = columns[1];
    let sidebar = columns[2];

    // Sidebar: clock (55%) | calendar (45%)
    let sidebar_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(sidebar);

    let clock = sidebar_sections[0];
    let calendar = sidebar_sections[1];

    AppLayout {
        title_bar,
        announcement,
        search_bar,
        category_nav,
        sites,
        clock,
        calendar,
        footer,
    }
}

/// Centered popup rect for the search-results overlay, sized as a fraction
/// of the full area.
pub fn overlay_rect(area: Rect) -> Rect {
    centered_rect(area, 70, 80)
}

/// Small centered rect for the blocking alert modal.
pub fn alert_rect(area: Rect) -> Rect {
    centered_rect(area, 50, 20)
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// A reasonable terminal size for testing.
    fn test_area() -> Rect {
        Rect::new(0, 0, 160, 50)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        let rects = [
            ("title_bar", layout.title_bar),
            ("announcement", layout.announcement),
            ("search_bar", layout.search_bar),
            ("category_nav", layout.category_nav),
            ("sites", layout.sites),
            ("clock", layout.clock),
            ("calendar", layout.calendar),
            ("footer", layout.footer),
        ];
        for (name, rect) in &rects {
            assert!(
                rect.width > 0 && rect.height > 0,
                "zone {name} collapsed to zero area: {rect:?}"
            );
        }
    }

    #[test]
    fn layout_title_and_footer_are_single_rows() {
        let layout = build_layout(test_area());
        assert_eq!(layout.title_bar.height, 1);
        assert_eq!(layout.footer.height, 1);
    }

    #[test]
    fn layout_notice_row_is_four_rows() {
        let layout = build_layout(test_area());
        assert_eq!(layout.announcement.height, 4);
        assert_eq!(layout.search_bar.height, 4);
        assert_eq!(layout.announcement.y, layout.search_bar.y);
    }

    #[test]
    fn layout_sites_panel_is_widest_column() {
        let layout = build_layout(test_area());
        assert!(layout.sites.width > layout.category_nav.width);
        assert!(layout.sites.width > layout.clock.width);
    }

    #[test]
    fn layout_sidebar_sections_stack_vertically() {
        let layout = build_layout(test_area());
        assert!(layout.clock.y < layout.calendar.y);
        assert_eq!(layout.clock.width, layout.calendar.width);
    }

    #[test]
    fn layout_fits_within_area() {
        let area = test_area();
        let layout = build_layout(area);
        let all_rects = [
            layout.title_bar,
            layout.announcement,
            layout.search_bar,
            layout.category_nav,
            layout.sites,
            layout.clock,
            layout.calendar,
            layout.footer,
        ];
        for rect in &all_rects {
            assert!(
                rect.x + rect.width <= area.width,
                "zone {rect:?} overflows the {} column terminal",
                area.width
            );
            assert!(
                rect.y + rect.height <= area.height,
                "zone {rect:?} overflows the {} row terminal",
                area.height
            );
        }
    }

    #[test]
    fn overlay_sits_inside_the_area() {
        let area = test_area();
        let overlay = overlay_rect(area);
        assert!(overlay.width < area.width);
        assert!(overlay.height < area.height);
        assert!(overlay.x > area.x);
        assert!(overlay.y > area.y);
    }

    #[test]
    fn alert_is_smaller_than_overlay() {
        let area = test_area();
        let alert = alert_rect(area);
        let overlay = overlay_rect(area);
        assert!(alert.width <= overlay.width);
        assert!(alert.height <= overlay.height);
    }

    #[test]
    fn layout_small_terminal_still_valid() {
        let area = Rect::new(0, 0, 80, 20);
        let layout = build_layout(area);
        let rects = [
            layout.title_bar,
            layout.announcement,
            layout.search_bar,
            layout.category_nav,
            layout.sites,
            layout.clock,
            layout.calendar,
            layout.footer,
        ];
        for rect in &rects {
            assert!(
                rect.width > 0 && rect.height > 0,
                "80x20 terminal: zone {rect:?} collapsed"
            );
        }
    }
}
