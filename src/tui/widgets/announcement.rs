// Announcement carousel widget: the current announcement line plus the
// indicator row.
//
// An absent carousel (empty announcement list) renders nothing at all; the
// indicator row only appears for multi-item lists. Indicator geometry is
// shared between rendering and mouse hit-testing so clicks land on the
// indicator they look like they land on.

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::carousel::Carousel;
use crate::timefmt::format_timestamp;
use crate::tui::ViewState;

/// Active indicators are drawn wider than inactive ones.
const ACTIVE_INDICATOR: &str = "▰▰";
const INACTIVE_INDICATOR: &str = "▱";
/// One column between indicators.
const INDICATOR_GAP: u16 = 1;

/// Render the carousel into its zone. No carousel, no panel.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(carousel) = &state.carousel else {
        return;
    };

    let announcement = carousel.current();
    let timestamp = format_timestamp(&announcement.timestamp, Local::now());

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!(" {timestamp} "),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(announcement.content.clone()),
    ])];

    if carousel.show_indicators() {
        lines.push(indicator_line(carousel, area));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Notice"),
    );
    frame.render_widget(paragraph, area);
}

/// The indicator glyph and active flag for each announcement.
pub fn indicator_spans(carousel: &Carousel) -> Vec<(&'static str, bool)> {
    carousel
        .indicator_states()
        .into_iter()
        .map(|active| {
            if active {
                (ACTIVE_INDICATOR, true)
            } else {
                (INACTIVE_INDICATOR, false)
            }
        })
        .collect()
}

fn indicator_line(carousel: &Carousel, area: Rect) -> Line<'static> {
    let spans = indicator_spans(carousel);
    let total = indicator_row_width(&spans);
    let inner_width = area.width.saturating_sub(2);
    let pad = inner_width.saturating_sub(total) / 2;

    let mut line = vec![Span::raw(" ".repeat(pad as usize))];
    for (i, (glyph, active)) in spans.iter().enumerate() {
        if i > 0 {
            line.push(Span::raw(" "));
        }
        let style = if *active {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        line.push(Span::styled(*glyph, style));
    }
    Line::from(line)
}

fn indicator_row_width(spans: &[(&'static str, bool)]) -> u16 {
    let glyphs: u16 = spans
        .iter()
        .map(|(g, _)| g.chars().count() as u16)
        .sum();
    let gaps = spans.len().saturating_sub(1) as u16 * INDICATOR_GAP;
    glyphs + gaps
}

/// Map a mouse position to the indicator it lands on, if any. The indicator
/// row sits on the second content line inside the panel border.
pub fn indicator_hit(
    area: Rect,
    carousel: &Carousel,
    column: u16,
    row: u16,
) -> Option<usize> {
    if !carousel.show_indicators() {
        return None;
    }
    if row != area.y + 2 {
        return None;
    }

    let spans = indicator_spans(carousel);
    let total = indicator_row_width(&spans);
    let inner_width = area.width.saturating_sub(2);
    let mut x = area.x + 1 + inner_width.saturating_sub(total) / 2;

    for (i, (glyph, _)) in spans.iter().enumerate() {
        let width = glyph.chars().count() as u16;
        if column >= x && column < x + width {
            return Some(i);
        }
        x += width + INDICATOR_GAP;
    }
    None
}

/// Whether a mouse position is inside the carousel's hover region (the
/// panel interior).
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
