// Calendar widget: current date-time line, weekday, and zodiac sign.
//
// The original page also printed a deep lunar almanac (ganzhi, nayin, xiu,
// day spirits). Those conversions belong to an external lunar-calendar
// library; `LunarProvider` is the seam for one, and without a provider the
// detail line is simply omitted. A failed periodic update renders the
// literal `Loading failed` instead of propagating.

use chrono::{DateTime, Datelike, Local};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::ViewState;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// External lunar-calendar conversions (the original delegated these to its
/// lunar library). Implementations are optional; the widget renders without
/// one.
pub trait LunarProvider {
    /// A one-line lunar description for the given instant, or `None` when
    /// the provider has nothing to say.
    fn lunar_line(&self, now: DateTime<Local>) -> Option<String>;
}

/// Computed calendar display state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarInfo {
    /// `YYYY-MM-DD HH:MM:SS Www <zodiac>`.
    pub date_time: String,
    pub weekday: &'static str,
    pub zodiac: &'static str,
    pub lunar_detail: Option<String>,
}

/// Western zodiac sign for a month/day, using the same month-boundary table
/// as the original's calendar library.
pub fn zodiac_sign(month: u32, day: u32) -> &'static str {
    match (month, day) {
        (1, d) if d < 20 => "Capricorn",
        (1, _) | (2, ..=18) => "Aquarius",
        (2, _) | (3, ..=20) => "Pisces",
        (3, _) | (4, ..=19) => "Aries",
        (4, _) | (5, ..=20) => "Taurus",
        (5, _) | (6, ..=21) => "Gemini",
        (6, _) | (7, ..=22) => "Cancer",
        (7, _) | (8, ..=22) => "Leo",
        (8, _) | (9, ..=22) => "Virgo",
        (9, _) | (10, ..=23) => "Libra",
        (10, _) | (11, ..=22) => "Scorpio",
        (11, _) | (12, ..=21) => "Sagittarius",
        _ => "Capricorn",
    }
}

/// Compute the calendar display for an instant. Returns `None` when the
/// computation fails; the caller renders the failure literal.
pub fn compute(now: DateTime<Local>, lunar: Option<&dyn LunarProvider>) -> Option<CalendarInfo> {
    let weekday = *WEEKDAYS.get(now.weekday().num_days_from_sunday() as usize)?;
    let zodiac = zodiac_sign(now.month(), now.day());
    let date_time = format!("{} {} {}", now.format("%Y-%m-%d %H:%M:%S"), weekday, zodiac);
    let lunar_detail = lunar.and_then(|p| p.lunar_line(now));

    Some(CalendarInfo {
        date_time,
        weekday,
        zodiac,
        lunar_detail,
    })
}

/// Render the calendar from the info stored on ViewState.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines: Vec<Line> = match &state.calendar {
        Some(info) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!(" {}", info.date_time),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(" Weekday  {}", info.weekday)),
                Line::from(format!(" Zodiac   {}", info.zodiac)),
            ];
            if let Some(detail) = &info.lunar_detail {
                lines.push(Line::from(Span::styled(
                    format!(" {detail}"),
                    Style::default().fg(Color::Gray),
                )));
            }
            lines
        }
        None => vec![Line::from(Span::styled(
            " Loading failed",
            Style::default().fg(Color::Red),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Calendar"));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, s).single().unwrap()
    }

    #[test]
    fn compute_formats_the_date_time_line() {
        let info = compute(local(2026, 8, 5, 14, 30, 9), None).unwrap();
        assert_eq!(info.date_time, "2026-08-05 14:30:09 Wed Leo");
        assert_eq!(info.weekday, "Wed");
        assert_eq!(info.zodiac, "Leo");
        assert!(info.lunar_detail.is_none());
    }

    #[test]
    fn zodiac_boundaries() {
        assert_eq!(zodiac_sign(1, 19), "Capricorn");
        assert_eq!(zodiac_sign(1, 20), "Aquarius");
        assert_eq!(zodiac_sign(3, 20), "Pisces");
        assert_eq!(zodiac_sign(3, 21), "Aries");
        assert_eq!(zodiac_sign(8, 22), "Leo");
        assert_eq!(zodiac_sign(8, 23), "Virgo");
        assert_eq!(zodiac_sign(12, 21), "Sagittarius");
        assert_eq!(zodiac_sign(12, 22), "Capricorn");
    }

    struct FixedLunar;

    impl LunarProvider for FixedLunar {
        fn lunar_line(&self, _now: DateTime<Local>) -> Option<String> {
            Some("sixth month, twenty-third day".to_string())
        }
    }

    #[test]
    fn provider_detail_is_carried_through() {
        let info = compute(local(2026, 8, 5, 0, 0, 0), Some(&FixedLunar)).unwrap();
        assert_eq!(
            info.lunar_detail.as_deref(),
            Some("sixth month, twenty-third day")
        );
    }

    #[test]
    fn render_shows_failure_literal_when_unavailable() {
        let backend = ratatui::backend::TestBackend::new(40, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::for_tests();
        state.calendar = None;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Loading failed"));
    }

    #[test]
    fn render_does_not_panic_with_info() {
        let backend = ratatui::backend::TestBackend::new(40, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::for_tests();
        state.calendar = compute(local(2026, 8, 5, 10, 0, 0), None);
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
