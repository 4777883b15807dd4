// World clock widget: a fixed-offset time for each configured city.
//
// Offsets are whole hours from UTC with no DST handling, matching the
// original dashboard. Readings are recomputed on the one-second widget tick
// and rendered from ViewState.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::config::ClockCity;
use crate::tui::ViewState;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One city's formatted clock lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    pub name: String,
    /// `M/D Www`, month and day unpadded.
    pub date: String,
    /// `HH:MM`, zero-padded.
    pub time: String,
}

/// Compute a reading per configured city from a UTC instant. A city whose
/// offset cannot be represented reads `Loading failed`.
pub fn readings(cities: &[ClockCity], now_utc: DateTime<Utc>) -> Vec<ClockReading> {
    cities
        .iter()
        .map(|city| match FixedOffset::east_opt(city.utc_offset_hours * 3600) {
            Some(offset) => {
                let t = now_utc.with_timezone(&offset);
                let weekday = WEEKDAYS[t.weekday().num_days_from_sunday() as usize];
                ClockReading {
                    name: city.name.clone(),
                    date: format!("{}/{} {}", t.month(), t.day(), weekday),
                    time: format!("{:02}:{:02}", t.hour(), t.minute()),
                }
            }
            None => ClockReading {
                name: city.name.clone(),
                date: "Loading failed".to_string(),
                time: String::new(),
            },
        })
        .collect()
}

/// Render the world clock from the readings stored on ViewState.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut lines: Vec<Line> = Vec::new();
    for reading in &state.clock_readings {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<10}", reading.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(reading.date.clone(), Style::default().fg(Color::Gray)),
        ]));
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(11)),
            Span::styled(
                reading.time.clone(),
                Style::default().fg(Color::Cyan),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("World Clock"),
    );
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn city(name: &str, offset: i32) -> ClockCity {
        ClockCity {
            name: name.to_string(),
            utc_offset_hours: offset,
        }
    }

    #[test]
    fn readings_apply_fixed_offsets() {
        // 2026-08-05 12:00 UTC is a Wednesday.
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let readings = readings(&[city("Beijing", 8), city("New York", -5)], now);

        assert_eq!(readings[0].time, "20:00");
        assert_eq!(readings[0].date, "8/5 Wed");
        assert_eq!(readings[1].time, "07:00");
        assert_eq!(readings[1].date, "8/5 Wed");
    }

    #[test]
    fn readings_cross_the_date_line() {
        // 2026-08-05 23:00 UTC: Sydney (+10) is already on the 6th, a
        // Thursday; New York (-5) is still Wednesday evening.
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 23, 0, 0).unwrap();
        let readings = readings(&[city("Sydney", 10), city("New York", -5)], now);

        assert_eq!(readings[0].date, "8/6 Thu");
        assert_eq!(readings[0].time, "09:00");
        assert_eq!(readings[1].date, "8/5 Wed");
        assert_eq!(readings[1].time, "18:00");
    }

    #[test]
    fn times_are_zero_padded() {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 1, 5, 0).unwrap();
        let readings = readings(&[city("London", 0)], now);
        assert_eq!(readings[0].time, "01:05");
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(30, 14);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::for_tests();
        state.clock_readings =
            readings(&[city("Beijing", 8)], Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap());
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
