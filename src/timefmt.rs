// Relative timestamp formatting for announcement rows.
//
// Buckets by elapsed whole days against a caller-supplied "now" so the
// function stays pure and testable. Unparseable input is passed through
// unchanged rather than treated as an error.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Epoch values above this are interpreted as milliseconds.
const EPOCH_MILLIS_CUTOFF: i64 = 1_000_000_000_000;

/// Format an announcement timestamp relative to `now`:
///
/// - same day: `Today HH:MM`
/// - one day back: `Yesterday HH:MM`
/// - under a week: `{n} days ago`
/// - a week or more: `MM/DD`
/// - unparseable: the input, unchanged
pub fn format_timestamp(raw: &str, now: DateTime<Local>) -> String {
    let Some(date) = parse_timestamp(raw) else {
        return raw.to_string();
    };

    // Whole elapsed days; timestamps ahead of now count as today.
    let elapsed_days = (now - date).num_days().max(0);

    match elapsed_days {
        0 => format!("Today {}", date.format("%H:%M")),
        1 => format!("Yesterday {}", date.format("%H:%M")),
        n if n < 7 => format!("{n} days ago"),
        _ => date.format("%m/%d").to_string(),
    }
}

/// Try the timestamp shapes the directory is known to carry: RFC 3339,
/// `YYYY-MM-DD HH:MM:SS` (what the admin backend writes), bare dates, and
/// integer epoch seconds or milliseconds.
fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Local.from_local_datetime(&ndt).earliest();
    }

    if let Ok(nd) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let ndt = nd.and_hms_opt(0, 0, 0)?;
        return Local.from_local_datetime(&ndt).earliest();
    }

    if let Ok(epoch) = raw.parse::<i64>() {
        let dt = if epoch.abs() >= EPOCH_MILLIS_CUTOFF {
            Local.timestamp_millis_opt(epoch)
        } else {
            Local.timestamp_opt(epoch, 0)
        };
        return dt.single();
    }

    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
