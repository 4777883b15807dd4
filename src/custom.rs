// Custom filter module: a second, user-supplied directory document whose
// entries carry a `filter` value. Only entries matching the active filter
// are shown (labelled as custom by the renderer), and relaunching within a
// 3-second window rotates the active filter to the next distinct value.
//
// The browser original drove the rotation with a `time@<filter>` cookie; a
// marker file in the platform state directory stands in for it here.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::directory::Site;

/// Relaunches inside this window rotate the filter.
pub const ROTATION_WINDOW: Duration = Duration::from_secs(3);

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("failed to fetch custom module: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse custom module document: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

/// A category entry in the custom document; shaped like a directory entry
/// plus the `filter` tag.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CustomEntry {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub classify: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub sites: Vec<Site>,
}

/// Distinct filter values in first-seen order.
pub fn distinct_filters(entries: &[CustomEntry]) -> Vec<String> {
    let mut filters: Vec<String> = Vec::new();
    for entry in entries {
        if !filters.iter().any(|f| f == &entry.filter) {
            filters.push(entry.filter.clone());
        }
    }
    filters
}

/// The filter after `current`, wrapping at the end. A `current` that is not
/// in the list rotates to the first value, matching the original's index
/// arithmetic (-1 + 1 = 0).
pub fn next_filter(filters: &[String], current: &str) -> Option<String> {
    if filters.is_empty() {
        return None;
    }
    let next_index = match filters.iter().position(|f| f == current) {
        Some(i) if i + 1 < filters.len() => i + 1,
        Some(_) => 0,
        None => 0,
    };
    Some(filters[next_index].clone())
}

/// Entries to display for an active filter; no filter shows everything.
pub fn select_entries<'a>(
    entries: &'a [CustomEntry],
    filter: Option<&str>,
) -> Vec<&'a CustomEntry> {
    match filter {
        Some(f) => entries.iter().filter(|e| e.filter == f).collect(),
        None => entries.iter().collect(),
    }
}

// ---------------------------------------------------------------------------
// RotationMarker
// ---------------------------------------------------------------------------

/// Cookie-analog marker store: one file per filter value holding the epoch
/// second it was written.
#[derive(Debug, Clone)]
pub struct RotationMarker {
    dir: PathBuf,
}

impl RotationMarker {
    /// Marker store in the platform state directory. `None` when no home
    /// directory can be determined (the module then runs without rotation).
    pub fn new() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("", "", "navdeck")?;
        let dir = dirs
            .state_dir()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| dirs.data_local_dir().to_path_buf());
        Some(RotationMarker { dir })
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        RotationMarker { dir }
    }

    fn marker_path(&self, filter: &str) -> PathBuf {
        // Filter values are user data; percent-encode them into a safe
        // file name.
        self.dir
            .join(format!("time@{}", urlencoding::encode(filter)))
    }

    /// Consume a fresh marker for `filter`: returns true (and removes the
    /// marker) when one was written within `window`. Stale or unreadable
    /// markers are removed and report false.
    pub fn take_fresh(&self, filter: &str, window: Duration) -> bool {
        let path = self.marker_path(filter);
        let Ok(contents) = std::fs::read_to_string(&path) else {
            return false;
        };
        let _ = std::fs::remove_file(&path);

        let Ok(written) = contents.trim().parse::<i64>() else {
            return false;
        };
        let age = chrono::Utc::now().timestamp() - written;
        age >= 0 && age <= window.as_secs() as i64
    }

    /// Record that `filter` was just shown.
    pub fn set(&self, filter: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(
            self.marker_path(filter),
            chrono::Utc::now().timestamp().to_string(),
        )
    }
}

/// Resolve the filter to show this launch: a fresh marker for the
/// configured value rotates to the next distinct filter, and the resolved
/// value is re-marked for the next launch.
pub fn resolve_active_filter(
    configured: &str,
    filters: &[String],
    marker: &RotationMarker,
) -> String {
    let active = if marker.take_fresh(configured, ROTATION_WINDOW) {
        next_filter(filters, configured).unwrap_or_else(|| configured.to_string())
    } else {
        configured.to_string()
    };
    if let Err(e) = marker.set(&active) {
        tracing::warn!("failed to write rotation marker: {e}");
    }
    active
}

// ---------------------------------------------------------------------------
// CustomClient
// ---------------------------------------------------------------------------

/// Fetches the custom module document.
#[derive(Debug, Clone)]
pub struct CustomClient {
    http: reqwest::Client,
    url: String,
}

impl CustomClient {
    pub fn new(url: impl Into<String>) -> Self {
        CustomClient {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub async fn fetch(&self) -> Result<Vec<CustomEntry>, CustomError> {
        let text = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(serde_json::from_str(&text)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
