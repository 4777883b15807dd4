// Directory document: the JSON array of site categories plus the two config
// pseudo-entries (`page_config`, `announcement_config`) that ride along in it.
//
// The wire format is one flat array. Pseudo-entries are recognized by their
// `type` field and split out during parsing; everything else is a plain
// category entry. Parsing never renders pseudo-entries as categories.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to fetch directory: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse directory document: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

/// Sentinel logo value meaning "use the default asset".
pub const NO_LOGO: &str = "no-logo";

/// A single site link inside a category.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Site {
    pub name: String,
    pub href: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub logo: String,
}

impl Site {
    /// The logo to display: the `no-logo` sentinel (and an absent logo) map
    /// to the configured default asset path.
    pub fn logo_or_default(&self, default_logo: &str) -> String {
        if self.logo.is_empty() || self.logo == NO_LOGO {
            default_logo.to_string()
        } else {
            self.logo.clone()
        }
    }
}

/// A navigable category and its sites.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DirectoryEntry {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub classify: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub sites: Vec<Site>,
}

/// Page chrome carried by the `page_config` pseudo-entry. Absent fields
/// leave the built-in defaults in place.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PageConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub footer_text: Option<String>,
    #[serde(default)]
    pub icp: Option<String>,
}

/// One announcement in the carousel.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Announcement {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub content: String,
}

/// Carousel configuration carried by the `announcement_config` pseudo-entry.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AnnouncementConfig {
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    /// Rotation interval in milliseconds. Zero or absent falls back to the
    /// 5000 ms default.
    #[serde(default)]
    pub interval: u64,
}

/// Rotation interval when the document does not specify one.
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_millis(5000);

impl AnnouncementConfig {
    pub fn rotation_interval(&self) -> Duration {
        if self.interval == 0 {
            DEFAULT_ROTATION_INTERVAL
        } else {
            Duration::from_millis(self.interval)
        }
    }
}

// ---------------------------------------------------------------------------
// DirectoryDocument
// ---------------------------------------------------------------------------

/// A parsed directory document with pseudo-entries split out.
#[derive(Debug, Clone, Default)]
pub struct DirectoryDocument {
    pub page: PageConfig,
    pub announcements: AnnouncementConfig,
    pub entries: Vec<DirectoryEntry>,
}

impl DirectoryDocument {
    /// Parse a directory document from its JSON text.
    pub fn parse(json: &str) -> Result<Self, DirectoryError> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        Self::from_values(values)
    }

    /// Split a raw entry array into page config, announcement config, and
    /// category entries. The first pseudo-entry of each kind wins; entries
    /// with an unrecognized `type` are treated as plain categories.
    pub fn from_values(values: Vec<Value>) -> Result<Self, DirectoryError> {
        let mut page: Option<PageConfig> = None;
        let mut announcements: Option<AnnouncementConfig> = None;
        let mut entries = Vec::new();

        for value in values {
            match value.get("type").and_then(Value::as_str) {
                Some("page_config") => {
                    if page.is_none() {
                        page = Some(serde_json::from_value(value)?);
                    }
                }
                Some("announcement_config") => {
                    if announcements.is_none() {
                        announcements = Some(serde_json::from_value(value)?);
                    }
                }
                _ => entries.push(serde_json::from_value(value)?),
            }
        }

        Ok(DirectoryDocument {
            page: page.unwrap_or_default(),
            announcements: announcements.unwrap_or_default(),
            entries,
        })
    }
}

// ---------------------------------------------------------------------------
// DirectoryClient
// ---------------------------------------------------------------------------

/// Fetches the directory document over HTTP.
///
/// Every fetch appends a `t=<epoch-millis>` query parameter so intermediate
/// caches never serve a stale document; local searches re-fetch through this
/// client rather than reusing an earlier snapshot.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    url: String,
}

impl DirectoryClient {
    pub fn new(url: impl Into<String>) -> Self {
        DirectoryClient {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the directory document.
    pub async fn fetch(&self) -> Result<DirectoryDocument, DirectoryError> {
        let cache_buster = chrono::Utc::now().timestamp_millis().to_string();
        let text = self
            .http
            .get(&self.url)
            .query(&[("t", cache_buster.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        DirectoryDocument::parse(&text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
