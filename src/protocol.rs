// Message types exchanged between the TUI task and the app orchestrator.

use crate::custom::CustomEntry;
use crate::directory::DirectoryDocument;
use crate::search::{SearchMode, SearchResult};

/// Commands flowing from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Fetch the directory document (startup and manual refresh).
    RefreshDirectory,
    /// Run a search for an already-trimmed, non-empty query.
    Search { query: String, mode: SearchMode },
    /// Open a link in the system browser.
    OpenUrl(String),
    /// Shut the orchestrator down.
    Quit,
}

/// Updates flowing from the app orchestrator to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// A freshly fetched directory document, pseudo-entries split out.
    Directory(Box<DirectoryDocument>),
    /// Custom module entries selected for the active filter.
    Custom {
        entries: Vec<CustomEntry>,
        active_filter: Option<String>,
    },
    /// A finished local search.
    SearchResults {
        query: String,
        results: Vec<SearchResult>,
    },
    /// A failure the user has to acknowledge (rendered as a blocking
    /// modal alert).
    Alert(String),
}
