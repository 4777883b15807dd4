// Application orchestration: owns the HTTP clients and serves the TUI's
// commands.
//
// Runs as its own tokio task so fetches never stall the render loop. Every
// local search re-fetches the directory; the only staleness guarantee is
// "reflects server state at fetch time".

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::custom::{
    self, CustomClient, CustomEntry, RotationMarker,
};
use crate::directory::DirectoryClient;
use crate::protocol::{UiUpdate, UserCommand};
use crate::search::{self, SearchMode};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The orchestrator's working state.
pub struct AppState {
    pub config: Config,
    pub directory: DirectoryClient,
    pub custom: Option<CustomClient>,
    pub rotation_marker: Option<RotationMarker>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let directory = DirectoryClient::new(config.directory.url.clone());
        let custom = config
            .custom
            .as_ref()
            .map(|c| CustomClient::new(c.url.clone()));
        let rotation_marker = RotationMarker::new();

        AppState {
            config,
            directory,
            custom,
            rotation_marker,
        }
    }
}

/// Select the custom entries to display and resolve the active filter,
/// rotating it when a fresh marker is present.
pub fn prepare_custom(
    entries: Vec<CustomEntry>,
    configured_filter: Option<&str>,
    marker: Option<&RotationMarker>,
) -> (Vec<CustomEntry>, Option<String>) {
    let Some(configured) = configured_filter else {
        // No filter configured: show everything, never rotate.
        return (entries, None);
    };

    let filters = custom::distinct_filters(&entries);
    let active = match marker {
        Some(marker) => custom::resolve_active_filter(configured, &filters, marker),
        None => configured.to_string(),
    };

    let selected = custom::select_entries(&entries, Some(&active))
        .into_iter()
        .cloned()
        .collect();
    (selected, Some(active))
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the orchestrator until `Quit` arrives or the command channel closes.
///
/// The directory and the custom module (when configured) are loaded once at
/// startup; afterwards every command is served in arrival order.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    state: AppState,
) -> anyhow::Result<()> {
    load_directory(&state, &ui_tx).await;
    load_custom(&state, &ui_tx).await;

    while let Some(command) = cmd_rx.recv().await {
        match command {
            UserCommand::RefreshDirectory => {
                load_directory(&state, &ui_tx).await;
            }
            UserCommand::Search { query, mode } => {
                handle_search(&state, &ui_tx, &query, mode).await;
            }
            UserCommand::OpenUrl(url) => {
                open_in_browser(&url);
            }
            UserCommand::Quit => {
                info!("Quit command received, shutting down orchestrator");
                break;
            }
        }
    }

    Ok(())
}

async fn load_directory(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    match state.directory.fetch().await {
        Ok(doc) => {
            info!(
                "Directory loaded: {} categories, {} announcements",
                doc.entries.len(),
                doc.announcements.announcements.len()
            );
            let _ = ui_tx.send(UiUpdate::Directory(Box::new(doc))).await;
        }
        Err(e) => {
            error!("Failed to load directory from {}: {e}", state.directory.url());
            let _ = ui_tx
                .send(UiUpdate::Alert(
                    "Failed to load directory data, please refresh and try again".to_string(),
                ))
                .await;
        }
    }
}

async fn load_custom(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let Some(client) = &state.custom else {
        return;
    };
    let configured_filter = state
        .config
        .custom
        .as_ref()
        .and_then(|c| c.filter.as_deref());

    match client.fetch().await {
        Ok(entries) => {
            let (entries, active_filter) = prepare_custom(
                entries,
                configured_filter,
                state.rotation_marker.as_ref(),
            );
            info!(
                "Custom module loaded: {} entries, filter {:?}",
                entries.len(),
                active_filter
            );
            let _ = ui_tx
                .send(UiUpdate::Custom {
                    entries,
                    active_filter,
                })
                .await;
        }
        Err(e) => {
            error!("Failed to load custom module: {e}");
            let _ = ui_tx
                .send(UiUpdate::Alert(
                    "Failed to load custom module data".to_string(),
                ))
                .await;
        }
    }
}

async fn handle_search(
    state: &AppState,
    ui_tx: &mpsc::Sender<UiUpdate>,
    query: &str,
    mode: SearchMode,
) {
    match mode {
        SearchMode::External => {
            let url = search::external_search_url(&state.config.search.engine_url, query);
            open_in_browser(&url);
        }
        SearchMode::Local => {
            // Always a fresh fetch, never a cached snapshot.
            match state.directory.fetch().await {
                Ok(doc) => {
                    let results = search::search_local_data(
                        &doc.entries,
                        query,
                        &state.config.directory.default_logo,
                    );
                    info!("Local search for {query:?}: {} results", results.len());
                    let _ = ui_tx
                        .send(UiUpdate::SearchResults {
                            query: query.to_string(),
                            results,
                        })
                        .await;
                }
                Err(e) => {
                    error!("Failed to load search data: {e}");
                    let _ = ui_tx
                        .send(UiUpdate::Alert(
                            "Failed to load search data, please refresh and try again"
                                .to_string(),
                        ))
                        .await;
                }
            }
        }
    }
}

fn open_in_browser(url: &str) {
    if let Err(e) = webbrowser::open(url) {
        warn!("Failed to open browser for {url}: {e}");
    } else {
        info!("Opened {url} in browser");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
