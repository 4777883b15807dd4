// navdeck entry point: wire tracing, config, and channels, then run the app
// orchestrator task next to the TUI event loop until the user quits.

use navdeck::app;
use navdeck::config;
use navdeck::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to a file; the terminal belongs to the TUI.
    init_tracing()?;
    info!("navdeck starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: directory={}, {} clock cities, custom module {}",
        config.directory.url,
        config.clock.cities.len(),
        if config.custom.is_some() { "on" } else { "off" }
    );

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // The orchestrator owns the HTTP clients and fetches the directory (and
    // the custom module, when configured) as soon as it starts.
    let app_state = app::AppState::new(config.clone());
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {e}");
        }
    });

    // Blocks until the user quits.
    let view_state = tui::ViewState::from_config(&config);
    if let Err(e) = tui::run(ui_rx, cmd_tx, view_state).await {
        error!("TUI error: {e}");
    }

    // Give the orchestrator a bounded window to drain and exit.
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), app_handle).await;

    info!("navdeck shut down cleanly");
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::File::create(log_dir.join("navdeck.log"))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("navdeck=info,warn"));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}
