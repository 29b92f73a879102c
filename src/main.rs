// stockpit - terminal admin dashboard for a remote product catalog
//
// Fetches the product list from a REST API and presents it as a paginated,
// sortable, searchable table with in-place editing and CSV export.
//
// Architecture:
// - Catalog client (reqwest): fetches and updates products over HTTP
// - Store: authoritative collection plus the derived filtered/sorted view
// - TUI (ratatui): table, detail/edit modal, toasts
// - Audit log: writes session events to a JSON Lines file
// - Event system: mpsc channels connect background tasks to the TUI

mod api;
mod catalog;
mod cli;
mod config;
mod demo;
mod editor;
mod events;
mod logging;
mod storage;
mod tui;
mod util;

use anyhow::Result;
use api::CatalogClient;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use storage::AuditLog;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI subcommands first (config --show/--reset/--edit, export)
    // If a command was handled, exit early
    if cli::handle_cli().await? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Load configuration: env vars > file > defaults
    let config = Config::from_env();

    // Create log buffer for the TUI logs modal
    let log_buffer = LogBuffer::new();

    // Initialize tracing. Logs go to the in-memory buffer (stdout would
    // garble the alternate screen) and optionally to rotating files.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("stockpit={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must be kept alive for the duration of the program so
    // buffered file logs flush on exit
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            match std::fs::create_dir_all(&config.logging.file_dir) {
                Err(e) => {
                    eprintln!(
                        "Warning: Could not create log directory {:?}: {}",
                        config.logging.file_dir, e
                    );
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                    None
                }
                Ok(()) => {
                    let file_appender = match config.logging.file_rotation {
                        LogRotation::Hourly => tracing_appender::rolling::hourly(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                        LogRotation::Daily => tracing_appender::rolling::daily(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                        LogRotation::Never => tracing_appender::rolling::never(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                    };

                    // Writes happen on a background thread
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();

                    Some(guard)
                }
            }
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
            None
        };

    // Session ID names this run's export and audit files
    let session_id = util::generate_session_id();
    tracing::debug!("Session ID: {}", session_id);

    // Event channels: background task completions into the TUI, and the
    // audit trail out to its writer task
    let (event_tx, event_rx) = mpsc::channel(64);
    let (audit_tx, audit_rx) = mpsc::channel(256);

    // Spawn the audit log task (if enabled); it runs until the last
    // sender is dropped
    let audit_handle = if config.audit.enabled {
        match AuditLog::new(config.audit.dir.clone(), session_id.clone(), audit_rx) {
            Ok(audit_log) => Some(tokio::spawn(audit_log.run())),
            Err(e) => {
                tracing::warn!("Audit log disabled: {}", e);
                None
            }
        }
    } else {
        drop(audit_rx);
        None
    };
    let audit_tx = audit_handle.is_some().then_some(audit_tx);

    let client = CatalogClient::new(&config.api_url)?;

    if config.demo_mode {
        tracing::info!("Running in DEMO MODE - using the bundled sample catalog");
    }

    // Run the TUI; it spawns the initial catalog load itself
    let result = tui::run_tui(
        config,
        client,
        event_tx,
        event_rx,
        audit_tx,
        log_buffer,
        session_id,
    )
    .await;

    // The TUI has dropped its audit sender by now; wait for the writer to
    // drain and close the file
    if let Some(handle) = audit_handle {
        if let Err(e) = handle.await.unwrap_or_else(|e| Err(e.into())) {
            tracing::warn!("Audit log shut down uncleanly: {}", e);
        }
    }

    result
}
