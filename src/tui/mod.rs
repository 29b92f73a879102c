// TUI module - Terminal User Interface
//
// Manages the terminal UI using ratatui: terminal setup/teardown, the
// event loop, and keyboard dispatch. Network completions arrive over the
// AppEvent channel and are folded into App state between redraws.

pub mod app;
pub mod clipboard;
pub mod components;
pub mod theme;
pub mod ui;

use crate::api::CatalogClient;
use crate::config::Config;
use crate::events::{AppEvent, AuditEvent};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, Modal, Screen};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crate::catalog::SortField;
use crate::editor::EditPhase;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, spawns the initial catalog load, runs the event
/// loop, and restores the terminal when done.
pub async fn run_tui(
    config: Config,
    client: CatalogClient,
    event_tx: mpsc::Sender<AppEvent>,
    mut event_rx: mpsc::Receiver<AppEvent>,
    audit_tx: Option<mpsc::Sender<AuditEvent>>,
    log_buffer: LogBuffer,
    session_id: String,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(&config, client, event_tx, audit_tx, log_buffer, session_id);
    app.reload();

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// tokio::select! lets us wait on keyboard input, the periodic tick, and
/// background-task completions at the same time, redrawing after each.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Periodic tick (toast expiry, uptime redraw)
            _ = tick_interval.tick() => {
                app.tick();
            }

            // Background task completions
            Some(app_event) = event_rx.recv() => {
                app.handle_app_event(app_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Search box → Screen keys
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Key repeat/release events would double every action on Windows
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Layer 1: an open modal captures all input
    if app.modal.is_some() {
        handle_modal_key(app, key_event.code);
        return;
    }

    // Layer 2: active search box swallows text input
    if app.search_active {
        handle_search_key(app, key_event.code);
        return;
    }

    // Layer 3: screen-level keys
    match &app.screen {
        Screen::Failed(_) => match key_event.code {
            KeyCode::Char('r') => app.reload(),
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            _ => {}
        },
        Screen::Loading => {
            if let KeyCode::Char('q') = key_event.code {
                app.should_quit = true;
            }
        }
        Screen::Table => handle_table_key(app, key_event.code),
    }
}

fn handle_table_key(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('/') => app.search_active = true,
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('t') => app.sort_by(SortField::Title),
        KeyCode::Char('p') => app.sort_by(SortField::Price),
        KeyCode::Char('x') => app.export_view(),
        KeyCode::Char('y') => app.copy_selected(),
        KeyCode::Char('T') => app.next_theme(),
        KeyCode::Char('v') => {
            app.logs_scroll = 0;
            app.modal = Some(Modal::Logs);
        }
        KeyCode::Char('?') => app.modal = Some(Modal::Help),
        KeyCode::Char('+') | KeyCode::Char('=') => app.cycle_page_size(true),
        KeyCode::Char('-') => app.cycle_page_size(false),
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        KeyCode::Left | KeyCode::PageUp => app.prev_page(),
        KeyCode::Right | KeyCode::PageDown => app.next_page(),
        KeyCode::Enter => app.open_detail(),
        KeyCode::Esc => {
            // Esc clears an active search filter before anything else
            if !app.store.search_term().is_empty() {
                app.set_search(String::new());
            }
        }
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyCode) {
    match key {
        // Enter keeps the filter and returns focus to the table
        KeyCode::Enter => app.search_active = false,
        // Esc clears the filter entirely
        KeyCode::Esc => {
            app.set_search(String::new());
            app.search_active = false;
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_modal_key(app: &mut App, key: KeyCode) {
    match app.modal {
        Some(Modal::Detail) => handle_detail_key(app, key),
        Some(Modal::Logs) => match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('v') => {
                app.modal = None;
            }
            KeyCode::Up => app.scroll_logs_up(),
            KeyCode::Down => app.scroll_logs_down(),
            _ => {}
        },
        Some(Modal::Help) => {
            // Any key dismisses help
            app.modal = None;
        }
        None => {}
    }
}

/// Keys inside the detail modal depend on the edit phase
fn handle_detail_key(app: &mut App, key: KeyCode) {
    let Some(phase) = app.session.as_ref().map(|s| s.phase) else {
        app.modal = None;
        return;
    };

    match phase {
        EditPhase::Viewing => match key {
            KeyCode::Char('e') => app.begin_edit(),
            KeyCode::Char('y') => app.copy_selected(),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => app.close_detail(),
            _ => {}
        },
        EditPhase::Editing => match key {
            KeyCode::Enter => app.save_requested(),
            KeyCode::Esc => {
                // Discard the draft, back to read-only detail
                if let Some(session) = app.session.as_mut() {
                    session.cancel_edit();
                }
            }
            KeyCode::Tab => {
                if let Some(session) = app.session.as_mut() {
                    session.focus_next();
                }
            }
            KeyCode::BackTab => {
                if let Some(session) = app.session.as_mut() {
                    session.focus_prev();
                }
            }
            KeyCode::Backspace => {
                if let Some(session) = app.session.as_mut() {
                    session.backspace();
                }
            }
            KeyCode::Char(c) => {
                if let Some(session) = app.session.as_mut() {
                    session.insert_char(c);
                }
            }
            _ => {}
        },
        EditPhase::Saving => {
            // Input is ignored until the save round-trip finishes; a second
            // Enter would otherwise fire a concurrent save
            if key == KeyCode::Enter {
                app.save_requested();
            }
        }
    }
}
