// TUI application state
//
// Owns the product store, the current screen, the edit session and the
// transient UI state (selection, search focus, toast, theme). Key handling
// in mod.rs calls into the intent methods here; network work is spawned out
// and comes back through the AppEvent channel.

use crate::api::CatalogClient;
use crate::catalog::{export, Product, ProductPatch, ProductStore, SortField};
use crate::config::Config;
use crate::editor::{EditError, EditSession};
use crate::events::{AppEvent, AuditEvent};
use crate::logging::LogBuffer;
use crate::tui::components::toast::{Toast, ToastKind};
use crate::tui::theme::ThemeKind;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;

/// Rows-per-page steps cycled with + / -
const PAGE_SIZES: &[usize] = &[5, 10, 20, 50];

/// What fills the main area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Initial fetch (or a reload) is in flight
    Loading,
    /// The fetch failed; blocking full-screen error, no partial table
    Failed(String),
    /// Normal operation
    Table,
}

/// Overlays on top of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Product detail / edit form (state lives in the edit session)
    Detail,
    /// Captured tracing output
    Logs,
    /// Keybindings
    Help,
}

/// Main application state for the TUI
pub struct App {
    pub store: ProductStore,
    pub screen: Screen,
    pub modal: Option<Modal>,

    /// At most one edit session (and therefore one draft) at a time
    pub session: Option<EditSession>,

    /// Selected row within the current page
    pub selected_row: usize,

    /// Whether keystrokes go to the search box
    pub search_active: bool,

    pub toast: Option<Toast>,
    pub theme: ThemeKind,
    pub should_quit: bool,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    pub log_buffer: LogBuffer,
    pub logs_scroll: usize,

    client: CatalogClient,
    event_tx: mpsc::Sender<AppEvent>,
    audit_tx: Option<mpsc::Sender<AuditEvent>>,
    session_id: String,
    export_dir: PathBuf,
    demo_mode: bool,
}

impl App {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: &Config,
        client: CatalogClient,
        event_tx: mpsc::Sender<AppEvent>,
        audit_tx: Option<mpsc::Sender<AuditEvent>>,
        log_buffer: LogBuffer,
        session_id: String,
    ) -> Self {
        let mut store = ProductStore::new();
        store.set_page_size(config.page_size);

        Self {
            store,
            screen: Screen::Loading,
            modal: None,
            session: None,
            selected_row: 0,
            search_active: false,
            toast: None,
            theme: ThemeKind::from_name(&config.theme),
            should_quit: false,
            start_time: Instant::now(),
            log_buffer,
            logs_scroll: 0,
            client,
            event_tx,
            audit_tx,
            session_id,
            export_dir: config.export_dir.clone(),
            demo_mode: config.demo_mode,
        }
    }

    // ── completions from background tasks ────────────────────────────────

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::CatalogLoaded { products } => {
                let count = products.len();
                self.store.load(products);
                self.screen = Screen::Table;
                self.selected_row = 0;
                self.show_toast(ToastKind::Info, format!("Loaded {} products", count));
                self.audit(AuditEvent::CatalogLoaded {
                    timestamp: Utc::now(),
                    count,
                });
            }
            AppEvent::CatalogFailed { error } => {
                tracing::error!("Catalog fetch failed: {}", error);
                self.screen = Screen::Failed(error.to_string());
                self.audit(AuditEvent::LoadFailed {
                    timestamp: Utc::now(),
                    message: error.to_string(),
                });
            }
            AppEvent::SaveFinished { id, result } => match result {
                Ok(product) => {
                    // Resync the store from the server's copy, in place
                    let patch = ProductPatch {
                        title: product.title.clone(),
                        price: product.price,
                        description: product.description.clone(),
                        category_id: product.category.as_ref().and_then(|c| c.id),
                    };
                    self.store.apply_edit(id, &patch);

                    match self.session.as_mut().filter(|s| s.product_id == id) {
                        Some(session) => session.save_succeeded(),
                        None => tracing::debug!("Save for product {} finished after its session closed", id),
                    }

                    self.show_toast(ToastKind::Success, format!("Saved product {}", id));
                    self.audit(AuditEvent::EditSaved {
                        timestamp: Utc::now(),
                        id,
                        title: product.title.clone(),
                    });
                }
                Err(error) => {
                    tracing::warn!("Update of product {} failed: {}", id, error);
                    if let Some(session) = self.session.as_mut().filter(|s| s.product_id == id) {
                        // Back to Editing, draft intact
                        session.save_failed(error.to_string());
                    }
                    self.show_toast(ToastKind::Error, error.to_string());
                    self.audit(AuditEvent::EditFailed {
                        timestamp: Utc::now(),
                        id,
                        message: error.to_string(),
                    });
                }
            },
        }
    }

    // ── fetch / reload ───────────────────────────────────────────────────

    /// Kick off a (re)load; the completion arrives as an AppEvent
    pub fn reload(&mut self) {
        self.screen = Screen::Loading;
        self.modal = None;
        self.session = None;

        let tx = self.event_tx.clone();
        if self.demo_mode {
            tokio::spawn(crate::demo::run_demo(tx));
        } else {
            let client = self.client.clone();
            tokio::spawn(async move {
                let event = match client.list_products().await {
                    Ok(products) => AppEvent::CatalogLoaded { products },
                    Err(error) => AppEvent::CatalogFailed { error },
                };
                let _ = tx.send(event).await;
            });
        }
    }

    // ── table intents ────────────────────────────────────────────────────

    pub fn sort_by(&mut self, field: SortField) {
        self.store.apply_sort(field);
        self.selected_row = 0;
    }

    pub fn set_search(&mut self, term: String) {
        self.store.apply_filter(&term);
        self.selected_row = 0;
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut term = self.store.search_term().to_string();
        term.push(c);
        self.set_search(term);
    }

    pub fn pop_search_char(&mut self) {
        let mut term = self.store.search_term().to_string();
        term.pop();
        self.set_search(term);
    }

    pub fn next_page(&mut self) {
        self.store.next_page();
        self.selected_row = 0;
    }

    pub fn prev_page(&mut self) {
        self.store.prev_page();
        self.selected_row = 0;
    }

    /// Step rows-per-page through the fixed sizes
    pub fn cycle_page_size(&mut self, up: bool) {
        let current = self.store.page_size();
        let idx = PAGE_SIZES.iter().position(|&s| s == current);
        let next = match (idx, up) {
            (Some(i), true) if i + 1 < PAGE_SIZES.len() => PAGE_SIZES[i + 1],
            (Some(i), false) if i > 0 => PAGE_SIZES[i - 1],
            (Some(i), _) => PAGE_SIZES[i],
            // Config allowed an arbitrary size; snap to the nearest step
            (None, _) => *PAGE_SIZES
                .iter()
                .min_by_key(|&&s| s.abs_diff(current))
                .unwrap_or(&10),
        };
        if next != current {
            self.store.set_page_size(next);
            self.selected_row = 0;
        }
    }

    pub fn select_next(&mut self) {
        let rows = self.store.current_page().items.len();
        if rows > 0 && self.selected_row + 1 < rows {
            self.selected_row += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    /// The product under the cursor, if any
    pub fn selected_product(&self) -> Option<Product> {
        self.store
            .current_page()
            .items
            .get(self.selected_row)
            .cloned()
    }

    // ── detail / edit flow ───────────────────────────────────────────────

    /// Open the detail modal for the selected row.
    ///
    /// Replaces any existing session wholesale, which is what discards an
    /// unsaved draft when the user jumps to a different product.
    pub fn open_detail(&mut self) {
        if let Some(product) = self.selected_product() {
            self.session = Some(EditSession::open(&product));
            self.modal = Some(Modal::Detail);
        }
    }

    pub fn close_detail(&mut self) {
        self.session = None;
        self.modal = None;
    }

    pub fn begin_edit(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(product) = self.store.find(session.product_id).cloned() {
            session.begin_edit(&product);
        }
    }

    /// Validate the draft and, if it passes, start the network save
    pub fn save_requested(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let id = session.product_id;

        match session.request_save() {
            Ok(patch) => self.spawn_save(id, patch),
            Err(EditError::SaveInFlight) => {
                self.show_toast(ToastKind::Error, "a save is already in progress");
            }
            Err(EditError::NotEditing) => {}
            Err(_) => {
                // Validation failure: shown inline in the form, no toast spam
            }
        }
    }

    fn spawn_save(&mut self, id: u64, patch: ProductPatch) {
        let tx = self.event_tx.clone();

        if self.demo_mode {
            // No backend to talk to: confirm locally through the same channel
            let patched = self.store.find(id).cloned().map(|mut p| {
                p.title = patch.title.clone();
                p.price = patch.price;
                p.description = patch.description.clone();
                p
            });
            tokio::spawn(async move {
                if let Some(product) = patched {
                    let _ = tx
                        .send(AppEvent::SaveFinished {
                            id,
                            result: Ok(Box::new(product)),
                        })
                        .await;
                }
            });
            return;
        }

        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client.update_product(id, &patch).await.map(Box::new);
            let _ = tx.send(AppEvent::SaveFinished { id, result }).await;
        });
    }

    // ── export / clipboard ───────────────────────────────────────────────

    /// Export the whole filtered/sorted view (not just the visible page)
    pub fn export_view(&mut self) {
        match export::export_csv(self.store.view(), &self.export_dir, &self.session_id) {
            Ok(path) => {
                let rows = self.store.view().len();
                self.show_toast(
                    ToastKind::Success,
                    format!("Exported {} rows to {}", rows, path.display()),
                );
                self.audit(AuditEvent::Exported {
                    timestamp: Utc::now(),
                    rows,
                    path: path.display().to_string(),
                });
            }
            Err(e) => self.show_toast(ToastKind::Error, e.to_string()),
        }
    }

    /// Copy the product under the cursor (or open in detail) as JSON
    pub fn copy_selected(&mut self) {
        let product = match self.session.as_ref() {
            Some(session) => self.store.find(session.product_id).cloned(),
            None => self.selected_product(),
        };
        let Some(product) = product else {
            return;
        };

        match serde_json::to_string_pretty(&product) {
            Ok(json) => {
                if crate::tui::clipboard::copy_to_clipboard(&json).is_ok() {
                    self.show_toast(ToastKind::Success, "Copied product JSON");
                } else {
                    self.show_toast(ToastKind::Error, "Failed to copy to clipboard");
                }
            }
            Err(e) => self.show_toast(ToastKind::Error, format!("Failed to encode: {}", e)),
        }
    }

    // ── logs modal ───────────────────────────────────────────────────────

    /// Scroll the logs modal one entry towards the oldest, clamped so the
    /// offset never runs past the buffer
    pub fn scroll_logs_up(&mut self) {
        let max = self.log_buffer.get_all().len().saturating_sub(1);
        if self.logs_scroll < max {
            self.logs_scroll += 1;
        }
    }

    /// Scroll back towards the newest entry
    pub fn scroll_logs_down(&mut self) {
        self.logs_scroll = self.logs_scroll.saturating_sub(1);
    }

    // ── housekeeping ─────────────────────────────────────────────────────

    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
        self.show_toast(ToastKind::Info, format!("Theme: {}", self.theme.name()));
    }

    pub fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toast = Some(Toast::new(kind, message));
    }

    /// Periodic tick from the render loop
    pub fn tick(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }

    fn audit(&self, event: AuditEvent) {
        if let Some(tx) = &self.audit_tx {
            // try_send: the audit trail must never stall the UI
            let _ = tx.try_send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogEntry, LogLevel};

    fn test_app() -> App {
        let (tx, _rx) = mpsc::channel(8);
        App::new(
            &Config::default(),
            CatalogClient::new("http://localhost:0").unwrap(),
            tx,
            None,
            LogBuffer::new(),
            "unit".to_string(),
        )
    }

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            target: "stockpit".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_logs_scroll_clamps_to_buffer() {
        let mut app = test_app();

        // Empty buffer: scrolling has nowhere to go
        for _ in 0..5 {
            app.scroll_logs_up();
        }
        assert_eq!(app.logs_scroll, 0);

        for i in 0..3 {
            app.log_buffer.add(entry(&format!("line {}", i)));
        }

        // Mashing Up past the oldest entry must not grow the offset
        for _ in 0..10 {
            app.scroll_logs_up();
        }
        assert_eq!(app.logs_scroll, 2);

        app.scroll_logs_down();
        assert_eq!(app.logs_scroll, 1);
        app.scroll_logs_down();
        app.scroll_logs_down();
        assert_eq!(app.logs_scroll, 0);
    }
}
