// Events that flow between the background tasks and the TUI
//
// Network work (the initial fetch, reloads, saves) runs in spawned tasks
// and reports back over an mpsc channel; the TUI event loop selects on that
// channel next to keyboard input. A second, serializable event type feeds
// the audit log so a session leaves a greppable JSONL trail.

use crate::api::{FetchError, UpdateError};
use crate::catalog::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Completions delivered into the TUI event loop
#[derive(Debug)]
pub enum AppEvent {
    /// A full fetch finished successfully
    CatalogLoaded { products: Vec<Product> },

    /// A full fetch failed; the table is replaced by a blocking error screen
    CatalogFailed { error: FetchError },

    /// An update round-trip finished (either way)
    SaveFinished {
        id: u64,
        result: Result<Box<Product>, UpdateError>,
    },
}

/// Audit trail entries, one JSON object per line in the session log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")] // Creates JSON like {"type": "edit_saved", ...}
#[serde(rename_all = "snake_case")]
pub enum AuditEvent {
    CatalogLoaded {
        timestamp: DateTime<Utc>,
        count: usize,
    },
    LoadFailed {
        timestamp: DateTime<Utc>,
        message: String,
    },
    EditSaved {
        timestamp: DateTime<Utc>,
        id: u64,
        title: String,
    },
    EditFailed {
        timestamp: DateTime<Utc>,
        id: u64,
        message: String,
    },
    Exported {
        timestamp: DateTime<Utc>,
        rows: usize,
        path: String,
    },
}
