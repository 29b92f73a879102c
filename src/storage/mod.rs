// Storage module - audit log in JSON Lines format
//
// JSON Lines (JSONL) writes one JSON object per line, making it easy to:
// - Stream process large files
// - Grep/search with standard tools
// - Parse with jq or other JSON tools
//
// Each session gets its own file: stockpit-YYYYMMDD-HHMMSS-XXXX.jsonl
// Example: jq 'select(.type == "edit_saved")' logs/stockpit-20260830-101502-a7b3.jsonl

use crate::events::AuditEvent;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Appends audit events to the session's JSONL file
pub struct AuditLog {
    log_dir: PathBuf,
    session_id: String,
    event_rx: mpsc::Receiver<AuditEvent>,
}

impl AuditLog {
    pub fn new(
        log_dir: PathBuf,
        session_id: String,
        event_rx: mpsc::Receiver<AuditEvent>,
    ) -> Result<Self> {
        fs::create_dir_all(&log_dir).context("Failed to create audit log directory")?;

        Ok(Self {
            log_dir,
            session_id,
            event_rx,
        })
    }

    fn log_file_path(&self) -> PathBuf {
        self.log_dir
            .join(format!("stockpit-{}.jsonl", self.session_id))
    }

    /// Run the audit loop, appending events as they arrive.
    ///
    /// Runs in its own task and continues until the channel closes, which
    /// happens when every sender (the TUI and the loader tasks) has shut
    /// down.
    pub async fn run(mut self) -> Result<()> {
        tracing::info!("Audit log started: {:?}", self.log_file_path());

        while let Some(event) = self.event_rx.recv().await {
            if let Err(e) = self.write_event(&event) {
                tracing::error!("Failed to write audit event: {:?}", e);
                // Keep processing even if one write fails
            }
        }

        tracing::info!("Audit log shutting down");
        Ok(())
    }

    fn write_event(&self, event: &AuditEvent) -> Result<()> {
        let line = serde_json::to_string(event).context("Failed to serialize audit event")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_file_path())
            .context("Failed to open audit log file")?;

        writeln!(file, "{}", line).context("Failed to write audit log line")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_audit_events_serialize_tagged() {
        let event = AuditEvent::EditSaved {
            timestamp: Utc::now(),
            id: 9,
            title: "Shoe".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "edit_saved");
        assert_eq!(json["id"], 9);
    }

    #[tokio::test]
    async fn test_audit_log_writes_one_line_per_event() {
        let dir = std::env::temp_dir().join("stockpit-audit-test");
        let _ = fs::remove_dir_all(&dir);

        let (tx, rx) = mpsc::channel(8);
        let log = AuditLog::new(dir.clone(), "unit".to_string(), rx).unwrap();
        let handle = tokio::spawn(log.run());

        tx.send(AuditEvent::CatalogLoaded {
            timestamp: Utc::now(),
            count: 3,
        })
        .await
        .unwrap();
        tx.send(AuditEvent::Exported {
            timestamp: Utc::now(),
            rows: 3,
            path: "products-unit.csv".to_string(),
        })
        .await
        .unwrap();
        drop(tx);
        handle.await.unwrap().unwrap();

        let contents = fs::read_to_string(dir.join("stockpit-unit.jsonl")).unwrap();
        assert_eq!(contents.lines().count(), 2);
        let _ = fs::remove_dir_all(&dir);
    }
}
