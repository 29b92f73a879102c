//! Clipboard helper for copying product JSON to the system clipboard
//!
//! Uses `arboard` for cross-platform support. The clipboard handle is
//! created fresh each time to avoid holding resources between copies.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard.
///
/// Common failure cases: no display server (headless Linux), permission
/// denied. Callers surface the outcome as a toast either way.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}
