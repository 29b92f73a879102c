//! Shared utility functions

use unicode_width::UnicodeWidthChar;

/// Generate a unique session ID for log and export file naming
/// Format: YYYYMMDD-HHMMSS-XXXX (timestamp + 4 random hex chars)
pub fn generate_session_id() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let timestamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
    // Use RandomState to get a random value without adding a dependency
    let random = RandomState::new().build_hasher().finish();
    let short_hash = format!("{:04x}", random & 0xFFFF);

    format!("{}-{}", timestamp, short_hash)
}

/// Truncate a string to at most `max_width` terminal columns, appending an
/// ellipsis when content was cut.
///
/// Uses display width rather than byte or char counts so CJK characters and
/// emojis (which occupy two columns) don't overflow table cells.
pub fn truncate_display(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }

    // Reserve one column for the ellipsis marker
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_truncate_fits() {
        assert_eq!(truncate_display("Shoe A", 10), "Shoe A");
    }

    #[test]
    fn test_display_truncate_cuts_with_ellipsis() {
        assert_eq!(
            truncate_display("Classic Red Pullover Hoodie", 10),
            "Classic R…"
        );
    }

    #[test]
    fn test_display_truncate_wide_chars() {
        // Six columns total; a 5-column budget keeps two chars plus ellipsis
        assert_eq!(truncate_display("日本語", 5), "日本…");
    }
}
