// CSV export of the current view
//
// Writes the whole filtered/sorted view (not just the visible page) as a
// comma-separated table. The file starts with a UTF-8 byte-order marker so
// spreadsheet applications pick the right encoding, text fields are quoted
// with internal quotes doubled, and embedded line breaks are collapsed to
// single spaces.
//
// One file per session: products-<session-id>.csv, so repeated exports in
// the same run overwrite predictably instead of littering the directory.

use super::models::Product;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// UTF-8 byte-order marker for spreadsheet compatibility
const BOM: &str = "\u{FEFF}";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export - the current view is empty")]
    EmptyView,
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the view as CSV text, BOM included.
///
/// Fails without producing anything when the view is empty - an empty
/// export is always a user mistake (over-narrow filter), not a valid file.
pub fn render_csv(view: &[Product]) -> Result<String, ExportError> {
    if view.is_empty() {
        return Err(ExportError::EmptyView);
    }

    let mut out = String::from(BOM);
    out.push_str("ID,Title,Price,Category,Description\r\n");

    for product in view {
        out.push_str(&format!(
            "{},{},{:.2},{},{}\r\n",
            product.id,
            quote(&product.title),
            product.price,
            quote(product.category_name()),
            quote(&product.description),
        ));
    }

    Ok(out)
}

/// Write the view to `<dir>/products-<session_id>.csv`
pub fn export_csv(
    view: &[Product],
    dir: &Path,
    session_id: &str,
) -> Result<PathBuf, ExportError> {
    let contents = render_csv(view)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("products-{}.csv", session_id));
    fs::write(&path, contents)?;
    Ok(path)
}

/// Quote a text field: collapse line breaks to spaces, double internal quotes
fn quote(field: &str) -> String {
    let collapsed = field
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
        .replace('"', "\"\"");
    format!("\"{}\"", collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Category;

    fn product(id: u64, title: &str, price: f64, description: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            description: description.to_string(),
            category: Some(Category {
                id: Some(1),
                name: "Clothes".to_string(),
                image: None,
            }),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_empty_view_fails_without_output() {
        let err = render_csv(&[]).unwrap_err();
        assert!(matches!(err, ExportError::EmptyView));

        let dir = std::env::temp_dir().join("stockpit-export-empty-test");
        let result = export_csv(&[], &dir, "test");
        assert!(result.is_err());
        assert!(!dir.join("products-test.csv").exists());
    }

    #[test]
    fn test_csv_starts_with_bom_and_header() {
        let csv = render_csv(&[product(1, "Shoe", 10.0, "d")]).unwrap();
        assert!(csv.starts_with('\u{FEFF}'));
        assert!(csv
            .trim_start_matches('\u{FEFF}')
            .starts_with("ID,Title,Price,Category,Description\r\n"));
    }

    #[test]
    fn test_quotes_are_doubled_and_newlines_collapsed() {
        let csv = render_csv(&[product(
            2,
            "A \"quoted\" title",
            5.5,
            "line one\nline two\r\nline three",
        )])
        .unwrap();
        assert!(csv.contains("\"A \"\"quoted\"\" title\""));
        assert!(csv.contains("\"line one line two line three\""));
    }

    #[test]
    fn test_missing_category_exports_na() {
        let mut p = product(3, "Bare", 1.0, "");
        p.category = None;
        let csv = render_csv(&[p]).unwrap();
        assert!(csv.contains("3,\"Bare\",1.00,\"N/A\",\"\""));
    }

    #[test]
    fn test_exports_whole_view_not_one_page() {
        let view: Vec<Product> = (1..=25)
            .map(|i| product(i, &format!("P{}", i), i as f64, ""))
            .collect();
        let csv = render_csv(&view).unwrap();
        // Header plus all 25 rows, regardless of any page size
        assert_eq!(csv.matches("\r\n").count(), 26);
    }
}
