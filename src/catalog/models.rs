// Wire models for the remote product catalog
//
// These mirror the JSON the catalog API serves. The API is third-party and
// its data is messy in places: prices can be absent, image URLs sometimes
// arrive wrapped in stray brackets and quotes, categories can be missing.
// The helpers at the bottom of this module absorb that mess so the rest of
// the code sees clean values.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// One product as served by `GET /products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// Non-negative; absent on some records, treated as 0
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    /// Ordered image references, possibly malformed (see [`clean_image_url`])
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Category name for display, "N/A" when the product has none
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map(|c| c.name.as_str()).unwrap_or("N/A")
    }

    /// Closed category classification used for display colors
    pub fn category_kind(&self) -> CategoryKind {
        self.category
            .as_ref()
            .map(|c| CategoryKind::from_name(&c.name))
            .unwrap_or(CategoryKind::Other)
    }
}

/// Product category reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Body of `PUT /products/{id}` - the editable fields only
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub title: String,
    pub price: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
}

/// Closed set of known catalog categories
///
/// The remote API serves free-form category names; anything unrecognized
/// falls into `Other`. Keeping this closed lets the color mapping below be
/// an exhaustive match instead of a string-keyed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Clothes,
    Electronics,
    Furniture,
    Shoes,
    Miscellaneous,
    Other,
}

impl CategoryKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Clothes" => CategoryKind::Clothes,
            "Electronics" => CategoryKind::Electronics,
            "Furniture" => CategoryKind::Furniture,
            "Shoes" => CategoryKind::Shoes,
            "Miscellaneous" => CategoryKind::Miscellaneous,
            _ => CategoryKind::Other,
        }
    }

    /// Badge color for the table's category column
    pub fn color(self) -> Color {
        match self {
            CategoryKind::Clothes => Color::Cyan,
            CategoryKind::Electronics => Color::Yellow,
            CategoryKind::Furniture => Color::Green,
            CategoryKind::Shoes => Color::Red,
            CategoryKind::Miscellaneous => Color::Gray,
            CategoryKind::Other => Color::Blue,
        }
    }
}

/// Clean a raw image reference from the API.
///
/// Some records wrap their URLs in literal brackets and quotes, e.g.
/// `["https://...`. Strips those characters, trims whitespace, and returns
/// `None` for anything that doesn't look like an HTTP URL afterwards.
pub fn clean_image_url(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '"' | '\''))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.starts_with("http") {
        Some(cleaned.to_string())
    } else {
        None
    }
}

/// Format a price with two decimals and thousands separators: 1234.5 -> "1,234.50"
pub fn format_price(price: f64) -> String {
    let formatted = format!("{:.2}", price);
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    // Negative prices shouldn't occur, but don't garble the sign if one does
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_image_url_strips_brackets_and_quotes() {
        assert_eq!(
            clean_image_url("[\"https://placeimg.com/640/480/any\"]"),
            Some("https://placeimg.com/640/480/any".to_string())
        );
        assert_eq!(
            clean_image_url("'https://example.com/a.png'"),
            Some("https://example.com/a.png".to_string())
        );
    }

    #[test]
    fn test_clean_image_url_trims_whitespace() {
        assert_eq!(
            clean_image_url("  https://example.com/a.png  "),
            Some("https://example.com/a.png".to_string())
        );
    }

    #[test]
    fn test_clean_image_url_rejects_non_http() {
        assert_eq!(clean_image_url("not-a-url"), None);
        assert_eq!(clean_image_url("[\"\"]"), None);
        assert_eq!(clean_image_url(""), None);
    }

    #[test]
    fn test_format_price_groups_thousands() {
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(10.0), "10.00");
        assert_eq!(format_price(1234.5), "1,234.50");
        assert_eq!(format_price(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn test_category_kind_mapping() {
        assert_eq!(CategoryKind::from_name("Shoes"), CategoryKind::Shoes);
        assert_eq!(CategoryKind::from_name("Gadgets"), CategoryKind::Other);
    }

    #[test]
    fn test_product_decodes_sparse_record() {
        // Records without price/description/category/images must still decode
        let json = r#"{"id": 7, "title": "Bare"}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, 7);
        assert_eq!(p.price, 0.0);
        assert_eq!(p.description, "");
        assert!(p.category.is_none());
        assert!(p.images.is_empty());
        assert_eq!(p.category_name(), "N/A");
    }

    #[test]
    fn test_patch_serializes_category_id_camel_case() {
        let patch = ProductPatch {
            title: "New".to_string(),
            price: 9.5,
            description: "d".to_string(),
            category_id: Some(4),
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["categoryId"], 4);
        assert!(json.get("category_id").is_none());
    }
}
