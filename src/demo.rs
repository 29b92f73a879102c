// Demo mode: load a bundled sample catalog instead of hitting the network
//
// Useful for showcasing the dashboard offline and for exercising the full
// edit round-trip without a writable backend: in demo mode the save path
// short-circuits to a locally patched product delivered through the same
// channel a real response would use.
//
// Run with: STOCKPIT_DEMO=1 cargo run --release

use crate::catalog::{Category, Product};
use crate::events::AppEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

/// Deliver the sample catalog after a short delay, as a real fetch would
pub async fn run_demo(tx: mpsc::Sender<AppEvent>) {
    // Brief delay so the loading screen is visible
    sleep(Duration::from_millis(600)).await;

    let _ = tx
        .send(AppEvent::CatalogLoaded {
            products: sample_products(),
        })
        .await;
}

/// A small catalog covering the messy shapes the real API serves:
/// bracket-wrapped image URLs, missing categories, zero prices.
pub fn sample_products() -> Vec<Product> {
    let category = |id: u64, name: &str| {
        Some(Category {
            id: Some(id),
            name: name.to_string(),
            image: Some(format!("https://placeimg.com/640/480/cat{}", id)),
        })
    };

    vec![
        Product {
            id: 1,
            title: "Classic Red Pullover Hoodie".to_string(),
            price: 10.0,
            description: "Cozy fleece-lined hoodie with a kangaroo pocket.".to_string(),
            category: category(1, "Clothes"),
            images: vec![
                "[\"https://placeimg.com/640/480/hoodie-1\"".to_string(),
                "\"https://placeimg.com/640/480/hoodie-2\"]".to_string(),
            ],
        },
        Product {
            id: 2,
            title: "Wireless Over-Ear Headphones".to_string(),
            price: 1249.99,
            description: "Noise cancelling, 30 hour battery, \"studio\" tuning.".to_string(),
            category: category(2, "Electronics"),
            images: vec!["https://placeimg.com/640/480/headphones".to_string()],
        },
        Product {
            id: 3,
            title: "Oak Writing Desk".to_string(),
            price: 320.5,
            description: "Solid oak desk.\nTwo drawers, cable grommet.".to_string(),
            category: category(3, "Furniture"),
            images: vec!["not-a-url".to_string()],
        },
        Product {
            id: 4,
            title: "Trail Running Shoes".to_string(),
            price: 89.0,
            description: "Grippy outsole for wet terrain.".to_string(),
            category: category(4, "Shoes"),
            images: vec!["https://placeimg.com/640/480/shoes".to_string()],
        },
        Product {
            id: 5,
            title: "Mystery Grab Bag".to_string(),
            price: 0.0,
            description: String::new(),
            category: None,
            images: Vec::new(),
        },
        Product {
            id: 6,
            title: "Canvas Tote Bag".to_string(),
            price: 12.0,
            description: "Everyday carry tote.".to_string(),
            category: category(5, "Miscellaneous"),
            images: vec!["'https://placeimg.com/640/480/tote'".to_string()],
        },
        Product {
            id: 7,
            title: "Mechanical Keyboard".to_string(),
            price: 159.0,
            description: "Hot-swappable switches, PBT keycaps.".to_string(),
            category: category(2, "Electronics"),
            images: vec!["https://placeimg.com/640/480/keyboard".to_string()],
        },
        Product {
            id: 8,
            title: "Linen Summer Shirt".to_string(),
            price: 45.0,
            description: "Breathable linen blend.".to_string(),
            category: category(1, "Clothes"),
            images: vec!["https://placeimg.com/640/480/shirt".to_string()],
        },
        Product {
            id: 9,
            title: "Walnut Bookshelf".to_string(),
            price: 210.0,
            description: "Five shelves, wall anchor included.".to_string(),
            category: category(3, "Furniture"),
            images: vec!["https://placeimg.com/640/480/shelf".to_string()],
        },
        Product {
            id: 10,
            title: "Leather Chelsea Boots".to_string(),
            price: 145.0,
            description: "Full-grain leather, elastic side panels.".to_string(),
            category: category(4, "Shoes"),
            images: vec!["https://placeimg.com/640/480/boots".to_string()],
        },
        Product {
            id: 11,
            title: "Ceramic Pour-Over Set".to_string(),
            price: 38.5,
            description: "Dripper, carafe and two cups.".to_string(),
            category: None,
            images: vec!["https://placeimg.com/640/480/coffee".to_string()],
        },
        Product {
            id: 12,
            title: "Smart LED Bulb 4-Pack".to_string(),
            price: 49.99,
            description: "Tunable white and color.".to_string(),
            category: category(2, "Electronics"),
            images: vec!["https://placeimg.com/640/480/bulbs".to_string()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_spans_multiple_pages() {
        // More than one default page, so pagination is visible in demo mode
        assert!(sample_products().len() > crate::catalog::store::DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_sample_ids_are_unique() {
        let mut ids: Vec<u64> = sample_products().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), sample_products().len());
    }
}
