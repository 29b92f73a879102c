// Catalog module - the client-side data view pipeline
//
// models:  wire types for the remote API plus display helpers
// store:   authoritative collection + derived filtered/sorted view
// pager:   page-button window derivation
// export:  CSV export of the current view

pub mod export;
pub mod models;
pub mod pager;
pub mod store;

pub use models::{clean_image_url, format_price, Category, CategoryKind, Product, ProductPatch};
pub use pager::{page_controls, PageControl};
pub use store::{Page, ProductStore, SortDirection, SortField, SortSpec};
