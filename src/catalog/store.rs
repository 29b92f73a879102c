// Product store - the single source of truth for catalog data
//
// Holds the authoritative `all` collection from the last successful fetch
// plus a derived `view` (filtered and/or sorted projection). All view state
// (search term, sort spec, page, page size) lives here as explicit fields,
// so the TUI can stay a thin rendering layer and the whole pipeline can be
// tested headless.

use super::models::{Product, ProductPatch};

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Price,
}

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            SortField::Title => "Title",
            SortField::Price => "Price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown in the column header
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active single-key sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// One derived page of the current view, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Product>,
    /// Clamped 1-based page number this slice corresponds to
    pub number: usize,
    /// 1-based inclusive display range; 0/0 when the view is empty
    pub start_index: usize,
    pub end_index: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

/// In-memory catalog with a derived, filterable/sortable view
#[derive(Debug, Clone)]
pub struct ProductStore {
    all: Vec<Product>,
    view: Vec<Product>,
    search_term: String,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
}

impl ProductStore {
    pub fn new() -> Self {
        Self {
            all: Vec::new(),
            view: Vec::new(),
            search_term: String::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Replace the whole collection after a successful fetch.
    ///
    /// A fresh load invalidates all derived view state: the view resets to
    /// the full collection, pagination goes back to page 1, and any active
    /// search or sort is cleared.
    pub fn load(&mut self, products: Vec<Product>) {
        self.view = products.clone();
        self.all = products;
        self.search_term.clear();
        self.sort = None;
        self.page = 1;
    }

    /// Filter by case-insensitive substring match against the title.
    ///
    /// Always recomputes from `all`, never from the previous view, so
    /// narrowing and widening the term both behave. An empty term restores a
    /// copy of the full collection. Clears the active sort and resets to
    /// page 1. (Sorting, by contrast, preserves the search term.)
    pub fn apply_filter(&mut self, term: &str) {
        self.search_term = term.to_string();
        let needle = term.to_lowercase();

        self.view = if needle.is_empty() {
            self.all.clone()
        } else {
            self.all
                .iter()
                .filter(|p| p.title.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        };

        self.sort = None;
        self.page = 1;
    }

    /// Sort the current view by `field`.
    ///
    /// Selecting the active field flips its direction; selecting a new field
    /// starts ascending. The sort is stable, so equal keys keep their prior
    /// relative order. Operates on the view (composes with an active
    /// filter) and resets to page 1.
    pub fn apply_sort(&mut self, field: SortField) {
        let direction = match self.sort {
            Some(spec) if spec.field == field => spec.direction.flip(),
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortSpec { field, direction });

        // The comparator itself carries the direction; reversing a stably
        // sorted vec would flip the relative order of equal keys too.
        match (field, direction) {
            (SortField::Title, SortDirection::Ascending) => self
                .view
                .sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
            (SortField::Title, SortDirection::Descending) => self
                .view
                .sort_by(|a, b| b.title.to_lowercase().cmp(&a.title.to_lowercase())),
            (SortField::Price, SortDirection::Ascending) => {
                self.view.sort_by(|a, b| a.price.total_cmp(&b.price))
            }
            (SortField::Price, SortDirection::Descending) => {
                self.view.sort_by(|a, b| b.price.total_cmp(&a.price))
            }
        }

        self.page = 1;
    }

    /// Merge a confirmed edit into the matching product, in place.
    ///
    /// Touches only the patched fields; position in both `all` and `view`
    /// is preserved (no re-sort, no re-filter - the row stays where the
    /// user was looking at it until the next explicit interaction).
    pub fn apply_edit(&mut self, id: u64, patch: &ProductPatch) {
        for product in self
            .all
            .iter_mut()
            .chain(self.view.iter_mut())
            .filter(|p| p.id == id)
        {
            product.title = patch.title.clone();
            product.price = patch.price;
            product.description = patch.description.clone();
        }
    }

    /// Derive the current page of the view
    pub fn current_page(&self) -> Page {
        let total_count = self.view.len();
        let total_pages = total_pages(total_count, self.page_size);
        let number = self.page.clamp(1, total_pages);

        let start = (number - 1) * self.page_size;
        let end = (start + self.page_size).min(total_count);

        let (start_index, end_index, items) = if total_count == 0 {
            (0, 0, Vec::new())
        } else {
            (start + 1, end, self.view[start..end].to_vec())
        };

        Page {
            items,
            number,
            start_index,
            end_index,
            total_count,
            total_pages,
        }
    }

    /// Jump to a page, clamped into the valid range
    pub fn set_page(&mut self, number: usize) {
        let total = total_pages(self.view.len(), self.page_size);
        self.page = number.clamp(1, total);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Change rows-per-page and reset to page 1
    pub fn set_page_size(&mut self, size: usize) {
        if size == 0 {
            return;
        }
        self.page_size = size;
        self.page = 1;
    }

    /// Look up a product by id in the full collection
    pub fn find(&self, id: u64) -> Option<&Product> {
        self.all.iter().find(|p| p.id == id)
    }

    /// The full filtered/sorted view (for export, which ignores pagination)
    pub fn view(&self) -> &[Product] {
        &self.view
    }

    pub fn all_count(&self) -> usize {
        self.all.len()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Category;

    fn product(id: u64, title: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            description: format!("{} description", title),
            category: Some(Category {
                id: Some(1),
                name: "Shoes".to_string(),
                image: None,
            }),
            images: Vec::new(),
        }
    }

    fn loaded_store(products: Vec<Product>) -> ProductStore {
        let mut store = ProductStore::new();
        store.load(products);
        store
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_load_resets_view_state() {
        let mut store = loaded_store(vec![product(1, "A", 1.0), product(2, "B", 2.0)]);
        store.apply_filter("a");
        store.apply_sort(SortField::Price);
        store.set_page_size(1);
        store.set_page(2);

        store.load(vec![product(3, "C", 3.0)]);
        assert_eq!(store.search_term(), "");
        assert!(store.sort().is_none());
        assert_eq!(store.current_page().number, 1);
        assert_eq!(ids(store.view()), vec![3]);
    }

    #[test]
    fn test_sort_price_toggles_direction() {
        // [Shoe A @10, Shoe B @5] sorted by price -> [2,1], sorted again -> [1,2]
        let mut store = loaded_store(vec![product(1, "Shoe A", 10.0), product(2, "Shoe B", 5.0)]);

        store.apply_sort(SortField::Price);
        assert_eq!(ids(store.view()), vec![2, 1]);

        store.apply_sort(SortField::Price);
        assert_eq!(ids(store.view()), vec![1, 2]);
    }

    #[test]
    fn test_sort_new_field_resets_to_ascending() {
        let mut store = loaded_store(vec![product(1, "B", 1.0), product(2, "A", 2.0)]);
        store.apply_sort(SortField::Title);
        store.apply_sort(SortField::Title); // Title descending
        store.apply_sort(SortField::Price); // New field: back to ascending
        let spec = store.sort().unwrap();
        assert_eq!(spec.field, SortField::Price);
        assert_eq!(spec.direction, SortDirection::Ascending);
        assert_eq!(ids(store.view()), vec![1, 2]);
    }

    #[test]
    fn test_sort_title_is_case_insensitive() {
        let mut store = loaded_store(vec![
            product(1, "banana", 1.0),
            product(2, "Apple", 2.0),
            product(3, "cherry", 3.0),
        ]);
        store.apply_sort(SortField::Title);
        assert_eq!(ids(store.view()), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_prices() {
        let mut store = loaded_store(vec![
            product(1, "A", 5.0),
            product(2, "B", 3.0),
            product(3, "C", 5.0),
            product(4, "D", 3.0),
        ]);
        store.apply_sort(SortField::Price);
        // Equal-price elements keep their original relative order
        assert_eq!(ids(store.view()), vec![2, 4, 1, 3]);

        // Toggling to descending moves the price groups, not the ties:
        // within each group the prior relative order survives
        store.apply_sort(SortField::Price);
        assert_eq!(ids(store.view()), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_descending_sort_keeps_tie_order() {
        let mut store = loaded_store(vec![
            product(1, "A", 5.0),
            product(2, "B", 9.0),
            product(3, "C", 5.0),
        ]);
        store.apply_sort(SortField::Price);
        assert_eq!(ids(store.view()), vec![1, 3, 2]);

        store.apply_sort(SortField::Price);
        // The tied pair (1, 3) must not swap on the way down
        assert_eq!(ids(store.view()), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_descending_reverses_distinct_prices() {
        let mut store = loaded_store(vec![
            product(1, "A", 3.0),
            product(2, "B", 1.0),
            product(3, "C", 2.0),
        ]);
        store.apply_sort(SortField::Price);
        let ascending = ids(store.view());
        store.apply_sort(SortField::Price);
        let descending = ids(store.view());
        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
    }

    #[test]
    fn test_sort_does_not_mutate_all() {
        let mut store = loaded_store(vec![product(1, "B", 2.0), product(2, "A", 1.0)]);
        store.apply_filter("");
        store.apply_sort(SortField::Title);
        assert_eq!(ids(store.view()), vec![2, 1]);
        // The authoritative collection keeps fetch order
        store.apply_filter("");
        assert_eq!(ids(store.view()), vec![1, 2]);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        // Both titles contain "Shoe"
        let mut store = loaded_store(vec![product(1, "Shoe A", 10.0), product(2, "Shoe B", 5.0)]);
        store.apply_filter("shoe");
        assert_eq!(store.view().len(), 2);

        store.apply_filter("zzz");
        assert_eq!(store.view().len(), 0);
        let page = store.current_page();
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!((page.start_index, page.end_index), (0, 0));
    }

    #[test]
    fn test_empty_filter_restores_full_view() {
        let mut store = loaded_store(vec![
            product(1, "A", 1.0),
            product(2, "B", 2.0),
            product(3, "C", 3.0),
        ]);
        store.apply_filter("b");
        store.apply_filter("");
        assert_eq!(ids(store.view()), vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_clears_sort_but_sort_keeps_filter() {
        // Deliberate asymmetry: a new search term drops the active sort,
        // while sorting composes with the filter.
        let mut store = loaded_store(vec![
            product(1, "Shoe A", 10.0),
            product(2, "Shoe B", 5.0),
            product(3, "Hat", 7.0),
        ]);

        store.apply_sort(SortField::Price);
        store.apply_filter("shoe");
        assert!(store.sort().is_none());
        assert_eq!(ids(store.view()), vec![1, 2]);

        store.apply_sort(SortField::Price);
        assert_eq!(store.search_term(), "shoe");
        assert_eq!(ids(store.view()), vec![2, 1]);
    }

    #[test]
    fn test_filter_always_recomputes_from_all() {
        let mut store = loaded_store(vec![product(1, "Shoe A", 1.0), product(2, "Hat", 2.0)]);
        store.apply_filter("shoe");
        assert_eq!(store.view().len(), 1);
        // Widening the term must see products the previous view excluded
        store.apply_filter("a");
        assert_eq!(store.view().len(), 2);
    }

    #[test]
    fn test_apply_edit_patches_only_target() {
        let mut store = loaded_store(vec![product(1, "A", 1.0), product(2, "B", 2.0)]);
        let before_other = store.find(2).unwrap().clone();

        let patch = ProductPatch {
            title: "A2".to_string(),
            price: 1.5,
            description: "updated".to_string(),
            category_id: None,
        };
        store.apply_edit(1, &patch);

        let edited = store.find(1).unwrap();
        assert_eq!(edited.title, "A2");
        assert_eq!(edited.price, 1.5);
        assert_eq!(edited.description, "updated");
        // Unpatched fields survive
        assert!(edited.category.is_some());
        // Untouched products are identical
        assert_eq!(store.find(2).unwrap(), &before_other);
    }

    #[test]
    fn test_apply_edit_updates_view_in_place() {
        let mut store = loaded_store(vec![
            product(1, "Shoe A", 10.0),
            product(2, "Shoe B", 5.0),
        ]);
        store.apply_sort(SortField::Price); // view order [2, 1]

        let patch = ProductPatch {
            title: "Shoe B".to_string(),
            price: 99.0, // would sort last, but position must not change
            description: "d".to_string(),
            category_id: None,
        };
        store.apply_edit(2, &patch);

        assert_eq!(ids(store.view()), vec![2, 1]);
        assert_eq!(store.view()[0].price, 99.0);
        assert_eq!(store.find(2).unwrap().price, 99.0);
    }

    #[test]
    fn test_page_slice_lengths() {
        // items.len() == min(P, C - (n-1)*P) for every in-range page
        let products: Vec<Product> = (1..=23)
            .map(|i| product(i, &format!("P{}", i), i as f64))
            .collect();
        for page_size in [1, 3, 10, 23, 50] {
            let mut store = loaded_store(products.clone());
            store.set_page_size(page_size);
            let total = store.current_page().total_pages;
            assert_eq!(total, 23_usize.div_ceil(page_size).max(1));
            for n in 1..=total {
                store.set_page(n);
                let page = store.current_page();
                assert_eq!(page.items.len(), page_size.min(23 - (n - 1) * page_size));
            }
        }
    }

    #[test]
    fn test_page_clamps_out_of_range() {
        let mut store = loaded_store(vec![product(1, "A", 1.0), product(2, "B", 2.0)]);
        store.set_page(99);
        assert_eq!(store.current_page().number, 1);

        store.set_page_size(1);
        store.set_page(99);
        assert_eq!(store.current_page().number, 2);

        store.prev_page();
        assert_eq!(store.current_page().number, 1);
        store.prev_page(); // already at the first page
        assert_eq!(store.current_page().number, 1);
    }

    #[test]
    fn test_page_display_indexes() {
        let products: Vec<Product> = (1..=12)
            .map(|i| product(i, &format!("P{}", i), i as f64))
            .collect();
        let mut store = loaded_store(products);
        store.next_page();

        let page = store.current_page();
        assert_eq!(page.number, 2);
        assert_eq!(page.start_index, 11);
        assert_eq!(page.end_index, 12);
        assert_eq!(page.total_count, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(ids(&page.items), vec![11, 12]);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let products: Vec<Product> = (1..=30)
            .map(|i| product(i, &format!("P{}", i), i as f64))
            .collect();
        let mut store = loaded_store(products);
        store.set_page(3);
        store.set_page_size(20);
        let page = store.current_page();
        assert_eq!(page.number, 1);
        assert_eq!(page.items.len(), 20);
    }
}
