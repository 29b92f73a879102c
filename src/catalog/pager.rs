// Page-button window generation
//
// Derives the bounded set of page-number controls shown around the current
// page: a window of at most 5 numbered buttons centered on the current page,
// with the first and last page always reachable and ellipses marking gaps.

/// One control in the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Number(usize),
    Ellipsis,
}

/// Width of the numbered window around the current page
const WINDOW: usize = 5;

/// Build the page-button set for `current` of `total` pages.
///
/// `current` is clamped into `[1, total]` first, so callers can pass a stale
/// page number without producing an out-of-range button.
pub fn page_controls(current: usize, total: usize) -> Vec<PageControl> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    if total <= WINDOW {
        return (1..=total).map(PageControl::Number).collect();
    }

    // Center the window on the current page, then clamp it into range
    let mut start = current.saturating_sub(WINDOW / 2).max(1);
    if start + WINDOW - 1 > total {
        start = total - WINDOW + 1;
    }
    let end = start + WINDOW - 1;

    let mut controls = Vec::new();
    if start > 1 {
        controls.push(PageControl::Number(1));
        if start > 2 {
            controls.push(PageControl::Ellipsis);
        }
    }
    controls.extend((start..=end).map(PageControl::Number));
    if end < total {
        if end < total - 1 {
            controls.push(PageControl::Ellipsis);
        }
        controls.push(PageControl::Number(total));
    }

    controls
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageControl::{Ellipsis, Number};

    #[test]
    fn test_window_centered_with_both_ellipses() {
        // 20 pages, standing on page 10: 1 … 8 9 10 11 12 … 20
        assert_eq!(
            page_controls(10, 20),
            vec![
                Number(1),
                Ellipsis,
                Number(8),
                Number(9),
                Number(10),
                Number(11),
                Number(12),
                Ellipsis,
                Number(20),
            ]
        );
    }

    #[test]
    fn test_few_pages_show_all_buttons() {
        assert_eq!(page_controls(1, 1), vec![Number(1)]);
        assert_eq!(
            page_controls(2, 4),
            vec![Number(1), Number(2), Number(3), Number(4)]
        );
        assert_eq!(
            page_controls(3, 5),
            vec![Number(1), Number(2), Number(3), Number(4), Number(5)]
        );
    }

    #[test]
    fn test_window_pinned_at_start() {
        assert_eq!(
            page_controls(1, 20),
            vec![
                Number(1),
                Number(2),
                Number(3),
                Number(4),
                Number(5),
                Ellipsis,
                Number(20),
            ]
        );
        // Page 3 still fits in the left-pinned window
        assert_eq!(page_controls(3, 20)[0], Number(1));
        assert!(!page_controls(3, 20).contains(&Number(7)));
    }

    #[test]
    fn test_window_pinned_at_end() {
        assert_eq!(
            page_controls(20, 20),
            vec![
                Number(1),
                Ellipsis,
                Number(16),
                Number(17),
                Number(18),
                Number(19),
                Number(20),
            ]
        );
    }

    #[test]
    fn test_adjacent_edge_has_no_ellipsis() {
        // Window [2..6]: page 1 adjoins the window, so no left ellipsis
        assert_eq!(
            page_controls(4, 20),
            vec![
                Number(1),
                Number(2),
                Number(3),
                Number(4),
                Number(5),
                Number(6),
                Ellipsis,
                Number(20),
            ]
        );
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        assert_eq!(page_controls(99, 6).last(), Some(&Number(6)));
        assert_eq!(page_controls(0, 6).first(), Some(&Number(1)));
    }
}
