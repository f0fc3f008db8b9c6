//! Page-count arithmetic and pagination control layout.
//!
//! The controller never clamps a requested page: the data layer's echoed
//! page index is the rendered truth, which keeps client and server from
//! drifting on what "current page" means.

use serde::{Deserialize, Serialize};

/// Number of pages needed for `total` records at `page_size` per page.
///
/// Zero totals produce zero pages; the empty-result state owns that case.
pub fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as u64) as u32
}

/// One renderable element of the pagination control row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageItem {
    Previous { enabled: bool },
    /// Addressable page. `index` is zero-based; the label shown is `index + 1`.
    Page { index: u32, selected: bool },
    /// Marker for an elided run of pages ("...").
    Break,
    Next { enabled: bool },
}

/// Lay out the pagination controls for `page_count` pages with the given
/// current (zero-based) index.
///
/// Returns an empty layout for zero or one page: the control row is not
/// rendered at all in those cases, not merely disabled. Otherwise `range`
/// pages are kept visible around the current index and `margin` pages at
/// each end, with break markers covering each elided run.
pub fn build_controls(page_count: u32, current: u32, range: u32, margin: u32) -> Vec<PageItem> {
    if page_count <= 1 {
        return Vec::new();
    }

    let range = range.max(1);
    let mut window_start = current.saturating_sub((range - 1) / 2);
    let mut window_end = window_start + range - 1;
    if window_end >= page_count {
        window_end = page_count - 1;
        window_start = window_end.saturating_sub(range - 1);
    }

    let mut items = Vec::with_capacity(page_count as usize + 4);
    items.push(PageItem::Previous {
        enabled: current > 0,
    });

    let mut in_gap = false;
    for index in 0..page_count {
        let in_margin = index < margin || index >= page_count - margin;
        let in_window = index >= window_start && index <= window_end;
        if in_margin || in_window {
            items.push(PageItem::Page {
                index,
                selected: index == current,
            });
            in_gap = false;
        } else if !in_gap {
            items.push(PageItem::Break);
            in_gap = true;
        }
    }

    items.push(PageItem::Next {
        enabled: current + 1 < page_count,
    });
    items
}
