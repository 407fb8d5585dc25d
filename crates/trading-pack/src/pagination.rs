//! One page of items from a paginated list call.
//!
//! Where the pagination block lives, and how "more pages" is signalled,
//! differs per call family. That difference is captured as data in a
//! [`PaginationLayout`] rather than per-call code.

use serde_json::Value;

use crate::item::ItemView;
use crate::normalize::{as_sequence, count_at, find_key, lookup, to_bool, to_i64};
use crate::response::RawResponse;

/// Where the current page number comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumberSource {
    /// First `page_number` found anywhere in the response.
    Response,
    /// The page number that was requested; the response does not carry one.
    Requested,
}

/// How a layout decides whether further pages exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoreItemsSource {
    /// Boolean flag stored under this key anywhere in the response.
    Flag(&'static str),
    /// `page_number < total_pages`.
    PageCount,
    /// The call has no paging arguments, so there is never a next page.
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationLayout {
    /// Path to the block holding `total_number_of_entries` and
    /// `total_number_of_pages`.
    pub path: &'static [&'static str],
    /// Path to the item sequence. The first key is searched for anywhere in
    /// the response; the rest must follow it directly.
    pub items_path: &'static [&'static str],
    pub page_number_source: PageNumberSource,
    pub more_items_source: MoreItemsSource,
}

impl PaginationLayout {
    /// `pagination_result` at the root, paged by page count.
    pub const ROOT: Self = Self {
        path: &["pagination_result"],
        items_path: &["item_array", "item"],
        page_number_source: PageNumberSource::Response,
        more_items_source: MoreItemsSource::PageCount,
    };

    /// `GetSellerEvents` returns everything in one response.
    pub const SELLER_EVENTS: Self = Self {
        more_items_source: MoreItemsSource::Never,
        ..Self::ROOT
    };

    pub const SELLER_LIST: Self = Self {
        path: &["pagination_result"],
        items_path: &["item_array", "item"],
        page_number_source: PageNumberSource::Response,
        more_items_source: MoreItemsSource::Flag("has_more_items"),
    };

    /// `GetMyeBaySelling` paginates per container and echoes no page number.
    pub const UNSOLD_LIST: Self = Self {
        path: &["unsold_list", "pagination_result"],
        items_path: &["unsold_list", "item_array", "item"],
        page_number_source: PageNumberSource::Requested,
        more_items_source: MoreItemsSource::PageCount,
    };

    fn items<'a>(&self, tree: &'a Value) -> Vec<&'a Value> {
        let Some((first, rest)) = self.items_path.split_first() else {
            return Vec::new();
        };
        let container = lookup(tree, &[*first]).or_else(|| find_key(tree, first));
        as_sequence(container.and_then(|found| lookup(found, rest)))
    }

    fn count(&self, tree: &Value, key: &str) -> Option<u32> {
        let block = lookup(tree, self.path)?;
        lookup(block, &[key])?;
        Some(count_at(block, &[key]))
    }
}

/// Page size and number the caller asked for, after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: u32,
    pub per_page: u32,
}

/// `ceil(total_entries / per_page)`; zero when `per_page` is zero.
#[must_use]
pub fn total_pages_for(total_entries: u32, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    total_entries.div_ceil(per_page)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResultSet {
    page_number: u32,
    per_page: u32,
    total_entries: u32,
    total_pages: u32,
    has_more_items: bool,
    items: Vec<ItemView>,
}

impl PaginatedResultSet {
    /// Reads one page out of `response` according to `layout`, wrapping each
    /// item mapping with `to_item`.
    #[must_use]
    pub fn from_response(
        response: &RawResponse,
        layout: &PaginationLayout,
        request: PageRequest,
        to_item: fn(Value) -> ItemView,
    ) -> Self {
        let tree = response.tree();

        let page_number = match layout.page_number_source {
            PageNumberSource::Requested => request.page_number,
            PageNumberSource::Response => find_key(tree, "page_number")
                .and_then(to_i64)
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n >= 1)
                .unwrap_or(request.page_number),
        };

        let total_entries = layout.count(tree, "total_number_of_entries").unwrap_or(0);
        let total_pages = layout
            .count(tree, "total_number_of_pages")
            .unwrap_or_else(|| total_pages_for(total_entries, request.per_page));

        let has_more_items = match layout.more_items_source {
            MoreItemsSource::Flag(key) => find_key(tree, key).and_then(to_bool).unwrap_or(false),
            MoreItemsSource::PageCount => page_number < total_pages,
            MoreItemsSource::Never => false,
        };

        let items: Vec<ItemView> = layout
            .items(tree)
            .into_iter()
            .map(|item| to_item(item.clone()))
            .collect();

        tracing::debug!(
            page_number,
            total_pages,
            total_entries,
            items = items.len(),
            "parsed result page"
        );

        Self {
            page_number,
            per_page: request.per_page,
            total_entries,
            total_pages,
            has_more_items,
            items,
        }
    }

    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    #[must_use]
    pub fn total_entries(&self) -> u32 {
        self.total_entries
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub fn has_more_items(&self) -> bool {
        self.has_more_items
    }

    /// Items on this page only.
    pub fn items(&self) -> std::slice::Iter<'_, ItemView> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for PaginatedResultSet {
    type Item = ItemView;
    type IntoIter = std::vec::IntoIter<ItemView>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a PaginatedResultSet {
    type Item = &'a ItemView;
    type IntoIter = std::slice::Iter<'a, ItemView>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
