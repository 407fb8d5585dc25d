//! One module per Trading API call.
//!
//! Each request type implements [`crate::TradingCall`]: it validates and
//! clamps its arguments on construction, builds the ordered parameter tree,
//! and wraps the response in a call-specific output.

pub mod categories;
pub mod category_specifics;
pub mod item;
pub mod seller_events;
pub mod seller_list;
pub mod unsold_items;
pub mod user;

pub use categories::{CategoriesResponse, GetCategories};
pub use category_specifics::{CategorySpecificsResponse, GetCategorySpecifics, Recommendation};
pub use item::{GetItem, ItemResponse};
pub use seller_events::{GetSellerEvents, SellerEventsPage};
pub use seller_list::{GetSellerList, SellerListPage};
pub use unsold_items::{GetUnsoldItems, UnsoldItemsPage};
pub use user::{GetUser, UserResponse, UserView};

use crate::item::{ItemView, ITEM_KNOWN_ARRAYS, ITEM_SKIP_TYPE_CASTING};
use crate::pagination::PaginatedResultSet;
use crate::response::RawResponse;
use crate::transport::FieldHints;

/// Hints for calls whose responses carry item mappings, plus `additional`
/// container names and the caller's extras.
fn item_hints(additional: &[&str], extra: &FieldHints) -> FieldHints {
    FieldHints::new()
        .with_known_arrays(ITEM_KNOWN_ARRAYS.iter().copied())
        .with_known_arrays(additional.iter().copied())
        .with_skip_type_casting(ITEM_SKIP_TYPE_CASTING.iter().copied())
        .merged(extra)
}

/// A page of items returned by a list call, together with the request that
/// produced it.
#[derive(Debug, Clone)]
pub struct ItemPage<R> {
    request: R,
    response: RawResponse,
    page: PaginatedResultSet,
}

impl<R> ItemPage<R> {
    pub(crate) fn new(request: R, response: RawResponse, page: PaginatedResultSet) -> Self {
        Self {
            request,
            response,
            page,
        }
    }

    #[must_use]
    pub fn request(&self) -> &R {
        &self.request
    }

    #[must_use]
    pub fn response(&self) -> &RawResponse {
        &self.response
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response.is_success()
    }

    #[must_use]
    pub fn page(&self) -> &PaginatedResultSet {
        &self.page
    }

    #[must_use]
    pub fn into_page(self) -> PaginatedResultSet {
        self.page
    }

    pub fn items(&self) -> std::slice::Iter<'_, ItemView> {
        self.page.items()
    }

    #[must_use]
    pub fn has_more_items(&self) -> bool {
        self.page.has_more_items()
    }
}

impl<'a, R> IntoIterator for &'a ItemPage<R> {
    type Item = &'a ItemView;
    type IntoIter = std::slice::Iter<'a, ItemView>;

    fn into_iter(self) -> Self::IntoIter {
        self.page.items()
    }
}
