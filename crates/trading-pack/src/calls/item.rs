use trading_pack_core::ApiContext;

use crate::calls::item_hints;
use crate::item::ItemView;
use crate::normalize::lookup;
use crate::response::RawResponse;
use crate::transport::{CallParams, FieldHints, TradingCall};

/// Full details of a single listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetItem {
    item_id: i64,
    include_description: bool,
    extra_hints: FieldHints,
}

impl GetItem {
    #[must_use]
    pub fn new(item_id: i64) -> Self {
        Self {
            item_id,
            include_description: false,
            extra_hints: FieldHints::default(),
        }
    }

    /// Also return the HTML description, which can be large.
    #[must_use]
    pub fn with_description(mut self, include: bool) -> Self {
        self.include_description = include;
        self
    }

    #[must_use]
    pub fn with_hints(mut self, hints: FieldHints) -> Self {
        self.extra_hints = hints;
        self
    }

    #[must_use]
    pub fn item_id(&self) -> i64 {
        self.item_id
    }

    #[must_use]
    pub fn include_description(&self) -> bool {
        self.include_description
    }
}

impl TradingCall for GetItem {
    const NAME: &'static str = "GetItem";
    type Output = ItemResponse;

    fn params(&self, _context: &ApiContext) -> CallParams {
        CallParams::new()
            .field("ItemID", self.item_id)
            .field("IncludeWatchCount", "true")
            .field("IncludeItemSpecifics", "true")
            .field_opt(
                "DetailLevel",
                self.include_description.then_some("ItemReturnDescription"),
            )
    }

    fn field_hints(&self) -> FieldHints {
        item_hints(&[], &self.extra_hints)
    }

    fn finish(self, response: RawResponse) -> ItemResponse {
        let item = if response.is_success() {
            lookup(response.tree(), &["item"])
                .cloned()
                .map(ItemView::new)
                .unwrap_or_default()
        } else {
            ItemView::default()
        };
        ItemResponse {
            request: self,
            response,
            item,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItemResponse {
    request: GetItem,
    response: RawResponse,
    item: ItemView,
}

impl ItemResponse {
    #[must_use]
    pub fn request(&self) -> &GetItem {
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

    /// The listing; empty when the call failed.
    #[must_use]
    pub fn item(&self) -> &ItemView {
        &self.item
    }

    #[must_use]
    pub fn into_item(self) -> ItemView {
        self.item
    }
}
