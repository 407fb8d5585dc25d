use trading_pack_core::ApiContext;

use crate::calls::{item_hints, ItemPage};
use crate::item::ItemView;
use crate::pagination::{PageRequest, PaginatedResultSet, PaginationLayout};
use crate::params::{
    clamp_days, clamp_page_number, clamp_per_page, UNSOLD_DAYS_DEFAULT, UNSOLD_DAYS_MAX,
};
use crate::response::RawResponse;
use crate::transport::{CallParams, FieldHints, TradingCall};

/// Containers of `GetMyeBaySelling` other than `UnsoldList`; each is
/// explicitly excluded from the response.
const EXCLUDED_LISTS: [&str; 6] = [
    "ActiveList",
    "BidList",
    "DeletedFromSoldList",
    "DeletedFromUnsoldList",
    "ScheduledList",
    "SoldList",
];

/// Listings that ended without selling, via `GetMyeBaySelling`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetUnsoldItems {
    page_number: u32,
    per_page: u32,
    duration_in_days: u32,
    extra_hints: FieldHints,
}

pub type UnsoldItemsPage = ItemPage<GetUnsoldItems>;

impl GetUnsoldItems {
    #[must_use]
    pub fn new(page_number: i64) -> Self {
        Self {
            page_number: clamp_page_number(page_number),
            per_page: clamp_per_page(None),
            duration_in_days: UNSOLD_DAYS_DEFAULT,
            extra_hints: FieldHints::default(),
        }
    }

    #[must_use]
    pub fn with_per_page(mut self, per_page: i64) -> Self {
        self.per_page = clamp_per_page(Some(per_page));
        self
    }

    /// How far back item end times may lie, clamped to `1..=60`.
    #[must_use]
    pub fn with_duration_in_days(mut self, days: i64) -> Self {
        self.duration_in_days = clamp_days(Some(days), UNSOLD_DAYS_DEFAULT, UNSOLD_DAYS_MAX);
        self
    }

    #[must_use]
    pub fn with_hints(mut self, hints: FieldHints) -> Self {
        self.extra_hints = hints;
        self
    }

    #[must_use]
    pub fn next_page(&self) -> Self {
        Self {
            page_number: self.page_number.saturating_add(1),
            ..self.clone()
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
    pub fn duration_in_days(&self) -> u32 {
        self.duration_in_days
    }
}

impl TradingCall for GetUnsoldItems {
    const NAME: &'static str = "GetMyeBaySelling";
    type Output = UnsoldItemsPage;

    fn params(&self, context: &ApiContext) -> CallParams {
        let unsold = CallParams::new()
            .field("Include", "true")
            .field("DurationInDays", self.duration_in_days)
            .nested(
                "Pagination",
                CallParams::new()
                    .field("EntriesPerPage", self.per_page)
                    .field("PageNumber", self.page_number),
            );
        EXCLUDED_LISTS.iter().fold(
            CallParams::new()
                .field("ErrorLanguage", &context.error_language)
                .field("WarningLevel", "High")
                .field("DetailLevel", "ReturnAll")
                .nested("UnsoldList", unsold),
            |params, list| params.nested(list, CallParams::new().field("Include", "false")),
        )
    }

    fn field_hints(&self) -> FieldHints {
        item_hints(
            &["item", "shipping_service_options", "variation"],
            &self.extra_hints,
        )
    }

    fn finish(self, response: RawResponse) -> UnsoldItemsPage {
        let page = PaginatedResultSet::from_response(
            &response,
            &PaginationLayout::UNSOLD_LIST,
            PageRequest {
                page_number: self.page_number,
                per_page: self.per_page,
            },
            ItemView::unsold,
        );
        ItemPage::new(self, response, page)
    }
}

impl UnsoldItemsPage {
    /// Total unsold listings across all pages.
    #[must_use]
    pub fn total_number_unsold(&self) -> u32 {
        self.page().total_entries()
    }
}
