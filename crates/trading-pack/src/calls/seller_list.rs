use chrono::{DateTime, Utc};
use trading_pack_core::ApiContext;

use crate::calls::{item_hints, ItemPage};
use crate::item::ItemView;
use crate::pagination::{PageRequest, PaginatedResultSet, PaginationLayout};
use crate::params::{
    clamp_days, clamp_page_number, clamp_per_page, format_api_time, BasedOn, Granularity,
    SortOrder, TimeWindow, SELLER_LIST_DAYS_DEFAULT, SELLER_LIST_DAYS_MAX,
};
use crate::response::RawResponse;
use crate::transport::{CallParams, FieldHints, TradingCall};

/// One page of a seller's listings inside a start- or end-time window.
///
/// Defaults: 100 per page, end-time basis sorted descending, a 30-day window
/// ending 30 days from now, `Coarse` granularity, and the seller owning the
/// auth token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSellerList {
    page_number: u32,
    per_page: u32,
    seller_id: Option<String>,
    based_on: BasedOn,
    sort: Option<SortOrder>,
    days: u32,
    time: Option<DateTime<Utc>>,
    granularity: Granularity,
    created_at: DateTime<Utc>,
    extra_hints: FieldHints,
}

pub type SellerListPage = ItemPage<GetSellerList>;

impl GetSellerList {
    #[must_use]
    pub fn new(page_number: i64) -> Self {
        Self {
            page_number: clamp_page_number(page_number),
            per_page: clamp_per_page(None),
            seller_id: None,
            based_on: BasedOn::default(),
            sort: None,
            days: SELLER_LIST_DAYS_DEFAULT,
            time: None,
            granularity: Granularity::default(),
            created_at: Utc::now(),
            extra_hints: FieldHints::default(),
        }
    }

    /// Snapped up to 25, 50, 100 or 200; see [`clamp_per_page`].
    #[must_use]
    pub fn with_per_page(mut self, per_page: i64) -> Self {
        self.per_page = clamp_per_page(Some(per_page));
        self
    }

    /// List another seller's items instead of the token owner's.
    #[must_use]
    pub fn with_seller_id(mut self, seller_id: &str) -> Self {
        let seller_id = seller_id.trim();
        self.seller_id = (!seller_id.is_empty()).then(|| seller_id.to_string());
        self
    }

    #[must_use]
    pub fn with_based_on(mut self, based_on: BasedOn) -> Self {
        self.based_on = based_on;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Window length, clamped to `1..=120`.
    #[must_use]
    pub fn with_days(mut self, days: i64) -> Self {
        self.days = clamp_days(Some(days), SELLER_LIST_DAYS_DEFAULT, SELLER_LIST_DAYS_MAX);
        self
    }

    /// Window anchor: its end for end-time lists, its start for start-time
    /// lists.
    #[must_use]
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    #[must_use]
    pub fn with_granularity(mut self, granularity: &str) -> Self {
        self.granularity = Granularity::parse(granularity);
        self
    }

    /// Instant the default window is computed from. Set on construction.
    #[must_use]
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.created_at = now;
        self
    }

    #[must_use]
    pub fn with_hints(mut self, hints: FieldHints) -> Self {
        self.extra_hints = hints;
        self
    }

    /// The same query for the following page.
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
    pub fn seller_id(&self) -> Option<&str> {
        self.seller_id.as_deref()
    }

    #[must_use]
    pub fn based_on(&self) -> BasedOn {
        self.based_on
    }

    /// Explicit sort order, else the basis default.
    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort.unwrap_or_else(|| self.based_on.default_sort())
    }

    #[must_use]
    pub fn days(&self) -> u32 {
        self.days
    }

    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    #[must_use]
    pub fn time_window(&self) -> TimeWindow {
        TimeWindow::seller_list(self.based_on, self.time, self.days, self.created_at)
    }
}

impl TradingCall for GetSellerList {
    const NAME: &'static str = "GetSellerList";
    type Output = SellerListPage;

    fn params(&self, context: &ApiContext) -> CallParams {
        let window = self.time_window();
        let (from_name, to_name) = match self.based_on {
            BasedOn::EndTime => ("EndTimeFrom", "EndTimeTo"),
            BasedOn::StartTime => ("StartTimeFrom", "StartTimeTo"),
        };
        CallParams::new()
            .field("ErrorLanguage", &context.error_language)
            .field("WarningLevel", "High")
            .field_opt("UserID", self.seller_id.as_deref())
            .field("GranularityLevel", self.granularity)
            .field("IncludeWatchCount", "true")
            .field("IncludeVariations", "true")
            .field(from_name, format_api_time(window.from()))
            .field(to_name, format_api_time(window.to()))
            .field("Sort", self.sort().code())
            .nested(
                "Pagination",
                CallParams::new()
                    .field("EntriesPerPage", self.per_page)
                    .field("PageNumber", self.page_number),
            )
    }

    fn field_hints(&self) -> FieldHints {
        item_hints(&["item"], &self.extra_hints)
    }

    fn finish(self, response: RawResponse) -> SellerListPage {
        let page = PaginatedResultSet::from_response(
            &response,
            &PaginationLayout::SELLER_LIST,
            PageRequest {
                page_number: self.page_number,
                per_page: self.per_page,
            },
            ItemView::new,
        );
        ItemPage::new(self, response, page)
    }
}
