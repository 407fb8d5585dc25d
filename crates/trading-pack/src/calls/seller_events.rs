use chrono::{DateTime, Utc};
use trading_pack_core::ApiContext;

use crate::calls::{item_hints, ItemPage};
use crate::error::PackError;
use crate::item::ItemView;
use crate::pagination::{PageRequest, PaginatedResultSet, PaginationLayout};
use crate::params::{format_api_time, EventType, TimeWindow, PER_PAGE_DEFAULT};
use crate::response::RawResponse;
use crate::transport::{CallParams, FieldHints, TradingCall};

/// Listings that were modified, started or ended inside a time range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSellerEvents {
    event_type: EventType,
    window: TimeWindow,
    extra_hints: FieldHints,
}

/// The whole result of one `GetSellerEvents` call; `has_more_items` is
/// always `false`.
pub type SellerEventsPage = ItemPage<GetSellerEvents>;

impl GetSellerEvents {
    /// # Errors
    ///
    /// Returns [`PackError::Validation`] if `from` is after `to`.
    pub fn new(
        event_type: EventType,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Self, PackError> {
        Ok(Self {
            event_type,
            window: TimeWindow::new(from, to)?,
            extra_hints: FieldHints::default(),
        })
    }

    /// Like [`Self::new`] with the event type given as `modified`,
    /// `started` or `ended`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Validation`] for any other event type, or if
    /// `from` is after `to`.
    pub fn parse(event_type: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, PackError> {
        Self::new(event_type.parse()?, from, to)
    }

    #[must_use]
    pub fn with_hints(mut self, hints: FieldHints) -> Self {
        self.extra_hints = hints;
        self
    }

    #[must_use]
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    #[must_use]
    pub fn time_from(&self) -> DateTime<Utc> {
        self.window.from()
    }

    #[must_use]
    pub fn time_to(&self) -> DateTime<Utc> {
        self.window.to()
    }
}

impl TradingCall for GetSellerEvents {
    const NAME: &'static str = "GetSellerEvents";
    type Output = SellerEventsPage;

    fn params(&self, _context: &ApiContext) -> CallParams {
        let prefix = self.event_type.element_prefix();
        CallParams::new()
            .field(&format!("{prefix}From"), format_api_time(self.window.from()))
            .field(&format!("{prefix}To"), format_api_time(self.window.to()))
            .field("IncludeWatchCount", "true")
            .field("DetailLevel", "ReturnAll")
    }

    fn field_hints(&self) -> FieldHints {
        item_hints(&["item"], &self.extra_hints)
    }

    fn finish(self, response: RawResponse) -> SellerEventsPage {
        let page = PaginatedResultSet::from_response(
            &response,
            &PaginationLayout::SELLER_EVENTS,
            PageRequest {
                page_number: 1,
                per_page: PER_PAGE_DEFAULT,
            },
            ItemView::new,
        );
        ItemPage::new(self, response, page)
    }
}
