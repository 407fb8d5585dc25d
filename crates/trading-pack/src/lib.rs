//! Typed request builders and response views for the eBay Trading API.
//!
//! The crate sits between caller code and a [`Transport`] that owns
//! authentication, XML and HTTP. Requests are validated when built, sent
//! through a [`TradingSession`], and the loosely-typed response tree is read
//! back through views such as [`ItemView`], [`CategoryTree`] and
//! [`PaginatedResultSet`].

pub mod calls;
pub mod category;
pub mod error;
pub mod item;
pub mod normalize;
pub mod pagination;
pub mod params;
pub mod response;
pub mod transport;

pub use calls::{
    CategoriesResponse, CategorySpecificsResponse, GetCategories, GetCategorySpecifics, GetItem,
    GetSellerEvents, GetSellerList, GetUnsoldItems, GetUser, ItemPage, ItemResponse,
    Recommendation, SellerEventsPage, SellerListPage, UnsoldItemsPage, UserResponse, UserView,
};
pub use category::{CategoryRecord, CategoryTree};
pub use error::{BoxError, PackError};
pub use item::{
    ItemStatus, ItemView, ListingDuration, PromotionalSale, SpecificValue, TimeLeft, Variation,
};
pub use pagination::{PaginatedResultSet, PaginationLayout};
pub use params::{BasedOn, EventType, Granularity, SortOrder, TimeWindow};
pub use response::{Ack, ApiMessage, RawResponse, Severity};
pub use transport::{
    CallOptions, CallParams, FieldHints, ParamValue, TradingCall, TradingSession, Transport,
};
pub use trading_pack_core::{ApiContext, Environment, Money};
