use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use trading_pack_core::ApiContext;

use crate::normalize::{
    bool_at, decimal_at, i64_at, lookup, sequence_at, str_at, time_at, to_string,
};
use crate::response::RawResponse;
use crate::transport::{CallParams, FieldHints, TradingCall};

const USER_KNOWN_ARRAYS: &[&str] = &[
    "charity_affiliation_detail",
    "site",
    "skype_id",
    "supported_site",
    "top_rated_program",
    "user_subscription",
];

const USER_SKIP_TYPE_CASTING: &[&str] = &[
    "charity_id",
    "city_name",
    "international_street",
    "phone",
    "postal_code",
    "name",
    "skype_id",
    "street",
    "street1",
    "street2",
    "user_id",
    "vat_id",
];

/// Account details for a user; the token owner when no user id is given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetUser {
    user_id: Option<String>,
    item_id: Option<i64>,
    extra_hints: FieldHints,
}

impl GetUser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    /// An item the requesting user has a transaction with; unlocks the other
    /// party's contact details.
    #[must_use]
    pub fn with_item_id(mut self, item_id: i64) -> Self {
        self.item_id = Some(item_id);
        self
    }

    #[must_use]
    pub fn with_hints(mut self, hints: FieldHints) -> Self {
        self.extra_hints = hints;
        self
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    #[must_use]
    pub fn item_id(&self) -> Option<i64> {
        self.item_id
    }
}

impl TradingCall for GetUser {
    const NAME: &'static str = "GetUser";
    type Output = UserResponse;

    fn params(&self, _context: &ApiContext) -> CallParams {
        CallParams::new()
            .field_opt("UserID", self.user_id.as_deref())
            .field_opt("ItemID", self.item_id)
    }

    fn field_hints(&self) -> FieldHints {
        FieldHints::new()
            .with_known_arrays(USER_KNOWN_ARRAYS.iter().copied())
            .with_skip_type_casting(USER_SKIP_TYPE_CASTING.iter().copied())
            .merged(&self.extra_hints)
    }

    fn finish(self, response: RawResponse) -> UserResponse {
        let user = UserView::new(
            lookup(response.tree(), &["user"])
                .cloned()
                .unwrap_or_default(),
        );
        UserResponse {
            request: self,
            response,
            user,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserResponse {
    request: GetUser,
    response: RawResponse,
    user: UserView,
}

impl UserResponse {
    #[must_use]
    pub fn request(&self) -> &GetUser {
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

    /// User id as reported by the response, which also resolves the token
    /// owner when the request named no user.
    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.user.user_id()
    }

    #[must_use]
    pub fn user(&self) -> &UserView {
        &self.user
    }
}

/// Read-only view over the `user` mapping of a `GetUser` response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserView {
    data: Value,
}

impl UserView {
    #[must_use]
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        str_at(&self.data, &["user_id"])
    }

    /// Only returned to the user themself or a transaction partner.
    #[must_use]
    pub fn email(&self) -> Option<String> {
        str_at(&self.data, &["email"]).filter(|email| email != "Invalid Request")
    }

    #[must_use]
    pub fn feedback_score(&self) -> Option<i64> {
        i64_at(&self.data, &["feedback_score"])
    }

    #[must_use]
    pub fn positive_feedback_percent(&self) -> Option<Decimal> {
        decimal_at(&self.data, &["positive_feedback_percent"])
    }

    #[must_use]
    pub fn registration_date(&self) -> Option<DateTime<Utc>> {
        time_at(&self.data, &["registration_date"])
    }

    /// Registration site, e.g. `UK`. Decoded as a list, so the first
    /// entry is taken.
    #[must_use]
    pub fn site(&self) -> Option<String> {
        sequence_at(&self.data, &["site"])
            .into_iter()
            .find_map(to_string)
    }

    /// Account status, e.g. `Confirmed`.
    #[must_use]
    pub fn status(&self) -> Option<String> {
        str_at(&self.data, &["status"])
    }

    #[must_use]
    pub fn is_store_owner(&self) -> bool {
        bool_at(&self.data, &["seller_info", "store_owner"]).unwrap_or(false)
    }

    #[must_use]
    pub fn store_url(&self) -> Option<String> {
        str_at(&self.data, &["seller_info", "store_url"])
    }
}
