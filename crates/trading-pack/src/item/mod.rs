//! Read-only view over one item mapping from `GetItem`, `GetSellerList`,
//! `GetSellerEvents` or `GetMyeBaySelling` responses.
//!
//! Every accessor derives its value from the backing mapping on demand; the
//! mapping itself is never mutated.

mod summary;
mod types;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use trading_pack_core::Money;

use crate::error::PackError;
use crate::normalize::{
    bool_at, count_at, i64_at, lookup, money_at, sequence_at, str_at, time_at, to_string,
};

pub use types::{ItemStatus, ListingDuration, PromotionalSale, SpecificValue, TimeLeft, Variation};

/// Field names that may repeat inside an item and must always be decoded as
/// sequences.
pub const ITEM_KNOWN_ARRAYS: &[&str] = &[
    "compatibility",
    "copyright",
    "cross_border_trade",
    "discount_profile",
    "ebay_picture_url",
    "exclude_ship_to_location",
    "external_picture_url",
    "gift_services",
    "international_shipping_service_option",
    "item_specifics",
    "listing_enhancement",
    "name_value_list",
    "payment_allowed_site",
    "payment_methods",
    "promoted_item",
    "picture_url",
    "shipping_service_options",
    "ship_to_location",
    "ship_to_locations",
    "skype_contact_option",
    "tax_jurisdiction",
    "value",
    "variation",
    "variation_specific_picture_set",
    "variation_specifics",
    "variation_specifics_set",
];

/// Item fields the transport must leave as strings.
pub const ITEM_SKIP_TYPE_CASTING: &[&str] = &["sku", "postal_code"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemView {
    data: Value,
    status_override: Option<ItemStatus>,
}

impl ItemView {
    #[must_use]
    pub fn new(data: Value) -> Self {
        Self {
            data,
            status_override: None,
        }
    }

    /// View whose status is always [`ItemStatus::Unsold`].
    #[must_use]
    pub fn unsold(data: Value) -> Self {
        Self {
            data,
            status_override: Some(ItemStatus::Unsold),
        }
    }

    /// The backing item mapping.
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// `true` when there is no item data at all, e.g. after a failed call.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.data {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    #[must_use]
    pub fn item_id(&self) -> Option<i64> {
        i64_at(&self.data, &["item_id"])
    }

    /// The seller's SKU, shown as "custom label" on some sites.
    #[must_use]
    pub fn sku(&self) -> Option<String> {
        str_at(&self.data, &["sku"])
    }

    #[must_use]
    pub fn title(&self) -> Option<String> {
        str_at(&self.data, &["title"])
    }

    /// Public listing URL.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        str_at(&self.data, &["listing_details", "view_item_url"])
    }

    /// Auctions are reported with the legacy listing type `Chinese`.
    #[must_use]
    pub fn is_auction(&self) -> bool {
        str_at(&self.data, &["listing_type"]).as_deref() == Some("Chinese")
    }

    #[must_use]
    pub fn is_fixed_price(&self) -> bool {
        !self.is_auction()
    }

    #[must_use]
    pub fn bid_count(&self) -> u32 {
        count_at(&self.data, &["selling_status", "bid_count"])
    }

    /// Current selling price; the discounted price while on promotion.
    #[must_use]
    pub fn current_price(&self) -> Option<Money> {
        money_at(&self.data, &["selling_status", "current_price"])
    }

    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        time_at(&self.data, &["listing_details", "start_time"])
    }

    #[must_use]
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        time_at(&self.data, &["listing_details", "end_time"])
    }

    #[must_use]
    pub fn has_ended(&self) -> bool {
        self.has_ended_at(Utc::now())
    }

    #[must_use]
    pub fn has_ended_at(&self, now: DateTime<Utc>) -> bool {
        self.end_time().is_some_and(|end| end < now)
    }

    /// # Errors
    ///
    /// Returns [`PackError::Data`] if the listing status is unrecognised.
    pub fn is_active(&self) -> Result<bool, PackError> {
        self.is_active_at(Utc::now())
    }

    /// Active status and an end time still in the future.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Data`] if the listing status is unrecognised.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> Result<bool, PackError> {
        if self.status()? != ItemStatus::Active {
            return Ok(false);
        }
        Ok(self.end_time().is_some_and(|end| end > now))
    }

    /// Selling status from `selling_status.listing_status`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Data`] if the status is missing or is not one of
    /// `Active`, `Completed` or `Ended`. An unknown value signals an API
    /// contract change, so it is never defaulted.
    pub fn status(&self) -> Result<ItemStatus, PackError> {
        if let Some(status) = self.status_override {
            return Ok(status);
        }
        let raw = str_at(&self.data, &["selling_status", "listing_status"])
            .ok_or_else(|| PackError::data("selling_status.listing_status", "missing"))?;
        ItemStatus::from_listing_status(&raw).ok_or_else(|| {
            PackError::data(
                "selling_status.listing_status",
                format!("invalid item status \"{raw}\""),
            )
        })
    }

    /// `None` when the response carries no duration.
    #[must_use]
    pub fn duration(&self) -> Option<ListingDuration> {
        str_at(&self.data, &["listing_duration"]).map(|raw| ListingDuration::parse(&raw))
    }

    #[must_use]
    pub fn is_gtc(&self) -> bool {
        self.duration() == Some(ListingDuration::Gtc)
    }

    /// eBay-hosted picture URLs.
    #[must_use]
    pub fn photo_urls(&self) -> Vec<String> {
        sequence_at(&self.data, &["picture_details", "picture_url"])
            .into_iter()
            .filter_map(to_string)
            .collect()
    }

    #[must_use]
    pub fn hit_count(&self) -> u32 {
        count_at(&self.data, &["hit_count"])
    }

    #[must_use]
    pub fn watch_count(&self) -> u32 {
        count_at(&self.data, &["watch_count"])
    }

    #[must_use]
    pub fn quantity_sold(&self) -> u32 {
        count_at(&self.data, &["selling_status", "quantity_sold"])
    }

    #[must_use]
    pub fn quantity_listed(&self) -> u32 {
        count_at(&self.data, &["quantity"])
    }

    /// Explicit `quantity_available` when present (only `GetMyeBaySelling`
    /// sends it), otherwise listed minus sold.
    #[must_use]
    pub fn quantity_available(&self) -> u32 {
        match lookup(&self.data, &["quantity_available"]) {
            Some(_) => count_at(&self.data, &["quantity_available"]),
            None => self.quantity_listed().saturating_sub(self.quantity_sold()),
        }
    }

    #[must_use]
    pub fn primary_category_id(&self) -> Option<i64> {
        i64_at(&self.data, &["primary_category", "category_id"])
    }

    /// Primary category name split on `:`, root first.
    #[must_use]
    pub fn primary_category_path(&self) -> Vec<String> {
        str_at(&self.data, &["primary_category", "category_name"])
            .map(|path| path.split(':').map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn store_category_id(&self) -> Option<i64> {
        i64_at(&self.data, &["storefront", "store_category_id"])
    }

    #[must_use]
    pub fn store_category2_id(&self) -> Option<i64> {
        i64_at(&self.data, &["storefront", "store_category2_id"])
    }

    #[must_use]
    pub fn has_best_offer(&self) -> bool {
        bool_at(&self.data, &["best_offer_details", "best_offer_enabled"]).unwrap_or(false)
    }

    #[must_use]
    pub fn best_offer_count(&self) -> u32 {
        if !self.has_best_offer() {
            return 0;
        }
        count_at(&self.data, &["best_offer_details", "best_offer_count"])
    }

    /// Only populated by `GetSellerList` at `Fine` granularity.
    #[must_use]
    pub fn best_offer_auto_accept_price(&self) -> Option<Money> {
        if !self.has_best_offer() {
            return None;
        }
        money_at(&self.data, &["listing_details", "best_offer_auto_accept_price"])
    }

    /// Offers below this price are rejected automatically.
    #[must_use]
    pub fn best_offer_minimum_accept_price(&self) -> Option<Money> {
        if !self.has_best_offer() {
            return None;
        }
        money_at(&self.data, &["listing_details", "minimum_best_offer_price"])
    }

    #[must_use]
    pub fn promotional_sale(&self) -> Option<PromotionalSale> {
        let sale = lookup(&self.data, &["selling_status", "promotional_sale_details"])?;
        Some(PromotionalSale {
            original_price: money_at(sale, &["original_price"]),
            start_time: time_at(sale, &["start_time"]),
            end_time: time_at(sale, &["end_time"]),
        })
    }

    #[must_use]
    pub fn has_promotional_sale(&self) -> bool {
        self.promotional_sale().is_some()
    }

    #[must_use]
    pub fn is_on_sale_now(&self) -> bool {
        self.is_on_sale_at(Utc::now())
    }

    #[must_use]
    pub fn is_on_sale_at(&self, now: DateTime<Utc>) -> bool {
        self.promotional_sale()
            .is_some_and(|sale| sale.is_running_at(now))
    }

    /// Remaining time from the response's `time_left`. Not real-time
    /// accurate: it is the value at the moment the response was produced.
    #[must_use]
    pub fn time_left(&self) -> TimeLeft {
        str_at(&self.data, &["time_left"])
            .map(|raw| TimeLeft::parse(&raw))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn time_left_in_seconds(&self) -> u64 {
        self.time_left().total_seconds()
    }

    /// Item this listing was relisted from, if any.
    #[must_use]
    pub fn relist_parent_id(&self) -> Option<i64> {
        i64_at(&self.data, &["relist_parent_id"])
    }

    #[must_use]
    pub fn is_relisted(&self) -> bool {
        bool_at(&self.data, &["relisted"]).unwrap_or(false)
    }

    /// New listing created by relisting this one, if any.
    #[must_use]
    pub fn relist_child_id(&self) -> Option<i64> {
        i64_at(&self.data, &["listing_details", "relisted_item_id"])
    }

    /// Item specifics keyed by name.
    ///
    /// This is the one place where "collapse on count" is intended: a name
    /// with a single value maps to [`SpecificValue::Single`], a name with
    /// several values (or repeated across entries) maps to
    /// [`SpecificValue::Multiple`].
    #[must_use]
    pub fn item_specifics(&self) -> BTreeMap<String, SpecificValue> {
        let mut specifics: BTreeMap<String, SpecificValue> = BTreeMap::new();
        for container in sequence_at(&self.data, &["item_specifics"]) {
            for entry in sequence_at(container, &["name_value_list"]) {
                let Some(name) = str_at(entry, &["name"]) else {
                    continue;
                };
                let values: Vec<String> = sequence_at(entry, &["value"])
                    .into_iter()
                    .filter_map(to_string)
                    .collect();
                let merged = match specifics.remove(&name) {
                    None => SpecificValue::from_values(values),
                    Some(existing) => values.into_iter().fold(existing, SpecificValue::push),
                };
                specifics.insert(name, merged);
            }
        }
        specifics
    }

    #[must_use]
    pub fn has_variations(&self) -> bool {
        lookup(&self.data, &["variations"]).is_some()
    }

    /// Variations with a non-blank SKU, in listing order.
    #[must_use]
    pub fn variations(&self) -> Vec<Variation> {
        sequence_at(&self.data, &["variations", "variation"])
            .into_iter()
            .filter_map(|variation| {
                let sku = str_at(variation, &["sku"])?.trim().to_string();
                if sku.is_empty() {
                    return None;
                }
                let quantity_listed = count_at(variation, &["quantity"]);
                let quantity_sold = count_at(variation, &["selling_status", "quantity_sold"]);
                Some(Variation {
                    sku,
                    current_price: money_at(variation, &["start_price"]),
                    quantity_listed,
                    quantity_sold,
                    quantity_available: quantity_listed.saturating_sub(quantity_sold),
                })
            })
            .collect()
    }
}

impl From<Value> for ItemView {
    fn from(data: Value) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
#[path = "../item_test.rs"]
mod tests;
