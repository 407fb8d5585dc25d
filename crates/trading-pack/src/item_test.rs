use chrono::{Duration, TimeZone};
use proptest::prelude::*;
use serde_json::json;

use super::*;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339()
}

fn make_item(status: &str, end_offset_days: i64) -> ItemView {
    let now = fixed_now();
    ItemView::new(json!({
        "item_id": "110012345678",
        "title": "Sterling silver bangle",
        "sku": "BNG-001",
        "listing_type": "FixedPriceItem",
        "listing_duration": "Days_7",
        "quantity": 10,
        "hit_count": "42",
        "watch_count": 3,
        "picture_details": {"picture_url": "http://i.ebayimg.com/00/s/1.jpg"},
        "primary_category": {"category_id": "281", "category_name": "Jewellery & Watches:Bracelets:Bangles"},
        "listing_details": {
            "start_time": rfc3339(now - Duration::days(3)),
            "end_time": rfc3339(now + Duration::days(end_offset_days)),
            "view_item_url": "http://www.ebay.co.uk/itm/110012345678"
        },
        "selling_status": {
            "listing_status": status,
            "quantity_sold": 4,
            "current_price": {"value": "24.99", "currency_id": "GBP"}
        }
    }))
}

// -----------------------------------------------------------------------
// status / activity
// -----------------------------------------------------------------------

#[test]
fn active_listing_with_future_end_is_active() {
    let item = make_item("Active", 4);
    assert_eq!(item.status().unwrap(), ItemStatus::Active);
    assert!(item.is_active_at(fixed_now()).unwrap());
    assert!(!item.has_ended_at(fixed_now()));
}

#[test]
fn active_status_with_past_end_is_not_active() {
    let item = make_item("Active", -1);
    assert!(!item.is_active_at(fixed_now()).unwrap());
    assert!(item.has_ended_at(fixed_now()));
}

#[test]
fn completed_listing_is_not_active() {
    let item = make_item("Completed", 2);
    assert_eq!(item.status().unwrap(), ItemStatus::Completed);
    assert!(!item.is_active_at(fixed_now()).unwrap());
}

#[test]
fn ended_status_is_mapped() {
    assert_eq!(make_item("Ended", -2).status().unwrap(), ItemStatus::Ended);
}

#[test]
fn unknown_status_is_a_data_error() {
    let item = make_item("Foo", 1);
    let err = item.status().unwrap_err();
    assert!(
        matches!(err, PackError::Data { ref reason, .. } if reason.contains("Foo")),
        "expected Data error, got: {err:?}"
    );
    assert!(item.is_active_at(fixed_now()).is_err());
    assert!(item.summary_at(false, fixed_now()).is_err());
}

#[test]
fn missing_status_is_a_data_error() {
    let item = ItemView::new(json!({"title": "No status"}));
    assert!(matches!(item.status(), Err(PackError::Data { .. })));
}

#[test]
fn unsold_view_overrides_status() {
    let item = ItemView::unsold(json!({"selling_status": {"listing_status": "Completed"}}));
    assert_eq!(item.status().unwrap(), ItemStatus::Unsold);
}

// -----------------------------------------------------------------------
// scalar accessors
// -----------------------------------------------------------------------

#[test]
fn basic_accessors_read_nested_fields() {
    let item = make_item("Active", 4);
    assert_eq!(item.item_id(), Some(110_012_345_678));
    assert_eq!(item.sku().as_deref(), Some("BNG-001"));
    assert_eq!(item.title().as_deref(), Some("Sterling silver bangle"));
    assert_eq!(
        item.url().as_deref(),
        Some("http://www.ebay.co.uk/itm/110012345678")
    );
    assert!(item.is_fixed_price());
    assert!(!item.is_auction());
    assert_eq!(item.bid_count(), 0);
    assert_eq!(item.hit_count(), 42);
    assert_eq!(item.watch_count(), 3);
    assert_eq!(item.current_price().unwrap().to_string(), "£24.99");
    assert_eq!(item.photo_urls().len(), 1);
    assert_eq!(item.primary_category_id(), Some(281));
    assert_eq!(
        item.primary_category_path(),
        vec!["Jewellery & Watches", "Bracelets", "Bangles"]
    );
}

#[test]
fn auction_is_detected_from_listing_type() {
    let item = ItemView::new(json!({"listing_type": "Chinese", "selling_status": {"bid_count": "5"}}));
    assert!(item.is_auction());
    assert_eq!(item.bid_count(), 5);
}

#[test]
fn missing_counts_default_to_zero() {
    let item = ItemView::new(json!({}));
    assert!(item.is_empty());
    assert_eq!(item.hit_count(), 0);
    assert_eq!(item.watch_count(), 0);
    assert_eq!(item.quantity_sold(), 0);
    assert_eq!(item.quantity_listed(), 0);
    assert_eq!(item.quantity_available(), 0);
    assert!(item.photo_urls().is_empty());
    assert!(item.primary_category_path().is_empty());
    assert!(item.item_specifics().is_empty());
    assert!(item.variations().is_empty());
}

#[test]
fn multiple_photos_are_returned_in_order() {
    let item = ItemView::new(json!({"picture_details": {"picture_url": ["a.jpg", "b.jpg"]}}));
    assert_eq!(item.photo_urls(), vec!["a.jpg", "b.jpg"]);
}

// -----------------------------------------------------------------------
// quantities
// -----------------------------------------------------------------------

#[test]
fn quantity_available_is_derived_without_explicit_field() {
    let item = make_item("Active", 1);
    assert_eq!(item.quantity_listed(), 10);
    assert_eq!(item.quantity_sold(), 4);
    assert_eq!(item.quantity_available(), 6);
}

#[test]
fn explicit_quantity_available_wins() {
    let item = ItemView::new(json!({
        "quantity": 10,
        "quantity_available": "2",
        "selling_status": {"quantity_sold": 4}
    }));
    assert_eq!(item.quantity_available(), 2);
}

proptest! {
    #[test]
    fn derived_quantity_available_is_listed_minus_sold(listed in 0u32..100_000, sold_fraction in 0.0f64..=1.0) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let sold = (f64::from(listed) * sold_fraction).floor() as u32;
        let item = ItemView::new(json!({
            "quantity": listed,
            "selling_status": {"quantity_sold": sold}
        }));
        prop_assert_eq!(item.quantity_available(), listed - sold);
    }
}

// -----------------------------------------------------------------------
// duration / time left
// -----------------------------------------------------------------------

#[test]
fn duration_scenarios() {
    let days = ItemView::new(json!({"listing_duration": "Days_5"}));
    assert_eq!(days.duration(), Some(ListingDuration::Days(5)));
    assert!(!days.is_gtc());

    let gtc = ItemView::new(json!({"listing_duration": "GTC"}));
    assert_eq!(gtc.duration(), Some(ListingDuration::Gtc));
    assert!(gtc.is_gtc());

    let none = ItemView::new(json!({}));
    assert_eq!(none.duration(), None);
    assert!(!none.is_gtc());
}

#[test]
fn time_left_scenario() {
    let item = ItemView::new(json!({"time_left": "P2DT3H15M"}));
    assert_eq!(
        item.time_left(),
        TimeLeft {
            days: 2,
            hours: 3,
            minutes: 15,
            seconds: 0
        }
    );
    assert_eq!(item.time_left_in_seconds(), 2 * 86_400 + 3 * 3_600 + 15 * 60);
}

#[test]
fn missing_time_left_is_zero() {
    assert_eq!(ItemView::new(json!({})).time_left_in_seconds(), 0);
}

#[test]
fn oversized_time_left_does_not_overflow() {
    let item = ItemView::new(json!({"time_left": "P1000000000000000DT1H"}));
    assert_eq!(item.time_left_in_seconds(), u64::MAX);
}

#[test]
fn store_categories_come_from_storefront() {
    let item = ItemView::new(json!({
        "storefront": {"store_category_id": "7", "store_category2_id": 12, "store_url": "http://stores.ebay.co.uk/x"}
    }));
    assert_eq!(item.store_category_id(), Some(7));
    assert_eq!(item.store_category2_id(), Some(12));

    let other_spelling = ItemView::new(json!({"store_front": {"store_category_id": "7"}}));
    assert_eq!(other_spelling.store_category_id(), None);
    assert_eq!(ItemView::new(json!({})).store_category2_id(), None);
}

// -----------------------------------------------------------------------
// best offer / promotions / relisting
// -----------------------------------------------------------------------

#[test]
fn best_offer_fields_require_best_offer_enabled() {
    let disabled = ItemView::new(json!({
        "best_offer_details": {"best_offer_enabled": "false", "best_offer_count": 3},
        "listing_details": {"minimum_best_offer_price": {"value": "5.00", "currency_id": "GBP"}}
    }));
    assert!(!disabled.has_best_offer());
    assert_eq!(disabled.best_offer_count(), 0);
    assert!(disabled.best_offer_minimum_accept_price().is_none());

    let enabled = ItemView::new(json!({
        "best_offer_details": {"best_offer_enabled": true, "best_offer_count": 3},
        "listing_details": {
            "minimum_best_offer_price": {"value": "5.00", "currency_id": "GBP"},
            "best_offer_auto_accept_price": {"value": "8.00", "currency_id": "GBP"}
        }
    }));
    assert!(enabled.has_best_offer());
    assert_eq!(enabled.best_offer_count(), 3);
    assert_eq!(
        enabled.best_offer_minimum_accept_price().unwrap().to_string(),
        "£5.00"
    );
    assert_eq!(
        enabled.best_offer_auto_accept_price().unwrap().to_string(),
        "£8.00"
    );
}

fn item_with_sale(start: DateTime<Utc>, end: DateTime<Utc>) -> ItemView {
    ItemView::new(json!({
        "selling_status": {
            "listing_status": "Active",
            "promotional_sale_details": {
                "original_price": {"value": "30.00", "currency_id": "GBP"},
                "start_time": rfc3339(start),
                "end_time": rfc3339(end)
            }
        }
    }))
}

#[test]
fn on_sale_now_inside_window() {
    let now = fixed_now();
    let item = item_with_sale(now - Duration::hours(1), now + Duration::hours(1));
    assert!(item.has_promotional_sale());
    assert!(item.is_on_sale_at(now));
    assert_eq!(
        item.promotional_sale()
            .unwrap()
            .original_price
            .unwrap()
            .to_string(),
        "£30.00"
    );
}

#[test]
fn on_sale_window_bounds_are_inclusive() {
    let now = fixed_now();
    assert!(item_with_sale(now, now + Duration::hours(1)).is_on_sale_at(now));
    assert!(item_with_sale(now - Duration::hours(1), now).is_on_sale_at(now));
}

#[test]
fn not_on_sale_outside_window_or_without_sale() {
    let now = fixed_now();
    let later = item_with_sale(now + Duration::hours(1), now + Duration::hours(2));
    assert!(!later.is_on_sale_at(now));
    assert!(!make_item("Active", 1).is_on_sale_at(now));
    assert!(!make_item("Active", 1).has_promotional_sale());
}

#[test]
fn relist_links_are_read() {
    let item = ItemView::new(json!({
        "relist_parent_id": 100,
        "relisted": "true",
        "listing_details": {"relisted_item_id": "300"}
    }));
    assert_eq!(item.relist_parent_id(), Some(100));
    assert!(item.is_relisted());
    assert_eq!(item.relist_child_id(), Some(300));
}

// -----------------------------------------------------------------------
// item specifics
// -----------------------------------------------------------------------

#[test]
fn item_specifics_single_and_multiple_values() {
    let item = ItemView::new(json!({
        "item_specifics": [{
            "name_value_list": [
                {"name": "Main Colour", "value": ["Sky blue"]},
                {"name": "Purpose", "value": ["Any Purpose", "Jewellery Making"]},
                {"name": "Brand", "value": []}
            ]
        }]
    }));
    let specifics = item.item_specifics();
    assert_eq!(
        specifics["Main Colour"],
        SpecificValue::Single("Sky blue".into())
    );
    assert_eq!(
        specifics["Purpose"],
        SpecificValue::Multiple(vec!["Any Purpose".into(), "Jewellery Making".into()])
    );
    assert_eq!(specifics["Brand"], SpecificValue::Single(String::new()));
}

#[test]
fn item_specifics_collapsed_single_entry_is_read() {
    let item = ItemView::new(json!({
        "item_specifics": {"name_value_list": {"name": "Material", "value": "Silver"}}
    }));
    assert_eq!(
        item.item_specifics()["Material"],
        SpecificValue::Single("Silver".into())
    );
}

#[test]
fn repeated_specific_names_are_merged() {
    let item = ItemView::new(json!({
        "item_specifics": [{
            "name_value_list": [
                {"name": "Style", "value": "Bangle"},
                {"name": "Style", "value": "Cuff"}
            ]
        }]
    }));
    assert_eq!(
        item.item_specifics()["Style"],
        SpecificValue::Multiple(vec!["Bangle".into(), "Cuff".into()])
    );
}

// -----------------------------------------------------------------------
// variations
// -----------------------------------------------------------------------

#[test]
fn variations_skip_blank_skus() {
    let item = ItemView::new(json!({
        "variations": {
            "variation": [
                {"sku": " RED-S ", "quantity": 5, "start_price": {"value": "9.99", "currency_id": "GBP"},
                 "selling_status": {"quantity_sold": 2}},
                {"sku": "   ", "quantity": 1},
                {"quantity": 1},
                {"sku": 4455, "quantity": "3"}
            ]
        }
    }));
    assert!(item.has_variations());
    let variations = item.variations();
    assert_eq!(variations.len(), 2);
    assert_eq!(variations[0].sku, "RED-S");
    assert_eq!(variations[0].quantity_listed, 5);
    assert_eq!(variations[0].quantity_sold, 2);
    assert_eq!(variations[0].quantity_available, 3);
    assert_eq!(
        variations[0].current_price.as_ref().unwrap().to_string(),
        "£9.99"
    );
    assert_eq!(variations[1].sku, "4455");
    assert_eq!(variations[1].quantity_sold, 0);
    assert_eq!(variations[1].quantity_available, 3);
}

#[test]
fn single_variation_mapping_is_read_as_list() {
    let item = ItemView::new(json!({"variations": {"variation": {"sku": "ONLY", "quantity": 1}}}));
    assert_eq!(item.variations().len(), 1);
}

// -----------------------------------------------------------------------
// summary
// -----------------------------------------------------------------------

#[test]
fn summary_contains_key_fields() {
    let item = make_item("Active", 4);
    let summary = item.summary_at(false, fixed_now()).unwrap();
    assert!(!summary.is_empty());
    assert!(summary.contains("Sterling silver bangle"));
    assert!(summary.contains("[Active]"));
    assert!(summary.contains("6 @ £24.99"));
    assert!(summary.contains("4 sold"));
    assert!(summary.contains("3 watchers, 42 page views."));
    assert!(summary.contains("SKU: BNG-001"));
    assert!(summary.contains("110012345678"));
    assert!(summary.contains("7 Day"));
    assert!(summary.contains("Jewellery & Watches -> Bracelets -> Bangles"));
}

#[test]
fn summary_lists_variations_and_specifics() {
    let item = ItemView::new(json!({
        "title": "Cotton tee",
        "listing_duration": "GTC",
        "selling_status": {"listing_status": "Active"},
        "listing_details": {"start_time": "2024-05-01T12:00:00Z", "end_time": "2024-06-01T12:00:00Z"},
        "variations": {"variation": [{"sku": "TEE-M", "quantity": 2}]},
        "item_specifics": {"name_value_list": {"name": "Size", "value": "M"}}
    }));
    let summary = item.summary_at(true, fixed_now()).unwrap();
    assert!(summary.contains("1 Variations:"));
    assert!(summary.contains("TEE-M"));
    assert!(summary.contains("GTC [9 days]"));
    assert!(summary.contains("Size  :  M"));
}

#[test]
fn summary_reports_completed_sales_window() {
    let item = ItemView::new(json!({
        "title": "Vase",
        "listing_duration": "Days_3",
        "selling_status": {"listing_status": "Completed", "quantity_sold": 1},
        "listing_details": {"start_time": "2024-05-01T00:00:00Z", "end_time": "2024-05-04T00:00:00Z"}
    }));
    let summary = item.summary_at(false, fixed_now()).unwrap();
    assert!(summary.contains("1 sold in 3 days"));
}

#[test]
fn summary_marks_running_promotion() {
    let now = fixed_now();
    let item = item_with_sale(now - Duration::hours(1), now + Duration::hours(1));
    let summary = item.summary_at(false, now).unwrap();
    assert!(summary.contains("ON SALE NOW!"));
    assert!(summary.contains("original price £30.00"));
}
