//! Value types produced by [`super::ItemView`] accessors.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use trading_pack_core::Money;

static DURATION_DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid duration regex"));

static TIME_LEFT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)P(?:([0-9]+)D)?(?:T(?:([0-9]+)H)?(?:([0-9]+)M)?(?:([0-9]+)S)?)?")
        .expect("valid time-left regex")
});

/// Selling status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Completed,
    Ended,
    /// Reported only by items taken from a seller's unsold list.
    Unsold,
}

impl ItemStatus {
    /// Maps a `ListingStatus` source string. Anything unrecognised is `None`.
    #[must_use]
    pub fn from_listing_status(raw: &str) -> Option<Self> {
        match raw {
            "Active" => Some(Self::Active),
            "Completed" => Some(Self::Completed),
            "Ended" => Some(Self::Ended),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Ended => "Ended",
            Self::Unsold => "Unsold",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_ascii_lowercase())
    }
}

/// Listing duration: a number of days, or good 'til cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingDuration {
    /// `0` when the source string carries no digits.
    Days(u32),
    Gtc,
}

impl ListingDuration {
    /// Parses `ListingDuration` values such as `Days_5` or `GTC`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "GTC" {
            return Self::Gtc;
        }
        let days = DURATION_DAYS
            .find(raw)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0);
        Self::Days(days)
    }
}

impl fmt::Display for ListingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days} Day"),
            Self::Gtc => f.write_str("GTC"),
        }
    }
}

/// Remaining listing time decomposed from an ISO 8601 duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLeft {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeLeft {
    /// Parses `P[nD]T[nH][nM][nS]`. Hours, minutes and seconds are only read
    /// after the `T`. Missing components, and input that does not match at
    /// all, count as zero.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let Some(caps) = TIME_LEFT.captures(raw.trim()) else {
            return Self::default();
        };
        let part = |idx: usize| -> u64 {
            caps.get(idx)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .unwrap_or(0)
        };
        Self {
            days: part(1),
            hours: part(2),
            minutes: part(3),
            seconds: part(4),
        }
    }

    /// Saturates at `u64::MAX` for absurd component values.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        self.days
            .saturating_mul(86_400)
            .saturating_add(self.hours.saturating_mul(3_600))
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }
}

/// Compact rendering such as `2d  3h 15m`, omitting zero components.
impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.days > 0 {
            parts.push(format!("{:>2}d", self.days));
        }
        if self.hours > 0 {
            parts.push(format!("{:>2}h", self.hours));
        }
        if self.minutes > 0 {
            parts.push(format!("{:>2}m", self.minutes));
        }
        f.write_str(parts.join(" ").trim())
    }
}

/// Markdown-manager promotion attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionalSale {
    pub original_price: Option<Money>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl PromotionalSale {
    /// `true` when `now` falls inside the promotion window (inclusive).
    #[must_use]
    pub fn is_running_at(&self, now: DateTime<Utc>) -> bool {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => start <= now && now <= end,
            _ => false,
        }
    }
}

/// One purchasable variation of a multi-variation listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub sku: String,
    pub current_price: Option<Money>,
    pub quantity_listed: u32,
    pub quantity_sold: u32,
    pub quantity_available: u32,
}

/// Value of one item specific.
///
/// A specific may legally carry several values (`Purpose` → `["Any Purpose",
/// "Jewellery Making"]`); only then is it a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecificValue {
    Single(String),
    Multiple(Vec<String>),
}

impl SpecificValue {
    pub(crate) fn from_values(mut values: Vec<String>) -> Self {
        match values.len() {
            0 => Self::Single(String::new()),
            1 => Self::Single(values.remove(0)),
            _ => Self::Multiple(values),
        }
    }

    pub(crate) fn push(self, value: String) -> Self {
        match self {
            Self::Single(existing) if existing.is_empty() => Self::Single(value),
            Self::Single(existing) => Self::Multiple(vec![existing, value]),
            Self::Multiple(mut values) => {
                values.push(value);
                Self::Multiple(values)
            }
        }
    }
}

impl fmt::Display for SpecificValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => f.write_str(value),
            Self::Multiple(values) => f.write_str(&values.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_parses_days() {
        assert_eq!(ListingDuration::parse("Days_5"), ListingDuration::Days(5));
        assert_eq!(ListingDuration::parse("Days_30"), ListingDuration::Days(30));
    }

    #[test]
    fn duration_parses_gtc() {
        assert_eq!(ListingDuration::parse("GTC"), ListingDuration::Gtc);
    }

    #[test]
    fn duration_without_digits_is_zero_days() {
        assert_eq!(ListingDuration::parse("Forever"), ListingDuration::Days(0));
    }

    #[test]
    fn time_left_parses_all_components() {
        let left = TimeLeft::parse("P2DT3H15M");
        assert_eq!(
            left,
            TimeLeft {
                days: 2,
                hours: 3,
                minutes: 15,
                seconds: 0
            }
        );
        assert_eq!(left.total_seconds(), 2 * 86_400 + 3 * 3_600 + 15 * 60);
    }

    #[test]
    fn time_left_is_case_insensitive_and_partial() {
        let left = TimeLeft::parse("pt45s");
        assert_eq!(left.seconds, 45);
        assert_eq!(left.days, 0);
        assert_eq!(left.total_seconds(), 45);
    }

    #[test]
    fn time_left_garbage_is_zero() {
        assert_eq!(TimeLeft::parse("soon"), TimeLeft::default());
    }

    #[test]
    fn time_left_huge_components_saturate() {
        let left = TimeLeft::parse("P1000000000000000DT1H");
        assert_eq!(left.days, 1_000_000_000_000_000);
        assert_eq!(left.total_seconds(), u64::MAX);
    }

    #[test]
    fn time_left_reads_time_parts_only_after_t() {
        assert_eq!(TimeLeft::parse("P5M"), TimeLeft::default());
        assert_eq!(TimeLeft::parse("P5M").total_seconds(), 0);
        assert_eq!(TimeLeft::parse("PT5M").minutes, 5);
        assert_eq!(
            TimeLeft::parse("P3D"),
            TimeLeft {
                days: 3,
                ..TimeLeft::default()
            }
        );
    }

    #[test]
    fn time_left_display_omits_zero_parts() {
        assert_eq!(TimeLeft::parse("P2DT3H15M").to_string(), "2d  3h 15m");
        assert_eq!(TimeLeft::parse("PT0S").to_string(), "");
    }

    #[test]
    fn status_maps_known_strings_only() {
        assert_eq!(
            ItemStatus::from_listing_status("Active"),
            Some(ItemStatus::Active)
        );
        assert_eq!(
            ItemStatus::from_listing_status("Completed"),
            Some(ItemStatus::Completed)
        );
        assert_eq!(
            ItemStatus::from_listing_status("Ended"),
            Some(ItemStatus::Ended)
        );
        assert_eq!(ItemStatus::from_listing_status("Foo"), None);
        assert_eq!(ItemStatus::from_listing_status("active"), None);
    }

    #[test]
    fn specific_value_collapses_on_count() {
        assert_eq!(
            SpecificValue::from_values(vec![]),
            SpecificValue::Single(String::new())
        );
        assert_eq!(
            SpecificValue::from_values(vec!["Blue".into()]),
            SpecificValue::Single("Blue".into())
        );
        assert_eq!(
            SpecificValue::from_values(vec!["a".into(), "b".into()]),
            SpecificValue::Multiple(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn specific_value_push_grows_into_list() {
        let value = SpecificValue::Single("a".into()).push("b".into());
        assert_eq!(value, SpecificValue::Multiple(vec!["a".into(), "b".into()]));
        assert_eq!(value.to_string(), "a, b");
    }
}
