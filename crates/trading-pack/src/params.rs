//! Validation and clamping of caller-supplied request arguments.
//!
//! Nothing in here talks to the transport. Clamping never fails; only values
//! that cannot be given a sensible meaning (event type, inverted time range,
//! non-positive category id) are rejected.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::error::PackError;

pub const PER_PAGE_DEFAULT: u32 = 100;
const PER_PAGE_STEPS: [u32; 4] = [25, 50, 100, 200];

pub const SELLER_LIST_DAYS_DEFAULT: u32 = 30;
pub const SELLER_LIST_DAYS_MAX: u32 = 120;
pub const UNSOLD_DAYS_DEFAULT: u32 = 60;
pub const UNSOLD_DAYS_MAX: u32 = 60;

/// Days added to "now" to anchor an end-time based seller list when the
/// caller gives no time.
const END_TIME_LOOKAHEAD_DAYS: i64 = 30;

/// Snaps a requested page size up to the next supported step.
///
/// Absent, non-positive or over-range values fall back to
/// [`PER_PAGE_DEFAULT`].
#[must_use]
pub fn clamp_per_page(requested: Option<i64>) -> u32 {
    let Some(requested) = requested.filter(|n| *n > 0) else {
        return PER_PAGE_DEFAULT;
    };
    PER_PAGE_STEPS
        .iter()
        .copied()
        .find(|step| requested <= i64::from(*step))
        .unwrap_or(PER_PAGE_DEFAULT)
}

#[must_use]
pub fn clamp_page_number(requested: i64) -> u32 {
    u32::try_from(requested.max(1)).unwrap_or(u32::MAX)
}

/// Window length in days, clamped to `1..=max`.
#[must_use]
pub fn clamp_days(requested: Option<i64>, default: u32, max: u32) -> u32 {
    match requested {
        None => default,
        Some(days) => u32::try_from(days.clamp(1, i64::from(max))).unwrap_or(default),
    }
}

/// Millisecond-precision UTC timestamp in the form the API expects,
/// e.g. `2024-05-10T12:00:00.000Z`.
#[must_use]
pub fn format_api_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Detail level for `GetSellerList`. Best offer prices are only returned at
/// [`Granularity::Fine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Granularity {
    #[default]
    Coarse,
    Medium,
    Fine,
}

impl Granularity {
    /// Case-insensitive; anything unrecognised is [`Granularity::Coarse`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "medium" => Self::Medium,
            "fine" => Self::Fine,
            _ => Self::Coarse,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coarse => "Coarse",
            Self::Medium => "Medium",
            Self::Fine => "Fine",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which timestamp a `GetSellerEvents` range filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Modified,
    Started,
    Ended,
}

impl EventType {
    /// Request element prefix, e.g. `ModTime` for `ModTimeFrom`/`ModTimeTo`.
    #[must_use]
    pub fn element_prefix(self) -> &'static str {
        match self {
            Self::Modified => "ModTime",
            Self::Started => "StartTime",
            Self::Ended => "EndTime",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modified => "modified",
            Self::Started => "started",
            Self::Ended => "ended",
        }
    }
}

impl FromStr for EventType {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modified" => Ok(Self::Modified),
            "started" => Ok(Self::Started),
            "ended" => Ok(Self::Ended),
            other => Err(PackError::validation(
                "event_type",
                format!("event type '{other}' is not valid"),
            )),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timestamp a seller list window applies to.
///
/// End time is the default since GTC listings always carry a (virtual) end
/// time, while automatic GTC renewals do not move the start time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BasedOn {
    StartTime,
    #[default]
    EndTime,
}

impl BasedOn {
    #[must_use]
    pub fn default_sort(self) -> SortOrder {
        match self {
            Self::StartTime => SortOrder::Ascending,
            Self::EndTime => SortOrder::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Value of the `Sort` request element.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Descending => "1",
            Self::Ascending => "2",
        }
    }
}

/// Inclusive time range with `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl TimeWindow {
    /// # Errors
    ///
    /// Returns [`PackError::Validation`] if `from` is after `to`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, PackError> {
        if from > to {
            return Err(PackError::validation(
                "time_range",
                format!("time from {from} is after time to {to}"),
            ));
        }
        Ok(Self { from, to })
    }

    /// Seller list range of `days` around `anchor`.
    ///
    /// End-time lists cover `[anchor - days, anchor]`, start-time lists
    /// `[anchor, anchor + days]`. Without an anchor, end-time lists are
    /// anchored 30 days after `now` and start-time lists `days` before it.
    #[must_use]
    pub fn seller_list(
        based_on: BasedOn,
        anchor: Option<DateTime<Utc>>,
        days: u32,
        now: DateTime<Utc>,
    ) -> Self {
        let window = Duration::days(i64::from(days));
        match based_on {
            BasedOn::EndTime => {
                let to = anchor.unwrap_or(now + Duration::days(END_TIME_LOOKAHEAD_DAYS));
                Self {
                    from: to - window,
                    to,
                }
            }
            BasedOn::StartTime => {
                let from = anchor.unwrap_or(now - window);
                Self {
                    from,
                    to: from + window,
                }
            }
        }
    }

    #[must_use]
    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }
}

/// Category id for `GetCategorySpecifics`.
///
/// # Errors
///
/// Returns [`PackError::Validation`] unless `id > 0`.
pub fn validate_category_id(id: i64) -> Result<i64, PackError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(PackError::validation(
            "category_id",
            format!("{id} is not a valid category number"),
        ))
    }
}
