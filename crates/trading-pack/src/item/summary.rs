//! Fixed-width text report for a single item.

use chrono::{DateTime, Utc};
use trading_pack_core::Money;

use super::{ItemStatus, ItemView, ListingDuration};
use crate::error::PackError;

const TITLE_WIDTH: usize = 80;
const STATUS_WIDTH: usize = 15;
const SPECIFIC_NAME_WIDTH: usize = 30;

impl ItemView {
    /// Multi-line human-readable summary of the listing.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Data`] if the listing status is unrecognised.
    pub fn summary(&self, include_specifics: bool) -> Result<String, PackError> {
        self.summary_at(include_specifics, Utc::now())
    }

    /// [`Self::summary`] evaluated against a fixed `now`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Data`] if the listing status is unrecognised.
    pub fn summary_at(
        &self,
        include_specifics: bool,
        now: DateTime<Utc>,
    ) -> Result<String, PackError> {
        let status = self.status()?;
        let mut out = String::new();

        let title = self.title().unwrap_or_default();
        let status_label = format!("[{}]", status.label());
        out.push_str(&format!(
            "{title:<tw$}{status_label:>sw$}",
            tw = TITLE_WIDTH,
            sw = STATUS_WIDTH
        ));

        self.write_stock(&mut out);
        self.write_promotion(&mut out, now);
        out.push('\n');

        let sold = self.quantity_sold();
        out.push_str(&format!("{sold:>4} sold"));
        if sold > 0 && status == ItemStatus::Completed {
            if let (Some(start), Some(end)) = (self.start_time(), self.end_time()) {
                out.push_str(&elapsed_phrase(" in ", start, end));
            }
        }
        out.push_str(&format!(
            ", {} watchers, {} page views.\n",
            self.watch_count(),
            self.hit_count()
        ));

        out.push_str(&format!(
            "   SKU: {}      Photos: {}      eBay ID: ",
            self.sku().unwrap_or_default(),
            self.photo_urls().len()
        ));
        if let Some(parent) = self.relist_parent_id() {
            out.push_str(&format!("{parent} <= "));
        }
        if let Some(id) = self.item_id() {
            out.push_str(&id.to_string());
        }
        if let Some(child) = self.relist_child_id() {
            out.push_str(&format!(" => {child}"));
        }

        out.push_str("\n   ");
        match (self.duration(), self.start_time()) {
            (Some(ListingDuration::Gtc), Some(start)) => {
                let reference = self.end_time().map_or(now, |end| end.min(now));
                let age = elapsed_phrase("", start, reference);
                out.push_str(&format!("GTC [{}]", age.trim()));
            }
            (Some(ListingDuration::Gtc), None) => out.push_str("GTC"),
            (Some(duration), _) => out.push_str(&duration.to_string()),
            (None, _) => out.push_str("0 Day"),
        }
        out.push_str(&format!("    {}", self.primary_category_path().join(" -> ")));

        if let (Some(start), Some(end)) = (self.start_time(), self.end_time()) {
            out.push_str(&format!(
                "\n   {} until {}",
                short_timestamp(start),
                short_timestamp(end)
            ));
        }

        if include_specifics {
            for (name, value) in self.item_specifics() {
                out.push_str(&format!("\n{name:>w$}  :  {value}", w = SPECIFIC_NAME_WIDTH));
            }
        }

        Ok(out)
    }

    fn write_stock(&self, out: &mut String) {
        if self.has_variations() {
            let variations = self.variations();
            out.push_str(&format!("\n   {} Variations:", variations.len()));
            for variation in &variations {
                out.push_str(&format!(
                    "\n     {}: {:>3} @ {:>6}    {:>2} listed, {:>2} sold",
                    variation.sku,
                    variation.quantity_available,
                    price_or_dash(variation.current_price.as_ref()),
                    variation.quantity_listed,
                    variation.quantity_sold
                ));
            }
            return;
        }

        out.push_str(&format!(
            "\n   {} @ {}",
            self.quantity_available(),
            price_or_dash(self.current_price().as_ref())
        ));
        // Best offer cannot be combined with variations.
        if self.has_best_offer() {
            out.push_str(" with Best Offer");
            if let Some(auto_accept) = self.best_offer_auto_accept_price() {
                out.push_str(&format!(" {auto_accept}"));
            }
            if let Some(minimum) = self.best_offer_minimum_accept_price() {
                out.push_str(&format!(" | {minimum}"));
            }
        }
    }

    fn write_promotion(&self, out: &mut String, now: DateTime<Utc>) {
        let Some(sale) = self.promotional_sale() else {
            return;
        };
        out.push_str("\n      ");
        if sale.is_running_at(now) {
            out.push_str("ON SALE NOW!");
        } else if sale.end_time.is_some_and(|end| now > end) {
            out.push_str("was on sale");
        } else if sale.start_time.is_some_and(|start| now < start) {
            out.push_str("sale scheduled");
        }
        if let Some(original) = &sale.original_price {
            out.push_str(&format!(" original price {original}"));
        }
        if let Some(start) = sale.start_time {
            out.push_str(&format!("  {}", start.format("%H:%M %A")));
        }
        if let Some(end) = sale.end_time {
            out.push_str(&format!(" until {}", end.format("%H:%M %A")));
        }
    }
}

fn price_or_dash(price: Option<&Money>) -> String {
    price.map_or_else(|| "-".to_string(), ToString::to_string)
}

/// `"{prefix}N days"` when more than a day has passed, otherwise hours.
fn elapsed_phrase(prefix: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let seconds = (to - from).num_seconds().max(0);
    let days = (seconds + 43_200) / 86_400;
    if days > 1 {
        format!("{prefix}{days} days")
    } else {
        let hours = (seconds + 1_800) / 3_600;
        format!("{prefix}{hours} hours")
    }
}

fn short_timestamp(at: DateTime<Utc>) -> String {
    at.format("%l:%M%P %A %-d %b").to_string().trim().to_string()
}
