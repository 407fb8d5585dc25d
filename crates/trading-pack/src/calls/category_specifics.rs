use serde::Serialize;
use trading_pack_core::ApiContext;

use crate::error::PackError;
use crate::normalize::{sequence_at, str_at};
use crate::params::validate_category_id;
use crate::response::RawResponse;
use crate::transport::{CallParams, FieldHints, TradingCall};

/// Recommended item specifics for a leaf category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCategorySpecifics {
    category_id: i64,
    extra_hints: FieldHints,
}

impl GetCategorySpecifics {
    /// # Errors
    ///
    /// Returns [`PackError::Validation`] unless `category_id > 0`.
    pub fn new(category_id: i64) -> Result<Self, PackError> {
        Ok(Self {
            category_id: validate_category_id(category_id)?,
            extra_hints: FieldHints::default(),
        })
    }

    #[must_use]
    pub fn with_hints(mut self, hints: FieldHints) -> Self {
        self.extra_hints = hints;
        self
    }

    #[must_use]
    pub fn category_id(&self) -> i64 {
        self.category_id
    }
}

impl TradingCall for GetCategorySpecifics {
    const NAME: &'static str = "GetCategorySpecifics";
    type Output = CategorySpecificsResponse;

    fn params(&self, _context: &ApiContext) -> CallParams {
        CallParams::new().nested(
            "CategorySpecific",
            CallParams::new().field("CategoryID", self.category_id),
        )
    }

    fn field_hints(&self) -> FieldHints {
        FieldHints::new()
            .with_known_arrays(["name_recommendation", "value_recommendation"])
            .merged(&self.extra_hints)
    }

    fn finish(self, response: RawResponse) -> CategorySpecificsResponse {
        CategorySpecificsResponse {
            request: self,
            response,
        }
    }
}

/// A specific name with its recommended values, in response order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CategorySpecificsResponse {
    request: GetCategorySpecifics,
    response: RawResponse,
}

impl CategorySpecificsResponse {
    #[must_use]
    pub fn request(&self) -> &GetCategorySpecifics {
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

    /// Entries without a name are skipped.
    #[must_use]
    pub fn recommendations(&self) -> Vec<Recommendation> {
        sequence_at(
            self.response.tree(),
            &["recommendations", "name_recommendation"],
        )
        .into_iter()
        .filter_map(|entry| {
            let name = str_at(entry, &["name"])?;
            let values = sequence_at(entry, &["value_recommendation"])
                .into_iter()
                .filter_map(|value| str_at(value, &["value"]))
                .collect();
            Some(Recommendation { name, values })
        })
        .collect()
    }

    /// `" * name"` per specific followed by one indented line per value.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for recommendation in self.recommendations() {
            out.push_str(&format!(" * {}\n", recommendation.name));
            for value in &recommendation.values {
                out.push_str(&format!("     {value}\n"));
            }
        }
        out
    }
}
