//! The decoded response tree handed back by the transport, plus the
//! call-outcome introspection every call type shares.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PackError;
use crate::normalize::{find_key, lookup, sequence_at, str_at};

/// Acknowledgement value of a Trading API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ack {
    Success,
    Warning,
    PartialFailure,
    Failure,
    /// Missing or unrecognised `ack` field.
    Unknown(Option<String>),
}

impl Ack {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("Success") => Ack::Success,
            Some("Warning") => Ack::Warning,
            Some("PartialFailure") => Ack::PartialFailure,
            Some("Failure") => Ack::Failure,
            other => Ack::Unknown(other.map(str::to_string)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// One entry of the response's `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub short_message: String,
    pub long_message: String,
    pub error_code: Option<String>,
    pub severity: Severity,
}

/// Decoded response tree with snake_case keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawResponse(Value);

impl RawResponse {
    #[must_use]
    pub fn new(tree: Value) -> Self {
        Self(tree)
    }

    #[must_use]
    pub fn tree(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Value at an exact key path from the root.
    #[must_use]
    pub fn find(&self, path: &[&str]) -> Option<&Value> {
        lookup(&self.0, path)
    }

    /// First value stored under `key` anywhere in the tree.
    #[must_use]
    pub fn deep_find(&self, key: &str) -> Option<&Value> {
        find_key(&self.0, key)
    }

    #[must_use]
    pub fn ack(&self) -> Ack {
        Ack::parse(lookup(&self.0, &["ack"]).and_then(Value::as_str))
    }

    /// `true` for `Success` and `Warning` acknowledgements.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.ack(), Ack::Success | Ack::Warning)
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    #[must_use]
    pub fn errors(&self) -> Vec<ApiMessage> {
        self.messages(Severity::Error)
    }

    #[must_use]
    pub fn warnings(&self) -> Vec<ApiMessage> {
        self.messages(Severity::Warning)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings().is_empty()
    }

    /// Builds the error reported when a caller asks to render a failed call.
    ///
    /// Uses the first error's long message, falling back to `summary` when
    /// the response carries no error entries.
    pub(crate) fn remote_call_error(&self, call: &'static str, summary: &str) -> PackError {
        let message = self
            .errors()
            .into_iter()
            .map(|e| {
                if e.long_message.is_empty() {
                    e.short_message
                } else {
                    e.long_message
                }
            })
            .find(|m| !m.is_empty())
            .unwrap_or_else(|| summary.to_string());
        PackError::RemoteCall { call, message }
    }

    fn messages(&self, wanted: Severity) -> Vec<ApiMessage> {
        sequence_at(&self.0, &["errors"])
            .into_iter()
            .filter(|entry| entry.is_object())
            .filter_map(|entry| {
                // Entries without a severity code are treated as errors.
                let severity = match str_at(entry, &["severity_code"]).as_deref() {
                    Some("Warning") => Severity::Warning,
                    _ => Severity::Error,
                };
                (severity == wanted).then(|| ApiMessage {
                    short_message: str_at(entry, &["short_message"]).unwrap_or_default(),
                    long_message: str_at(entry, &["long_message"]).unwrap_or_default(),
                    error_code: str_at(entry, &["error_code"]),
                    severity,
                })
            })
            .collect()
    }
}

impl From<Value> for RawResponse {
    fn from(tree: Value) -> Self {
        Self(tree)
    }
}
