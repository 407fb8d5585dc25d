use thiserror::Error;

/// Boxed error returned by a [`crate::Transport`] implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum PackError {
    /// Rejected request arguments; raised before any transport call.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The API answered with a non-success acknowledgement.
    #[error("{call} failed: {message}")]
    RemoteCall { call: &'static str, message: String },

    /// A successful response did not have the shape the accessors rely on.
    #[error("unexpected data in {field}: {reason}")]
    Data { field: &'static str, reason: String },

    #[error("transport error during {call}: {source}")]
    Transport {
        call: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("YAML rendering error for {context}: {source}")]
    Yaml {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl PackError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn data(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Data {
            field,
            reason: reason.into(),
        }
    }
}
