pub mod config;
pub mod context;
pub mod logging;
pub mod money;

use thiserror::Error;

pub use config::{load_api_context, load_api_context_from_env};
pub use context::{ApiContext, Environment};
pub use logging::init_tracing;
pub use money::Money;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
