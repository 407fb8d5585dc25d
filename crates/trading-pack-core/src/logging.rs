use tracing_subscriber::EnvFilter;

use crate::ConfigError;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (usually
/// [`crate::ApiContext::log_level`]) is used. A subscriber that is already
/// installed is left in place.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] if `default_level` is not a valid
/// filter directive.
pub fn init_tracing(default_level: &str) -> Result<(), ConfigError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level).map_err(|e| ConfigError::InvalidEnvVar {
            var: "TRADING_PACK_LOG_LEVEL".to_string(),
            reason: e.to_string(),
        })?,
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
    Ok(())
}
