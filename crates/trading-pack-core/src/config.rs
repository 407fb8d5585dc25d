use crate::context::{ApiContext, Environment};
use crate::ConfigError;

/// Load the API context from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_api_context() -> Result<ApiContext, ConfigError> {
    dotenvy::dotenv().ok();
    load_api_context_from_env()
}

/// Load the API context from environment variables already in the process.
///
/// Unlike [`load_api_context`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_api_context_from_env() -> Result<ApiContext, ConfigError> {
    build_api_context(|key| std::env::var(key))
}

/// Build the API context using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_api_context<F>(lookup: F) -> Result<ApiContext, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let auth_token = require("EBAY_API_AUTH_TOKEN")?;
    let env = parse_environment(&or_default("EBAY_API_ENV", "sandbox")).map_err(|reason| {
        ConfigError::InvalidEnvVar {
            var: "EBAY_API_ENV".to_string(),
            reason,
        }
    })?;
    let site_id = parse_u32("EBAY_API_SITE_ID", "0")?;

    Ok(ApiContext {
        env,
        site_id,
        auth_token,
        dev_id: optional("EBAY_API_DEV_ID"),
        app_id: optional("EBAY_API_APP_ID"),
        cert_id: optional("EBAY_API_CERT_ID"),
        error_language: or_default("EBAY_API_ERROR_LANGUAGE", "en_GB"),
        log_level: or_default("TRADING_PACK_LOG_LEVEL", "info"),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "production" => Ok(Environment::Production),
        "sandbox" => Ok(Environment::Sandbox),
        other => Err(format!(
            "expected \"production\" or \"sandbox\", got \"{other}\""
        )),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
