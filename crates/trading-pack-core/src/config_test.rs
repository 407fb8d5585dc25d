use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("EBAY_API_AUTH_TOKEN", "AgAAAA-test-token");
    m
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_sandbox_is_case_insensitive() {
    assert_eq!(parse_environment("SandBox").unwrap(), Environment::Sandbox);
}

#[test]
fn parse_environment_rejects_unknown() {
    assert!(parse_environment("staging").is_err());
}

#[test]
fn build_api_context_fails_without_auth_token() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_api_context(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "EBAY_API_AUTH_TOKEN"),
        "expected MissingEnvVar(EBAY_API_AUTH_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_api_context_treats_blank_auth_token_as_missing() {
    let mut map = full_env();
    map.insert("EBAY_API_AUTH_TOKEN", "   ");
    let result = build_api_context(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_api_context_succeeds_with_defaults() {
    let map = full_env();
    let ctx = build_api_context(lookup_from_map(&map)).unwrap();
    assert_eq!(ctx.env, Environment::Sandbox);
    assert_eq!(ctx.site_id, 0);
    assert_eq!(ctx.auth_token, "AgAAAA-test-token");
    assert!(ctx.dev_id.is_none());
    assert!(ctx.app_id.is_none());
    assert!(ctx.cert_id.is_none());
    assert_eq!(ctx.error_language, "en_GB");
    assert_eq!(ctx.log_level, "info");
}

#[test]
fn build_api_context_reads_overrides() {
    let mut map = full_env();
    map.insert("EBAY_API_ENV", "production");
    map.insert("EBAY_API_SITE_ID", "3");
    map.insert("EBAY_API_DEV_ID", "dev");
    map.insert("EBAY_API_APP_ID", "app");
    map.insert("EBAY_API_CERT_ID", "cert");
    map.insert("EBAY_API_ERROR_LANGUAGE", "en_US");
    map.insert("TRADING_PACK_LOG_LEVEL", "debug");
    let ctx = build_api_context(lookup_from_map(&map)).unwrap();
    assert_eq!(ctx.env, Environment::Production);
    assert_eq!(ctx.site_id, 3);
    assert_eq!(ctx.dev_id.as_deref(), Some("dev"));
    assert_eq!(ctx.app_id.as_deref(), Some("app"));
    assert_eq!(ctx.cert_id.as_deref(), Some("cert"));
    assert_eq!(ctx.error_language, "en_US");
    assert_eq!(ctx.log_level, "debug");
}

#[test]
fn build_api_context_fails_with_invalid_site_id() {
    let mut map = full_env();
    map.insert("EBAY_API_SITE_ID", "uk");
    let result = build_api_context(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "EBAY_API_SITE_ID"),
        "expected InvalidEnvVar(EBAY_API_SITE_ID), got: {result:?}"
    );
}

#[test]
fn build_api_context_fails_with_invalid_env() {
    let mut map = full_env();
    map.insert("EBAY_API_ENV", "staging");
    let result = build_api_context(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "EBAY_API_ENV"),
        "expected InvalidEnvVar(EBAY_API_ENV), got: {result:?}"
    );
}
