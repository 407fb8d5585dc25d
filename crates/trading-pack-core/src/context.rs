//! Explicit session context handed to every Trading API call.

use std::fmt;

/// The eBay environment a context targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Credentials and call defaults for one eBay account.
///
/// Passed explicitly into a session instead of being read from global
/// state, so two accounts (or two environments) can be used side by side.
#[derive(Clone)]
pub struct ApiContext {
    pub env: Environment,
    pub site_id: u32,
    pub auth_token: String,
    pub dev_id: Option<String>,
    pub app_id: Option<String>,
    pub cert_id: Option<String>,
    pub error_language: String,
    pub log_level: String,
}

impl ApiContext {
    /// Builds a context with defaults for everything except the auth token.
    #[must_use]
    pub fn new(env: Environment, site_id: u32, auth_token: impl Into<String>) -> Self {
        Self {
            env,
            site_id,
            auth_token: auth_token.into(),
            dev_id: None,
            app_id: None,
            cert_id: None,
            error_language: "en_GB".to_string(),
            log_level: "info".to_string(),
        }
    }

    /// Returns a copy of this context that authenticates with `auth_token`.
    #[must_use]
    pub fn with_auth_token(&self, auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            ..self.clone()
        }
    }

    /// Returns a copy of this context targeting a different eBay site.
    #[must_use]
    pub fn with_site_id(&self, site_id: u32) -> Self {
        Self {
            site_id,
            ..self.clone()
        }
    }
}

impl fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext")
            .field("env", &self.env)
            .field("site_id", &self.site_id)
            .field("auth_token", &"[redacted]")
            .field("dev_id", &self.dev_id)
            .field("app_id", &self.app_id)
            .field("cert_id", &self.cert_id.as_ref().map(|_| "[redacted]"))
            .field("error_language", &self.error_language)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secrets() {
        let mut ctx = ApiContext::new(Environment::Production, 3, "super-secret-token");
        ctx.cert_id = Some("cert-123".to_string());
        let rendered = format!("{ctx:?}");
        assert!(!rendered.contains("super-secret-token"));
        assert!(!rendered.contains("cert-123"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn with_auth_token_keeps_other_fields() {
        let ctx = ApiContext::new(Environment::Sandbox, 3, "ambient");
        let explicit = ctx.with_auth_token("explicit");
        assert_eq!(explicit.auth_token, "explicit");
        assert_eq!(explicit.site_id, 3);
        assert_eq!(explicit.env, Environment::Sandbox);
        assert_eq!(ctx.auth_token, "ambient");
    }

    #[test]
    fn environment_display() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::Sandbox.to_string(), "sandbox");
    }
}
