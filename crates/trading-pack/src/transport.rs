//! The boundary to the Trading API client that owns authentication, XML and
//! HTTP.
//!
//! A call hands the transport an ordered [`CallParams`] tree plus
//! [`CallOptions`] describing how the response should be decoded, and gets a
//! [`RawResponse`] back. Everything below that line (request signing, XML
//! serialisation, retries) lives in the transport implementation.

use std::collections::BTreeSet;
use std::fmt;

use trading_pack_core::ApiContext;

use crate::error::{BoxError, PackError};
use crate::response::RawResponse;

/// Executes one Trading API round trip.
///
/// Implementations are synchronous; a caller that needs concurrency runs
/// several sessions on its own threads.
pub trait Transport {
    /// Sends `call_name` with `params` and returns the decoded response tree.
    ///
    /// An API-level failure (`ack` of `Failure`) is still an `Ok` response;
    /// `Err` is reserved for the round trip itself failing.
    ///
    /// # Errors
    ///
    /// Any transport failure, boxed.
    fn call(
        &self,
        call_name: &str,
        params: &CallParams,
        options: &CallOptions,
    ) -> Result<RawResponse, BoxError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn call(
        &self,
        call_name: &str,
        params: &CallParams,
        options: &CallOptions,
    ) -> Result<RawResponse, BoxError> {
        (**self).call(call_name, params, options)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Nested(CallParams),
}

/// Ordered request element tree. Element order is preserved exactly as
/// built, since the API validates some sequences positionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallParams {
    entries: Vec<(String, ParamValue)>,
}

impl CallParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text element.
    #[must_use]
    pub fn field(mut self, name: &str, value: impl ToString) -> Self {
        self.entries
            .push((name.to_string(), ParamValue::Text(value.to_string())));
        self
    }

    /// Appends a text element only when `value` is present.
    #[must_use]
    pub fn field_opt(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    /// Appends a container element.
    #[must_use]
    pub fn nested(mut self, name: &str, children: CallParams) -> Self {
        self.entries
            .push((name.to_string(), ParamValue::Nested(children)));
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[(String, ParamValue)] {
        &self.entries
    }

    /// Element names at this level, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value)
    }

    /// Text of the element at `path`, descending through containers.
    #[must_use]
    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for name in parents {
            match current.get(name)? {
                ParamValue::Nested(children) => current = children,
                ParamValue::Text(_) => return None,
            }
        }
        match current.get(last)? {
            ParamValue::Text(text) => Some(text.as_str()),
            ParamValue::Nested(_) => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decoding hints for the transport's XML-to-mapping conversion.
///
/// `known_arrays` names elements that must always decode as sequences;
/// `skip_type_casting` names elements that must stay strings even when they
/// look numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldHints {
    pub known_arrays: BTreeSet<String>,
    pub skip_type_casting: BTreeSet<String>,
}

impl FieldHints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_known_arrays<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_arrays.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_skip_type_casting<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_type_casting
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Union of both hint sets.
    #[must_use]
    pub fn merged(mut self, other: &FieldHints) -> Self {
        self.known_arrays.extend(other.known_arrays.iter().cloned());
        self.skip_type_casting
            .extend(other.skip_type_casting.iter().cloned());
        self
    }
}

/// Per-call settings handed to the transport alongside the parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct CallOptions {
    pub skip_type_casting: BTreeSet<String>,
    pub known_arrays: BTreeSet<String>,
    pub site_id: u32,
    pub auth_token: String,
    pub error_language: String,
}

impl CallOptions {
    #[must_use]
    pub fn new(context: &ApiContext, hints: FieldHints) -> Self {
        Self {
            skip_type_casting: hints.skip_type_casting,
            known_arrays: hints.known_arrays,
            site_id: context.site_id,
            auth_token: context.auth_token.clone(),
            error_language: context.error_language.clone(),
        }
    }
}

impl fmt::Debug for CallOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallOptions")
            .field("skip_type_casting", &self.skip_type_casting)
            .field("known_arrays", &self.known_arrays)
            .field("site_id", &self.site_id)
            .field("auth_token", &"[redacted]")
            .field("error_language", &self.error_language)
            .finish()
    }
}

/// A typed Trading API request.
///
/// Arguments are validated when the request value is built, so by the time
/// a session sends it the only failure left is the transport itself.
pub trait TradingCall {
    /// API call name, e.g. `GetSellerList`.
    const NAME: &'static str;

    type Output;

    fn params(&self, context: &ApiContext) -> CallParams;

    /// Decoding hints, already merged with any caller-supplied extras.
    fn field_hints(&self) -> FieldHints;

    /// Wraps the response. Called for failed acknowledgements too, so the
    /// output can report the failure.
    fn finish(self, response: RawResponse) -> Self::Output;
}

/// A transport bound to one account's [`ApiContext`].
pub struct TradingSession<T> {
    transport: T,
    context: ApiContext,
}

impl<T: Transport> TradingSession<T> {
    #[must_use]
    pub fn new(transport: T, context: ApiContext) -> Self {
        Self { transport, context }
    }

    #[must_use]
    pub fn context(&self) -> &ApiContext {
        &self.context
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A session over the same transport that authenticates with
    /// `auth_token` instead of the context's token.
    #[must_use]
    pub fn with_auth_token(&self, auth_token: &str) -> TradingSession<&T> {
        TradingSession {
            transport: &self.transport,
            context: self.context.with_auth_token(auth_token),
        }
    }

    /// A session over the same transport targeting another eBay site.
    #[must_use]
    pub fn with_site_id(&self, site_id: u32) -> TradingSession<&T> {
        TradingSession {
            transport: &self.transport,
            context: self.context.with_site_id(site_id),
        }
    }

    /// Builds, sends and wraps `request` in one round trip.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Transport`] if the transport fails. A response
    /// with a failure acknowledgement is not an error here; it is reported by
    /// the returned value.
    pub fn send<C: TradingCall>(&self, request: C) -> Result<C::Output, PackError> {
        let params = request.params(&self.context);
        let options = CallOptions::new(&self.context, request.field_hints());
        let response = self.dispatch(C::NAME, &params, &options)?;
        Ok(request.finish(response))
    }

    fn dispatch(
        &self,
        call: &'static str,
        params: &CallParams,
        options: &CallOptions,
    ) -> Result<RawResponse, PackError> {
        tracing::debug!(
            call,
            env = %self.context.env,
            site_id = options.site_id,
            "dispatching trading call"
        );
        let response = self
            .transport
            .call(call, params, options)
            .map_err(|source| {
                tracing::warn!(call, error = %source, "trading call transport failure");
                PackError::Transport { call, source }
            })?;
        if !response.is_success() {
            tracing::debug!(call, ack = ?response.ack(), "trading call not successful");
        }
        Ok(response)
    }
}

impl<T> fmt::Debug for TradingSession<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradingSession")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;
    use trading_pack_core::Environment;

    use super::*;

    struct Recorder {
        seen: RefCell<Vec<(String, CallOptions)>>,
        fail: bool,
    }

    impl Transport for Recorder {
        fn call(
            &self,
            call_name: &str,
            _params: &CallParams,
            options: &CallOptions,
        ) -> Result<RawResponse, BoxError> {
            self.seen
                .borrow_mut()
                .push((call_name.to_string(), options.clone()));
            if self.fail {
                return Err("connection reset".into());
            }
            Ok(RawResponse::new(json!({"ack": "Success"})))
        }
    }

    struct Ping;

    impl TradingCall for Ping {
        const NAME: &'static str = "GeteBayOfficialTime";
        type Output = RawResponse;

        fn params(&self, _context: &ApiContext) -> CallParams {
            CallParams::new()
        }

        fn field_hints(&self) -> FieldHints {
            FieldHints::new().with_known_arrays(["item"])
        }

        fn finish(self, response: RawResponse) -> RawResponse {
            response
        }
    }

    fn recorder(fail: bool) -> Recorder {
        Recorder {
            seen: RefCell::new(Vec::new()),
            fail,
        }
    }

    #[test]
    fn params_preserve_insertion_order() {
        let params = CallParams::new()
            .field("ErrorLanguage", "en_GB")
            .field_opt("UserID", None::<&str>)
            .nested(
                "Pagination",
                CallParams::new()
                    .field("EntriesPerPage", 50)
                    .field("PageNumber", 2),
            )
            .field("Sort", "1");
        let names: Vec<&str> = params.names().collect();
        assert_eq!(names, vec!["ErrorLanguage", "Pagination", "Sort"]);
        assert_eq!(params.text_at(&["Pagination", "EntriesPerPage"]), Some("50"));
        assert_eq!(params.text_at(&["Pagination"]), None);
        assert_eq!(params.text_at(&["Missing", "PageNumber"]), None);
    }

    #[test]
    fn hints_merge_without_duplicates() {
        let base = FieldHints::new().with_known_arrays(["item", "variation"]);
        let extra = FieldHints::new()
            .with_known_arrays(["item", "site"])
            .with_skip_type_casting(["sku"]);
        let merged = base.merged(&extra);
        assert_eq!(merged.known_arrays.len(), 3);
        assert!(merged.skip_type_casting.contains("sku"));
    }

    #[test]
    fn session_passes_context_into_options() {
        let context = ApiContext::new(Environment::Sandbox, 3, "token-a");
        let session = TradingSession::new(recorder(false), context);
        let response = session.send(Ping).unwrap();
        assert!(response.is_success());

        let seen = session.transport().seen.borrow();
        assert_eq!(seen[0].0, "GeteBayOfficialTime");
        assert_eq!(seen[0].1.site_id, 3);
        assert_eq!(seen[0].1.auth_token, "token-a");
        assert!(seen[0].1.known_arrays.contains("item"));
    }

    #[test]
    fn with_auth_token_overrides_token_only() {
        let context = ApiContext::new(Environment::Production, 0, "token-a");
        let session = TradingSession::new(recorder(false), context);
        session.with_auth_token("token-b").send(Ping).unwrap();

        let seen = session.transport().seen.borrow();
        assert_eq!(seen[0].1.auth_token, "token-b");
        assert_eq!(session.context().auth_token, "token-a");
    }

    #[test]
    fn transport_failure_carries_call_name() {
        let context = ApiContext::new(Environment::Sandbox, 0, "token");
        let session = TradingSession::new(recorder(true), context);
        let err = session.send(Ping).unwrap_err();
        assert!(
            matches!(err, PackError::Transport { call: "GeteBayOfficialTime", .. }),
            "expected Transport error, got: {err:?}"
        );
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn options_debug_redacts_token() {
        let context = ApiContext::new(Environment::Sandbox, 0, "super-secret");
        let options = CallOptions::new(&context, FieldHints::new());
        let debug = format!("{options:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[redacted]"));
    }
}
