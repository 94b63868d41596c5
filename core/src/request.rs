//! Immutable request description and its fluent builder.
//!
//! # Design
//! `Request` is a plain value: building it performs no I/O and no
//! validation, and executing it never mutates it. Retried attempts therefore
//! always see identical configuration, and the same `Request` can be
//! executed any number of times.

use std::time::Duration;

use crate::error::RequestError;
use crate::execute::execute;
use crate::method::Method;
use crate::params::{encode_pairs, Pair};
use crate::response::ExecutedRequest;
use crate::transport::Transport;

/// Default connect timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// An immutable description of one HTTP request.
///
/// Build with [`Request::builder`], execute with
/// [`execute`](crate::execute::execute) or [`RequestBuilder::send`].
#[derive(Debug, Clone)]
pub struct Request {
    url: String,
    method: Method,
    query: Vec<Pair>,
    form: Vec<Pair>,
    headers: Vec<Pair>,
    body: Option<String>,
    use_cache: bool,
    force_cache: bool,
    timeout: Duration,
    attempts: u32,
}

impl Request {
    pub fn builder(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn query_params(&self) -> &[Pair] {
        &self.query
    }

    pub fn form_fields(&self) -> &[Pair] {
        &self.form
    }

    pub fn headers(&self) -> &[Pair] {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    pub fn force_cache(&self) -> bool {
        self.force_cache
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Total number of attempts `execute` may make. Always at least 1.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The base URL with the encoded query string appended.
    ///
    /// An empty query appends nothing, not even a `?`.
    pub fn full_url(&self) -> String {
        let query = encode_pairs(&self.query);
        if query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, query)
        }
    }

    /// Whether the form serialization replaces the explicit body: only on a
    /// POST with at least one form field.
    pub(crate) fn form_overrides_body(&self) -> bool {
        self.method == Method::Post && !self.form.is_empty()
    }

    /// The body that will actually be written. On a POST with form fields
    /// this is the form serialization, overriding any explicitly set body.
    pub fn effective_body(&self) -> Option<String> {
        if self.form_overrides_body() {
            Some(encode_pairs(&self.form))
        } else {
            self.body.clone()
        }
    }
}

/// Fluent builder for [`Request`].
///
/// Appends never validate or de-duplicate; repeated names stay in insertion
/// order. Every setter returns the builder, so calls chain freely.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            request: Request {
                url: url.into(),
                method: Method::Get,
                query: Vec::new(),
                form: Vec::new(),
                headers: Vec::new(),
                body: None,
                use_cache: false,
                force_cache: false,
                timeout: DEFAULT_TIMEOUT,
                attempts: 1,
            },
        }
    }

    /// Replace the base URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.request.url = url.into();
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.request.method = method;
        self
    }

    /// Append a query parameter. Duplicates are kept.
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((name.into(), value.into()));
        self
    }

    /// Append a form field. Non-empty fields on a POST override the body.
    pub fn form_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.form.push((name.into(), value.into()));
        self
    }

    /// Append a header. Duplicates are kept; the transport's own
    /// header-accumulation semantics apply.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((name.into(), value.into()));
        self
    }

    /// Set the raw request body. Ignored when form fields override it.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Hint the transport that a cached response may satisfy the request.
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.request.use_cache = use_cache;
        self
    }

    /// Require the transport to answer only from cache (`only-if-cached`).
    /// Layered on top of, not instead of, [`Self::use_cache`].
    pub fn force_cache(mut self, force_cache: bool) -> Self {
        self.request.force_cache = force_cache;
        self
    }

    /// Connect timeout per attempt. Each retried attempt gets the full
    /// window again; there is no shared deadline budget.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = timeout;
        self
    }

    /// Total number of attempts, clamped to at least 1.
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.request.attempts = attempts.max(1);
        self
    }

    pub fn build(self) -> Request {
        self.request
    }

    /// Build and execute in one call.
    pub fn send<T: Transport>(
        self,
        transport: &T,
    ) -> Result<ExecutedRequest<T::Conn>, RequestError> {
        execute(transport, &self.build())
    }
}
