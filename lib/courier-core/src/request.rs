//! Outbound request envelopes.
//!
//! A [`RequestEnvelope`] is built once per call, either from a
//! [`NetworkingService`] with [`RequestEnvelope::from_service`] or by hand with
//! [`RequestEnvelope::builder`], and handed to the engine.
//!
//! # Example
//!
//! ```
//! use courier_core::{Method, RequestEnvelope};
//!
//! use courier_core::header::{ACCEPT, HeaderValue};
//!
//! let url = "https://api.example.com/users".parse().expect("valid URL");
//! let request = RequestEnvelope::builder(Method::Get, url)
//!     .header(ACCEPT, HeaderValue::from_static("application/json"))
//!     .query("page", "1")
//!     .build();
//!
//! assert_eq!(request.url().as_str(), "https://api.example.com/users?page=1");
//! ```

use std::borrow::Cow;
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

use crate::{Error, Method, NetworkingService, Result, header};

/// Characters that may not appear unescaped in a URL.
const ILLEGAL: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A fully-formed outbound request.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
    timeout: Option<Duration>,
}

impl RequestEnvelope {
    /// Creates a new [`RequestEnvelopeBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: Url) -> RequestEnvelopeBuilder {
        RequestEnvelopeBuilder::new(method, url)
    }

    /// Build the envelope for one call of `service`.
    ///
    /// # Errors
    ///
    /// Fails when the target URL is malformed or contains characters that
    /// must be escaped, when a header is not valid HTTP, or when the body
    /// cannot be encoded.
    pub fn from_service<S>(service: &S, timeout: Option<Duration>) -> Result<Self>
    where
        S: NetworkingService + ?Sized,
    {
        let url = service_url(service.base_url(), &service.path())?;

        let mut builder = Self::builder(service.method(), url).query_pairs(service.query());
        for (name, value) in service.headers() {
            let (name, value) = parse_header(&name, &value)?;
            builder = builder.header(name, value);
        }

        if let Some(body) = service.body()? {
            if !builder.headers.contains_key(header::CONTENT_TYPE) {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(body.content_type().as_str()),
                );
            }
            builder = builder.body(body.into_bytes());
        }

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build())
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// First value of a header, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Timeout the engine should apply to this request.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, HeaderMap, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`RequestEnvelope`] instances.
#[derive(Debug, Clone)]
pub struct RequestEnvelopeBuilder {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
    timeout: Option<Duration>,
}

impl RequestEnvelopeBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Sets a header, replacing any earlier value under the same name.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Adds a header value, keeping earlier values under the same name.
    #[must_use]
    pub fn append_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Appends multiple query parameters to the URL.
    ///
    /// An empty iterator leaves the URL untouched.
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_some() {
            let mut query = self.url.query_pairs_mut();
            for (name, value) in pairs {
                query.append_pair(&name, &value);
            }
        }
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the timeout passed through to the engine.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`RequestEnvelope`].
    #[must_use]
    pub fn build(self) -> RequestEnvelope {
        RequestEnvelope {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            timeout: self.timeout,
        }
    }
}

/// Join `base` and `path` with a single `/` and parse the result.
fn service_url(base: &str, path: &str) -> Result<Url> {
    ensure_url_safe(base)?;
    ensure_url_safe(path)?;

    let path = path.trim_start_matches('/');
    let target = if path.is_empty() {
        Cow::Borrowed(base)
    } else {
        Cow::Owned(format!("{}/{path}", base.trim_end_matches('/')))
    };

    Ok(Url::parse(&target)?)
}

fn ensure_url_safe(part: &str) -> Result<()> {
    match Cow::from(utf8_percent_encode(part, ILLEGAL)) {
        Cow::Borrowed(_) => Ok(()),
        Cow::Owned(_) => Err(Error::invalid_request(format!(
            "URL component contains characters that must be escaped: {part:?}"
        ))),
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::invalid_request(format!("invalid header name {name:?}: {e}")))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| Error::invalid_request(format!("invalid value for header {name:?}: {e}")))?;
    Ok((header_name, header_value))
}
