//! Raw transport responses.

use bytes::Bytes;
use http::HeaderMap;

/// Unclassified result of executing a [`RequestEnvelope`](crate::RequestEnvelope).
///
/// `status` is `None` when the transport answered with something that is not
/// an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: Option<u16>,
    headers: HeaderMap,
    body: Bytes,
}

impl RawResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: Option<u16>, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// An HTTP response with the given status code.
    #[must_use]
    pub fn http(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self::new(Some(status), headers, body.into())
    }

    /// A response without a recognizable HTTP status.
    #[must_use]
    pub fn non_http(body: impl Into<Bytes>) -> Self {
        Self::new(None, HeaderMap::new(), body.into())
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Response headers, repeated names included.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, ignoring ASCII case.
    ///
    /// `None` when the header is absent or its value is not visible ASCII;
    /// use [`headers`](Self::headers) for repeated or opaque values.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Option<u16>, HeaderMap, Bytes) {
        (self.status, self.headers, self.body)
    }

    /// Status is in `200..=299`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.status, Some(400..=499))
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self.status, Some(500..=599))
    }

    /// Body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }
}
