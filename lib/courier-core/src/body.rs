//! Request bodies and serialization helpers.

use bytes::Bytes;

use crate::Result;

/// Content type of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
    /// Plain text content type (`text/plain`).
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An encoded request body and its content type.
///
/// Services return a `Body` from
/// [`NetworkingService::body`](crate::NetworkingService::body); encoding errors
/// there make the request unbuildable.
///
/// # Example
///
/// ```
/// use courier_core::{Body, ContentType};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct NewUser { name: String }
///
/// let body = Body::json(&NewUser { name: "Alice".to_string() }).expect("encode");
/// assert_eq!(body.content_type(), ContentType::Json);
/// assert_eq!(body.bytes().as_ref(), br#"{"name":"Alice"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    content_type: ContentType,
    bytes: Bytes,
}

impl Body {
    /// Body with an explicit content type.
    #[must_use]
    pub fn new(content_type: ContentType, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type,
            bytes: bytes.into(),
        }
    }

    /// JSON-encoded body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        to_json(value).map(|bytes| Self::new(ContentType::Json, bytes))
    }

    /// Form URL-encoded body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn form<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        to_form(value).map(|bytes| Self::new(ContentType::FormUrlEncoded, bytes))
    }

    /// Plain text body.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(ContentType::PlainText, text.into())
    }

    /// Content type of the body.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Encoded bytes.
    #[must_use]
    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Consume into the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to form URL-encoded bytes.
///
/// Uses `serde_html_form` which supports `Vec<T>` for repeated form fields
/// (e.g., `tags=a&tags=b&tags=c`).
///
/// # Errors
///
/// Returns an error if form serialization fails.
pub fn to_form<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_html_form::to_string(value)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}

/// Serialize a value to query pairs.
///
/// Services use this to build [`NetworkingService::query`](crate::NetworkingService::query)
/// from a typed parameter struct.
///
/// # Errors
///
/// Returns an error if query serialization fails.
///
/// # Example
///
/// ```
/// use courier_core::to_query_pairs;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Search {
///     q: String,
///     #[serde(skip_serializing_if = "Option::is_none")]
///     page: Option<u32>,
/// }
///
/// let pairs = to_query_pairs(&Search { q: "rust".to_string(), page: None }).expect("encode");
/// assert_eq!(pairs, vec![("q".to_string(), "rust".to_string())]);
/// ```
pub fn to_query_pairs<T: serde::Serialize + ?Sized>(value: &T) -> Result<Vec<(String, String)>> {
    let encoded = serde_html_form::to_string(value)?;
    Ok(url::form_urlencoded::parse(encoded.as_bytes())
        .into_owned()
        .collect())
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "user.address.city").
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })?;
    deserializer
        .end()
        .map_err(|e| crate::Error::json_deserialization(".", e.to_string()))?;
    Ok(value)
}
