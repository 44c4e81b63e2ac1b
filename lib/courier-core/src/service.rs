//! Declarative service descriptions.

use std::borrow::Cow;

use crate::{Body, Method, Result};

/// Description of a single endpoint call.
///
/// A service says *where* to send the request, *what* to send, and which
/// shapes to expect back: `Output` for a `2xx` response and `ErrorResponse`
/// for the body of any other response.
///
/// Only [`base_url`](Self::base_url) and [`path`](Self::path) are required;
/// everything else defaults to a bodyless `GET` without extra headers.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
///
/// use courier_core::{Body, Method, NetworkingService, Result};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Deserialize)]
/// struct User { id: u64, name: String }
///
/// #[derive(Debug, Deserialize)]
/// struct ApiError { message: String }
///
/// #[derive(Serialize)]
/// struct RenameUser { id: u64, name: String }
///
/// impl NetworkingService for RenameUser {
///     type Output = User;
///     type ErrorResponse = ApiError;
///
///     fn base_url(&self) -> &str {
///         "https://api.example.com"
///     }
///
///     fn path(&self) -> Cow<'_, str> {
///         format!("/users/{}", self.id).into()
///     }
///
///     fn method(&self) -> Method {
///         Method::Patch
///     }
///
///     fn body(&self) -> Result<Option<Body>> {
///         Body::json(self).map(Some)
///     }
/// }
/// ```
pub trait NetworkingService: Send + Sync {
    /// Payload of a successful (`2xx`) response.
    type Output: serde::de::DeserializeOwned + Send;

    /// Payload the server sends along with a failure status.
    type ErrorResponse: serde::de::DeserializeOwned + Send;

    /// Scheme and authority, optionally with a path prefix.
    fn base_url(&self) -> &str;

    /// Path appended to the base URL.
    fn path(&self) -> Cow<'_, str>;

    /// HTTP method.
    fn method(&self) -> Method {
        Method::Get
    }

    /// Extra request headers.
    fn headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Query parameters, in order.
    fn query(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Encoded request body.
    ///
    /// # Errors
    ///
    /// An encoding error makes the call fail before anything is sent.
    fn body(&self) -> Result<Option<Body>> {
        Ok(None)
    }
}
