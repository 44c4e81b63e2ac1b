//! HTTP engine trait.
//!
//! The engine moves a [`RequestEnvelope`] over the wire and hands back the
//! unclassified [`RawResponse`]. Pooling, TLS and timeouts are its business;
//! classification is not.

use std::future::Future;

use crate::{RawResponse, RequestEnvelope, Result};

/// Core HTTP engine trait.
///
/// Implement this trait to plug in another transport, or a scripted one for
/// tests.
///
/// # Example
///
/// ```
/// use courier_core::header::HeaderMap;
///
/// use courier_core::{HttpClient, RawResponse, RequestEnvelope, Result};
///
/// #[derive(Clone)]
/// struct AlwaysNoContent;
///
/// impl HttpClient for AlwaysNoContent {
///     async fn execute(&self, _request: RequestEnvelope) -> Result<RawResponse> {
///         Ok(RawResponse::http(204, HeaderMap::new(), ""))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Execute a request and return the raw response.
    ///
    /// Implementations should honour [`RequestEnvelope::timeout`].
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(&self, request: RequestEnvelope)
    -> impl Future<Output = Result<RawResponse>> + Send;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn execute(
        &self,
        request: RequestEnvelope,
    ) -> impl Future<Output = Result<RawResponse>> + Send {
        (**self).execute(request)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for std::sync::Arc<C> {
    fn execute(
        &self,
        request: RequestEnvelope,
    ) -> impl Future<Output = Result<RawResponse>> + Send {
        (**self).execute(request)
    }
}
