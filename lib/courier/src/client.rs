//! HTTP engine implementation using hyper-util.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::util::BoxCloneService;
use tower::{Layer, ServiceExt};
use tower_service::Service;

use crate::{
    Error, RawResponse, RequestEnvelope, Result,
    config::{ClientConfig, ClientConfigBuilder},
    connector::https_connector,
    middleware::LoggingLayer,
};

// ============================================================================
// Type-Erased Service for Middleware Composition
// ============================================================================

/// Type-erased engine service, the unit of middleware composition.
pub type BoxedService = BoxCloneService<RequestEnvelope, RawResponse, Error>;

/// Future type for the Tower Service implementation.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<RawResponse>> + Send + 'static>>;

/// Makes a `BoxedService` shareable across threads.
///
/// The mutex is held only long enough to clone the service; each call then
/// drives its own clone through `poll_ready` before dispatching.
#[derive(Clone)]
struct SyncService {
    inner: Arc<Mutex<BoxedService>>,
}

impl SyncService {
    fn new(service: BoxedService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn call(&self, request: RequestEnvelope) -> ServiceFuture {
        let service = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        Box::pin(service.oneshot(request))
    }
}

// ============================================================================
// Raw Client
// ============================================================================

#[derive(Clone)]
struct RawHyperClient {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: ClientConfig,
}

impl RawHyperClient {
    fn new(config: ClientConfig) -> Self {
        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector(&config));

        Self { inner, config }
    }

    fn build_hyper_request(request: RequestEnvelope) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body) = request.into_parts();

        let mut hyper_request = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str())
            .body(body.map_or_else(Full::default, Full::new))
            .map_err(|e| Error::invalid_request(e.to_string()))?;
        *hyper_request.headers_mut() = headers;

        Ok(hyper_request)
    }

    /// The deadline covers the whole exchange, body included.
    async fn execute(&self, request: RequestEnvelope) -> Result<RawResponse> {
        let timeout = self.config.timeout_for(&request);
        let hyper_request = Self::build_hyper_request(request)?;

        tokio::time::timeout(timeout, self.round_trip(hyper_request))
            .await
            .map_err(|_| Error::Timeout)?
    }

    async fn round_trip(&self, request: http::Request<Full<Bytes>>) -> Result<RawResponse> {
        let response = self
            .inner
            .request(request)
            .await
            .map_err(Self::map_hyper_error)?;

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(RawResponse::http(parts.status.as_u16(), parts.headers, body))
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Service<RequestEnvelope> for RawHyperClient {
    type Response = RawResponse;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: RequestEnvelope) -> Self::Future {
        let client = self.clone();
        Box::pin(async move { client.execute(request).await })
    }
}

// ============================================================================
// Public Client
// ============================================================================

/// HTTP engine using hyper-util with connection pooling, TLS, and middleware support.
///
/// # Example
///
/// ```ignore
/// use courier::HyperClient;
/// use std::time::Duration;
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(10))
///     .with_logging()
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperClient {
    service: SyncService,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Create a new client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration (no middleware).
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let raw = RawHyperClient::new(config.clone());
        Self::with_service(BoxCloneService::new(raw), config)
    }

    fn with_service(service: BoxedService, config: ClientConfig) -> Self {
        Self {
            service: SyncService::new(service),
            config,
        }
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl courier_core::HttpClient for HyperClient {
    async fn execute(&self, request: RequestEnvelope) -> Result<RawResponse> {
        self.service.call(request).await
    }
}

impl Service<RequestEnvelope> for HyperClient {
    type Response = RawResponse;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: RequestEnvelope) -> Self::Future {
        self.service.call(request)
    }
}

/// Builder for [`HyperClient`].
///
/// # Example
///
/// ```ignore
/// use courier::HyperClient;
/// use courier::middleware::LoggingLayer;
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Default)]
pub struct HyperClientBuilder {
    config: ClientConfigBuilder,
    layers: Vec<Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers_count", &self.layers.len())
            .finish()
    }
}

impl HyperClientBuilder {
    // ========================================================================
    // Core Configuration
    // ========================================================================

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.config = ClientConfigBuilder::from(config.clone());
        self
    }

    /// Set the default request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    // ========================================================================
    // Middleware
    // ========================================================================

    /// Add a Tower layer to the client.
    ///
    /// Layers are applied in order: first added = innermost.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<RequestEnvelope, Response = RawResponse, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<RequestEnvelope>>::Future: Send,
    {
        self.layers.push(Arc::new(move |service| {
            BoxCloneService::new(layer.layer(service))
        }));
        self
    }

    /// Add request/response logging.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Add debug-level logging (includes headers).
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the client with all configured middleware.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let config = self.config.build();
        let mut service: BoxedService = BoxCloneService::new(RawHyperClient::new(config.clone()));

        for layer_fn in self.layers {
            service = layer_fn(service);
        }

        HyperClient::with_service(service, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_default() {
        let client = HyperClient::new();
        assert_eq!(client.config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn client_builder() {
        let client = HyperClient::builder()
            .timeout(Duration::from_secs(60))
            .pool_idle_per_host(16)
            .with_logging()
            .build();

        assert_eq!(client.config().timeout, Duration::from_secs(60));
        assert_eq!(client.config().pool_idle_per_host, 16);
    }

    #[test]
    fn builder_accepts_whole_config() {
        let config = ClientConfig::builder()
            .connect_timeout(Duration::from_secs(2))
            .build();
        let client = HyperClient::builder().config(&config).build();

        assert_eq!(client.config(), &config);
    }

    #[test]
    fn client_is_debug() {
        let client = HyperClient::new();
        let debug = format!("{client:?}");
        assert!(debug.contains("HyperClient"));
    }
}
