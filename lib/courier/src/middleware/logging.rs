//! Call logging middleware.
//!
//! Each envelope runs inside an `http_request` span. Once the engine answers,
//! the span gets the response [`Status`] and one event says how
//! [`classify`](crate::classify) will treat the response.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, field, info, span, warn};

use crate::{Error, RawResponse, RequestEnvelope, Result, Status};

/// Layer that logs each call and its classified outcome.
///
/// # Example
///
/// ```ignore
/// use courier::HyperClient;
/// use courier::middleware::LoggingLayer;
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::new())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Detail of the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Also log headers, body sizes and timeouts at debug level.
    Debug,
    /// Outcome only.
    #[default]
    Info,
}

impl LoggingLayer {
    /// Outcome-only logging.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logging with request and response details.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Detail this layer logs with.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

/// Branch the classifier takes for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Success,
    Rejected,
    Failed,
    Unexpected,
    NotHttp,
}

impl Verdict {
    const fn of(response: &RawResponse) -> Self {
        match response.status() {
            None => Self::NotHttp,
            Some(200..=299) => Self::Success,
            Some(400..=499) => Self::Rejected,
            Some(500..=599) => Self::Failed,
            Some(_) => Self::Unexpected,
        }
    }
}

fn log_response(response: &RawResponse, level: LogLevel, elapsed_ms: u64) {
    let status = response.status().map_or(Status::Unknown, Status::from);

    if level == LogLevel::Debug {
        debug!(
            headers = ?response.headers(),
            body_len = response.body().len(),
            "response received"
        );
    }

    match Verdict::of(response) {
        Verdict::Success => info!(%status, elapsed_ms, "call succeeded"),
        Verdict::Rejected => warn!(%status, elapsed_ms, "call rejected by service"),
        Verdict::Failed => warn!(%status, elapsed_ms, "service failed"),
        Verdict::Unexpected => warn!(%status, elapsed_ms, "status outside success range"),
        Verdict::NotHttp => warn!(%status, elapsed_ms, "response is not HTTP"),
    }
}

impl<S> Service<RequestEnvelope> for Logging<S>
where
    S: Service<RequestEnvelope, Response = RawResponse, Error = Error>,
    S::Future: Send + 'static,
{
    type Response = RawResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: RequestEnvelope) -> Self::Future {
        let level = self.level;
        let span = span!(
            Level::INFO,
            "http_request",
            method = %request.method(),
            url = %request.url(),
            status = field::Empty
        );

        if level == LogLevel::Debug {
            span.in_scope(|| {
                debug!(
                    headers = ?request.headers(),
                    body_len = request.body().map_or(0, bytes::Bytes::len),
                    timeout = ?request.timeout(),
                    "sending request"
                );
            });
        }

        // `poll_ready` reserved `self.inner` for this call.
        let future = self.inner.call(request);
        Box::pin(
            async move {
                let start = Instant::now();
                let result = future.await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) => {
                        if let Some(code) = response.status() {
                            tracing::Span::current().record("status", code);
                        }
                        log_response(response, level, elapsed_ms);
                    }
                    Err(err) => warn!(error = %err, elapsed_ms, "no response"),
                }

                result
            }
            .instrument(span),
        )
    }
}
