//! Service execution.
//!
//! [`RequestExecutor`] runs one [`NetworkingService`] call from end to end:
//! build the [`RequestEnvelope`], send it through an [`HttpClient`], and
//! [`classify`] what comes back.

use std::time::Duration;

use tracing::{debug, trace};

use crate::{
    ClientConfig, Decoder, HttpClient, HyperClient, JsonDecoder, NetworkingError,
    NetworkingService, RawResponse, RequestEnvelope, ServiceError, classify,
};

/// Executes service descriptions against an HTTP engine.
///
/// The executor holds no per-call state: each call builds its own envelope
/// and consumes its own response, so one executor can serve concurrent calls.
///
/// # Example
///
/// ```ignore
/// use courier::RequestExecutor;
///
/// let executor = RequestExecutor::new();
/// match executor.execute(&GetUser { id: 42 }).await {
///     Ok(user) => println!("{user:?}"),
///     Err(err) => match err.error_response() {
///         Some(api_error) => println!("{}: {}", err, api_error.message),
///         None => println!("{err}"),
///     },
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequestExecutor<C, D = JsonDecoder> {
    client: C,
    decoder: D,
    timeout: Option<Duration>,
}

impl RequestExecutor<HyperClient> {
    /// Executor over a default [`HyperClient`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Executor over a [`HyperClient`] built from `config`.
    ///
    /// The configured timeout is passed through in every envelope.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let timeout = config.timeout;
        Self::with_client(HyperClient::with_config(config)).with_timeout(timeout)
    }
}

impl Default for RequestExecutor<HyperClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RequestExecutor<C> {
    /// Executor over any engine, decoding JSON.
    ///
    /// No timeout is put in the envelopes; the engine's own default applies.
    #[must_use]
    pub const fn with_client(client: C) -> Self {
        Self {
            client,
            decoder: JsonDecoder,
            timeout: None,
        }
    }
}

impl<C, D> RequestExecutor<C, D> {
    /// Replace the decoder used for both `Output` and `ErrorResponse`.
    #[must_use]
    pub fn with_decoder<D2>(self, decoder: D2) -> RequestExecutor<C, D2> {
        RequestExecutor {
            client: self.client,
            decoder,
            timeout: self.timeout,
        }
    }

    /// Set the timeout passed through to the engine.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The HTTP engine.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// The decoder.
    #[must_use]
    pub const fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Timeout passed through to the engine, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Consume the executor and return the engine.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }
}

impl<C, D> RequestExecutor<C, D>
where
    C: HttpClient,
    D: Decoder,
{
    /// Call `service` and decode its `Output`.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Networking`] with
    ///   [`Status::UnableToParseResponse`](crate::Status::UnableToParseResponse)
    ///   when the request cannot be built (nothing is sent),
    /// - [`ServiceError::Transport`] when the engine gets no response,
    /// - [`ServiceError::Networking`] with
    ///   [`Status::Unknown`](crate::Status::Unknown) or
    ///   [`Status::Code`](crate::Status::Code) for a non-HTTP or non-`2xx`
    ///   response,
    /// - [`ServiceError::Decode`] when a `2xx` body does not match `Output`.
    pub async fn execute<S>(&self, service: &S) -> Result<S::Output, ServiceError<S::ErrorResponse>>
    where
        S: NetworkingService + ?Sized,
    {
        let response = self.execute_raw(service).await?;
        classify(&self.decoder, &response)
    }

    /// Call `service` and return the unclassified response.
    ///
    /// Useful when headers matter; pair with [`classify`] to decode.
    ///
    /// # Errors
    ///
    /// Build and transport failures, as for [`execute`](Self::execute).
    pub async fn execute_raw<S>(
        &self,
        service: &S,
    ) -> Result<RawResponse, ServiceError<S::ErrorResponse>>
    where
        S: NetworkingService + ?Sized,
    {
        let request = RequestEnvelope::from_service(service, self.timeout).map_err(|err| {
            debug!(error = %err, "unable to build request");
            ServiceError::from(NetworkingError::unable_to_parse_response())
        })?;

        trace!(method = %request.method(), url = %request.url(), "dispatching request");

        self.client
            .execute(request)
            .await
            .map_err(ServiceError::Transport)
    }
}
