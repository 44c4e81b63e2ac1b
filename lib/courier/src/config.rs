//! Engine and executor settings.

use std::time::Duration;

use crate::RequestEnvelope;

/// Settings shared by [`HyperClient`](crate::HyperClient) and
/// [`RequestExecutor`](crate::RequestExecutor).
///
/// `timeout` is the value passed through on every envelope the executor
/// builds; the engine falls back to it for envelopes that carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Deadline for one call, from dispatch until the whole body is read.
    pub timeout: Duration,
    /// Deadline for establishing a connection.
    pub connect_timeout: Duration,
    /// Idle pooled connections kept per host.
    pub pool_idle_per_host: usize,
    /// How long a pooled connection may stay idle.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    /// Starts from the defaults.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Deadline that applies to `request`: its own, else [`timeout`](Self::timeout).
    #[must_use]
    pub fn timeout_for(&self, request: &RequestEnvelope) -> Duration {
        request.timeout().unwrap_or(self.timeout)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl From<ClientConfig> for ClientConfigBuilder {
    fn from(config: ClientConfig) -> Self {
        Self { config }
    }
}

impl ClientConfigBuilder {
    /// Set the call deadline.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connect deadline.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the idle connections kept per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config.pool_idle_per_host = count;
        self
    }

    /// Set the idle connection lifetime.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Finish the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
