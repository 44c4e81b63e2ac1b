//! Tower middleware layers for the HTTP engine.
//!
//! Layers wrap the engine's [`BoxedService`](crate::BoxedService) and see every
//! [`RequestEnvelope`](crate::RequestEnvelope) before it is sent and every
//! [`RawResponse`](crate::RawResponse) before it is classified.
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use courier::HyperClient;
//! use courier::middleware::{LoggingLayer, ServiceBuilder};
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
