//! Typed service calls over HTTP.
//!
//! Describe an endpoint with [`NetworkingService`], run it with a
//! [`RequestExecutor`], and get back either the decoded `Output` or a
//! [`ServiceError`] that tells a build failure, a transport failure, a
//! non-success status (with the server's decoded error body) and a malformed
//! success body apart.
//!
//! # Example
//!
//! ```ignore
//! use std::borrow::Cow;
//!
//! use courier::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! pub struct ApiError {
//!     message: String,
//! }
//!
//! pub struct GetUser(pub u64);
//!
//! impl NetworkingService for GetUser {
//!     type Output = User;
//!     type ErrorResponse = ApiError;
//!
//!     fn base_url(&self) -> &str {
//!         "https://api.example.com"
//!     }
//!
//!     fn path(&self) -> Cow<'_, str> {
//!         format!("/users/{}", self.0).into()
//!     }
//! }
//!
//! let executor = RequestExecutor::new();
//! match executor.execute(&GetUser(42)).await {
//!     Ok(user) => println!("{user:?}"),
//!     Err(ServiceError::Networking(err)) if err.status() == Status::Code(404) => {
//!         println!("no such user");
//!     }
//!     Err(err) => return Err(err.into()),
//! }
//! ```

mod client;
mod config;
mod connector;
mod executor;
pub mod middleware;
pub mod prelude;

pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use executor::RequestExecutor;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use courier_core::{
    Body, ContentType, Decoder, Empty, Error, HttpClient, JsonDecoder, Method, NetworkingError,
    NetworkingService, RawResponse, RequestEnvelope, RequestEnvelopeBuilder, Result, ServiceError,
    Status, classify, from_json, networking, to_form, to_json, to_query_pairs,
};

// Re-export http types for status codes and headers
pub use courier_core::{StatusCode, header};

pub use url;
