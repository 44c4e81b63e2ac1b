//! Core types and traits for the courier service client.
//!
//! This crate provides the engine-agnostic building blocks:
//! - [`NetworkingService`] - Declarative description of one endpoint call
//! - [`RequestEnvelope`] - The outbound request built from a service
//! - [`RawResponse`] - The unclassified transport result
//! - [`classify`] - Maps a raw response to `Output` or [`ServiceError`]
//! - [`NetworkingError`] and [`Status`] - Typed failure of a call
//! - [`Decoder`] and [`JsonDecoder`] - Payload decoding
//! - [`HttpClient`] - The HTTP engine trait
//! - [`Error`] and [`Result`] - Engine, build and codec errors

mod body;
mod classify;
mod client;
mod decode;
mod error;
mod method;
pub mod networking;
mod request;
mod response;
mod service;

pub use body::{Body, ContentType, from_json, to_form, to_json, to_query_pairs};
pub use classify::classify;
pub use client::HttpClient;
pub use decode::{Decoder, Empty, JsonDecoder};
pub use error::{Error, Result};
pub use method::Method;
pub use networking::{NetworkingError, ServiceError, Status};
pub use request::{RequestEnvelope, RequestEnvelopeBuilder};
pub use response::RawResponse;
pub use service::NetworkingService;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
