//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier::prelude::*;
//! ```

pub use crate::{
    Body, ClientConfig, ContentType, Empty, Error, HttpClient, HyperClient, Method,
    NetworkingError, NetworkingService, RawResponse, RequestExecutor, Result, ServiceError,
    Status, StatusCode, header,
};
pub use serde::{Deserialize, Serialize};
