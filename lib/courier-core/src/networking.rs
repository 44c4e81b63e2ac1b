//! Typed errors of a service call.
//!
//! A call ends in exactly one of:
//! - the decoded `Output` of the service,
//! - a [`NetworkingError`] (the request could not be built, the response was
//!   not HTTP, or the status was outside `200..=299`), possibly carrying the
//!   decoded `ErrorResponse` sent by the server,
//! - a decode error (a success status with a body that does not match
//!   `Output`),
//! - a transport error (the engine produced no response at all).
//!
//! [`ServiceError`] unifies the three failure branches.

use std::fmt;

use derive_more::Display;

use crate::Error;

// ============================================================================
// Status Classification
// ============================================================================

/// Classification of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The request could not be built from the service description.
    UnableToParseResponse,
    /// The transport answered with something that is not an HTTP response.
    Unknown,
    /// The server answered with a status outside `200..=299`.
    Code(u16),
}

impl Status {
    /// Numeric status code, if the server answered with one.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(*code),
            Self::UnableToParseResponse | Self::Unknown => None,
        }
    }

    /// Returns `true` for 4xx codes.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Code(400..=499))
    }

    /// Returns `true` for 5xx codes.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Code(500..=599))
    }

    /// Canonical reason phrase of the status code (e.g. `"Not Found"`).
    #[must_use]
    pub fn reason(&self) -> Option<&'static str> {
        self.code()
            .and_then(|code| http::StatusCode::from_u16(code).ok())
            .and_then(|status| status.canonical_reason())
    }
}

impl From<u16> for Status {
    fn from(code: u16) -> Self {
        Self::Code(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnableToParseResponse => write!(f, "unable to parse response"),
            Self::Unknown => write!(f, "unknown response"),
            Self::Code(code) => match self.reason() {
                Some(reason) => write!(f, "HTTP {code} {reason}"),
                None => write!(f, "HTTP {code}"),
            },
        }
    }
}

// ============================================================================
// Networking Error
// ============================================================================

/// A classified failure, with the server's error body when it could be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("networking error: {status}")]
pub struct NetworkingError<E> {
    status: Status,
    response: Option<E>,
}

impl<E> NetworkingError<E> {
    /// Create a networking error.
    #[must_use]
    pub const fn new(status: Status, response: Option<E>) -> Self {
        Self { status, response }
    }

    /// Error for a request that could not be built. Never carries a body.
    #[must_use]
    pub const fn unable_to_parse_response() -> Self {
        Self::new(Status::UnableToParseResponse, None)
    }

    /// Error for a response with a non-success status code.
    #[must_use]
    pub const fn code(code: u16, response: Option<E>) -> Self {
        Self::new(Status::Code(code), response)
    }

    /// Error for a response that is not HTTP.
    #[must_use]
    pub const fn unknown(response: Option<E>) -> Self {
        Self::new(Status::Unknown, response)
    }

    /// Status classification.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Decoded error body, if the server sent one that matched `E`.
    #[must_use]
    pub const fn response(&self) -> Option<&E> {
        self.response.as_ref()
    }

    /// Consume into the decoded error body.
    #[must_use]
    pub fn into_response(self) -> Option<E> {
        self.response
    }
}

impl<E: fmt::Debug> std::error::Error for NetworkingError<E> {}

// ============================================================================
// Service Error
// ============================================================================

/// Error returned by a service call.
#[derive(Debug, Display)]
pub enum ServiceError<E> {
    /// Classified failure: build error, non-HTTP response, or non-2xx status.
    #[display("{_0}")]
    Networking(NetworkingError<E>),

    /// The success body did not match the service's `Output`.
    #[display("unable to decode response: {_0}")]
    Decode(Error),

    /// The engine failed before any response arrived.
    #[display("transport error: {_0}")]
    Transport(Error),
}

impl<E> ServiceError<E> {
    /// Status classification, for the networking branch.
    #[must_use]
    pub const fn status(&self) -> Option<Status> {
        match self {
            Self::Networking(err) => Some(err.status()),
            Self::Decode(_) | Self::Transport(_) => None,
        }
    }

    /// Decoded server error body, for the networking branch.
    #[must_use]
    pub const fn error_response(&self) -> Option<&E> {
        match self {
            Self::Networking(err) => err.response(),
            Self::Decode(_) | Self::Transport(_) => None,
        }
    }

    /// Returns `true` for the networking branch.
    #[must_use]
    pub const fn is_networking(&self) -> bool {
        matches!(self, Self::Networking(_))
    }

    /// Returns `true` when the success body failed to decode.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Returns `true` when no response arrived.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Consume into the networking error, if any.
    #[must_use]
    pub fn into_networking(self) -> Option<NetworkingError<E>> {
        match self {
            Self::Networking(err) => Some(err),
            Self::Decode(_) | Self::Transport(_) => None,
        }
    }
}

impl<E> From<NetworkingError<E>> for ServiceError<E> {
    fn from(err: NetworkingError<E>) -> Self {
        Self::Networking(err)
    }
}

impl<E: fmt::Debug + 'static> std::error::Error for ServiceError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Networking(err) => Some(err),
            Self::Decode(err) | Self::Transport(err) => Some(err),
        }
    }
}
