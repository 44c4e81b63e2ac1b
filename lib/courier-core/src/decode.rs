//! Response body decoding.

use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

use crate::{Result, from_json};

/// Turns raw response bytes into a declared payload type.
///
/// The executor uses one decoder for both the success `Output` and the
/// server's `ErrorResponse`.
///
/// # Example
///
/// ```ignore
/// use courier_core::{Decoder, Result};
///
/// struct YamlDecoder;
///
/// impl Decoder for YamlDecoder {
///     fn decode<T: serde::de::DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
///         serde_yaml::from_slice(bytes)
///             .map_err(|e| courier_core::Error::json_deserialization("", e.to_string()))
///     }
/// }
/// ```
pub trait Decoder: Send + Sync {
    /// Decode `bytes` as `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not match the shape of `T`.
    fn decode<T: serde::de::DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

/// JSON decoder with path-aware errors.
///
/// An empty (or whitespace-only) body is read as `null`, so `()`, [`Empty`]
/// and `Option<T>` decode from a `204 No Content`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode<T: serde::de::DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            from_json(b"null")
        } else {
            from_json(bytes)
        }
    }
}

/// Payload type for calls that return nothing useful.
///
/// Decodes from any body, including an empty one, and discards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Empty;

impl<'de> Deserialize<'de> for Empty {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(deserializer).map(|_| Self)
    }
}
