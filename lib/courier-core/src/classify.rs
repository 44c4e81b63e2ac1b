//! Response classification.

use serde::de::DeserializeOwned;

use crate::{Decoder, NetworkingError, RawResponse, ServiceError, Status};

/// Map a raw response to the decoded `Output` or a [`ServiceError`].
///
/// - no HTTP status: [`Status::Unknown`] with a best-effort `E` body,
/// - status outside `200..=299`: [`Status::Code`] with a best-effort `E` body,
/// - otherwise the body must decode as `O`, or the call fails with
///   [`ServiceError::Decode`].
///
/// A best-effort body that fails to decode is dropped; the classification is
/// kept. The result depends only on the status and the body bytes.
///
/// # Errors
///
/// Returns [`ServiceError::Networking`] for a non-success response and
/// [`ServiceError::Decode`] for a success response whose body does not match `O`.
///
/// # Example
///
/// ```
/// use courier_core::header::HeaderMap;
///
/// use courier_core::{JsonDecoder, RawResponse, Status, classify};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct ApiError { message: String }
///
/// let response = RawResponse::http(404, HeaderMap::new(), r#"{"message":"not found"}"#);
/// let err = classify::<u64, ApiError, _>(&JsonDecoder, &response).expect_err("404");
///
/// assert_eq!(err.status(), Some(Status::Code(404)));
/// assert_eq!(err.error_response().map(|e| e.message.as_str()), Some("not found"));
/// ```
pub fn classify<O, E, D>(decoder: &D, response: &RawResponse) -> Result<O, ServiceError<E>>
where
    O: DeserializeOwned,
    E: DeserializeOwned,
    D: Decoder + ?Sized,
{
    let status = match response.status() {
        None => Status::Unknown,
        Some(code @ 200..=299) => {
            tracing::trace!(status = code, "decoding success body");
            return decoder.decode(response.body()).map_err(ServiceError::Decode);
        }
        Some(code) => Status::Code(code),
    };

    let error_response = decode_best_effort(decoder, response);
    tracing::trace!(
        %status,
        has_error_response = error_response.is_some(),
        "classified failed response"
    );
    Err(NetworkingError::new(status, error_response).into())
}

fn decode_best_effort<E, D>(decoder: &D, response: &RawResponse) -> Option<E>
where
    E: DeserializeOwned,
    D: Decoder + ?Sized,
{
    decoder
        .decode(response.body())
        .inspect_err(|err| tracing::trace!(error = %err, "discarding undecodable error body"))
        .ok()
}
