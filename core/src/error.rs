//! Error types for the Smartsheet client.
//!
//! # Design
//! Every failure a call can produce falls into one of four kinds: the request
//! never completed (`Transport`), the payload could not be encoded before
//! sending (`Serialization`), the service answered with a non-2xx status
//! (`Service` / `UnparsedServiceError`), or a 2xx body did not match the
//! expected shape (`Decode`). Partial success of a bulk call is not an error;
//! it is carried in the decoded envelope's `failed_items`.

use thiserror::Error;

use crate::envelope::ErrorObject;

/// Coarse classification of an [`ApiError`], for callers that only need to
/// branch on the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Serialization,
    Service,
    Decode,
    NotFound,
}

/// Errors returned by `Client` calls and the decode helpers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed: DNS, connection refused, or timeout.
    #[error("error calling the API endpoint: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON. Nothing was sent.
    #[error("could not serialize request payload: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The service returned a non-2xx status with a well-formed error body.
    #[error("failed call API endpoint. HTTP response code: {status}. Error: {error}")]
    Service { status: u16, error: ErrorObject },

    /// The service returned a non-2xx status whose body was not an error object.
    #[error("response did not contain formatted error: {reason}. HTTP response code: {status}")]
    UnparsedServiceError {
        status: u16,
        reason: String,
        body: String,
    },

    /// The response body was larger than the configured limit. Counts as a
    /// decode error on a 2xx status and as a service error otherwise.
    #[error("response body exceeds {limit} bytes. HTTP response code: {status}")]
    BodyTooLarge { status: u16, limit: u64 },

    /// A 2xx body could not be decoded into the expected shape.
    #[error("could not decode JSON response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A client-side lookup inside an already decoded value found nothing.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Serialization(_) => ErrorKind::Serialization,
            ApiError::Service { .. } | ApiError::UnparsedServiceError { .. } => ErrorKind::Service,
            ApiError::BodyTooLarge { status, .. } if (200..300).contains(status) => ErrorKind::Decode,
            ApiError::BodyTooLarge { .. } => ErrorKind::Service,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::NotFound(_) => ErrorKind::NotFound,
        }
    }

    /// HTTP status of a service error, `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Service { status, .. } | ApiError::UnparsedServiceError { status, .. } => {
                Some(*status)
            }
            ApiError::BodyTooLarge { status, .. } if !(200..300).contains(status) => Some(*status),
            _ => None,
        }
    }

    /// The decoded error object, when the service sent one.
    pub fn service_error(&self) -> Option<&ErrorObject> {
        match self {
            ApiError::Service { error, .. } => Some(error),
            _ => None,
        }
    }
}
