//! Status-based classification of raw responses.
//!
//! # Design
//! HTTP status is the only success signal inspected here. A 2xx response is
//! passed through untouched, even if its body is malformed; that surfaces
//! later as a decode error. Anything else is a service error, and its body is
//! expected to be a single `ErrorObject`.

use crate::envelope::ErrorObject;
use crate::error::ApiError;
use crate::http::HttpResponse;

/// Pass 2xx responses through; turn every other status into a service error.
pub fn check_response(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }

    match serde_json::from_slice::<ErrorObject>(&response.body) {
        Ok(error) => Err(ApiError::Service {
            status: response.status,
            error,
        }),
        Err(e) => Err(ApiError::UnparsedServiceError {
            status: response.status,
            reason: e.to_string(),
            body: response.text().into_owned(),
        }),
    }
}
