//! Synchronous client binding for the Smartsheet REST API.
//!
//! # Overview
//! [`Client`] turns domain operations ("get sheet", "add rows") into
//! authenticated HTTP calls and turns the service's JSON envelopes back into
//! typed values.
//!
//! # Design
//! - `Client` is immutable after construction and safe to share between
//!   threads. Each call blocks up to the configured timeout.
//! - A call is split into a pure request build, a [`Transport`] round-trip,
//!   status classification ([`classify`]) and decoding ([`envelope`]).
//! - Bulk envelopes decode in two phases so `resultCode`, `version` and
//!   `failedItems` are always captured before `result` is typed.
//! - Partial success is data, not an error: inspect
//!   [`Envelope::failed_items`].
//! - No retries, caching or page traversal.

pub mod classify;
pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod ops;
pub mod types;

pub use client::{
    Client, ClientOptions, DEFAULT_BODY_LIMIT, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, TOKEN_ENV_VAR,
};
pub use envelope::{
    decode_bulk, decode_entity, decode_envelope, decode_index, Arity, BulkItemFailure, BulkResult,
    Envelope, ErrorObject, IndexEnvelope, RawEnvelope, RESULT_PARTIAL_SUCCESS, RESULT_SUCCESS,
};
pub use error::{ApiError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use ops::PageRequest;
