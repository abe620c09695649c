//! Response envelopes and the decoder that turns raw bodies into typed values.
//!
//! # Design
//! The service answers in three shapes and never says which one it used:
//! a plain entity body, an index (page) envelope, and a bulk envelope whose
//! `result` is sometimes one object and sometimes an array. The caller picks
//! the decode function, and for bulk envelopes also states the expected
//! [`Arity`].
//!
//! Bulk decoding runs in two phases. The body is first read into
//! [`RawEnvelope`], which keeps `result` as untyped JSON so that
//! `resultCode`, `message`, `version` and `failedItems` are always captured.
//! [`RawEnvelope::resolve`] then reads `result` into the concrete type.
//!
//! A `resultCode` of 3 (partial success) decodes successfully. Callers inspect
//! `failed_items` themselves.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// `resultCode` of a fully successful call.
pub const RESULT_SUCCESS: i64 = 0;
/// `resultCode` of a bulk call where some items failed.
pub const RESULT_PARTIAL_SUCCESS: i64 = 3;

/// Error body returned with any non-2xx status, and nested inside each
/// [`BulkItemFailure`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorObject {
    /// Sent as a number by the service; some proxies send it as a string.
    #[serde(deserialize_with = "string_or_number")]
    pub error_code: String,
    pub ref_id: String,
    pub message: String,
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "errorCode={} refId={} message={}",
            self.error_code, self.ref_id, self.message
        )
    }
}

/// One failed item of a bulk request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulkItemFailure {
    /// Zero-based position of the item in the request array.
    pub index: usize,
    /// Only set by bulk row operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_id: Option<i64>,
    pub error: ErrorObject,
}

/// How many entities a call site expects in the bulk envelope's `result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    One,
    Many,
}

/// The resolved `result` of a bulk envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkResult<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> BulkResult<T> {
    pub fn len(&self) -> usize {
        match self {
            BulkResult::One(_) => 1,
            BulkResult::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a vector; a single result becomes a one-element vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            BulkResult::One(item) => vec![item],
            BulkResult::Many(items) => items,
        }
    }

    /// The single result, or the first of many.
    pub fn into_one(self) -> Option<T> {
        match self {
            BulkResult::One(item) => Some(item),
            BulkResult::Many(items) => items.into_iter().next(),
        }
    }
}

/// Bulk envelope after the first decode phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEnvelope {
    pub result_code: i64,
    pub message: String,
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub failed_items: Vec<BulkItemFailure>,
}

impl RawEnvelope {
    /// Second decode phase: read the untyped `result` as `arity` items of `T`.
    ///
    /// A missing or null `result` resolves to an empty `Many`. For `One` it is
    /// handed to `T` as JSON null, which fails unless `T` accepts null.
    pub fn resolve<T: DeserializeOwned>(self, arity: Arity) -> Result<Envelope<BulkResult<T>>, ApiError> {
        match arity {
            Arity::One => Ok(self.resolve_one()?.map(BulkResult::One)),
            Arity::Many => Ok(self.resolve_many()?.map(BulkResult::Many)),
        }
    }

    /// [`resolve`](Self::resolve) for call sites that always expect one entity.
    pub fn resolve_one<T: DeserializeOwned>(self) -> Result<Envelope<T>, ApiError> {
        let (envelope, result) = self.split();
        let item = serde_json::from_value(result.unwrap_or(Value::Null)).map_err(ApiError::Decode)?;
        Ok(envelope.map(|()| item))
    }

    /// [`resolve`](Self::resolve) for call sites that always expect a sequence.
    pub fn resolve_many<T: DeserializeOwned>(self) -> Result<Envelope<Vec<T>>, ApiError> {
        let (envelope, result) = self.split();
        let items = match result {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value(value).map_err(ApiError::Decode)?,
        };
        Ok(envelope.map(|()| items))
    }

    /// Drop `result` for calls whose payload carries nothing of interest.
    pub fn without_result(self) -> Envelope<()> {
        self.split().0
    }

    fn split(self) -> (Envelope<()>, Option<Value>) {
        let envelope = Envelope {
            result_code: self.result_code,
            message: self.message,
            version: self.version,
            result: (),
            failed_items: self.failed_items,
        };
        (envelope, self.result)
    }
}

/// Bulk envelope with a typed `result`.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub result_code: i64,
    /// `SUCCESS` or `PARTIAL_SUCCESS`.
    pub message: String,
    /// New sheet version; only meaningful after a write.
    pub version: i64,
    pub result: T,
    pub failed_items: Vec<BulkItemFailure>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.result_code == RESULT_SUCCESS
    }

    pub fn is_partial_success(&self) -> bool {
        self.result_code == RESULT_PARTIAL_SUCCESS
    }

    /// Request positions of the items the service rejected.
    pub fn failed_indexes(&self) -> Vec<usize> {
        self.failed_items.iter().map(|f| f.index).collect()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            result_code: self.result_code,
            message: self.message,
            version: self.version,
            result: f(self.result),
            failed_items: self.failed_items,
        }
    }
}

/// List/paging envelope. Records stay untyped until the caller decodes them.
///
/// The service clamps `pageNumber` to the last page when a larger page is
/// requested, so repeating a request past the end returns the last page again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<Value>,
    pub page_number: i64,
    /// Absent when the listing has no page size limit.
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

impl IndexEnvelope {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_last_page(&self) -> bool {
        self.page_number >= self.total_pages
    }

    pub fn decode_items<T: DeserializeOwned>(&self) -> Result<Vec<T>, ApiError> {
        self.data
            .iter()
            .map(|value| T::deserialize(value).map_err(ApiError::Decode))
            .collect()
    }

    pub fn decode_item<T: DeserializeOwned>(&self, index: usize) -> Result<Option<T>, ApiError> {
        self.data
            .get(index)
            .map(|value| T::deserialize(value).map_err(ApiError::Decode))
            .transpose()
    }
}

/// Decode a plain entity body. Unknown fields are ignored.
pub fn decode_entity<T: DeserializeOwned>(body: impl AsRef<[u8]>) -> Result<T, ApiError> {
    serde_json::from_slice(body.as_ref()).map_err(ApiError::Decode)
}

/// First decode phase of a bulk envelope.
pub fn decode_envelope(body: impl AsRef<[u8]>) -> Result<RawEnvelope, ApiError> {
    serde_json::from_slice(body.as_ref()).map_err(ApiError::Decode)
}

/// Both decode phases of a bulk envelope.
pub fn decode_bulk<T: DeserializeOwned>(body: impl AsRef<[u8]>, arity: Arity) -> Result<Envelope<BulkResult<T>>, ApiError> {
    decode_envelope(body)?.resolve(arity)
}

pub fn decode_index(body: impl AsRef<[u8]>) -> Result<IndexEnvelope, ApiError> {
    serde_json::from_slice(body.as_ref()).map_err(ApiError::Decode)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Code>::deserialize(deserializer)? {
        Some(Code::Text(text)) => text,
        Some(Code::Number(number)) => match number.as_f64() {
            Some(float) if number.is_f64() && float.fract() == 0.0 => format!("{float:.0}"),
            _ => number.to_string(),
        },
        None => String::new(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
