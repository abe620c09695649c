//! Resource operations: one named call per service endpoint.
//!
//! # Design
//! Each operation is one dispatcher call followed by one decoder call. The
//! operation decides which response shape to expect (entity, index envelope,
//! or bulk envelope with one or many results). Nothing here retries, caches,
//! or walks pages; a [`PageRequest`] selects a single page and the caller
//! decides whether to ask for the next one.

mod attachments;
mod columns;
mod discussions;
mod rows;
mod sheets;
mod sights;
mod templates;
mod users;
mod workspaces;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::Client;
use crate::envelope::{decode_entity, decode_envelope, decode_index, Envelope, IndexEnvelope};
use crate::error::ApiError;
use crate::http::HttpMethod;

/// Page selection for listing endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// One-based. The service clamps values past the last page.
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Ask for every item in one response; overrides paging.
    pub include_all: bool,
}

impl PageRequest {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
            include_all: false,
        }
    }

    pub fn all() -> Self {
        Self {
            include_all: true,
            ..Self::default()
        }
    }

    /// Query string including the leading `?`, or empty.
    pub fn query(&self) -> String {
        let mut params = Vec::new();
        if self.include_all {
            params.push("includeAll=true".to_string());
        } else {
            if let Some(page) = self.page {
                params.push(format!("page={page}"));
            }
            if let Some(size) = self.page_size {
                params.push(format!("pageSize={size}"));
            }
        }
        query_string(&params)
    }
}

pub(crate) fn query_string(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

impl Client {
    pub(crate) fn fetch_entity<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        decode_entity(&self.get(path)?.body)
    }

    pub(crate) fn fetch_index(&self, path: &str) -> Result<IndexEnvelope, ApiError> {
        decode_index(&self.get(path)?.body)
    }

    pub(crate) fn write_one<P, T>(&self, method: HttpMethod, path: &str, payload: &P) -> Result<Envelope<T>, ApiError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, path, Some(payload), &[])?;
        decode_envelope(&response.body)?.resolve_one()
    }

    pub(crate) fn write_many<P, T>(&self, method: HttpMethod, path: &str, payload: &P) -> Result<Envelope<Vec<T>>, ApiError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, path, Some(payload), &[])?;
        decode_envelope(&response.body)?.resolve_many()
    }

    pub(crate) fn remove(&self, path: &str) -> Result<Envelope<()>, ApiError> {
        Ok(decode_envelope(&self.delete(path)?.body)?.without_result())
    }
}
