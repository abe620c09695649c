use crate::client::Client;
use crate::envelope::{Envelope, IndexEnvelope};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::Sheet;

use super::PageRequest;

impl Client {
    /// Fetch a sheet with its columns and rows.
    pub fn get_sheet(&self, sheet_id: i64) -> Result<Sheet, ApiError> {
        self.fetch_entity(&format!("/sheets/{sheet_id}"))
    }

    /// List sheets visible to the token owner. Records decode as [`Sheet`].
    pub fn list_sheets(&self, page: &PageRequest) -> Result<IndexEnvelope, ApiError> {
        self.fetch_index(&format!("/sheets{}", page.query()))
    }

    /// Create a sheet in the user's "Sheets" folder from `sheet.name` and `sheet.columns`.
    pub fn create_sheet(&self, sheet: &Sheet) -> Result<Envelope<Sheet>, ApiError> {
        self.write_one(HttpMethod::Post, "/sheets", sheet)
    }

    pub fn update_sheet(&self, sheet_id: i64, sheet: &Sheet) -> Result<Envelope<Sheet>, ApiError> {
        self.write_one(HttpMethod::Put, &format!("/sheets/{sheet_id}"), sheet)
    }

    pub fn delete_sheet(&self, sheet_id: i64) -> Result<Envelope<()>, ApiError> {
        self.remove(&format!("/sheets/{sheet_id}"))
    }
}
