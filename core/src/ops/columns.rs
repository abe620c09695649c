use crate::client::Client;
use crate::envelope::{Envelope, IndexEnvelope};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::Column;

use super::PageRequest;

impl Client {
    /// Records decode as [`Column`].
    pub fn list_columns(&self, sheet_id: i64, page: &PageRequest) -> Result<IndexEnvelope, ApiError> {
        self.fetch_index(&format!("/sheets/{sheet_id}/columns{}", page.query()))
    }

    pub fn get_column(&self, sheet_id: i64, column_id: i64) -> Result<Column, ApiError> {
        self.fetch_entity(&format!("/sheets/{sheet_id}/columns/{column_id}"))
    }

    /// First column whose title equals `title`. Records are decoded one at a
    /// time and decoding stops at the match.
    pub fn get_column_by_name(&self, sheet_id: i64, title: &str) -> Result<Column, ApiError> {
        let index = self.list_columns(sheet_id, &PageRequest::all())?;
        for i in 0..index.len() {
            if let Some(column) = index.decode_item::<Column>(i)? {
                if column.title == title {
                    return Ok(column);
                }
            }
        }
        Err(ApiError::NotFound(format!("no column titled {title} in sheet {sheet_id}")))
    }

    pub fn add_columns(&self, sheet_id: i64, columns: &[Column]) -> Result<Envelope<Vec<Column>>, ApiError> {
        self.write_many(HttpMethod::Post, &format!("/sheets/{sheet_id}/columns"), columns)
    }

    pub fn update_column(&self, sheet_id: i64, column_id: i64, column: &Column) -> Result<Envelope<Column>, ApiError> {
        self.write_one(HttpMethod::Put, &format!("/sheets/{sheet_id}/columns/{column_id}"), column)
    }

    pub fn delete_column(&self, sheet_id: i64, column_id: i64) -> Result<Envelope<()>, ApiError> {
        self.remove(&format!("/sheets/{sheet_id}/columns/{column_id}"))
    }
}
