use crate::client::Client;
use crate::envelope::{decode_envelope, Envelope, IndexEnvelope};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::Row;

use super::{query_string, PageRequest};

impl Client {
    pub fn get_row(&self, sheet_id: i64, row_id: i64) -> Result<Row, ApiError> {
        self.fetch_entity(&format!("/sheets/{sheet_id}/rows/{row_id}"))
    }

    /// Insert rows. With `allow_partial_success` the service keeps the valid
    /// rows and reports the rest in `failed_items` (`resultCode` 3); without
    /// it, one bad row fails the whole call with a service error.
    pub fn add_rows(&self, sheet_id: i64, rows: &[Row], allow_partial_success: bool) -> Result<Envelope<Vec<Row>>, ApiError> {
        let path = format!("/sheets/{sheet_id}/rows{}", partial_success_query(allow_partial_success));
        self.write_many(HttpMethod::Post, &path, rows)
    }

    /// Update rows in place; each row must carry its `id`.
    pub fn update_rows(&self, sheet_id: i64, rows: &[Row], allow_partial_success: bool) -> Result<Envelope<Vec<Row>>, ApiError> {
        let path = format!("/sheets/{sheet_id}/rows{}", partial_success_query(allow_partial_success));
        self.write_many(HttpMethod::Put, &path, rows)
    }

    /// Delete rows by id. The result lists the ids that were removed.
    pub fn delete_rows(&self, sheet_id: i64, row_ids: &[i64], ignore_rows_not_found: bool) -> Result<Envelope<Vec<i64>>, ApiError> {
        let ids = row_ids.iter().map(i64::to_string).collect::<Vec<_>>().join(",");
        let mut params = vec![format!("ids={ids}")];
        if ignore_rows_not_found {
            params.push("ignoreRowsNotFound=true".to_string());
        }
        let path = format!("/sheets/{sheet_id}/rows{}", query_string(&params));
        let response = self.delete(&path)?;
        decode_envelope(&response.body)?.resolve_many()
    }

    /// Past values of one cell. Records decode as [`crate::types::Cell`].
    pub fn cell_history(&self, sheet_id: i64, row_id: i64, column_id: i64, page: &PageRequest) -> Result<IndexEnvelope, ApiError> {
        self.fetch_index(&format!(
            "/sheets/{sheet_id}/rows/{row_id}/columns/{column_id}/history{}",
            page.query()
        ))
    }
}

fn partial_success_query(allow: bool) -> &'static str {
    if allow {
        "?allowPartialSuccess=true"
    } else {
        ""
    }
}
