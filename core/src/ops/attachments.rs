use crate::client::Client;
use crate::envelope::{Envelope, IndexEnvelope};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::Attachment;

use super::PageRequest;

impl Client {
    /// Attachments on the sheet, its rows and comments. Records decode as [`Attachment`].
    pub fn list_attachments(&self, sheet_id: i64, page: &PageRequest) -> Result<IndexEnvelope, ApiError> {
        self.fetch_index(&format!("/sheets/{sheet_id}/attachments{}", page.query()))
    }

    /// Includes a temporary download `url` for files.
    pub fn get_attachment(&self, sheet_id: i64, attachment_id: i64) -> Result<Attachment, ApiError> {
        self.fetch_entity(&format!("/sheets/{sheet_id}/attachments/{attachment_id}"))
    }

    pub fn attach_url_to_sheet(&self, sheet_id: i64, attachment: &Attachment) -> Result<Envelope<Attachment>, ApiError> {
        self.write_one(HttpMethod::Post, &format!("/sheets/{sheet_id}/attachments"), attachment)
    }

    pub fn attach_url_to_row(&self, sheet_id: i64, row_id: i64, attachment: &Attachment) -> Result<Envelope<Attachment>, ApiError> {
        self.write_one(
            HttpMethod::Post,
            &format!("/sheets/{sheet_id}/rows/{row_id}/attachments"),
            attachment,
        )
    }

    pub fn delete_attachment(&self, sheet_id: i64, attachment_id: i64) -> Result<Envelope<()>, ApiError> {
        self.remove(&format!("/sheets/{sheet_id}/attachments/{attachment_id}"))
    }
}
