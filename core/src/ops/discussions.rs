use crate::client::Client;
use crate::envelope::{Envelope, IndexEnvelope};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::{Comment, Discussion};

use super::PageRequest;

impl Client {
    /// Discussions on the sheet and all its rows. Records decode as [`Discussion`].
    pub fn list_discussions(&self, sheet_id: i64, page: &PageRequest) -> Result<IndexEnvelope, ApiError> {
        self.fetch_index(&format!("/sheets/{sheet_id}/discussions{}", page.query()))
    }

    pub fn get_discussion(&self, sheet_id: i64, discussion_id: i64) -> Result<Discussion, ApiError> {
        self.fetch_entity(&format!("/sheets/{sheet_id}/discussions/{discussion_id}"))
    }

    pub fn create_sheet_discussion(&self, sheet_id: i64, discussion: &Discussion) -> Result<Envelope<Discussion>, ApiError> {
        self.write_one(HttpMethod::Post, &format!("/sheets/{sheet_id}/discussions"), discussion)
    }

    pub fn create_row_discussion(&self, sheet_id: i64, row_id: i64, discussion: &Discussion) -> Result<Envelope<Discussion>, ApiError> {
        self.write_one(
            HttpMethod::Post,
            &format!("/sheets/{sheet_id}/rows/{row_id}/discussions"),
            discussion,
        )
    }

    pub fn add_comment(&self, sheet_id: i64, discussion_id: i64, comment: &Comment) -> Result<Envelope<Comment>, ApiError> {
        self.write_one(
            HttpMethod::Post,
            &format!("/sheets/{sheet_id}/discussions/{discussion_id}/comments"),
            comment,
        )
    }

    pub fn get_comment(&self, sheet_id: i64, comment_id: i64) -> Result<Comment, ApiError> {
        self.fetch_entity(&format!("/sheets/{sheet_id}/comments/{comment_id}"))
    }
}
