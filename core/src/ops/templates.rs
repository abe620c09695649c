use crate::client::Client;
use crate::envelope::IndexEnvelope;
use crate::error::ApiError;

use super::PageRequest;

impl Client {
    /// Templates the user can access. Records decode as [`crate::types::Template`].
    pub fn list_templates(&self, page: &PageRequest) -> Result<IndexEnvelope, ApiError> {
        self.fetch_index(&format!("/templates{}", page.query()))
    }

    /// Smartsheet's public template gallery.
    pub fn list_public_templates(&self, page: &PageRequest) -> Result<IndexEnvelope, ApiError> {
        self.fetch_index(&format!("/templates/public{}", page.query()))
    }
}
