use crate::client::Client;
use crate::envelope::IndexEnvelope;
use crate::error::ApiError;
use crate::types::User;

use super::PageRequest;

impl Client {
    /// The user the token belongs to.
    pub fn current_user(&self) -> Result<User, ApiError> {
        self.fetch_entity("/users/me")
    }

    pub fn get_user(&self, user_id: i64) -> Result<User, ApiError> {
        self.fetch_entity(&format!("/users/{user_id}"))
    }

    /// Records decode as [`User`].
    pub fn list_users(&self, page: &PageRequest) -> Result<IndexEnvelope, ApiError> {
        self.fetch_index(&format!("/users{}", page.query()))
    }
}
