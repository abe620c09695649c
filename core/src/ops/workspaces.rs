use crate::client::Client;
use crate::envelope::{Envelope, IndexEnvelope};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::{Folder, Workspace};

use super::PageRequest;

impl Client {
    /// Records decode as [`Workspace`].
    pub fn list_workspaces(&self, page: &PageRequest) -> Result<IndexEnvelope, ApiError> {
        self.fetch_index(&format!("/workspaces{}", page.query()))
    }

    pub fn get_workspace(&self, workspace_id: i64) -> Result<Workspace, ApiError> {
        self.fetch_entity(&format!("/workspaces/{workspace_id}"))
    }

    pub fn create_workspace(&self, workspace: &Workspace) -> Result<Envelope<Workspace>, ApiError> {
        self.write_one(HttpMethod::Post, "/workspaces", workspace)
    }

    pub fn delete_workspace(&self, workspace_id: i64) -> Result<Envelope<()>, ApiError> {
        self.remove(&format!("/workspaces/{workspace_id}"))
    }

    pub fn get_folder(&self, folder_id: i64) -> Result<Folder, ApiError> {
        self.fetch_entity(&format!("/folders/{folder_id}"))
    }

    /// Records decode as [`Folder`].
    pub fn list_workspace_folders(&self, workspace_id: i64, page: &PageRequest) -> Result<IndexEnvelope, ApiError> {
        self.fetch_index(&format!("/workspaces/{workspace_id}/folders{}", page.query()))
    }
}

#[cfg(test)]
mod tests {
    use crate::ops::testing::{last_request, replay};
    use crate::types::Workspace;

    #[test]
    fn create_workspace() {
        let (client, sent) = replay(200, r#"{"message":"SUCCESS","resultCode":0,"result":{"id":12,"name":"Ops","accessLevel":"OWNER"}}"#);
        let env = client.create_workspace(&Workspace::named("Ops")).unwrap();
        assert_eq!(env.result.access_level, "OWNER");
        assert_eq!(last_request(&sent).body.as_deref(), Some(r#"{"name":"Ops"}"#));
    }

    #[test]
    fn get_folder() {
        let (client, sent) = replay(200, r#"{"id":5,"name":"Q1","sheets":[{"id":1,"name":"Budget"}]}"#);
        let folder = client.get_folder(5).unwrap();
        assert_eq!(folder.sheets[0].name, "Budget");
        assert_eq!(last_request(&sent).url, "https://api.test/2.0/folders/5");
    }
}
