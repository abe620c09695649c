use crate::client::Client;
use crate::envelope::IndexEnvelope;
use crate::error::ApiError;
use crate::types::Sight;

use super::PageRequest;

impl Client {
    /// Records decode as [`Sight`].
    pub fn list_sights(&self, page: &PageRequest) -> Result<IndexEnvelope, ApiError> {
        self.fetch_index(&format!("/sights{}", page.query()))
    }

    pub fn get_sight(&self, sight_id: i64) -> Result<Sight, ApiError> {
        self.fetch_entity(&format!("/sights/{sight_id}"))
    }
}

#[cfg(test)]
mod tests {
    use crate::ops::testing::replay;

    #[test]
    fn get_sight_keeps_workspace_reference() {
        let (client, _) = replay(200, r#"{"id":2,"name":"Board","columnCount":6,"workspace":{"id":1,"name":"Ops"},"widgets":[]}"#);
        let sight = client.get_sight(2).unwrap();
        assert_eq!(sight.column_count, 6);
        assert_eq!(sight.workspace.unwrap().id, 1);
    }
}
