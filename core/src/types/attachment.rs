use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{is_default, User};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attachment {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub parent_id: i64,
    /// `COMMENT`, `ROW` or `SHEET`.
    #[serde(skip_serializing_if = "is_default")]
    pub parent_type: String,
    /// `FILE`, `LINK`, `BOX_COM`, `DROPBOX`, `EGNYTE`, `EVERNOTE`, `GOOGLE_DRIVE` or `ONEDRIVE`.
    #[serde(skip_serializing_if = "is_default")]
    pub attachment_type: String,
    #[serde(skip_serializing_if = "is_default")]
    pub attachment_sub_type: String,
    #[serde(skip_serializing_if = "is_default")]
    pub mime_type: String,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub size_in_kb: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub url: String,
    #[serde(skip_serializing_if = "is_default")]
    pub url_expires_in_millis: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<User>,
}

impl Attachment {
    /// A `LINK` attachment pointing at `url`.
    pub fn link(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            attachment_type: "LINK".to_string(),
            ..Self::default()
        }
    }
}
