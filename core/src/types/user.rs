use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{is_default, Image};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub email: String,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub first_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub last_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub admin: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub group_admin: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub licensed_sheet_creator: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub resource_viewer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_welcome_screen_viewed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(rename = "profileImage", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<Image>,
    #[serde(skip_serializing_if = "is_default")]
    pub sheet_count: i64,
    /// `ACTIVE`, `DECLINED` or `PENDING`.
    #[serde(skip_serializing_if = "is_default")]
    pub status: String,
}
