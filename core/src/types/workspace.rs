use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{is_default, Sheet, Source, Template};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workspace {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub access_level: String,
    #[serde(skip_serializing_if = "is_default")]
    pub favorite: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub permalink: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub folders: Vec<Folder>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<Report>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sheets: Vec<Sheet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sights: Vec<Sight>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<Template>,
}

impl Workspace {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Folder {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub favorite: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub permalink: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub folders: Vec<Folder>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<Report>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sheets: Vec<Sheet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sights: Vec<Sight>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<Template>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    /// Sheets without rows. Only included when requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_sheets: Vec<Sheet>,
}

/// The sheets and workspaces a report draws rows from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scope {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sheets: Vec<Sheet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub workspaces: Vec<Workspace>,
}

/// A dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sight {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub access_level: String,
    /// Hex color such as `#E6F5FE`.
    #[serde(skip_serializing_if = "is_default")]
    pub background_color: String,
    #[serde(skip_serializing_if = "is_default")]
    pub column_count: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub favorite: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub permalink: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub widgets: Vec<Widget>,
    /// Limited to `id` and `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Workspace>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Widget {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(rename = "type", skip_serializing_if = "is_default")]
    pub widget_type: String,
    /// Shape depends on `widget_type`.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub contents: Value,
    #[serde(skip_serializing_if = "is_default")]
    pub title: String,
    #[serde(skip_serializing_if = "is_default")]
    pub title_format: String,
    #[serde(skip_serializing_if = "is_default")]
    pub show_title: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub show_title_icon: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub version: i64,
    /// 1 centers content, 2 left-aligns it.
    #[serde(skip_serializing_if = "is_default")]
    pub view_mode: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub height: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub width: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub x_position: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub y_position: i64,
}
