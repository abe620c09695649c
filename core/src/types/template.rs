use serde::{Deserialize, Serialize};

use super::is_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    /// `sheet` or `report`; public templates only.
    #[serde(rename = "type", skip_serializing_if = "is_default")]
    pub template_type: String,
    #[serde(skip_serializing_if = "is_default")]
    pub access_level: String,
    #[serde(skip_serializing_if = "is_default")]
    pub blank: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "is_default")]
    pub description: String,
    /// `BLANK_SHEET`, `PROJECT_SHEET` or `TASK_LIST`.
    #[serde(skip_serializing_if = "is_default")]
    pub global_template: String,
    #[serde(skip_serializing_if = "is_default")]
    pub image: String,
    #[serde(skip_serializing_if = "is_default")]
    pub large_image: String,
    #[serde(skip_serializing_if = "is_default")]
    pub locale: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}
