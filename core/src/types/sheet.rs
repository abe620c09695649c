use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{is_default, Attachment, Column, ContactOption, Discussion, Hyperlink, Image, ObjectValue, Row, User, Workspace};
use crate::error::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sheet {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    /// Template to create the sheet from. Request-only.
    #[serde(skip_serializing_if = "is_default")]
    pub from_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub owner_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
    /// Email address of the owner.
    #[serde(skip_serializing_if = "is_default")]
    pub owner: String,
    #[serde(skip_serializing_if = "is_default")]
    pub access_level: String,
    #[serde(skip_serializing_if = "is_default")]
    pub permalink: String,
    /// Incremented on every modification.
    #[serde(skip_serializing_if = "is_default")]
    pub version: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub total_row_count: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Row>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub discussions: Vec<Discussion>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cross_sheet_references: Vec<CrossSheetReference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effective_attachment_options: Vec<String>,
    #[serde(skip_serializing_if = "is_default")]
    pub dependencies_enabled: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub favorite: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub gantt_enabled: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub has_summary_fields: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub read_only: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub resource_management_enabled: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub show_parent_rows_for_filters: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_settings: Option<ProjectSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SheetSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_permissions: Option<SheetUserPermissions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_settings: Option<SheetUserSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Workspace>,
}

impl Sheet {
    pub fn column_by_title(&self, title: &str) -> Result<&Column, ApiError> {
        self.columns
            .iter()
            .find(|c| c.title == title)
            .ok_or_else(|| ApiError::NotFound(format!("no column titled {title}")))
    }

    pub fn column_by_id(&self, id: i64) -> Result<&Column, ApiError> {
        self.columns
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("no column with id {id}")))
    }

    pub fn row_by_id(&self, id: i64) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetUserSettings {
    pub critical_path_enabled: bool,
    pub display_summary_tasks: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetUserPermissions {
    pub summary_permissions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetSummary {
    pub fields: Vec<SummaryField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryField {
    pub id: i64,
    pub index: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub display_value: String,
    pub format: String,
    pub formula: String,
    pub symbol: String,
    pub locked: bool,
    pub locked_for_user: bool,
    pub validation: bool,
    pub options: Vec<String>,
    pub contact_options: Vec<ContactOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperlink: Option<Hyperlink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_value: Option<ObjectValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<User>,
}

/// The report, sheet, sight or template something was created from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Source {
    pub id: i64,
    #[serde(rename = "type")]
    pub source_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSettings {
    /// Hours in a work day, between 1 and 24.
    pub length_of_day: f64,
    /// ISO-8601 dates (`YYYY-MM-DD`).
    pub non_working_days: Vec<NaiveDate>,
    /// `MONDAY` through `SUNDAY`.
    pub working_days: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrossSheetReference {
    pub id: i64,
    pub name: String,
    pub source_sheet_id: i64,
    pub start_column_id: i64,
    pub end_column_id: i64,
    pub start_row_id: i64,
    pub end_row_id: i64,
    pub status: String,
}
