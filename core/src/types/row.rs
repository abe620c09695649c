use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{is_default, Attachment, Cell, Column, Discussion, User};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Row {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub sheet_id: i64,
    /// One-based position within the sheet.
    #[serde(skip_serializing_if = "is_default")]
    pub row_number: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub version: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub access_level: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<Cell>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub discussions: Vec<Discussion>,
    #[serde(skip_serializing_if = "is_default")]
    pub conditional_format: String,
    #[serde(skip_serializing_if = "is_default")]
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    #[serde(skip_serializing_if = "is_default")]
    pub filtered_out: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub in_critical_path: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "is_default")]
    pub locked_for_user: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub permalink: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<User>,

    // Location specifiers, request-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_top: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_bottom: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sibling_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub above: Option<bool>,
}

impl Row {
    /// A new row appended at the bottom of the sheet.
    pub fn with_cells(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            to_bottom: Some(true),
            ..Self::default()
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell_for_column(&self, column_id: i64) -> Option<&Cell> {
        self.cells.iter().find(|c| c.column_id == column_id)
    }
}
