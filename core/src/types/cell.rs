use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{is_default, User};

/// Raw cell content: text, a number, or a checkbox state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// Who last touched a cell, and when. Shared by cells and cell history
/// entries; the fields sit at the top level of the cell on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellHistory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cell {
    #[serde(skip_serializing_if = "is_default")]
    pub column_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<CellValue>,
    #[serde(skip_serializing_if = "is_default")]
    pub display_value: String,
    /// Only present when requested with `include=columnType`.
    #[serde(skip_serializing_if = "is_default")]
    pub column_type: String,
    #[serde(skip_serializing_if = "is_default")]
    pub conditional_format: String,
    #[serde(skip_serializing_if = "is_default")]
    pub format: String,
    #[serde(skip_serializing_if = "is_default")]
    pub formula: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperlink: Option<Hyperlink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_in_from_cell: Option<CellLink>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links_out_to_cells: Vec<CellLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_value: Option<ObjectValue>,
    #[serde(skip_serializing_if = "is_default")]
    pub override_validation: bool,
    /// Request-only. `false` asks the service for lenient value parsing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    #[serde(flatten)]
    pub history: CellHistory,
}

impl Cell {
    /// A request cell setting `value` in `column_id`.
    pub fn new(column_id: i64, value: impl Into<CellValue>) -> Self {
        Self {
            column_id,
            value: Some(value.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellLink {
    pub column_id: i64,
    pub row_id: i64,
    pub sheet_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub sheet_name: String,
    #[serde(skip_serializing_if = "is_default")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hyperlink {
    #[serde(skip_serializing_if = "is_default")]
    pub report_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub sheet_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub sight_id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Image {
    pub id: String,
    #[serde(skip_serializing_if = "is_default")]
    pub alt_text: String,
    #[serde(skip_serializing_if = "is_default")]
    pub height: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub width: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectValue {
    pub object_type: String,
}
