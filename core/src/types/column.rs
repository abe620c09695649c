use serde::{Deserialize, Serialize};

use super::is_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Column {
    #[serde(skip_serializing_if = "is_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub title: String,
    /// Column type, e.g. `TEXT_NUMBER`, `PICKLIST`, `CHECKBOX`, `DATE`.
    #[serde(rename = "type", skip_serializing_if = "is_default")]
    pub column_type: String,
    /// Zero-based position. `None` leaves the position unchanged on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    /// `AUTO_NUMBER`, `CREATED_BY`, `CREATED_DATE`, `MODIFIED_BY` or `MODIFIED_DATE`.
    #[serde(skip_serializing_if = "is_default")]
    pub system_column_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_number_format: Option<AutoNumberFormat>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contact_options: Vec<ContactOption>,
    #[serde(skip_serializing_if = "is_default")]
    pub description: String,
    #[serde(skip_serializing_if = "is_default")]
    pub format: String,
    #[serde(skip_serializing_if = "is_default")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub locked: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub locked_for_user: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "is_default")]
    pub primary: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub symbol: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "is_default")]
    pub validation: bool,
    #[serde(skip_serializing_if = "is_default")]
    pub version: i64,
    #[serde(skip_serializing_if = "is_default")]
    pub width: i64,
}

impl Column {
    pub fn new(title: impl Into<String>, column_type: impl Into<String>, index: i64) -> Self {
        Self {
            title: title.into(),
            column_type: column_type.into(),
            index: Some(index),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoNumberFormat {
    /// Zero padding, between zero and ten `0` characters.
    pub fill: String,
    pub prefix: String,
    pub starting_number: i64,
    pub suffix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactOption {
    pub email: String,
    #[serde(skip_serializing_if = "is_default")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_maps_to_column_type() {
        let column: Column =
            serde_json::from_str(r#"{"id":9,"title":"Due","type":"DATE","index":2,"width":150}"#).unwrap();
        assert_eq!(column.column_type, "DATE");
        assert_eq!(column.index, Some(2));
        assert!(!column.primary);
        assert!(column.options.is_empty());
    }

    #[test]
    fn new_column_payload() {
        let json = serde_json::to_value(Column::new("Status", "PICKLIST", 0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Status", "type": "PICKLIST", "index": 0})
        );
    }

    #[test]
    fn unset_index_is_omitted() {
        let json = serde_json::to_value(Column {
            title: "Renamed".into(),
            ..Column::default()
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"title": "Renamed"}));
    }
}
