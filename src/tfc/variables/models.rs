//! Variable data models
//!
//! Only the fields needed for key lookup are modelled; response bodies are
//! otherwise passed through untouched.

use serde::Deserialize;
use serde_json::Value;

/// Variable collection response (`GET /workspaces/{id}/vars`)
#[derive(Deserialize, Debug, Default)]
pub struct VariableList {
    #[serde(default)]
    pub data: Vec<VariableRecord>,
}

/// Single variable record
#[derive(Deserialize, Debug, Clone)]
pub struct VariableRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: Option<VariableAttributes>,
}

/// Variable attributes
#[derive(Deserialize, Debug, Clone)]
pub struct VariableAttributes {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sensitive: bool,
}

impl VariableRecord {
    /// Variable key, if the record carries one
    pub fn key(&self) -> Option<&str> {
        self.attributes.as_ref().and_then(|a| a.key.as_deref())
    }
}

impl VariableList {
    /// Read a variable list, skipping records that do not look like variables
    pub(crate) fn from_value_lenient(value: &Value) -> Self {
        let data = value
            .get("data")
            .and_then(|d| d.as_array())
            .map(|records| {
                records
                    .iter()
                    .filter_map(|r| serde_json::from_value(r.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        VariableList { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_list_deserialization() {
        let json = r#"{
            "data": [
                {
                    "id": "var-1",
                    "type": "vars",
                    "attributes": {
                        "key": "region",
                        "value": "eu-west-1",
                        "category": "terraform",
                        "sensitive": false,
                        "hcl": false
                    }
                },
                {
                    "id": "var-2",
                    "type": "vars",
                    "attributes": {
                        "key": "secret",
                        "value": null,
                        "category": "env",
                        "sensitive": true
                    }
                }
            ]
        }"#;

        let list: VariableList = serde_json::from_str(json).unwrap();
        assert_eq!(list.data.len(), 2);
        assert_eq!(list.data[0].key(), Some("region"));
        assert_eq!(
            list.data[1].attributes.as_ref().unwrap().category.as_deref(),
            Some("env")
        );
        assert!(list.data[1].attributes.as_ref().unwrap().sensitive);
    }

    #[test]
    fn test_record_without_attributes() {
        let record: VariableRecord = serde_json::from_str(r#"{"id": "var-1"}"#).unwrap();
        assert_eq!(record.key(), None);
    }

    #[test]
    fn test_missing_data_defaults_to_empty() {
        let list: VariableList = serde_json::from_str("{}").unwrap();
        assert!(list.data.is_empty());
    }
}
