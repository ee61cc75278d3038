//! Variable address resolution
//!
//! A workspace variable is addressed by its ID, or by key. Key lookup needs the
//! workspace's variable list; the first record whose key matches wins, later
//! duplicates are ignored.

use log::debug;
use serde_json::Value;

use crate::config::api;
use crate::error::{Result, TfcError};

use super::models::VariableList;

/// How a workspace variable is addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableRef {
    /// Variable ID (var-xxx)
    Id(String),
    /// Variable key, resolved through the workspace's variable list
    Key(String),
}

impl VariableRef {
    /// Build a reference from optional inputs; the ID wins when both are set
    pub fn from_parts(id: Option<&str>, key: Option<&str>) -> Result<Self> {
        match (id, key) {
            (Some(id), _) => Ok(VariableRef::Id(id.to_string())),
            (None, Some(key)) => Ok(VariableRef::Key(key.to_string())),
            (None, None) => Err(TfcError::InvalidParams(
                "one of the following is required: variable_id, variable_key".to_string(),
            )),
        }
    }
}

/// Variable collection of a workspace
pub fn workspace_vars_path(workspace_id: &str) -> String {
    format!(
        "/{}/{}/{}",
        api::WORKSPACES,
        urlencoding::encode(workspace_id),
        api::VARS
    )
}

/// Single variable of a workspace
pub fn workspace_var_path(workspace_id: &str, variable_id: &str) -> String {
    format!(
        "{}/{}",
        workspace_vars_path(workspace_id),
        urlencoding::encode(variable_id)
    )
}

/// Variable addressed by ID only
pub fn var_path(variable_id: &str) -> String {
    format!("/{}/{}", api::VARS, urlencoding::encode(variable_id))
}

/// Find the ID of the first variable with the given key
pub fn find_variable_id(list: &Value, key: &str) -> Result<String> {
    let list = VariableList::from_value_lenient(list);

    match list.data.iter().find(|v| v.key() == Some(key)) {
        Some(record) => {
            debug!("Variable key '{}' resolved to {}", key, record.id);
            Ok(record.id.clone())
        }
        None => {
            debug!(
                "Variable key '{}' not found among {} variable(s)",
                key,
                list.data.len()
            );
            Err(TfcError::Resolution(format!(
                "Variable with key {} not found.",
                key
            )))
        }
    }
}
