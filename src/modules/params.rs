//! Module parameter bag and validation
//!
//! Parameters arrive as a flat JSON object (Ansible module arguments) or are
//! assembled from CLI flags. Validation turns them into typed references and
//! rejects contract violations before any request is sent.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::defaults;
use crate::error::{Result, TfcError};
use crate::tfc::{
    build_list_query, ClientConfig, ListQuery, PayloadInput, TokenResolver, VariableRef,
    WorkspaceRef,
};

/// Key under which Ansible nests module arguments
const ANSIBLE_ARGS_KEY: &str = "ANSIBLE_MODULE_ARGS";

/// Flat module parameters
///
/// `id` is kept apart from `workspace_id` and `variable_id` because its meaning
/// depends on the module.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ModuleParams {
    #[serde(alias = "url")]
    pub api_url: Option<String>,
    #[serde(alias = "token")]
    pub api_token: Option<String>,
    #[serde(alias = "version")]
    pub api_version: Option<String>,
    pub http_agent: Option<String>,
    #[serde(deserialize_with = "deserialize_flexible_bool")]
    pub validate_certs: Option<bool>,
    #[serde(deserialize_with = "deserialize_flexible_int")]
    pub connection_timeout: Option<u64>,

    pub organization: Option<String>,
    pub id: Option<String>,
    pub workspace_id: Option<String>,
    #[serde(alias = "name")]
    pub workspace_name: Option<String>,
    pub variable_id: Option<String>,
    #[serde(alias = "key")]
    pub variable_key: Option<String>,

    pub payload: Option<Value>,
    pub data: Option<Value>,
    pub attributes: Option<Value>,

    #[serde(alias = "page", deserialize_with = "deserialize_flexible_int")]
    pub page_number: Option<u32>,
    #[serde(alias = "size", deserialize_with = "deserialize_flexible_int")]
    pub page_size: Option<u32>,
    pub search_name: Option<String>,
    #[serde(alias = "search_wildcard")]
    pub search_wildcard_name: Option<String>,
    #[serde(alias = "link")]
    pub direct_link: Option<String>,

    /// Set by Ansible when the play runs with `--check`
    #[serde(rename = "_ansible_check_mode", deserialize_with = "deserialize_check_mode")]
    pub check_mode: bool,
}

/// Integer given as a JSON number or a numeric string
fn deserialize_flexible_int<'de, D, N>(deserializer: D) -> std::result::Result<Option<N>, D::Error>
where
    D: Deserializer<'de>,
    N: FromStr + TryFrom<u64>,
{
    use serde::de::Error;

    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_u64().and_then(|v| N::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<N>().ok(),
        _ => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("{} is not a valid non-negative integer", value)))
}

/// Boolean in any of the forms Ansible accepts (`yes`/`no`, `on`/`off`, `1`/`0`, ...)
fn deserialize_flexible_bool<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        Value::Number(n) if n.as_u64() == Some(1) => Ok(Some(true)),
        Value::Number(n) if n.as_u64() == Some(0) => Ok(Some(false)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" | "on" | "1" | "true" | "t" => Ok(Some(true)),
            "n" | "no" | "off" | "0" | "false" | "f" => Ok(Some(false)),
            _ => Err(D::Error::custom(format!("{} is not a valid boolean", value))),
        },
        _ => Err(D::Error::custom(format!("{} is not a valid boolean", value))),
    }
}

fn deserialize_check_mode<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_flexible_bool(deserializer)?.unwrap_or(false))
}

impl ModuleParams {
    /// Parse module arguments, flat or nested under `ANSIBLE_MODULE_ARGS`
    pub fn from_args_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let args = match value {
            Value::Object(mut map) if map.contains_key(ANSIBLE_ARGS_KEY) => map
                .remove(ANSIBLE_ARGS_KEY)
                .unwrap_or(Value::Object(Default::default())),
            Value::Object(map) => Value::Object(map),
            other => {
                return Err(TfcError::InvalidParams(format!(
                    "module arguments must be a JSON object, got {}",
                    json_type_name(&other)
                )))
            }
        };
        let mut params: Self = serde_json::from_value(args)?;
        params
            .http_agent
            .get_or_insert_with(|| defaults::MODULE_HTTP_AGENT.to_string());
        Ok(params)
    }

    /// Build the client configuration, resolving the token if none was given
    pub fn client_config(&self) -> Result<ClientConfig> {
        let timeout = self
            .connection_timeout
            .unwrap_or(defaults::CONNECTION_TIMEOUT_SECS);
        if timeout < 1 {
            return Err(TfcError::InvalidParams(
                "connection_timeout must be at least 1 second".to_string(),
            ));
        }

        let token =
            TokenResolver::new(self.api_url.as_deref()).resolve(self.api_token.as_deref())?;

        let mut config = ClientConfig::new(token)
            .base_url(self.api_url.as_deref())
            .timeout(Duration::from_secs(timeout))
            .verify_tls(self.validate_certs.unwrap_or(true))
            .user_agent(self.http_agent.as_deref());
        if let Some(version) = &self.api_version {
            config = config.api_version(version);
        }
        Ok(config)
    }

    /// Workspace ID, taken from `workspace_id` or its `id` alias
    pub fn workspace_id(&self) -> Result<Option<&str>> {
        aliased("workspace_id", self.workspace_id.as_deref(), self.id.as_deref())
    }

    /// Variable ID, taken from `variable_id` or its `id` alias
    pub fn variable_id(&self) -> Result<Option<&str>> {
        aliased("variable_id", self.variable_id.as_deref(), self.id.as_deref())
    }

    /// Workspace addressed by ID, or by name within an organization
    pub fn workspace_ref(&self) -> Result<WorkspaceRef> {
        let id = self.workspace_id()?;
        let name = self.workspace_name.as_deref();
        let organization = self.organization.as_deref();

        mutually_exclusive(&[
            ("workspace_id", id.is_some()),
            ("workspace_name", name.is_some()),
        ])?;
        mutually_exclusive(&[
            ("workspace_id", id.is_some()),
            ("organization", organization.is_some()),
        ])?;
        required_together(&[
            ("organization", organization.is_some()),
            ("workspace_name", name.is_some()),
        ])?;
        required_one_of(&[("workspace_id", id.is_some()), ("workspace_name", name.is_some())])?;

        WorkspaceRef::from_parts(id, name, organization)
    }

    /// Workspace ID for variable operations, which only address workspaces by ID
    pub fn required_workspace_id(&self) -> Result<String> {
        let id = self.workspace_id()?;
        required(&[("workspace_id", id.is_some())])?;
        Ok(id.unwrap_or_default().to_string())
    }

    /// Variable addressed by ID, or by key within the workspace
    pub fn variable_ref(&self) -> Result<VariableRef> {
        let id = self.variable_id.as_deref();
        let key = self.variable_key.as_deref();

        mutually_exclusive(&[("variable_id", id.is_some()), ("variable_key", key.is_some())])?;
        required_one_of(&[("variable_id", id.is_some()), ("variable_key", key.is_some())])?;

        VariableRef::from_parts(id, key)
    }

    /// Variable ID for global variable updates
    pub fn required_variable_id(&self) -> Result<String> {
        let id = self.variable_id()?;
        required(&[("variable_id", id.is_some())])?;
        Ok(id.unwrap_or_default().to_string())
    }

    /// Exactly one of payload, data or attributes
    pub fn payload_input(&self) -> Result<PayloadInput> {
        let present = [
            ("payload", self.payload.is_some()),
            ("data", self.data.is_some()),
            ("attributes", self.attributes.is_some()),
        ];
        mutually_exclusive(&present)?;
        required_one_of(&present)?;

        Ok(PayloadInput::from_parts(
            self.payload.clone(),
            self.data.clone(),
            self.attributes.clone(),
        ))
    }

    /// Organization for list operations
    pub fn required_organization(&self) -> Result<String> {
        required(&[("organization", self.organization.is_some())])?;
        Ok(self.organization.clone().unwrap_or_default())
    }

    /// Pagination or direct link for list operations
    pub fn list_query(&self) -> Result<ListQuery> {
        let link = self.direct_link.is_some();
        for other in [
            ("page_number", self.page_number.is_some()),
            ("page_size", self.page_size.is_some()),
            ("search_name", self.search_name.is_some()),
            ("search_wildcard_name", self.search_wildcard_name.is_some()),
        ] {
            mutually_exclusive(&[("direct_link", link), other])?;
        }
        mutually_exclusive(&[
            ("search_name", self.search_name.is_some()),
            ("search_wildcard_name", self.search_wildcard_name.is_some()),
        ])?;

        build_list_query(
            self.direct_link.as_deref(),
            self.page_number,
            self.page_size,
            self.search_name.as_deref(),
            self.search_wildcard_name.as_deref(),
        )
    }
}

/// Merge a parameter with the generic `id` alias
fn aliased<'a>(
    name: &str,
    value: Option<&'a str>,
    alias: Option<&'a str>,
) -> Result<Option<&'a str>> {
    match (value, alias) {
        (Some(_), Some(_)) => Err(TfcError::InvalidParams(format!(
            "parameters are mutually exclusive: {}|id",
            name
        ))),
        (value, alias) => Ok(value.or(alias)),
    }
}

fn present_names(params: &[(&str, bool)]) -> Vec<String> {
    params
        .iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| name.to_string())
        .collect()
}

fn all_names(params: &[(&str, bool)]) -> Vec<String> {
    params.iter().map(|(name, _)| name.to_string()).collect()
}

fn mutually_exclusive(params: &[(&str, bool)]) -> Result<()> {
    if present_names(params).len() > 1 {
        return Err(TfcError::InvalidParams(format!(
            "parameters are mutually exclusive: {}",
            all_names(params).join("|")
        )));
    }
    Ok(())
}

fn required_one_of(params: &[(&str, bool)]) -> Result<()> {
    if present_names(params).is_empty() {
        return Err(TfcError::InvalidParams(format!(
            "one of the following is required: {}",
            all_names(params).join(", ")
        )));
    }
    Ok(())
}

fn required_together(params: &[(&str, bool)]) -> Result<()> {
    let count = present_names(params).len();
    if count > 0 && count < params.len() {
        return Err(TfcError::InvalidParams(format!(
            "parameters are required together: {}",
            all_names(params).join(", ")
        )));
    }
    Ok(())
}

fn required(params: &[(&str, bool)]) -> Result<()> {
    let missing: Vec<&str> = params
        .iter()
        .filter(|(_, present)| !*present)
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(TfcError::InvalidParams(format!(
            "missing required arguments: {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
