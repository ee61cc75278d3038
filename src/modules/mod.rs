//! Caller-facing modules
//!
//! Each module validates a parameter bag into a typed [`ModuleRequest`] and runs it
//! as a single sequential pipeline against the API.

mod commands;
pub mod params;

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde_json::Value;

use crate::error::{Result, TfcError};
use crate::tfc::{ListQuery, PayloadInput, TfcClient, Transport, VariableRef, WorkspaceRef};

pub use commands::{run_cli_command, run_module_command};
pub use params::ModuleParams;

/// Shipped module names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleName {
    TfcWorkspaceInfo,
    TfcWorkspacesInfo,
    HcpWorkspacesInfo,
    TfcWorkspaceVarsInfo,
    HcpWorkspaceUpdate,
    TfcWorkspaceVarUpdate,
    HcpVarUpdate,
}

impl ModuleName {
    pub const ALL: [ModuleName; 7] = [
        ModuleName::TfcWorkspaceInfo,
        ModuleName::TfcWorkspacesInfo,
        ModuleName::HcpWorkspacesInfo,
        ModuleName::TfcWorkspaceVarsInfo,
        ModuleName::HcpWorkspaceUpdate,
        ModuleName::TfcWorkspaceVarUpdate,
        ModuleName::HcpVarUpdate,
    ];

    /// Whether the module modifies remote state
    pub fn changes_state(&self) -> bool {
        matches!(
            self,
            ModuleName::HcpWorkspaceUpdate
                | ModuleName::TfcWorkspaceVarUpdate
                | ModuleName::HcpVarUpdate
        )
    }

    /// Whether the module may run when Ansible is in check mode
    pub fn supports_check_mode(&self) -> bool {
        !matches!(self, ModuleName::HcpWorkspaceUpdate)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleName::TfcWorkspaceInfo => "tfc_workspace_info",
            ModuleName::TfcWorkspacesInfo => "tfc_workspaces_info",
            ModuleName::HcpWorkspacesInfo => "hcp_workspaces_info",
            ModuleName::TfcWorkspaceVarsInfo => "tfc_workspace_vars_info",
            ModuleName::HcpWorkspaceUpdate => "hcp_workspace_update",
            ModuleName::TfcWorkspaceVarUpdate => "tfc_workspace_var_update",
            ModuleName::HcpVarUpdate => "hcp_var_update",
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleName {
    type Err = TfcError;

    /// Case-insensitive, `-` and `_` are interchangeable
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ModuleName::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| {
                let known: Vec<&str> = ModuleName::ALL.iter().map(|m| m.as_str()).collect();
                TfcError::InvalidParams(format!(
                    "unknown module '{}' (expected one of: {})",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// A validated module invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleRequest {
    ReadWorkspace(WorkspaceRef),
    ListWorkspaces {
        organization: String,
        query: ListQuery,
    },
    ListWorkspaceVars {
        workspace_id: String,
    },
    UpdateWorkspace {
        workspace: WorkspaceRef,
        payload: PayloadInput,
    },
    UpdateWorkspaceVar {
        workspace_id: String,
        variable: VariableRef,
        payload: PayloadInput,
    },
    UpdateVar {
        variable_id: String,
        payload: PayloadInput,
    },
}

impl ModuleRequest {
    /// Validate parameters for a module
    pub fn parse(module: ModuleName, params: &ModuleParams) -> Result<Self> {
        let request = match module {
            ModuleName::TfcWorkspaceInfo => ModuleRequest::ReadWorkspace(params.workspace_ref()?),
            ModuleName::TfcWorkspacesInfo | ModuleName::HcpWorkspacesInfo => {
                ModuleRequest::ListWorkspaces {
                    organization: params.required_organization()?,
                    query: params.list_query()?,
                }
            }
            ModuleName::TfcWorkspaceVarsInfo => ModuleRequest::ListWorkspaceVars {
                workspace_id: params.required_workspace_id()?,
            },
            ModuleName::HcpWorkspaceUpdate => ModuleRequest::UpdateWorkspace {
                workspace: params.workspace_ref()?,
                payload: params.payload_input()?,
            },
            ModuleName::TfcWorkspaceVarUpdate => ModuleRequest::UpdateWorkspaceVar {
                workspace_id: params.required_workspace_id()?,
                variable: params.variable_ref()?,
                payload: params.payload_input()?,
            },
            ModuleName::HcpVarUpdate => ModuleRequest::UpdateVar {
                variable_id: params.required_variable_id()?,
                payload: params.payload_input()?,
            },
        };
        debug!("Validated {} request: {:?}", module, request);
        Ok(request)
    }

    /// Short human-readable description, used in prompts and spinners
    pub fn describe(&self) -> String {
        match self {
            ModuleRequest::ReadWorkspace(ws) => format!("Reading workspace {}", ws),
            ModuleRequest::ListWorkspaces { organization, .. } => {
                format!("Listing workspaces in organization '{}'", organization)
            }
            ModuleRequest::ListWorkspaceVars { workspace_id } => {
                format!("Listing variables of workspace '{}'", workspace_id)
            }
            ModuleRequest::UpdateWorkspace { workspace, .. } => {
                format!("Update workspace {}", workspace)
            }
            ModuleRequest::UpdateWorkspaceVar {
                workspace_id,
                variable,
                ..
            } => match variable {
                VariableRef::Id(id) => {
                    format!("Update variable '{}' of workspace '{}'", id, workspace_id)
                }
                VariableRef::Key(key) => format!(
                    "Update variable with key '{}' of workspace '{}'",
                    key, workspace_id
                ),
            },
            ModuleRequest::UpdateVar { variable_id, .. } => {
                format!("Update variable '{}'", variable_id)
            }
        }
    }

    /// Run the request and return the decoded response body
    pub async fn execute<T: Transport>(self, client: &TfcClient<T>) -> Result<Value> {
        match self {
            ModuleRequest::ReadWorkspace(workspace) => client.read_workspace(&workspace).await,
            ModuleRequest::ListWorkspaces {
                organization,
                query,
            } => client.list_workspaces(&organization, &query).await,
            ModuleRequest::ListWorkspaceVars { workspace_id } => {
                client.list_workspace_vars(&workspace_id).await
            }
            ModuleRequest::UpdateWorkspace { workspace, payload } => {
                client.update_workspace(&workspace, payload).await
            }
            ModuleRequest::UpdateWorkspaceVar {
                workspace_id,
                variable,
                payload,
            } => {
                client
                    .update_workspace_var(&workspace_id, &variable, payload)
                    .await
            }
            ModuleRequest::UpdateVar {
                variable_id,
                payload,
            } => client.update_var(&variable_id, payload).await,
        }
    }
}

/// Validate parameters, build a client and run one module
pub async fn run_module(module: ModuleName, params: &ModuleParams) -> Result<Value> {
    let request = ModuleRequest::parse(module, params)?;
    let client = TfcClient::new(&params.client_config()?)?;
    request.execute(&client).await
}
