//! Workspace address resolution
//!
//! A workspace is addressed either by its ID (`ws-xxx`) or by name within an
//! organization. Both shapes resolve to a request path without any API call.

use log::debug;

use crate::config::api;
use crate::error::{Result, TfcError};

/// How a workspace is addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceRef {
    /// Workspace ID (ws-xxx)
    Id(String),
    /// Workspace name within an organization
    Name { organization: String, name: String },
}

impl WorkspaceRef {
    /// Build a reference from optional inputs
    ///
    /// When `id` is present, name and organization are ignored. Otherwise both
    /// name and organization are required.
    pub fn from_parts(
        id: Option<&str>,
        name: Option<&str>,
        organization: Option<&str>,
    ) -> Result<Self> {
        match (id, name, organization) {
            (Some(id), _, _) => Ok(WorkspaceRef::Id(id.to_string())),
            (None, Some(name), Some(org)) => Ok(WorkspaceRef::Name {
                organization: org.to_string(),
                name: name.to_string(),
            }),
            (None, Some(_), None) => Err(TfcError::InvalidParams(
                "parameters are required together: organization, workspace_name".to_string(),
            )),
            (None, None, _) => Err(TfcError::InvalidParams(
                "one of the following is required: workspace_id, workspace_name".to_string(),
            )),
        }
    }

    /// Request path for this workspace
    pub fn path(&self) -> String {
        let path = match self {
            WorkspaceRef::Id(id) => {
                format!("/{}/{}", api::WORKSPACES, urlencoding::encode(id))
            }
            WorkspaceRef::Name { organization, name } => format!(
                "/{}/{}/{}/{}",
                api::ORGANIZATIONS,
                urlencoding::encode(organization),
                api::WORKSPACES,
                urlencoding::encode(name)
            ),
        };
        debug!("Resolved workspace {} to path {}", self, path);
        path
    }
}

impl std::fmt::Display for WorkspaceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkspaceRef::Id(id) => write!(f, "'{}'", id),
            WorkspaceRef::Name { organization, name } => {
                write!(f, "'{}' in organization '{}'", name, organization)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_ignores_name_and_org() {
        let ws = WorkspaceRef::from_parts(Some("ws-abc"), Some("app"), Some("my-org")).unwrap();
        assert_eq!(ws, WorkspaceRef::Id("ws-abc".to_string()));
        assert_eq!(ws.path(), "/workspaces/ws-abc");
    }

    #[test]
    fn test_name_and_org_composite_path() {
        let ws = WorkspaceRef::from_parts(None, Some("app"), Some("my-org")).unwrap();
        assert_eq!(ws.path(), "/organizations/my-org/workspaces/app");
    }

    #[test]
    fn test_name_without_org_rejected() {
        let err = WorkspaceRef::from_parts(None, Some("app"), None).unwrap_err();
        assert!(matches!(err, TfcError::InvalidParams(_)));
        assert!(err.to_string().contains("organization"));
    }

    #[test]
    fn test_nothing_supplied_rejected() {
        let err = WorkspaceRef::from_parts(None, None, Some("my-org")).unwrap_err();
        assert!(err.to_string().contains("workspace_id"));
    }

    #[test]
    fn test_path_segments_encoded() {
        let ws = WorkspaceRef::Name {
            organization: "my org".to_string(),
            name: "a/b".to_string(),
        };
        assert_eq!(ws.path(), "/organizations/my%20org/workspaces/a%2Fb");
    }

    #[test]
    fn test_display() {
        assert_eq!(WorkspaceRef::Id("ws-1".into()).to_string(), "'ws-1'");
        let ws = WorkspaceRef::Name {
            organization: "o".into(),
            name: "n".into(),
        };
        assert_eq!(ws.to_string(), "'n' in organization 'o'");
    }
}
