//! Workspace API operations

use log::debug;
use serde_json::Value;

use crate::config::api;
use crate::error::Result;
use crate::tfc::pagination::ListQuery;
use crate::tfc::payload::PayloadInput;
use crate::tfc::transport::Transport;
use crate::tfc::TfcClient;

use super::WorkspaceRef;

/// Collection path for the workspaces of an organization
pub fn organization_workspaces_path(organization: &str) -> String {
    format!(
        "/{}/{}/{}",
        api::ORGANIZATIONS,
        urlencoding::encode(organization),
        api::WORKSPACES
    )
}

impl<T: Transport> TfcClient<T> {
    /// Get a single workspace by ID or by name within an organization
    pub async fn read_workspace(&self, workspace: &WorkspaceRef) -> Result<Value> {
        debug!("Reading workspace {}", workspace);
        self.get(&workspace.path(), &[]).await
    }

    /// Get one page of workspaces for an organization
    ///
    /// The response is returned as is, including `links` and `meta` so callers
    /// can follow `links.next` through [`ListQuery::DirectLink`].
    pub async fn list_workspaces(&self, organization: &str, query: &ListQuery) -> Result<Value> {
        let (path, params) = query.target(&organization_workspaces_path(organization));
        debug!(
            "Listing workspaces for organization '{}' ({} query params)",
            organization,
            params.len()
        );
        self.get(&path, &params).await
    }

    /// Update a workspace's settings
    pub async fn update_workspace(
        &self,
        workspace: &WorkspaceRef,
        payload: PayloadInput,
    ) -> Result<Value> {
        debug!("Updating workspace {}", workspace);
        self.patch(&workspace.path(), &payload.into_body()).await
    }
}
