//! Workspace module

mod api;
pub mod resolver;

pub use api::organization_workspaces_path;
pub use resolver::WorkspaceRef;
