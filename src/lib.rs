//! tfcmod - HCP Terraform / Terraform Cloud modules
//!
//! Reads and updates workspaces and workspace variables through the HCP Terraform
//! API, either as a CLI or as Ansible binary modules.
//!
//! # Example
//!
//! ```bash
//! # Show a workspace
//! tfcmod workspace --name my-app --org my-org
//!
//! # List workspaces, second page, wildcard search
//! tfcmod workspaces --org my-org --page 2 --search-wildcard "prod-*"
//!
//! # Update a workspace variable by key
//! tfcmod update-workspace-var --workspace-id ws-123 --key region \
//!     --attributes '{"value": "eu-west-1"}' --yes
//!
//! # Ansible binary module
//! tfcmod module tfc_workspace_info args.json
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod modules;
pub mod output;
pub mod tfc;
pub mod ui;

pub use cli::{Cli, Command, OutputFormat};
pub use error::{Result, TfcError};
pub use modules::{
    run_cli_command, run_module, run_module_command, ModuleName, ModuleParams, ModuleRequest,
};
pub use tfc::{
    resolve_payload, ClientConfig, ListQuery, PayloadInput, TfcClient, TokenResolver,
    VariableRef, WorkspaceRef,
};
