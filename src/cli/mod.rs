//! CLI argument parsing

mod common;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::defaults;
use crate::modules::{ModuleName, ModuleParams};

pub use common::{parse_json_value, OutputFormat, PayloadArgs};

/// Read and update HCP Terraform / Terraform Cloud workspaces and variables
#[derive(Parser, Debug)]
#[command(name = "tfcmod")]
#[command(version)]
#[command(
    about = "Read and update HCP Terraform workspaces and variables",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Batch mode: no spinners, no prompts
    #[arg(short, long, global = true, default_value_t = false)]
    pub batch: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// API base URL [default: https://app.terraform.io]
    #[arg(short = 'u', long, global = true)]
    pub url: Option<String>,

    /// API token (overrides env vars and credentials file)
    #[arg(short = 't', long, global = true)]
    pub token: Option<String>,

    /// API version segment
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// User-Agent header sent with each request
    #[arg(long, global = true)]
    pub http_agent: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true, default_value_t = false)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a single workspace
    #[command(visible_alias = "ws")]
    Workspace(WorkspaceSelector),

    /// List workspaces of an organization (one page)
    #[command(visible_alias = "wss")]
    Workspaces(WorkspacesArgs),

    /// List variables of a workspace
    #[command(visible_alias = "vars")]
    WorkspaceVars(WorkspaceVarsArgs),

    /// Update workspace settings
    UpdateWorkspace(UpdateWorkspaceArgs),

    /// Update a workspace variable, addressed by ID or key
    UpdateWorkspaceVar(UpdateWorkspaceVarArgs),

    /// Update a variable by ID
    UpdateVar(UpdateVarArgs),

    /// Run as an Ansible binary module (reads a JSON arguments file)
    Module(ModuleArgs),
}

/// Workspace addressed by ID or by name within an organization
#[derive(Args, Debug, Clone)]
pub struct WorkspaceSelector {
    /// Workspace ID (ws-xxx)
    #[arg(long = "id", conflicts_with_all = ["name", "org"], required_unless_present = "name")]
    pub id: Option<String>,

    /// Workspace name (requires --org)
    #[arg(long, requires = "org")]
    pub name: Option<String>,

    /// Organization name
    #[arg(long)]
    pub org: Option<String>,
}

/// Arguments for 'workspaces'
#[derive(Args, Debug, Clone)]
pub struct WorkspacesArgs {
    /// Organization name
    #[arg(long)]
    pub org: String,

    /// Page number
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Page size
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub size: Option<u32>,

    /// Fuzzy name search
    #[arg(long, conflicts_with = "search_wildcard")]
    pub search: Option<String>,

    /// Wildcard name search (`*` on prefix, suffix or both)
    #[arg(long)]
    pub search_wildcard: Option<String>,

    /// Direct link from a previous response (e.g. links.next)
    #[arg(long, conflicts_with_all = ["page", "size", "search", "search_wildcard"])]
    pub link: Option<String>,
}

/// Arguments for 'workspace-vars'
#[derive(Args, Debug, Clone)]
pub struct WorkspaceVarsArgs {
    /// Workspace ID (ws-xxx)
    #[arg(long = "workspace-id", visible_alias = "id")]
    pub workspace_id: String,
}

/// Arguments for 'update-workspace'
#[derive(Args, Debug, Clone)]
pub struct UpdateWorkspaceArgs {
    #[command(flatten)]
    pub workspace: WorkspaceSelector,

    #[command(flatten)]
    pub body: PayloadArgs,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

/// Arguments for 'update-workspace-var'
#[derive(Args, Debug, Clone)]
pub struct UpdateWorkspaceVarArgs {
    /// Workspace ID (ws-xxx)
    #[arg(long = "workspace-id")]
    pub workspace_id: String,

    /// Variable ID (var-xxx)
    #[arg(long = "variable-id", conflicts_with = "key", required_unless_present = "key")]
    pub variable_id: Option<String>,

    /// Variable key, resolved through the workspace's variable list
    #[arg(long)]
    pub key: Option<String>,

    #[command(flatten)]
    pub body: PayloadArgs,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

/// Arguments for 'update-var'
#[derive(Args, Debug, Clone)]
pub struct UpdateVarArgs {
    /// Variable ID (var-xxx)
    #[arg(long = "variable-id", visible_alias = "id")]
    pub variable_id: String,

    #[command(flatten)]
    pub body: PayloadArgs,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

/// Arguments for 'module'
#[derive(Args, Debug, Clone)]
pub struct ModuleArgs {
    /// Module name (e.g. tfc_workspace_info)
    pub name: String,

    /// JSON file with module arguments
    pub args_file: PathBuf,
}

impl ConnectionArgs {
    /// Connection parameters of the module bag
    fn apply(&self, params: &mut ModuleParams) {
        params.api_url = self.url.clone();
        params.api_token = self.token.clone();
        params.api_version = self.api_version.clone();
        params.http_agent = self.http_agent.clone();
        params.validate_certs = Some(!self.insecure);
        params.connection_timeout = self.timeout;
    }
}

impl WorkspaceSelector {
    fn apply(&self, params: &mut ModuleParams) {
        params.workspace_id = self.id.clone();
        params.workspace_name = self.name.clone();
        params.organization = self.org.clone();
    }
}

impl PayloadArgs {
    fn apply(&self, params: &mut ModuleParams) {
        params.payload = self.payload.clone();
        params.data = self.data.clone();
        params.attributes = self.attributes.clone();
    }
}

impl Command {
    /// Module and parameter bag for an API command; `None` for `module`
    pub fn to_module_params(
        &self,
        connection: &ConnectionArgs,
    ) -> Option<(ModuleName, ModuleParams)> {
        let mut params = ModuleParams::default();
        connection.apply(&mut params);

        let module = match self {
            Command::Workspace(args) => {
                args.apply(&mut params);
                ModuleName::TfcWorkspaceInfo
            }
            Command::Workspaces(args) => {
                params.organization = Some(args.org.clone());
                params.page_number = args.page;
                params.page_size = args.size;
                params.search_name = args.search.clone();
                params.search_wildcard_name = args.search_wildcard.clone();
                params.direct_link = args.link.clone();
                ModuleName::TfcWorkspacesInfo
            }
            Command::WorkspaceVars(args) => {
                params.workspace_id = Some(args.workspace_id.clone());
                ModuleName::TfcWorkspaceVarsInfo
            }
            Command::UpdateWorkspace(args) => {
                args.workspace.apply(&mut params);
                args.body.apply(&mut params);
                ModuleName::HcpWorkspaceUpdate
            }
            Command::UpdateWorkspaceVar(args) => {
                params.workspace_id = Some(args.workspace_id.clone());
                params.variable_id = args.variable_id.clone();
                params.variable_key = args.key.clone();
                args.body.apply(&mut params);
                ModuleName::TfcWorkspaceVarUpdate
            }
            Command::UpdateVar(args) => {
                params.variable_id = Some(args.variable_id.clone());
                args.body.apply(&mut params);
                ModuleName::HcpVarUpdate
            }
            Command::Module(_) => return None,
        };
        Some((module, params))
    }

    /// Whether the command skips the confirmation prompt
    pub fn auto_confirm(&self) -> bool {
        match self {
            Command::UpdateWorkspace(args) => args.yes,
            Command::UpdateWorkspaceVar(args) => args.yes,
            Command::UpdateVar(args) => args.yes,
            _ => false,
        }
    }
}
