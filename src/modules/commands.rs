//! Command handlers for CLI and Ansible module invocations

use std::path::Path;

use log::{debug, info};
use serde_json::Value;

use crate::cli::{Cli, ModuleArgs, OutputFormat};
use crate::error::{Result, TfcError};
use crate::output::{ansible_failure, ansible_skipped, ansible_success, print_value};
use crate::tfc::TfcClient;
use crate::ui::{confirm_update, create_spinner, finish_spinner};

use super::{run_module, ModuleName, ModuleParams, ModuleRequest};

/// Run a CLI subcommand
///
/// Update commands ask for confirmation unless `--yes` or `--batch` is set.
pub async fn run_cli_command(cli: &Cli) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Some((module, params)) = cli.command.to_module_params(&cli.connection) else {
        return Err("module mode is handled by run_module_command".into());
    };

    let request = ModuleRequest::parse(module, &params)?;
    let changed = module.changes_state();
    let auto_confirm = cli.command.auto_confirm();

    if changed && !confirm_update(&request.describe(), auto_confirm, cli.batch)? {
        eprintln!("Cancelled");
        return Ok(());
    }

    let client = TfcClient::new(&params.client_config()?)?;

    let spinner = create_spinner(&format!("{}...", request.describe()), cli.batch);
    let result = request.execute(&client).await;
    finish_spinner(spinner);

    let body = result?;
    info!("{} completed", module);
    print_value(&ansible_success(body, changed), cli.output);
    Ok(())
}

/// Run an Ansible binary module and print its result object
///
/// Returns `true` on success. The result (or failure) object always goes to stdout.
pub async fn run_module_command(args: &ModuleArgs) -> bool {
    let (result, ok) = module_result(&args.name, &args.args_file).await;
    print_value(&result, OutputFormat::Json);
    ok
}

/// Result object for a module invocation, and whether it succeeded
async fn module_result(name: &str, args_file: &Path) -> (Value, bool) {
    match execute_module(name, args_file).await {
        Ok(result) => (result, true),
        Err(e) => {
            debug!("Module {} failed: {}", name, e);
            (ansible_failure(&e.to_string()), false)
        }
    }
}

async fn execute_module(name: &str, args_file: &Path) -> Result<Value> {
    let module: ModuleName = name.parse()?;

    let text = std::fs::read_to_string(args_file).map_err(|e| {
        TfcError::InvalidParams(format!(
            "could not read module arguments from {}: {}",
            args_file.display(),
            e
        ))
    })?;
    let params = ModuleParams::from_args_json(&text)?;

    if params.check_mode && !module.supports_check_mode() {
        info!("{} skipped in check mode", module);
        return Ok(ansible_skipped(&format!(
            "remote module ({}) does not support check mode",
            module
        )));
    }

    let body = run_module(module, &params).await?;
    Ok(ansible_success(body, module.changes_state()))
}
