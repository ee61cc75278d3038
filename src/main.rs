//! tfcmod - main entry point

use std::process::ExitCode;

use clap::Parser;
use log::debug;

use tfcmod::{run_cli_command, run_module_command, Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .target(env_logger::Target::Stderr)
        .init();

    debug!("tfcmod v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Module(args) => {
            if run_module_command(args).await {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        _ => match run_cli_command(&cli).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}
