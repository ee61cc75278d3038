//! Common CLI types shared across commands

use clap::{Args, ValueEnum};
use serde_json::Value;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// YAML format
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Parse a JSON document given on the command line
pub fn parse_json_value(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {}", e))
}

/// Request body for update commands (exactly one of the three)
#[derive(Args, Debug, Clone, Default)]
#[group(required = true, multiple = false)]
pub struct PayloadArgs {
    /// Full JSON:API request body, sent as is
    #[arg(long, value_parser = parse_json_value)]
    pub payload: Option<Value>,

    /// Content of the `data` member
    #[arg(long, value_parser = parse_json_value)]
    pub data: Option<Value>,

    /// Content of `data.attributes`
    #[arg(long, value_parser = parse_json_value)]
    pub attributes: Option<Value>,
}
