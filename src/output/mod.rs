//! Result rendering
//!
//! Module results are printed as Ansible-compatible result objects: the response
//! body's top-level keys plus `changed`, or `failed`/`msg` on error.

use serde_json::{json, Map, Value};

use crate::cli::OutputFormat;

/// Ansible result for a successful module run
///
/// Object bodies are merged at the top level, other non-null bodies are nested
/// under `result`.
pub fn ansible_success(body: Value, changed: bool) -> Value {
    let mut result = match body {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("result".to_string(), other);
            map
        }
    };
    result.insert("changed".to_string(), Value::Bool(changed));
    Value::Object(result)
}

/// Ansible result for a failed module run
pub fn ansible_failure(message: &str) -> Value {
    json!({
        "failed": true,
        "changed": false,
        "msg": message,
    })
}

/// Ansible result for a module skipped without contacting the API
pub fn ansible_skipped(message: &str) -> Value {
    json!({
        "skipped": true,
        "changed": false,
        "msg": message,
    })
}

/// Serialize a value in the requested format
pub fn render(value: &Value, format: OutputFormat) -> String {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yml::to_string(value).map_err(|e| e.to_string()),
    };
    match rendered {
        Ok(text) => text.trim_end().to_string(),
        Err(e) => ansible_failure(&format!("Error serializing output: {}", e)).to_string(),
    }
}

/// Print a value to stdout in the requested format
pub fn print_value(value: &Value, format: OutputFormat) {
    println!("{}", render(value, format));
}
