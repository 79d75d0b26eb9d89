//! JSON settings merge
//!
//! Writes MCP server definitions into an existing JSON settings file while
//! preserving every key the user put there.

use crate::error::{Error, Result};
use kit_fs::io;
use serde_json::{Map, Value, json};
use std::path::Path;

/// Recursively merge `source` into `target`.
///
/// Objects merge key by key; arrays and scalars from `source` replace
/// whatever `target` held.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                let nested = source_value.is_object()
                    && target_map.get(key).is_some_and(Value::is_object);
                match target_map.get_mut(key) {
                    Some(existing) if nested => deep_merge(existing, source_value),
                    _ => {
                        target_map.insert(key.clone(), source_value.clone());
                    }
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

/// Read the `mcpServers` object from a bundle's MCP file.
///
/// A missing file yields an empty object.
///
/// # Errors
/// Returns `Error::InvalidJson` if the file exists but is not valid JSON.
pub fn read_mcp_servers(path: &Path) -> Result<Map<String, Value>> {
    let Some(content) = io::read_text_if_exists(path)? else {
        return Ok(Map::new());
    };
    let parsed: Value = serde_json::from_str(&content).map_err(|e| Error::InvalidJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(parsed
        .get("mcpServers")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default())
}

/// Parse an existing settings file, or start from `{}`.
///
/// Unparseable or non-object content is discarded with a warning.
fn parse_existing(path: &Path) -> Result<Value> {
    let Some(content) = io::read_text_if_exists(path)? else {
        return Ok(json!({}));
    };
    match serde_json::from_str::<Value>(&content) {
        Ok(value) if value.is_object() => Ok(value),
        Ok(_) | Err(_) => {
            tracing::warn!(path = %path.display(), "Existing settings are not a JSON object, starting fresh");
            Ok(json!({}))
        }
    }
}

/// Merge `mcp_servers` into the settings file at `path` under `mcpServers`.
///
/// The file is written pretty-printed with a trailing newline.
pub fn merge_mcp_servers(path: &Path, mcp_servers: Map<String, Value>) -> Result<()> {
    let mut settings = parse_existing(path)?;
    deep_merge(&mut settings, &json!({ "mcpServers": Value::Object(mcp_servers) }));
    let rendered = format!("{}\n", serde_json::to_string_pretty(&settings)?);
    io::write_text(path, &rendered)?;
    Ok(())
}
