//! Data model loading
//!
//! Every input file becomes a `serde_json::Value`; files are merged in order
//! so split data models (one file per site, say) resolve as one document.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, bail};
use serde_json::{Map, Value};
use tracing::debug;

/// Load a single data model file, picking the parser from its extension
///
/// # Errors
/// Returns error for unreadable files, unknown extensions and parse failures
pub fn load_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let value = match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_str::<Value>(&content)
            .wrap_err_with(|| format!("invalid YAML in {}", path.display()))?,
        "json" => serde_json::from_str::<Value>(&content)
            .wrap_err_with(|| format!("invalid JSON in {}", path.display()))?,
        "toml" => toml::from_str::<Value>(&content)
            .wrap_err_with(|| format!("invalid TOML in {}", path.display()))?,
        other => bail!(
            "unsupported data model format '{other}' for {} (expected yaml, yml, json or toml)",
            path.display()
        ),
    };

    debug!(path = %path.display(), "loaded data model file");
    Ok(value)
}

/// Load and merge data model files in order
///
/// # Errors
/// Returns the first loading error
pub fn load_files(paths: &[PathBuf]) -> Result<Value> {
    let mut document = Value::Object(Map::new());
    for path in paths {
        merge(&mut document, load_file(path)?);
    }
    Ok(document)
}

/// Deep-merge `overlay` into `base`
///
/// Maps merge key by key, sequences concatenate and any other value from
/// `overlay` replaces the one in `base`. A null overlay (an empty YAML file)
/// leaves `base` untouched.
pub fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(base), Value::Array(overlay)) => base.extend(overlay),
        (base, overlay) => *base = overlay,
    }
}
