// mydump-core/src/infrastructure/config/connection.rs

use serde_yaml::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::domain::ConnectionConfig;
use crate::domain::options::CONNECTION_FIELDS;
use crate::infrastructure::error::InfrastructureError;

/// Loads the `-connection` YAML file.
///
/// Defaults are in place before the document is applied, so a partial file
/// (or an empty one) still yields a complete config. Unknown keys are ignored
/// with a warning. Values reach the run exactly as written: an unquoted scalar
/// that YAML would rewrite (`1.50`, `1e3`, `0x1F`, `true`...) is refused.
#[instrument]
pub fn load_connection_config(path: &Path) -> Result<ConnectionConfig, InfrastructureError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => InfrastructureError::ConfigNotFound(path.to_path_buf()),
        _ => InfrastructureError::Io(e),
    })?;

    let yaml_err = |source| InfrastructureError::Yaml {
        path: path.to_path_buf(),
        source,
    };

    if content.trim().is_empty() {
        info!("Connection file is empty, using built-in defaults");
        return Ok(ConnectionConfig::default());
    }

    let document: Value = serde_yaml::from_str(&content).map_err(yaml_err)?;
    if document.is_null() {
        info!("Connection file has no values, using built-in defaults");
        return Ok(ConnectionConfig::default());
    }

    if let Some(mapping) = document.as_mapping() {
        for key in mapping.keys() {
            let known = key.as_str().is_some_and(|k| CONNECTION_FIELDS.contains(&k));
            if !known {
                warn!(key = ?key, "Unknown key in connection file, ignored");
            }
        }
        for field in CONNECTION_FIELDS {
            if let Some(value) = mapping.get(field) {
                check_verbatim(path, &content, field, value)?;
            }
        }
    }

    let config: ConnectionConfig = serde_yaml::from_value(document).map_err(yaml_err)?;

    info!(name = %config.name, address = %config.address, "Connection file loaded");
    Ok(config)
}

/// Strings and empty values pass. An integer passes only when its decimal form is
/// exactly the text written after `field:`; everything else must be quoted.
fn check_verbatim(
    path: &Path,
    content: &str,
    field: &str,
    value: &Value,
) -> Result<(), InfrastructureError> {
    let verbatim = match value {
        Value::String(_) | Value::Null => true,
        Value::Number(n) => n
            .as_i64()
            .is_some_and(|i| raw_scalar(content, field) == Some(i.to_string().as_str())),
        _ => false,
    };

    if verbatim {
        return Ok(());
    }
    Err(InfrastructureError::ConfigError(format!(
        "'{}' must be quoted to be read as written ({}: \"...\") in {:?}",
        field, field, path
    )))
}

/// Text after `field:` on a top-level line, comment stripped.
fn raw_scalar<'a>(content: &'a str, field: &str) -> Option<&'a str> {
    content.lines().find_map(|line| {
        let rest = line.strip_prefix(field)?.trim_start().strip_prefix(':')?;
        let raw = rest.split_once(" #").map_or(rest, |(value, _)| value);
        Some(raw.trim())
    })
}
