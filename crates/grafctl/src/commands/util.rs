//! Shared helpers for command handlers.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}

/// Read a JSON file straight into a model type.
pub fn read_model<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let value = read_json_file(path)?;
    serde_json::from_value(value).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("{}: {e}", path.display()),
    })
}

/// Turn a 404 from the server into a resource-specific `NotFound`.
pub fn not_found_as(
    err: grafctl_api::Error,
    resource_type: &str,
    identifier: impl ToString,
    list_command: &str,
) -> CliError {
    if err.is_not_found() {
        CliError::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.to_string(),
            list_command: list_command.into(),
        }
    } else {
        err.into()
    }
}

/// `Some(x)` rendered as text, `None` as an empty cell.
pub fn opt_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
