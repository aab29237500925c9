//! Reads the workspace configuration file.

use std::path::Path;

use super::{
    ConfigError,
    I18nSettings,
};

/// Name of the configuration file at the workspace root.
pub const CONFIG_FILE_NAME: &str = ".qt-ts-i18n.json";

/// Loads settings from `.qt-ts-i18n.json` in the workspace root.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and parsed
/// - `Ok(None)`: no configuration file
/// - `Err(ConfigError)`: read or parse failure
///
/// # Errors
/// - I/O error while reading
/// - JSON parse error
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<I18nSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: I18nSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
