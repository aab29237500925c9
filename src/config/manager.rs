//! Holds the active settings for a workspace.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    FileMatcher,
    I18nSettings,
    MatcherError,
    loader,
};

/// Owns the validated settings and the workspace they were loaded for.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    current_settings: I18nSettings,
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: I18nSettings::default(), workspace_root: None }
    }

    /// Loads `.qt-ts-i18n.json` from the workspace root, or the defaults.
    ///
    /// # Errors
    /// - I/O error while reading the file
    /// - JSON parse error
    /// - Validation errors
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let settings = if let Some(root) = &workspace_root {
            loader::load_from_workspace(root)?.map_or_else(I18nSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            I18nSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replaces the settings after validating them.
    ///
    /// # Errors
    /// Returns [`ConfigError::ValidationErrors`] if the new settings are invalid;
    /// the current settings are kept in that case.
    pub fn update_settings(&mut self, new_settings: I18nSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &I18nSettings {
        &self.current_settings
    }

    #[must_use]
    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }

    /// Builds a matcher for `root` from the current settings.
    ///
    /// # Errors
    /// Returns [`MatcherError`] if a pattern is invalid.
    pub fn file_matcher(&self, root: &Path) -> Result<FileMatcher, MatcherError> {
        FileMatcher::new(root.to_path_buf(), &self.current_settings)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::Severity;

    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings().diagnostics.unfinished, Severity::Warning);
        assert!(manager.workspace_root().is_none());
    }

    #[rstest]
    fn test_load_settings_without_workspace() {
        let mut manager = ConfigManager::new();

        let result = manager.load_settings(None);

        assert!(result.is_ok());
        assert!(manager.get_settings().source_language.is_none());
        assert!(manager.workspace_root().is_none());
    }

    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"diagnostics": {"unfinished": "error"}}"#;
        fs::write(temp_dir.path().join(".qt-ts-i18n.json"), config_content).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().diagnostics.unfinished, Severity::Error);
        assert_eq!(manager.workspace_root(), Some(temp_dir.path()));
    }

    #[rstest]
    fn test_load_settings_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"requiredLanguages": ["de"], "optionalLanguages": ["fr"]}"#;
        fs::write(temp_dir.path().join(".qt-ts-i18n.json"), config_content).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert!(manager.workspace_root().is_none());
    }

    #[rstest]
    fn test_load_settings_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().diagnostics.vanished, Severity::Hint);
    }

    #[rstest]
    fn test_update_settings_valid() {
        let mut manager = ConfigManager::new();
        let mut new_settings = I18nSettings::default();
        new_settings.source_language = Some("en".to_string());

        let result = manager.update_settings(new_settings);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().source_language.as_deref(), Some("en"));
    }

    #[rstest]
    fn test_update_settings_invalid() {
        let mut manager = ConfigManager::new();
        let mut new_settings = I18nSettings::default();
        new_settings.translation_files.include_patterns = Vec::new();

        let result = manager.update_settings(new_settings);

        assert!(result.is_err());
        assert_eq!(manager.get_settings().translation_files.include_patterns.len(), 1);
    }
}
