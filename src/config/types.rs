use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationFiles.includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// How loudly a diagnostic kind is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Off,
    Hint,
    Information,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Hint => "hint",
            Self::Information => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    pub translation_files: TranslationFilesConfig,

    /// Applied to every file the indexer looks at.
    pub exclude_patterns: Vec<String>,

    /// Language of the `<source>` strings. Catalogs in this language are not
    /// checked for missing translations.
    pub source_language: Option<String>,

    /// Languages that require translations.
    ///
    /// - `None`: All detected languages are required (default)
    /// - `Some([...])`: Only specified languages are required
    ///
    /// Mutually exclusive with `optional_languages`.
    pub required_languages: Option<Vec<String>>,

    /// Languages where missing translations are ignored.
    ///
    /// Mutually exclusive with `required_languages`.
    pub optional_languages: Option<Vec<String>>,

    /// Languages tried after the requested one, in order.
    pub fallback_languages: Option<Vec<String>>,

    pub indexing: IndexingConfig,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexingConfig {
    /// Parallel catalog loads.
    /// Default: 80% of CPU cores (minimum 1).
    pub num_threads: Option<usize>,
}

impl IndexingConfig {
    #[must_use]
    pub fn effective_num_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1)).max(1)
    }
}

/// Severity per diagnostic kind.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosticsConfig {
    pub unfinished: Severity,
    pub empty_translation: Severity,
    pub vanished: Severity,
    pub duplicate_message: Severity,
    pub missing_message: Severity,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            unfinished: Severity::Warning,
            empty_translation: Severity::Warning,
            vanished: Severity::Hint,
            duplicate_message: Severity::Error,
            missing_message: Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec!["**/translations/**/*.ts".to_string()],
            exclude_patterns: vec![],
        }
    }
}

impl I18nSettings {
    /// Whether missing translations are reported for `language`.
    #[must_use]
    pub fn is_language_required(&self, language: &str) -> bool {
        use crate::catalog::locale::same_locale;

        if self.source_language.as_deref().is_some_and(|source| same_locale(source, language)) {
            return false;
        }
        if let Some(required) = &self.required_languages {
            return required.iter().any(|lang| same_locale(lang, language));
        }
        if let Some(optional) = &self.optional_languages {
            return !optional.iter().any(|lang| same_locale(lang, language));
        }
        true
    }

    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Invalid language tag
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.translation_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/translations/**/*.ts\"]",
            ));
        }

        check_patterns(
            &mut errors,
            "translationFiles.includePatterns",
            &self.translation_files.include_patterns,
        );
        check_patterns(
            &mut errors,
            "translationFiles.excludePatterns",
            &self.translation_files.exclude_patterns,
        );
        check_patterns(&mut errors, "excludePatterns", &self.exclude_patterns);

        if let Some(language) = &self.source_language {
            check_language(&mut errors, "sourceLanguage", language);
        }
        for (field, languages) in [
            ("requiredLanguages", &self.required_languages),
            ("optionalLanguages", &self.optional_languages),
            ("fallbackLanguages", &self.fallback_languages),
        ] {
            for (index, language) in languages.iter().flatten().enumerate() {
                check_language(&mut errors, &format!("{field}[{index}]"), language);
            }
        }

        if self.required_languages.is_some() && self.optional_languages.is_some() {
            errors.push(ValidationError::new(
                "requiredLanguages/optionalLanguages",
                "Cannot specify both 'requiredLanguages' and 'optionalLanguages'. Please use only one",
            ));
        }

        if self.indexing.num_threads == Some(0) {
            errors.push(ValidationError::new(
                "indexing.numThreads",
                "Must be at least 1, or removed to use the default",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn check_patterns(errors: &mut Vec<ValidationError>, field: &str, patterns: &[String]) {
    for (index, pattern) in patterns.iter().enumerate() {
        if let Err(e) = globset::Glob::new(pattern) {
            errors.push(ValidationError::new(
                format!("{field}[{index}]"),
                format!("Invalid glob pattern '{pattern}': {e}"),
            ));
        }
    }
}

fn check_language(errors: &mut Vec<ValidationError>, field: &str, language: &str) {
    if crate::catalog::locale::normalize_locale(language).is_none() {
        errors.push(ValidationError::new(
            field,
            format!("Invalid language tag '{language}'. Example: \"de_DE\" or \"fr\""),
        ));
    }
}
