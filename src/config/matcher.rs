//! File pattern matcher for catalog files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::I18nSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid translation file pattern '{pattern}': {source}")]
    InvalidTranslationPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches files against configured glob patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    workspace_root: PathBuf,
    exclude_set: GlobSet,
    translation_set: GlobSet,
    translation_exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(workspace_root: PathBuf, settings: &I18nSettings) -> Result<Self, MatcherError> {
        let exclude_set = Self::build_glob_set(&settings.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        let translation_set = Self::build_glob_set(
            &settings.translation_files.include_patterns,
            |pattern, source| MatcherError::InvalidTranslationPattern { pattern, source },
        )?;

        let translation_exclude_set = Self::build_glob_set(
            &settings.translation_files.exclude_patterns,
            |pattern, source| MatcherError::InvalidExcludePattern { pattern, source },
        )?;

        Ok(Self { workspace_root, exclude_set, translation_set, translation_exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Returns true if the path matches `translationFiles.includePatterns`
    /// but not `excludePatterns` or `translationFiles.excludePatterns`.
    ///
    /// The path must be absolute and under the workspace root.
    #[must_use]
    pub fn is_translation_file(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.workspace_root).ok() else {
            return false;
        };

        self.is_translation_file_relative(relative_path)
    }

    /// Same as [`Self::is_translation_file`] for a path relative to the
    /// workspace root.
    #[must_use]
    pub fn is_translation_file_relative(&self, relative_path: &Path) -> bool {
        self.translation_set.is_match(relative_path)
            && !self.exclude_set.is_match(relative_path)
            && !self.translation_exclude_set.is_match(relative_path)
    }
}
