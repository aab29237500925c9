//! Workspace scan for catalog files.
use std::path::PathBuf;
use std::{
    collections::HashMap,
    path::Path,
    sync::Arc,
};

use ignore::WalkBuilder;
use tokio::sync::{
    RwLock,
    Semaphore,
};

use crate::catalog::locale::{
    detect_language_from_path,
    fallback_chain,
    same_locale,
};
use crate::catalog::{
    CatalogError,
    ParsedCatalog,
    parse_str,
};
use crate::config::{
    ConfigManager,
    FileMatcher,
};
use crate::indexer::types::{
    IndexSummary,
    IndexerError,
};

/// Loaded catalogs, keyed by absolute path.
#[derive(Clone, Debug, Default)]
pub struct WorkspaceIndexer {
    catalogs: Arc<RwLock<HashMap<PathBuf, ParsedCatalog>>>,
}

impl WorkspaceIndexer {
    #[must_use]
    pub fn new() -> Self {
        Self { catalogs: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Finds and loads every catalog under `workspace_path`.
    ///
    /// Files that fail to load are reported in the summary and leave the
    /// index without an entry for that path.
    ///
    /// # Errors
    /// - `workspace_path` is not a directory
    /// - The configured patterns are invalid
    pub async fn index_workspace(
        &self,
        workspace_path: &Path,
        config_manager: &ConfigManager,
    ) -> Result<IndexSummary, IndexerError> {
        tracing::debug!(workspace_path = %workspace_path.display(), "Indexing workspace");
        if !workspace_path.is_dir() {
            return Err(IndexerError::InvalidPath(workspace_path.to_path_buf()));
        }

        let matcher = config_manager.file_matcher(workspace_path)?;
        let files = Self::find_catalog_files(&matcher);
        tracing::debug!(count = files.len(), "Found catalog files");

        let num_threads = config_manager.get_settings().indexing.effective_num_threads();
        let semaphore = Arc::new(Semaphore::new(num_threads));

        let futures: Vec<_> = files
            .into_iter()
            .map(|file| {
                let semaphore = Arc::clone(&semaphore);
                async move {
                    let _permit = semaphore.acquire().await;
                    let result = self.index_file(&file).await;
                    (file, result)
                }
            })
            .collect();

        let mut summary = IndexSummary::default();
        for (file, result) in futures::future::join_all(futures).await {
            match result {
                Ok(()) => summary.loaded.push(file),
                Err(error) => {
                    tracing::warn!("{error}");
                    summary.failed.push(error);
                }
            }
        }
        summary.loaded.sort();
        summary.failed.sort_by(|a, b| a.path().cmp(b.path()));

        Ok(summary)
    }

    async fn index_file(&self, file_path: &Path) -> Result<(), CatalogError> {
        let content = tokio::fs::read_to_string(file_path)
            .await
            .map_err(|source| CatalogError::Io { path: file_path.to_path_buf(), source })?;
        self.update_file(file_path, &content).await
    }

    fn find_catalog_files(matcher: &FileMatcher) -> Vec<PathBuf> {
        let workspace_path = matcher.workspace_root();
        let mut found_files = Vec::new();

        for result in WalkBuilder::new(workspace_path)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            if matcher.is_translation_file(entry.path()) {
                found_files.push(entry.path().to_path_buf());
            }
        }

        found_files
    }

    /// Parses `content` and stores it under `path`.
    ///
    /// On error the previous entry for `path` is removed.
    ///
    /// # Errors
    /// Returns the parse error.
    pub async fn update_file(&self, path: &Path, content: &str) -> Result<(), CatalogError> {
        match parse_str(content, path) {
            Ok(parsed) => {
                self.catalogs.write().await.insert(path.to_path_buf(), parsed);
                Ok(())
            }
            Err(error) => {
                self.catalogs.write().await.remove(path);
                Err(error)
            }
        }
    }

    /// Drops `path` from the index. Returns whether it was indexed.
    pub async fn remove_file(&self, path: &Path) -> bool {
        self.catalogs.write().await.remove(path).is_some()
    }

    /// Snapshot of all loaded catalogs, sorted by path.
    pub async fn catalogs(&self) -> Vec<(PathBuf, ParsedCatalog)> {
        let mut catalogs: Vec<_> = self
            .catalogs
            .read()
            .await
            .iter()
            .map(|(path, parsed)| (path.clone(), parsed.clone()))
            .collect();
        catalogs.sort_by(|a, b| a.0.cmp(&b.0));
        catalogs
    }

    /// Catalogs for `language`, using the `language` attribute or the file
    /// name when the attribute is missing.
    ///
    /// A bare language also matches its regional catalogs: `de` finds `de_DE`.
    pub async fn catalogs_for_language(&self, language: &str) -> Vec<(PathBuf, ParsedCatalog)> {
        self.catalogs()
            .await
            .into_iter()
            .filter(|(path, parsed)| {
                parsed
                    .catalog
                    .language
                    .clone()
                    .or_else(|| detect_language_from_path(path))
                    .is_some_and(|lang| {
                        fallback_chain(&lang).iter().any(|candidate| same_locale(candidate, language))
                    })
            })
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.catalogs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.catalogs.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const GERMAN: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
        <TS version=\"2.1\" language=\"de_DE\">\n\
        <context>\n    <name>device</name>\n    <message>\n        \
        <source>Width</source>\n        <translation>Breite</translation>\n    \
        </message>\n</context>\n</TS>\n";

    const NO_LANGUAGE: &str = "<TS version=\"2.1\">\n<context><name>device</name>\n\
        <message><source>Width</source><translation>Largeur</translation></message>\n\
        </context></TS>\n";

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_index_workspace_loads_matching_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let german = write(root, "res/translations/de_DE.ts", GERMAN);
        let french = write(root, "res/translations/fr_FR.ts", NO_LANGUAGE);
        write(root, "src/main.ts", "export {};");
        write(root, "res/translations/broken.ts", "<TS><context>");

        let mut config_manager = ConfigManager::new();
        config_manager.load_settings(Some(root.to_path_buf())).unwrap();
        let indexer = WorkspaceIndexer::new();

        let summary = indexer.index_workspace(root, &config_manager).await.unwrap();

        assert_eq!(summary.loaded, vec![german.clone(), french.clone()]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].path(), root.join("res/translations/broken.ts"));
        assert!(!summary.is_clean());
        assert_eq!(indexer.len().await, 2);

        let german_catalogs = indexer.catalogs_for_language("de").await;
        assert_eq!(german_catalogs.len(), 1);
        assert_eq!(german_catalogs[0].0, german);

        let french_catalogs = indexer.catalogs_for_language("fr_FR").await;
        assert_eq!(french_catalogs.len(), 1);
        assert_eq!(french_catalogs[0].0, french);
    }

    #[tokio::test]
    async fn test_index_workspace_respects_exclude_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "translations/de.ts", GERMAN);
        write(root, "build/translations/de.ts", GERMAN);
        write(root, ".qt-ts-i18n.json", r#"{"excludePatterns": ["build/**"]}"#);

        let mut config_manager = ConfigManager::new();
        config_manager.load_settings(Some(root.to_path_buf())).unwrap();
        let indexer = WorkspaceIndexer::new();

        let summary = indexer.index_workspace(root, &config_manager).await.unwrap();

        assert_eq!(summary.loaded, vec![root.join("translations/de.ts")]);
        assert!(summary.is_clean());
    }

    #[tokio::test]
    async fn test_index_workspace_rejects_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let indexer = WorkspaceIndexer::new();

        let result = indexer.index_workspace(&missing, &ConfigManager::new()).await;

        assert!(matches!(result, Err(IndexerError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_update_and_remove_file() {
        let indexer = WorkspaceIndexer::new();
        let path = Path::new("/workspace/translations/de.ts");

        indexer.update_file(path, GERMAN).await.unwrap();
        assert_eq!(indexer.len().await, 1);

        let result = indexer.update_file(path, "<TS><context>").await;
        assert!(result.is_err());
        assert!(indexer.is_empty().await);

        indexer.update_file(path, GERMAN).await.unwrap();
        assert!(indexer.remove_file(path).await);
        assert!(!indexer.remove_file(path).await);
    }
}
