//! Runtime string lookup with fallback to the source text.
//!
//! # Fallback
//!
//! | Entry state | Result |
//! |-------------|--------|
//! | finished, non-empty | translation |
//! | finished, empty | source |
//! | unfinished | source |
//! | vanished | source |
//! | not in catalog | source |

use std::collections::HashMap;
use std::path::Path;

use crate::catalog::locale::{
    fallback_chain,
    system_locale,
};
use crate::catalog::{
    Catalog,
    CatalogError,
    load_file,
};

/// Resolved translations of one catalog, keyed by context then source.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    language: Option<String>,
    entries: HashMap<String, HashMap<String, String>>,
}

impl Translator {
    /// Builds a translator from the resolvable entries of `catalog`.
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut entries: HashMap<String, HashMap<String, String>> = HashMap::new();
        for (context, message) in catalog.messages() {
            if let Some(text) = message.resolved() {
                entries
                    .entry(context.to_string())
                    .or_default()
                    .insert(message.source.clone(), text.to_string());
            }
        }
        Self { language: catalog.language.clone(), entries }
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Number of strings that resolve to a translation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The translation of `source` in `context`, if one is available.
    #[must_use]
    pub fn lookup(&self, context: &str, source: &str) -> Option<&str> {
        self.entries.get(context)?.get(source).map(String::as_str)
    }

    /// The translation of `source` in `context`, or `source` itself.
    #[must_use]
    pub fn translate<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.lookup(context, source).unwrap_or(source)
    }
}

/// Translators tried in order; the first one with a translation wins.
///
/// Built for a locale fallback chain such as `de_DE` → `de`.
#[derive(Debug, Clone, Default)]
pub struct TranslatorChain {
    translators: Vec<Translator>,
}

impl TranslatorChain {
    #[must_use]
    pub fn new(translators: Vec<Translator>) -> Self {
        Self { translators }
    }

    pub fn push(&mut self, translator: Translator) {
        self.translators.push(translator);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    /// Languages of the loaded translators, most specific first.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.translators.iter().filter_map(Translator::language)
    }

    #[must_use]
    pub fn lookup(&self, context: &str, source: &str) -> Option<&str> {
        self.translators.iter().find_map(|translator| translator.lookup(context, source))
    }

    #[must_use]
    pub fn translate<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.lookup(context, source).unwrap_or(source)
    }
}

/// Loads the catalogs for `locale` from `dir`.
///
/// `locale` may be a tag such as `de_DE` or `"system"` for the OS locale.
/// For each entry of the locale's fallback chain, then of each of
/// `fallback_languages` in order, `<dir>/<entry>.ts` is loaded if it exists.
/// Each file is loaded at most once. When nothing is found the returned chain
/// is empty and every lookup falls back to the source string.
///
/// # Errors
/// Returns a [`CatalogError`] if an existing catalog can't be read or parsed.
pub fn load_for_locale(
    dir: &Path,
    locale: &str,
    fallback_languages: &[String],
) -> Result<TranslatorChain, CatalogError> {
    let resolved = if locale.eq_ignore_ascii_case("system") {
        system_locale().unwrap_or_default()
    } else {
        locale.to_string()
    };

    let mut candidates: Vec<String> = Vec::new();
    for candidate in std::iter::once(resolved.as_str())
        .chain(fallback_languages.iter().map(String::as_str))
        .flat_map(fallback_chain)
    {
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }

    let mut chain = TranslatorChain::default();
    for candidate in candidates {
        let path = dir.join(format!("{candidate}.ts"));
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "No catalog for locale candidate");
            continue;
        }
        let parsed = load_file(&path)?;
        tracing::info!(locale = %candidate, path = %path.display(), "Setting locale");
        chain.push(Translator::from_catalog(&parsed.catalog));
    }

    if chain.is_empty() {
        tracing::warn!(
            locale = %resolved,
            dir = %dir.display(),
            "Translations not found; falling back to source strings"
        );
    }
    Ok(chain)
}
