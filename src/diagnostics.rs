//! Catalog checks.
//!
//! Single-catalog checks look at message states and duplicates. The
//! cross-catalog check reports messages that one catalog has and a required
//! language's catalog lacks.

use std::collections::HashSet;
use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

use serde::Serialize;

use crate::catalog::{
    Catalog,
    Duplicate,
    Message,
    TranslationStatus,
};
use crate::config::{
    DiagnosticsConfig,
    I18nSettings,
    Severity,
};
use crate::types::SourceRange;

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    Unfinished,
    EmptyTranslation,
    Vanished,
    DuplicateMessage,
    MissingMessage,
}

impl DiagnosticKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Unfinished => "unfinished",
            Self::EmptyTranslation => "empty-translation",
            Self::Vanished => "vanished",
            Self::DuplicateMessage => "duplicate-message",
            Self::MissingMessage => "missing-message",
        }
    }

    const fn severity(self, config: &DiagnosticsConfig) -> Severity {
        match self {
            Self::Unfinished => config.unfinished,
            Self::EmptyTranslation => config.empty_translation,
            Self::Vanished => config.vanished,
            Self::DuplicateMessage => config.duplicate_message,
            Self::MissingMessage => config.missing_message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: PathBuf,
    #[serde(skip)]
    pub range: SourceRange,
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub context: String,
    pub source: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {} [{}]",
            self.file.display(),
            self.range.start,
            self.severity.label(),
            self.message,
            self.kind.code()
        )
    }
}

/// A catalog together with where it came from.
#[derive(Debug, Clone, Copy)]
pub struct CatalogFile<'a> {
    pub path: &'a Path,
    pub catalog: &'a Catalog,
    pub duplicates: &'a [Duplicate],
}

/// Collects diagnostics, dropping kinds configured as `off`.
struct Collector<'a> {
    config: &'a DiagnosticsConfig,
    diagnostics: Vec<Diagnostic>,
}

impl Collector<'_> {
    fn push(
        &mut self,
        kind: DiagnosticKind,
        file: &Path,
        range: SourceRange,
        context: &str,
        source: &str,
        message: String,
    ) {
        let severity = kind.severity(self.config);
        if !severity.is_enabled() {
            return;
        }
        self.diagnostics.push(Diagnostic {
            file: file.to_path_buf(),
            range,
            severity,
            kind,
            context: context.to_string(),
            source: source.to_string(),
            message,
        });
    }
}

/// Diagnostics for one catalog.
#[must_use]
pub fn check_catalog(file: CatalogFile<'_>, config: &DiagnosticsConfig) -> Vec<Diagnostic> {
    tracing::debug!(path = %file.path.display(), "Checking catalog");
    let mut collector = Collector { config, diagnostics: Vec::new() };

    for (context, message) in file.catalog.messages() {
        check_message(&mut collector, file.path, context, message);
    }

    for duplicate in file.duplicates {
        collector.push(
            DiagnosticKind::DuplicateMessage,
            file.path,
            duplicate.last,
            &duplicate.context,
            &duplicate.source,
            format!(
                "'{}' in context '{}' is also defined at line {}; this definition wins",
                duplicate.source,
                duplicate.context,
                duplicate.first.start.display_line()
            ),
        );
    }

    collector.diagnostics
}

fn check_message(collector: &mut Collector<'_>, path: &Path, context: &str, message: &Message) {
    let (kind, text) = match message.status {
        TranslationStatus::Unfinished => (
            DiagnosticKind::Unfinished,
            format!("'{}' in context '{}' is not translated yet", message.source, context),
        ),
        TranslationStatus::Finished if message.translation.is_empty() => (
            DiagnosticKind::EmptyTranslation,
            format!(
                "'{}' in context '{}' is marked finished but has an empty translation",
                message.source, context
            ),
        ),
        TranslationStatus::Vanished => (
            DiagnosticKind::Vanished,
            format!("'{}' in context '{}' is no longer used", message.source, context),
        ),
        TranslationStatus::Finished => return,
    };
    collector.push(kind, path, message.range, context, &message.source, text);
}

/// Reports live messages missing from the catalogs of required languages.
///
/// The reference set is the union of live messages over all catalogs.
/// Catalogs without a language, or whose language isn't required, are
/// skipped.
#[must_use]
pub fn check_missing_messages(files: &[CatalogFile<'_>], settings: &I18nSettings) -> Vec<Diagnostic> {
    let mut collector = Collector { config: &settings.diagnostics, diagnostics: Vec::new() };

    let mut reference: Vec<(&str, &str)> = Vec::new();
    let mut seen = HashSet::new();
    for file in files {
        for (context, message) in file.catalog.messages() {
            if message.status != TranslationStatus::Vanished
                && seen.insert((context, message.source.as_str()))
            {
                reference.push((context, message.source.as_str()));
            }
        }
    }

    for file in files {
        let Some(language) = file.catalog.language.as_deref() else {
            continue;
        };
        if !settings.is_language_required(language) {
            continue;
        }

        let present: HashSet<(&str, &str)> = file
            .catalog
            .messages()
            .filter(|(_, message)| message.status != TranslationStatus::Vanished)
            .map(|(context, message)| (context, message.source.as_str()))
            .collect();

        for &(context, source) in &reference {
            if !present.contains(&(context, source)) {
                collector.push(
                    DiagnosticKind::MissingMessage,
                    file.path,
                    SourceRange::default(),
                    context,
                    source,
                    format!(
                        "'{source}' in context '{context}' is missing from the '{language}' catalog"
                    ),
                );
            }
        }
    }

    collector.diagnostics
}

/// All diagnostics for a set of catalogs, sorted by file and position.
#[must_use]
pub fn check_all(files: &[CatalogFile<'_>], settings: &I18nSettings) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = files
        .iter()
        .flat_map(|file| check_catalog(*file, &settings.diagnostics))
        .collect();
    diagnostics.extend(check_missing_messages(files, settings));
    diagnostics.sort_by(|a, b| a.file.cmp(&b.file).then(a.range.start.cmp(&b.range.start)));
    diagnostics
}

/// Highest severity among `diagnostics`, if any.
#[must_use]
pub fn max_severity(diagnostics: &[Diagnostic]) -> Option<Severity> {
    diagnostics.iter().map(|diagnostic| diagnostic.severity).max()
}
