//! Catalog data model.

use std::fmt;

use serde::Serialize;

use crate::types::SourceRange;

/// Default `version` attribute of the `<TS>` root element.
pub const DEFAULT_TS_VERSION: &str = "2.1";

/// Translation state of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// Translated and approved.
    #[default]
    Finished,
    /// No translation yet, or not reviewed. The UI shows the source string.
    Unfinished,
    /// The source string is no longer used by the UI.
    Vanished,
}

impl TranslationStatus {
    /// Maps the `type` attribute of `<translation>` to a status.
    ///
    /// `obsolete` is the spelling used by catalogs written before Qt 5.
    /// Returns `None` for unknown values.
    #[must_use]
    pub fn from_type_attr(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("") => Some(Self::Finished),
            Some("unfinished") => Some(Self::Unfinished),
            Some("vanished" | "obsolete") => Some(Self::Vanished),
            Some(_) => None,
        }
    }

    /// The `type` attribute value written for this status.
    #[must_use]
    pub const fn type_attr(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
        }
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Finished => "finished",
            Self::Unfinished => "unfinished",
            Self::Vanished => "vanished",
        };
        f.write_str(name)
    }
}

/// A `<location filename="..." line="..."/>` reference written by lupdate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub filename: String,
    /// Kept as text: lupdate writes relative offsets such as `+3`.
    pub line: Option<String>,
}

/// A single translatable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub source: String,
    /// Translated text. For plural messages, the first plural form.
    pub translation: String,
    pub status: TranslationStatus,
    /// Set by `numerus="yes"`; the translation is a list of plural forms.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub numerus: bool,
    /// `<numerusform>` texts in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub numerus_forms: Vec<String>,
    /// Developer disambiguation comment (`<comment>`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    /// Position of the `<message>` element in the file it was read from.
    #[serde(skip)]
    pub range: SourceRange,
}

impl Message {
    /// Creates a finished message.
    #[must_use]
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
            status: TranslationStatus::Finished,
            numerus: false,
            numerus_forms: Vec::new(),
            comment: None,
            extra_comment: None,
            translator_comment: None,
            locations: Vec::new(),
            range: SourceRange::default(),
        }
    }

    /// Creates an unfinished message with an empty translation.
    #[must_use]
    pub fn unfinished(source: impl Into<String>) -> Self {
        Self { status: TranslationStatus::Unfinished, ..Self::new(source, String::new()) }
    }

    #[must_use]
    pub fn with_status(mut self, status: TranslationStatus) -> Self {
        self.status = status;
        self
    }

    /// Makes this a plural message; the first form becomes the translation.
    #[must_use]
    pub fn with_numerus_forms<I, S>(mut self, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numerus = true;
        self.numerus_forms = forms.into_iter().map(Into::into).collect();
        self.translation = self.numerus_forms.first().cloned().unwrap_or_default();
        self
    }

    #[must_use]
    pub fn with_translator_comment(mut self, comment: impl Into<String>) -> Self {
        self.translator_comment = Some(comment.into());
        self
    }

    /// The translation the UI should display, if any.
    ///
    /// Only finished, non-empty translations resolve. Everything else falls
    /// back to the source string.
    #[must_use]
    pub fn resolved(&self) -> Option<&str> {
        (self.status == TranslationStatus::Finished && !self.translation.is_empty())
            .then_some(self.translation.as_str())
    }

    /// Same as [`Self::resolved`] but with the source string as fallback.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.resolved().unwrap_or(&self.source)
    }
}

/// Counts of messages per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CatalogStats {
    pub finished: usize,
    pub unfinished: usize,
    pub vanished: usize,
}

impl CatalogStats {
    fn record(&mut self, status: TranslationStatus) {
        match status {
            TranslationStatus::Finished => self.finished += 1,
            TranslationStatus::Unfinished => self.unfinished += 1,
            TranslationStatus::Vanished => self.vanished += 1,
        }
    }

    /// Messages still referenced by the UI.
    #[must_use]
    pub const fn live(&self) -> usize {
        self.finished + self.unfinished
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.finished + self.unfinished + self.vanished
    }

    /// Percentage (rounded down) of live messages that are finished.
    ///
    /// An empty catalog counts as complete.
    #[must_use]
    pub const fn completion_percent(&self) -> usize {
        let live = self.live();
        if live == 0 { 100 } else { self.finished * 100 / live }
    }
}

impl std::ops::AddAssign for CatalogStats {
    fn add_assign(&mut self, rhs: Self) {
        self.finished += rhs.finished;
        self.unfinished += rhs.unfinished;
        self.vanished += rhs.vanished;
    }
}

/// A named group of messages (one dialog, panel or feature area).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Context {
    pub name: String,
    pub messages: Vec<Message>,
}

impl Context {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), messages: Vec::new() }
    }

    /// Finds the message with the given source string.
    #[must_use]
    pub fn message(&self, source: &str) -> Option<&Message> {
        self.messages.iter().find(|message| message.source == source)
    }

    /// Inserts a message, replacing an existing one with the same source.
    ///
    /// A replaced message keeps its position. Returns the replaced message.
    pub fn insert(&mut self, message: Message) -> Option<Message> {
        if let Some(existing) = self.messages.iter_mut().find(|m| m.source == message.source) {
            return Some(std::mem::replace(existing, message));
        }
        self.messages.push(message);
        None
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats::default();
        for message in &self.messages {
            stats.record(message.status);
        }
        stats
    }
}

/// An entire `.ts` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    /// Whether the legacy `<!DOCTYPE TS>` declaration is written.
    pub has_doctype: bool,
    pub contexts: Vec<Context>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: DEFAULT_TS_VERSION.to_string(),
            language: None,
            source_language: None,
            has_doctype: false,
            contexts: Vec::new(),
        }
    }
}

impl Catalog {
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self { language: Some(language.into()), ..Self::default() }
    }

    #[must_use]
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|context| context.name == name)
    }

    /// Returns the named context, appending an empty one if needed.
    pub fn context_mut(&mut self, name: &str) -> &mut Context {
        let index = match self.contexts.iter().position(|context| context.name == name) {
            Some(index) => index,
            None => {
                self.contexts.push(Context::new(name));
                self.contexts.len() - 1
            }
        };
        &mut self.contexts[index]
    }

    #[must_use]
    pub fn message(&self, context: &str, source: &str) -> Option<&Message> {
        self.context(context)?.message(source)
    }

    /// Inserts a message into a context (last definition wins).
    pub fn insert(&mut self, context: &str, message: Message) -> Option<Message> {
        self.context_mut(context).insert(message)
    }

    /// All messages with their context name, in file order.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.contexts.iter().flat_map(|context| {
            context.messages.iter().map(move |message| (context.name.as_str(), message))
        })
    }

    /// The `(context, source, translation, status)` tuples of the catalog.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &str, TranslationStatus)> {
        self.messages().map(|(context, message)| {
            (context, message.source.as_str(), message.translation.as_str(), message.status)
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.iter().map(|context| context.messages.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats::default();
        for context in &self.contexts {
            stats += context.stats();
        }
        stats
    }
}
