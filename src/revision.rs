//! Differences between two revisions of the same catalog.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::{
    Catalog,
    Message,
    TranslationStatus,
};

/// A message identified by its context and source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageKey {
    pub context: String,
    pub source: String,
}

impl MessageKey {
    fn new(context: &str, source: &str) -> Self {
        Self { context: context.to_string(), source: source.to_string() }
    }
}

/// A finished translation whose text changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Retranslation {
    #[serde(flatten)]
    pub key: MessageKey,
    pub old: String,
    pub new: String,
}

/// How a catalog changed between two revisions.
///
/// Every list follows the message order of the revision it was found in:
/// `removed` follows the old catalog, everything else the new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RevisionDiff {
    /// In the new revision only.
    pub added: Vec<MessageKey>,
    /// In the old revision only.
    pub removed: Vec<MessageKey>,
    /// Unfinished before, finished now.
    pub completed: Vec<MessageKey>,
    /// Finished in both, with a different translation.
    pub retranslated: Vec<Retranslation>,
    /// Live before, vanished now.
    pub vanished: Vec<MessageKey>,
    /// Finished before, unfinished now.
    pub reopened: Vec<MessageKey>,
    /// Vanished before, live now.
    pub revived: Vec<MessageKey>,
}

impl RevisionDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.completed.is_empty()
            && self.retranslated.is_empty()
            && self.vanished.is_empty()
            && self.reopened.is_empty()
            && self.revived.is_empty()
    }
}

/// Compares two revisions message by message.
#[must_use]
pub fn compare(old: &Catalog, new: &Catalog) -> RevisionDiff {
    let old_messages: HashMap<(&str, &str), &Message> =
        old.messages().map(|(context, message)| ((context, message.source.as_str()), message)).collect();
    let new_messages: HashMap<(&str, &str), &Message> =
        new.messages().map(|(context, message)| ((context, message.source.as_str()), message)).collect();

    let mut diff = RevisionDiff::default();

    for (context, message) in new.messages() {
        let key = MessageKey::new(context, &message.source);
        let Some(before) = old_messages.get(&(context, message.source.as_str())) else {
            diff.added.push(key);
            continue;
        };

        match (before.status, message.status) {
            (TranslationStatus::Unfinished, TranslationStatus::Finished) => diff.completed.push(key),
            (TranslationStatus::Finished, TranslationStatus::Unfinished) => diff.reopened.push(key),
            (TranslationStatus::Finished, TranslationStatus::Finished)
                if before.translation != message.translation =>
            {
                diff.retranslated.push(Retranslation {
                    key,
                    old: before.translation.clone(),
                    new: message.translation.clone(),
                });
            }
            (TranslationStatus::Finished | TranslationStatus::Unfinished, TranslationStatus::Vanished) => {
                diff.vanished.push(key);
            }
            (TranslationStatus::Vanished, TranslationStatus::Finished | TranslationStatus::Unfinished) => {
                diff.revived.push(key);
            }
            _ => {}
        }
    }

    diff.removed = old
        .messages()
        .filter(|(context, message)| !new_messages.contains_key(&(*context, message.source.as_str())))
        .map(|(context, message)| MessageKey::new(context, &message.source))
        .collect();

    tracing::debug!(
        added = diff.added.len(),
        removed = diff.removed.len(),
        revived = diff.revived.len(),
        completed = diff.completed.len(),
        "Compared catalog revisions"
    );
    diff
}
