//! JSON export of catalogs.
//!
//! The nested form is `{ "context": { "source": "translation" } }`.

use serde_json::{
    Map,
    Value,
};

use crate::catalog::{
    Catalog,
    TranslationStatus,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Emit unfinished and empty entries with the source text as value.
    pub include_unfinished: bool,
    /// Emit vanished entries with their last translation.
    pub include_vanished: bool,
}

/// Nested JSON object of the catalog's translations.
///
/// Contexts and sources keep their catalog order. Contexts without any
/// exported entry are left out.
#[must_use]
pub fn to_json(catalog: &Catalog, options: ExportOptions) -> Value {
    let mut root = Map::new();

    for context in &catalog.contexts {
        let mut entries = Map::new();
        for message in &context.messages {
            let resolved = match message.status {
                TranslationStatus::Vanished if !options.include_vanished => continue,
                TranslationStatus::Vanished => {
                    Some(message.translation.as_str()).filter(|text| !text.is_empty())
                }
                _ if options.include_unfinished => Some(message.display_text()),
                _ => message.resolved(),
            };
            let value = match resolved {
                Some(translation) => translation,
                None if options.include_unfinished => message.source.as_str(),
                None => continue,
            };
            entries.insert(message.source.clone(), Value::String(value.to_string()));
        }
        if !entries.is_empty() {
            root.insert(context.name.clone(), Value::Object(entries));
        }
    }

    Value::Object(root)
}

/// Flattens a nested export into `context<separator>source` keys.
///
/// Non-object values at the top level and non-string leaves are skipped.
#[must_use]
pub fn flatten(value: &Value, separator: &str) -> Vec<(String, String)> {
    let Some(contexts) = value.as_object() else {
        return Vec::new();
    };

    contexts
        .iter()
        .filter_map(|(context, entries)| entries.as_object().map(|entries| (context, entries)))
        .flat_map(|(context, entries)| {
            entries.iter().filter_map(move |(source, translation)| {
                translation
                    .as_str()
                    .map(|translation| (format!("{context}{separator}{source}"), translation.to_string()))
            })
        })
        .collect()
}
