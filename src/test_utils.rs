//! Helpers shared by unit tests.
#![cfg(test)]

use crate::catalog::{
    Catalog,
    Message,
};

/// Builds a catalog from `(context, source, translation)` entries.
///
/// `None` as translation makes the message unfinished.
pub(crate) fn create_catalog(language: &str, entries: &[(&str, &str, Option<&str>)]) -> Catalog {
    let mut catalog = Catalog::new(language);
    for &(context, source, translation) in entries {
        let message = translation.map_or_else(
            || Message::unfinished(source),
            |translation| Message::new(source, translation),
        );
        catalog.insert(context, message);
    }
    catalog
}
