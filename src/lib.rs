//! qt-ts-i18n
//!
//! Reading, writing, checking and looking up Qt Linguist (`.ts`) translation
//! catalogs.

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod export;
pub mod indexer;
pub mod revision;
pub mod translator;
pub mod types;

mod test_utils;

pub use catalog::{
    Catalog,
    CatalogError,
    Message,
    TranslationStatus,
};
pub use translator::{
    Translator,
    TranslatorChain,
};
