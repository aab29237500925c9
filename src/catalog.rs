//! Qt Linguist translation catalogs (`.ts` files).
//!
//! A catalog is a list of [`Context`]s, each holding the [`Message`]s of one
//! UI area. Within a context, `source` strings are unique.

/// Locale detection and fallback chains
pub mod locale;
/// In-memory catalog model
mod model;
/// TS XML reader
pub mod parser;
/// TS XML writer
pub mod writer;

pub use model::{
    Catalog,
    CatalogStats,
    Context,
    Location,
    Message,
    TranslationStatus,
};
pub use parser::{
    CatalogError,
    Duplicate,
    ParsedCatalog,
    load_file,
    parse_str,
};
