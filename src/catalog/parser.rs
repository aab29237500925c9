//! Reads Qt Linguist TS 2.1 XML into a [`Catalog`].

use std::borrow::Cow;
use std::path::{
    Path,
    PathBuf,
};

use quick_xml::Reader;
use quick_xml::events::{
    BytesStart,
    Event,
};
use thiserror::Error;

use super::model::{
    Catalog,
    DEFAULT_TS_VERSION,
    Location,
    Message,
    TranslationStatus,
};
use crate::types::{
    SourcePosition,
    SourceRange,
};

/// Errors raised while loading a catalog.
///
/// Every variant names the offending file; markup errors also carry the
/// 1-based line.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: malformed XML: {message}", .path.display())]
    Xml { path: PathBuf, line: u32, message: String },

    #[error("{}:{line}: {message}", .path.display())]
    Structure { path: PathBuf, line: u32, message: String },
}

impl CatalogError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Xml { path, .. } | Self::Structure { path, .. } => path,
        }
    }

    /// 1-based line of the error, if it comes from the file contents.
    #[must_use]
    pub const fn line(&self) -> Option<u32> {
        match self {
            Self::Io { .. } => None,
            Self::Xml { line, .. } | Self::Structure { line, .. } => Some(*line),
        }
    }
}

/// A message defined more than once in the same context.
///
/// The last definition is kept, at the position of the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub context: String,
    pub source: String,
    pub first: SourceRange,
    pub last: SourceRange,
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCatalog {
    pub catalog: Catalog,
    pub duplicates: Vec<Duplicate>,
}

/// Reads and parses a catalog file.
///
/// # Errors
/// Returns [`CatalogError::Io`] if the file can't be read, and the parse
/// errors of [`parse_str`] otherwise.
pub fn load_file(path: &Path) -> Result<ParsedCatalog, CatalogError> {
    tracing::debug!(path = %path.display(), "Loading catalog");
    let text = std::fs::read_to_string(path)
        .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
    parse_str(&text, path)
}

/// Parses catalog text. `path` is only used for error messages.
///
/// # Errors
/// Returns [`CatalogError::Xml`] for malformed markup and
/// [`CatalogError::Structure`] for well-formed XML that isn't a valid catalog.
pub fn parse_str(text: &str, path: &Path) -> Result<ParsedCatalog, CatalogError> {
    CatalogParser::new(text, path).parse()
}

/// Owned copy of an element name, for error messages and end-tag matching.
fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

/// Pull parser state for one catalog.
struct CatalogParser<'a> {
    reader: Reader<&'a [u8]>,
    text: &'a str,
    path: &'a Path,
    /// Byte offset where the most recently read event started.
    event_start: usize,
    duplicates: Vec<Duplicate>,
}

impl<'a> CatalogParser<'a> {
    fn new(text: &'a str, path: &'a Path) -> Self {
        Self { reader: Reader::from_str(text), text, path, event_start: 0, duplicates: Vec::new() }
    }

    fn offset(&self) -> usize {
        usize::try_from(self.reader.buffer_position()).unwrap_or(usize::MAX)
    }

    fn line_at(&self, offset: usize) -> u32 {
        SourcePosition::from_offset(self.text, offset).display_line()
    }

    fn structure_error(&self, message: impl Into<String>) -> CatalogError {
        CatalogError::Structure {
            path: self.path.to_path_buf(),
            line: self.line_at(self.event_start),
            message: message.into(),
        }
    }

    /// Error reported by the reader itself; positioned where the reader stopped.
    fn reader_error(&self, error: &quick_xml::Error) -> CatalogError {
        let offset = usize::try_from(self.reader.error_position())
            .unwrap_or(self.event_start)
            .max(self.event_start);
        self.xml_error_at(offset, error)
    }

    /// Error found while decoding the current event (escapes, attributes).
    fn xml_error(&self, error: &quick_xml::Error) -> CatalogError {
        self.xml_error_at(self.event_start, error)
    }

    fn xml_error_at(&self, offset: usize, error: &quick_xml::Error) -> CatalogError {
        CatalogError::Xml {
            path: self.path.to_path_buf(),
            line: self.line_at(offset),
            message: error.to_string(),
        }
    }

    fn next_event(&mut self) -> Result<Event<'a>, CatalogError> {
        self.event_start = self.offset();
        self.reader.read_event().map_err(|e| self.reader_error(&e))
    }

    fn attribute(
        &self,
        start: &BytesStart<'_>,
        name: &str,
    ) -> Result<Option<String>, CatalogError> {
        let attribute = start
            .try_get_attribute(name)
            .map_err(|e| self.xml_error(&quick_xml::Error::from(e)))?;
        attribute
            .map(|attr| {
                attr.unescape_value().map(Cow::into_owned).map_err(|e| self.xml_error(&e))
            })
            .transpose()
    }

    fn parse(mut self) -> Result<ParsedCatalog, CatalogError> {
        let mut has_doctype = false;

        loop {
            match self.next_event()? {
                Event::DocType(_) => has_doctype = true,
                Event::Start(start) if start.name().as_ref() == b"TS" => {
                    let mut catalog = self.parse_root_attributes(&start)?;
                    catalog.has_doctype = has_doctype;
                    self.parse_contexts(&mut catalog)?;
                    self.expect_end_of_document()?;
                    tracing::debug!(
                        path = %self.path.display(),
                        contexts = catalog.contexts.len(),
                        messages = catalog.len(),
                        "Parsed catalog"
                    );
                    return Ok(ParsedCatalog { catalog, duplicates: self.duplicates });
                }
                Event::Empty(start) if start.name().as_ref() == b"TS" => {
                    let mut catalog = self.parse_root_attributes(&start)?;
                    catalog.has_doctype = has_doctype;
                    self.expect_end_of_document()?;
                    return Ok(ParsedCatalog { catalog, duplicates: self.duplicates });
                }
                Event::Start(start) | Event::Empty(start) => {
                    return Err(self.structure_error(format!(
                        "expected <TS> root element, found <{}>",
                        element_name(&start)
                    )));
                }
                Event::Text(text) if !text.iter().all(u8::is_ascii_whitespace) => {
                    return Err(self.structure_error("unexpected text before <TS>"));
                }
                Event::Eof => return Err(self.structure_error("missing <TS> root element")),
                _ => {}
            }
        }
    }

    fn parse_root_attributes(&self, start: &BytesStart<'_>) -> Result<Catalog, CatalogError> {
        Ok(Catalog {
            version: self
                .attribute(start, "version")?
                .unwrap_or_else(|| DEFAULT_TS_VERSION.to_string()),
            language: self.attribute(start, "language")?.filter(|lang| !lang.is_empty()),
            source_language: self
                .attribute(start, "sourcelanguage")?
                .filter(|lang| !lang.is_empty()),
            has_doctype: false,
            contexts: Vec::new(),
        })
    }

    fn expect_end_of_document(&mut self) -> Result<(), CatalogError> {
        loop {
            match self.next_event()? {
                Event::Eof => return Ok(()),
                Event::Start(start) | Event::Empty(start) => {
                    return Err(self.structure_error(format!(
                        "unexpected <{}> after </TS>",
                        element_name(&start)
                    )));
                }
                _ => {}
            }
        }
    }

    fn parse_contexts(&mut self, catalog: &mut Catalog) -> Result<(), CatalogError> {
        loop {
            match self.next_event()? {
                Event::Start(start) if start.name().as_ref() == b"context" => {
                    self.parse_context(catalog)?;
                }
                Event::Start(start) => self.skip_element(&start)?,
                Event::Empty(start) if start.name().as_ref() == b"context" => {
                    return Err(self.structure_error("<context> without <name>"));
                }
                Event::End(end) if end.name().as_ref() == b"TS" => return Ok(()),
                Event::Eof => return Err(self.structure_error("unclosed <TS> element")),
                _ => {}
            }
        }
    }

    fn parse_context(&mut self, catalog: &mut Catalog) -> Result<(), CatalogError> {
        let context_start = self.event_start;
        let mut name: Option<String> = None;
        let mut messages = Vec::new();

        loop {
            match self.next_event()? {
                Event::Start(start) => match start.name().as_ref() {
                    b"name" => name = Some(self.read_text(b"name")?),
                    b"message" => messages.push(self.parse_message(&start, self.event_start)?),
                    _ => self.skip_element(&start)?,
                },
                Event::Empty(start) if start.name().as_ref() == b"name" => {
                    name = Some(String::new());
                }
                Event::Empty(start) if start.name().as_ref() == b"message" => {
                    return Err(self.structure_error("<message> without <source>"));
                }
                Event::End(end) if end.name().as_ref() == b"context" => break,
                Event::Eof => return Err(self.structure_error("unclosed <context> element")),
                _ => {}
            }
        }

        let Some(name) = name else {
            self.event_start = context_start;
            return Err(self.structure_error("<context> without <name>"));
        };

        // Contexts split across several blocks are merged into the first.
        let context = catalog.context_mut(&name);
        for message in messages {
            let range = message.range;
            let source = message.source.clone();
            if let Some(previous) = context.insert(message) {
                tracing::warn!(
                    path = %self.path.display(),
                    context = %name,
                    source = %source,
                    line = range.start.display_line(),
                    "Duplicate message; keeping the last definition"
                );
                self.duplicates.push(Duplicate {
                    context: name.clone(),
                    source,
                    first: previous.range,
                    last: range,
                });
            }
        }
        Ok(())
    }

    fn parse_message(
        &mut self,
        start: &BytesStart<'_>,
        message_start: usize,
    ) -> Result<Message, CatalogError> {
        let mut source: Option<String> = None;
        let mut translation: Option<(String, TranslationStatus)> = None;
        let mut message = Message::new(String::new(), String::new());
        message.numerus = self.attribute(start, "numerus")?.is_some_and(|value| value == "yes");

        loop {
            match self.next_event()? {
                Event::Start(start) => match start.name().as_ref() {
                    b"source" => {
                        if source.is_some() {
                            return Err(self.structure_error("<message> has more than one <source>"));
                        }
                        source = Some(self.read_text(b"source")?);
                    }
                    b"translation" => {
                        if translation.is_some() {
                            return Err(
                                self.structure_error("<message> has more than one <translation>")
                            );
                        }
                        let status = self.translation_status(&start)?;
                        let (text, forms) = self.read_translation()?;
                        message.numerus_forms = forms;
                        translation = Some((text, status));
                    }
                    b"comment" => message.comment = Some(self.read_text(b"comment")?),
                    b"extracomment" => {
                        message.extra_comment = Some(self.read_text(b"extracomment")?);
                    }
                    b"translatorcomment" => {
                        message.translator_comment = Some(self.read_text(b"translatorcomment")?);
                    }
                    b"location" => {
                        message.locations.push(self.location(&start)?);
                        self.skip_element(&start)?;
                    }
                    _ => self.skip_element(&start)?,
                },
                Event::Empty(start) => match start.name().as_ref() {
                    b"source" => {
                        if source.is_some() {
                            return Err(self.structure_error("<message> has more than one <source>"));
                        }
                        source = Some(String::new());
                    }
                    b"translation" => {
                        if translation.is_some() {
                            return Err(
                                self.structure_error("<message> has more than one <translation>")
                            );
                        }
                        translation = Some((String::new(), self.translation_status(&start)?));
                    }
                    b"location" => message.locations.push(self.location(&start)?),
                    other => {
                        tracing::debug!(
                            element = %String::from_utf8_lossy(other),
                            "Skipping unsupported message element"
                        );
                    }
                },
                Event::End(end) if end.name().as_ref() == b"message" => break,
                Event::Eof => return Err(self.structure_error("unclosed <message> element")),
                _ => {}
            }
        }

        let message_end = self.offset();
        self.event_start = message_start;

        let source = source.ok_or_else(|| self.structure_error("<message> without <source>"))?;
        if source.is_empty() {
            return Err(self.structure_error("<message> has an empty <source>"));
        }
        let (text, status) = translation.ok_or_else(|| {
            self.structure_error(format!("<message> '{source}' without <translation>"))
        })?;

        message.source = source;
        message.translation = text;
        message.status = status;
        message.range = SourceRange::from_offsets(self.text, message_start, message_end);
        Ok(message)
    }

    fn translation_status(
        &self,
        start: &BytesStart<'_>,
    ) -> Result<TranslationStatus, CatalogError> {
        let kind = self.attribute(start, "type")?;
        TranslationStatus::from_type_attr(kind.as_deref()).ok_or_else(|| {
            self.structure_error(format!(
                "unknown translation type '{}'",
                kind.as_deref().unwrap_or_default()
            ))
        })
    }

    fn location(&self, start: &BytesStart<'_>) -> Result<Location, CatalogError> {
        Ok(Location {
            filename: self.attribute(start, "filename")?.unwrap_or_default(),
            line: self.attribute(start, "line")?,
        })
    }

    /// Reads the text content of the current element up to its end tag.
    fn read_text(&mut self, end_name: &[u8]) -> Result<String, CatalogError> {
        let mut content = String::new();
        loop {
            match self.next_event()? {
                Event::Text(text) => {
                    let unescaped = text.unescape().map_err(|e| self.xml_error(&e))?;
                    content.push_str(&unescaped);
                }
                Event::CData(data) => content.push_str(&String::from_utf8_lossy(&data)),
                Event::End(end) if end.name().as_ref() == end_name => return Ok(content),
                Event::Start(start) => {
                    return Err(self.structure_error(format!(
                        "unexpected <{}> inside <{}>",
                        element_name(&start),
                        String::from_utf8_lossy(end_name)
                    )));
                }
                Event::Eof => {
                    return Err(self.structure_error(format!(
                        "unclosed <{}> element",
                        String::from_utf8_lossy(end_name)
                    )));
                }
                // `<byte value="..."/>` and comments carry nothing we keep.
                _ => {}
            }
        }
    }

    /// Reads `<translation>` content: plain text, or `<numerusform>` children
    /// for plural messages. With plural forms the first one is the text.
    fn read_translation(&mut self) -> Result<(String, Vec<String>), CatalogError> {
        let mut content = String::new();
        let mut forms = Vec::new();
        loop {
            match self.next_event()? {
                Event::Text(text) => {
                    let unescaped = text.unescape().map_err(|e| self.xml_error(&e))?;
                    content.push_str(&unescaped);
                }
                Event::CData(data) => content.push_str(&String::from_utf8_lossy(&data)),
                Event::Start(start) if start.name().as_ref() == b"numerusform" => {
                    forms.push(self.read_text(b"numerusform")?);
                }
                Event::Empty(start) if start.name().as_ref() == b"numerusform" => {
                    forms.push(String::new());
                }
                Event::Start(start) => self.skip_element(&start)?,
                Event::End(end) if end.name().as_ref() == b"translation" => {
                    return Ok(match forms.first() {
                        Some(first) => (first.clone(), forms),
                        None => (content, forms),
                    });
                }
                Event::Eof => return Err(self.structure_error("unclosed <translation> element")),
                _ => {}
            }
        }
    }

    /// Consumes an element we don't model, including its children.
    fn skip_element(&mut self, start: &BytesStart<'_>) -> Result<(), CatalogError> {
        let name = start.name().as_ref().to_vec();
        tracing::debug!(element = %String::from_utf8_lossy(&name), "Skipping unsupported element");

        let mut depth = 0_usize;
        loop {
            match self.next_event()? {
                Event::Start(inner) if inner.name().as_ref() == name.as_slice() => depth += 1,
                Event::End(end) if end.name().as_ref() == name.as_slice() => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                Event::Eof => {
                    return Err(self.structure_error(format!(
                        "unclosed <{}> element",
                        String::from_utf8_lossy(&name)
                    )));
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn parse(text: &str) -> Result<ParsedCatalog, CatalogError> {
        parse_str(text, Path::new("test.ts"))
    }

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="de_DE">
<context>
    <name>device</name>
    <message>
        <source>Width</source>
        <translation>Breite</translation>
    </message>
    <message>
        <source>Force</source>
        <translation type="unfinished"></translation>
    </message>
</context>
<context>
    <name>job</name>
    <message>
        <location filename="../inkcut/job/view.enaml" line="+12"/>
        <source>Don&apos;t ask again</source>
        <comment>checkbox</comment>
        <translatorcomment>short form preferred</translatorcomment>
        <translation type="vanished">Nicht erneut fragen</translation>
    </message>
</context>
</TS>
"#;

    #[googletest::test]
    fn test_parse_sample() {
        let parsed = parse(SAMPLE).unwrap();
        let catalog = &parsed.catalog;

        expect_that!(catalog.version, eq("2.1"));
        expect_that!(catalog.language, some(eq("de_DE")));
        expect_that!(catalog.has_doctype, eq(true));
        expect_that!(catalog.contexts.len(), eq(2));
        expect_that!(parsed.duplicates, is_empty());

        let width = catalog.message("device", "Width").unwrap();
        expect_that!(width.translation, eq("Breite"));
        expect_that!(width.status, eq(TranslationStatus::Finished));

        let force = catalog.message("device", "Force").unwrap();
        expect_that!(force.translation, eq(""));
        expect_that!(force.status, eq(TranslationStatus::Unfinished));

        let ask = catalog.message("job", "Don't ask again").unwrap();
        expect_that!(ask.status, eq(TranslationStatus::Vanished));
        expect_that!(ask.comment, some(eq("checkbox")));
        expect_that!(ask.translator_comment, some(eq("short form preferred")));
        expect_that!(
            ask.locations,
            elements_are![all![
                field!(Location.filename, eq("../inkcut/job/view.enaml")),
                field!(Location.line, some(eq("+12")))
            ]]
        );
    }

    #[googletest::test]
    fn test_parse_records_message_ranges() {
        let parsed = parse(SAMPLE).unwrap();

        let width = parsed.catalog.message("device", "Width").unwrap();
        // 0-indexed lines of `<message>` and `</message>`
        expect_that!(width.range.start.line, eq(5));
        expect_that!(width.range.end.line, eq(8));
    }

    #[googletest::test]
    fn test_parse_without_doctype() {
        let parsed = parse(r#"<?xml version="1.0" encoding="utf-8"?><TS version="2.1" language="fr"></TS>"#)
            .unwrap();

        expect_that!(parsed.catalog.has_doctype, eq(false));
        expect_that!(parsed.catalog.is_empty(), eq(true));
    }

    #[googletest::test]
    fn test_parse_escapes() {
        let parsed = parse(
            "<TS><context><name>device</name><message>\
             <source>Device-&gt;Setup &amp; more</source>\
             <translation>Gerät-&gt;Setup &#38; mehr</translation>\
             </message></context></TS>",
        )
        .unwrap();

        let message = parsed.catalog.message("device", "Device->Setup & more").unwrap();
        expect_that!(message.translation, eq("Gerät->Setup & mehr"));
    }

    #[googletest::test]
    fn test_parse_preserves_whitespace_in_translation() {
        let parsed = parse(
            "<TS><context><name>c</name><message>\
             <source> x </source><translation>  y\n</translation>\
             </message></context></TS>",
        )
        .unwrap();

        expect_that!(parsed.catalog.message("c", " x ").unwrap().translation, eq("  y\n"));
    }

    #[googletest::test]
    fn test_parse_empty_translation_element() {
        let parsed = parse(
            r#"<TS><context><name>c</name><message><source>x</source><translation type="unfinished"/></message></context></TS>"#,
        )
        .unwrap();

        let message = parsed.catalog.message("c", "x").unwrap();
        expect_that!(message.status, eq(TranslationStatus::Unfinished));
        expect_that!(message.translation, eq(""));
    }

    #[googletest::test]
    fn test_duplicate_resolves_to_last_definition() {
        let parsed = parse(
            "<TS><context><name>device</name>\
             <message><source>Width</source><translation>Weite</translation></message>\
             <message><source>Speed</source><translation>Tempo</translation></message>\
             <message><source>Width</source><translation>Breite</translation></message>\
             </context></TS>",
        )
        .unwrap();

        let device = parsed.catalog.context("device").unwrap();
        expect_that!(
            device.messages,
            elements_are![
                field!(Message.translation, eq("Breite")),
                field!(Message.translation, eq("Tempo"))
            ]
        );
        expect_that!(
            parsed.duplicates,
            elements_are![all![
                field!(Duplicate.context, eq("device")),
                field!(Duplicate.source, eq("Width"))
            ]]
        );
    }

    #[googletest::test]
    fn test_repeated_context_blocks_are_merged() {
        let parsed = parse(
            "<TS>\
             <context><name>pi</name><message><source>Pin</source><translation>Pin</translation></message></context>\
             <context><name>job</name><message><source>Copies</source><translation>Kopien</translation></message></context>\
             <context><name>pi</name><message><source>Delay</source><translation>Verzögerung</translation></message></context>\
             </TS>",
        )
        .unwrap();

        expect_that!(parsed.catalog.contexts.len(), eq(2));
        expect_that!(parsed.catalog.context("pi").unwrap().messages.len(), eq(2));
        expect_that!(parsed.catalog.contexts[0].name, eq("pi"));
    }

    #[googletest::test]
    fn test_unknown_elements_are_skipped() {
        let parsed = parse(
            "<TS><dependencies><dependency catalog=\"qt\"/></dependencies>\
             <context><name>c</name><message numerus=\"yes\"><source>x</source>\
             <oldsource>y</oldsource><translation>z</translation></message></context></TS>",
        )
        .unwrap();

        expect_that!(parsed.catalog.message("c", "x").unwrap().translation, eq("z"));
    }

    #[googletest::test]
    fn test_parse_numerus_forms() {
        let parsed = parse(
            r#"<TS language="de">
<context>
    <name>job</name>
    <message numerus="yes">
        <source>%n copies</source>
        <translation>
            <numerusform>%n Kopie</numerusform>
            <numerusform>%n Kopien</numerusform>
        </translation>
    </message>
    <message>
        <source>Width</source>
        <translation>Breite</translation>
    </message>
</context>
</TS>"#,
        )
        .unwrap();

        let copies = parsed.catalog.message("job", "%n copies").unwrap();
        expect_that!(copies.numerus, eq(true));
        expect_that!(copies.numerus_forms, elements_are![eq("%n Kopie"), eq("%n Kopien")]);
        expect_that!(copies.translation, eq("%n Kopie"));
        expect_that!(copies.status, eq(TranslationStatus::Finished));

        let width = parsed.catalog.message("job", "Width").unwrap();
        expect_that!(width.numerus, eq(false));
        expect_that!(width.translation, eq("Breite"));
    }

    #[googletest::test]
    fn test_unknown_translation_children_are_skipped() {
        let parsed = parse(
            "<TS><context><name>c</name><message><source>x</source>\
             <translation>z<lengthvariant>zz</lengthvariant></translation>\
             </message></context></TS>",
        )
        .unwrap();

        expect_that!(parsed.catalog.message("c", "x").unwrap().translation, eq("z"));
    }

    #[rstest]
    #[case::empty_message_element(
        "<TS><context><name>c</name><message/></context></TS>",
        "without <source>"
    )]
    #[case::empty_source(
        "<TS>\n<context>\n<name>c</name>\n<message><source></source><translation/></message></context></TS>",
        "empty <source>"
    )]
    #[case::missing_source(
        "<TS><context><name>c</name><message><translation>y</translation></message></context></TS>",
        "without <source>"
    )]
    #[case::missing_translation(
        "<TS><context><name>c</name><message><source>x</source></message></context></TS>",
        "without <translation>"
    )]
    #[case::missing_context_name(
        "<TS><context><message><source>x</source><translation/></message></context></TS>",
        "without <name>"
    )]
    #[case::wrong_root("<catalog></catalog>", "expected <TS>")]
    #[case::no_root("", "missing <TS>")]
    #[case::unknown_type(
        "<TS><context><name>c</name><message><source>x</source><translation type=\"draft\">y</translation></message></context></TS>",
        "unknown translation type"
    )]
    fn test_structure_errors(#[case] text: &str, #[case] expected: &str) {
        let error = parse(text).unwrap_err();

        assert!(matches!(error, CatalogError::Structure { .. }), "{error:?}");
        assert_that!(error.to_string(), contains_substring(expected));
        assert_that!(error.to_string(), starts_with("test.ts:"));
    }

    #[googletest::test]
    fn test_xml_error_names_file_and_line() {
        let error = parse("<TS>\n<context>\n<name>c</name>\n</message>\n</TS>").unwrap_err();

        expect_that!(matches!(error, CatalogError::Xml { .. }), eq(true));
        expect_that!(error.path(), eq(Path::new("test.ts")));
        expect_that!(error.line(), some(eq(4)));
    }

    #[googletest::test]
    fn test_unclosed_message_is_an_error() {
        let result = parse("<TS>\n<context>\n<name>c</name>\n<message>\n<source>x</source>\n");

        expect_that!(result, err(anything()));
        if let Err(error) = result {
            expect_that!(error.path(), eq(Path::new("test.ts")));
            expect_that!(error.line(), some(anything()));
        }
    }

    #[googletest::test]
    fn test_invalid_escape_is_an_error() {
        let error = parse(
            "<TS>\n<context><name>c</name><message><source>a &bogus; b</source>\
             <translation/></message></context></TS>",
        )
        .unwrap_err();

        expect_that!(matches!(error, CatalogError::Xml { .. }), eq(true));
        expect_that!(error.line(), some(eq(2)));
    }

    #[googletest::test]
    fn test_load_file_missing() {
        let error = load_file(Path::new("/nonexistent/de_DE.ts")).unwrap_err();

        expect_that!(matches!(error, CatalogError::Io { .. }), eq(true));
        expect_that!(error.line(), none());
        expect_that!(error.to_string(), contains_substring("/nonexistent/de_DE.ts"));
    }
}
