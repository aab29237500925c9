//! Serializes a [`Catalog`] back to TS XML in the layout lupdate produces.

use std::fmt::Write as _;
use std::path::Path;

use quick_xml::escape::escape;

use super::model::{
    Catalog,
    Message,
};
use super::parser::CatalogError;

/// Renders the catalog as TS XML.
#[must_use]
pub fn to_string(catalog: &Catalog) -> String {
    let mut out = String::new();
    // Writing to a String can't fail.
    let _ = write_catalog(&mut out, catalog);
    out
}

/// Writes the catalog to `path`, replacing any existing file.
///
/// # Errors
/// Returns [`CatalogError::Io`] if the file can't be written.
pub fn write_file(catalog: &Catalog, path: &Path) -> Result<(), CatalogError> {
    tracing::debug!(path = %path.display(), messages = catalog.len(), "Writing catalog");
    std::fs::write(path, to_string(catalog))
        .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })
}

fn write_catalog(out: &mut String, catalog: &Catalog) -> std::fmt::Result {
    writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
    if catalog.has_doctype {
        writeln!(out, "<!DOCTYPE TS>")?;
    }

    write!(out, r#"<TS version="{}""#, escape(catalog.version.as_str()))?;
    if let Some(language) = &catalog.language {
        write!(out, r#" language="{}""#, escape(language.as_str()))?;
    }
    if let Some(source_language) = &catalog.source_language {
        write!(out, r#" sourcelanguage="{}""#, escape(source_language.as_str()))?;
    }
    writeln!(out, ">")?;

    for context in &catalog.contexts {
        writeln!(out, "<context>")?;
        writeln!(out, "    <name>{}</name>", escape(context.name.as_str()))?;
        for message in &context.messages {
            write_message(out, message)?;
        }
        writeln!(out, "</context>")?;
    }

    writeln!(out, "</TS>")
}

fn write_message(out: &mut String, message: &Message) -> std::fmt::Result {
    if message.numerus {
        writeln!(out, r#"    <message numerus="yes">"#)?;
    } else {
        writeln!(out, "    <message>")?;
    }
    for location in &message.locations {
        write!(out, r#"        <location filename="{}""#, escape(location.filename.as_str()))?;
        if let Some(line) = &location.line {
            write!(out, r#" line="{}""#, escape(line.as_str()))?;
        }
        writeln!(out, "/>")?;
    }
    writeln!(out, "        <source>{}</source>", escape(message.source.as_str()))?;
    if let Some(comment) = &message.comment {
        writeln!(out, "        <comment>{}</comment>", escape(comment.as_str()))?;
    }
    if let Some(comment) = &message.extra_comment {
        writeln!(out, "        <extracomment>{}</extracomment>", escape(comment.as_str()))?;
    }
    if let Some(comment) = &message.translator_comment {
        writeln!(out, "        <translatorcomment>{}</translatorcomment>", escape(comment.as_str()))?;
    }

    write!(out, "        <translation")?;
    if let Some(kind) = message.status.type_attr() {
        write!(out, r#" type="{kind}""#)?;
    }
    if message.numerus_forms.is_empty() {
        writeln!(out, ">{}</translation>", escape(message.translation.as_str()))?;
    } else {
        writeln!(out, ">")?;
        for form in &message.numerus_forms {
            writeln!(out, "            <numerusform>{}</numerusform>", escape(form.as_str()))?;
        }
        writeln!(out, "        </translation>")?;
    }
    writeln!(out, "    </message>")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::catalog::{
        Location,
        TranslationStatus,
        parse_str,
    };

    #[googletest::test]
    fn test_writes_lupdate_layout() {
        let mut catalog = Catalog::new("fr");
        catalog.has_doctype = true;
        catalog.insert("File", Message::new("Open", "Ouvrir"));
        catalog.insert("control", Message::unfinished("Set the virtual origin"));

        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="fr">
<context>
    <name>File</name>
    <message>
        <source>Open</source>
        <translation>Ouvrir</translation>
    </message>
</context>
<context>
    <name>control</name>
    <message>
        <source>Set the virtual origin</source>
        <translation type="unfinished"></translation>
    </message>
</context>
</TS>
"#;
        assert_eq!(to_string(&catalog), expected);
    }

    #[googletest::test]
    fn test_escapes_markup() {
        let mut catalog = Catalog::new("de_DE");
        catalog.insert(
            "device",
            Message::new("Don't use <Device->Setup>", "Nicht \"Gerät\" & Co"),
        );

        let text = to_string(&catalog);

        expect_that!(
            text,
            contains_substring("<source>Don&apos;t use &lt;Device-&gt;Setup&gt;</source>")
        );
        expect_that!(
            text,
            contains_substring("<translation>Nicht &quot;Gerät&quot; &amp; Co</translation>")
        );
        expect_that!(text, not(contains_substring("DOCTYPE")));
    }

    #[googletest::test]
    fn test_optional_elements_round_trip() {
        let mut catalog = Catalog::new("de_DE");
        catalog.source_language = Some("en".to_string());
        let mut message = Message::new("Copies", "Kopien")
            .with_status(TranslationStatus::Vanished)
            .with_translator_comment("plural in UI");
        message.comment = Some("spin box label".to_string());
        message.extra_comment = Some("number of copies".to_string());
        message.locations.push(Location {
            filename: "job/view.enaml".to_string(),
            line: Some("42".to_string()),
        });
        catalog.insert("job", message);

        let reparsed = parse_str(&to_string(&catalog), Path::new("mem.ts")).unwrap().catalog;

        expect_that!(reparsed.source_language, some(eq("en")));
        let message = reparsed.message("job", "Copies").unwrap();
        expect_that!(message.status, eq(TranslationStatus::Vanished));
        expect_that!(message.comment, some(eq("spin box label")));
        expect_that!(message.extra_comment, some(eq("number of copies")));
        expect_that!(message.translator_comment, some(eq("plural in UI")));
        expect_that!(message.locations.len(), eq(1));
    }

    #[googletest::test]
    fn test_numerus_forms_round_trip() {
        let mut catalog = Catalog::new("de");
        catalog.insert(
            "job",
            Message::new("%n copies", "").with_numerus_forms(["%n Kopie", "%n Kopien"]),
        );

        let text = to_string(&catalog);
        let expected = r#"    <message numerus="yes">
        <source>%n copies</source>
        <translation>
            <numerusform>%n Kopie</numerusform>
            <numerusform>%n Kopien</numerusform>
        </translation>
    </message>
"#;
        expect_that!(text, contains_substring(expected));

        let reparsed = parse_str(&text, Path::new("mem.ts")).unwrap().catalog;
        let copies = reparsed.message("job", "%n copies").unwrap();
        expect_that!(copies.numerus, eq(true));
        assert_eq!(copies.numerus_forms, vec!["%n Kopie", "%n Kopien"]);
        expect_that!(copies.translation, eq("%n Kopie"));
    }

    #[googletest::test]
    fn test_write_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("de_DE.ts");
        let mut catalog = Catalog::new("de_DE");
        catalog.insert("device", Message::new("Width", "Breite"));

        write_file(&catalog, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        expect_that!(written, contains_substring("<translation>Breite</translation>"));
    }
}
