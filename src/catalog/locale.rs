//! Locale names as Qt spells them (`de_DE`, `fr`, `zh_Hant_TW`).

use std::path::Path;

use unic_langid::LanguageIdentifier;

/// Parses a locale tag written with `-` or `_` into Qt form.
///
/// Returns `None` unless the tag has a 2-3 letter language subtag, optionally
/// followed by a script and region. This rejects words like `inkcut` or
/// `translations` that BCP 47 would accept as language subtags.
///
/// ```
/// use qt_ts_i18n::catalog::locale::normalize_locale;
///
/// assert_eq!(normalize_locale("de-de").as_deref(), Some("de_DE"));
/// assert_eq!(normalize_locale("fr").as_deref(), Some("fr"));
/// assert_eq!(normalize_locale("inkcut"), None);
/// ```
#[must_use]
pub fn normalize_locale(tag: &str) -> Option<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        return None;
    }
    // `.UTF-8` and `@euro` suffixes of POSIX locales carry no language information.
    let tag = tag.split(['.', '@']).next().unwrap_or(tag);

    let langid: LanguageIdentifier = tag.parse().ok()?;
    let language = langid.language.as_str();
    if !(2..=3).contains(&language.len()) || language == "und" {
        return None;
    }
    if langid.variants().next().is_some() {
        return None;
    }

    let mut name = language.to_string();
    if let Some(script) = langid.script {
        name.push('_');
        name.push_str(script.as_str());
    }
    if let Some(region) = langid.region {
        name.push('_');
        name.push_str(region.as_str());
    }
    Some(name)
}

/// Detects the catalog language from its file name.
///
/// Qt projects name catalogs either after the locale (`de_DE.ts`) or with
/// an application prefix (`inkcut_de_DE.ts`). The longest suffix of the
/// file stem that is a locale wins.
///
/// # Examples
/// - `translations/fr_FR.ts` → `fr_FR`
/// - `res/translations/inkcut_de.ts` → `de`
#[must_use]
pub fn detect_language_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;

    let mut candidate = stem;
    loop {
        if let Some(locale) = normalize_locale(candidate) {
            return Some(locale);
        }
        let (_, rest) = candidate.split_once(['_', '-'])?;
        candidate = rest;
    }
}

/// Locales to try for `locale`, most specific first.
///
/// ```
/// use qt_ts_i18n::catalog::locale::fallback_chain;
///
/// assert_eq!(fallback_chain("de_DE"), vec!["de_DE", "de"]);
/// assert_eq!(fallback_chain("zh-Hant-TW"), vec!["zh_Hant_TW", "zh_Hant", "zh"]);
/// ```
#[must_use]
pub fn fallback_chain(locale: &str) -> Vec<String> {
    let Some(normalized) = normalize_locale(locale) else {
        return Vec::new();
    };

    let mut chain = vec![normalized.clone()];
    let mut current = normalized.as_str();
    while let Some((parent, _)) = current.rsplit_once('_') {
        chain.push(parent.to_string());
        current = parent;
    }
    chain
}

/// The operating system's locale in Qt form, if it can be determined.
#[must_use]
pub fn system_locale() -> Option<String> {
    let raw = sys_locale::get_locale()?;
    let locale = normalize_locale(&raw);
    tracing::debug!(raw = %raw, locale = ?locale, "Detected system locale");
    locale
}

/// Whether two locale names refer to the same language and region.
#[must_use]
pub fn same_locale(a: &str, b: &str) -> bool {
    match (normalize_locale(a), normalize_locale(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}
