#![forbid(unsafe_code)]

//! Picking the initial interface language from the process environment.

use std::env;

use forest_i18n::Language;

/// Detect the interface language from `LC_ALL`, then `LANG`.
///
/// Variables naming an unsupported language are skipped; English is the
/// final fallback.
#[must_use]
pub fn detect_system_language() -> Language {
    let lc_all = env::var("LC_ALL").ok();
    let lang = env::var("LANG").ok();
    detect_language_from(lc_all.as_deref(), lang.as_deref())
}

/// [`detect_system_language`] over explicit variable values.
#[must_use]
pub fn detect_language_from(lc_all: Option<&str>, lang: Option<&str>) -> Language {
    [lc_all, lang]
        .into_iter()
        .flatten()
        .filter_map(normalize_locale_tag)
        .find_map(|tag| Language::closest(&tag))
        .unwrap_or_default()
}

/// Strip encoding and modifier suffixes (`fr_FR.UTF-8@euro` becomes
/// `fr-FR`). `C` and `POSIX` mean English.
#[must_use]
pub fn normalize_locale_tag(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw.split('@').next().unwrap_or(raw);
    let raw = raw.split('.').next().unwrap_or(raw).trim();
    if raw.is_empty() {
        return None;
    }
    if raw.eq_ignore_ascii_case("c") || raw.eq_ignore_ascii_case("posix") {
        return Some("en".to_owned());
    }
    Some(raw.replace('_', "-"))
}
