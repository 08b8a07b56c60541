#![forbid(unsafe_code)]

//! Per-language string tables with a fallback chain.
//!
//! A lookup tries the requested language first, then each language of the
//! fallback chain once, in order. Templates may contain `{name}` tokens,
//! replaced in a single left-to-right pass; a substituted value is never
//! scanned again, and a token without a matching argument is kept verbatim.

use std::collections::{BTreeMap, HashMap};

use crate::language::Language;
use crate::plural::PluralForms;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Text {
    Plain(String),
    Counted(PluralForms),
}

/// The strings of one language, keyed by message id.
#[derive(Debug, Clone, Default)]
pub struct LocaleStrings {
    entries: BTreeMap<String, Text>,
}

impl LocaleStrings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), Text::Plain(value.into()));
    }

    pub fn insert_plural(&mut self, key: impl Into<String>, forms: PluralForms) {
        self.entries.insert(key.into(), Text::Counted(forms));
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Message ids in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every loaded language plus the order in which misses fall back.
///
/// ```
/// use forest_i18n::{Language, LocaleStrings, PluralForms, StringCatalog};
///
/// let mut en = LocaleStrings::new();
/// en.insert("welcome", "Welcome, {name}!");
/// en.insert_plural("trees", PluralForms::new("{count} tree", "{count} trees"));
///
/// let mut catalog = StringCatalog::new();
/// catalog.add_language(Language::English, en);
/// catalog.set_fallback_chain(vec![Language::English]);
///
/// assert_eq!(
///     catalog.format(Language::Korean, "welcome", &[("name", "Ada")]).as_deref(),
///     Some("Welcome, Ada!")
/// );
/// assert_eq!(
///     catalog.format_plural(Language::English, "trees", 1, &[]).as_deref(),
///     Some("1 tree")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    tables: HashMap<Language, LocaleStrings>,
    fallback: Vec<Language>,
}

impl StringCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the table for `language`, replacing any earlier one.
    pub fn add_language(&mut self, language: Language, strings: LocaleStrings) {
        self.tables.insert(language, strings);
    }

    pub fn set_fallback_chain(&mut self, chain: Vec<Language>) {
        self.fallback = chain;
    }

    /// The template for `key`. Counted entries yield their `other` form.
    #[must_use]
    pub fn get(&self, language: Language, key: &str) -> Option<&str> {
        self.resolve(language, key, |_, text| match text {
            Text::Plain(value) => value.as_str(),
            Text::Counted(forms) => forms.other(),
        })
    }

    /// The template for `key` and `count`, chosen with the plural rule of
    /// whichever language supplies the entry.
    #[must_use]
    pub fn get_plural(&self, language: Language, key: &str, count: u64) -> Option<&str> {
        self.resolve(language, key, |found_in, text| match text {
            Text::Plain(value) => value.as_str(),
            Text::Counted(forms) => forms.form(found_in.plural_rule().category(count)),
        })
    }

    #[must_use]
    pub fn format(&self, language: Language, key: &str, args: &[(&str, &str)]) -> Option<String> {
        self.get(language, key)
            .map(|template| interpolate(template, args))
    }

    /// Like [`format`](Self::format) for counted entries; `{count}` is
    /// bound to `count`.
    #[must_use]
    pub fn format_plural(
        &self,
        language: Language,
        key: &str,
        count: u64,
        args: &[(&str, &str)],
    ) -> Option<String> {
        let template = self.get_plural(language, key, count)?;
        let count = count.to_string();
        let args: Vec<(&str, &str)> = std::iter::once(("count", count.as_str()))
            .chain(args.iter().copied())
            .collect();
        Some(interpolate(template, &args))
    }

    /// Loaded languages, in [`Language::ALL`] order.
    #[must_use]
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|language| self.tables.contains_key(language))
            .collect()
    }

    /// Keys of `reference` that `language` does not define itself, sorted.
    #[must_use]
    pub fn missing_keys(&self, language: Language, reference: Language) -> Vec<String> {
        let Some(reference) = self.tables.get(&reference) else {
            return Vec::new();
        };
        let own = self.tables.get(&language);
        reference
            .keys()
            .filter(|key| !own.is_some_and(|table| table.contains(key)))
            .map(str::to_owned)
            .collect()
    }

    fn resolve<'a, R>(
        &'a self,
        language: Language,
        key: &str,
        pick: impl Fn(Language, &'a Text) -> R,
    ) -> Option<R> {
        let chain = self.fallback.iter().copied().filter(|l| *l != language);
        std::iter::once(language).chain(chain).find_map(|candidate| {
            self.tables
                .get(&candidate)
                .and_then(|table| table.entries.get(key))
                .map(|text| pick(candidate, text))
        })
    }
}

fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..=open + close + 1]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}
