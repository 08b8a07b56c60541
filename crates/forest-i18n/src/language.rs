#![forbid(unsafe_code)]

//! The closed set of interface languages.

use core::fmt;
use core::str::FromStr;

use crate::plural::PluralRule;

/// Errors from parsing locale codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    UnknownLocale(String),
}

impl fmt::Display for I18nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLocale(code) => write!(f, "unsupported locale: {code}"),
        }
    }
}

impl std::error::Error for I18nError {}

/// A supported interface language.
///
/// The core stores the language as an opaque identifier; resolving strings
/// for it is the job of [`StringCatalog`](crate::catalog::StringCatalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    SimplifiedChinese,
    TraditionalChinese,
    German,
    Japanese,
    Korean,
    French,
    Spanish,
}

impl Language {
    /// Every supported language, in the order a language picker lists them.
    pub const ALL: [Language; 8] = [
        Self::English,
        Self::SimplifiedChinese,
        Self::TraditionalChinese,
        Self::German,
        Self::Japanese,
        Self::Korean,
        Self::French,
        Self::Spanish,
    ];

    /// BCP 47 style locale code (`"en"`, `"zh-CN"`, ...).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::SimplifiedChinese => "zh-CN",
            Self::TraditionalChinese => "zh-TW",
            Self::German => "de",
            Self::Japanese => "ja",
            Self::Korean => "ko",
            Self::French => "fr",
            Self::Spanish => "es",
        }
    }

    /// The language's name written in that language.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::SimplifiedChinese => "简体中文",
            Self::TraditionalChinese => "繁體中文",
            Self::German => "Deutsch",
            Self::Japanese => "日本語",
            Self::Korean => "한국어",
            Self::French => "Français",
            Self::Spanish => "Español",
        }
    }

    #[must_use]
    pub const fn plural_rule(self) -> PluralRule {
        match self {
            Self::English | Self::German | Self::Spanish => PluralRule::SingularOne,
            Self::French => PluralRule::SingularZeroOne,
            Self::SimplifiedChinese | Self::TraditionalChinese | Self::Japanese | Self::Korean => {
                PluralRule::Invariant
            }
        }
    }

    /// Map a normalized locale tag (`"fr-CA"`, `"zh-HK"`, `"ja"`) to the
    /// closest supported language.
    ///
    /// Unlike [`FromStr`], region subtags are tolerated: only the primary
    /// subtag matters, except for Chinese where the region selects the script.
    #[must_use]
    pub fn closest(tag: &str) -> Option<Self> {
        let mut parts = tag.split(['-', '_']);
        let primary = parts.next()?.to_ascii_lowercase();
        let region = parts.next().map(str::to_ascii_uppercase);
        let lang = match primary.as_str() {
            "en" => Self::English,
            "zh" => match region.as_deref() {
                Some("TW" | "HK" | "MO" | "HANT") => Self::TraditionalChinese,
                _ => Self::SimplifiedChinese,
            },
            "de" => Self::German,
            "ja" => Self::Japanese,
            "ko" => Self::Korean,
            "fr" => Self::French,
            "es" => Self::Spanish,
            _ => return None,
        };
        Some(lang)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = I18nError;

    /// Parse an exact locale code. Case and `_`/`-` separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| I18nError::UnknownLocale(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_str() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>().ok(), Some(lang));
        }
    }

    #[test]
    fn from_str_is_lenient_about_case_and_separator() {
        assert_eq!("ZH_tw".parse::<Language>().ok(), Some(Language::TraditionalChinese));
        assert_eq!(" de ".parse::<Language>().ok(), Some(Language::German));
    }

    #[test]
    fn from_str_rejects_unsupported_codes() {
        let err = "pt-BR".parse::<Language>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported locale: pt-BR");
        assert!("zh".parse::<Language>().is_err());
    }

    #[test]
    fn closest_uses_primary_subtag() {
        assert_eq!(Language::closest("fr-CA"), Some(Language::French));
        assert_eq!(Language::closest("zh"), Some(Language::SimplifiedChinese));
        assert_eq!(Language::closest("zh-HK"), Some(Language::TraditionalChinese));
        assert_eq!(Language::closest("es-419"), Some(Language::Spanish));
        assert_eq!(Language::closest("ru-RU"), None);
    }

    #[test]
    fn plural_families() {
        assert_eq!(Language::German.plural_rule(), PluralRule::SingularOne);
        assert_eq!(Language::French.plural_rule(), PluralRule::SingularZeroOne);
        assert_eq!(Language::Korean.plural_rule(), PluralRule::Invariant);
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(Language::default().to_string(), "en");
    }
}
