#![forbid(unsafe_code)]

//! User preferences: four independent cells with validated intents.

use forest_i18n::Language;
use forest_style::{FontSize, ThemeColor};

use crate::error::{FocusError, ValidationError};
use crate::reactive::{Observable, ReadSignal};

/// Owner of the preference cells.
#[derive(Debug)]
pub struct Settings {
    theme_color: Observable<ThemeColor>,
    language: Observable<Language>,
    username: Observable<String>,
    font_size: Observable<FontSize>,
}

impl Settings {
    #[must_use]
    pub fn new(
        theme_color: ThemeColor,
        language: Language,
        username: impl Into<String>,
        font_size: FontSize,
    ) -> Self {
        Self {
            theme_color: Observable::new(theme_color),
            language: Observable::new(language),
            username: Observable::new(username.into()),
            font_size: Observable::new(font_size),
        }
    }

    #[must_use]
    pub fn theme_color(&self) -> ThemeColor {
        self.theme_color.get()
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language.get()
    }

    #[must_use]
    pub fn username(&self) -> String {
        self.username.get()
    }

    #[must_use]
    pub fn font_size(&self) -> FontSize {
        self.font_size.get()
    }

    #[must_use]
    pub fn theme_color_signal(&self) -> ReadSignal<ThemeColor> {
        self.theme_color.read_only()
    }

    #[must_use]
    pub fn language_signal(&self) -> ReadSignal<Language> {
        self.language.read_only()
    }

    #[must_use]
    pub fn username_signal(&self) -> ReadSignal<String> {
        self.username.read_only()
    }

    #[must_use]
    pub fn font_size_signal(&self) -> ReadSignal<FontSize> {
        self.font_size.read_only()
    }

    /// Parse `hex` (`#rgb` or `#rrggbb`) and make it the theme color.
    pub fn set_theme_color(&self, hex: &str) -> Result<ThemeColor, FocusError> {
        let color = ThemeColor::parse_hex(hex)?;
        self.set_theme(color);
        Ok(color)
    }

    pub fn set_theme(&self, color: ThemeColor) {
        self.theme_color.set(color);
    }

    /// Switch to the language with locale code `code` (`"en"`, `"zh-TW"`...).
    pub fn set_language(&self, code: &str) -> Result<Language, FocusError> {
        let language: Language = code
            .parse()
            .map_err(|_| ValidationError::UnsupportedLanguage(code.to_owned()))?;
        self.select_language(language);
        Ok(language)
    }

    pub fn select_language(&self, language: Language) {
        self.language.set(language);
    }

    pub fn set_username(&self, name: &str) {
        self.username.set(name.to_owned());
    }

    pub fn set_font_size(&self, size: FontSize) {
        self.font_size.set(size);
    }

    /// Like [`set_font_size`](Self::set_font_size) for a size name
    /// (`"small"`, `"medium"`, `"large"`).
    pub fn set_font_size_named(&self, name: &str) -> Result<FontSize, FocusError> {
        let size: FontSize = name.parse()?;
        self.set_font_size(size);
        Ok(size)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(ThemeColor::default(), Language::default(), "Guest", FontSize::default())
    }
}
