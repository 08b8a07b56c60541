#![forbid(unsafe_code)]

//! Startup configuration for the application store.
//!
//! Every field has a default, so an empty document (or none at all) yields
//! the stock experience: green theme, detected language, `Guest`, medium
//! text, dashboard first.
//!
//! ```toml
//! theme_color = "#3b82f6"
//! language = "auto"        # or a locale code such as "de" or "zh-TW"
//! username = "Ada"
//! font_size = "large"
//! initial_page = "forest"
//! narrow_breakpoint_px = 768
//! viewport_width_px = 1280
//! tick_interval_ms = 1000
//! ```

use std::time::Duration;

use forest_i18n::Language;
use forest_style::{FontSize, ThemeColor};
use serde::{Deserialize, Serialize};

use crate::locale::detect_system_language;
use crate::navigation::{DEFAULT_NARROW_BREAKPOINT, Page};
use crate::ticker::DEFAULT_TICK_INTERVAL;

/// Language value meaning "detect from the environment".
pub const AUTO_LANGUAGE: &str = "auto";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[cfg(feature = "config-file")]
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unsupported language {0:?} (expected \"auto\" or a supported locale code)")]
    UnsupportedLanguage(String),
    #[error("tick_interval_ms must be greater than zero")]
    ZeroTickInterval,
    #[error("narrow_breakpoint_px must be greater than zero")]
    ZeroBreakpoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForestConfig {
    pub theme_color: ThemeColor,
    pub language: String,
    pub username: String,
    pub font_size: FontSize,
    pub initial_page: Page,
    pub narrow_breakpoint_px: u32,
    pub viewport_width_px: u32,
    pub tick_interval_ms: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            theme_color: ThemeColor::default(),
            language: AUTO_LANGUAGE.to_owned(),
            username: "Guest".to_owned(),
            font_size: FontSize::default(),
            initial_page: Page::default(),
            narrow_breakpoint_px: DEFAULT_NARROW_BREAKPOINT,
            viewport_width_px: 1024,
            tick_interval_ms: u64::try_from(DEFAULT_TICK_INTERVAL.as_millis()).unwrap_or(1_000),
        }
    }
}

impl ForestConfig {
    /// Parse and validate a TOML document.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve_language()?;
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.narrow_breakpoint_px == 0 {
            return Err(ConfigError::ZeroBreakpoint);
        }
        Ok(())
    }

    /// The configured language, detecting it when set to `"auto"`.
    pub fn resolve_language(&self) -> Result<Language, ConfigError> {
        if self.language.trim().eq_ignore_ascii_case(AUTO_LANGUAGE) {
            return Ok(detect_system_language());
        }
        self.language
            .parse()
            .map_err(|_| ConfigError::UnsupportedLanguage(self.language.clone()))
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
