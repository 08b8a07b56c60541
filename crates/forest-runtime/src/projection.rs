#![forbid(unsafe_code)]

//! Style parameters projected from the settings for the rendering host.
//!
//! Two effects keep the outputs current: one maps the theme color to the
//! primary, hover and on-primary colors, the other maps the font size
//! preference to a base size in units.

use std::fmt;

use forest_style::{FontSize, ThemeColor};

use crate::error::ReactiveError;
use crate::reactive::{BatchScope, Effect, Observable, ReadSignal};

/// A plain copy of the projected style parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleVars {
    pub primary_color: String,
    pub hover_color: String,
    pub on_primary_color: String,
    pub base_font_size: u16,
}

impl StyleVars {
    /// Custom property pairs in the form a web host applies them.
    #[must_use]
    pub fn css_properties(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--primary-color", self.primary_color.clone()),
            ("--primary-color-hover", self.hover_color.clone()),
            ("--on-primary-color", self.on_primary_color.clone()),
            ("--font-size-base", format!("{}px", self.base_font_size)),
        ]
    }
}

/// Owner of the projection effects and their output cells.
pub struct StyleProjection {
    primary_color: Observable<String>,
    hover_color: Observable<String>,
    on_primary_color: Observable<String>,
    base_font_size: Observable<u16>,
    theme_effect: Effect,
    font_effect: Effect,
}

impl StyleProjection {
    /// Wire both effects. Each runs once immediately.
    pub fn new(
        theme_color: ReadSignal<ThemeColor>,
        font_size: ReadSignal<FontSize>,
    ) -> Result<Self, ReactiveError> {
        let initial = theme_color.get_untracked();
        let primary_color = Observable::new(initial.to_hex());
        let hover_color = Observable::new(initial.hover_hex());
        let on_primary_color = Observable::new(initial.contrasting_text().to_hex());
        let base_font_size = Observable::new(font_size.get_untracked().units());

        let theme_effect = {
            let (primary, hover, on_primary) = (
                primary_color.clone(),
                hover_color.clone(),
                on_primary_color.clone(),
            );
            Effect::new(move || {
                let color = theme_color.get();
                let _batch = BatchScope::new();
                primary.set(color.to_hex());
                hover.set(color.hover_hex());
                on_primary.set(color.contrasting_text().to_hex());
            })?
        };

        let font_effect = {
            let base = base_font_size.clone();
            Effect::new(move || base.set(font_size.get().units()))?
        };

        Ok(Self {
            primary_color,
            hover_color,
            on_primary_color,
            base_font_size,
            theme_effect,
            font_effect,
        })
    }

    /// Theme color as `#rrggbb`.
    #[must_use]
    pub fn primary_color(&self) -> String {
        self.primary_color.get()
    }

    /// Theme color with the hover alpha appended (`#rrggbbdd`).
    #[must_use]
    pub fn hover_color(&self) -> String {
        self.hover_color.get()
    }

    /// Text color readable on top of the theme color.
    #[must_use]
    pub fn on_primary_color(&self) -> String {
        self.on_primary_color.get()
    }

    #[must_use]
    pub fn base_font_size(&self) -> u16 {
        self.base_font_size.get()
    }

    #[must_use]
    pub fn hover_color_signal(&self) -> ReadSignal<String> {
        self.hover_color.read_only()
    }

    #[must_use]
    pub fn base_font_size_signal(&self) -> ReadSignal<u16> {
        self.base_font_size.read_only()
    }

    #[must_use]
    pub fn vars(&self) -> StyleVars {
        StyleVars {
            primary_color: self.primary_color(),
            hover_color: self.hover_color(),
            on_primary_color: self.on_primary_color(),
            base_font_size: self.base_font_size(),
        }
    }

    /// Invocations of the theme color effect so far.
    #[must_use]
    pub fn theme_effect_runs(&self) -> u64 {
        self.theme_effect.run_count()
    }

    /// Invocations of the font size effect so far.
    #[must_use]
    pub fn font_effect_runs(&self) -> u64 {
        self.font_effect.run_count()
    }
}

impl fmt::Debug for StyleProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleProjection")
            .field("vars", &self.vars())
            .finish()
    }
}
