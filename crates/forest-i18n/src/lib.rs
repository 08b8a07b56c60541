#![forbid(unsafe_code)]

//! Localization support for Focus Forest.
//!
//! The reactive core only ever stores a [`Language`] identifier. Everything
//! needed to turn that identifier into user-facing text lives here:
//!
//! - [`Language`]: the closed set of supported interface languages
//! - [`StringCatalog`]: per-language string tables with fallback and
//!   `{name}` interpolation
//! - [`PluralRule`]: CLDR plural categories for the bundled languages
//! - [`bundled_catalog`]: the tables shipped with the application

pub mod bundled;
pub mod catalog;
pub mod language;
pub mod plural;

pub use bundled::bundled_catalog;
pub use catalog::{LocaleStrings, StringCatalog};
pub use language::{I18nError, Language};
pub use plural::{PluralCategory, PluralForms, PluralRule};
