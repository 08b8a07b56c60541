#![forbid(unsafe_code)]

//! Appearance primitives for Focus Forest.
//!
//! This crate provides:
//! - [`ThemeColor`] for the user's accent color, its hover variant and a
//!   contrasting text color
//! - [`FontSize`] with the fixed `small`/`medium`/`large` size mapping

pub mod color;
pub mod font;

pub use color::{ColorParseError, HOVER_ALPHA, THEME_SWATCHES, ThemeColor};
pub use font::{FontSize, UnknownFontSize};
