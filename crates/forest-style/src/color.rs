#![forbid(unsafe_code)]

//! Theme colors: hex parsing, formatting and derived variants.

use core::fmt;
use core::str::FromStr;

/// Alpha byte appended to the primary color for its hover variant.
pub const HOVER_ALPHA: u8 = 0xdd;

/// An opaque sRGB theme color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemeColor {
    r: u8,
    g: u8,
    b: u8,
}

/// Swatches offered by the appearance settings, default first.
pub const THEME_SWATCHES: [ThemeColor; 5] = [
    ThemeColor::rgb(0x22, 0xc5, 0x5e),
    ThemeColor::rgb(0x3b, 0x82, 0xf6),
    ThemeColor::rgb(0x8b, 0x5c, 0xf6),
    ThemeColor::rgb(0xec, 0x48, 0x99),
    ThemeColor::rgb(0xf9, 0x73, 0x16),
];

/// Why a string could not be read as a theme color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color {0:?} must start with '#'")]
    MissingHash(String),
    #[error("color {0:?} must have 3 or 6 hex digits")]
    BadLength(String),
    #[error("color {0:?} contains a non-hex digit")]
    BadDigit(String),
}

impl ThemeColor {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn r(self) -> u8 {
        self.r
    }

    #[must_use]
    pub const fn g(self) -> u8 {
        self.g
    }

    #[must_use]
    pub const fn b(self) -> u8 {
        self.b
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand, case-insensitively.
    pub fn parse_hex(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        let Some(digits) = trimmed.strip_prefix('#') else {
            return Err(ColorParseError::MissingHash(input.to_owned()));
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(input.to_owned()));
        }
        let bytes = digits.as_bytes();
        let digit = |i: usize| hex_value(bytes[i]);
        match bytes.len() {
            3 => Ok(Self::rgb(digit(0) * 0x11, digit(1) * 0x11, digit(2) * 0x11)),
            6 => Ok(Self::rgb(
                digit(0) << 4 | digit(1),
                digit(2) << 4 | digit(3),
                digit(4) << 4 | digit(5),
            )),
            _ => Err(ColorParseError::BadLength(input.to_owned())),
        }
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The hover variant: the primary color with [`HOVER_ALPHA`] appended
    /// (`#22c55e` becomes `#22c55edd`).
    #[must_use]
    pub fn hover_hex(self) -> String {
        format!("{}{HOVER_ALPHA:02x}", self.to_hex())
    }

    /// Perceived brightness on a 0-255 scale (Rec. 709 weights).
    #[must_use]
    pub fn luma(self) -> u8 {
        weighted_luma(self.r, self.g, self.b)
    }

    /// Black or white, whichever reads better on top of this color.
    #[must_use]
    pub fn contrasting_text(self) -> Self {
        if self.luma() >= 128 {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }
}

impl Default for ThemeColor {
    fn default() -> Self {
        THEME_SWATCHES[0]
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ThemeColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ThemeColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ThemeColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[inline]
fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

#[inline]
fn weighted_luma(r: u8, g: u8, b: u8) -> u8 {
    let luma = u32::from(r) * 2126 + u32::from(g) * 7152 + u32::from(b) * 722;
    (luma / 10000) as u8
}
