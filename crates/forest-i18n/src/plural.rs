#![forbid(unsafe_code)]

//! Plural selection for counted phrases such as "3 tasks".
//!
//! The bundled languages fall into three CLDR families, which is all the
//! forest headline needs: English-like (`one` only for 1), French (`one` for
//! 0 and 1) and the East Asian languages, which never inflect for number.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    One,
    Other,
}

impl PluralCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a language picks a category for a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
    /// en, de, es
    SingularOne,
    /// fr
    SingularZeroOne,
    /// zh, ja, ko
    Invariant,
}

impl PluralRule {
    #[must_use]
    pub const fn category(self, count: u64) -> PluralCategory {
        let singular = match self {
            Self::SingularOne => count == 1,
            Self::SingularZeroOne => count <= 1,
            Self::Invariant => false,
        };
        if singular {
            PluralCategory::One
        } else {
            PluralCategory::Other
        }
    }
}

/// The two templates of a counted phrase; `{count}` is substituted later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralForms {
    one: String,
    other: String,
}

impl PluralForms {
    #[must_use]
    pub fn new(one: impl Into<String>, other: impl Into<String>) -> Self {
        Self {
            one: one.into(),
            other: other.into(),
        }
    }

    /// Same template for every count.
    #[must_use]
    pub fn invariant(form: impl Into<String>) -> Self {
        let other = form.into();
        Self {
            one: other.clone(),
            other,
        }
    }

    #[must_use]
    pub fn form(&self, category: PluralCategory) -> &str {
        match category {
            PluralCategory::One => &self.one,
            PluralCategory::Other => &self.other,
        }
    }

    /// The form used when no count is known.
    #[must_use]
    pub fn other(&self) -> &str {
        &self.other
    }
}
