//! Character classes for single-character terminals.
//!
//! The predefined classes delegate to the standard `char` classification
//! methods; nothing here attempts Unicode segmentation beyond that.

use std::fmt;

/// A predicate over a single character.
#[derive(Clone, Copy)]
pub enum CharClass {
    /// ASCII digit `0-9`
    Digit,
    /// Any alphabetic character
    Letter,
    /// Any whitespace character
    Whitespace,
    /// Any alphanumeric character
    Alphanumeric,
    /// Any character at all
    Any,
    /// Inclusive character range
    Range(char, char),
    /// User-supplied predicate, identified by name
    Custom {
        name: &'static str,
        predicate: fn(char) -> bool,
    },
}

impl CharClass {
    #[must_use]
    pub fn matches(&self, c: char) -> bool {
        match self {
            Self::Digit => c.is_ascii_digit(),
            Self::Letter => c.is_alphabetic(),
            Self::Whitespace => c.is_whitespace(),
            Self::Alphanumeric => c.is_alphanumeric(),
            Self::Any => true,
            Self::Range(lo, hi) => (*lo..=*hi).contains(&c),
            Self::Custom { predicate, .. } => predicate(c),
        }
    }

    /// PEG-style definition, e.g. `[0-9]`.
    #[must_use]
    pub fn definition(&self) -> String {
        match self {
            Self::Digit => "[0-9]".to_string(),
            Self::Letter => "[:alpha:]".to_string(),
            Self::Whitespace => "[:space:]".to_string(),
            Self::Alphanumeric => "[:alnum:]".to_string(),
            Self::Any => ".".to_string(),
            Self::Range(lo, hi) => format!("[{lo}-{hi}]"),
            Self::Custom { name, .. } => format!("<{name}>"),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Digit => "digit",
            Self::Letter => "letter",
            Self::Whitespace => "whitespace",
            Self::Alphanumeric => "alphanumeric",
            Self::Any => "any",
            Self::Range(..) => "range",
            Self::Custom { name, .. } => *name,
        }
    }
}

// Custom classes compare by name: function pointer identity is not stable
// across codegen units.
impl PartialEq for CharClass {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Range(a_lo, a_hi), Self::Range(b_lo, b_hi)) => a_lo == b_lo && a_hi == b_hi,
            (Self::Custom { name: a, .. }, Self::Custom { name: b, .. }) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for CharClass {}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(lo, hi) => f.debug_tuple("Range").field(lo).field(hi).finish(),
            Self::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
            Self::Digit => f.write_str("Digit"),
            Self::Letter => f.write_str("Letter"),
            Self::Whitespace => f.write_str("Whitespace"),
            Self::Alphanumeric => f.write_str("Alphanumeric"),
            Self::Any => f.write_str("Any"),
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.definition())
    }
}
