//! The 26-letter Latin alphabet the cipher operates over.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lowercase Latin alphabet in order.
pub const ALPHABET: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Raised when a character is not one of the 26 Latin letters.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("'{0}' is not a Latin letter")]
pub struct NotALetter(pub char);

/// A single lowercase Latin letter.
///
/// Uppercase input folds to lowercase; the cipher is keyed purely on the
/// lowercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(u8);

impl Letter {
    /// Build a letter from any ASCII alphabetic character.
    ///
    /// # Errors
    ///
    /// Returns [`NotALetter`] for anything outside `a-z`/`A-Z`.
    pub const fn new(c: char) -> Result<Self, NotALetter> {
        if c.is_ascii_alphabetic() {
            Ok(Self((c as u8).to_ascii_lowercase()))
        } else {
            Err(NotALetter(c))
        }
    }

    /// The lowercase character.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0 as char
    }

    /// Zero-based position in [`ALPHABET`].
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - b'a') as usize
    }

    /// Render this letter in the case of `template`.
    #[must_use]
    pub const fn with_case_of(self, template: char) -> char {
        if template.is_ascii_uppercase() {
            self.as_char().to_ascii_uppercase()
        } else {
            self.as_char()
        }
    }

    /// Every letter of the alphabet in order.
    pub fn all() -> impl Iterator<Item = Self> {
        ALPHABET.iter().map(|&c| Self(c as u8))
    }
}

impl TryFrom<char> for Letter {
    type Error = NotALetter;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Letter> for char {
    fn from(value: Letter) -> Self {
        value.as_char()
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
