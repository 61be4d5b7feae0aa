//! Puzzle tunables.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{HINT_BUDGET, MAX_QUOTE_LENGTH, QUOTE_URL, STORAGE_KEY};

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: usize,
        value: usize,
    },
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// Engine and front-end settings. Every field falls back to its default when
/// omitted from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    #[serde(default = "PuzzleConfig::default_hint_budget")]
    pub hint_budget: u8,
    #[serde(default = "PuzzleConfig::default_max_quote_length")]
    pub max_quote_length: usize,
    #[serde(default = "PuzzleConfig::default_quote_url")]
    pub quote_url: String,
    #[serde(default = "PuzzleConfig::default_storage_key")]
    pub storage_key: String,
}

impl PuzzleConfig {
    const fn default_hint_budget() -> u8 {
        HINT_BUDGET
    }

    const fn default_max_quote_length() -> usize {
        MAX_QUOTE_LENGTH
    }

    fn default_quote_url() -> String {
        QUOTE_URL.to_string()
    }

    fn default_storage_key() -> String {
        STORAGE_KEY.to_string()
    }

    /// Parse a JSON document, filling gaps with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hint_budget == 0 {
            return Err(ConfigError::MinViolation {
                field: "hint_budget",
                min: 1,
                value: 0,
            });
        }
        // two distinct letters is the smallest solvable quotation
        if self.max_quote_length < 2 {
            return Err(ConfigError::MinViolation {
                field: "max_quote_length",
                min: 2,
                value: self.max_quote_length,
            });
        }
        if self.quote_url.trim().is_empty() {
            return Err(ConfigError::Empty { field: "quote_url" });
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "storage_key",
            });
        }
        Ok(())
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            hint_budget: Self::default_hint_budget(),
            max_quote_length: Self::default_max_quote_length(),
            quote_url: Self::default_quote_url(),
            storage_key: Self::default_storage_key(),
        }
    }
}
