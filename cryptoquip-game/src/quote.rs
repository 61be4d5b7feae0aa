//! Source quotations as delivered by a quote service.
use serde::{Deserialize, Serialize};

/// A quotation and its attribution: `{ "content": ..., "author": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub content: String,
    #[serde(default)]
    pub author: String,
}

impl Quote {
    #[must_use]
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: author.into(),
        }
    }

    /// Attribution to display, falling back to "Unknown".
    #[must_use]
    pub fn attribution(&self) -> &str {
        let author = self.author.trim();
        if author.is_empty() { "Unknown" } else { author }
    }
}
