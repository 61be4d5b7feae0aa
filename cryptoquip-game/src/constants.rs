//! Centralized tuning constants for Cryptoquip puzzle logic.
//!
//! Defaults for `PuzzleConfig` live here so the engine and the CLI agree on
//! them without reading external assets.

/// Hints available per puzzle before the control is disabled.
pub const HINT_BUDGET: u8 = 3;

/// Character shown in place of a ciphertext letter with no proposal.
pub const PLACEHOLDER: char = '*';

/// Well-known storage key holding the serialized daily puzzle.
pub const STORAGE_KEY: &str = "cryptoquip.puzzle";

/// Longest quotation requested from the quote service (fits one screen row).
pub const MAX_QUOTE_LENGTH: usize = 38;

/// Remote quote service returning `{ content, author }`.
pub const QUOTE_URL: &str = "https://api.quotable.io/random";

/// Rejected shuffles tolerated before falling back to a cyclic permutation.
pub(crate) const DERANGEMENT_ATTEMPTS: usize = 32;

// Logging targets ----------------------------------------------------------
pub(crate) const LOG_CIPHER: &str = "cryptoquip::cipher";
pub(crate) const LOG_SESSION: &str = "cryptoquip::session";
pub(crate) const LOG_CACHE: &str = "cryptoquip::cache";
