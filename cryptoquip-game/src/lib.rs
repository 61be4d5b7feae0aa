//! Cryptoquip Puzzle Engine
//!
//! Platform-agnostic core logic for a daily substitution-cipher puzzle.
//! This crate provides cipher generation, the guess reducer, hints, win
//! detection and daily persistence without UI or network dependencies.

pub mod alphabet;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod daily;
pub mod guess;
pub mod hint;
pub mod quote;
pub mod session;
pub mod solve;

use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;

// Re-export commonly used types
pub use alphabet::{ALPHABET, Letter, NotALetter};
pub use cipher::{Cipher, CipherKey, GenerationError, KeyError, TokenizedQuip, generate};
pub use config::{ConfigError, PuzzleConfig};
pub use daily::{CacheError, DailyPuzzleCache, KeyValueStore, MemoryStore, PuzzleRecord};
pub use guess::{Action, GuessState, reduce};
pub use hint::{HintPair, select_hint, unsolved_pairs};
pub use quote::Quote;
pub use session::{DisplayToken, Outcome, Proposal, PuzzleSession, SessionError};
pub use solve::is_solved;

/// Failures while serving or installing the day's puzzle.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Puzzle generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Main engine: serves today's puzzle from the cache or installs a new one.
pub struct PuzzleEngine<S>
where
    S: KeyValueStore,
{
    config: PuzzleConfig,
    cache: DailyPuzzleCache<S>,
}

impl<S> PuzzleEngine<S>
where
    S: KeyValueStore,
{
    /// Create an engine persisting through `store`.
    pub fn new(config: PuzzleConfig, store: S) -> Self {
        let cache = DailyPuzzleCache::with_key(store, config.storage_key.clone());
        Self { config, cache }
    }

    pub const fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub const fn cache(&self) -> &DailyPuzzleCache<S> {
        &self.cache
    }

    /// Resume the puzzle already issued today, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load_today(&self, today: NaiveDate) -> Result<Option<PuzzleSession>, EngineError> {
        Ok(self
            .cache
            .load(today)?
            .map(|record| PuzzleSession::new(record, self.config.hint_budget)))
    }

    /// Encipher `quote`, persist it as today's puzzle and start a session.
    ///
    /// Nothing is saved when generation fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the quotation cannot be enciphered or the record
    /// cannot be saved.
    pub fn generate<R: Rng>(
        &self,
        quote: &Quote,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<PuzzleSession, EngineError> {
        let cipher = generate(&quote.content, rng)?;
        let record = PuzzleRecord::new(cipher, quote.attribution(), today);
        self.cache.save(&record)?;
        log::info!("installed puzzle for {today} ({} letters)", record.key.len());
        Ok(PuzzleSession::new(record, self.config.hint_budget))
    }

    /// Drop any stored puzzle so the next start generates a fresh one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn discard(&self) -> Result<(), EngineError> {
        self.cache.clear().map_err(EngineError::from)
    }
}
