//! Owned play session binding a puzzle to the player's guess state.
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::alphabet::Letter;
use crate::cipher::CipherKey;
use crate::constants::{LOG_SESSION, PLACEHOLDER};
use crate::daily::PuzzleRecord;
use crate::guess::{Action, GuessState, reduce};
use crate::hint::{HintPair, select_hint};
use crate::solve::is_solved;

/// Where the session stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Playing,
    /// The player recovered the whole key, possibly with hints.
    Solved,
    /// The player gave up and the key was revealed.
    Revealed,
}

impl Outcome {
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Player actions the session refuses. None of these change any state.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("'{0}' does not appear in the puzzle")]
    NotInPuzzle(Letter),
    #[error("select a puzzle letter first")]
    NoSelection,
    #[error("a letter cannot replace itself ('{0}')")]
    SelfSubstitution(Letter),
    #[error("the puzzle is finished; reset to play again")]
    Finished,
    #[error("no hints remaining")]
    HintsExhausted,
    #[error("every letter is already solved")]
    NothingToHint,
}

/// Result of an accepted proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proposal {
    /// The proposal repeated the recorded pair and cleared it.
    pub toggled_off: bool,
    /// The proposal completed the puzzle.
    pub solved: bool,
}

/// One ciphertext token with the player's current reading of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayToken {
    pub cipher: char,
    /// Proposed plaintext in the token's case; `None` for unguessed letters
    /// and for punctuation.
    pub replacement: Option<char>,
}

impl DisplayToken {
    #[must_use]
    pub const fn is_letter(&self) -> bool {
        self.cipher.is_ascii_alphabetic()
    }

    /// Character to show in the guess row.
    #[must_use]
    pub const fn shown(&self) -> char {
        match self.replacement {
            Some(c) => c,
            None if self.is_letter() => PLACEHOLDER,
            None => self.cipher,
        }
    }
}

/// A puzzle in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSession {
    puzzle: PuzzleRecord,
    guesses: GuessState,
    selected: Option<Letter>,
    hints_used: u8,
    hint_budget: u8,
    outcome: Outcome,
}

impl PuzzleSession {
    /// Start an empty board for `puzzle`.
    #[must_use]
    pub fn new(puzzle: PuzzleRecord, hint_budget: u8) -> Self {
        Self {
            puzzle,
            guesses: GuessState::new(),
            selected: None,
            hints_used: 0,
            hint_budget,
            outcome: Outcome::Playing,
        }
    }

    fn dispatch(guesses: &mut GuessState, action: Action<'_>) {
        log::trace!(target: LOG_SESSION, "dispatch {}", action.kind());
        let prior = std::mem::take(guesses);
        *guesses = reduce(prior, action);
    }

    fn ensure_in_puzzle(&self, cipher: Letter) -> Result<(), SessionError> {
        if self.puzzle.key.covers_cipher(cipher) {
            Ok(())
        } else {
            Err(SessionError::NotInPuzzle(cipher))
        }
    }

    /// Run the solve check against the committed guess state.
    fn settle(&mut self) -> bool {
        if !is_solved(&self.guesses, &self.puzzle.key) {
            return false;
        }
        self.outcome = Outcome::Solved;
        self.hints_used = self.hint_budget;
        self.selected = None;
        log::info!(target: LOG_SESSION, "puzzle solved");
        true
    }

    /// Toggle the selected ciphertext letter, returning the new selection.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotInPuzzle`] for letters absent from the quip.
    pub fn select(&mut self, cipher: Letter) -> Result<Option<Letter>, SessionError> {
        self.ensure_in_puzzle(cipher)?;
        self.selected = if self.selected == Some(cipher) {
            None
        } else {
            Some(cipher)
        };
        Ok(self.selected)
    }

    /// Propose `plain` for the selected ciphertext letter.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoSelection`] when nothing is selected, or any
    /// error of [`Self::propose_pair`].
    pub fn propose(&mut self, plain: Letter) -> Result<Proposal, SessionError> {
        let cipher = self.selected.ok_or(SessionError::NoSelection)?;
        self.propose_pair(cipher, plain)
    }

    /// Propose `plain` for `cipher`. Repeating the recorded pair clears it.
    ///
    /// # Errors
    ///
    /// Rejects proposals on a finished board, for letters outside the
    /// puzzle, and a letter proposed as its own replacement.
    pub fn propose_pair(&mut self, cipher: Letter, plain: Letter) -> Result<Proposal, SessionError> {
        if self.outcome.is_finished() {
            return Err(SessionError::Finished);
        }
        self.ensure_in_puzzle(cipher)?;
        if cipher == plain {
            return Err(SessionError::SelfSubstitution(cipher));
        }
        let toggled_off = self.guesses.replacement(cipher) == Some(plain);
        Self::dispatch(&mut self.guesses, Action::CreatePair { cipher, plain });
        let solved = self.settle();
        Ok(Proposal {
            toggled_off,
            solved,
        })
    }

    /// Reveal one unsolved pair and spend a hint.
    ///
    /// # Errors
    ///
    /// Rejects hints on a finished board, once the budget is spent, and when
    /// no unsolved pair remains.
    pub fn hint<R: Rng>(&mut self, rng: &mut R) -> Result<HintPair, SessionError> {
        if self.outcome.is_finished() {
            return Err(SessionError::Finished);
        }
        if self.hints_used >= self.hint_budget {
            return Err(SessionError::HintsExhausted);
        }
        let pair = select_hint(&self.puzzle.key, &self.guesses, rng)
            .ok_or(SessionError::NothingToHint)?;
        Self::dispatch(&mut self.guesses, pair.action());
        self.hints_used += 1;
        log::debug!(
            target: LOG_SESSION,
            "hint {}/{}: {} is {}",
            self.hints_used,
            self.hint_budget,
            pair.cipher,
            pair.plain
        );
        self.settle();
        Ok(pair)
    }

    /// Give up: install the full inverse key and exhaust the hint budget.
    pub fn reveal(&mut self) {
        Self::dispatch(
            &mut self.guesses,
            Action::Solve {
                key: &self.puzzle.key,
            },
        );
        self.hints_used = self.hint_budget;
        self.selected = None;
        if self.outcome == Outcome::Playing {
            self.outcome = Outcome::Revealed;
            log::info!(target: LOG_SESSION, "puzzle revealed");
        }
    }

    /// Clear every proposal and restore the hint budget.
    pub fn reset(&mut self) {
        Self::dispatch(&mut self.guesses, Action::Clear);
        self.hints_used = 0;
        self.selected = None;
        self.outcome = Outcome::Playing;
    }

    /// The quip as the player currently reads it.
    #[must_use]
    pub fn display(&self) -> Vec<Vec<DisplayToken>> {
        self.puzzle
            .quip
            .words()
            .iter()
            .map(|word| {
                word.iter()
                    .map(|&cipher| DisplayToken {
                        cipher,
                        replacement: Letter::new(cipher)
                            .ok()
                            .and_then(|letter| self.guesses.replacement(letter))
                            .map(|plain| plain.with_case_of(cipher)),
                    })
                    .collect()
            })
            .collect()
    }

    /// Plaintext letters already proposed somewhere on the board.
    #[must_use]
    pub fn letters_in_use(&self) -> BTreeSet<Letter> {
        self.guesses.letters_in_use()
    }

    #[must_use]
    pub const fn hints_remaining(&self) -> u8 {
        self.hint_budget.saturating_sub(self.hints_used)
    }

    #[must_use]
    pub const fn hint_budget(&self) -> u8 {
        self.hint_budget
    }

    #[must_use]
    pub const fn hints_used(&self) -> u8 {
        self.hints_used
    }

    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub const fn selected(&self) -> Option<Letter> {
        self.selected
    }

    #[must_use]
    pub const fn guesses(&self) -> &GuessState {
        &self.guesses
    }

    #[must_use]
    pub const fn key(&self) -> &CipherKey {
        &self.puzzle.key
    }

    #[must_use]
    pub const fn record(&self) -> &PuzzleRecord {
        &self.puzzle
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.puzzle.author
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.puzzle.date
    }
}
