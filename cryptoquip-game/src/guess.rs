//! Player guess state and the pure reducer that transitions it.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::alphabet::Letter;
use crate::cipher::CipherKey;

/// Ciphertext letter to proposed plaintext letter.
///
/// Holds at most one proposal per ciphertext letter. Two ciphertext letters
/// may propose the same plaintext letter; nothing here forbids it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuessState(BTreeMap<Letter, Letter>);

impl GuessState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Proposal currently recorded for `cipher`.
    #[must_use]
    pub fn replacement(&self, cipher: Letter) -> Option<Letter> {
        self.0.get(&cipher).copied()
    }

    /// Plaintext letters used by at least one proposal.
    #[must_use]
    pub fn letters_in_use(&self) -> BTreeSet<Letter> {
        self.0.values().copied().collect()
    }

    /// `(cipher, plain)` proposals in ciphertext order.
    pub fn iter(&self) -> impl Iterator<Item = (Letter, Letter)> + '_ {
        self.0.iter().map(|(&cipher, &plain)| (cipher, plain))
    }

    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<Letter, Letter> {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply `action`, consuming the previous state.
    #[must_use]
    pub fn apply(self, action: Action<'_>) -> Self {
        reduce(self, action)
    }
}

impl FromIterator<(Letter, Letter)> for GuessState {
    fn from_iter<T: IntoIterator<Item = (Letter, Letter)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The four transitions of the guess store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Player proposal. Proposing the pair already recorded clears it.
    CreatePair { cipher: Letter, plain: Letter },
    /// Engine-supplied correct pair, written unconditionally.
    Hint { cipher: Letter, plain: Letter },
    /// Replace everything with the key's inverse.
    Solve { key: &'a CipherKey },
    /// Forget every proposal.
    Clear,
}

impl Action<'_> {
    /// Short stable label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CreatePair { .. } => "create_pair",
            Self::Hint { .. } => "hint",
            Self::Solve { .. } => "solve",
            Self::Clear => "clear",
        }
    }
}

/// Pure transition function: `(state, action) -> state`.
#[must_use]
pub fn reduce(mut state: GuessState, action: Action<'_>) -> GuessState {
    match action {
        Action::CreatePair { cipher, plain } => {
            if state.0.get(&cipher) == Some(&plain) {
                state.0.remove(&cipher);
            } else {
                state.0.insert(cipher, plain);
            }
            state
        }
        Action::Hint { cipher, plain } => {
            state.0.insert(cipher, plain);
            state
        }
        Action::Solve { key } => GuessState(key.inverse().clone()),
        Action::Clear => GuessState::default(),
    }
}
