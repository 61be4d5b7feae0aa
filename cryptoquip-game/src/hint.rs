//! Hint selection over the unsolved key pairs.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::alphabet::Letter;
use crate::cipher::CipherKey;
use crate::guess::{Action, GuessState};

/// A correct ciphertext/plaintext pairing handed to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintPair {
    pub cipher: Letter,
    pub plain: Letter,
}

impl HintPair {
    /// Reducer action installing this pair.
    #[must_use]
    pub const fn action(self) -> Action<'static> {
        Action::Hint {
            cipher: self.cipher,
            plain: self.plain,
        }
    }
}

/// Key pairs the player has not yet proposed correctly.
#[must_use]
pub fn unsolved_pairs(key: &CipherKey, guesses: &GuessState) -> Vec<HintPair> {
    key.pairs()
        .filter(|&(plain, cipher)| guesses.replacement(cipher) != Some(plain))
        .map(|(plain, cipher)| HintPair { cipher, plain })
        .collect()
}

/// Pick a key pair uniformly among those not already correct in `guesses`.
///
/// Returns `None` once every pair is solved, so callers never spin on a
/// finished board.
pub fn select_hint<R: Rng>(key: &CipherKey, guesses: &GuessState, rng: &mut R) -> Option<HintPair> {
    unsolved_pairs(key, guesses).choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn letter(c: char) -> Letter {
        Letter::new(c).unwrap()
    }

    fn cat_key() -> CipherKey {
        CipherKey::from_pairs([
            (letter('c'), letter('t')),
            (letter('a'), letter('c')),
            (letter('t'), letter('a')),
        ])
        .unwrap()
    }

    #[test]
    fn skips_pairs_already_solved() {
        let key = cat_key();
        let guesses = GuessState::new()
            .apply(Action::CreatePair {
                cipher: letter('t'),
                plain: letter('c'),
            })
            .apply(Action::CreatePair {
                cipher: letter('c'),
                plain: letter('a'),
            });
        for seed in 0..25 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let hint = select_hint(&key, &guesses, &mut rng).unwrap();
            assert_eq!(
                hint,
                HintPair {
                    cipher: letter('a'),
                    plain: letter('t')
                }
            );
        }
    }

    #[test]
    fn wrong_guesses_still_count_as_unsolved() {
        let key = cat_key();
        let guesses = GuessState::new().apply(Action::CreatePair {
            cipher: letter('t'),
            plain: letter('a'),
        });
        assert_eq!(unsolved_pairs(&key, &guesses).len(), 3);
    }

    #[test]
    fn returns_none_when_everything_is_solved() {
        let key = cat_key();
        let solved = GuessState::new().apply(Action::Solve { key: &key });
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        assert_eq!(select_hint(&key, &solved, &mut rng), None);
    }

    #[test]
    fn single_pair_key_short_circuits() {
        let key = CipherKey::from_pairs([(letter('a'), letter('b'))]).unwrap();
        let hint = HintPair {
            cipher: letter('b'),
            plain: letter('a'),
        };
        let guesses = GuessState::new().apply(hint.action());
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert!(select_hint(&key, &guesses, &mut rng).is_none());
    }
}
