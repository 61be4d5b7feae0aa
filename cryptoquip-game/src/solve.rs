//! Win detection.
use crate::cipher::CipherKey;
use crate::guess::GuessState;

/// Whether `guesses` recovers the plaintext behind `key`.
///
/// Order-independent: every ciphertext letter of the key must carry its own
/// plaintext letter and nothing else may be proposed. A board holding the
/// right plaintext letters on the wrong ciphertext letters is not solved.
#[must_use]
pub fn is_solved(guesses: &GuessState, key: &CipherKey) -> bool {
    guesses.len() == key.len()
        && key
            .pairs()
            .all(|(plain, cipher)| guesses.replacement(cipher) == Some(plain))
}
