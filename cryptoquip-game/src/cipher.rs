//! Cipher generation: derangement keys and tokenized ciphertext.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::alphabet::Letter;
use crate::constants::{DERANGEMENT_ATTEMPTS, LOG_CIPHER};

/// Reasons a quotation cannot become a puzzle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("quotation is empty")]
    EmptyQuote,
    #[error("quotation contains no letters to encipher")]
    NoLetters,
    #[error("quotation only uses the letter '{letter}', which cannot be enciphered")]
    DegenerateLetterSet { letter: Letter },
}

/// Violations of the cipher key invariants.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("letter '{0}' enciphers as itself")]
    FixedPoint(Letter),
    #[error("ciphertext letter '{0}' is shared by more than one plaintext letter")]
    NotInjective(Letter),
}

/// Plaintext letter to ciphertext letter substitution.
///
/// Always injective and free of fixed points; both are checked on
/// construction, including when a key is deserialized from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Letter, Letter>", into = "BTreeMap<Letter, Letter>")]
pub struct CipherKey {
    forward: BTreeMap<Letter, Letter>,
    inverse: BTreeMap<Letter, Letter>,
}

impl CipherKey {
    /// Build a key from `(plaintext, ciphertext)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if a letter maps to itself or two plaintext
    /// letters share a ciphertext letter.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Letter, Letter)>) -> Result<Self, KeyError> {
        let mut forward = BTreeMap::new();
        let mut inverse = BTreeMap::new();
        for (plain, cipher) in pairs {
            if plain == cipher {
                return Err(KeyError::FixedPoint(plain));
            }
            if let Some(previous) = forward.insert(plain, cipher) {
                inverse.remove(&previous);
            }
            if inverse.insert(cipher, plain).is_some_and(|other| other != plain) {
                return Err(KeyError::NotInjective(cipher));
            }
        }
        Ok(Self { forward, inverse })
    }

    fn from_derangement(letters: &[Letter], images: &[Letter]) -> Self {
        debug_assert!(letters.iter().zip(images).all(|(plain, cipher)| plain != cipher));
        let forward: BTreeMap<Letter, Letter> =
            letters.iter().copied().zip(images.iter().copied()).collect();
        let inverse = forward.iter().map(|(&plain, &cipher)| (cipher, plain)).collect();
        Self { forward, inverse }
    }

    /// Ciphertext letter for a plaintext letter.
    #[must_use]
    pub fn cipher_for(&self, plain: Letter) -> Option<Letter> {
        self.forward.get(&plain).copied()
    }

    /// Plaintext letter hidden behind a ciphertext letter.
    #[must_use]
    pub fn plain_for(&self, cipher: Letter) -> Option<Letter> {
        self.inverse.get(&cipher).copied()
    }

    /// `(plaintext, ciphertext)` pairs in plaintext order.
    pub fn pairs(&self) -> impl Iterator<Item = (Letter, Letter)> + '_ {
        self.forward.iter().map(|(&plain, &cipher)| (plain, cipher))
    }

    /// Ciphertext to plaintext mapping.
    #[must_use]
    pub const fn inverse(&self) -> &BTreeMap<Letter, Letter> {
        &self.inverse
    }

    /// Whether `cipher` is one of the key's ciphertext letters.
    #[must_use]
    pub fn covers_cipher(&self, cipher: Letter) -> bool {
        self.inverse.contains_key(&cipher)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl TryFrom<BTreeMap<Letter, Letter>> for CipherKey {
    type Error = KeyError;

    fn try_from(value: BTreeMap<Letter, Letter>) -> Result<Self, Self::Error> {
        Self::from_pairs(value)
    }
}

impl From<CipherKey> for BTreeMap<Letter, Letter> {
    fn from(value: CipherKey) -> Self {
        value.forward
    }
}

/// Quotation split into words of single-character ciphertext tokens.
///
/// Letters keep the case of the source text; punctuation, digits and
/// non-Latin characters pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenizedQuip(Vec<Vec<char>>);

impl TokenizedQuip {
    #[must_use]
    pub const fn from_words(words: Vec<Vec<char>>) -> Self {
        Self(words)
    }

    #[must_use]
    pub fn words(&self) -> &[Vec<char>] {
        &self.0
    }

    /// Every letter token, in reading order.
    pub fn letters(&self) -> impl Iterator<Item = Letter> + '_ {
        self.0
            .iter()
            .flatten()
            .filter_map(|&token| Letter::new(token).ok())
    }

    /// Distinct ciphertext letters appearing in the quip.
    #[must_use]
    pub fn cipher_letters(&self) -> BTreeSet<Letter> {
        self.letters().collect()
    }

    /// Substitute every ciphertext letter through `key`, joining words with
    /// single spaces. Letters the key does not cover are left as they are.
    #[must_use]
    pub fn decode(&self, key: &CipherKey) -> String {
        self.0
            .iter()
            .map(|word| {
                word.iter()
                    .map(|&token| match Letter::new(token) {
                        Ok(cipher) => key
                            .plain_for(cipher)
                            .map_or(token, |plain| plain.with_case_of(token)),
                        Err(_) => token,
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A freshly generated puzzle body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cipher {
    pub quip: TokenizedQuip,
    pub key: CipherKey,
}

/// Encipher `plaintext` with a random fixed-point-free substitution over the
/// letters it uses.
///
/// # Errors
///
/// Fails when the text has fewer than two distinct letters, since no letter
/// permutation without fixed points exists for it.
pub fn generate<R: Rng>(plaintext: &str, rng: &mut R) -> Result<Cipher, GenerationError> {
    if plaintext.trim().is_empty() {
        return Err(GenerationError::EmptyQuote);
    }
    let letters: Vec<Letter> = plaintext
        .chars()
        .filter_map(|c| Letter::new(c).ok())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    match letters.as_slice() {
        [] => return Err(GenerationError::NoLetters),
        [letter] => return Err(GenerationError::DegenerateLetterSet { letter: *letter }),
        _ => {}
    }

    let images = derange(&letters, rng);
    let key = CipherKey::from_derangement(&letters, &images);
    log::debug!(target: LOG_CIPHER, "generated key over {} letters", key.len());

    let quip = TokenizedQuip::from_words(
        plaintext
            .split_whitespace()
            .map(|word| word.chars().map(|c| encipher_char(&key, c)).collect())
            .collect(),
    );
    Ok(Cipher { quip, key })
}

fn encipher_char(key: &CipherKey, c: char) -> char {
    Letter::new(c)
        .ok()
        .and_then(|plain| key.cipher_for(plain))
        .map_or(c, |cipher| cipher.with_case_of(c))
}

/// Random permutation of `letters` with no position left in place.
///
/// Rejection-samples uniform shuffles and, if unlucky, falls back to
/// Sattolo's algorithm, whose single cycle never has a fixed point.
fn derange<R: Rng>(letters: &[Letter], rng: &mut R) -> Vec<Letter> {
    let mut images = letters.to_vec();
    for _ in 0..DERANGEMENT_ATTEMPTS {
        images.shuffle(rng);
        if letters.iter().zip(&images).all(|(plain, cipher)| plain != cipher) {
            return images;
        }
    }
    log::debug!(target: LOG_CIPHER, "shuffle budget spent; using cyclic permutation");
    images.copy_from_slice(letters);
    for i in (1..images.len()).rev() {
        let j = rng.gen_range(0..i);
        images.swap(i, j);
    }
    images
}
