use std::collections::BTreeSet;

use cryptoquip_game::{Action, GuessState, Letter, generate, is_solved, select_hint};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const QUOTES: [&str; 6] = [
    "The only way out is through.",
    "Do or do not. There is no try.",
    "Be yourself; everyone else is already taken.",
    "It's not a bug -- it's a feature!",
    "Zebras quickly jump over 12 foxes",
    "The quick brown fox jumps over the lazy dog",
];

#[test]
fn keys_are_injective_derangements() {
    for (i, quote) in QUOTES.iter().enumerate() {
        for seed in 0..64 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed * 31 + i as u64);
            let cipher = generate(quote, &mut rng).unwrap();
            let mut images = BTreeSet::new();
            for (plain, enciphered) in cipher.key.pairs() {
                assert_ne!(plain, enciphered, "fixed point in {quote:?} seed {seed}");
                assert!(images.insert(enciphered), "shared image in {quote:?} seed {seed}");
            }
            let expected: BTreeSet<Letter> =
                quote.chars().filter_map(|c| Letter::new(c).ok()).collect();
            let domain: BTreeSet<Letter> = cipher.key.pairs().map(|(plain, _)| plain).collect();
            assert_eq!(domain, expected);
        }
    }
}

#[test]
fn inverse_key_reconstructs_plaintext() {
    for quote in QUOTES {
        for seed in 0..32 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let cipher = generate(quote, &mut rng).unwrap();
            let normalized = quote.split_whitespace().collect::<Vec<_>>().join(" ");
            assert_eq!(cipher.quip.decode(&cipher.key), normalized);
        }
    }
}

#[test]
fn pangram_uses_whole_alphabet() {
    let mut rng = ChaCha20Rng::seed_from_u64(26);
    let cipher = generate(QUOTES[5], &mut rng).unwrap();
    assert_eq!(cipher.key.len(), 26);
    assert_eq!(cipher.quip.cipher_letters().len(), 26);
}

#[test]
fn same_seed_same_puzzle() {
    let a = generate(QUOTES[0], &mut ChaCha20Rng::seed_from_u64(7)).unwrap();
    let b = generate(QUOTES[0], &mut ChaCha20Rng::seed_from_u64(7)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn repeated_hints_never_repeat_and_terminate() {
    for seed in 0..16 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let cipher = generate(QUOTES[2], &mut rng).unwrap();
        let mut guesses = GuessState::new();
        let mut issued = BTreeSet::new();
        while let Some(hint) = select_hint(&cipher.key, &guesses, &mut rng) {
            assert_ne!(guesses.replacement(hint.cipher), Some(hint.plain));
            assert!(issued.insert(hint.cipher));
            guesses = guesses.apply(hint.action());
            assert!(issued.len() <= cipher.key.len());
        }
        assert_eq!(issued.len(), cipher.key.len());
        assert!(is_solved(&guesses, &cipher.key));
    }
}

#[test]
fn solve_and_clear_are_absolute() {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let cipher = generate(QUOTES[1], &mut rng).unwrap();
    let letters: Vec<Letter> = cipher.quip.cipher_letters().into_iter().collect();
    let mut guesses = GuessState::new();
    for (i, &cipher_letter) in letters.iter().enumerate() {
        let plain = letters[(i + 3) % letters.len()];
        guesses = guesses.apply(Action::CreatePair {
            cipher: cipher_letter,
            plain,
        });
    }
    let solved = guesses.clone().apply(Action::Solve { key: &cipher.key });
    assert_eq!(solved.as_map(), cipher.key.inverse());
    assert!(guesses.apply(Action::Clear).is_empty());
}
