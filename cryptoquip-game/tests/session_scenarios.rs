use chrono::NaiveDate;
use cryptoquip_game::{
    KeyValueStore, Letter, MemoryStore, Outcome, PuzzleConfig, PuzzleEngine, Quote, SessionError,
    constants::STORAGE_KEY,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn engine() -> PuzzleEngine<MemoryStore> {
    PuzzleEngine::new(PuzzleConfig::default(), MemoryStore::new())
}

#[test]
fn cat_is_won_by_guessing_every_pair() {
    let engine = engine();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let mut session = engine
        .generate(&Quote::new("cat", "Anon"), day(2026, 10, 16), &mut rng)
        .unwrap();

    let pairs: Vec<(Letter, Letter)> = session.key().pairs().collect();
    assert_eq!(pairs.len(), 3);
    for &(plain, cipher) in &pairs {
        assert_eq!(
            session.propose_pair(cipher, cipher),
            Err(SessionError::SelfSubstitution(cipher))
        );
        assert_ne!(plain, cipher);
    }

    let mut last = None;
    for (plain, cipher) in pairs {
        session.select(cipher).unwrap();
        last = Some(session.propose(plain).unwrap());
    }
    assert!(last.unwrap().solved);
    assert_eq!(session.outcome(), Outcome::Solved);
    assert_eq!(session.hints_remaining(), 0);
    let shown: String = session.display()[0].iter().map(|t| t.shown()).collect();
    assert_eq!(shown, "cat");
}

#[test]
fn giving_up_reveals_everything_and_spends_hints() {
    let engine = engine();
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    let mut session = engine
        .generate(
            &Quote::new("Knowledge is power.", "Francis Bacon"),
            day(2026, 10, 16),
            &mut rng,
        )
        .unwrap();
    let first = session.key().pairs().next().unwrap();
    session.propose_pair(first.1, Letter::new('z').unwrap()).unwrap();

    session.reveal();
    assert_eq!(session.outcome(), Outcome::Revealed);
    assert_eq!(session.hints_used(), 3);
    assert_eq!(session.guesses().as_map(), session.key().inverse());
    let shown: String = session
        .display()
        .iter()
        .map(|word| word.iter().map(|t| t.shown()).collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(shown, "Knowledge is power.");
}

#[test]
fn fourth_hint_is_rejected_without_side_effects() {
    let engine = engine();
    let mut rng = ChaCha20Rng::seed_from_u64(21);
    let mut session = engine
        .generate(
            &Quote::new("Imagination is more important than knowledge.", "Einstein"),
            day(2026, 10, 16),
            &mut rng,
        )
        .unwrap();

    let mut hinted = Vec::new();
    for used in 1..=3 {
        let pair = session.hint(&mut rng).unwrap();
        assert!(!hinted.contains(&pair));
        hinted.push(pair);
        assert_eq!(session.hints_used(), used);
    }
    assert_eq!(session.hints_remaining(), 0);

    let before = session.guesses().clone();
    assert_eq!(session.hint(&mut rng), Err(SessionError::HintsExhausted));
    assert_eq!(session.guesses(), &before);
    assert_eq!(session.hints_used(), 3);
    assert_eq!(session.outcome(), Outcome::Playing);

    session.reset();
    assert_eq!(session.hints_remaining(), 3);
    assert!(session.guesses().is_empty());
}

#[test]
fn tiny_puzzle_is_solved_by_hints_before_budget_runs_out() {
    let engine = engine();
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let mut session = engine
        .generate(&Quote::new("No, on!", "Palindrome"), day(2026, 10, 16), &mut rng)
        .unwrap();
    session.hint(&mut rng).unwrap();
    assert_eq!(session.outcome(), Outcome::Playing);
    session.hint(&mut rng).unwrap();
    assert_eq!(session.outcome(), Outcome::Solved);
    assert_eq!(session.hint(&mut rng), Err(SessionError::Finished));
}

#[test]
fn daily_puzzle_survives_restarts_within_the_day_only() {
    let store = MemoryStore::new();
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let quote = Quote::new("Fortune favors the bold.", "Virgil");

    let first = PuzzleEngine::new(PuzzleConfig::default(), store.clone());
    let issued = first.generate(&quote, day(2026, 10, 31), &mut rng).unwrap();
    assert!(store.get(STORAGE_KEY).unwrap().is_some());

    let restarted = PuzzleEngine::new(PuzzleConfig::default(), store.clone());
    let resumed = restarted.load_today(day(2026, 10, 31)).unwrap().unwrap();
    assert_eq!(resumed.record(), issued.record());
    assert!(resumed.guesses().is_empty());

    // same day-of-month in a later month is a different day
    assert!(restarted.load_today(day(2026, 12, 31)).unwrap().is_none());
    assert!(restarted.load_today(day(2026, 11, 1)).unwrap().is_none());
}
