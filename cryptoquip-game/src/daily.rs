//! Daily puzzle persistence: one record per calendar day in a key-value store.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;
use thiserror::Error;

use crate::cipher::{Cipher, CipherKey, TokenizedQuip};
use crate::constants::{LOG_CACHE, STORAGE_KEY};

/// Persisted puzzle: ciphertext, key, author and the day it was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub quip: TokenizedQuip,
    pub key: CipherKey,
    pub date: NaiveDate,
    pub author: String,
}

impl PuzzleRecord {
    #[must_use]
    pub fn new(cipher: Cipher, author: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            quip: cipher.quip,
            key: cipher.key,
            date,
            author: author.into(),
        }
    }

    /// Every ciphertext letter in the quip is covered by the key.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.quip.letters().all(|cipher| self.key.covers_cipher(cipher))
    }
}

/// String key-value persistence supplied by the platform.
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete `key` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

/// In-process store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Serves the stored puzzle only on the day it was issued.
#[derive(Debug, Clone)]
pub struct DailyPuzzleCache<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> DailyPuzzleCache<S> {
    /// Cache under the default storage key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Today's record, if one was saved today.
    ///
    /// Records from another day, or that no longer parse, count as absent.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself fails.
    pub fn load(&self, today: NaiveDate) -> Result<Option<PuzzleRecord>, CacheError> {
        let Some(raw) = self
            .store
            .get(&self.key)
            .map_err(|e| CacheError::Storage(e.to_string()))?
        else {
            log::debug!(target: LOG_CACHE, "no stored puzzle under {}", self.key);
            return Ok(None);
        };
        let record: PuzzleRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(err) => {
                log::warn!(target: LOG_CACHE, "ignoring unreadable puzzle record: {err}");
                return Ok(None);
            }
        };
        if record.date != today {
            log::debug!(target: LOG_CACHE, "stored puzzle is from {}, today is {today}", record.date);
            return Ok(None);
        }
        if !record.is_consistent() {
            log::warn!(target: LOG_CACHE, "ignoring puzzle record whose quip and key disagree");
            return Ok(None);
        }
        log::debug!(target: LOG_CACHE, "serving cached puzzle for {today}");
        Ok(Some(record))
    }

    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store fails.
    pub fn save(&self, record: &PuzzleRecord) -> Result<(), CacheError> {
        let raw = serde_json::to_string(record)?;
        self.store
            .set(&self.key, &raw)
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        log::debug!(target: LOG_CACHE, "saved puzzle for {}", record.date);
        Ok(())
    }

    /// Forget the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.store
            .remove(&self.key)
            .map_err(|e| CacheError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::generate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn record(date: NaiveDate) -> PuzzleRecord {
        let mut rng = ChaCha20Rng::seed_from_u64(17);
        let cipher = generate("Brevity is the soul of wit.", &mut rng).unwrap();
        PuzzleRecord::new(cipher, "William Shakespeare", date)
    }

    #[test]
    fn same_day_load_returns_saved_record() {
        let cache = DailyPuzzleCache::new(MemoryStore::new());
        let saved = record(day(16));
        cache.save(&saved).unwrap();
        assert_eq!(cache.load(day(16)).unwrap(), Some(saved));
    }

    #[test]
    fn other_day_load_is_absent() {
        let cache = DailyPuzzleCache::new(MemoryStore::new());
        cache.save(&record(day(16))).unwrap();
        assert_eq!(cache.load(day(17)).unwrap(), None);
        let next_month = NaiveDate::from_ymd_opt(2026, 11, 16).unwrap();
        assert_eq!(cache.load(next_month).unwrap(), None);
    }

    #[test]
    fn save_replaces_previous_record() {
        let cache = DailyPuzzleCache::new(MemoryStore::new());
        cache.save(&record(day(15))).unwrap();
        let newer = record(day(16));
        cache.save(&newer).unwrap();
        assert_eq!(cache.load(day(15)).unwrap(), None);
        assert_eq!(cache.load(day(16)).unwrap(), Some(newer));
    }

    #[test]
    fn unreadable_records_count_as_absent() {
        let store = MemoryStore::new();
        store
            .set(
                STORAGE_KEY,
                r#"{"quip":[["X"]],"key":{"a":"b"},"date":16,"author":"legacy"}"#,
            )
            .unwrap();
        let cache = DailyPuzzleCache::new(store);
        assert_eq!(cache.load(day(16)).unwrap(), None);
    }

    #[test]
    fn inconsistent_records_count_as_absent() {
        let store = MemoryStore::new();
        store
            .set(
                STORAGE_KEY,
                r#"{"quip":[["x","y"]],"key":{"a":"b","b":"a"},"date":"2026-10-16","author":"?"}"#,
            )
            .unwrap();
        let cache = DailyPuzzleCache::new(store);
        assert_eq!(cache.load(day(16)).unwrap(), None);
    }

    #[test]
    fn clear_removes_record() {
        let cache = DailyPuzzleCache::with_key(MemoryStore::new(), "custom");
        cache.save(&record(day(16))).unwrap();
        assert!(cache.store().get("custom").unwrap().is_some());
        cache.clear().unwrap();
        assert_eq!(cache.load(day(16)).unwrap(), None);
    }

    #[test]
    fn record_json_shape_matches_storage_format() {
        let value = serde_json::to_value(record(day(16))).unwrap();
        assert_eq!(value["date"], "2026-10-16");
        assert_eq!(value["author"], "William Shakespeare");
        assert!(value["quip"][0][0].is_string());
        assert_eq!(value["quip"][0].as_array().unwrap().len(), "Brevity".len());
        assert!(value["key"]["b"].is_string());
    }
}
