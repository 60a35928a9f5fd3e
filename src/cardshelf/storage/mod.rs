//! # Storage Layer
//!
//! Two pieces:
//!
//! - [`KeyValueStore`]: raw string slots addressed by key, the stand-in for browser local
//!   storage. [`fs::FileKv`] keeps one file per key in the data directory;
//!   [`memory::MemoryKv`] keeps them in memory for tests.
//! - [`CardSlot`]: the persistence contract for the card collection. The whole collection is
//!   one JSON array under one key; every save rewrites it.
//!
//! ## Failure Policy
//!
//! Loading never fails. A missing slot, unreadable data, a shape mismatch, or duplicate ids
//! all mean "start from an empty collection", and the bad blob is left to be overwritten by
//! the next save. Saving does return errors; what to do with them is the caller's call.

use crate::error::{CardsError, Result};
use crate::model::Card;
use std::collections::HashSet;
use tracing::{debug, warn};

pub mod fs;
pub mod memory;

/// Default key holding the card collection.
pub const DEFAULT_STORAGE_KEY: &str = "pelmeni_products_v1";

/// Raw string storage, one value per key.
///
/// Uses `&self` for writes as well; implementations needing mutation use interior
/// mutability, which is fine since everything runs on one thread.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites whatever is stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Keys become file names, so keep them to a safe alphabet.
pub fn validate_key(key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if ok {
        Ok(())
    } else {
        Err(CardsError::Store(format!("Invalid storage key: {:?}", key)))
    }
}

/// The single persistence slot for the card collection.
pub struct CardSlot<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> CardSlot<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads the stored collection, or an empty one if there is nothing usable.
    pub fn load(&self) -> Vec<Card> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored cards");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read stored cards, starting empty");
                return Vec::new();
            }
        };

        match parse_collection(&raw) {
            Ok(cards) => {
                debug!(key = %self.key, count = cards.len(), "loaded cards");
                cards
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding corrupt card data");
                Vec::new()
            }
        }
    }

    /// Serializes the full collection and overwrites the slot.
    pub fn save(&self, cards: &[Card]) -> Result<()> {
        let blob = serde_json::to_string(cards)?;
        self.backend.set(&self.key, &blob)?;
        debug!(key = %self.key, count = cards.len(), "saved cards");
        Ok(())
    }
}

fn parse_collection(raw: &str) -> Result<Vec<Card>> {
    let cards: Vec<Card> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(cards.len());
    for card in &cards {
        if !seen.insert(card.id.as_str()) {
            return Err(CardsError::Store(format!("Duplicate card id: {}", card.id)));
        }
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryKv;
    use super::*;

    fn card(id: &str, title: &str) -> Card {
        Card {
            id: id.into(),
            title: title.into(),
            description: format!("{} description", title),
            image: format!("https://img.test/{}", id),
        }
    }

    fn slot_with(raw: Option<&str>) -> CardSlot<MemoryKv> {
        let kv = MemoryKv::new();
        if let Some(raw) = raw {
            kv.set(DEFAULT_STORAGE_KEY, raw).unwrap();
        }
        CardSlot::new(kv, DEFAULT_STORAGE_KEY)
    }

    #[test]
    fn save_then_load_preserves_content_and_order() {
        let slot = slot_with(None);
        let cards = vec![card("b", "Beta"), card("a", "Alpha"), card("c", "Gamma")];
        slot.save(&cards).unwrap();
        assert_eq!(slot.load(), cards);
    }

    #[test]
    fn empty_collection_round_trips() {
        let slot = slot_with(None);
        slot.save(&[]).unwrap();
        assert!(slot.load().is_empty());
        assert_eq!(slot.backend().get(DEFAULT_STORAGE_KEY).unwrap().unwrap(), "[]");
    }

    #[test]
    fn missing_slot_loads_empty() {
        assert!(slot_with(None).load().is_empty());
    }

    #[test]
    fn corrupt_blobs_load_empty() {
        for raw in [
            "",
            "not json",
            "{\"id\":\"a\"}",
            "null",
            "[1,2,3]",
            "[{\"id\":\"a\",\"title\":\"t\"}]",
            "[{\"id\":\"a\",\"title\":\"t\",\"desc\":\"d\",\"image\":\"i\",\"x\":1}]",
        ] {
            assert!(slot_with(Some(raw)).load().is_empty(), "blob {:?}", raw);
        }
    }

    #[test]
    fn duplicate_ids_are_treated_as_corrupt() {
        let raw = serde_json::to_string(&vec![card("a", "One"), card("a", "Two")]).unwrap();
        assert!(slot_with(Some(&raw)).load().is_empty());
    }

    #[test]
    fn read_errors_load_empty() {
        let slot = slot_with(Some("[]"));
        slot.backend().set_simulate_read_error(true);
        assert!(slot.load().is_empty());
    }

    #[test]
    fn save_overwrites_previous_blob() {
        let slot = slot_with(None);
        slot.save(&[card("a", "Alpha")]).unwrap();
        slot.save(&[card("b", "Beta")]).unwrap();
        let loaded = slot.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "b");
    }

    #[test]
    fn save_surfaces_write_errors() {
        let slot = slot_with(None);
        slot.backend().set_simulate_write_error(true);
        assert!(slot.save(&[card("a", "Alpha")]).is_err());
    }

    #[test]
    fn validates_keys() {
        assert!(validate_key("pelmeni_products_v1").is_ok());
        assert!(validate_key("theme").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key(".hidden").is_err());
    }
}
