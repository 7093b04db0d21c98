//! Persistence adapter: the card collection as JSON text in one slot.
//!
//! Reading never fails from the caller's point of view. A slot that is absent,
//! unreadable, or not a well-formed card array with positive, unique ids yields
//! the seed collection. An absent slot is the normal first run and is logged at
//! debug; the other fallbacks are logged at warn.

use crate::error::{CardboxError, Result};
use crate::model::{Card, Category};
use crate::store::SlotStore;
use std::collections::HashSet;
use tracing::{debug, warn};

pub const DEFAULT_SLOT: &str = "cards";

const SEED_IMAGE: &str = "https://images.unsplash.com/photo-1557683316-973673baf926?w=400";

/// The collection used when no valid persisted state exists.
pub fn seed_cards() -> Vec<Card> {
    vec![Card {
        id: 1,
        title: "Sample Card".to_string(),
        description: "This is a sample card with an image".to_string(),
        category: Category::Work,
        image: Some(SEED_IMAGE.to_string()),
    }]
}

pub struct CardPersistence<S: SlotStore> {
    store: S,
    slot: String,
}

impl<S: SlotStore> CardPersistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_slot(store, DEFAULT_SLOT)
    }

    pub fn with_slot(store: S, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> Vec<Card> {
        let raw = match self.store.get(&self.slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(slot = %self.slot, "slot empty, using seed cards");
                return seed_cards();
            }
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "slot unreadable, using seed cards");
                return seed_cards();
            }
        };

        let cards = match serde_json::from_str::<Vec<Card>>(&raw) {
            Ok(cards) => cards,
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "slot holds malformed data, using seed cards");
                return seed_cards();
            }
        };

        if let Some(problem) = id_problem(&cards) {
            warn!(slot = %self.slot, %problem, "slot holds invalid ids, using seed cards");
            return seed_cards();
        }
        debug!(slot = %self.slot, count = cards.len(), "loaded cards");
        cards
    }

    /// Serializes the whole collection and replaces the slot value.
    pub fn save(&self, cards: &[Card]) -> Result<()> {
        let content = serde_json::to_string(cards).map_err(CardboxError::Serialization)?;
        self.store.set(&self.slot, &content)?;
        debug!(slot = %self.slot, count = cards.len(), "saved cards");
        Ok(())
    }
}

/// Ids must be positive and unique.
fn id_problem(cards: &[Card]) -> Option<String> {
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if card.id == 0 {
            return Some("id 0".to_string());
        }
        if !seen.insert(card.id) {
            return Some(format!("duplicate id {}", card.id));
        }
    }
    None
}
