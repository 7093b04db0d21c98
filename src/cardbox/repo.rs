//! # Card Repository
//!
//! The single owner of the in-memory card collection. Every mutation goes
//! through [`CardRepository::add`], [`CardRepository::update`] or
//! [`CardRepository::remove`], and each one writes the full resulting
//! collection through the persistence adapter before returning.
//!
//! If that write fails the mutation is undone, so the in-memory list and the
//! slot never disagree.

use crate::error::{CardboxError, Result};
use crate::model::{Card, CardDraft, CardId};
use crate::persist::CardPersistence;
use crate::store::SlotStore;
use tracing::debug;

pub struct CardRepository<S: SlotStore> {
    cards: Vec<Card>,
    persistence: CardPersistence<S>,
}

impl<S: SlotStore> CardRepository<S> {
    /// Loads the collection from the slot (seed cards when it holds nothing usable).
    pub fn open(persistence: CardPersistence<S>) -> Self {
        let cards = persistence.load();
        Self { cards, persistence }
    }

    pub fn list(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: CardId) -> Result<&Card> {
        self.cards
            .iter()
            .find(|c| c.id == id)
            .ok_or(CardboxError::CardNotFound(id))
    }

    pub fn persistence(&self) -> &CardPersistence<S> {
        &self.persistence
    }

    fn next_id(&self) -> Result<CardId> {
        self.cards
            .iter()
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| CardboxError::Store("card id space exhausted".to_string()))
    }

    pub fn add(&mut self, draft: CardDraft) -> Result<Card> {
        let card = Card::from_draft(self.next_id()?, draft);
        self.cards.push(card.clone());

        if let Err(e) = self.persistence.save(&self.cards) {
            self.cards.pop();
            return Err(e);
        }
        debug!(id = card.id, title = %card.title, "card added");
        Ok(card)
    }

    pub fn update(&mut self, id: CardId, draft: CardDraft) -> Result<Card> {
        let pos = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(CardboxError::CardNotFound(id))?;

        let previous = self.cards[pos].clone();
        self.cards[pos].apply(draft);

        if let Err(e) = self.persistence.save(&self.cards) {
            self.cards[pos] = previous;
            return Err(e);
        }
        debug!(id, "card updated");
        Ok(self.cards[pos].clone())
    }

    /// Returns whether a card was removed. An absent id is a no-op, not an error.
    pub fn remove(&mut self, id: CardId) -> Result<bool> {
        let Some(pos) = self.cards.iter().position(|c| c.id == id) else {
            debug!(id, "remove: no such card");
            return Ok(false);
        };

        let removed = self.cards.remove(pos);
        if let Err(e) = self.persistence.save(&self.cards) {
            self.cards.insert(pos, removed);
            return Err(e);
        }
        debug!(id, title = %removed.title, "card removed");
        Ok(true)
    }
}
