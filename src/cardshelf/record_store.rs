//! # Record Store
//!
//! Owns the canonical, ordered card collection. Every successful mutation is followed by a
//! full re-serialization through [`CardSlot`] before the call returns.
//!
//! Ordering: new cards go to the front, updates keep their position, deletes close the gap.
//!
//! NotFound is an outcome, not an error: updating or deleting an id that is no longer live
//! changes nothing and writes nothing.
//!
//! If the durability step fails the in-memory collection keeps the mutation, the failure is
//! logged, and [`RecordStore::is_unsaved`] reports it until a later save succeeds.

use crate::collab::{IdSource, ImageSource};
use crate::error::Result;
use crate::model::{Card, CardFields};
use crate::storage::{CardSlot, KeyValueStore};
use tracing::{debug, error, info};

/// Example cards used to populate an empty catalog.
pub const SEED_CARDS: [(&str, &str); 3] = [
    ("Holographic Lens", "Advanced optics for crisp holograms"),
    ("Neon Light Board", "Bright neon signage for displays"),
    ("Virtual Display", "Next-gen virtual display technology"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Card),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Card),
    NotFound,
}

pub struct RecordStore<S: KeyValueStore> {
    cards: Vec<Card>,
    slot: CardSlot<S>,
    ids: Box<dyn IdSource>,
    images: Box<dyn ImageSource>,
    unsaved: bool,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Loads whatever the slot holds. Does not seed; see [`RecordStore::seed_if_empty`].
    pub fn open(slot: CardSlot<S>, ids: Box<dyn IdSource>, images: Box<dyn ImageSource>) -> Self {
        let cards = slot.load();
        Self {
            cards,
            slot,
            ids,
            images,
            unsaved: false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn backend(&self) -> &S {
        self.slot.backend()
    }

    /// True when the last persistence attempt failed.
    pub fn is_unsaved(&self) -> bool {
        self.unsaved
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Populates an empty collection with [`SEED_CARDS`] and persists it.
    /// Returns whether seeding happened.
    pub fn seed_if_empty(&mut self) -> bool {
        if !self.cards.is_empty() {
            return false;
        }
        for (title, description) in SEED_CARDS {
            let card = Card {
                id: self.fresh_id(),
                title: title.to_string(),
                description: description.to_string(),
                image: self.images.placeholder(),
            };
            self.cards.push(card);
        }
        info!(count = self.cards.len(), "seeded example cards");
        self.persist();
        true
    }

    /// Validates, assigns a fresh id, prepends and persists.
    pub fn create(&mut self, fields: CardFields) -> Result<Card> {
        let clean = fields.validated()?;
        let image = self.image_or_placeholder(clean.image);
        let card = Card {
            id: self.fresh_id(),
            title: clean.title,
            description: clean.description,
            image,
        };
        self.cards.insert(0, card.clone());
        debug!(id = %card.id, "created card");
        self.persist();
        Ok(card)
    }

    /// Validates, then replaces the matching card's fields in place.
    pub fn update(&mut self, id: &str, fields: CardFields) -> Result<UpdateOutcome> {
        let clean = fields.validated()?;
        let Some(pos) = self.position(id) else {
            debug!(id, "update skipped, card not found");
            return Ok(UpdateOutcome::NotFound);
        };
        let image = self.image_or_placeholder(clean.image);
        let card = &mut self.cards[pos];
        card.title = clean.title;
        card.description = clean.description;
        card.image = image;
        let updated = card.clone();
        debug!(id, "updated card");
        self.persist();
        Ok(UpdateOutcome::Updated(updated))
    }

    /// Removes the card if present. Absent ids are a no-op.
    pub fn delete(&mut self, id: &str) -> DeleteOutcome {
        let Some(pos) = self.position(id) else {
            debug!(id, "delete skipped, card not found");
            return DeleteOutcome::NotFound;
        };
        let removed = self.cards.remove(pos);
        debug!(id, "deleted card");
        self.persist();
        DeleteOutcome::Deleted(removed)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if self.find_by_id(&id).is_none() {
                return id;
            }
            debug!(%id, "id collides with a live card, drawing another");
        }
    }

    fn image_or_placeholder(&mut self, image: String) -> String {
        if image.is_empty() {
            self.images.placeholder()
        } else {
            image
        }
    }

    fn persist(&mut self) {
        match self.slot.save(&self.cards) {
            Ok(()) => self.unsaved = false,
            Err(e) => {
                error!(key = %self.slot.key(), error = %e, "failed to persist cards");
                self.unsaved = true;
            }
        }
    }
}
