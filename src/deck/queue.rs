//! The player's permanent deck and the per-round animal queue.
//!
//! The permanent deck is a list of [`DeckEntry`] values that survives from
//! round to round. At each round start the queue is rebuilt from it and
//! shuffled; animals are then dequeued from the front. Once it runs dry the
//! queue can fall back to random generation.

use im::Vector;
use tracing::debug;

use super::generator::DeckGenerator;
use crate::animals::{AnimalCatalog, DeckAnimal, DeckEntry, Rarity};
use crate::core::error::Result;
use crate::core::GameRng;

/// Permanent deck plus the pending round queue (front = next out).
#[derive(Clone, Debug, Default)]
pub struct RoundQueue {
    deck: Vec<DeckEntry>,
    pending: Vector<DeckAnimal>,
}

impl RoundQueue {
    /// Create an empty deck and queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue over an existing permanent deck.
    #[must_use]
    pub fn with_deck(deck: Vec<DeckEntry>) -> Self {
        Self {
            deck,
            pending: Vector::new(),
        }
    }

    /// Replace the permanent deck with a catalog starter deck.
    pub fn set_starter_deck(&mut self, catalog: &AnimalCatalog, index: usize) -> Result<()> {
        let starter = catalog.starter_deck(index)?;
        debug!(deck = %starter.name, entries = starter.animals.len(), "starter deck selected");
        self.deck = starter.animals.clone();
        Ok(())
    }

    /// Permanent deck entries.
    #[must_use]
    pub fn deck(&self) -> &[DeckEntry] {
        &self.deck
    }

    /// Total animal copies in the permanent deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.iter().map(|e| e.count as usize).sum()
    }

    /// Add an entry to the permanent deck.
    pub fn add_to_deck(&mut self, entry: DeckEntry) {
        self.deck.push(entry);
    }

    /// Remove a permanent deck entry by index.
    pub fn remove_from_deck(&mut self, index: usize) -> Option<DeckEntry> {
        (index < self.deck.len()).then(|| self.deck.remove(index))
    }

    /// Rebuild the round queue from the permanent deck and shuffle it.
    pub fn regenerate(&mut self, catalog: &AnimalCatalog, rng: &mut GameRng) -> Result<()> {
        let mut animals = Vec::with_capacity(self.deck_size());
        for entry in &self.deck {
            for _ in 0..entry.count {
                animals.push(catalog.instantiate(entry.animal, entry.modifier)?);
            }
        }
        rng.shuffle(&mut animals);

        debug!(animals = animals.len(), "round queue regenerated");
        self.pending = animals.into_iter().collect();
        Ok(())
    }

    /// Animals waiting in the queue, front first.
    pub fn peek(&self) -> impl Iterator<Item = &DeckAnimal> {
        self.pending.iter()
    }

    /// Animals left in the queue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove up to `n` animals from the front.
    pub fn dequeue(&mut self, n: usize) -> Vec<DeckAnimal> {
        let take = n.min(self.pending.len());
        let rest = self.pending.split_off(take);
        let front = std::mem::replace(&mut self.pending, rest);
        front.into_iter().collect()
    }

    /// Remove up to `n` animals, generating random ones once the queue is
    /// empty. Generation failures shorten the result.
    pub fn dequeue_or_generate(
        &mut self,
        n: usize,
        generator: &DeckGenerator,
        rng: &mut GameRng,
        modifier_chance: f32,
    ) -> Vec<DeckAnimal> {
        let mut animals = self.dequeue(n);
        while animals.len() < n {
            match generator.generate_random_animal(rng, modifier_chance, &Rarity::ALL) {
                Ok(animal) => animals.push(animal),
                Err(_) => break,
            }
        }
        animals
    }

    /// Put an animal at the back of the queue.
    pub fn enqueue_back(&mut self, animal: DeckAnimal) {
        self.pending.push_back(animal);
    }

    /// Drop every pending animal. The permanent deck is kept.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
