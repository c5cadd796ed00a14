//! Deck building: random generation and the round queue.
//!
//! - `DeckGenerator`: Weighted rarity roulette plus modifier roll, with
//!   blocklist retries
//! - `RoundQueue`: Permanent deck and the shuffled per-round queue

mod generator;
mod queue;

pub use generator::DeckGenerator;
pub use queue::RoundQueue;
