//! # ferris-wheel
//!
//! A deterministic Ferris wheel round simulation and effect-resolution
//! engine.
//!
//! Animals wait in line, are loaded into the bottom cart of a wheel and ride
//! it as the player spends energy on rotations. Every step fires effects
//! (pass the top, pass the bottom, rotate, stop) that change the riders'
//! points; the bottom cart unloads into the round score. A round is won by
//! reaching the required score by the time energy runs out.
//!
//! ## Design Principles
//!
//! 1. **Instantaneous Logic**: A rotation is resolved completely in one
//!    call. Animation is a presentation concern that replays the recorded
//!    events at its own pace.
//!
//! 2. **Explicit Services**: A `Session` owns the catalog, deck, wheel and
//!    round state. There are no globals.
//!
//! 3. **Deterministic**: All randomness flows from one seed through
//!    independent `GameRng` streams.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `animals`: Definitions, effects, modifiers, instances, catalog
//! - `deck`: Random generation and the round queue
//! - `wheel`: Cart ring, effect resolver, rotation controller
//! - `round`: Score, energy and skip bookkeeping
//! - `events`: Events for the presentation layer
//! - `session`: Commands and the session root

pub mod animals;
pub mod core;
pub mod deck;
pub mod events;
pub mod round;
pub mod session;
pub mod wheel;

// Re-export commonly used types
pub use crate::core::{
    GameRng, GameRngState, Rejection, Result, ScoreDeltaPolicy, SimConfig, SimError, SkipPolicy,
    SpinPolicy,
};

pub use crate::animals::{
    AnimalCatalog, AnimalDefinition, AnimalId, DeckAnimal, DeckEntry, EffectSpec, EffectTarget,
    EffectTrigger, EffectType, Modifier, Rarity, StaticData,
};

pub use crate::deck::{DeckGenerator, RoundQueue};

pub use crate::wheel::{CartRing, Direction, EffectResolver, WheelController};

pub use crate::round::{RoundOutcome, RoundState};

pub use crate::events::{EventLog, PresentationSink, SimEvent};

pub use crate::session::{Command, Session};
