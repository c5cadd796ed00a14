//! Core engine types: RNG, configuration, errors.
//!
//! This module contains the building blocks shared by every other module.
//! Sessions configure these via `SimConfig` rather than modifying the core.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{
    valid_cart_count, DeckConfig, RoundConfig, ScoreDeltaPolicy, ScoringConfig, SimConfig,
    SkipPolicy, SpinPolicy, WheelConfig, MIN_CART_COUNT,
};
pub use error::{Rejection, Result, SimError};
pub use rng::{GameRng, GameRngState};
