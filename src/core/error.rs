//! Error types.
//!
//! Two families:
//! - [`SimError`]: setup and generation failures (bad static data, a draw
//!   that could not be satisfied). Recoverable; callers decide what to skip.
//! - [`Rejection`]: a player command that is not valid in the current state.
//!   A rejected command leaves every piece of state untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animals::{AnimalId, Modifier};

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

/// Setup and generation errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// Static data or configuration could not be parsed.
    #[error("failed to parse data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two catalog entries share an id.
    #[error("duplicate animal id {0}")]
    DuplicateAnimal(AnimalId),

    /// A deck or blocklist entry references an animal missing from the catalog.
    #[error("unknown animal id {0}")]
    UnknownAnimal(AnimalId),

    /// Starter deck index out of range.
    #[error("unknown starter deck {index} ({available} available)")]
    UnknownStarterDeck {
        /// Requested index.
        index: usize,
        /// Number of starter decks.
        available: usize,
    },

    /// No catalog entry matches the allowed rarities, or their total weight
    /// is not positive.
    #[error("no eligible animals for the requested rarities")]
    NoEligibleAnimals,

    /// Every attempt produced a blocklisted (animal, modifier) pair.
    #[error("failed to generate a valid animal after {attempts} attempts")]
    GenerationExhausted {
        /// Attempts made before giving up.
        attempts: u32,
    },
}

/// Why a command was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    /// A rotation is already being resolved.
    #[error("the wheel is already rotating")]
    AlreadyRotating,

    /// Rotations need at least one step.
    #[error("a rotation needs at least one step")]
    ZeroSteps,

    /// Not enough energy left for the requested steps.
    #[error("need {required} energy, have {available}")]
    InsufficientEnergy {
        /// Energy the rotation costs.
        required: u32,
        /// Energy remaining.
        available: u32,
    },

    /// The loading cart already holds an animal.
    #[error("cart {cart} is occupied")]
    CartOccupied {
        /// Loading cart index.
        cart: usize,
    },

    /// The per-round skip budget is spent.
    #[error("no skips remaining")]
    NoSkipsRemaining,

    /// Waiting line index out of range.
    #[error("queue index {index} out of range (len {len})")]
    QueueIndex {
        /// Requested index.
        index: usize,
        /// Current line length.
        len: usize,
    },

    /// The round already has an outcome.
    #[error("the round is over")]
    RoundOver,

    /// Advancing requires a completed round.
    #[error("the round is not complete")]
    RoundNotComplete,

    /// No round has been started yet.
    #[error("no round in progress")]
    NotStarted,
}

/// Pair used in blocklist diagnostics.
pub(crate) fn describe_pair(id: AnimalId, modifier: Modifier) -> String {
    format!("{id}/{modifier:?}")
}
