//! Simulation events.
//!
//! The core never draws anything. Every state transition the presentation
//! layer may want to animate or display is recorded as a `SimEvent`, in the
//! exact order the simulation performed it. A renderer can replay the
//! sequence as keyframes at whatever pace it likes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::animals::{DeckAnimal, EffectTrigger, EffectType};
use crate::core::Rejection;
use crate::session::Command;
use crate::wheel::Direction;

/// Cart indices touched by one effect. Most effects hit one or two carts.
pub type EffectTargets = SmallVec<[usize; 4]>;

/// Something that happened in the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A round began with fresh budgets.
    RoundStarted {
        round: u32,
        required_score: i64,
    },
    /// Energy ran out with the required score reached.
    RoundCompleted { round: u32, score: i64 },
    /// Energy ran out short of the required score.
    RoundFailed { round: u32, score: i64 },
    ScoreChanged { score: i64 },
    EnergyChanged { energy: u32 },
    SkipsChanged { remaining: u32 },
    /// The waiting line changed.
    QueueChanged { waiting: usize, pending: usize },
    /// An animal was placed in the bottom cart.
    AnimalLoaded { cart: usize, animal: DeckAnimal },
    /// The wheel moved one position.
    WheelStepped { top: usize, direction: Direction },
    /// A rotation finished all of its steps.
    WheelStopped { top: usize },
    /// The bottom cart opened for unloading.
    CartOpened { cart: usize },
    /// An animal left the wheel and scored.
    AnimalUnloaded {
        cart: usize,
        animal: DeckAnimal,
        points: i64,
    },
    /// An animal was skipped from the waiting line.
    AnimalSkipped { animal: DeckAnimal },
    /// An effect resolved.
    EffectApplied {
        cart: usize,
        trigger: EffectTrigger,
        effect_type: EffectType,
        targets: EffectTargets,
    },
    /// An animal's points changed.
    PointsChanged { cart: usize, points: i64 },
    /// The day-end pass ran over the remaining riders.
    DayEnded { deducted: i64 },
    /// A spin requested mid-rotation was discarded.
    SpinDropped { direction: Direction, steps: u32 },
    /// A spin requested mid-rotation will run after it.
    SpinQueued { direction: Direction, steps: u32 },
    /// A command was refused; nothing changed.
    CommandRejected { command: Command, reason: Rejection },
}

impl SimEvent {
    /// Short name for logging and filtering.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SimEvent::RoundStarted { .. } => "round_started",
            SimEvent::RoundCompleted { .. } => "round_completed",
            SimEvent::RoundFailed { .. } => "round_failed",
            SimEvent::ScoreChanged { .. } => "score_changed",
            SimEvent::EnergyChanged { .. } => "energy_changed",
            SimEvent::SkipsChanged { .. } => "skips_changed",
            SimEvent::QueueChanged { .. } => "queue_changed",
            SimEvent::AnimalLoaded { .. } => "animal_loaded",
            SimEvent::WheelStepped { .. } => "wheel_stepped",
            SimEvent::WheelStopped { .. } => "wheel_stopped",
            SimEvent::CartOpened { .. } => "cart_opened",
            SimEvent::AnimalUnloaded { .. } => "animal_unloaded",
            SimEvent::AnimalSkipped { .. } => "animal_skipped",
            SimEvent::EffectApplied { .. } => "effect_applied",
            SimEvent::PointsChanged { .. } => "points_changed",
            SimEvent::DayEnded { .. } => "day_ended",
            SimEvent::SpinDropped { .. } => "spin_dropped",
            SimEvent::SpinQueued { .. } => "spin_queued",
            SimEvent::CommandRejected { .. } => "command_rejected",
        }
    }
}
