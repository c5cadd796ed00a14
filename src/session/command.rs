//! Player commands.

use serde::{Deserialize, Serialize};

/// An input the session can apply.
///
/// Commands that are invalid in the current state are rejected and change
/// nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Rotate the wheel counter-clockwise by `steps`, one energy per step.
    RotateWheel { steps: u32 },
    /// Load waiting-line entry `queue_index` into the bottom cart.
    LoadAnimal { queue_index: usize },
    /// Spend a skip to remove waiting-line entry `queue_index`.
    SkipAnimal { queue_index: usize },
    /// Spend all remaining energy and end the day.
    EndDayEarly,
    /// Move on after a completed round.
    AdvanceRound,
    /// Replay the current round from scratch.
    RestartRound,
}

impl Command {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::RotateWheel { .. } => "rotate_wheel",
            Command::LoadAnimal { .. } => "load_animal",
            Command::SkipAnimal { .. } => "skip_animal",
            Command::EndDayEarly => "end_day_early",
            Command::AdvanceRound => "advance_round",
            Command::RestartRound => "restart_round",
        }
    }
}
