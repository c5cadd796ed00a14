//! Round economy: score, energy and skips.
//!
//! A round starts with budgets derived from its number. Energy only goes
//! down; each rotation step costs one unit. The round's outcome is decided
//! once, at the moment energy reaches zero.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{RoundConfig, ScoreDeltaPolicy};

/// How a finished round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The required score was reached.
    Completed,
    /// Energy ran out below the required score.
    Failed,
}

/// Score, energy and skip bookkeeping for the current round.
///
/// ## Example
///
/// ```
/// use ferris_wheel::core::{RoundConfig, ScoreDeltaPolicy};
/// use ferris_wheel::round::{RoundOutcome, RoundState};
///
/// let mut round = RoundState::new(RoundConfig::default(), ScoreDeltaPolicy::Signed);
/// round.start_first_round();
///
/// assert!(round.consume_energy(16));
/// assert!(!round.consume_energy(1));
/// round.add_score(50);
/// assert_eq!(round.evaluate(), Some(RoundOutcome::Completed));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    config: RoundConfig,
    policy: ScoreDeltaPolicy,
    round: u32,
    score: i64,
    required_score: i64,
    energy: u32,
    max_energy: u32,
    skips_used: u32,
    skips_allowed: u32,
    outcome: Option<RoundOutcome>,
}

impl RoundState {
    /// Create a state with no round started yet.
    #[must_use]
    pub fn new(config: RoundConfig, policy: ScoreDeltaPolicy) -> Self {
        Self {
            config,
            policy,
            round: 0,
            score: 0,
            required_score: 0,
            energy: 0,
            max_energy: 0,
            skips_used: 0,
            skips_allowed: 0,
            outcome: None,
        }
    }

    /// Begin round one.
    pub fn start_first_round(&mut self) {
        self.begin(1);
    }

    /// Begin the next round.
    pub fn advance(&mut self) {
        self.begin(self.round.saturating_add(1));
    }

    /// Restart the current round with fresh budgets.
    pub fn reset(&mut self) {
        self.begin(self.round.max(1));
    }

    fn begin(&mut self, round: u32) {
        self.round = round;
        self.score = 0;
        self.required_score = self.config.required_score(round);
        self.max_energy = self.config.energy(round);
        self.energy = self.max_energy;
        self.skips_used = 0;
        self.skips_allowed = self.config.skips(round);
        self.outcome = None;

        info!(
            round,
            required = self.required_score,
            energy = self.energy,
            skips = self.skips_allowed,
            "round started"
        );
    }

    /// Current round number; zero before the first round.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.round > 0
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn required_score(&self) -> i64 {
        self.required_score
    }

    #[must_use]
    pub fn energy(&self) -> u32 {
        self.energy
    }

    /// Energy the round started with.
    #[must_use]
    pub fn max_energy(&self) -> u32 {
        self.max_energy
    }

    #[must_use]
    pub fn skips_used(&self) -> u32 {
        self.skips_used
    }

    #[must_use]
    pub fn skips_remaining(&self) -> u32 {
        self.skips_allowed.saturating_sub(self.skips_used)
    }

    /// The round's outcome, once decided.
    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Score delta policy in force.
    #[must_use]
    pub fn policy(&self) -> ScoreDeltaPolicy {
        self.policy
    }

    /// Spend `n` energy. Returns false, changing nothing, if there is not
    /// enough. Spending zero always succeeds.
    pub fn consume_energy(&mut self, n: u32) -> bool {
        if n > self.energy {
            return false;
        }
        self.energy -= n;
        true
    }

    /// Spend all remaining energy. Returns the amount spent.
    pub fn drain_energy(&mut self) -> u32 {
        std::mem::take(&mut self.energy)
    }

    /// Apply a score delta under the configured policy. Returns whether the
    /// score changed.
    pub fn add_score(&mut self, delta: i64) -> bool {
        let applies = match self.policy {
            ScoreDeltaPolicy::Signed => delta != 0,
            ScoreDeltaPolicy::PositiveOnly => delta > 0,
        };
        if applies {
            self.score = self.score.saturating_add(delta);
        }
        applies
    }

    /// Spend one skip. Returns false if the budget is exhausted.
    pub fn consume_skip(&mut self) -> bool {
        if self.skips_remaining() == 0 {
            return false;
        }
        self.skips_used += 1;
        true
    }

    /// Decide the outcome if energy has reached zero. Later calls return the
    /// recorded outcome unchanged.
    pub fn evaluate(&mut self) -> Option<RoundOutcome> {
        if self.outcome.is_none() && self.is_started() && self.energy == 0 {
            let outcome = if self.score >= self.required_score {
                RoundOutcome::Completed
            } else {
                RoundOutcome::Failed
            };
            info!(
                round = self.round,
                score = self.score,
                required = self.required_score,
                ?outcome,
                "round finished"
            );
            self.outcome = Some(outcome);
        }
        self.outcome
    }
}
