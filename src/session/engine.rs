//! The simulation session.
//!
//! `Session` owns every service of a run: configuration, the shared catalog,
//! the deck, the waiting line, the wheel and the round economy. Input
//! arrives as [`Command`]s through [`Session::apply`]; output leaves as
//! [`SimEvent`]s in the session's [`EventLog`].

use std::sync::Arc;

use tracing::{debug, error, info};

use super::command::Command;
use crate::animals::{AnimalCatalog, DeckAnimal, DeckEntry, EffectTrigger};
use crate::core::error::Result;
use crate::core::{GameRng, Rejection, SimConfig, SimError, SkipPolicy};
use crate::deck::{DeckGenerator, RoundQueue};
use crate::events::{EventLog, PresentationSink, SimEvent};
use crate::round::{RoundOutcome, RoundState};
use crate::wheel::{
    CartRing, Direction, EffectResolver, ResolverContext, WheelContext, WheelController,
};

/// A single-player run.
///
/// ## Usage
///
/// ```
/// use ferris_wheel::core::SimConfig;
/// use ferris_wheel::session::{Command, Session};
///
/// let mut session = Session::with_builtin_catalog(SimConfig::default().with_seed(3)).unwrap();
/// session.start(0).unwrap();
///
/// session.apply(Command::LoadAnimal { queue_index: 0 }).unwrap();
/// session.apply(Command::RotateWheel { steps: 1 }).unwrap();
///
/// for event in session.drain_events() {
///     println!("{event:?}");
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    config: SimConfig,
    catalog: Arc<AnimalCatalog>,
    generator: DeckGenerator,
    queue: RoundQueue,
    line: Vec<DeckAnimal>,
    ring: CartRing,
    controller: WheelController,
    round: RoundState,
    deck_rng: GameRng,
    effect_rng: GameRng,
    events: EventLog,
}

/// Build a [`WheelContext`] from disjoint session fields.
macro_rules! wheel_context {
    ($session:ident) => {
        WheelContext {
            ring: &mut $session.ring,
            round: &mut $session.round,
            effects: ResolverContext::new(
                &mut $session.effect_rng,
                &mut $session.events,
                $session.config.scoring,
            ),
        }
    };
}

impl Session {
    /// Create a session. The configuration is validated (clamped) first.
    #[must_use]
    pub fn new(config: SimConfig, catalog: Arc<AnimalCatalog>) -> Self {
        let config = config.validated();
        let root = GameRng::new(config.seed);

        Self {
            generator: DeckGenerator::new(Arc::clone(&catalog), &config.deck),
            queue: RoundQueue::new(),
            line: Vec::with_capacity(config.deck.queue_size),
            ring: CartRing::new(config.wheel.cart_count),
            controller: WheelController::new(config.wheel.spin_policy),
            round: RoundState::new(config.round.clone(), config.scoring.score_delta_policy),
            deck_rng: root.for_context("deck"),
            effect_rng: root.for_context("effects"),
            events: EventLog::new(),
            catalog,
            config,
        }
    }

    /// Create a session over the bundled animal data.
    pub fn with_builtin_catalog(config: SimConfig) -> Result<Self> {
        Ok(Self::new(config, Arc::new(AnimalCatalog::builtin()?)))
    }

    /// Pick a starter deck and begin round one.
    pub fn start(&mut self, starter_deck: usize) -> Result<()> {
        self.queue.set_starter_deck(&self.catalog, starter_deck)?;
        self.round.start_first_round();
        self.begin_round();
        Ok(())
    }

    /// Begin round one with an explicit permanent deck.
    pub fn start_with_deck(&mut self, deck: Vec<DeckEntry>) -> Result<()> {
        for entry in &deck {
            self.require_animal(entry)?;
        }
        self.queue = RoundQueue::with_deck(deck);
        self.round.start_first_round();
        self.begin_round();
        Ok(())
    }

    /// Apply a player command.
    ///
    /// A rejected command changes nothing except recording a
    /// [`SimEvent::CommandRejected`].
    pub fn apply(&mut self, command: Command) -> std::result::Result<(), Rejection> {
        let result = match command {
            Command::RotateWheel { steps } => self.rotate_wheel(steps),
            Command::LoadAnimal { queue_index } => self.load_animal(queue_index),
            Command::SkipAnimal { queue_index } => self.skip_animal(queue_index),
            Command::EndDayEarly => self.end_day_early(),
            Command::AdvanceRound => self.advance_round(),
            Command::RestartRound => self.restart_round(),
        };

        if let Err(reason) = &result {
            debug!(command = command.name(), %reason, "command rejected");
            self.events.push(SimEvent::CommandRejected {
                command,
                reason: reason.clone(),
            });
        }
        result
    }

    /// Draw `count` random animals to offer as rewards. Failed draws are
    /// skipped, so fewer may be returned.
    pub fn reward_offers(&mut self, count: usize, modifier_chance: f32) -> Vec<DeckAnimal> {
        self.generator
            .get_random_animals(&mut self.deck_rng, count, modifier_chance)
    }

    /// Add an entry to the permanent deck. It joins the queue from the next
    /// round on.
    pub fn add_to_deck(&mut self, entry: DeckEntry) -> Result<()> {
        self.require_animal(&entry)?;
        debug!(animal = %entry.animal, modifier = ?entry.modifier, count = entry.count, "deck entry added");
        self.queue.add_to_deck(entry);
        Ok(())
    }

    /// Add one copy of an offered animal to the permanent deck.
    pub fn add_animal_to_deck(&mut self, animal: &DeckAnimal) -> Result<()> {
        self.add_to_deck(DeckEntry::new(animal.id(), animal.modifier()))
    }

    /// Remove a permanent deck entry by index.
    pub fn remove_from_deck(&mut self, index: usize) -> Option<DeckEntry> {
        self.queue.remove_from_deck(index)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &AnimalCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn ring(&self) -> &CartRing {
        &self.ring
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// The permanent deck and pending round queue.
    #[must_use]
    pub fn queue(&self) -> &RoundQueue {
        &self.queue
    }

    /// Animals visible in the waiting line, next to load first.
    #[must_use]
    pub fn waiting_line(&self) -> &[DeckAnimal] {
        &self.line
    }

    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.controller.is_rotating()
    }

    /// Undelivered events.
    #[must_use]
    pub fn events(&self) -> &[SimEvent] {
        self.events.events()
    }

    /// Take every undelivered event.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain()
    }

    /// Deliver every undelivered event to `sink`.
    pub fn flush_events(&mut self, sink: &mut impl PresentationSink) {
        self.events.flush_to(sink);
    }

    // === Commands ===

    fn rotate_wheel(&mut self, steps: u32) -> std::result::Result<(), Rejection> {
        self.require_playing()?;
        {
            let mut ctx = wheel_context!(self);
            self.controller
                .rotate(Direction::CounterClockwise, steps, &mut ctx)?;
        }
        self.check_round_end();
        Ok(())
    }

    fn load_animal(&mut self, index: usize) -> std::result::Result<(), Rejection> {
        self.require_playing()?;
        if self.controller.is_rotating() {
            return Err(Rejection::AlreadyRotating);
        }
        self.require_line_index(index)?;
        let bottom = self.ring.bottom();
        if self.ring.is_occupied(bottom) {
            return Err(Rejection::CartOccupied { cart: bottom });
        }

        let animal = self.line.remove(index);
        let cart = match self.ring.load(animal) {
            Ok(cart) => cart,
            Err(animal) => {
                self.line.insert(index, animal);
                return Err(Rejection::CartOccupied { cart: bottom });
            }
        };
        if let Some(animal) = self.ring.get(cart) {
            debug!(cart, animal = %animal.display_name(), "animal loaded");
            self.events.push(SimEvent::AnimalLoaded {
                cart,
                animal: animal.clone(),
            });
        }
        self.refill_line();

        let spins = {
            let mut effects = ResolverContext::new(
                &mut self.effect_rng,
                &mut self.events,
                self.config.scoring,
            );
            EffectResolver::apply_effects(&mut self.ring, cart, EffectTrigger::OnLoad, &mut effects)
        };
        for request in spins {
            let mut ctx = wheel_context!(self);
            self.controller.spin(request, &mut ctx);
        }

        self.check_round_end();
        Ok(())
    }

    fn skip_animal(&mut self, index: usize) -> std::result::Result<(), Rejection> {
        self.require_playing()?;
        self.require_line_index(index)?;
        if !self.round.consume_skip() {
            return Err(Rejection::NoSkipsRemaining);
        }

        let animal = self.line.remove(index);
        debug!(animal = %animal.display_name(), policy = ?self.config.deck.skip_policy, "animal skipped");
        if self.config.deck.skip_policy == SkipPolicy::ReturnToBack {
            self.queue.enqueue_back(animal.clone());
        }
        self.events.push(SimEvent::AnimalSkipped { animal });
        self.events.push(SimEvent::SkipsChanged {
            remaining: self.round.skips_remaining(),
        });
        self.refill_line();
        Ok(())
    }

    fn end_day_early(&mut self) -> std::result::Result<(), Rejection> {
        self.require_playing()?;
        {
            let mut ctx = wheel_context!(self);
            self.controller.end_day(&mut ctx)?;
        }
        self.check_round_end();
        Ok(())
    }

    fn advance_round(&mut self) -> std::result::Result<(), Rejection> {
        if !self.round.is_started() {
            return Err(Rejection::NotStarted);
        }
        if self.round.outcome() != Some(RoundOutcome::Completed) {
            return Err(Rejection::RoundNotComplete);
        }
        self.round.advance();
        self.begin_round();
        Ok(())
    }

    fn restart_round(&mut self) -> std::result::Result<(), Rejection> {
        if !self.round.is_started() {
            return Err(Rejection::NotStarted);
        }
        self.round.reset();
        self.begin_round();
        Ok(())
    }

    // === Helpers ===

    fn require_playing(&self) -> std::result::Result<(), Rejection> {
        if !self.round.is_started() {
            return Err(Rejection::NotStarted);
        }
        if self.round.outcome().is_some() {
            return Err(Rejection::RoundOver);
        }
        Ok(())
    }

    fn require_line_index(&self, index: usize) -> std::result::Result<(), Rejection> {
        if index >= self.line.len() {
            return Err(Rejection::QueueIndex {
                index,
                len: self.line.len(),
            });
        }
        Ok(())
    }

    fn require_animal(&self, entry: &DeckEntry) -> Result<()> {
        match self.catalog.get(entry.animal) {
            Some(_) => Ok(()),
            None => Err(SimError::UnknownAnimal(entry.animal)),
        }
    }

    /// Clear the wheel, rebuild the queue and the waiting line, and announce
    /// the round's budgets.
    fn begin_round(&mut self) {
        let retired = self.ring.clear();
        if !retired.is_empty() {
            debug!(retired = retired.len(), "wheel cleared");
        }
        self.controller = WheelController::new(self.config.wheel.spin_policy);

        if let Err(err) = self.queue.regenerate(&self.catalog, &mut self.deck_rng) {
            error!(%err, "could not rebuild the round queue");
            self.queue.clear();
        }
        self.line.clear();
        self.refill_line();

        info!(
            round = self.round.round(),
            deck = self.queue.deck_size(),
            "round ready"
        );
        self.events.push(SimEvent::RoundStarted {
            round: self.round.round(),
            required_score: self.round.required_score(),
        });
        self.events.push(SimEvent::ScoreChanged {
            score: self.round.score(),
        });
        self.events.push(SimEvent::EnergyChanged {
            energy: self.round.energy(),
        });
        self.events.push(SimEvent::SkipsChanged {
            remaining: self.round.skips_remaining(),
        });
    }

    /// Top the waiting line up from the queue, falling back to random
    /// generation when enabled.
    fn refill_line(&mut self) {
        let missing = self.config.deck.queue_size.saturating_sub(self.line.len());
        let drawn = if self.config.deck.generate_when_empty {
            self.queue.dequeue_or_generate(
                missing,
                &self.generator,
                &mut self.deck_rng,
                self.config.deck.fallback_modifier_chance,
            )
        } else {
            self.queue.dequeue(missing)
        };
        self.line.extend(drawn);

        self.events.push(SimEvent::QueueChanged {
            waiting: self.line.len(),
            pending: self.queue.len(),
        });
    }

    fn check_round_end(&mut self) {
        let round = self.round.round();
        let score = self.round.score();
        match self.round.evaluate() {
            Some(RoundOutcome::Completed) => {
                self.events.push(SimEvent::RoundCompleted { round, score });
            }
            Some(RoundOutcome::Failed) => {
                self.events.push(SimEvent::RoundFailed { round, score });
            }
            None => {}
        }
    }
}
