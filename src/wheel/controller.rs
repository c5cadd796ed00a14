//! Rotation state machine.
//!
//! A rotation is resolved instantly and completely: every step, the stop
//! phase, the unload and (when energy runs out) the day-end pass happen
//! inside one call, recorded as events for the presentation to replay.
//!
//! Per step:
//! 1. Move the top index one position.
//! 2. Fire `OnRotate` on every occupied cart, in ring order.
//! 3. Fire `OnPassTop` on the top cart, then `OnPassBottom` on the bottom.
//!
//! After the last step: `OnStop` on every occupied cart, `OnStopTop`,
//! `OnStopBottom`, then the bottom cart opens and its rider unloads and
//! scores. If energy is now zero, each remaining rider gets `OnDayEnd` and
//! its points are deducted from the score.

use std::collections::VecDeque;

use smallvec::SmallVec;
use tracing::debug;

use super::resolver::{EffectResolver, ResolverContext, SpinRequest};
use super::ring::{CartRing, Direction};
use crate::animals::EffectTrigger;
use crate::core::{Rejection, SpinPolicy};
use crate::events::{EventLog, SimEvent};
use crate::round::RoundState;

/// Controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WheelState {
    #[default]
    Idle,
    Rotating,
}

/// Everything a rotation mutates.
pub struct WheelContext<'a> {
    pub ring: &'a mut CartRing,
    pub round: &'a mut RoundState,
    pub effects: ResolverContext<'a>,
}

/// Drives rotations and schedules spin effects.
#[derive(Clone, Debug, Default)]
pub struct WheelController {
    state: WheelState,
    spin_policy: SpinPolicy,
    pending: VecDeque<SpinRequest>,
}

impl WheelController {
    /// Create an idle controller.
    #[must_use]
    pub fn new(spin_policy: SpinPolicy) -> Self {
        Self {
            state: WheelState::Idle,
            spin_policy,
            pending: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> WheelState {
        self.state
    }

    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.state == WheelState::Rotating
    }

    /// Spins waiting for the current rotation to finish.
    #[must_use]
    pub fn pending_spins(&self) -> usize {
        self.pending.len()
    }

    /// Rotate `steps` positions, then run any spins queued along the way.
    ///
    /// Rejected without side effects while rotating, for zero steps, or when
    /// the round lacks the energy.
    pub fn rotate(
        &mut self,
        direction: Direction,
        steps: u32,
        ctx: &mut WheelContext<'_>,
    ) -> Result<(), Rejection> {
        self.run_rotation(direction, steps, ctx)?;
        self.run_pending(ctx);
        Ok(())
    }

    /// Handle a spin requested by an effect.
    ///
    /// While idle the spin rotates immediately; if that rotation is refused
    /// the spin is dropped. While rotating it follows the spin policy.
    pub fn spin(&mut self, request: SpinRequest, ctx: &mut WheelContext<'_>) {
        if self.is_rotating() {
            self.defer(request, ctx.effects.events);
            return;
        }
        if let Err(reason) = self.rotate(request.direction, request.steps, ctx) {
            drop_spin(request, &reason, ctx.effects.events);
        }
    }

    /// End the day now: spend all energy and run the day-end pass.
    /// Returns the energy spent.
    pub fn end_day(&mut self, ctx: &mut WheelContext<'_>) -> Result<u32, Rejection> {
        if self.is_rotating() {
            return Err(Rejection::AlreadyRotating);
        }

        let drained = ctx.round.drain_energy();
        ctx.effects.events.push(SimEvent::EnergyChanged { energy: 0 });
        debug!(drained, "day ended early");

        self.state = WheelState::Rotating;
        self.day_end(ctx);
        self.state = WheelState::Idle;

        self.run_pending(ctx);
        Ok(drained)
    }

    fn run_rotation(
        &mut self,
        direction: Direction,
        steps: u32,
        ctx: &mut WheelContext<'_>,
    ) -> Result<(), Rejection> {
        if self.is_rotating() {
            return Err(Rejection::AlreadyRotating);
        }
        if steps == 0 {
            return Err(Rejection::ZeroSteps);
        }
        if !ctx.round.consume_energy(steps) {
            return Err(Rejection::InsufficientEnergy {
                required: steps,
                available: ctx.round.energy(),
            });
        }
        ctx.effects.events.push(SimEvent::EnergyChanged {
            energy: ctx.round.energy(),
        });

        self.state = WheelState::Rotating;
        debug!(?direction, steps, top = ctx.ring.top(), "rotation started");

        ctx.ring.advance(direction, steps, |ring| {
            self.after_step(ring, direction, &mut ctx.effects);
        });
        self.stop(ctx);

        self.state = WheelState::Idle;
        debug!(top = ctx.ring.top(), energy = ctx.round.energy(), "rotation finished");
        Ok(())
    }

    fn run_pending(&mut self, ctx: &mut WheelContext<'_>) {
        while let Some(request) = self.pending.pop_front() {
            debug!(steps = request.steps, source = request.source, "running queued spin");
            if let Err(reason) = self.run_rotation(request.direction, request.steps, ctx) {
                drop_spin(request, &reason, ctx.effects.events);
            }
        }
    }

    fn after_step(&mut self, ring: &mut CartRing, direction: Direction, effects: &mut ResolverContext<'_>) {
        effects.events.push(SimEvent::WheelStepped {
            top: ring.top(),
            direction,
        });

        self.fire_all(ring, EffectTrigger::OnRotate, effects);
        let (top, bottom) = (ring.top(), ring.bottom());
        self.fire(ring, top, EffectTrigger::OnPassTop, effects);
        self.fire(ring, bottom, EffectTrigger::OnPassBottom, effects);
    }

    fn stop(&mut self, ctx: &mut WheelContext<'_>) {
        let ring = &mut *ctx.ring;
        let effects = &mut ctx.effects;
        effects.events.push(SimEvent::WheelStopped { top: ring.top() });

        self.fire_all(ring, EffectTrigger::OnStop, effects);
        let (top, bottom) = (ring.top(), ring.bottom());
        self.fire(ring, top, EffectTrigger::OnStopTop, effects);
        self.fire(ring, bottom, EffectTrigger::OnStopBottom, effects);

        effects.events.push(SimEvent::CartOpened { cart: bottom });
        if ring.is_occupied(bottom) {
            self.fire(ring, bottom, EffectTrigger::OnUnload, effects);
            if let Some(animal) = ring.unload(bottom) {
                let points = animal.points();
                if ctx.round.add_score(points) {
                    effects.events.push(SimEvent::ScoreChanged {
                        score: ctx.round.score(),
                    });
                }
                debug!(cart = bottom, animal = %animal.display_name(), points, "animal unloaded");
                effects.events.push(SimEvent::AnimalUnloaded {
                    cart: bottom,
                    animal,
                    points,
                });
            }
        }

        if ctx.round.energy() == 0 {
            self.day_end(ctx);
        }
    }

    /// Fire `OnDayEnd` on each rider and deduct its points, cart by cart in
    /// ring order.
    fn day_end(&mut self, ctx: &mut WheelContext<'_>) {
        let ring = &mut *ctx.ring;
        let effects = &mut ctx.effects;
        let mut deducted = 0i64;

        let carts: SmallVec<[usize; 16]> = ring.occupied().collect();
        for cart in carts {
            self.fire(ring, cart, EffectTrigger::OnDayEnd, effects);
            let Some(points) = ring.get(cart).map(|a| a.points()) else {
                continue;
            };
            if ctx.round.add_score(-points) {
                deducted += points;
                effects.events.push(SimEvent::ScoreChanged {
                    score: ctx.round.score(),
                });
            }
        }

        debug!(deducted, score = ctx.round.score(), "day-end deduction");
        effects.events.push(SimEvent::DayEnded { deducted });
    }

    fn fire_all(&mut self, ring: &mut CartRing, trigger: EffectTrigger, effects: &mut ResolverContext<'_>) {
        let carts: SmallVec<[usize; 16]> = ring.occupied().collect();
        for cart in carts {
            self.fire(ring, cart, trigger, effects);
        }
    }

    fn fire(
        &mut self,
        ring: &mut CartRing,
        cart: usize,
        trigger: EffectTrigger,
        effects: &mut ResolverContext<'_>,
    ) {
        for request in EffectResolver::apply_effects(ring, cart, trigger, effects) {
            self.defer(request, effects.events);
        }
    }

    fn defer(&mut self, request: SpinRequest, events: &mut EventLog) {
        match self.spin_policy {
            SpinPolicy::Drop => {
                debug!(steps = request.steps, source = request.source, "spin dropped mid-rotation");
                events.push(SimEvent::SpinDropped {
                    direction: request.direction,
                    steps: request.steps,
                });
            }
            SpinPolicy::Queue => {
                debug!(steps = request.steps, source = request.source, "spin queued");
                self.pending.push_back(request);
                events.push(SimEvent::SpinQueued {
                    direction: request.direction,
                    steps: request.steps,
                });
            }
        }
    }
}

fn drop_spin(request: SpinRequest, reason: &Rejection, events: &mut EventLog) {
    debug!(steps = request.steps, %reason, "spin dropped");
    events.push(SimEvent::SpinDropped {
        direction: request.direction,
        steps: request.steps,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animals::{AnimalDefinition, AnimalId, DeckAnimal, EffectSpec, EffectTarget, Modifier};
    use crate::core::{GameRng, RoundConfig, ScoreDeltaPolicy, ScoringConfig};
    use std::sync::Arc;

    struct Fixture {
        ring: CartRing,
        round: RoundState,
        rng: GameRng,
        events: EventLog,
    }

    impl Fixture {
        fn new(energy: u32) -> Self {
            let config = RoundConfig {
                energy_per_day: energy,
                ..RoundConfig::default()
            };
            let mut round = RoundState::new(config, ScoreDeltaPolicy::Signed);
            round.start_first_round();
            Self {
                ring: CartRing::new(8),
                round,
                rng: GameRng::new(1),
                events: EventLog::new(),
            }
        }

        fn ctx(&mut self) -> WheelContext<'_> {
            WheelContext {
                ring: &mut self.ring,
                round: &mut self.round,
                effects: ResolverContext::new(&mut self.rng, &mut self.events, ScoringConfig::default()),
            }
        }
    }

    fn rider(effect: EffectSpec) -> DeckAnimal {
        DeckAnimal::new(
            Arc::new(AnimalDefinition::new(AnimalId::new(1), "Rider", 2).with_effect(effect)),
            Modifier::None,
        )
    }

    #[test]
    fn test_rejections_change_nothing() {
        let mut fixture = Fixture::new(3);
        let mut controller = WheelController::new(SpinPolicy::Drop);

        assert_eq!(
            controller.rotate(Direction::CounterClockwise, 0, &mut fixture.ctx()),
            Err(Rejection::ZeroSteps)
        );
        assert_eq!(
            controller.rotate(Direction::CounterClockwise, 4, &mut fixture.ctx()),
            Err(Rejection::InsufficientEnergy {
                required: 4,
                available: 3
            })
        );
        assert_eq!(fixture.ring.top(), 0);
        assert_eq!(fixture.round.energy(), 3);
        assert!(fixture.events.is_empty());
        assert_eq!(controller.state(), WheelState::Idle);
    }

    #[test]
    fn test_rotate_spends_energy() {
        let mut fixture = Fixture::new(10);
        let mut controller = WheelController::new(SpinPolicy::Drop);

        controller
            .rotate(Direction::Clockwise, 3, &mut fixture.ctx())
            .unwrap();

        assert_eq!(fixture.ring.top(), 5);
        assert_eq!(fixture.round.energy(), 7);
        assert_eq!(
            fixture.events.events()[0],
            SimEvent::EnergyChanged { energy: 7 }
        );
    }

    #[test]
    fn test_idle_spin_rotates() {
        let mut fixture = Fixture::new(10);
        let mut controller = WheelController::new(SpinPolicy::Drop);
        let request = SpinRequest {
            source: 4,
            direction: Direction::CounterClockwise,
            steps: 2,
        };

        controller.spin(request, &mut fixture.ctx());
        assert_eq!(fixture.ring.top(), 2);
        assert_eq!(fixture.round.energy(), 8);
    }

    #[test]
    fn test_idle_spin_without_energy_dropped() {
        let mut fixture = Fixture::new(1);
        let mut controller = WheelController::new(SpinPolicy::Queue);
        let request = SpinRequest {
            source: 4,
            direction: Direction::Clockwise,
            steps: 2,
        };

        controller.spin(request, &mut fixture.ctx());
        assert_eq!(fixture.ring.top(), 0);
        assert_eq!(
            fixture.events.drain(),
            vec![SimEvent::SpinDropped {
                direction: Direction::Clockwise,
                steps: 2
            }]
        );
    }

    #[test]
    fn test_end_day_runs_day_end_triggers() {
        let mut fixture = Fixture::new(5);
        fixture
            .ring
            .load(rider(EffectSpec::add_points(
                EffectTrigger::OnDayEnd,
                EffectTarget::Self_,
                4.0,
            )))
            .unwrap();
        let mut controller = WheelController::new(SpinPolicy::Drop);

        assert_eq!(controller.end_day(&mut fixture.ctx()), Ok(5));
        assert_eq!(fixture.round.energy(), 0);
        assert_eq!(fixture.round.score(), -6);
        assert!(fixture
            .events
            .events()
            .contains(&SimEvent::DayEnded { deducted: 6 }));
    }
}
