//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use ferris_wheel::animals::{
    AnimalCatalog, AnimalDefinition, AnimalId, DeckEntry, EffectSpec, EffectTarget, EffectTrigger,
    Modifier,
};
use ferris_wheel::core::{DeckConfig, RoundConfig, SimConfig};
use ferris_wheel::events::SimEvent;
use ferris_wheel::session::Session;

/// Fires a zero-point effect on every trigger so each firing shows up as an
/// event; unloading adds 5 points.
pub const PROBE: AnimalId = AnimalId::new(1);
/// Three points, no effects.
pub const ROCK: AnimalId = AnimalId::new(2);
/// Spins the wheel two steps when it passes the top.
pub const SPINNER: AnimalId = AnimalId::new(3);
/// Spins the wheel one step when loaded.
pub const LOADER: AnimalId = AnimalId::new(4);
/// Five points, no effects.
pub const FIVE: AnimalId = AnimalId::new(5);
/// Four points, no effects.
pub const FOUR: AnimalId = AnimalId::new(6);

pub fn catalog() -> AnimalCatalog {
    let mut catalog = AnimalCatalog::new();

    let mut probe = AnimalDefinition::new(PROBE, "Probe", 0);
    for trigger in EffectTrigger::ALL {
        let amount = if trigger == EffectTrigger::OnUnload { 5.0 } else { 0.0 };
        probe = probe.with_effect(EffectSpec::add_points(trigger, EffectTarget::Self_, amount));
    }

    for definition in [
        probe,
        AnimalDefinition::new(ROCK, "Rock", 3),
        AnimalDefinition::new(SPINNER, "Spinner", 1)
            .with_effect(EffectSpec::spin_wheel(EffectTrigger::OnPassTop, 2.0)),
        AnimalDefinition::new(LOADER, "Loader", 1)
            .with_effect(EffectSpec::spin_wheel(EffectTrigger::OnLoad, 1.0)),
        AnimalDefinition::new(FIVE, "Five", 5),
        AnimalDefinition::new(FOUR, "Four", 4),
    ] {
        catalog.register(definition).unwrap();
    }
    catalog
}

/// Default config without random refills, so the line holds only deck
/// animals.
pub fn config() -> SimConfig {
    SimConfig::default().with_seed(42).with_deck(DeckConfig {
        generate_when_empty: false,
        ..DeckConfig::default()
    })
}

pub fn round_config(required: i64, energy: u32) -> RoundConfig {
    RoundConfig {
        initial_required_score: required,
        energy_per_day: energy,
        ..RoundConfig::default()
    }
}

/// A started session whose deck is exactly `deck`.
pub fn session_with(config: SimConfig, deck: &[(AnimalId, Modifier)]) -> Session {
    let mut session = Session::new(config, Arc::new(catalog()));
    let entries = deck
        .iter()
        .map(|&(animal, modifier)| DeckEntry::new(animal, modifier))
        .collect();
    session.start_with_deck(entries).unwrap();
    session.drain_events();
    session
}

/// Compact trace of wheel motion and effect firings.
pub fn trace(events: &[SimEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            SimEvent::WheelStepped { .. } => Some("step".to_string()),
            SimEvent::EffectApplied { trigger, .. } => Some(format!("{trigger:?}")),
            SimEvent::WheelStopped { .. } => Some("stop".to_string()),
            SimEvent::CartOpened { .. } => Some("open".to_string()),
            SimEvent::ScoreChanged { .. } => Some("score".to_string()),
            SimEvent::AnimalUnloaded { .. } => Some("unload".to_string()),
            SimEvent::DayEnded { .. } => Some("day_end".to_string()),
            _ => None,
        })
        .collect()
}

/// Number of times `trigger` fired.
pub fn fired(events: &[SimEvent], trigger: EffectTrigger) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, SimEvent::EffectApplied { trigger: t, .. } if *t == trigger))
        .count()
}
