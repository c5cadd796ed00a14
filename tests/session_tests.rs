//! End-to-end session tests over the bundled data set.

use ferris_wheel::core::SimConfig;
use ferris_wheel::events::{PresentationSink, SimEvent};
use ferris_wheel::round::RoundOutcome;
use ferris_wheel::session::{Command, Session};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("ferris_wheel=debug"))
        .with_test_writer()
        .try_init();
}

/// Counts events by kind as a renderer would consume them.
#[derive(Default)]
struct CountingSink {
    steps: usize,
    unloads: usize,
    scored: i64,
    finished: Option<SimEvent>,
}

impl PresentationSink for CountingSink {
    fn on_event(&mut self, event: &SimEvent) {
        match event {
            SimEvent::WheelStepped { .. } => self.steps += 1,
            SimEvent::AnimalUnloaded { points, .. } => {
                self.unloads += 1;
                self.scored += points;
            }
            SimEvent::RoundCompleted { .. } | SimEvent::RoundFailed { .. } => {
                self.finished = Some(event.clone());
            }
            _ => {}
        }
    }
}

/// Play a whole day one step at a time, loading the bottom cart while
/// there is still energy for a full revolution.
fn play_day(session: &mut Session, sink: &mut CountingSink) {
    let revolution = session.ring().len() as u32;
    while session.round().outcome().is_none() {
        if !session.waiting_line().is_empty() && session.round().energy() >= revolution {
            let _ = session.apply(Command::LoadAnimal { queue_index: 0 });
        }
        if session.round().outcome().is_some() {
            break;
        }
        session.apply(Command::RotateWheel { steps: 1 }).unwrap();
        session.flush_events(sink);
    }
    session.flush_events(sink);
}

#[test]
fn test_full_day_with_builtin_data() {
    init_tracing();

    let mut session = Session::with_builtin_catalog(SimConfig::default().with_seed(2024)).unwrap();
    session.start(0).unwrap();
    assert_eq!(session.waiting_line().len(), 3);

    let mut sink = CountingSink::default();
    play_day(&mut session, &mut sink);

    assert_eq!(session.round().energy(), 0);
    assert!(sink.steps >= 16);
    assert!(sink.unloads > 0);
    assert!(sink.scored > 0);
    assert!(session.events().is_empty());

    let outcome = session.round().outcome().unwrap();
    match (&sink.finished, outcome) {
        (Some(SimEvent::RoundCompleted { .. }), RoundOutcome::Completed)
        | (Some(SimEvent::RoundFailed { .. }), RoundOutcome::Failed) => {}
        other => panic!("outcome and event disagree: {other:?}"),
    }
}

#[test]
fn test_several_rounds() {
    init_tracing();

    let config = SimConfig::from_json(
        r#"{
            "seed": 31,
            "round": { "initial_required_score": 1, "required_score_increase": 0 }
        }"#,
    )
    .unwrap();
    let mut session = Session::with_builtin_catalog(config).unwrap();
    session.start(1).unwrap();

    let mut sink = CountingSink::default();
    for round in 1..=3 {
        assert_eq!(session.round().round(), round);
        play_day(&mut session, &mut sink);
        if session.round().outcome() == Some(RoundOutcome::Failed) {
            session.apply(Command::RestartRound).unwrap();
            play_day(&mut session, &mut sink);
        }
        if session.round().outcome() == Some(RoundOutcome::Completed) {
            let offers = session.reward_offers(3, 0.0);
            if let Some(offer) = offers.first() {
                session.add_animal_to_deck(offer).unwrap();
            }
            session.apply(Command::AdvanceRound).unwrap();
        } else {
            break;
        }
    }

    assert!(session.round().round() >= 2);
}

#[test]
fn test_unknown_starter_deck() {
    let mut session = Session::with_builtin_catalog(SimConfig::default()).unwrap();
    assert!(session.start(99).is_err());
    assert!(!session.round().is_started());
}

#[test]
fn test_invalid_config_is_clamped() {
    let session =
        Session::with_builtin_catalog(SimConfig::default().with_cart_count(5)).unwrap();
    assert_eq!(session.config().wheel.cart_count, 6);
    assert_eq!(session.ring().len(), 6);
    assert_eq!(session.ring().bottom(), 3);
}
