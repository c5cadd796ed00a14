//! Event buffering and delivery.
//!
//! The session appends to an `EventLog` as it runs. Presentation code either
//! drains the log once per tick, or flushes it into a [`PresentationSink`].
//! The core never waits on either.

use super::event::SimEvent;

/// Consumer of simulation events.
pub trait PresentationSink {
    /// Receive one event. Called in simulation order.
    fn on_event(&mut self, event: &SimEvent);
}

impl PresentationSink for Vec<SimEvent> {
    fn on_event(&mut self, event: &SimEvent) {
        self.push(event.clone());
    }
}

/// Ordered buffer of undelivered events.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Undelivered events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every buffered event.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver every buffered event to `sink`, emptying the log.
    pub fn flush_to(&mut self, sink: &mut impl PresentationSink) {
        for event in self.events.drain(..) {
            sink.on_event(&event);
        }
    }

    /// Discard buffered events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_log() {
        let mut log = EventLog::new();
        log.push(SimEvent::ScoreChanged { score: 3 });
        log.push(SimEvent::EnergyChanged { energy: 5 });

        assert_eq!(log.len(), 2);
        let events = log.drain();
        assert_eq!(events[0], SimEvent::ScoreChanged { score: 3 });
        assert!(log.is_empty());
    }

    #[test]
    fn test_flush_to_vec_sink() {
        let mut log = EventLog::new();
        log.push(SimEvent::SkipsChanged { remaining: 1 });

        let mut sink: Vec<SimEvent> = Vec::new();
        log.flush_to(&mut sink);

        assert_eq!(sink, vec![SimEvent::SkipsChanged { remaining: 1 }]);
        assert!(log.is_empty());
    }

    struct NameSink(Vec<&'static str>);

    impl PresentationSink for NameSink {
        fn on_event(&mut self, event: &SimEvent) {
            self.0.push(event.name());
        }
    }

    #[test]
    fn test_flush_to_custom_sink() {
        let mut log = EventLog::new();
        log.push(SimEvent::WheelStopped { top: 2 });
        log.push(SimEvent::CartOpened { cart: 6 });

        let mut sink = NameSink(Vec::new());
        log.flush_to(&mut sink);

        assert_eq!(sink.0, vec!["wheel_stopped", "cart_opened"]);
    }
}
