//! Driver-facing simulation engine
//!
//! Bundles the session state with its tuning, random source and an event
//! queue so a host loop only has to forward commands and clock ticks.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::autopilot;
use super::events::GameEvent;
use super::snapshot::Snapshot;
use super::state::{Field, GamePhase, GameState};
use super::tick::{self, Command};
use crate::tuning::{Tuning, TuningError};

/// Most events kept between drains; older ones are dropped first
pub const MAX_QUEUED_EVENTS: usize = 1024;

/// A complete game: session state plus everything needed to advance it
///
/// Events from commands and ticks queue up until the host calls
/// [`Engine::drain_events`]. A host that never drains only ever holds the
/// newest [`MAX_QUEUED_EVENTS`].
#[derive(Debug, Clone)]
pub struct Engine<R = Pcg32> {
    tuning: Tuning,
    state: GameState,
    rng: R,
    events: Vec<GameEvent>,
}

impl Engine<Pcg32> {
    /// Engine with a seeded PCG stream
    pub fn new(tuning: Tuning, field: Field, seed: u64) -> Result<Self, TuningError> {
        log::debug!("Creating engine with seed {}", seed);
        Self::with_rng(tuning, field, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Engine with a caller-supplied random source
    pub fn with_rng(tuning: Tuning, field: Field, rng: R) -> Result<Self, TuningError> {
        tuning.validate()?;
        let state = GameState::new(&tuning, field);
        Ok(Self {
            tuning,
            state,
            rng,
            events: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Reset the session for a (possibly new) field size
    pub fn initialize(&mut self, field: Field) {
        tick::initialize(&mut self.state, &self.tuning, field);
    }

    pub fn start(&mut self) -> bool {
        let started = tick::start(&mut self.state, &self.tuning, &mut self.events);
        self.bound_events();
        started
    }

    pub fn activate(&mut self) -> bool {
        let flapped = tick::activate(&mut self.state, &self.tuning, &mut self.events);
        self.bound_events();
        flapped
    }

    pub fn restart(&mut self) {
        tick::restart(&mut self.state, &self.tuning, &mut self.events);
        self.bound_events();
    }

    pub fn apply(&mut self, command: Command) -> bool {
        let applied = tick::apply(&mut self.state, &self.tuning, command, &mut self.events);
        self.bound_events();
        applied
    }

    pub fn resize(&mut self, field: Field) {
        tick::resize(&mut self.state, field);
    }

    /// Advance one tick and return the frame to draw
    ///
    /// Any events the tick produces are queued; call
    /// [`Engine::drain_events`] once per frame to consume them.
    pub fn tick(&mut self) -> Snapshot {
        tick::tick(&mut self.state, &self.tuning, &mut self.rng, &mut self.events);
        self.bound_events();
        Snapshot::capture(&self.state)
    }

    /// Flap if the demo controller wants to, then tick
    pub fn tick_autopilot(&mut self) -> Snapshot {
        if autopilot::should_flap(&self.state, &self.tuning) {
            self.activate();
        }
        self.tick()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn bound_events(&mut self) {
        if self.events.len() > MAX_QUEUED_EVENTS {
            let excess = self.events.len() - MAX_QUEUED_EVENTS;
            self.events.drain(..excess);
            log::debug!("Event queue full, dropped {} oldest", excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(seed: u64) -> Engine {
        Engine::new(Tuning::default(), Field::new(800.0, 600.0), seed).expect("default tuning")
    }

    #[test]
    fn test_rejects_invalid_tuning() {
        let tuning = Tuning {
            spawn_interval: 0,
            ..Default::default()
        };
        assert!(Engine::new(tuning, Field::default(), 1).is_err());
    }

    #[test]
    fn test_lifecycle_through_engine() {
        let mut engine = engine(5);
        assert_eq!(engine.phase(), GamePhase::Idle);

        let frame = engine.tick();
        assert_eq!(frame.elapsed_ticks, 0);
        assert!(!engine.activate());

        assert!(engine.start());
        let frame = engine.tick();
        assert_eq!(frame.phase, GamePhase::Running);
        assert_eq!(frame.obstacles.len(), 1);

        // Free fall from mid-field hits the ground well within 200 ticks
        for _ in 0..200 {
            engine.tick();
        }
        assert_eq!(engine.phase(), GamePhase::Over);
        let events = engine.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::Started));
        assert!(events.last().is_some_and(|e| e.is_terminal()));
        assert!(engine.events().is_empty());

        engine.restart();
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.score(), 0);
        assert!(engine.snapshot().obstacles.is_empty());
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let mut a = engine(77);
        let mut b = engine(77);
        a.start();
        b.start();
        for _ in 0..130 {
            a.tick_autopilot();
            b.tick_autopilot();
        }
        assert_eq!(a.state(), b.state());
        assert_eq!(a.snapshot().obstacles.len(), 2);
    }

    #[test]
    fn test_autopilot_clears_first_obstacle() {
        let mut engine = engine(42);
        engine.start();
        for _ in 0..2000 {
            if engine.phase() != GamePhase::Running {
                break;
            }
            engine.tick_autopilot();
        }
        assert!(engine.score() >= 1);
        assert!(engine.events().contains(&GameEvent::Scored { score: 1 }));
    }

    #[test]
    fn test_undrained_queue_keeps_newest_events() {
        let mut engine = engine(9);
        engine.start();
        for _ in 0..MAX_QUEUED_EVENTS + 10 {
            assert!(engine.activate());
        }

        let events = engine.events();
        assert_eq!(events.len(), MAX_QUEUED_EVENTS);
        // `Started` was the oldest and went first
        assert!(events.iter().all(|e| *e == GameEvent::Flapped));

        engine.tick();
        assert_eq!(engine.events().len(), MAX_QUEUED_EVENTS);
        assert_eq!(
            engine.events().last(),
            Some(&GameEvent::ObstacleSpawned { elapsed_ticks: 0 })
        );
    }

    #[test]
    fn test_resize_keeps_session() {
        let mut engine = engine(1);
        engine.start();
        engine.tick();
        engine.resize(Field::new(1200.0, 900.0));
        assert_eq!(engine.state().field.width, 1200.0);
        assert_eq!(engine.phase(), GamePhase::Running);

        engine.initialize(Field::new(1200.0, 900.0));
        assert_eq!(engine.state().actor.pos.y, 450.0);
        assert!(engine.state().obstacles.is_empty());
    }
}
