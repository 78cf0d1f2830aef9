//! Flappy Sim entry point
//!
//! Native builds run a headless demo session flown by the autopilot:
//!
//! ```text
//! flappy-sim [seed] [max_ticks]
//! ```
//!
//! Set `FLAPPY_TUNING` to a JSON file to override gameplay constants. The
//! browser build is driven from JavaScript through `flappy_sim::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use flappy_sim::consts::TICKS_PER_SECOND;
    use flappy_sim::sim::{Engine, Field, GameEvent, GamePhase};
    use flappy_sim::{HighScores, Tuning};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("seed must be an unsigned integer, got {arg:?}"))?,
        None => 404,
    };
    let max_ticks = match args.next() {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("max_ticks must be an unsigned integer, got {arg:?}"))?,
        None => u64::from(TICKS_PER_SECOND) * 120,
    };

    let tuning = match std::env::var("FLAPPY_TUNING") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {path}"))?;
            Tuning::from_json(&json).with_context(|| format!("loading tuning file {path}"))?
        }
        Err(_) => Tuning::default(),
    };

    log::info!("Flappy Sim (native, headless) starting with seed {}", seed);
    let mut engine = Engine::new(tuning, Field::default(), seed)?;
    engine.start();

    for _ in 0..max_ticks {
        if engine.phase() != GamePhase::Running {
            break;
        }
        engine.tick_autopilot();
        for event in engine.drain_events() {
            match event {
                GameEvent::Flapped | GameEvent::ObstacleSpawned { .. } => {
                    log::trace!("{:?}", event)
                }
                _ => log::info!("{:?}", event),
            }
        }
    }

    let state = engine.state();
    let seconds = state.elapsed_ticks as f64 / f64::from(TICKS_PER_SECOND);
    println!(
        "Final score: {} after {} ticks ({:.1}s, {})",
        state.score,
        state.elapsed_ticks,
        seconds,
        state.phase.as_str()
    );

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0);
    let mut high_scores = HighScores::load();
    if let Some(rank) = high_scores.add_score(state.score, state.elapsed_ticks, timestamp) {
        high_scores.save();
        println!("Leaderboard rank: {}", rank);
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser entry point is `flappy_sim::web::WebGame`
}
