//! Browser host bindings
//!
//! Exposes the engine to a JavaScript page that owns the canvas and the
//! `requestAnimationFrame` loop. JS calls `tick()` once per frame and draws
//! from `snapshot_json()`; audio cues are played here from drained events.

use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, SoundCue};
use crate::highscores::HighScores;
use crate::input::{self, RawInput};
use crate::settings::Settings;
use crate::sim::{Command, Engine, Field};
use crate::tuning::Tuning;

/// Install logging and the panic hook; idempotent
fn init_platform() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WebGame {
    engine: Engine,
    audio: AudioManager,
    high_scores: HighScores,
    last_rank: Option<usize>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create an idle game. `tuning_json` may be empty for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, tuning_json: &str) -> Result<WebGame, JsError> {
        init_platform();

        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json)?
        };
        let seed = js_sys::Date::now() as u64;
        let engine = Engine::new(tuning, Field::new(width, height), seed)?;
        let settings = Settings::load();
        log::info!("Flappy Sim ready ({}x{}, seed {})", width, height, seed);

        Ok(WebGame {
            engine,
            audio: AudioManager::new(&settings),
            high_scores: HighScores::load(),
            last_rank: None,
        })
    }

    /// Space bar: start, flap or restart depending on phase
    pub fn press_action(&mut self) {
        self.handle(RawInput::ActionKey);
    }

    /// Forward a `KeyboardEvent.code`; returns true if the key was used
    pub fn key_down(&mut self, code: &str) -> bool {
        match input::from_key_code(code) {
            Some(raw) => {
                self.handle(raw);
                true
            }
            None => false,
        }
    }

    /// Click or tap on the canvas
    pub fn pointer(&mut self) {
        self.handle(RawInput::Pointer);
    }

    pub fn start(&mut self) {
        self.handle(RawInput::StartButton);
    }

    pub fn restart(&mut self) {
        self.handle(RawInput::RestartButton);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.resize(Field::new(width, height));
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        self.engine.tick();
        self.flush_events();
    }

    /// Current frame as JSON for the renderer
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(self.engine.snapshot().to_json()?)
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    /// "idle", "running" or "over"
    pub fn phase(&self) -> String {
        self.engine.phase().as_str().to_string()
    }

    /// Leaderboard rank of the last finished session, 0 if unranked
    pub fn last_rank(&self) -> usize {
        self.last_rank.unwrap_or(0)
    }

    pub fn best_score(&self) -> u32 {
        self.high_scores.top_score().unwrap_or(0)
    }

    pub fn set_volume(&mut self, master: f32, muted: bool) {
        let mut settings = Settings::load();
        settings.set_master_volume(master);
        settings.muted = muted;
        settings.save();
        self.audio.apply_settings(&settings);
    }
}

impl WebGame {
    fn handle(&mut self, raw: RawInput) {
        let command = input::command_for(self.engine.phase(), raw);
        // A new session clears the previous result
        if self.engine.apply(command) && command != Command::Activate {
            self.last_rank = None;
        }
        self.flush_events();
    }

    fn flush_events(&mut self) {
        for event in self.engine.drain_events() {
            if let Some(cue) = SoundCue::for_event(&event) {
                self.audio.play(cue);
            }
            if event.is_terminal() {
                self.record_session();
            }
        }
    }

    fn record_session(&mut self) {
        let state = self.engine.state();
        self.last_rank =
            self.high_scores
                .add_score(state.score, state.elapsed_ticks, js_sys::Date::now());
        if self.last_rank.is_some() {
            self.high_scores.save();
        }
    }
}
