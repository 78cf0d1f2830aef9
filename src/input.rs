//! Raw input to engine command mapping
//!
//! One action key drives the whole game: it starts from the idle screen,
//! flaps while running and restarts after a crash. Clicks and taps on the
//! field only ever flap.

use crate::sim::{Command, GamePhase};

/// Input as the host sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// Space bar
    ActionKey,
    /// Click or touch on the play field
    Pointer,
    StartButton,
    RestartButton,
}

/// Resolve an input against the current phase
pub fn command_for(phase: GamePhase, input: RawInput) -> Command {
    match input {
        RawInput::ActionKey => match phase {
            GamePhase::Idle => Command::Start,
            GamePhase::Running => Command::Activate,
            GamePhase::Over => Command::Restart,
        },
        RawInput::Pointer => Command::Activate,
        RawInput::StartButton => Command::Start,
        RawInput::RestartButton => Command::Restart,
    }
}

/// Map a DOM `KeyboardEvent.code` to an input
pub fn from_key_code(code: &str) -> Option<RawInput> {
    match code {
        "Space" => Some(RawInput::ActionKey),
        _ => None,
    }
}
