//! Keyboard mapping for the terminal frontend.

use crate::core::simulation::{InputEvent, SimulationState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the frontend to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendAction {
    Quit,
    Sim(InputEvent),
}

/// Map a key event to an action. Only presses count; repeats and releases
/// are ignored so holding the key does not chain jumps.
pub fn map_key(key: KeyEvent, state: SimulationState) -> Option<FrontendAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(FrontendAction::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(FrontendAction::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            let event = if state == SimulationState::Running {
                InputEvent::JumpRequested
            } else {
                InputEvent::StartRequested
            };
            Some(FrontendAction::Sim(event))
        }
        KeyCode::Enter => Some(FrontendAction::Sim(InputEvent::StartRequested)),
        _ => None,
    }
}
