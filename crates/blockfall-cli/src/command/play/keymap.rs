use blockfall_engine::Command;
use crossterm::event::KeyCode;

use crate::ui::widgets::KeyBinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    Quit,
}

pub fn action_for_key(code: KeyCode) -> Option<Action> {
    let command = match code {
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Up => Command::Rotate,
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('c' | 'C') => Command::Hold,
        KeyCode::Char('r' | 'R') => Command::Restart,
        KeyCode::Char('p' | 'P') => Command::TogglePause,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => return Some(Action::Quit),
        _ => return None,
    };
    Some(Action::Game(command))
}

pub const PLAYING_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["C"], "Hold"),
    (&["P"], "Pause"),
    (&["R"], "Restart"),
    (&["Q"], "Quit"),
];

pub const PAUSED_BINDINGS: &[KeyBinding] = &[
    (&["P"], "Resume"),
    (&["R"], "Restart"),
    (&["Q"], "Quit"),
];

pub const GAME_OVER_BINDINGS: &[KeyBinding] = &[(&["R"], "Restart"), (&["Q"], "Quit")];
