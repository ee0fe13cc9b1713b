//! Key mapping from terminal events to game commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use twenty48_grid::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Restart,
    Quit,
}

/// Map a key event to a command. Releases, repeats and unbound keys map to `None`.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Left => Some(Command::Move(Move::Left)),
        KeyCode::Right => Some(Command::Move(Move::Right)),
        KeyCode::Up => Some(Command::Move(Move::Up)),
        KeyCode::Down => Some(Command::Move(Move::Down)),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('r' | 'R') | KeyCode::Enter => Some(Command::Restart),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
