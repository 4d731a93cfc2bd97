use crossterm::event::KeyCode;
use minofall_engine::{Command, RotationMode};

/// Game command bound to `code`, if any.
///
/// Pause and quit are handled by the app itself.
pub(super) fn command_for_key(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Up | KeyCode::Char('x' | 'X') => Command::Rotate(RotationMode::Clockwise),
        KeyCode::Char('z' | 'Z') => Command::Rotate(RotationMode::CounterClockwise),
        KeyCode::Char(' ') => Command::HardDrop,
        _ => return None,
    };
    Some(command)
}
