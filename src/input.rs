use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Heading of the snake on the grid.
///
/// `None` means the snake is stationary; it only occurs before the first
/// turn when a run is started without a heading.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// All four cardinal directions.
    pub const CARDINAL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction. `None` is its own opposite.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }

    /// Column/row offset of one step in this direction. Rows grow downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::None => (0, 0),
        }
    }

    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    !next.is_none() && (current.is_none() || next != current.opposite())
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Restart,
    Quit,
}

/// Maps one key press to a game input. The mapping is fixed.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ') => GameInput::Pause,
        KeyCode::Enter => GameInput::Restart,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Polls the terminal for keyboard input.
#[derive(Debug, Clone, Copy)]
pub struct InputHandler {
    poll_timeout: Duration,
}

impl InputHandler {
    #[must_use]
    pub fn new(poll_timeout: Duration) -> Self {
        Self { poll_timeout }
    }

    /// Waits up to the poll timeout and returns the next mapped input, if any.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key_event(key)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{Direction, GameInput, direction_change_is_valid, map_key_event};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::None.opposite(), Direction::None);
    }

    #[test]
    fn direction_change_rejects_reverse() {
        for direction in Direction::CARDINAL {
            assert!(!direction_change_is_valid(direction, direction.opposite()));
        }

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Right));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn stationary_snake_accepts_any_cardinal_direction() {
        for direction in Direction::CARDINAL {
            assert!(direction_change_is_valid(Direction::None, direction));
        }
        assert!(!direction_change_is_valid(Direction::None, Direction::None));
        assert!(!direction_change_is_valid(Direction::Left, Direction::None));
    }

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(
            map_key_event(press(KeyCode::Left)),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('w'))),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(map_key_event(press(KeyCode::Char(' '))), Some(GameInput::Pause));
        assert_eq!(map_key_event(press(KeyCode::Enter)), Some(GameInput::Restart));
        assert_eq!(map_key_event(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(map_key_event(press(KeyCode::Tab)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(map_key_event(release), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event(key), Some(GameInput::Quit));
    }
}
