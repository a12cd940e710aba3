use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Difficulty, Direction};

/// What a key press means to the rest of the program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A command for the game controller
    Game(Command),
    /// Pick a speed preset (only honored while idle)
    SelectDifficulty(Difficulty),
    /// Leave the program
    Quit,
    /// Key has no binding
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Game(Command::Move(Direction::Up)),
            KeyCode::Down => KeyAction::Game(Command::Move(Direction::Down)),
            KeyCode::Left => KeyAction::Game(Command::Move(Direction::Left)),
            KeyCode::Right => KeyAction::Game(Command::Move(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Game(Command::Move(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Game(Command::Move(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Game(Command::Move(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Game(Command::Move(Direction::Right))
            }

            // Start from idle, pause/resume while playing, play again after
            KeyCode::Char(' ') => KeyAction::Game(Command::StartOrToggle),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Game(Command::Reset),

            // Speed presets
            KeyCode::Char('1') => KeyAction::SelectDifficulty(Difficulty::Slow),
            KeyCode::Char('2') => KeyAction::SelectDifficulty(Difficulty::Normal),
            KeyCode::Char('3') => KeyAction::SelectDifficulty(Difficulty::Fast),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
