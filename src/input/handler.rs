use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// Key meaning while the board has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Steer(Direction),
    TogglePause,
    Restart,
    RequestExit,
    ForceQuit,
    None,
}

/// Key meaning while a dialog prompt has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKey {
    NextButton,
    PrevButton,
    Confirm,
    Dismiss,
    ForceQuit,
    None,
}

/// Key meaning on the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    PrevField,
    NextField,
    Decrease,
    Increase,
    Start,
    Quit,
    ForceQuit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn game_key(&self, key: KeyEvent) -> GameKey {
        if is_ctrl_c(key) {
            return GameKey::ForceQuit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => GameKey::Steer(Direction::Up),
            KeyCode::Down => GameKey::Steer(Direction::Down),
            KeyCode::Left => GameKey::Steer(Direction::Left),
            KeyCode::Right => GameKey::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => GameKey::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => GameKey::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => GameKey::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => GameKey::Steer(Direction::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => GameKey::TogglePause,
            KeyCode::Char('r') | KeyCode::Char('R') => GameKey::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameKey::RequestExit,

            _ => GameKey::None,
        }
    }

    pub fn dialog_key(&self, key: KeyEvent) -> DialogKey {
        if is_ctrl_c(key) {
            return DialogKey::ForceQuit;
        }

        match key.code {
            KeyCode::Right | KeyCode::Down | KeyCode::Tab => DialogKey::NextButton,
            KeyCode::Left | KeyCode::Up | KeyCode::BackTab => DialogKey::PrevButton,
            KeyCode::Enter | KeyCode::Char(' ') => DialogKey::Confirm,
            KeyCode::Esc => DialogKey::Dismiss,
            _ => DialogKey::None,
        }
    }

    pub fn menu_key(&self, key: KeyEvent) -> MenuKey {
        if is_ctrl_c(key) {
            return MenuKey::ForceQuit;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => MenuKey::PrevField,
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => MenuKey::NextField,
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => MenuKey::Decrease,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => MenuKey::Increase,
            KeyCode::Enter | KeyCode::Char(' ') => MenuKey::Start,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => MenuKey::Quit,
            _ => MenuKey::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
