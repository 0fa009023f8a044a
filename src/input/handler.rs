use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key means while a run is on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Quit,
    None,
}

/// What a key means on the prompt and menu screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuKey {
    Previous,
    Next,
    Confirm,
    Back,
    Input(char),
    Erase,
    /// Ctrl+C; leaves the game from anywhere
    Interrupt,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Only direction keys act during a run; Ctrl+C is the one way out.
    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if is_ctrl_c(&key) {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Move(Direction::Up),
            KeyCode::Down => KeyAction::Move(Direction::Down),
            KeyCode::Left => KeyAction::Move(Direction::Left),
            KeyCode::Right => KeyAction::Move(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Move(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Move(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Move(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Move(Direction::Right),

            _ => KeyAction::None,
        }
    }

    /// Keys for menus and the name prompt. Printable characters come through
    /// as `Input`, so letters are never shortcuts here.
    pub fn handle_menu_key(&self, key: KeyEvent) -> MenuKey {
        if is_ctrl_c(&key) {
            return MenuKey::Interrupt;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return MenuKey::None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Left | KeyCode::BackTab => MenuKey::Previous,
            KeyCode::Down | KeyCode::Right | KeyCode::Tab => MenuKey::Next,
            KeyCode::Enter => MenuKey::Confirm,
            KeyCode::Esc => MenuKey::Back,
            KeyCode::Backspace => MenuKey::Erase,
            KeyCode::Char(c) if !c.is_control() => MenuKey::Input(c),
            _ => MenuKey::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
