//! Prompt and menu screens around a run
//!
//! Each screen is a small state machine fed with [`MenuKey`]s. None of them
//! blocks: the play loop keeps ticking the clock and redrawing while a screen
//! waits for input.

use crate::game::Difficulty;
use crate::input::MenuKey;

pub const EMPTY_NAME_WARNING: &str = "The name cannot be empty. Please enter a valid name.";

/// Longest name the prompt accepts
pub const MAX_NAME_LEN: usize = 20;

/// Which screen the play loop is showing
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    NamePrompt(NamePrompt),
    ConfirmCancel(ConfirmCancel),
    DifficultyMenu(DifficultyMenu),
    Playing,
    GameOver(GameOverMenu),
}

/// Cursor over a fixed number of options; wraps at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub selected: usize,
    len: usize,
}

impl Cursor {
    pub fn new(selected: usize, len: usize) -> Self {
        let len = len.max(1);
        Self {
            selected: selected.min(len - 1),
            len,
        }
    }

    pub fn previous(&mut self) {
        self.selected = (self.selected + self.len - 1) % self.len;
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.len;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Pending,
    Submitted(String),
    Cancelled,
}

/// Player name entry. An empty or blank name is refused with a warning and
/// the prompt stays up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamePrompt {
    pub input: String,
    pub warning: Option<&'static str>,
}

impl NamePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, key: MenuKey) -> PromptOutcome {
        match key {
            MenuKey::Input(c) => {
                if self.input.chars().count() < MAX_NAME_LEN {
                    self.input.push(c);
                }
                self.warning = None;
            }
            MenuKey::Erase => {
                self.input.pop();
                self.warning = None;
            }
            MenuKey::Confirm => {
                let name = self.input.trim();
                if name.is_empty() {
                    self.warning = Some(EMPTY_NAME_WARNING);
                } else {
                    return PromptOutcome::Submitted(name.to_string());
                }
            }
            MenuKey::Back | MenuKey::Interrupt => return PromptOutcome::Cancelled,
            MenuKey::Previous | MenuKey::Next | MenuKey::None => {}
        }
        PromptOutcome::Pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Pending,
    /// Leave the game
    Exit,
    /// Back to the name prompt
    Resume,
}

/// "Are you sure you want to cancel?" with Yes / No, No preselected.
/// Holds the half-typed name so resuming restores it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmCancel {
    pub cursor: Cursor,
    pub prompt: NamePrompt,
}

impl ConfirmCancel {
    pub const OPTIONS: [&'static str; 2] = ["Yes", "No"];

    pub fn new(prompt: NamePrompt) -> Self {
        Self {
            cursor: Cursor::new(1, Self::OPTIONS.len()),
            prompt,
        }
    }

    pub fn handle(&mut self, key: MenuKey) -> ConfirmOutcome {
        match key {
            MenuKey::Previous => self.cursor.previous(),
            MenuKey::Next => self.cursor.next(),
            MenuKey::Confirm if self.cursor.selected == 0 => return ConfirmOutcome::Exit,
            MenuKey::Confirm | MenuKey::Back => return ConfirmOutcome::Resume,
            MenuKey::Interrupt => return ConfirmOutcome::Exit,
            MenuKey::Input(c) => match c.to_ascii_lowercase() {
                'y' => return ConfirmOutcome::Exit,
                'n' => return ConfirmOutcome::Resume,
                _ => {}
            },
            MenuKey::Erase | MenuKey::None => {}
        }
        ConfirmOutcome::Pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyOutcome {
    Pending,
    Chosen(Difficulty),
    Interrupted,
}

/// Easy / Medium / Hard, Medium preselected. Dismissing the menu picks
/// Medium.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyMenu {
    pub cursor: Cursor,
}

impl Default for DifficultyMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyMenu {
    pub fn new() -> Self {
        Self {
            cursor: Cursor::new(Difficulty::default().index(), Difficulty::ALL.len()),
        }
    }

    pub fn handle(&mut self, key: MenuKey) -> DifficultyOutcome {
        match key {
            MenuKey::Previous => self.cursor.previous(),
            MenuKey::Next => self.cursor.next(),
            MenuKey::Confirm => {
                return DifficultyOutcome::Chosen(Difficulty::from_index(self.cursor.selected));
            }
            MenuKey::Back => return DifficultyOutcome::Chosen(Difficulty::default()),
            MenuKey::Input(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                return DifficultyOutcome::Chosen(Difficulty::from_index(index));
            }
            MenuKey::Interrupt => return DifficultyOutcome::Interrupted,
            MenuKey::Input(_) | MenuKey::Erase | MenuKey::None => {}
        }
        DifficultyOutcome::Pending
    }
}

/// The three ways out of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunChoice {
    PlayAgain,
    ChangeDifficulty,
    Quit,
}

impl RunChoice {
    pub const ALL: [RunChoice; 3] = [
        RunChoice::PlayAgain,
        RunChoice::ChangeDifficulty,
        RunChoice::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PlayAgain => "Play again",
            Self::ChangeDifficulty => "Change difficulty",
            Self::Quit => "Quit",
        }
    }
}

/// Menu shown after a run ends. Closing it quits.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverMenu {
    pub cursor: Cursor,
    pub final_score: u32,
    pub new_best: bool,
}

impl GameOverMenu {
    pub fn new(final_score: u32, new_best: bool) -> Self {
        Self {
            cursor: Cursor::new(0, RunChoice::ALL.len()),
            final_score,
            new_best,
        }
    }

    pub fn handle(&mut self, key: MenuKey) -> Option<RunChoice> {
        match key {
            MenuKey::Previous => self.cursor.previous(),
            MenuKey::Next => self.cursor.next(),
            MenuKey::Confirm => return RunChoice::ALL.get(self.cursor.selected).copied(),
            MenuKey::Back | MenuKey::Interrupt => return Some(RunChoice::Quit),
            MenuKey::Input(c) => match c.to_ascii_lowercase() {
                'r' | 'y' => return Some(RunChoice::PlayAgain),
                'c' => return Some(RunChoice::ChangeDifficulty),
                'q' | 'n' => return Some(RunChoice::Quit),
                _ => {}
            },
            MenuKey::Erase | MenuKey::None => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(prompt: &mut NamePrompt, text: &str) {
        for c in text.chars() {
            assert_eq!(prompt.handle(MenuKey::Input(c)), PromptOutcome::Pending);
        }
    }

    #[test]
    fn test_cursor_wraps() {
        let mut cursor = Cursor::new(0, 3);
        cursor.previous();
        assert_eq!(cursor.selected, 2);
        cursor.next();
        assert_eq!(cursor.selected, 0);
        assert_eq!(Cursor::new(9, 3).selected, 2);
    }

    #[test]
    fn test_name_prompt_submits_trimmed_name() {
        let mut prompt = NamePrompt::new();
        type_text(&mut prompt, "  Ada ");

        assert_eq!(
            prompt.handle(MenuKey::Confirm),
            PromptOutcome::Submitted("Ada".to_string())
        );
    }

    #[test]
    fn test_name_prompt_rejects_blank_names() {
        let mut prompt = NamePrompt::new();
        assert_eq!(prompt.handle(MenuKey::Confirm), PromptOutcome::Pending);
        assert_eq!(prompt.warning, Some(EMPTY_NAME_WARNING));

        type_text(&mut prompt, "   ");
        assert_eq!(prompt.warning, None);
        assert_eq!(prompt.handle(MenuKey::Confirm), PromptOutcome::Pending);
        assert_eq!(prompt.warning, Some(EMPTY_NAME_WARNING));
    }

    #[test]
    fn test_name_prompt_editing() {
        let mut prompt = NamePrompt::new();
        type_text(&mut prompt, "Bobx");
        prompt.handle(MenuKey::Erase);
        assert_eq!(prompt.input, "Bob");

        type_text(&mut prompt, &"z".repeat(40));
        assert_eq!(prompt.input.chars().count(), MAX_NAME_LEN);

        assert_eq!(prompt.handle(MenuKey::Back), PromptOutcome::Cancelled);
    }

    #[test]
    fn test_name_prompt_warning_clears_on_edit() {
        let mut prompt = NamePrompt::new();
        type_text(&mut prompt, " ");
        prompt.handle(MenuKey::Confirm);
        assert_eq!(prompt.warning, Some(EMPTY_NAME_WARNING));

        prompt.handle(MenuKey::Erase);
        assert_eq!(prompt.warning, None);

        prompt.handle(MenuKey::Confirm);
        assert_eq!(prompt.warning, Some(EMPTY_NAME_WARNING));
        prompt.handle(MenuKey::Input('x'));
        assert_eq!(prompt.warning, None);
    }

    #[test]
    fn test_confirm_cancel_defaults_to_no() {
        let mut confirm = ConfirmCancel::new(NamePrompt::new());
        assert_eq!(confirm.handle(MenuKey::Confirm), ConfirmOutcome::Resume);

        let mut confirm = ConfirmCancel::new(NamePrompt::new());
        confirm.handle(MenuKey::Previous);
        assert_eq!(confirm.handle(MenuKey::Confirm), ConfirmOutcome::Exit);
    }

    #[test]
    fn test_confirm_cancel_shortcuts() {
        let mut confirm = ConfirmCancel::new(NamePrompt::new());
        assert_eq!(confirm.handle(MenuKey::Input('Y')), ConfirmOutcome::Exit);
        assert_eq!(confirm.handle(MenuKey::Input('n')), ConfirmOutcome::Resume);
        assert_eq!(confirm.handle(MenuKey::Back), ConfirmOutcome::Resume);
        assert_eq!(confirm.handle(MenuKey::Input('x')), ConfirmOutcome::Pending);
    }

    #[test]
    fn test_difficulty_menu_defaults_to_medium() {
        let mut menu = DifficultyMenu::new();
        assert_eq!(
            menu.handle(MenuKey::Confirm),
            DifficultyOutcome::Chosen(Difficulty::Medium)
        );

        let mut menu = DifficultyMenu::new();
        menu.handle(MenuKey::Next);
        menu.handle(MenuKey::Next);
        // Dismissing ignores the cursor
        assert_eq!(
            menu.handle(MenuKey::Back),
            DifficultyOutcome::Chosen(Difficulty::Medium)
        );
    }

    #[test]
    fn test_difficulty_menu_selection() {
        let mut menu = DifficultyMenu::new();
        menu.handle(MenuKey::Previous);
        assert_eq!(
            menu.handle(MenuKey::Confirm),
            DifficultyOutcome::Chosen(Difficulty::Easy)
        );

        let mut menu = DifficultyMenu::new();
        assert_eq!(
            menu.handle(MenuKey::Input('3')),
            DifficultyOutcome::Chosen(Difficulty::Hard)
        );
        assert_eq!(menu.handle(MenuKey::Input('9')), DifficultyOutcome::Pending);
        assert_eq!(menu.handle(MenuKey::Interrupt), DifficultyOutcome::Interrupted);
    }

    #[test]
    fn test_game_over_menu() {
        let mut menu = GameOverMenu::new(5, false);
        assert_eq!(menu.handle(MenuKey::Confirm), Some(RunChoice::PlayAgain));

        menu.handle(MenuKey::Next);
        assert_eq!(menu.handle(MenuKey::Confirm), Some(RunChoice::ChangeDifficulty));

        menu.handle(MenuKey::Next);
        assert_eq!(menu.handle(MenuKey::Confirm), Some(RunChoice::Quit));

        assert_eq!(menu.handle(MenuKey::Input('c')), Some(RunChoice::ChangeDifficulty));
        assert_eq!(menu.handle(MenuKey::Back), Some(RunChoice::Quit));
        assert_eq!(menu.handle(MenuKey::Input('x')), None);
    }
}
