use std::time::Duration;

/// Board geometry for a game. Coordinates are in board units; every
/// position on the board is a multiple of `cell_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Width of the board in units
    pub board_width: i32,
    /// Height of the board in units
    pub board_height: i32,
    /// Side of one grid cell in units
    pub cell_size: i32,
    /// Number of segments the snake starts with
    pub initial_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 600,
            board_height: 600,
            cell_size: 10,
            initial_length: 3,
        }
    }
}

impl GameConfig {
    /// Number of cell columns on the board
    pub fn columns(&self) -> i32 {
        self.board_width / self.cell_size
    }

    /// Number of cell rows on the board
    pub fn rows(&self) -> i32 {
        self.board_height / self.cell_size
    }
}

/// Tick interval preset picked before a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Delay between two game ticks
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Easy => Duration::from_millis(240),
            Self::Medium => Duration::from_millis(180),
            Self::Hard => Duration::from_millis(120),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Preset at a menu index; anything out of range falls back to Medium.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_width, 600);
        assert_eq!(config.board_height, 600);
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.initial_length, 3);
        assert_eq!(config.columns(), 60);
        assert_eq!(config.rows(), 60);
    }

    #[test]
    fn test_tick_intervals() {
        assert_eq!(Difficulty::Easy.tick_interval(), Duration::from_millis(240));
        assert_eq!(Difficulty::Medium.tick_interval(), Duration::from_millis(180));
        assert_eq!(Difficulty::Hard.tick_interval(), Duration::from_millis(120));
    }

    #[test]
    fn test_difficulty_defaults_to_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::from_index(7), Difficulty::Medium);
        assert_eq!(Difficulty::from_index(0), Difficulty::Easy);
        assert_eq!(Difficulty::from_index(2), Difficulty::Hard);
    }

    #[test]
    fn test_index_round_trips() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_index(difficulty.index()), difficulty);
        }
    }
}
