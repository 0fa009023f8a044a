use std::collections::VecDeque;

use super::config::GameConfig;
use super::direction::Direction;

/// A position on the board, in board units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one cell further in `direction`
    pub fn stepped(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.offset(cell_size);
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The snake. Segments trail the head's previous positions; nothing checks
/// that they stay adjacent.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    segments: VecDeque<Position>,
    /// Active direction, applied on the next move
    pub direction: Direction,
    /// Direction of the last move actually made
    pub heading: Direction,
}

impl Snake {
    /// A straight snake with `length` segments trailing behind `head`.
    pub fn new(head: Position, direction: Direction, length: usize, cell_size: i32) -> Self {
        let back = direction.opposite();
        let mut segments = VecDeque::with_capacity(length.max(1));
        let mut pos = head;
        for _ in 0..length.max(1) {
            segments.push_back(pos);
            pos = pos.stepped(back, cell_size);
        }

        Self {
            segments,
            direction,
            heading: direction,
        }
    }

    /// A snake with explicit segments, head first. Empty input gets a single
    /// segment at the origin.
    pub fn from_segments<I>(segments: I, direction: Direction) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut segments: VecDeque<Position> = segments.into_iter().collect();
        if segments.is_empty() {
            segments.push_back(Position::new(0, 0));
        }

        Self {
            segments,
            direction,
            heading: direction,
        }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Position> {
        self.segments.iter()
    }

    pub fn segment(&self, index: usize) -> Option<Position> {
        self.segments.get(index).copied()
    }

    /// Moves every segment into its predecessor's former cell and the head one
    /// cell along the active direction. With `grow` the old tail is kept.
    pub fn advance(&mut self, cell_size: i32, grow: bool) {
        let new_head = self.head().stepped(self.direction, cell_size);
        self.segments.push_front(new_head);
        if !grow {
            self.segments.pop_back();
        }
        self.heading = self.direction;
    }

    /// True when any segment with index above `exempt` sits on the head
    pub fn head_hits_body_beyond(&self, exempt: usize) -> bool {
        let head = self.head();
        self.segments.iter().skip(exempt + 1).any(|&pos| pos == head)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the board
    Wall,
    /// Head ran into the snake's own body
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Over,
}

/// Complete state of one run
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Position,
    pub score: u32,
    pub status: GameStatus,
    pub board_width: i32,
    pub board_height: i32,
}

impl GameState {
    pub fn new(snake: Snake, apple: Position, config: &GameConfig) -> Self {
        Self {
            snake,
            apple,
            score: 0,
            status: GameStatus::Running,
            board_width: config.board_width,
            board_height: config.board_height,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Check if a position is within `[0, width) x [0, height)`
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.board_width && pos.y >= 0 && pos.y < self.board_height
    }
}

/// Read-only view handed to the renderer once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub segments: Vec<Position>,
    pub apple: Position,
    pub score: u32,
    pub best_score: u32,
    pub best_player: String,
    pub running: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_stepping() {
        let pos = Position::new(50, 50);
        assert_eq!(pos.stepped(Direction::Right, 10), Position::new(60, 50));
        assert_eq!(pos.stepped(Direction::Left, 10), Position::new(40, 50));
        assert_eq!(pos.stepped(Direction::Down, 10), Position::new(50, 60));
        assert_eq!(pos.stepped(Direction::Up, 10), Position::new(50, 40));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(50, 50), Direction::Right, 3, 10);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(50, 50));
        assert_eq!(snake.segment(1), Some(Position::new(40, 50)));
        assert_eq!(snake.segment(2), Some(Position::new(30, 50)));
        assert_eq!(snake.segment(3), None);
    }

    #[test]
    fn test_advance_shifts_trailing_segments() {
        let mut snake = Snake::new(Position::new(50, 50), Direction::Right, 3, 10);

        snake.advance(10, false);
        let body: Vec<_> = snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![
                Position::new(60, 50),
                Position::new(50, 50),
                Position::new(40, 50)
            ]
        );

        snake.direction = Direction::Down;
        snake.advance(10, true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(60, 60));
        assert_eq!(snake.segment(3), Some(Position::new(40, 50)));
        assert_eq!(snake.heading, Direction::Down);
    }

    #[test]
    fn test_head_hits_body_beyond() {
        let snake = Snake::from_segments(
            [
                Position::new(0, 0),
                Position::new(10, 0),
                Position::new(0, 0),
            ],
            Direction::Left,
        );
        assert!(snake.head_hits_body_beyond(1));
        assert!(!snake.head_hits_body_beyond(2));
    }

    #[test]
    fn test_from_empty_segments_keeps_a_head() {
        let snake = Snake::from_segments(Vec::new(), Direction::Up);
        assert_eq!(snake.len(), 1);
        assert!(!snake.is_empty());
    }

    #[test]
    fn test_bounds_checking() {
        let config = GameConfig::default();
        let state = GameState::new(
            Snake::new(Position::new(50, 50), Direction::Right, 3, 10),
            Position::new(100, 100),
            &config,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(590, 590)));
        assert!(!state.is_in_bounds(Position::new(-10, 0)));
        assert!(!state.is_in_bounds(Position::new(600, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 600)));
    }
}
