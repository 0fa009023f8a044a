use rand::Rng;
use rand::rngs::ThreadRng;

use super::{
    config::GameConfig,
    direction::Direction,
    state::{CollisionType, GameState, GameStatus, Position, Snake, Snapshot},
};

/// Segments at or below this index never count as a self collision. Right
/// after a turn the neck can briefly share the head's cell.
// TODO: check whether anything below 4 still plays the same; the value looks
// like a tuning leftover rather than a rule.
pub const SELF_COLLISION_EXEMPT_INDEX: usize = 4;

/// Head position the snake starts from, in board units
const START_HEAD: Position = Position { x: 50, y: 50 };

/// Result of a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Whether the snake ate the apple this tick
    pub ate_apple: bool,
    /// Collision that ended the run on this tick
    pub collision: Option<CollisionType>,
    /// Whether the run is over
    pub terminated: bool,
}

impl TickResult {
    fn idle() -> Self {
        Self {
            ate_apple: false,
            collision: None,
            terminated: true,
        }
    }
}

/// Owns one run of the game and advances it one tick at a time.
///
/// The loop does no I/O and keeps no timer. Whoever drives it calls
/// [`GameLoop::tick`] on a fixed period and [`GameLoop::set_direction`] on key
/// presses.
pub struct GameLoop<R: Rng = ThreadRng> {
    config: GameConfig,
    state: GameState,
    rng: R,
}

impl GameLoop<ThreadRng> {
    /// Create a loop with a fresh run already initialized
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameLoop<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let state = Self::initial_state(&config, &mut rng);
        Self { config, state, rng }
    }

    /// Wrap an existing state, e.g. a hand-built position in a test
    pub fn from_state(config: GameConfig, state: GameState, rng: R) -> Self {
        Self { config, state, rng }
    }

    /// Reset snake, direction, score and status, and place a new apple
    pub fn initialize(&mut self) {
        self.state = Self::initial_state(&self.config, &mut self.rng);
    }

    fn initial_state(config: &GameConfig, rng: &mut R) -> GameState {
        let snake = Snake::new(
            START_HEAD,
            Direction::Right,
            config.initial_length,
            config.cell_size,
        );
        let apple = random_cell(config, rng);
        GameState::new(snake, apple, config)
    }

    /// Change the active direction. Reversals are dropped silently, both
    /// against the active direction and against the last move made. Ignored
    /// once the run is over.
    pub fn set_direction(&mut self, requested: Direction) {
        if !self.state.is_running() {
            return;
        }
        let snake = &mut self.state.snake;
        if snake.direction.is_opposite(requested) || snake.heading.is_opposite(requested) {
            return;
        }
        snake.direction = requested;
    }

    /// Advance the run by one tick.
    ///
    /// The apple check uses the head from before the move; the collision
    /// checks use the head after it.
    pub fn tick(&mut self) -> TickResult {
        if !self.state.is_running() {
            return TickResult::idle();
        }

        let ate_apple = self.state.snake.head() == self.state.apple;
        if ate_apple {
            self.state.score += 1;
            self.state.apple = random_cell(&self.config, &mut self.rng);
        }

        self.state.snake.advance(self.config.cell_size, ate_apple);

        let collision = self.check_collision();
        if collision.is_some() {
            self.state.status = GameStatus::Over;
        }

        TickResult {
            ate_apple,
            collision,
            terminated: !self.state.is_running(),
        }
    }

    fn check_collision(&self) -> Option<CollisionType> {
        if self
            .state
            .snake
            .head_hits_body_beyond(SELF_COLLISION_EXEMPT_INDEX)
        {
            return Some(CollisionType::SelfCollision);
        }

        if !self.state.is_in_bounds(self.state.snake.head()) {
            return Some(CollisionType::Wall);
        }

        None
    }

    pub fn snapshot(&self, best_score: u32, best_player: &str) -> Snapshot {
        Snapshot {
            segments: self.state.snake.segments().copied().collect(),
            apple: self.state.apple,
            score: self.state.score,
            best_score,
            best_player: best_player.to_string(),
            running: self.state.is_running(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }
}

/// Uniform cell on the board; x and y are drawn independently and the snake
/// is not avoided.
fn random_cell<R: Rng>(config: &GameConfig, rng: &mut R) -> Position {
    let x = rng.gen_range(0..config.columns()) * config.cell_size;
    let y = rng.gen_range(0..config.rows()) * config.cell_size;
    Position::new(x, y)
}
