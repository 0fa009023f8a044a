//! Core game logic for Snake
//!
//! Pure state and rules, no I/O, no timers. The play mode in `modes` drives a
//! [`GameLoop`] with a tick source and key input.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

pub use config::{Difficulty, GameConfig};
pub use direction::Direction;
pub use engine::{GameLoop, SELF_COLLISION_EXEMPT_INDEX, TickResult};
pub use state::{CollisionType, GameState, GameStatus, Position, Snake, Snapshot};
