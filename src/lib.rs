//! Term Snake - the classic Snake game in a terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Best-score persistence (score module)
//! - Key mapping (input module) and TUI rendering (render module)
//! - The interactive play mode with its prompt screens (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod score;
