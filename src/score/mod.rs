pub mod store;

pub use store::{BestScore, DEFAULT_SCORE_FILE, ScoreStore, UNKNOWN_PLAYER};
