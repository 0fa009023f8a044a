pub mod human;
pub mod screen;

pub use human::{HumanMode, PlayOptions};
pub use screen::Screen;
