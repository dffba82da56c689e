// Core types shared by the engine and the game: math helpers, pixel
// rectangles and runtime configuration.

pub mod config;
pub mod math;
pub mod rect;

pub use config::GameConfig;
pub use rect::Rect;
