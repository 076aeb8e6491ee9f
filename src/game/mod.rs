//! Core game logic for Snake
//!
//! Everything in here is synchronous and free of I/O. The async driver in
//! the modes module advances a session one tick at a time and renders
//! whatever state it finds.

pub mod config;
pub mod direction;
pub mod grid;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig, GameSpeed, MAX_WIDTH, MIN_WIDTH};
pub use direction::Direction;
pub use grid::{Cell, Grid};
pub use session::{DialogResolution, ExitRequest, GameEnd, GameSession, Phase, TickResult};
pub use snake::{Snake, INITIAL_SNAKE_LENGTH};
