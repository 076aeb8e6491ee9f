//! Snake in the terminal, on a wrap-around board
//!
//! This library provides:
//! - Core game logic (game module): grid, snake, tick and collision rules
//! - Dialog prompts and their resolution protocol (dialog module)
//! - Keyboard mapping (input module) and TUI rendering (render module)
//! - The restartable tick scheduler (scheduler module)
//! - The interactive driver tying it all together (modes module)

pub mod dialog;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;
