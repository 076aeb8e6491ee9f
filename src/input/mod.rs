pub mod handler;

pub use handler::{DialogKey, GameKey, InputHandler, MenuKey};
