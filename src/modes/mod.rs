pub mod play;

pub use play::{MenuState, PlayMode};
