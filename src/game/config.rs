use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest configurable board side
pub const MIN_WIDTH: u16 = 5;
/// Largest configurable board side
pub const MAX_WIDTH: u16 = 15;

/// Tick rate presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum GameSpeed {
    /// 2 Hz (500ms per tick)
    Slow,
    /// ~3 Hz (300ms per tick)
    Normal,
    /// ~7 Hz (150ms per tick)
    Fast,
}

impl GameSpeed {
    /// Every speed, in menu order (the declaration order)
    pub const ALL: [GameSpeed; 3] = [GameSpeed::Slow, GameSpeed::Normal, GameSpeed::Fast];

    /// Get the tick interval for this speed
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(300),
            Self::Fast => Duration::from_millis(150),
        }
    }

    /// Get a string representation of the speed
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
        }
    }

    /// The next-faster speed, wrapping back to Slow
    pub fn faster(self) -> GameSpeed {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    /// The next-slower speed, wrapping back to Fast
    pub fn slower(self) -> GameSpeed {
        Self::ALL[(self as usize + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Rejected game configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board width must be between {MIN_WIDTH} and {MAX_WIDTH}, got {0}")]
    WidthOutOfRange(u16),
}

/// Configuration for one game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square board
    pub width: u16,
    /// Tick rate preset
    pub speed: GameSpeed,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            speed: GameSpeed::Normal,
        }
    }
}

impl GameConfig {
    /// Create a configuration, rejecting widths outside [MIN_WIDTH, MAX_WIDTH]
    pub fn new(width: u16, speed: GameSpeed) -> Result<Self, ConfigError> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            return Err(ConfigError::WidthOutOfRange(width));
        }
        Ok(Self { width, speed })
    }

    /// Smallest allowed board, for tests
    pub fn small() -> Self {
        Self {
            width: MIN_WIDTH,
            ..Default::default()
        }
    }

    /// Time between two game ticks
    pub fn tick_interval(&self) -> Duration {
        self.speed.tick_interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 10);
        assert_eq!(config.speed, GameSpeed::Normal);
    }

    #[test]
    fn test_speed_intervals() {
        assert_eq!(GameSpeed::Slow.tick_interval(), Duration::from_millis(500));
        assert_eq!(
            GameSpeed::Normal.tick_interval(),
            Duration::from_millis(300)
        );
        assert_eq!(GameSpeed::Fast.tick_interval(), Duration::from_millis(150));
    }

    #[test]
    fn test_width_bounds() {
        assert!(GameConfig::new(4, GameSpeed::Normal).is_err());
        assert!(GameConfig::new(16, GameSpeed::Normal).is_err());
        assert!(GameConfig::new(5, GameSpeed::Normal).is_ok());
        assert!(GameConfig::new(15, GameSpeed::Fast).is_ok());

        assert_eq!(
            GameConfig::new(0, GameSpeed::Slow),
            Err(ConfigError::WidthOutOfRange(0))
        );
        assert_eq!(
            GameConfig::new(10, GameSpeed::Slow),
            Ok(GameConfig {
                width: 10,
                speed: GameSpeed::Slow
            })
        );
    }

    #[test]
    fn test_speed_cycle_covers_all() {
        let mut speed = GameSpeed::Slow;
        for expected in [GameSpeed::Normal, GameSpeed::Fast, GameSpeed::Slow] {
            speed = speed.faster();
            assert_eq!(speed, expected);
        }

        for speed in GameSpeed::ALL {
            assert_eq!(speed.faster().slower(), speed);
        }
    }
}
