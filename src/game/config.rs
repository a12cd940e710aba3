use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Grids smaller than this leave no room for food placement or movement
const MIN_GRID_SIZE: usize = 4;

/// Fixed parameters of a game, chosen once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid dimension; the board is grid_size × grid_size cells
    pub grid_size: usize,
    /// Points awarded per food eaten
    pub score_increment: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            score_increment: 10,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid dimension, clamped to the
    /// minimum playable size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size: grid_size.max(MIN_GRID_SIZE),
            ..Default::default()
        }
    }
}

/// Speed preset. Each preset fixes the tick interval for the whole game;
/// there is no mid-game speed-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Difficulty {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Difficulty {
    /// Time between game ticks for this preset
    pub fn tick_interval(&self) -> Duration {
        match self {
            Difficulty::Slow => Duration::from_millis(150),
            Difficulty::Normal => Duration::from_millis(100),
            Difficulty::Fast => Duration::from_millis(60),
        }
    }

    /// Short label for the stats header
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Slow => "slow",
            Difficulty::Normal => "normal",
            Difficulty::Fast => "fast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.score_increment, 10);
    }

    #[test]
    fn test_grid_size_clamped() {
        assert_eq!(GameConfig::new(2).grid_size, MIN_GRID_SIZE);
        assert_eq!(GameConfig::new(32).grid_size, 32);
    }

    #[test]
    fn test_tick_intervals() {
        assert_eq!(Difficulty::Slow.tick_interval(), Duration::from_millis(150));
        assert_eq!(
            Difficulty::Normal.tick_interval(),
            Duration::from_millis(100)
        );
        assert_eq!(Difficulty::Fast.tick_interval(), Duration::from_millis(60));
    }
}
