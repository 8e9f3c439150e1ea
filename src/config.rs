use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Map width in tiles
pub const MAP_WIDTH: usize = 24;
/// Map height in tiles
pub const MAP_HEIGHT: usize = 16;
/// Chance that a generated cell is a wall
pub const WALL_PROBABILITY: f64 = 0.08;
/// Chance that a remaining floor cell holds salvage
pub const RESOURCE_PROBABILITY: f64 = 0.06;
/// Share of a building's cost returned when it is dismantled
pub const REFUND_RATIO: f64 = 0.5;
/// Wall-clock seconds per in-game day
pub const DAY_LENGTH_SECS: u64 = 15;
/// Wall-clock seconds between dilemma prompts
pub const DILEMMA_INTERVAL_SECS: u64 = 25;
/// Where the player spawns at the start of every run
pub const PLAYER_START: (i32, i32) = (2, 2);

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map: MapConfig,
    pub timing: TimingConfig,
    pub build: BuildConfig,
    pub player: PlayerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Grid dimensions
    pub width: usize,
    pub height: usize,
    pub wall_probability: f64,
    pub resource_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub day_length_secs: u64,
    pub dilemma_interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub refund_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_x: i32,
    pub start_y: i32,
}

impl GameConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.width == 0 || self.map.height == 0 {
            return Err(ConfigError::Invalid {
                field: "map.width/map.height",
                reason: format!("grid must be non-empty, got {}x{}", self.map.width, self.map.height),
            });
        }
        check_probability("map.wall_probability", self.map.wall_probability)?;
        check_probability("map.resource_probability", self.map.resource_probability)?;
        check_probability("build.refund_ratio", self.build.refund_ratio)?;

        if self.timing.day_length_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "timing.day_length_secs",
                reason: "must be at least 1 second".to_string(),
            });
        }
        if self.timing.dilemma_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "timing.dilemma_interval_secs",
                reason: "must be at least 1 second".to_string(),
            });
        }

        let (x, y) = (self.player.start_x, self.player.start_y);
        if x < 0 || y < 0 || x as usize >= self.map.width || y as usize >= self.map.height {
            return Err(ConfigError::Invalid {
                field: "player.start_x/player.start_y",
                reason: format!("({}, {}) is outside the map", x, y),
            });
        }
        Ok(())
    }
}

impl TimingConfig {
    pub fn day_length(&self) -> Duration {
        Duration::from_secs(self.day_length_secs)
    }

    pub fn dilemma_interval(&self) -> Duration {
        Duration::from_secs(self.dilemma_interval_secs)
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{} is not in [0, 1]", value),
        })
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            wall_probability: WALL_PROBABILITY,
            resource_probability: RESOURCE_PROBABILITY,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            day_length_secs: DAY_LENGTH_SECS,
            dilemma_interval_secs: DILEMMA_INTERVAL_SECS,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            refund_ratio: REFUND_RATIO,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_x: PLAYER_START.0,
            start_y: PLAYER_START.1,
        }
    }
}
