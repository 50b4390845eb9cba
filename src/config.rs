//! Game tuning.
//!
//! Defaults reproduce the classic layout: an 800×600 arena with a 3×10 enemy
//! grid.  A JSON file may override any subset of the fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f64,
    pub arena_height: f64,

    // === Player ===
    pub player_width: f64,
    pub player_height: f64,
    /// Distance from the bottom edge to the player's centre.
    pub player_offset: f64,
    /// Pixels per frame while a direction key is held.
    pub player_speed: f64,

    // === Lasers ===
    pub laser_width: f64,
    pub laser_height: f64,
    /// Pixels per frame, both directions.
    pub laser_speed: f64,
    /// Frames between player shots.
    pub laser_cooldown: u32,

    // === Enemies ===
    pub enemy_width: f64,
    pub enemy_height: f64,
    pub enemy_rows: usize,
    pub enemies_per_row: usize,
    pub enemy_horizontal_padding: f64,
    pub enemy_vertical_padding: f64,
    pub enemy_vertical_spacing: f64,
    /// Frames between shots once an enemy has fired its first volley.
    pub enemy_cooldown: f64,
    /// Horizontal sway amplitude (sine of the clock).
    pub sway_x: f64,
    /// Vertical sway amplitude (cosine of the clock).
    pub sway_y: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,

            player_width: 40.0,
            player_height: 30.0,
            player_offset: 50.0,
            player_speed: 5.0,

            laser_width: 6.0,
            laser_height: 20.0,
            laser_speed: 5.0,
            laser_cooldown: 20,

            enemy_width: 40.0,
            enemy_height: 30.0,
            enemy_rows: 3,
            enemies_per_row: 10,
            enemy_horizontal_padding: 80.0,
            enemy_vertical_padding: 70.0,
            enemy_vertical_spacing: 80.0,
            enemy_cooldown: 300.0,
            sway_x: 50.0,
            sway_y: 10.0,
        }
    }
}

impl GameConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: display,
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "arena must be positive, got {}x{}",
                self.arena_width, self.arena_height
            )));
        }
        if self.enemies_per_row < 2 {
            return Err(ConfigError::Invalid(format!(
                "enemies_per_row must be at least 2, got {}",
                self.enemies_per_row
            )));
        }
        if self.player_width >= self.arena_width {
            return Err(ConfigError::Invalid(format!(
                "player_width {} does not fit arena_width {}",
                self.player_width, self.arena_width
            )));
        }
        Ok(())
    }

    /// Horizontal distance between neighbouring enemies in a row.  Zero when
    /// a row holds fewer than two enemies.
    pub fn enemy_spacing(&self) -> f64 {
        match self.enemies_per_row.checked_sub(1) {
            Some(gaps) if gaps > 0 => {
                (self.arena_width - self.enemy_horizontal_padding * 2.0) / gaps as f64
            }
            _ => 0.0,
        }
    }

    /// Allowed range for the player's x.
    pub fn player_x_bounds(&self) -> (f64, f64) {
        let half = self.player_width / 2.0;
        (half, self.arena_width - half)
    }
}
