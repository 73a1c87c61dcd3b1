//! Per-fly behavior configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alert::SoundClip;
use crate::difficulty::Difficulty;

/// Rejected fly configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidValue { field: &'static str, value: f32 },

    #[error("flee sound '{0}' has an invalid length")]
    InvalidSound(String),
}

/// Tuning values for a fly. Read-only once a controller is built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyConfig {
    /// Threat closer than this makes the fly flee
    pub flee_distance: f32,
    /// Speed while flying to food
    pub food_approach_speed: f32,
    /// Food closer than this lets the fly start eating
    pub food_proximity_distance: f32,
    /// Seconds of eating before the fly moves on
    pub max_eat_duration: f32,
    /// Sound played when a fly starts fleeing
    pub flee_sound: SoundClip,
    /// Picks the flee speed
    pub difficulty: Difficulty,
}

impl Default for FlyConfig {
    fn default() -> Self {
        Self {
            flee_distance: 5.0,
            food_approach_speed: 2.0,
            food_proximity_distance: 1.5,
            max_eat_duration: 4.0,
            flee_sound: SoundClip::default(),
            difficulty: Difficulty::Normal,
        }
    }
}

impl FlyConfig {
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Check every numeric field is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("flee_distance", self.flee_distance),
            ("food_approach_speed", self.food_approach_speed),
            ("food_proximity_distance", self.food_proximity_distance),
            ("max_eat_duration", self.max_eat_duration),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if !self.flee_sound.length_secs.is_finite() || self.flee_sound.length_secs < 0.0 {
            return Err(ConfigError::InvalidSound(self.flee_sound.name.clone()));
        }

        Ok(())
    }
}
