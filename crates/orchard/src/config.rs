//! Simulation configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `orchard.ron` file (if exists), or the file passed with `--config`
//! 3. Environment variables prefixed with `ORCHARD_`
//!
//! Example environment variable: `ORCHARD_FLY__FLEE_DISTANCE=6.5`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use glam::Vec2;
use orchard_fly::FlyConfig;
use serde::{Deserialize, Serialize};

/// Main simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SimConfig {
    #[serde(default)]
    pub fly: FlyConfig,

    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub run: RunConfig,
}

/// Orchard layout and swarm size
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of apple trees, planted in a row along y = 0
    pub tree_count: usize,
    /// Gap between neighbouring trees
    pub tree_spacing: f32,
    /// Flies spawned around the first tree
    pub fly_count: usize,
    /// Radius of the spawn ring
    pub spawn_radius: f32,
    /// Distance at which seeking flies settle on their tree
    pub arrival_distance: f32,
    /// Pond surface; a player below it is submerged
    pub water_line: Option<f32>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tree_count: 3,
            tree_spacing: 12.0,
            fly_count: 12,
            spawn_radius: 2.0,
            arrival_distance: 0.25,
            water_line: Some(-6.0),
        }
    }
}

/// Scripted player walk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub enabled: bool,
    /// Walking speed in units/sec
    pub speed: f32,
    /// Closed loop the player walks, starting at the first point
    pub waypoints: Vec<Vec2>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        // Along the tree row, then back through the pond
        Self {
            enabled: true,
            speed: 4.0,
            waypoints: vec![
                Vec2::new(-10.0, 4.0),
                Vec2::new(34.0, 4.0),
                Vec2::new(34.0, -10.0),
                Vec2::new(-10.0, -10.0),
            ],
        }
    }
}

/// Frame loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub frames: u64,
    /// Fixed frame time in seconds
    pub dt: f32,
    pub seed: u64,
    /// Log swarm state every N frames (0 disables)
    pub log_every: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 3600,
            dt: 1.0 / 60.0,
            seed: 42,
            log_every: 600,
        }
    }
}

impl SimConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `path`, or `orchard.ron` in the working directory if it exists
    /// 3. Environment variables prefixed with `ORCHARD_` (highest priority)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Ron).required(true),
            None => File::with_name("orchard")
                .format(FileFormat::Ron)
                .required(false),
        };

        let builder = Config::builder()
            // Layer 1: compiled defaults come from the serde defaults above
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (ORCHARD_FLY__FLEE_DISTANCE, etc.)
            .add_source(
                Environment::with_prefix("ORCHARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build().context("Failed to build configuration")?;

        let sim: SimConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        sim.fly.validate().context("Invalid fly configuration")?;
        Ok(sim)
    }
}
