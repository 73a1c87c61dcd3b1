//! The player flies run from, and the pond they can hide in

use glam::Vec2;
use orchard_fly::{Environment, ThreatTargeter};
use serde::{Deserialize, Serialize};

/// Player state as seen by the orchard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    /// False while the player isn't in the scene
    pub present: bool,
}

impl Player {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            present: true,
        }
    }

    pub fn absent() -> Self {
        Self {
            position: Vec2::ZERO,
            present: false,
        }
    }
}

/// Threat targeter following the player
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerTracker {
    target: Option<Vec2>,
}

impl PlayerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh from the current player state
    pub fn track(&mut self, player: &Player) {
        self.target = player.present.then_some(player.position);
    }
}

impl ThreatTargeter for PlayerTracker {
    fn target(&self) -> Option<Vec2> {
        self.target
    }
}

/// Water body; anything below the water line is submerged
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pond {
    pub water_line: Option<f32>,
}

impl Pond {
    pub fn new(water_line: f32) -> Self {
        Self {
            water_line: Some(water_line),
        }
    }

    pub fn is_under(&self, position: Vec2) -> bool {
        self.water_line.is_some_and(|line| position.y < line)
    }
}

/// Environment snapshot for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct Surroundings {
    player_submerged: bool,
}

impl Surroundings {
    pub fn observe(player: &Player, pond: &Pond) -> Self {
        Self {
            player_submerged: player.present && pond.is_under(player.position),
        }
    }
}

impl Environment for Surroundings {
    fn is_submerged(&self) -> bool {
        self.player_submerged
    }
}
