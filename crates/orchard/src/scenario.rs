//! Scripted player movement
//!
//! The player walks a closed loop of waypoints at constant speed. Flies only
//! ever see the resulting `Player` value.

use glam::Vec2;
use orchard_core::Player;

use crate::config::PlayerConfig;

#[derive(Debug, Clone)]
pub struct PlayerScript {
    waypoints: Vec<Vec2>,
    speed: f32,
    enabled: bool,
    /// Index of the waypoint being walked toward
    next: usize,
    position: Vec2,
}

impl PlayerScript {
    pub fn new(config: &PlayerConfig) -> Self {
        let position = config.waypoints.first().copied().unwrap_or(Vec2::ZERO);
        Self {
            waypoints: config.waypoints.clone(),
            speed: config.speed.max(0.0),
            enabled: config.enabled && !config.waypoints.is_empty(),
            next: 1 % config.waypoints.len().max(1),
            position,
        }
    }

    /// Script with no player in the scene
    pub fn absent() -> Self {
        Self::new(&PlayerConfig {
            enabled: false,
            speed: 0.0,
            waypoints: Vec::new(),
        })
    }

    pub fn player(&self) -> Player {
        if self.enabled {
            Player::at(self.position)
        } else {
            Player::absent()
        }
    }

    /// Walk for `dt` seconds, possibly passing several waypoints
    pub fn advance(&mut self, dt: f32) -> Player {
        if !self.enabled || self.waypoints.len() < 2 {
            return self.player();
        }

        let mut budget = self.speed * dt;
        // Bounded so a zero-length loop can't spin forever
        for _ in 0..self.waypoints.len() * 2 {
            if budget <= 0.0 {
                break;
            }
            let target = self.waypoints[self.next];
            let to_target = target - self.position;
            let distance = to_target.length();
            if distance > budget {
                self.position += to_target / distance * budget;
                break;
            }
            self.position = target;
            budget -= distance;
            self.next = (self.next + 1) % self.waypoints.len();
        }

        self.player()
    }
}
