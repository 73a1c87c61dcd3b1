//! Seek/flee steering
//!
//! Turns the target chosen by the controller into a unit direction. Seeking
//! stops once the fly is within `arrival_distance` of its tree so eating flies
//! settle instead of circling.

use glam::Vec2;
use orchard_fly::{Steering, TargetKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seek {
    pub flee: bool,
    pub target: TargetKind,
    pub arrival_distance: f32,
}

impl Seek {
    pub fn new(arrival_distance: f32) -> Self {
        Self {
            flee: false,
            target: TargetKind::Food,
            arrival_distance,
        }
    }

    /// Unit direction to move in, or zero if there is nowhere to go
    pub fn direction(&self, position: Vec2, food: Vec2, threat: Option<Vec2>) -> Vec2 {
        let target = match self.target {
            TargetKind::Food => food,
            TargetKind::Threat => match threat {
                Some(threat) => threat,
                None => return Vec2::ZERO,
            },
        };

        let to_target = target - position;
        if self.flee {
            // Sitting exactly on the threat has no "away"
            to_target.normalize_or_zero() * -1.0
        } else if to_target.length() <= self.arrival_distance {
            Vec2::ZERO
        } else {
            to_target.normalize_or_zero()
        }
    }
}

impl Default for Seek {
    fn default() -> Self {
        Self::new(0.25)
    }
}

impl Steering for Seek {
    fn set_flee(&mut self, flee: bool) {
        self.flee = flee;
    }

    fn set_target(&mut self, target: TargetKind) {
        self.target = target;
    }
}
