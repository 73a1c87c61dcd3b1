//! Collaborator traits for fly behavior
//!
//! These traits define the interface between a fly's controller and the
//! world around it, so the controller never looks anything up by itself.
//! The world lends each collaborator to the controller for one update.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which targeter the steering component should follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// The fly's current food source
    Food,
    /// The tracked threat
    Threat,
}

/// Whether steering moves toward or away from its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteeringMode {
    Seek,
    Flee,
}

impl SteeringMode {
    pub fn is_flee(self) -> bool {
        matches!(self, Self::Flee)
    }
}

/// Reports where the fly should go to feed
pub trait FoodTargeter {
    /// Current food position in world coordinates
    fn target(&self) -> Vec2;

    /// Pick another food source to visit
    fn request_new_target(&mut self);
}

/// Reports the position of the threat the fly runs from
pub trait ThreatTargeter {
    /// Threat position, or None if the threat cannot be resolved
    fn target(&self) -> Option<Vec2>;
}

/// Turns a target and a seek/flee mode into a movement direction
pub trait Steering {
    fn set_flee(&mut self, flee: bool);

    fn set_target(&mut self, target: TargetKind);
}

/// Moves the entity each frame at the configured speed
pub trait Motion {
    fn set_speed(&mut self, speed: f32);
}

/// Read-only queries about the fly's surroundings
pub trait Environment {
    /// True while the threat is hidden underwater; flies ignore it then
    fn is_submerged(&self) -> bool;
}

/// Random number source for behavior decisions
pub trait FlyRng {
    /// Fair coin, true with 50% probability
    fn coin_flip(&mut self) -> bool;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

// Covers seeded generators in tests and the swarm as well as thread_rng()
impl<T: ?Sized + rand::Rng> FlyRng for T {
    fn coin_flip(&mut self) -> bool {
        rand::Rng::gen_bool(self, 0.5)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        rand::Rng::gen_range(self, 0..len)
    }
}
