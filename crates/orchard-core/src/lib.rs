//! Headless orchard world for Orchard flies
//!
//! Provides the concrete collaborators a fly controller needs (apple tree
//! targeting, player tracking, seek/flee steering, movement) and a swarm
//! manager that runs every fly once per frame.

pub mod error;
pub mod movement;
pub mod orchard;
pub mod player;
pub mod steering;
pub mod swarm;
pub mod types;

pub use error::WorldError;
pub use movement::Movement;
pub use orchard::{AppleTreeTargeter, Orchard};
pub use player::{Player, PlayerTracker, Pond, Surroundings};
pub use steering::Seek;
pub use swarm::{Fly, FlySnapshot, Swarm, SwarmStats};
pub use types::EntityId;

// Re-export the behavior crate so drivers only need one dependency
pub mod behavior {
    pub use orchard_fly::*;
}
