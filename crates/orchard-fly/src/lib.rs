//! State-machine fly behavior for Orchard
//!
//! This crate implements:
//! - A three-state controller (eat, seek food, flee) evaluated once per frame
//! - The difficulty table that picks a fly's flee speed
//! - A shared flee alert so a whole swarm never plays overlapping sounds
//! - Collaborator traits decoupling the controller from any world implementation

pub mod alert;
pub mod config;
pub mod controller;
pub mod difficulty;
pub mod machine;
pub mod traits;

// Re-export main types for convenience
pub use alert::{AlertSettings, AlertSource, ClipPlayer, FleeAlert, SharedAlert, SoundClip};
pub use config::{ConfigError, FlyConfig};
pub use controller::{FlyController, FlyParts};
pub use difficulty::Difficulty;
pub use machine::{BehaviorState, EatingProgress, Effect, FlyBrain, FlyParams, Perception, Step};
pub use traits::{
    Environment, FlyRng, FoodTargeter, Motion, Steering, SteeringMode, TargetKind, ThreatTargeter,
};
