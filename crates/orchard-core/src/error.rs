use orchard_fly::ConfigError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    #[error("Orchard has no apple trees")]
    EmptyOrchard,

    #[error("Apple tree {index} has a non-finite position")]
    InvalidTree { index: usize },

    #[error("Invalid fly configuration: {0}")]
    InvalidFly(#[from] ConfigError),

    #[error("Spawn position ({x}, {y}) is not finite")]
    InvalidSpawn { x: f32, y: f32 },
}

pub type Result<T> = std::result::Result<T, WorldError>;
