//! Headless orchard simulation
//!
//! Loads layered configuration, builds an orchard with a swarm of flies,
//! walks a scripted player through it and reports what the flies did.

pub mod config;
pub mod report;
pub mod scenario;
pub mod simulation;

pub use config::SimConfig;
pub use report::RunReport;
pub use scenario::PlayerScript;
pub use simulation::Simulation;
