//! Frame loop tying the world, the swarm and the player script together

use anyhow::{Context, Result};
use glam::Vec2;
use orchard_core::{Orchard, Pond, Swarm};
use orchard_fly::{AlertSettings, BehaviorState, Difficulty, FleeAlert};

use crate::config::{RunConfig, SimConfig};
use crate::report::RunReport;
use crate::scenario::PlayerScript;

pub struct Simulation {
    swarm: Swarm,
    script: PlayerScript,
    pond: Pond,
    run: RunConfig,
    difficulty: Difficulty,
    frame: u64,
}

impl Simulation {
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        let world = &config.world;
        let orchard = Orchard::row(Vec2::ZERO, world.tree_spacing, world.tree_count)
            .context("Failed to plant orchard")?;
        let first_tree = orchard.trees()[0];

        let alert = FleeAlert::headless(AlertSettings::default()).into_shared();
        let mut swarm = Swarm::new(orchard, config.fly.clone(), alert, config.run.seed)
            .context("Failed to create swarm")?
            .with_arrival_distance(world.arrival_distance);
        swarm
            .spawn_ring(world.fly_count, first_tree, world.spawn_radius)
            .context("Failed to spawn flies")?;

        if config.player.enabled && config.player.waypoints.is_empty() {
            log::warn!("Player enabled without waypoints; running without a player");
        }

        Ok(Self {
            swarm,
            script: PlayerScript::new(&config.player),
            pond: Pond {
                water_line: world.water_line,
            },
            run: config.run.clone(),
            difficulty: config.fly.difficulty,
            frame: 0,
        })
    }

    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the player and every fly by one frame
    pub fn step(&mut self) {
        let player = self.script.advance(self.run.dt);
        self.swarm.update(self.run.dt, &player, &self.pond);
        self.frame += 1;

        if self.run.log_every > 0 && self.frame % self.run.log_every == 0 {
            let counts = self.swarm.state_counts();
            log::info!(
                "Frame {}: eating {}, seeking {}, fleeing {} (player at {:.1}, {:.1})",
                self.frame,
                counts[BehaviorState::Eating.index()],
                counts[BehaviorState::SeekingFood.index()],
                counts[BehaviorState::Fleeing.index()],
                player.position.x,
                player.position.y
            );
        }
    }

    /// Run all configured frames and summarize
    pub fn run(&mut self) -> RunReport {
        log::info!(
            "Running {} frames with {} flies",
            self.run.frames,
            self.swarm.count()
        );
        for _ in 0..self.run.frames {
            self.step();
        }
        self.report()
    }

    pub fn report(&self) -> RunReport {
        let stats = self.swarm.stats();
        RunReport {
            frames: self.frame,
            seconds: self.frame as f32 * self.run.dt,
            flies: self.swarm.count(),
            difficulty: self.difficulty,
            state_frames: stats.state_frames,
            transitions: stats.transitions,
            flee_episodes: stats.flee_episodes,
            alert_plays: self.swarm.alert().borrow().play_count(),
            food_retargets: self.swarm.food_retargets(),
            final_counts: self.swarm.state_counts(),
        }
    }
}
