//! Fly spawning and per-frame updates
//!
//! The swarm owns each fly's collaborators and lends them to its controller
//! every frame. All flies share one player tracker, one RNG for behavior coin
//! flips and one flee alert.

use glam::Vec2;
use orchard_fly::{
    BehaviorState, FlyConfig, FlyController, FlyParts, FoodTargeter, SharedAlert, ThreatTargeter,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};
use crate::movement::Movement;
use crate::orchard::{AppleTreeTargeter, Orchard};
use crate::player::{Player, PlayerTracker, Pond, Surroundings};
use crate::steering::Seek;
use crate::types::EntityId;

/// A single fly and the collaborators its controller drives
#[derive(Debug)]
pub struct Fly {
    pub id: EntityId,
    pub position: Vec2,
    controller: FlyController,
    food: AppleTreeTargeter,
    seek: Seek,
    movement: Movement,
}

impl Fly {
    pub fn state(&self) -> BehaviorState {
        self.controller.state()
    }

    pub fn controller(&self) -> &FlyController {
        &self.controller
    }

    pub fn food(&self) -> &AppleTreeTargeter {
        &self.food
    }

    pub fn seek(&self) -> &Seek {
        &self.seek
    }

    pub fn speed(&self) -> f32 {
        self.movement.speed
    }

    /// Run the controller, then move along the resulting steering direction
    fn update(
        &mut self,
        dt: f32,
        threat: &PlayerTracker,
        surroundings: &Surroundings,
        rng: &mut Xoshiro256StarStar,
    ) -> BehaviorState {
        let mut parts = FlyParts {
            food: &mut self.food,
            threat,
            steering: &mut self.seek,
            motion: &mut self.movement,
            environment: surroundings,
        };
        let state = self.controller.update(dt, self.position, &mut parts, rng);

        let direction = self
            .seek
            .direction(self.position, self.food.target(), threat.target());
        self.position = self.movement.step(self.position, direction, dt);

        state
    }

    pub fn snapshot(&self) -> FlySnapshot {
        FlySnapshot {
            id: self.id,
            position: self.position,
            state: self.state(),
            tree: self.food.current_tree(),
            eating_elapsed: self.controller.progress().elapsed,
        }
    }
}

/// Render/report data for one fly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlySnapshot {
    pub id: EntityId,
    pub position: Vec2,
    pub state: BehaviorState,
    pub tree: usize,
    pub eating_elapsed: f32,
}

/// Running totals over the swarm's lifetime
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwarmStats {
    pub frames: u64,
    /// Fly-frames spent in each state, indexed by `BehaviorState::index`
    pub state_frames: [u64; 3],
    pub transitions: u64,
    /// Times any fly entered `Fleeing`
    pub flee_episodes: u64,
}

impl SwarmStats {
    pub fn frames_in(&self, state: BehaviorState) -> u64 {
        self.state_frames[state.index()]
    }
}

/// Manager for a group of flies sharing one orchard
#[derive(Debug)]
pub struct Swarm {
    flies: Vec<Fly>,
    orchard: Orchard,
    config: FlyConfig,
    alert: SharedAlert,
    tracker: PlayerTracker,
    rng: Xoshiro256StarStar,
    next_seed: u64,
    arrival_distance: f32,
    /// Fly the alert source is attached to; removing it drops the source
    alert_owner: Option<EntityId>,
    stats: SwarmStats,
}

impl Swarm {
    /// Create an empty swarm. Fails if the fly config is invalid.
    pub fn new(orchard: Orchard, config: FlyConfig, alert: SharedAlert, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            flies: Vec::new(),
            orchard,
            config,
            alert,
            tracker: PlayerTracker::new(),
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            next_seed: seed.wrapping_add(1),
            arrival_distance: Seek::default().arrival_distance,
            alert_owner: None,
            stats: SwarmStats::default(),
        })
    }

    /// Distance at which seeking flies stop at their tree
    pub fn with_arrival_distance(mut self, distance: f32) -> Self {
        self.arrival_distance = distance;
        self
    }

    /// Spawn a single fly at a specific position
    pub fn spawn_at(&mut self, position: Vec2) -> Result<EntityId> {
        if !position.is_finite() {
            return Err(WorldError::InvalidSpawn {
                x: position.x,
                y: position.y,
            });
        }

        let controller = FlyController::new(&self.config, self.alert.clone())?;
        let food = self.orchard.targeter(position, self.next_seed);
        self.next_seed = self.next_seed.wrapping_add(1);

        let fly = Fly {
            id: EntityId::new(),
            position,
            controller,
            food,
            seek: Seek::new(self.arrival_distance),
            movement: Movement::default(),
        };
        let id = fly.id;

        // Newest fly takes over the alert source
        self.alert_owner = Some(id);
        self.flies.push(fly);

        log::info!(
            "Spawned {} at ({:.1}, {:.1}) heading for tree {}. Population: {}",
            id,
            position.x,
            position.y,
            self.flies.last().map(|f| f.food.current_tree()).unwrap_or(0),
            self.flies.len()
        );

        Ok(id)
    }

    /// Spawn `count` flies evenly spread on a circle
    pub fn spawn_ring(&mut self, count: usize, center: Vec2, radius: f32) -> Result<Vec<EntityId>> {
        (0..count)
            .map(|i| {
                let angle = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;
                self.spawn_at(center + Vec2::new(angle.cos(), angle.sin()) * radius)
            })
            .collect()
    }

    /// Remove a fly. Returns false if it doesn't exist.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(index) = self.flies.iter().position(|f| f.id == id) else {
            return false;
        };
        self.flies.remove(index);

        if self.alert_owner == Some(id) {
            // The next fly to check the alert re-creates it
            self.alert.borrow_mut().release();
            self.alert_owner = self.flies.last().map(|f| f.id);
        }

        log::info!("Removed {}. Population: {}", id, self.flies.len());
        true
    }

    /// Advance every fly by one frame
    pub fn update(&mut self, dt: f32, player: &Player, pond: &Pond) -> &SwarmStats {
        self.tracker.track(player);
        let surroundings = Surroundings::observe(player, pond);

        for fly in &mut self.flies {
            let previous = fly.state();
            let state = fly.update(dt, &self.tracker, &surroundings, &mut self.rng);

            self.stats.state_frames[state.index()] += 1;
            if state != previous {
                self.stats.transitions += 1;
                if state == BehaviorState::Fleeing {
                    self.stats.flee_episodes += 1;
                }
            }
        }

        self.alert.borrow_mut().advance(dt);
        self.stats.frames += 1;
        &self.stats
    }

    pub fn flies(&self) -> &[Fly] {
        &self.flies
    }

    pub fn get(&self, id: EntityId) -> Option<&Fly> {
        self.flies.iter().find(|f| f.id == id)
    }

    pub fn orchard(&self) -> &Orchard {
        &self.orchard
    }

    pub fn alert(&self) -> &SharedAlert {
        &self.alert
    }

    pub fn stats(&self) -> &SwarmStats {
        &self.stats
    }

    pub fn count(&self) -> usize {
        self.flies.len()
    }

    /// Number of flies currently in each state
    pub fn state_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for fly in &self.flies {
            counts[fly.state().index()] += 1;
        }
        counts
    }

    /// Total new-tree requests made by all living flies
    pub fn food_retargets(&self) -> u64 {
        self.flies.iter().map(|f| f.food.retargets()).sum()
    }

    pub fn snapshots(&self) -> Vec<FlySnapshot> {
        self.flies.iter().map(Fly::snapshot).collect()
    }
}
