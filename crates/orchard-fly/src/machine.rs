//! The fly's three-state behavior machine
//!
//! Each frame the state is classified from scratch, in priority order:
//! 1. Flee if the threat is within `flee_distance` and not submerged
//! 2. Eat if food is within `food_proximity_distance` and the fly isn't full
//! 3. Otherwise fly toward food
//!
//! Only the eating progress carries over between frames. `FlyBrain::step`
//! returns the next brain plus the effects the world has to apply, so the
//! whole decision can be tested without any collaborators.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::FlyConfig;
use crate::traits::{FlyRng, SteeringMode, TargetKind};

/// Fly behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Sitting on a tree, eating
    Eating,
    /// Flying toward the current tree
    #[default]
    SeekingFood,
    /// Running away from the threat
    Fleeing,
}

impl BehaviorState {
    pub const ALL: [BehaviorState; 3] = [Self::Eating, Self::SeekingFood, Self::Fleeing];

    /// Stable index for per-state tables
    pub fn index(self) -> usize {
        match self {
            Self::Eating => 0,
            Self::SeekingFood => 1,
            Self::Fleeing => 2,
        }
    }
}

impl std::fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eating => write!(f, "Eating"),
            Self::SeekingFood => write!(f, "Seeking food"),
            Self::Fleeing => write!(f, "Fleeing"),
        }
    }
}

/// How long the fly has been eating at the current tree
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EatingProgress {
    pub elapsed: f32,
    pub finished: bool,
}

impl EatingProgress {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Resolved tuning values the machine reads each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlyParams {
    pub flee_distance: f32,
    pub food_approach_speed: f32,
    pub food_proximity_distance: f32,
    pub max_eat_duration: f32,
    /// Fixed at construction from the difficulty
    pub flee_speed: f32,
}

impl From<&FlyConfig> for FlyParams {
    fn from(config: &FlyConfig) -> Self {
        Self {
            flee_distance: config.flee_distance,
            food_approach_speed: config.food_approach_speed,
            food_proximity_distance: config.food_proximity_distance,
            max_eat_duration: config.max_eat_duration,
            flee_speed: config.difficulty.flee_speed(),
        }
    }
}

impl Default for FlyParams {
    fn default() -> Self {
        Self::from(&FlyConfig::default())
    }
}

/// Everything the machine needs to know about the world for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    pub position: Vec2,
    /// None when the threat can't be resolved
    pub threat: Option<Vec2>,
    pub food: Vec2,
    pub submerged: bool,
    /// Whether the shared flee alert is already sounding
    pub alert_playing: bool,
}

impl Perception {
    /// Distance to the threat, `f32::MAX` if unknown
    pub fn distance_to_threat(&self) -> f32 {
        match self.threat {
            Some(threat) => self.position.distance(threat),
            None => f32::MAX,
        }
    }

    pub fn distance_to_food(&self) -> f32 {
        self.position.distance(self.food)
    }
}

/// Side effect requested by one step, applied by the controller in order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Start the shared flee alert
    PlayAlert,
    /// Ask the food targeter for another tree
    RequestNewFood,
    Steer {
        mode: SteeringMode,
        target: TargetKind,
    },
    SetSpeed(f32),
}

pub type Effects = SmallVec<[Effect; 4]>;

/// Result of one step
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub brain: FlyBrain,
    pub effects: Effects,
}

/// The state machine value: current state plus carried eating progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlyBrain {
    params: FlyParams,
    state: BehaviorState,
    progress: EatingProgress,
}

impl FlyBrain {
    pub fn new(params: FlyParams) -> Self {
        Self {
            params,
            state: BehaviorState::SeekingFood,
            progress: EatingProgress::default(),
        }
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn progress(&self) -> EatingProgress {
        self.progress
    }

    pub fn params(&self) -> &FlyParams {
        &self.params
    }

    /// Classify the next state and collect the frame's effects
    pub fn step<R: FlyRng + ?Sized>(&self, dt: f32, perception: &Perception, rng: &mut R) -> Step {
        let mut next = *self;
        let mut effects = Effects::new();

        next.classify(self.state, perception, rng, &mut effects);
        next.apply_state(dt, &mut effects);

        Step {
            brain: next,
            effects,
        }
    }

    /// In-place variant of `step`
    pub fn advance<R: FlyRng + ?Sized>(
        &mut self,
        dt: f32,
        perception: &Perception,
        rng: &mut R,
    ) -> Effects {
        let Step { brain, effects } = self.step(dt, perception, rng);
        *self = brain;
        effects
    }

    fn classify<R: FlyRng + ?Sized>(
        &mut self,
        previous: BehaviorState,
        perception: &Perception,
        rng: &mut R,
        effects: &mut Effects,
    ) {
        let distance_to_threat = perception.distance_to_threat();
        let distance_to_food = perception.distance_to_food();

        if distance_to_threat < self.params.flee_distance && !perception.submerged {
            // One buzz per fleeing episode, and never on top of another fly's
            if previous != BehaviorState::Fleeing && !perception.alert_playing {
                effects.push(Effect::PlayAlert);
            }
            self.state = BehaviorState::Fleeing;
            self.progress.reset();
            // Startled flies sometimes pick a different tree
            if rng.coin_flip() {
                effects.push(Effect::RequestNewFood);
            }
        } else if distance_to_food < self.params.food_proximity_distance && !self.progress.finished
        {
            self.state = BehaviorState::Eating;
        } else {
            self.state = BehaviorState::SeekingFood;
            self.progress.reset();
        }
    }

    fn apply_state(&mut self, dt: f32, effects: &mut Effects) {
        match self.state {
            BehaviorState::Fleeing => {
                effects.push(Effect::Steer {
                    mode: SteeringMode::Flee,
                    target: TargetKind::Threat,
                });
                effects.push(Effect::SetSpeed(self.params.flee_speed));
            }
            BehaviorState::SeekingFood => {
                effects.push(Effect::Steer {
                    mode: SteeringMode::Seek,
                    target: TargetKind::Food,
                });
                effects.push(Effect::SetSpeed(self.params.food_approach_speed));
            }
            BehaviorState::Eating => {
                // Steering and speed from the previous frame are left alone
                self.progress.elapsed += dt;
                if self.progress.elapsed >= self.params.max_eat_duration {
                    self.progress.finished = true;
                    effects.push(Effect::RequestNewFood);
                }
            }
        }
    }
}

impl Default for FlyBrain {
    fn default() -> Self {
        Self::new(FlyParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Coin that always lands the same way
    struct FixedCoin(bool);

    impl FlyRng for FixedCoin {
        fn coin_flip(&mut self) -> bool {
            self.0
        }

        fn pick_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn params() -> FlyParams {
        FlyParams {
            flee_distance: 5.0,
            food_approach_speed: 2.0,
            food_proximity_distance: 2.0,
            max_eat_duration: 3.0,
            flee_speed: 3.0,
        }
    }

    fn perceive(threat: Option<f32>, food: f32) -> Perception {
        Perception {
            position: Vec2::ZERO,
            threat: threat.map(|d| Vec2::new(d, 0.0)),
            food: Vec2::new(0.0, food),
            submerged: false,
            alert_playing: false,
        }
    }

    #[test]
    fn test_initial_state() {
        let brain = FlyBrain::new(params());
        assert_eq!(brain.state(), BehaviorState::SeekingFood);
        assert_eq!(brain.progress(), EatingProgress::default());
    }

    #[test]
    fn test_unknown_threat_is_infinitely_far() {
        let p = perceive(None, 1.0);
        assert_eq!(p.distance_to_threat(), f32::MAX);
        assert_eq!(p.distance_to_food(), 1.0);
    }

    #[test]
    fn test_seeking_food_effects() {
        let brain = FlyBrain::new(params());
        let step = brain.step(0.1, &perceive(None, 10.0), &mut FixedCoin(true));

        assert_eq!(step.brain.state(), BehaviorState::SeekingFood);
        assert_eq!(
            step.effects.as_slice(),
            &[
                Effect::Steer {
                    mode: SteeringMode::Seek,
                    target: TargetKind::Food
                },
                Effect::SetSpeed(2.0),
            ]
        );
    }

    #[test]
    fn test_fleeing_effects_in_order() {
        let brain = FlyBrain::new(params());
        let step = brain.step(0.1, &perceive(Some(3.0), 10.0), &mut FixedCoin(true));

        assert_eq!(step.brain.state(), BehaviorState::Fleeing);
        assert_eq!(
            step.effects.as_slice(),
            &[
                Effect::PlayAlert,
                Effect::RequestNewFood,
                Effect::Steer {
                    mode: SteeringMode::Flee,
                    target: TargetKind::Threat
                },
                Effect::SetSpeed(3.0),
            ]
        );
    }

    #[test]
    fn test_coin_tails_keeps_food_target() {
        let brain = FlyBrain::new(params());
        let step = brain.step(0.1, &perceive(Some(3.0), 10.0), &mut FixedCoin(false));
        assert!(!step.effects.contains(&Effect::RequestNewFood));
    }

    #[test]
    fn test_flee_beats_eating() {
        let brain = FlyBrain::new(params());
        let step = brain.step(0.1, &perceive(Some(1.0), 0.5), &mut FixedCoin(false));
        assert_eq!(step.brain.state(), BehaviorState::Fleeing);
    }

    #[test]
    fn test_submerged_threat_ignored() {
        let brain = FlyBrain::new(params());
        let mut p = perceive(Some(1.0), 0.5);
        p.submerged = true;

        let step = brain.step(0.1, &p, &mut FixedCoin(true));
        assert_eq!(step.brain.state(), BehaviorState::Eating);
        assert!(!step.effects.contains(&Effect::PlayAlert));
    }

    #[test]
    fn test_threat_exactly_at_flee_distance_does_not_flee() {
        let brain = FlyBrain::new(params());
        let step = brain.step(0.1, &perceive(Some(5.0), 10.0), &mut FixedCoin(true));
        assert_eq!(step.brain.state(), BehaviorState::SeekingFood);
    }

    #[test]
    fn test_eating_accumulates_without_movement_effects() {
        let mut brain = FlyBrain::new(params());
        let effects = brain.advance(0.5, &perceive(Some(10.0), 1.0), &mut FixedCoin(true));

        assert_eq!(brain.state(), BehaviorState::Eating);
        assert!(effects.is_empty());
        assert_eq!(brain.progress().elapsed, 0.5);
        assert!(!brain.progress().finished);
    }

    #[test]
    fn test_finished_eating_moves_on() {
        let mut brain = FlyBrain::new(params());
        let p = perceive(Some(10.0), 1.0);
        let mut coin = FixedCoin(true);

        brain.advance(1.0, &p, &mut coin);
        brain.advance(1.0, &p, &mut coin);
        let effects = brain.advance(1.0, &p, &mut coin);

        assert_eq!(brain.state(), BehaviorState::Eating);
        assert!(brain.progress().finished);
        assert_eq!(effects.as_slice(), &[Effect::RequestNewFood]);

        // Food is still close but the fly is full
        brain.advance(1.0, &p, &mut coin);
        assert_eq!(brain.state(), BehaviorState::SeekingFood);
        assert_eq!(brain.progress(), EatingProgress::default());
    }

    #[test]
    fn test_entering_flee_resets_progress() {
        let mut brain = FlyBrain::new(params());
        let mut coin = FixedCoin(false);
        brain.advance(2.0, &perceive(Some(10.0), 1.0), &mut coin);
        assert_eq!(brain.progress().elapsed, 2.0);

        brain.advance(0.1, &perceive(Some(3.0), 1.0), &mut coin);
        assert_eq!(brain.state(), BehaviorState::Fleeing);
        assert_eq!(brain.progress(), EatingProgress::default());
    }

    #[test]
    fn test_alert_once_per_episode() {
        let mut brain = FlyBrain::new(params());
        let mut coin = FixedCoin(false);
        let close = perceive(Some(3.0), 10.0);

        let first = brain.advance(0.1, &close, &mut coin);
        assert!(first.contains(&Effect::PlayAlert));

        // Still fleeing and the alert finished; no retrigger
        let second = brain.advance(0.1, &close, &mut coin);
        assert!(!second.contains(&Effect::PlayAlert));

        // Episode ends, a new one starts
        brain.advance(0.1, &perceive(Some(20.0), 10.0), &mut coin);
        let third = brain.advance(0.1, &close, &mut coin);
        assert!(third.contains(&Effect::PlayAlert));
    }

    #[test]
    fn test_alert_not_started_while_playing() {
        let brain = FlyBrain::new(params());
        let mut p = perceive(Some(3.0), 10.0);
        p.alert_playing = true;

        let step = brain.step(0.1, &p, &mut FixedCoin(false));
        assert_eq!(step.brain.state(), BehaviorState::Fleeing);
        assert!(!step.effects.contains(&Effect::PlayAlert));
    }

    #[test]
    fn test_step_leaves_input_brain_untouched() {
        let brain = FlyBrain::new(params());
        let _ = brain.step(0.1, &perceive(Some(3.0), 10.0), &mut FixedCoin(true));
        assert_eq!(brain.state(), BehaviorState::SeekingFood);
    }

    #[test]
    fn test_params_from_config_uses_difficulty() {
        let config = FlyConfig::default().with_difficulty(crate::Difficulty::Insane);
        let params = FlyParams::from(&config);
        assert_eq!(params.flee_speed, 4.0);
        assert_eq!(params.flee_distance, config.flee_distance);
    }

    #[test]
    fn test_state_indices_unique() {
        let mut seen = [false; 3];
        for state in BehaviorState::ALL {
            assert!(!seen[state.index()]);
            seen[state.index()] = true;
        }
    }
}
