//! Per-fly controller wiring the behavior machine to its collaborators

use glam::Vec2;

use crate::alert::{SharedAlert, SoundClip};
use crate::config::{ConfigError, FlyConfig};
use crate::machine::{BehaviorState, EatingProgress, Effect, FlyBrain, FlyParams, Perception};
use crate::traits::{Environment, FlyRng, FoodTargeter, Motion, Steering, ThreatTargeter};

/// Collaborators lent to the controller for one update
pub struct FlyParts<'a> {
    pub food: &'a mut dyn FoodTargeter,
    pub threat: &'a dyn ThreatTargeter,
    pub steering: &'a mut dyn Steering,
    pub motion: &'a mut dyn Motion,
    pub environment: &'a dyn Environment,
}

/// Drives one fly's behavior machine each frame
#[derive(Debug)]
pub struct FlyController {
    brain: FlyBrain,
    flee_sound: SoundClip,
    alert: SharedAlert,
}

impl FlyController {
    /// Build a controller, resolving the flee speed from the difficulty
    pub fn new(config: &FlyConfig, alert: SharedAlert) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            brain: FlyBrain::new(FlyParams::from(config)),
            flee_sound: config.flee_sound.clone(),
            alert,
        })
    }

    pub fn state(&self) -> BehaviorState {
        self.brain.state()
    }

    pub fn progress(&self) -> EatingProgress {
        self.brain.progress()
    }

    pub fn flee_speed(&self) -> f32 {
        self.brain.params().flee_speed
    }

    pub fn brain(&self) -> &FlyBrain {
        &self.brain
    }

    pub fn alert(&self) -> &SharedAlert {
        &self.alert
    }

    /// Run one frame. Returns the state the fly is in afterwards.
    pub fn update<R: FlyRng + ?Sized>(
        &mut self,
        dt: f32,
        position: Vec2,
        parts: &mut FlyParts<'_>,
        rng: &mut R,
    ) -> BehaviorState {
        let perception = Perception {
            position,
            threat: parts.threat.target(),
            food: parts.food.target(),
            submerged: parts.environment.is_submerged(),
            alert_playing: self.alert.borrow_mut().is_playing(),
        };

        let previous = self.brain.state();
        let effects = self.brain.advance(dt, &perception, rng);
        if previous != self.brain.state() {
            log::debug!(
                "Fly at ({:.1}, {:.1}): {} -> {}",
                position.x,
                position.y,
                previous,
                self.brain.state()
            );
        }

        for effect in effects {
            match effect {
                Effect::PlayAlert => self.alert.borrow_mut().play(&self.flee_sound),
                Effect::RequestNewFood => parts.food.request_new_target(),
                Effect::Steer { mode, target } => {
                    parts.steering.set_flee(mode.is_flee());
                    parts.steering.set_target(target);
                }
                Effect::SetSpeed(speed) => parts.motion.set_speed(speed),
            }
        }

        self.brain.state()
    }
}
