//! Kinematic movement at a controller-set speed

use glam::Vec2;
use orchard_fly::Motion;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Movement {
    pub speed: f32,
}

impl Movement {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// New position after moving along `direction` for `dt` seconds
    pub fn step(&self, position: Vec2, direction: Vec2, dt: f32) -> Vec2 {
        position + direction * self.speed * dt
    }
}

impl Motion for Movement {
    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_integrates_speed() {
        let mut movement = Movement::default();
        movement.set_speed(2.0);
        let next = movement.step(Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0), 0.5);
        assert_eq!(next, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_zero_direction_stays_put() {
        let movement = Movement::new(5.0);
        assert_eq!(movement.step(Vec2::ONE, Vec2::ZERO, 1.0), Vec2::ONE);
    }
}
