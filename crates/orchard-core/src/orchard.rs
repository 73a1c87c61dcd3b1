//! Apple trees and the targeter that picks which one a fly visits

use glam::Vec2;
use orchard_fly::{FlyRng, FoodTargeter};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use std::rc::Rc;

use crate::error::{Result, WorldError};

/// The set of apple trees flies feed on
#[derive(Debug, Clone)]
pub struct Orchard {
    trees: Rc<[Vec2]>,
}

impl Orchard {
    /// Create an orchard. Needs at least one tree, all at finite positions.
    pub fn new(trees: Vec<Vec2>) -> Result<Self> {
        if trees.is_empty() {
            return Err(WorldError::EmptyOrchard);
        }
        if let Some(index) = trees.iter().position(|t| !t.is_finite()) {
            return Err(WorldError::InvalidTree { index });
        }
        Ok(Self {
            trees: trees.into(),
        })
    }

    /// Trees evenly spaced along a row
    pub fn row(start: Vec2, spacing: f32, count: usize) -> Result<Self> {
        Self::new(
            (0..count)
                .map(|i| start + Vec2::new(i as f32 * spacing, 0.0))
                .collect(),
        )
    }

    pub fn trees(&self) -> &[Vec2] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Index of the tree closest to `position`
    pub fn nearest(&self, position: Vec2) -> usize {
        self.trees
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(position)
                    .partial_cmp(&b.distance_squared(position))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Targeter starting at the tree nearest to `position`
    pub fn targeter(&self, position: Vec2, seed: u64) -> AppleTreeTargeter {
        AppleTreeTargeter {
            trees: Rc::clone(&self.trees),
            current: self.nearest(position),
            retargets: 0,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }
}

/// Food targeter pointing a fly at one apple tree at a time
#[derive(Debug, Clone)]
pub struct AppleTreeTargeter {
    trees: Rc<[Vec2]>,
    current: usize,
    retargets: u64,
    rng: Xoshiro256StarStar,
}

impl AppleTreeTargeter {
    pub fn current_tree(&self) -> usize {
        self.current
    }

    /// How many times a new tree was requested
    pub fn retargets(&self) -> u64 {
        self.retargets
    }
}

impl FoodTargeter for AppleTreeTargeter {
    fn target(&self) -> Vec2 {
        self.trees[self.current]
    }

    /// Move to a random tree other than the current one
    fn request_new_target(&mut self) {
        self.retargets += 1;
        let count = self.trees.len();
        if count < 2 {
            return;
        }
        // Pick among the others, skipping over the current index
        let pick = self.rng.pick_index(count - 1);
        self.current = if pick >= self.current { pick + 1 } else { pick };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_orchard_rejected() {
        assert_eq!(Orchard::new(vec![]).unwrap_err(), WorldError::EmptyOrchard);
    }

    #[test]
    fn test_non_finite_tree_rejected() {
        let err = Orchard::new(vec![Vec2::ZERO, Vec2::new(f32::NAN, 1.0)]).unwrap_err();
        assert_eq!(err, WorldError::InvalidTree { index: 1 });
    }

    #[test]
    fn test_row_layout() {
        let orchard = Orchard::row(Vec2::new(10.0, 0.0), 5.0, 3).unwrap();
        assert_eq!(
            orchard.trees(),
            &[
                Vec2::new(10.0, 0.0),
                Vec2::new(15.0, 0.0),
                Vec2::new(20.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_targeter_starts_at_nearest_tree() {
        let orchard = Orchard::row(Vec2::ZERO, 10.0, 4).unwrap();
        let targeter = orchard.targeter(Vec2::new(19.0, 3.0), 1);
        assert_eq!(targeter.current_tree(), 2);
        assert_eq!(targeter.target(), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_new_target_is_always_different() {
        let orchard = Orchard::row(Vec2::ZERO, 10.0, 3).unwrap();
        let mut targeter = orchard.targeter(Vec2::ZERO, 42);

        let mut visited = [false; 3];
        for _ in 0..100 {
            let before = targeter.current_tree();
            targeter.request_new_target();
            assert_ne!(targeter.current_tree(), before);
            visited[targeter.current_tree()] = true;
        }

        assert!(visited.iter().all(|&v| v));
        assert_eq!(targeter.retargets(), 100);
    }

    #[test]
    fn test_single_tree_stays_put() {
        let orchard = Orchard::new(vec![Vec2::new(3.0, 4.0)]).unwrap();
        let mut targeter = orchard.targeter(Vec2::ZERO, 7);
        targeter.request_new_target();
        assert_eq!(targeter.current_tree(), 0);
        assert_eq!(targeter.retargets(), 1);
    }
}
