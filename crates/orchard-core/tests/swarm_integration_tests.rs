//! Integration tests for swarms of flies in an orchard
//!
//! These run whole swarms for many frames against a moving player.

use glam::Vec2;
use orchard_core::behavior::{BehaviorState, Difficulty, FleeAlert, FlyConfig};
use orchard_core::{Orchard, Player, Pond, Swarm};

const DT: f32 = 1.0 / 60.0;

fn orchard_swarm(flies: usize, difficulty: Difficulty, seed: u64) -> Swarm {
    let orchard = Orchard::row(Vec2::ZERO, 30.0, 3).expect("non-empty orchard");
    let config = FlyConfig::default().with_difficulty(difficulty);
    let mut swarm = Swarm::new(orchard, config, FleeAlert::default().into_shared(), seed)
        .expect("valid config");
    swarm
        .spawn_ring(flies, Vec2::new(30.0, 0.0), 1.0)
        .expect("finite spawn positions");
    swarm
}

// ============================================================================
// Whole-swarm behavior
// ============================================================================

#[test]
fn test_swarm_settles_without_player() {
    let mut swarm = orchard_swarm(6, Difficulty::Normal, 1);
    let player = Player::absent();
    let pond = Pond::default();

    for _ in 0..120 {
        swarm.update(DT, &player, &pond);
    }

    assert_eq!(swarm.stats().flee_episodes, 0);
    assert_eq!(swarm.stats().frames_in(BehaviorState::Fleeing), 0);
    assert_eq!(swarm.state_counts()[BehaviorState::Eating.index()], 6);
    assert_eq!(swarm.alert().borrow().play_count(), 0);
}

#[test]
fn test_player_walkthrough_scatters_then_swarm_recovers() {
    let mut swarm = orchard_swarm(8, Difficulty::Normal, 2);
    let pond = Pond::default();

    // Let everyone start eating
    for _ in 0..60 {
        swarm.update(DT, &Player::absent(), &pond);
    }

    // Player walks straight through the cluster
    let mut player = Player::at(Vec2::new(10.0, 0.0));
    let mut peak_fleeing = 0;
    while player.position.x < 50.0 {
        swarm.update(DT, &player, &pond);
        peak_fleeing = peak_fleeing.max(swarm.state_counts()[BehaviorState::Fleeing.index()]);
        player.position.x += 4.0 * DT;
    }
    assert!(peak_fleeing > 0);
    assert!(swarm.stats().flee_episodes >= 8);

    // The whole cluster bolted at once; the shared alert only fired a few times
    let plays = swarm.alert().borrow().play_count();
    assert!(plays >= 1);
    assert!(plays < swarm.stats().flee_episodes);

    // Player leaves, flies go back to feeding
    let eating_before = swarm.stats().frames_in(BehaviorState::Eating);
    for _ in 0..1200 {
        swarm.update(DT, &Player::absent(), &pond);
    }
    assert_eq!(swarm.state_counts()[BehaviorState::Fleeing.index()], 0);
    assert!(swarm.stats().frames_in(BehaviorState::Eating) > eating_before);
}

#[test]
fn test_hiding_underwater_keeps_flies_calm() {
    let mut swarm = orchard_swarm(5, Difficulty::Insane, 3);
    let pond = Pond::new(0.0);
    let diver = Player::at(Vec2::new(30.0, -0.5));

    for _ in 0..300 {
        swarm.update(DT, &diver, &pond);
    }

    assert_eq!(swarm.stats().flee_episodes, 0);
    assert_eq!(swarm.alert().borrow().play_count(), 0);
}

#[test]
fn test_harder_difficulty_flees_faster() {
    let mut easy = orchard_swarm(1, Difficulty::Easy, 4);
    let mut insane = orchard_swarm(1, Difficulty::Insane, 4);
    let player = Player::at(Vec2::new(30.0, -2.0));
    let pond = Pond::default();

    for _ in 0..30 {
        easy.update(DT, &player, &pond);
        insane.update(DT, &player, &pond);
    }

    let easy_distance = easy.flies()[0].position.distance(player.position);
    let insane_distance = insane.flies()[0].position.distance(player.position);
    assert!(insane_distance > easy_distance);
    assert_eq!(easy.flies()[0].speed(), 2.5);
    assert_eq!(insane.flies()[0].speed(), 4.0);
}

#[test]
fn test_same_seed_same_run() {
    let run = |seed| {
        let mut swarm = orchard_swarm(4, Difficulty::Hard, seed);
        let mut player = Player::at(Vec2::new(0.0, 0.0));
        for _ in 0..600 {
            swarm.update(DT, &player, &Pond::default());
            player.position.x += 6.0 * DT;
        }
        swarm
            .snapshots()
            .into_iter()
            .map(|s| (s.position, s.state, s.tree))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(11), run(11));
}

#[test]
fn test_config_from_ron() {
    let config: FlyConfig = ron::from_str(
        "(flee_distance: 3.0, max_eat_duration: 1.0, difficulty: Hard, \
         flee_sound: (name: \"buzz\", length_secs: 0.5))",
    )
    .expect("valid RON");

    let orchard = Orchard::new(vec![Vec2::ZERO]).expect("one tree");
    let mut swarm =
        Swarm::new(orchard, config, FleeAlert::default().into_shared(), 5).expect("valid config");
    swarm.spawn_at(Vec2::new(0.0, 0.5)).expect("finite");

    // Eats for a second, then the lone tree is the only option again
    for _ in 0..61 {
        swarm.update(DT, &Player::absent(), &Pond::default());
    }
    assert_eq!(swarm.food_retargets(), 1);
}
