//! End-of-run summary

use orchard_fly::{BehaviorState, Difficulty};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub frames: u64,
    pub seconds: f32,
    pub flies: usize,
    pub difficulty: Difficulty,
    /// Fly-frames per state, indexed by `BehaviorState::index`
    pub state_frames: [u64; 3],
    pub transitions: u64,
    pub flee_episodes: u64,
    pub alert_plays: u64,
    pub food_retargets: u64,
    /// How many flies are in each state at the end
    pub final_counts: [usize; 3],
}

impl RunReport {
    /// Share of fly-frames spent in `state`, 0.0 - 1.0
    pub fn share(&self, state: BehaviorState) -> f32 {
        let total: u64 = self.state_frames.iter().sum();
        if total == 0 {
            0.0
        } else {
            self.state_frames[state.index()] as f32 / total as f32
        }
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Orchard run: {} frames ({:.1}s), {} flies, difficulty {}",
            self.frames, self.seconds, self.flies, self.difficulty
        )?;
        for state in BehaviorState::ALL {
            writeln!(
                f,
                "  {:<13} {:>5.1}%  (now {})",
                state.to_string(),
                self.share(state) * 100.0,
                self.final_counts[state.index()]
            )?;
        }
        writeln!(f, "  transitions    {}", self.transitions)?;
        writeln!(f, "  flee episodes  {}", self.flee_episodes)?;
        writeln!(f, "  alerts played  {}", self.alert_plays)?;
        write!(f, "  tree changes   {}", self.food_retargets)
    }
}
