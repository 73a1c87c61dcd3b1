//! Difficulty levels and the flee speed each one gives a fly

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Game difficulty, chosen once before flies are spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Insane,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::Insane];

    /// Speed a fly runs away at
    pub fn flee_speed(self) -> f32 {
        match self {
            Self::Easy => 2.5,
            Self::Normal => 3.0,
            Self::Hard => 3.2,
            Self::Insane => 4.0,
        }
    }

    /// Map a menu level (0 = easy .. 3 = insane) to a difficulty.
    /// Anything out of range falls back to Normal.
    pub fn from_level(level: i64) -> Self {
        match level {
            0 => Self::Easy,
            2 => Self::Hard,
            3 => Self::Insane,
            _ => Self::Normal,
        }
    }

    pub fn level(self) -> i64 {
        match self {
            Self::Easy => 0,
            Self::Normal => 1,
            Self::Hard => 2,
            Self::Insane => 3,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Normal => write!(f, "normal"),
            Self::Hard => write!(f, "hard"),
            Self::Insane => write!(f, "insane"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, normal, hard, insane or 0-3)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(level) = trimmed.parse::<i64>() {
            if (0..=3).contains(&level) {
                return Ok(Self::from_level(level));
            }
            return Err(ParseDifficultyError(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}
