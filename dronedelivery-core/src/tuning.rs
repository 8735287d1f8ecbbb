use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Gameplay tuning. Runtime/canvas layout lives in `config`.

/// Milliseconds in one 60 Hz frame; delta-time is expressed in these units.
pub const FRAME_UNIT_MS: f64 = 1000.0 / 60.0;

pub const ARRIVAL_DISTANCE: f32 = 2.0;
pub const BASE_TOLERANCE: f32 = 5.0;
pub const COLLISION_BUFFER: f32 = 5.0;

pub const BASE_RECHARGE: f32 = 2.0;
// Docking recharge is capped at the stock capacity, not the upgraded one.
pub const RECHARGE_CAP: f32 = 100.0;
pub const INITIAL_MAX_BATTERY: f32 = 100.0;
pub const STORM_DRAIN_FACTOR: f32 = 1.5;

pub const SCORE_PENALTY: u32 = 50;
pub const LEVEL_UP_BONUS: u32 = 500;
pub const DELIVERIES_PER_LEVEL: u32 = 5;

pub const INITIAL_DELIVERY_POINTS: usize = 6;
pub const REPLENISH_BELOW_ACTIVE: usize = 3;
pub const DELIVERY_VALUE_MIN: u32 = 50;
pub const DELIVERY_VALUE_SPREAD: u32 = 100;
pub const PICK_RADIUS_PADDING: f32 = 10.0;

pub const OBSTACLE_SIZE_MIN: f32 = 30.0;
pub const OBSTACLE_SIZE_SPREAD: f32 = 40.0;

pub const SPEED_STEP_PER_LEVEL: f32 = 0.2;
pub const WEATHER_RESISTANCE_PER_LEVEL: f32 = 0.1;
pub const BATTERY_UPGRADE_CAPACITY: f32 = 20.0;

pub const NOTICE_DURATION_MS: f64 = 3000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    pub obstacle_count: usize,
    pub battery_drain: f32,
    pub delivery_reward: u32,
    pub weather_change_chance: f32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                obstacle_count: 3,
                battery_drain: 0.05,
                delivery_reward: 100,
                weather_change_chance: 0.002,
            },
            Difficulty::Medium => DifficultySettings {
                obstacle_count: 5,
                battery_drain: 0.08,
                delivery_reward: 150,
                weather_change_chance: 0.004,
            },
            Difficulty::Hard => DifficultySettings {
                obstacle_count: 8,
                battery_drain: 0.12,
                delivery_reward: 200,
                weather_change_chance: 0.006,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty(pub String);

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty '{}' (expected easy, medium or hard)", self.0)
    }
}

impl std::error::Error for UnknownDifficulty {}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(value.to_string())),
        }
    }
}
