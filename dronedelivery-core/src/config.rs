use crate::coordinates::WorldPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigError(pub String);

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid config: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Canvas layout and fixed entity geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub base_x: f32,
    pub base_y: f32,
    pub base_size: f32,
    pub spawn_margin: f32, // keep spawned entities this far from every edge
    pub delivery_point_size: f32,
    pub drone_size: f32,
    pub drone_speed: f32, // world units per 60 Hz frame
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 500.0,
            base_x: 100.0,
            base_y: 100.0,
            base_size: 40.0,
            spawn_margin: 50.0,
            delivery_point_size: 15.0,
            drone_size: 20.0,
            drone_speed: 2.0,
        }
    }
}

impl SimConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)
            .map_err(|err| ConfigError::new(format!("failed to parse json: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_margin < 0.0 {
            return Err(ConfigError::new("spawn_margin must not be negative"));
        }
        if self.canvas_width <= self.spawn_margin * 2.0
            || self.canvas_height <= self.spawn_margin * 2.0
        {
            return Err(ConfigError::new(
                "canvas must be larger than twice the spawn margin",
            ));
        }
        let positive = [
            ("base_size", self.base_size),
            ("delivery_point_size", self.delivery_point_size),
            ("drone_size", self.drone_size),
            ("drone_speed", self.drone_speed),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(ConfigError::new(format!("{name} must be positive")));
        }
        Ok(())
    }

    pub fn base_position(&self) -> WorldPoint {
        WorldPoint::new(self.base_x, self.base_y)
    }

    /// Width and height of the region random spawns are drawn from.
    pub fn spawn_extent(&self) -> (f32, f32) {
        (
            self.canvas_width - self.spawn_margin * 2.0,
            self.canvas_height - self.spawn_margin * 2.0,
        )
    }
}
