pub mod adapter;
pub mod clock;
pub mod collision;
pub mod config;
pub mod coordinates;
pub mod delivery;
pub mod drone;
pub mod entities;
pub mod events;
pub mod game;
pub mod hud;
pub mod movement;
pub mod notice;
pub mod progression;
pub mod report;
pub mod rng;
pub mod tuning;
pub mod weather;
pub mod world;

pub use adapter::{NullRenderer, Renderer};
pub use clock::FrameClock;
pub use config::{ConfigError, SimConfig};
pub use coordinates::WorldPoint;
pub use delivery::{DispatchError, DispatchErrorReason};
pub use drone::Drone;
pub use entities::{Base, DeliveryId, DeliveryPoint, Obstacle, ObstacleKind};
pub use events::SimEvent;
pub use game::{FrameOutcome, Game};
pub use hud::{BatteryBand, HudSnapshot, ShopRow};
pub use progression::{PurchaseError, UpgradeKind, Upgrades};
pub use report::GameOverReport;
pub use rng::{FastRandSource, RandomSource, ScriptedRandom};
pub use tuning::Difficulty;
pub use weather::{WeatherChange, WeatherKind};
pub use world::World;
