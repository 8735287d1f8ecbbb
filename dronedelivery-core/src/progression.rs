use crate::entities::random_obstacle;
use crate::events::SimEvent;
use crate::rng::RandomSource;
use crate::tuning::{BATTERY_UPGRADE_CAPACITY, DELIVERIES_PER_LEVEL, LEVEL_UP_BONUS};
use crate::world::World;
use serde::Serialize;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeKind {
    Battery,
    Speed,
    Weather,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [UpgradeKind::Battery, UpgradeKind::Speed, UpgradeKind::Weather];

    pub fn base_cost(self) -> u32 {
        match self {
            UpgradeKind::Battery => 500,
            UpgradeKind::Speed => 750,
            UpgradeKind::Weather => 1000,
        }
    }

    /// Price of the next level when `current_level` levels are owned.
    pub fn cost_at(self, current_level: u32) -> u32 {
        self.base_cost() * (current_level + 1)
    }

    pub fn title(self) -> &'static str {
        match self {
            UpgradeKind::Battery => "Battery",
            UpgradeKind::Speed => "Speed",
            UpgradeKind::Weather => "Weather",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Upgrades {
    pub battery: u32,
    pub speed: u32,
    pub weather: u32,
}

impl Upgrades {
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Battery => self.battery,
            UpgradeKind::Speed => self.speed,
            UpgradeKind::Weather => self.weather,
        }
    }

    fn level_mut(&mut self, kind: UpgradeKind) -> &mut u32 {
        match kind {
            UpgradeKind::Battery => &mut self.battery,
            UpgradeKind::Speed => &mut self.speed,
            UpgradeKind::Weather => &mut self.weather,
        }
    }

    pub fn next_cost(&self, kind: UpgradeKind) -> u32 {
        kind.cost_at(self.level(kind))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    InsufficientFunds { cost: u32, money: u32 },
}

impl PurchaseError {
    pub fn message(&self) -> &'static str {
        match self {
            PurchaseError::InsufficientFunds { .. } => "Not enough money for this upgrade!",
        }
    }
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseError::InsufficientFunds { cost, money } => {
                write!(f, "{} (costs ${cost}, have ${money})", self.message())
            }
        }
    }
}

impl Error for PurchaseError {}

/// At most one level per call, however far deliveries have run ahead.
pub fn check_level_up(world: &mut World, rng: &mut impl RandomSource) -> Option<SimEvent> {
    if world.deliveries < world.level * DELIVERIES_PER_LEVEL {
        return None;
    }

    world.level += 1;
    world.score += LEVEL_UP_BONUS;

    let obstacle_added = world.level % 2 == 0;
    if obstacle_added {
        let obstacle = random_obstacle(&world.config, rng);
        world.obstacles.push(obstacle);
    }

    tracing::info!(
        level = world.level,
        obstacle_added,
        obstacles = world.obstacles.len(),
        "level up"
    );
    Some(SimEvent::LevelUp {
        level: world.level,
        obstacle_added,
    })
}

pub fn purchase_upgrade(world: &mut World, kind: UpgradeKind) -> Result<SimEvent, PurchaseError> {
    let cost = world.upgrades.next_cost(kind);
    if world.money < cost {
        tracing::debug!(?kind, cost, money = world.money, "upgrade refused");
        return Err(PurchaseError::InsufficientFunds {
            cost,
            money: world.money,
        });
    }

    world.money -= cost;
    let level = world.upgrades.level_mut(kind);
    *level += 1;
    let level = *level;

    if kind == UpgradeKind::Battery {
        world.max_battery += BATTERY_UPGRADE_CAPACITY;
        world.battery = (world.battery + BATTERY_UPGRADE_CAPACITY).min(world.max_battery);
    }

    tracing::info!(?kind, level, cost, money = world.money, "upgrade purchased");
    Ok(SimEvent::UpgradePurchased { kind, level, cost })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;
    use crate::world::tests::quiet_world;

    #[test]
    fn costs_scale_linearly_with_owned_levels() {
        assert_eq!(UpgradeKind::Battery.cost_at(0), 500);
        assert_eq!(UpgradeKind::Battery.cost_at(1), 1000);
        assert_eq!(UpgradeKind::Speed.cost_at(2), 2250);
        assert_eq!(UpgradeKind::Weather.cost_at(0), 1000);
    }

    #[test]
    fn fifth_delivery_levels_up_once_with_obstacle() {
        let mut world = quiet_world();
        world.deliveries = 5;
        world.score = 500;

        let event = check_level_up(&mut world, &mut ScriptedRandom::constant(0.5));
        assert_eq!(
            event,
            Some(SimEvent::LevelUp {
                level: 2,
                obstacle_added: true,
            })
        );
        assert_eq!(world.level, 2);
        assert_eq!(world.score, 1000);
        assert_eq!(world.obstacles.len(), 4);

        // Next threshold is 10 deliveries.
        assert_eq!(check_level_up(&mut world, &mut ScriptedRandom::constant(0.5)), None);
    }

    #[test]
    fn odd_levels_add_no_obstacle() {
        let mut world = quiet_world();
        world.level = 2;
        world.deliveries = 10;
        let event = check_level_up(&mut world, &mut ScriptedRandom::constant(0.5));
        assert_eq!(
            event,
            Some(SimEvent::LevelUp {
                level: 3,
                obstacle_added: false,
            })
        );
        assert_eq!(world.obstacles.len(), 3);
    }

    #[test]
    fn large_jump_still_levels_once_per_check() {
        let mut world = quiet_world();
        world.deliveries = 40;
        assert!(check_level_up(&mut world, &mut ScriptedRandom::constant(0.5)).is_some());
        assert_eq!(world.level, 2);
        assert!(check_level_up(&mut world, &mut ScriptedRandom::constant(0.5)).is_some());
        assert_eq!(world.level, 3);
    }

    #[test]
    fn battery_upgrade_twice_costs_500_then_1000() {
        let mut world = quiet_world();
        world.money = 1600;
        world.battery = 90.0;

        let first = purchase_upgrade(&mut world, UpgradeKind::Battery).unwrap();
        assert_eq!(
            first,
            SimEvent::UpgradePurchased {
                kind: UpgradeKind::Battery,
                level: 1,
                cost: 500,
            }
        );
        assert_eq!(world.money, 1100);
        assert_eq!(world.max_battery, 120.0);
        assert_eq!(world.battery, 110.0);

        purchase_upgrade(&mut world, UpgradeKind::Battery).unwrap();
        assert_eq!(world.money, 100);
        assert_eq!(world.max_battery, 140.0);
        assert_eq!(world.battery, 130.0);
        assert_eq!(world.upgrades.battery, 2);
    }

    #[test]
    fn battery_restore_is_capped_at_new_capacity() {
        let mut world = quiet_world();
        world.money = 500;
        purchase_upgrade(&mut world, UpgradeKind::Battery).unwrap();
        assert_eq!(world.battery, 120.0);
        assert_eq!(world.max_battery, 120.0);
    }

    #[test]
    fn insufficient_funds_changes_nothing() {
        let mut world = quiet_world();
        world.money = 749;
        let err = purchase_upgrade(&mut world, UpgradeKind::Speed).unwrap_err();
        assert_eq!(err, PurchaseError::InsufficientFunds { cost: 750, money: 749 });
        assert_eq!(err.message(), "Not enough money for this upgrade!");
        assert_eq!(world.money, 749);
        assert_eq!(world.upgrades, Upgrades::default());
    }

    #[test]
    fn speed_and_weather_upgrades_leave_battery_alone() {
        let mut world = quiet_world();
        world.money = 1750;
        purchase_upgrade(&mut world, UpgradeKind::Speed).unwrap();
        purchase_upgrade(&mut world, UpgradeKind::Weather).unwrap();
        assert_eq!(world.money, 0);
        assert_eq!(world.upgrades.speed, 1);
        assert_eq!(world.upgrades.weather, 1);
        assert_eq!(world.max_battery, 100.0);
        assert_eq!(world.battery, 100.0);
    }
}
