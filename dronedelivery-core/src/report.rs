use crate::world::World;
use serde::Serialize;

pub const BATTERY_DEPLETED: &str = "Battery depleted!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOverReport {
    pub reason: String,
    pub score: u32,
    pub deliveries: u32,
    pub money: u32,
    pub success_rate: u32, // whole percent
    pub level: u32,
}

impl GameOverReport {
    pub fn from_world(world: &World, reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            score: world.score(),
            deliveries: world.deliveries(),
            money: world.money(),
            success_rate: success_rate(world.deliveries(), world.total_attempts()),
            level: world.level(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

pub fn success_rate(deliveries: u32, attempts: u32) -> u32 {
    if attempts == 0 {
        return 0;
    }
    (u64::from(deliveries) * 100 / u64::from(attempts)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tests::quiet_world;

    #[test]
    fn success_rate_floors_and_handles_no_attempts() {
        assert_eq!(success_rate(0, 0), 0);
        assert_eq!(success_rate(2, 3), 66);
        assert_eq!(success_rate(5, 5), 100);
    }

    #[test]
    fn report_captures_final_numbers() {
        let mut world = quiet_world();
        world.score = 1234;
        world.deliveries = 7;
        world.total_attempts = 9;
        world.money = 300;
        world.level = 2;

        let report = GameOverReport::from_world(&world, BATTERY_DEPLETED);
        assert_eq!(report.reason, "Battery depleted!");
        assert_eq!(report.success_rate, 77);
        assert_eq!(
            report.to_json(),
            r#"{"reason":"Battery depleted!","score":1234,"deliveries":7,"money":300,"success_rate":77,"level":2}"#
        );
    }
}
