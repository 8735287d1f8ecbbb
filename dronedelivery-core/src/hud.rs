use crate::progression::UpgradeKind;
use crate::weather::WeatherKind;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryBand {
    Alert,
    Warning,
    Nominal,
}

impl BatteryBand {
    pub fn for_percent(percent: f32) -> Self {
        if percent < 20.0 {
            BatteryBand::Alert
        } else if percent < 50.0 {
            BatteryBand::Warning
        } else {
            BatteryBand::Nominal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopRow {
    pub kind: UpgradeKind,
    pub level: u32,
    pub next_cost: u32,
    pub affordable: bool,
}

/// Everything the on-screen indicators show, read from one frame's state.
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub score: u32,
    pub deliveries: u32,
    pub money: u32,
    pub level: u32,
    pub weather: WeatherKind,
    /// Raw charge clamped to 0..=100; upgraded capacity still reads as 100%.
    pub battery_percent: f32,
    pub battery_band: BatteryBand,
    pub shop: [ShopRow; 3],
}

impl HudSnapshot {
    pub fn from_world(world: &World) -> Self {
        let battery_percent = world.battery().clamp(0.0, 100.0);
        let upgrades = world.upgrades();
        let shop = UpgradeKind::ALL.map(|kind| {
            let next_cost = upgrades.next_cost(kind);
            ShopRow {
                kind,
                level: upgrades.level(kind),
                next_cost,
                affordable: world.money() >= next_cost,
            }
        });

        Self {
            score: world.score(),
            deliveries: world.deliveries(),
            money: world.money(),
            level: world.level(),
            weather: world.weather(),
            battery_percent,
            battery_band: BatteryBand::for_percent(battery_percent),
            shop,
        }
    }

    pub fn money_text(&self) -> String {
        format!("${}", self.money)
    }

    pub fn battery_text(&self) -> String {
        format!("{}%", self.battery_percent.floor() as u32)
    }

    pub fn weather_text(&self) -> &'static str {
        self.weather.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tests::quiet_world;

    #[test]
    fn battery_bands_switch_at_twenty_and_fifty() {
        assert_eq!(BatteryBand::for_percent(0.0), BatteryBand::Alert);
        assert_eq!(BatteryBand::for_percent(19.99), BatteryBand::Alert);
        assert_eq!(BatteryBand::for_percent(20.0), BatteryBand::Warning);
        assert_eq!(BatteryBand::for_percent(49.9), BatteryBand::Warning);
        assert_eq!(BatteryBand::for_percent(50.0), BatteryBand::Nominal);
    }

    #[test]
    fn snapshot_formats_indicators() {
        let mut world = quiet_world();
        world.money = 800;
        world.battery = 37.8;
        world.upgrades.speed = 1;

        let hud = HudSnapshot::from_world(&world);
        assert_eq!(hud.money_text(), "$800");
        assert_eq!(hud.battery_text(), "37%");
        assert_eq!(hud.battery_band, BatteryBand::Warning);
        assert_eq!(hud.weather_text(), "Clear Skies");

        assert_eq!(hud.shop[0].next_cost, 500);
        assert!(hud.shop[0].affordable);
        assert_eq!(hud.shop[1].level, 1);
        assert_eq!(hud.shop[1].next_cost, 1500);
        assert!(!hud.shop[1].affordable);
    }

    #[test]
    fn upgraded_battery_reads_as_full() {
        let mut world = quiet_world();
        world.max_battery = 140.0;
        world.battery = 130.0;
        let hud = HudSnapshot::from_world(&world);
        assert_eq!(hud.battery_percent, 100.0);
        assert_eq!(hud.battery_text(), "100%");
    }
}
