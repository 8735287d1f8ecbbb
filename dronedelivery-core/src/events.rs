use crate::entities::DeliveryId;
use crate::progression::UpgradeKind;
use crate::tuning::{LEVEL_UP_BONUS, SCORE_PENALTY};
use crate::weather::WeatherChange;

/// Game-semantic outcomes produced by commands and frame updates.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Dispatched { delivery: DeliveryId },
    Recalled { delivery: Option<DeliveryId> },
    DeliverySucceeded { delivery: DeliveryId, reward: u32 },
    DeliveryFailed { delivery: DeliveryId },
    Collision { obstacle_index: usize },
    Docked { battery: f32 },
    WeatherChanged(WeatherChange),
    LevelUp { level: u32, obstacle_added: bool },
    UpgradePurchased { kind: UpgradeKind, level: u32, cost: u32 },
    BatteryDepleted,
}

impl SimEvent {
    /// Text for the transient notice banner, for events the player is told about.
    pub fn notice_text(&self) -> Option<String> {
        match self {
            SimEvent::DeliverySucceeded { reward, .. } => {
                Some(format!("Delivery Success! +${reward}"))
            }
            SimEvent::DeliveryFailed { .. } => Some(format!(
                "Delivery Failed! Weather too severe. -{SCORE_PENALTY} points"
            )),
            SimEvent::Collision { .. } => Some(format!(
                "Collision! Returned to base. -{SCORE_PENALTY} points"
            )),
            SimEvent::LevelUp { level, .. } => {
                Some(format!("Level {level}! +{LEVEL_UP_BONUS} bonus points!"))
            }
            SimEvent::UpgradePurchased { kind, level, .. } => {
                Some(format!("{} upgraded! Level {level}", kind.title()))
            }
            SimEvent::Dispatched { .. }
            | SimEvent::Recalled { .. }
            | SimEvent::Docked { .. }
            | SimEvent::WeatherChanged(_)
            | SimEvent::BatteryDepleted => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_texts_match_banner_wording() {
        let success = SimEvent::DeliverySucceeded {
            delivery: DeliveryId(0),
            reward: 150,
        };
        assert_eq!(success.notice_text().as_deref(), Some("Delivery Success! +$150"));

        let level = SimEvent::LevelUp {
            level: 3,
            obstacle_added: false,
        };
        assert_eq!(level.notice_text().as_deref(), Some("Level 3! +500 bonus points!"));

        let upgrade = SimEvent::UpgradePurchased {
            kind: UpgradeKind::Speed,
            level: 2,
            cost: 1500,
        };
        assert_eq!(upgrade.notice_text().as_deref(), Some("Speed upgraded! Level 2"));

        assert_eq!(
            SimEvent::Collision { obstacle_index: 0 }.notice_text().as_deref(),
            Some("Collision! Returned to base. -50 points")
        );
        assert_eq!(SimEvent::BatteryDepleted.notice_text(), None);
    }
}
