use crate::rng::RandomSource;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    #[default]
    Clear,
    Rain,
    Wind,
    Storm,
}

impl WeatherKind {
    pub const ALL: [WeatherKind; 4] = [
        WeatherKind::Clear,
        WeatherKind::Rain,
        WeatherKind::Wind,
        WeatherKind::Storm,
    ];

    /// Multiplier applied to the delivery success probability.
    pub fn success_modifier(self) -> f32 {
        match self {
            WeatherKind::Clear => 1.0,
            WeatherKind::Rain => 0.9,
            WeatherKind::Wind => 0.85,
            WeatherKind::Storm => 0.6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeatherKind::Clear => "Clear Skies",
            WeatherKind::Rain => "Light Rain",
            WeatherKind::Wind => "Windy",
            WeatherKind::Storm => "Storm",
        }
    }

    pub fn has_precipitation(self) -> bool {
        matches!(self, WeatherKind::Rain | WeatherKind::Storm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherChange {
    pub from: WeatherKind,
    pub to: WeatherKind,
}

/// One per-frame trial. A successful trial re-picks uniformly from all four
/// kinds, so it may land on the current one; only real changes are reported.
pub fn roll_weather(
    current: &mut WeatherKind,
    change_chance: f32,
    rng: &mut impl RandomSource,
) -> Option<WeatherChange> {
    if !rng.chance(change_chance) {
        return None;
    }

    let next = WeatherKind::ALL[rng.pick_index(WeatherKind::ALL.len())];
    let previous = std::mem::replace(current, next);
    if previous == next {
        return None;
    }

    tracing::debug!(from = ?previous, to = ?next, "weather changed");
    Some(WeatherChange {
        from: previous,
        to: next,
    })
}
