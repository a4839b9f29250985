//! Weather: sets the ambient temperature agents relax toward

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Current weather condition
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub enum Weather {
    #[default]
    Clear,
    Cloudy,
    Rain,
    Snow,
    Blizzard,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Clear,
        Weather::Cloudy,
        Weather::Rain,
        Weather::Snow,
        Weather::Blizzard,
    ];

    /// Temperature agents drift toward when nothing warms them
    pub fn ambient_temperature(&self) -> f32 {
        match self {
            Self::Clear => 60.0,
            Self::Cloudy => 50.0,
            Self::Rain => 40.0,
            Self::Snow => 25.0,
            Self::Blizzard => 10.0,
        }
    }

    /// Roll weights for the next weather, indexed like `ALL`
    fn next_weights(&self) -> [u32; 5] {
        match self {
            Self::Clear => [50, 30, 15, 5, 0],
            Self::Cloudy => [30, 30, 25, 10, 5],
            Self::Rain => [25, 35, 30, 10, 0],
            Self::Snow => [15, 25, 5, 40, 15],
            Self::Blizzard => [10, 20, 0, 50, 20],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherState {
    pub current: Weather,
    pub since_tick: Tick,
}

impl WeatherState {
    pub fn new(weather: Weather, tick: Tick) -> Self {
        Self { current: weather, since_tick: tick }
    }

    /// Roll new weather once `interval` ticks have passed
    ///
    /// Returns the new weather when it changed.
    pub fn update(&mut self, tick: Tick, interval: u64, rng: &mut impl Rng) -> Option<Weather> {
        if interval == 0 || tick.saturating_sub(self.since_tick) < interval {
            return None;
        }
        self.since_tick = tick;

        let weights = self.current.next_weights();
        let next = match WeightedIndex::new(weights) {
            Ok(dist) => Weather::ALL[dist.sample(rng)],
            Err(_) => self.current,
        };
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ambient_ordering() {
        assert!(Weather::Clear.ambient_temperature() > Weather::Rain.ambient_temperature());
        assert!(Weather::Snow.ambient_temperature() > Weather::Blizzard.ambient_temperature());
    }

    #[test]
    fn test_no_roll_before_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = WeatherState::new(Weather::Clear, 0);
        for tick in 0..100 {
            assert_eq!(state.update(tick, 100, &mut rng), None);
        }
        assert_eq!(state.since_tick, 0);
    }

    #[test]
    fn test_weather_eventually_changes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut state = WeatherState::new(Weather::Clear, 0);
        let changed = (1..200u64).any(|i| state.update(i * 10, 10, &mut rng).is_some());
        assert!(changed);
    }
}
