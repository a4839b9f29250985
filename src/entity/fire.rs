//! Fires: fuel drives intensity and heat radius

use serde::{Deserialize, Serialize};

use crate::core::config::FireConfig;
use crate::core::types::{EntityId, Tick, Vec2};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fire {
    pub id: EntityId,
    pub position: Vec2,
    /// Wood units left, never negative
    pub fuel: f32,
    /// Derived from fuel, in [0, 1]
    pub intensity: f32,
    /// Derived from fuel
    pub heat_radius: f32,
    /// Agent that lit the fire
    pub owner: Option<EntityId>,
    pub created_tick: Tick,
}

impl Fire {
    pub fn new(position: Vec2, fuel: f32, owner: Option<EntityId>, config: &FireConfig, tick: Tick) -> Self {
        let mut fire = Self {
            id: EntityId::new(),
            position,
            fuel: fuel.clamp(0.0, config.max_fuel),
            intensity: 0.0,
            heat_radius: 0.0,
            owner,
            created_tick: tick,
        };
        fire.refresh(config);
        fire
    }

    /// Recompute derived values from fuel
    pub fn refresh(&mut self, config: &FireConfig) {
        self.intensity = intensity_for_fuel(self.fuel, config);
        self.heat_radius = heat_radius_for_fuel(self.fuel, config);
    }

    pub fn is_extinguished(&self, config: &FireConfig) -> bool {
        self.fuel <= 0.0 && self.intensity < config.extinguish_intensity
    }
}

pub fn intensity_for_fuel(fuel: f32, config: &FireConfig) -> f32 {
    (fuel.max(0.0) / config.full_intensity_fuel).min(1.0)
}

pub fn heat_radius_for_fuel(fuel: f32, config: &FireConfig) -> f32 {
    if fuel <= 0.0 {
        return 0.0;
    }
    (config.base_heat_radius + fuel * config.heat_radius_per_fuel).min(config.max_heat_radius)
}
