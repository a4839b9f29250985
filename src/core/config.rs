//! Simulation configuration with documented constants
//!
//! Every tunable number the engine reads lives here, grouped by the system
//! that consumes it. The whole tree deserialises from TOML; any section or
//! field left out falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{EcoError, Result};
use crate::entity::archetype::ArchetypeTable;
use crate::entity::item::ItemKind;

/// Root configuration for one world
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub clock: ClockConfig,
    pub needs: NeedsConfig,
    pub decisions: DecisionConfig,
    pub trees: TreeConfig,
    pub fires: FireConfig,
    pub animals: AnimalConfig,
    pub predators: PredatorConfig,
    pub items: ItemConfig,
    pub archetypes: ArchetypeTable,
}

/// World generation and initial population
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Seed for the world RNG (terrain, weather, wandering, fishing)
    pub seed: u64,
    pub pond_count: usize,
    pub pond_min_radius: f32,
    pub pond_max_radius: f32,
    pub clearing_count: usize,
    pub clearing_radius: f32,
    pub initial_trees: usize,
    pub initial_berry_patches: usize,
    pub berries_per_patch: u32,
    pub initial_stone_piles: usize,
    /// Ticks between weather rolls
    pub weather_change_interval: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            seed: 42,
            pond_count: 3,
            pond_min_radius: 30.0,
            pond_max_radius: 70.0,
            clearing_count: 2,
            clearing_radius: 60.0,
            initial_trees: 40,
            initial_berry_patches: 8,
            berries_per_patch: 10,
            initial_stone_piles: 4,
            weather_change_interval: 2000,
        }
    }
}

/// Frame-skipping scheduler settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Scheduler callbacks per logical tick at speed 1
    pub base_frames_per_tick: u32,
    pub max_speed: u32,
    pub default_speed: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            base_frames_per_tick: 8,
            max_speed: 8,
            default_speed: 1,
        }
    }
}

/// Needs engine rates and survival limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedsConfig {
    /// Hunger gained per tick before modifiers
    ///
    /// At 0.02 a fed agent crosses the search-food threshold (60) in
    /// roughly 3000 ticks.
    pub hunger_rate: f32,
    /// Hunger multiplier while wearing clothing
    pub clothing_hunger_multiplier: f32,
    /// Hunger multiplier while below the cold threshold
    pub cold_hunger_multiplier: f32,
    /// Hunger above which health drains
    pub starvation_threshold: f32,
    pub starvation_damage: f32,

    pub min_temperature: f32,
    pub max_temperature: f32,
    /// Temperature below which health drains
    pub min_survivable_temperature: f32,
    pub cold_damage: f32,
    /// Fraction of the gap to the target temperature closed per tick
    pub temperature_relax_rate: f32,
    /// Warmth added by a full-intensity fire at zero distance
    pub fire_heat_bonus: f32,
    /// Distance at which the fire bonus halves
    pub fire_heat_falloff: f32,
    pub clothing_warmth: f32,
    pub shelter_warmth: f32,
    pub shelter_radius: f32,

    /// Energy spent per tick while active
    pub energy_drain: f32,
    pub rest_recovery: f32,
    pub sleep_recovery: f32,

    /// Agent fear lost per tick
    pub fear_decay: f32,
    /// Fear above which mood becomes anxious
    pub anxious_fear: f32,
    /// Fear above which the agent panics (mood fearful)
    pub panic_fear: f32,
    /// Hunger above which mood becomes anxious
    pub anxious_hunger: f32,
}

impl Default for NeedsConfig {
    fn default() -> Self {
        Self {
            hunger_rate: 0.02,
            clothing_hunger_multiplier: 0.85,
            cold_hunger_multiplier: 1.3,
            starvation_threshold: 90.0,
            starvation_damage: 0.05,

            min_temperature: 0.0,
            max_temperature: 100.0,
            min_survivable_temperature: 20.0,
            cold_damage: 0.05,
            temperature_relax_rate: 0.01,
            fire_heat_bonus: 40.0,
            fire_heat_falloff: 20.0,
            clothing_warmth: 8.0,
            shelter_warmth: 12.0,
            shelter_radius: 40.0,

            energy_drain: 0.02,
            rest_recovery: 0.15,
            sleep_recovery: 0.3,

            fear_decay: 0.5,
            anxious_fear: 25.0,
            panic_fear: 50.0,
            anxious_hunger: 80.0,
        }
    }
}

/// Thresholds and durations used by the agent state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Hunger above which the agent looks for food
    pub search_food_threshold: f32,
    /// Distance at which a predator counts as a threat
    pub threat_radius: f32,
    /// Hunting level at which an agent stands its ground
    pub defend_skill_level: u32,
    /// Health at which an unskilled agent still stands its ground
    pub defend_health: f32,
    /// Speed multiplier while running from a predator
    pub flee_speed_multiplier: f32,
    pub heal_threshold: f32,
    /// Temperature below which the agent seeks heat
    pub cold_threshold: f32,
    pub heat_search_radius: f32,
    pub fire_wood_cost: u32,
    pub fire_initial_fuel: f32,
    pub sleep_threshold: f32,
    pub rest_threshold: f32,
    /// Energy at which resting or sleeping ends
    pub rest_exit: f32,
    pub pet_hunger_threshold: f32,
    pub pet_feed_restore: f32,
    pub wood_reserve: u32,
    pub hunt_hunger_threshold: f32,
    pub hunt_health: f32,
    pub hunt_radius: f32,
    pub fish_hunger_threshold: f32,
    /// Maximum distance from a pond edge to fish
    pub fish_distance: f32,
    pub fish_success_chance: f32,
    pub shelter_wood: u32,
    pub shelter_stone: u32,
    pub gather_radius: f32,
    pub explore_radius: f32,
    /// Distance at which an agent can touch a target
    pub interact_distance: f32,
    pub arrival_distance: f32,

    pub chop_ticks: u32,
    pub fire_build_ticks: u32,
    pub cook_ticks: u32,
    pub fish_ticks: u32,
    pub farm_ticks: u32,
    pub farm_berry_yield: u32,
    pub build_ticks: u32,
    pub heal_ticks: u32,
    pub heal_amount: f32,
    pub recover_rate: f32,
    pub play_ticks: u32,
    pub play_fear_relief: f32,

    pub attack_range: f32,
    pub attack_damage: f32,
    /// Extra damage fraction per hunting level
    pub attack_damage_per_level: f32,
    pub attack_cooldown: u32,

    /// Experience per tick spent in a skill-relevant state
    pub skill_xp_per_tick: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            search_food_threshold: 60.0,
            threat_radius: 80.0,
            defend_skill_level: 3,
            defend_health: 60.0,
            flee_speed_multiplier: 1.5,
            heal_threshold: 30.0,
            cold_threshold: 35.0,
            heat_search_radius: 300.0,
            fire_wood_cost: 2,
            fire_initial_fuel: 5.0,
            sleep_threshold: 15.0,
            rest_threshold: 35.0,
            rest_exit: 80.0,
            pet_hunger_threshold: 60.0,
            pet_feed_restore: 30.0,
            wood_reserve: 4,
            hunt_hunger_threshold: 40.0,
            hunt_health: 70.0,
            hunt_radius: 200.0,
            fish_hunger_threshold: 30.0,
            fish_distance: 25.0,
            fish_success_chance: 0.4,
            shelter_wood: 8,
            shelter_stone: 4,
            gather_radius: 250.0,
            explore_radius: 200.0,
            interact_distance: 12.0,
            arrival_distance: 2.0,

            chop_ticks: 120,
            fire_build_ticks: 60,
            cook_ticks: 60,
            fish_ticks: 200,
            farm_ticks: 400,
            farm_berry_yield: 5,
            build_ticks: 300,
            heal_ticks: 100,
            heal_amount: 25.0,
            recover_rate: 0.05,
            play_ticks: 120,
            play_fear_relief: 30.0,

            attack_range: 15.0,
            attack_damage: 8.0,
            attack_damage_per_level: 0.2,
            attack_cooldown: 20,

            skill_xp_per_tick: 0.1,
        }
    }
}

/// Tree lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub age_rate: f32,
    pub mature_age: f32,
    pub old_age: f32,
    pub dead_age: f32,
    pub initial_size: f32,
    pub max_size: f32,
    pub growth_rate: f32,
    pub min_wood_yield: u32,
    pub max_wood_yield: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            age_rate: 1.0,
            mature_age: 3000.0,
            old_age: 12000.0,
            dead_age: 20000.0,
            initial_size: 1.0,
            max_size: 10.0,
            growth_rate: 0.003,
            min_wood_yield: 3,
            max_wood_yield: 6,
        }
    }
}

/// Fire fuel model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    /// Fuel lost per tick
    pub burn_rate: f32,
    pub max_fuel: f32,
    /// Fuel at which intensity saturates at 1.0
    pub full_intensity_fuel: f32,
    pub base_heat_radius: f32,
    pub heat_radius_per_fuel: f32,
    pub max_heat_radius: f32,
    /// Intensity under which an empty fire goes out
    pub extinguish_intensity: f32,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            burn_rate: 0.01,
            max_fuel: 20.0,
            full_intensity_fuel: 5.0,
            base_heat_radius: 20.0,
            heat_radius_per_fuel: 6.0,
            max_heat_radius: 120.0,
            extinguish_intensity: 0.05,
        }
    }
}

/// Domestic animal behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimalConfig {
    pub hunger_rate: f32,
    pub speed: f32,
    /// Closest an unowned animal may stand to a pond edge
    pub min_water_distance: f32,
    /// Farthest an unowned animal may stray from a pond edge
    pub max_water_distance: f32,
    pub follow_distance: f32,
    pub follow_speed_multiplier: f32,
    pub interaction_distance: f32,
    /// Agent hunger above which nearby animals help themselves to its food
    pub feed_agent_hunger_threshold: f32,
    pub feed_hunger_restore: f32,
    pub feed_cooldown: u32,
    /// Chance per tick of a random heading change while wandering
    pub turn_chance: f32,
}

impl Default for AnimalConfig {
    fn default() -> Self {
        Self {
            hunger_rate: 0.01,
            speed: 0.6,
            min_water_distance: 20.0,
            max_water_distance: 120.0,
            follow_distance: 40.0,
            follow_speed_multiplier: 1.5,
            interaction_distance: 15.0,
            feed_agent_hunger_threshold: 60.0,
            feed_hunger_restore: 20.0,
            feed_cooldown: 100,
            turn_chance: 0.02,
        }
    }
}

/// Predator hunting, fear and attacks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredatorConfig {
    pub hunger_rate: f32,
    pub fear_decay: f32,
    /// Radius within which an attacking agent frightens the predator
    pub threat_radius: f32,
    /// Fear gained per tick from one attacking agent
    pub fear_gain: f32,
    /// Extra fear gain fraction per hunting level of the attacker
    pub fear_gain_per_level: f32,
    pub flee_threshold: f32,
    pub flee_speed_multiplier: f32,
    /// Hunger above which the predator re-picks prey every tick
    pub hunt_hunger_threshold: f32,
    pub search_radius: f32,
    pub attack_cooldown: u32,
    pub agent_damage: f32,
    pub animal_damage: f32,
    /// Fear added to an agent that is bitten
    pub agent_fear_on_attack: f32,
    pub meat_from_animal: u32,
    pub meat_from_predator: u32,
    pub kill_hunger_restore: f32,
    /// Contact size of an agent
    pub agent_size: f32,
}

impl Default for PredatorConfig {
    fn default() -> Self {
        Self {
            hunger_rate: 0.02,
            fear_decay: 0.5,
            threat_radius: 100.0,
            fear_gain: 10.0,
            fear_gain_per_level: 0.25,
            flee_threshold: 50.0,
            flee_speed_multiplier: 1.8,
            hunt_hunger_threshold: 50.0,
            search_radius: 150.0,
            attack_cooldown: 30,
            agent_damage: 15.0,
            animal_damage: 10.0,
            agent_fear_on_attack: 40.0,
            meat_from_animal: 3,
            meat_from_predator: 4,
            kill_hunger_restore: 40.0,
            agent_size: 10.0,
        }
    }
}

/// Hunger restored by one unit of each food
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    pub berries_restore: f32,
    pub raw_meat_restore: f32,
    pub cooked_meat_restore: f32,
    pub fish_restore: f32,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            berries_restore: 15.0,
            raw_meat_restore: 10.0,
            cooked_meat_restore: 40.0,
            fish_restore: 20.0,
        }
    }
}

impl ItemConfig {
    /// Hunger removed by eating one unit, `None` for inedible items
    pub fn hunger_restore(&self, kind: ItemKind) -> Option<f32> {
        match kind {
            ItemKind::Berries => Some(self.berries_restore),
            ItemKind::RawMeat => Some(self.raw_meat_restore),
            ItemKind::CookedMeat => Some(self.cooked_meat_restore),
            ItemKind::Fish => Some(self.fish_restore),
            _ => None,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let t = &self.trees;
        if !(t.mature_age < t.old_age && t.old_age < t.dead_age) {
            return Err(EcoError::InvalidConfig(format!(
                "tree ages must be ordered: mature ({}) < old ({}) < dead ({})",
                t.mature_age, t.old_age, t.dead_age
            )));
        }
        if t.initial_size > t.max_size || t.min_wood_yield > t.max_wood_yield {
            return Err(EcoError::InvalidConfig(
                "tree initial_size/min_wood_yield exceed their maximums".into(),
            ));
        }

        let n = &self.needs;
        if n.min_temperature >= n.max_temperature {
            return Err(EcoError::InvalidConfig(format!(
                "min_temperature ({}) should be < max_temperature ({})",
                n.min_temperature, n.max_temperature
            )));
        }
        if n.anxious_fear >= n.panic_fear {
            return Err(EcoError::InvalidConfig(format!(
                "anxious_fear ({}) should be < panic_fear ({})",
                n.anxious_fear, n.panic_fear
            )));
        }

        let a = &self.animals;
        if a.min_water_distance >= a.max_water_distance {
            return Err(EcoError::InvalidConfig(format!(
                "min_water_distance ({}) should be < max_water_distance ({})",
                a.min_water_distance, a.max_water_distance
            )));
        }

        let d = &self.decisions;
        if d.sleep_threshold > d.rest_threshold || d.rest_threshold >= d.rest_exit {
            return Err(EcoError::InvalidConfig(
                "energy thresholds must be ordered: sleep <= rest < rest_exit".into(),
            ));
        }

        let extinguish = self.fires.extinguish_intensity;
        if !(extinguish > 0.0 && extinguish < 1.0) {
            return Err(EcoError::InvalidConfig(
                "extinguish_intensity must be within (0, 1)".into(),
            ));
        }

        let rates = [
            n.hunger_rate,
            t.age_rate,
            self.fires.burn_rate,
            self.fires.full_intensity_fuel,
            a.hunger_rate,
            self.predators.hunger_rate,
            self.predators.fear_decay,
        ];
        if rates.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return Err(EcoError::InvalidConfig("rates must be positive".into()));
        }

        if self.clock.base_frames_per_tick == 0 || self.clock.max_speed == 0 {
            return Err(EcoError::InvalidConfig(
                "clock base_frames_per_tick and max_speed must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [fires]
            burn_rate = 0.05

            [world]
            seed = 7
            "#,
        )
        .unwrap();

        assert!((config.fires.burn_rate - 0.05).abs() < f32::EPSILON);
        assert_eq!(config.world.seed, 7);
        assert!((config.needs.hunger_rate - 0.02).abs() < f32::EPSILON);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = SimulationConfig::from_toml_str(include_str!("../../data/simulation.toml")).unwrap();
        let defaults = SimulationConfig::default();

        assert_eq!(config.world.seed, defaults.world.seed);
        assert_eq!(config.world.initial_trees, defaults.world.initial_trees);
        assert_eq!(config.decisions.chop_ticks, defaults.decisions.chop_ticks);
        assert_eq!(config.predators.attack_cooldown, defaults.predators.attack_cooldown);
        assert!((config.fires.extinguish_intensity - defaults.fires.extinguish_intensity).abs() < f32::EPSILON);
        assert!((config.items.cooked_meat_restore - defaults.items.cooked_meat_restore).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_extinguish_intensity_rejected() {
        let mut config = SimulationConfig::default();
        config.fires.extinguish_intensity = 0.0;
        assert!(matches!(config.validate(), Err(EcoError::InvalidConfig(_))));
    }

    #[test]
    fn test_unordered_tree_ages_rejected() {
        let mut config = SimulationConfig::default();
        config.trees.old_age = 100.0;
        assert!(matches!(config.validate(), Err(EcoError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = SimulationConfig::from_toml_str("[fires\nburn_rate = ");
        assert!(matches!(result, Err(EcoError::ConfigParse(_))));
    }

    #[test]
    fn test_berries_restore_lookup() {
        let items = ItemConfig::default();
        assert_eq!(items.hunger_restore(ItemKind::Berries), Some(15.0));
        assert_eq!(items.hunger_restore(ItemKind::Wood), None);
    }
}
