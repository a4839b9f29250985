//! World snapshots for rendering and persistence
//!
//! A snapshot is plain data: entity lists, terrain, weather and the tick.
//! Cross references stay as ids, so the structure serializes without cycles.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::ecs::world::World;
use crate::entity::{Agent, Animal, Fire, Predator, Resource, Tree};
use crate::environment::{Terrain, WeatherState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub weather: WeatherState,
    pub terrain: Terrain,
    pub agents: Vec<Agent>,
    pub animals: Vec<Animal>,
    pub predators: Vec<Predator>,
    pub trees: Vec<Tree>,
    pub fires: Vec<Fire>,
    pub resources: Vec<Resource>,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        tracing::info!("Snapshot at tick {} written to {}", self.tick, path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn entity_count(&self) -> usize {
        self.agents.len()
            + self.animals.len()
            + self.predators.len()
            + self.trees.len()
            + self.fires.len()
            + self.resources.len()
    }
}

impl World {
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.current_tick,
            weather: self.weather.clone(),
            terrain: self.terrain.clone(),
            agents: self.agents.clone(),
            animals: self.animals.clone(),
            predators: self.predators.clone(),
            trees: self.trees.clone(),
            fires: self.fires.clone(),
            resources: self.resources.clone(),
        }
    }

    /// Rebuild a world from a snapshot
    ///
    /// The RNG is reseeded from the configured seed mixed with the tick, so a
    /// restored world is deterministic but does not replay the original rolls.
    pub fn from_snapshot(snapshot: WorldSnapshot, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.world.seed ^ snapshot.tick;
        let mut world = World::empty(config);
        world.current_tick = snapshot.tick;
        world.weather = snapshot.weather;
        world.terrain = snapshot.terrain;
        world.agents = snapshot.agents;
        world.animals = snapshot.animals;
        world.predators = snapshot.predators;
        world.trees = snapshot.trees;
        world.fires = snapshot.fires;
        world.resources = snapshot.resources;
        world.reseed(seed);
        tracing::debug!(
            "World restored at tick {} with {} agents",
            world.current_tick,
            world.agents.len()
        );
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::entity::archetype::Gender;
    use crate::entity::ItemKind;

    #[test]
    fn test_snapshot_json_roundtrip() {
        let mut world = World::new(SimulationConfig::default());
        world.create_agent("Ada", 30, Gender::Female, Vec2::new(50.0, 50.0));
        world.spawn_resource(ItemKind::Berries, Vec2::new(60.0, 50.0), 4).unwrap();

        let snapshot = world.snapshot();
        let json = snapshot.to_json().unwrap();
        let restored = WorldSnapshot::from_json(&json).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_from_snapshot_keeps_entities() {
        let mut world = World::new(SimulationConfig::default());
        let id = world.create_agent("Ada", 30, Gender::Female, Vec2::new(50.0, 50.0));
        let snapshot = world.snapshot();

        let restored = World::from_snapshot(snapshot.clone(), SimulationConfig::default()).unwrap();
        assert_eq!(restored.current_tick, snapshot.tick);
        assert_eq!(restored.trees.len(), world.trees.len());
        assert_eq!(restored.agent(id).unwrap().name, "Ada");
        assert!(restored.pending_deltas().is_empty());
    }

    #[test]
    fn test_bad_json_is_serialization_error() {
        let err = WorldSnapshot::from_json("{ not json").unwrap_err();
        assert!(matches!(err, crate::core::error::EcoError::Serialization(_)));
    }
}
