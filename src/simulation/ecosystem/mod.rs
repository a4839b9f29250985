//! Ecosystem manager: trees, fires, animals and predators
//!
//! Systems run in a fixed order each tick so predators always see animals
//! after they moved this tick.

pub mod animals;
pub mod fires;
pub mod predators;
pub mod trees;

use crate::ecs::world::World;
use crate::simulation::tick::SimulationEvent;

pub use predators::resolve_attack;

/// Advance every non-agent entity by one tick
pub fn update_ecosystem(world: &mut World, events: &mut Vec<SimulationEvent>) {
    trees::update_trees(world);
    fires::update_fires(world, events);
    animals::update_animals(world, events);
    predators::update_predators(world, events);
}
