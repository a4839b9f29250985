//! Tick system - orchestrates simulation updates
//!
//! One tick runs weather -> needs -> decisions -> ecosystem, records moved
//! entities for the relay and advances the tick counter.

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, EntityKind, Tick, Vec2};
use crate::ecs::world::World;
use crate::entity::agent::AgentState;
use crate::environment::Weather;
use crate::simulation::action_execute::{execute_actions, moving_positions};
use crate::simulation::action_select::decide;
use crate::simulation::ecosystem::update_ecosystem;
use crate::simulation::needs::update_needs;

/// Events generated during a simulation tick
///
/// Returned by `run_simulation_tick` for logs and front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    StateChanged {
        agent: EntityId,
        from: AgentState,
        to: AgentState,
    },
    AgentDied {
        agent: EntityId,
    },
    /// A predator bit an agent
    AgentAttacked {
        agent: EntityId,
        predator: EntityId,
        damage: f32,
    },
    TreeFelled {
        tree: EntityId,
        /// Wood resource left on the ground, none when carried off
        wood: Option<EntityId>,
        by: Option<EntityId>,
    },
    FireLit {
        fire: EntityId,
        by: Option<EntityId>,
    },
    FireExtinguished {
        fire: EntityId,
    },
    /// An animal ate from a hungry agent's food
    AnimalFed {
        animal: EntityId,
        agent: EntityId,
    },
    AnimalKilled {
        animal: EntityId,
        predator: EntityId,
        meat: Option<EntityId>,
    },
    PredatorKilled {
        predator: EntityId,
        by: EntityId,
        meat: Option<EntityId>,
    },
    ShelterBuilt {
        shelter: EntityId,
        by: EntityId,
    },
    WeatherChanged {
        weather: Weather,
        tick: Tick,
    },
}

/// Run one simulation tick and return everything that happened
pub fn run_simulation_tick(world: &mut World) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    let before = moving_positions(world);

    update_weather(world, &mut events);

    for agent in update_needs(world) {
        events.push(SimulationEvent::AgentDied { agent });
    }

    decide(world, &mut events);
    execute_actions(world, &mut events);
    update_ecosystem(world, &mut events);

    record_movement(world, &before);
    world.tick();

    events
}

fn update_weather(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let tick = world.current_tick;
    if let Some(weather) = world.roll_weather() {
        tracing::info!("Weather turned {} at tick {}", weather, tick);
        events.push(SimulationEvent::WeatherChanged { weather, tick });
    }
}

/// Emit a `Moved` delta for every surviving entity whose position changed
fn record_movement(world: &mut World, before: &[(EntityKind, EntityId, Vec2)]) {
    let after = moving_positions(world);
    for (kind, id, position) in after {
        let moved = before
            .iter()
            .find(|(k, i, _)| *k == kind && *i == id)
            .is_some_and(|(_, _, old)| *old != position);
        if moved {
            world.record_moved(kind, id, position);
        }
    }
}
