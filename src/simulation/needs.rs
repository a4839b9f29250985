//! Needs engine - per-tick drives of every living agent
//!
//! Hunger climbs, temperature relaxes toward what the surroundings offer,
//! energy drains or recovers, fear fades and mood follows. Health is lost
//! to starvation and cold. All values are clamped after every update and a
//! dead agent is left untouched.

use crate::core::config::NeedsConfig;
use crate::core::types::EntityId;
use crate::ecs::world::World;
use crate::entity::agent::{Agent, AgentState, Mood};
use crate::entity::ItemKind;

/// Environmental inputs for one agent's needs update
#[derive(Debug, Clone, Copy, Default)]
pub struct NeedsContext {
    pub ambient_temperature: f32,
    /// Strongest fire warmth reaching the agent
    pub fire_bonus: f32,
    pub sheltered: bool,
    pub hunger_multiplier: f32,
    /// Temperature below which hunger climbs faster
    pub cold_threshold: f32,
}

/// Warmth one fire gives at distance `distance`
///
/// Proportional to intensity and inversely to distance; zero outside the
/// fire's heat radius.
pub fn fire_warmth(intensity: f32, heat_radius: f32, distance: f32, config: &NeedsConfig) -> f32 {
    if distance > heat_radius || heat_radius <= 0.0 {
        return 0.0;
    }
    config.fire_heat_bonus * intensity / (1.0 + distance / config.fire_heat_falloff.max(0.001))
}

/// Advance one agent's needs by `dt` ticks
///
/// Returns true when the agent died during this update.
pub fn update_agent_needs(agent: &mut Agent, ctx: &NeedsContext, config: &NeedsConfig, dt: f32) -> bool {
    if !agent.is_alive() || agent.health <= 0.0 {
        return false;
    }

    let clothed = agent.inventory.has(ItemKind::Clothing);
    let cold = agent.temperature < ctx.cold_threshold;

    // Hunger
    let mut hunger_rate = config.hunger_rate * ctx.hunger_multiplier;
    if clothed {
        hunger_rate *= config.clothing_hunger_multiplier;
    }
    if cold {
        hunger_rate *= config.cold_hunger_multiplier;
    }
    agent.hunger += hunger_rate * dt;

    // Temperature
    let mut target = ctx.ambient_temperature + ctx.fire_bonus;
    if clothed {
        target += config.clothing_warmth;
    }
    if ctx.sheltered {
        target += config.shelter_warmth;
    }
    let relax = (config.temperature_relax_rate * dt).min(1.0);
    agent.temperature += (target - agent.temperature) * relax;

    // Energy
    if agent.state.is_restful() {
        let recovery = match agent.state {
            AgentState::Sleep => config.sleep_recovery,
            _ => config.rest_recovery,
        };
        agent.energy += recovery * dt;
    } else {
        agent.energy -= config.energy_drain * dt;
    }

    // Fear
    agent.fear -= config.fear_decay * dt;

    // Health
    if agent.hunger > config.starvation_threshold {
        agent.health -= config.starvation_damage * dt;
    }
    if agent.temperature < config.min_survivable_temperature {
        agent.health -= config.cold_damage * dt;
    }

    agent.clamp_vitals(config);
    agent.mood = derive_mood(agent, config);

    if agent.health <= 0.0 {
        agent.die();
        return true;
    }
    false
}

/// Mood from fear and hunger
pub fn derive_mood(agent: &Agent, config: &NeedsConfig) -> Mood {
    if agent.fear > config.panic_fear {
        Mood::Fearful
    } else if agent.fear > config.anxious_fear || agent.hunger > config.anxious_hunger {
        Mood::Anxious
    } else {
        Mood::Neutral
    }
}

/// Build the needs context for the agent at `idx`
pub fn needs_context(world: &World, idx: usize) -> NeedsContext {
    let agent = &world.agents[idx];
    let cfg = &world.config.needs;
    let fire_bonus = world
        .fires_warming(agent.position)
        .map(|(fire, d)| fire_warmth(fire.intensity, fire.heat_radius, d, cfg))
        .fold(0.0_f32, f32::max);
    let stats = world.config.archetypes.stats(agent.archetype);

    NeedsContext {
        ambient_temperature: world.weather.current.ambient_temperature(),
        fire_bonus,
        sheltered: world.is_sheltered(agent.position),
        hunger_multiplier: stats.hunger_multiplier,
        cold_threshold: world.config.decisions.cold_threshold,
    }
}

/// Run the needs engine for every agent; returns the ids of agents that died
pub fn update_needs(world: &mut World) -> Vec<EntityId> {
    let mut died = Vec::new();
    for idx in 0..world.agents.len() {
        if !world.agents[idx].is_alive() {
            continue;
        }
        let ctx = needs_context(world, idx);
        let config = world.config.needs.clone();
        let agent = &mut world.agents[idx];
        if update_agent_needs(agent, &ctx, &config, 1.0) {
            tracing::info!("{} died at tick {}", agent.name, world.current_tick);
            died.push(agent.id);
        }
    }
    died
}
