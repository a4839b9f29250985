//! Predators: hunger, fear, prey selection, pursuit and attacks
//!
//! Each tick a predator first updates fear. Above the flee threshold it
//! runs from the agents threatening it and does nothing else. Otherwise it
//! keeps or re-picks prey, closes in, and attacks on contact.

use rand::Rng;

use crate::core::types::{EntityId, Vec2};
use crate::ecs::world::World;
use crate::entity::agent::{Mood, MAX_FEAR, MAX_HUNGER};
use crate::entity::{ItemKind, PreyRef};
use crate::simulation::tick::SimulationEvent;
use crate::skills::SkillKind;

/// Advance every predator by one tick
pub fn update_predators(world: &mut World, events: &mut Vec<SimulationEvent>) {
    for idx in 0..world.predators.len() {
        update_predator(world, idx, events);
    }
}

fn update_predator(world: &mut World, idx: usize, events: &mut Vec<SimulationEvent>) {
    let cfg = world.config.predators.clone();
    {
        let predator = &mut world.predators[idx];
        predator.hunger = (predator.hunger + cfg.hunger_rate).min(MAX_HUNGER);
        predator.attack_cooldown = predator.attack_cooldown.saturating_sub(1);
    }

    update_fear(world, idx);
    if world.predators[idx].fear > cfg.flee_threshold {
        flee(world, idx);
        return;
    }

    validate_target(world, idx);
    let needs_target = {
        let p = &world.predators[idx];
        p.target.is_none() || p.hunger > cfg.hunt_hunger_threshold
    };
    if needs_target {
        let pos = world.predators[idx].position;
        if let Some(prey) = find_prey(world, pos, cfg.search_radius) {
            world.predators[idx].target = Some(prey);
        }
    }

    let Some(prey) = world.predators[idx].target else {
        wander(world, idx);
        return;
    };
    let Some((prey_pos, prey_size)) = prey_position(world, prey) else {
        world.predators[idx].target = None;
        return;
    };

    let predator = &mut world.predators[idx];
    let contact = prey_size + predator.size;
    if predator.position.distance(&prey_pos) <= contact {
        if predator.attack_cooldown == 0 {
            resolve_attack(world, idx, prey, events);
        }
    } else {
        predator.direction = (prey_pos - predator.position).normalize();
        predator.position = predator.position.step_toward(prey_pos, predator.speed);
        predator.position = world.terrain.clamp_to_bounds(predator.position);
    }
}

/// Decay fear, then add fear for each agent aiming at this predator
fn update_fear(world: &mut World, idx: usize) {
    let cfg = &world.config.predators;
    let predator = &world.predators[idx];
    let (id, pos) = (predator.id, predator.position);

    let gained: f32 = threatening_agents(world, id, pos)
        .map(|(_, _, level)| cfg.fear_gain * (1.0 + cfg.fear_gain_per_level * level as f32))
        .sum();

    let predator = &mut world.predators[idx];
    predator.fear = (predator.fear - cfg.fear_decay).max(0.0);
    predator.fear = (predator.fear + gained).min(MAX_FEAR);
}

/// Living agents targeting predator `id` within the threat radius,
/// yielding (agent id, position, hunting level)
fn threatening_agents(
    world: &World,
    id: EntityId,
    pos: Vec2,
) -> impl Iterator<Item = (EntityId, Vec2, u32)> + '_ {
    let radius = world.config.predators.threat_radius;
    world
        .agents
        .iter()
        .filter(move |a| {
            a.is_alive() && a.attack_target == Some(id) && a.position.distance(&pos) <= radius
        })
        .map(|a| (a.id, a.position, a.skill_level(SkillKind::Hunting)))
}

/// Run straight away from the nearest threatening agent
fn flee(world: &mut World, idx: usize) {
    let cfg = &world.config.predators;
    let predator = &world.predators[idx];
    let (id, pos) = (predator.id, predator.position);

    let nearest_threat = threatening_agents(world, id, pos)
        .map(|(_, at, _)| at)
        .min_by_key(|at| ordered_float::OrderedFloat(at.distance(&pos)));
    let from = nearest_threat.or_else(|| {
        world
            .nearest_living_agent(pos, cfg.threat_radius)
            .map(|(a, _)| a.position)
    });
    let Some(from) = from else {
        return;
    };

    let mut away = (pos - from).normalize();
    if away == Vec2::ZERO {
        away = Vec2::new(1.0, 0.0);
    }
    let step = world.predators[idx].speed * cfg.flee_speed_multiplier;
    let next = world.terrain.clamp_to_bounds(pos + away * step);

    let predator = &mut world.predators[idx];
    predator.direction = away;
    predator.position = next;
    predator.target = None;
}

/// Drop a target that no longer exists or already died
fn validate_target(world: &mut World, idx: usize) {
    let Some(prey) = world.predators[idx].target else {
        return;
    };
    if prey_position(world, prey).is_none() {
        world.predators[idx].target = None;
    }
}

/// Agents first, then animals; the first one in range wins
fn find_prey(world: &World, pos: Vec2, radius: f32) -> Option<PreyRef> {
    world
        .agents
        .iter()
        .find(|a| a.is_alive() && a.position.distance(&pos) <= radius)
        .map(|a| PreyRef::Agent(a.id))
        .or_else(|| {
            world
                .animals
                .iter()
                .find(|a| a.is_alive() && a.position.distance(&pos) <= radius)
                .map(|a| PreyRef::Animal(a.id))
        })
}

/// Position and contact size of living prey
fn prey_position(world: &World, prey: PreyRef) -> Option<(Vec2, f32)> {
    match prey {
        PreyRef::Agent(id) => world
            .agent(id)
            .filter(|a| a.is_alive())
            .map(|a| (a.position, world.config.predators.agent_size)),
        PreyRef::Animal(id) => world
            .animal(id)
            .filter(|a| a.is_alive())
            .map(|a| (a.position, a.size())),
    }
}

fn wander(world: &mut World, idx: usize) {
    if world.rng_mut().gen::<f32>() < world.config.animals.turn_chance {
        let angle = world.rng_mut().gen_range(0.0..std::f32::consts::TAU);
        world.predators[idx].direction = Vec2::from_angle(angle);
    }
    let predator = &mut world.predators[idx];
    let proposed = predator.position + predator.direction * (predator.speed * 0.5);
    let clamped = world.terrain.clamp_to_bounds(proposed);
    if clamped != proposed {
        predator.direction = -predator.direction;
    }
    predator.position = clamped;
}

/// Resolve one attack of the predator at `idx` on `prey`
///
/// Agents lose health and gain fear; panic forces a fearful mood. Animals
/// lose health and, once dead, are replaced by raw meat. The predator's
/// target is cleared whatever the outcome.
pub fn resolve_attack(
    world: &mut World,
    idx: usize,
    prey: PreyRef,
    events: &mut Vec<SimulationEvent>,
) {
    let cfg = world.config.predators.clone();
    let panic_fear = world.config.needs.panic_fear;
    let predator_id = world.predators[idx].id;
    {
        let predator = &mut world.predators[idx];
        predator.target = None;
        predator.attack_cooldown = cfg.attack_cooldown;
    }

    match prey {
        PreyRef::Agent(id) => {
            let Some(agent) = world.agent_mut(id).filter(|a| a.is_alive()) else {
                return;
            };
            agent.health = (agent.health - cfg.agent_damage).max(0.0);
            agent.fear = (agent.fear + cfg.agent_fear_on_attack).min(MAX_FEAR);
            if agent.fear > panic_fear {
                agent.mood = Mood::Fearful;
            }
            events.push(SimulationEvent::AgentAttacked {
                agent: id,
                predator: predator_id,
                damage: cfg.agent_damage,
            });
            if agent.health <= 0.0 {
                agent.die();
                tracing::info!("{} was killed by predator {}", agent.name, predator_id);
                events.push(SimulationEvent::AgentDied { agent: id });
            }
        }
        PreyRef::Animal(id) => {
            let Some(animal) = world.animal_mut(id) else {
                return;
            };
            animal.health -= cfg.animal_damage;
            if animal.health > 0.0 {
                return;
            }

            let Some(carcass) = world.remove_animal(id) else {
                return;
            };
            let meat = world
                .spawn_resource(ItemKind::RawMeat, carcass.position, cfg.meat_from_animal.max(1))
                .ok();
            let predator = &mut world.predators[idx];
            predator.hunger = (predator.hunger - cfg.kill_hunger_restore).max(0.0);
            tracing::debug!("Animal {} killed by predator {}", id, predator_id);
            events.push(SimulationEvent::AnimalKilled { animal: id, predator: predator_id, meat });
        }
    }
}
