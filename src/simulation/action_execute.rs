//! Action execution - carry out each agent's current state for one tick
//!
//! Movement is straight-line steering clamped to the world bounds. Multi-tick
//! actions count `action_progress` up to their configured duration; leaving
//! the state resets the counter but keeps whatever was already gathered.

use rand::Rng;

use crate::core::types::{EntityId, EntityKind, Vec2};
use crate::ecs::world::World;
use crate::entity::agent::{AgentState, MAX_HEALTH};
use crate::entity::ItemKind;
use crate::simulation::action_select::is_loose_supply;
use crate::simulation::tick::SimulationEvent;
use crate::skills::SkillKind;

/// Execute the current state of every living agent
pub fn execute_actions(world: &mut World, events: &mut Vec<SimulationEvent>) {
    for idx in 0..world.agents.len() {
        if !world.agents[idx].is_alive() {
            continue;
        }
        {
            let agent = &mut world.agents[idx];
            agent.attack_cooldown = agent.attack_cooldown.saturating_sub(1);
        }

        let state = world.agents[idx].state;
        match state {
            AgentState::Explore => explore(world, idx),
            AgentState::MoveToPoint => move_to_point(world, idx),
            AgentState::FindFood => find_food(world, idx),
            AgentState::StoreFood => store_food(world, idx),
            AgentState::FindHeat => find_heat(world, idx),
            AgentState::BuildFire => build_fire(world, idx, events),
            AgentState::Defend | AgentState::Hunt => engage_predator(world, idx, events),
            AgentState::Flee => flee(world, idx),
            AgentState::FeedAnimal => feed_animal(world, idx),
            AgentState::PlayWithPet => play_with_pet(world, idx),
            AgentState::Cook => cook(world, idx),
            AgentState::Build => build_shelter(world, idx, events),
            AgentState::Fish => fish(world, idx),
            AgentState::Farm => farm(world, idx),
            AgentState::Heal => heal(world, idx),
            AgentState::ChopWood => chop_wood(world, idx, events),
            AgentState::GatherSupplies => gather_supplies(world, idx),
            AgentState::RecoverSelf => recover(world, idx),
            AgentState::Rest | AgentState::Sleep | AgentState::Dead => {}
        }

        grant_experience(world, idx, state);
    }
}

/// Skill experience for one tick spent in `state`
fn grant_experience(world: &mut World, idx: usize, state: AgentState) {
    let Some(skill) = state.skill() else {
        return;
    };
    let per_tick = world.config.decisions.skill_xp_per_tick;
    let agent = &mut world.agents[idx];
    let multiplier = world.config.archetypes.stats(agent.archetype).experience_multiplier;
    agent.skills.gain(skill, per_tick * multiplier);
}

// === MOVEMENT ===

fn step_agent(world: &mut World, idx: usize, target: Vec2, speed_multiplier: f32) {
    let agent = &mut world.agents[idx];
    let next = agent.position.step_toward(target, agent.speed * speed_multiplier);
    agent.position = world.terrain.clamp_to_bounds(next);
}

/// Move toward `target` until within `reach`; true once there
fn approach(world: &mut World, idx: usize, target: Vec2, reach: f32) -> bool {
    if world.agents[idx].position.distance(&target) <= reach {
        return true;
    }
    step_agent(world, idx, target, 1.0);
    world.agents[idx].position.distance(&target) <= reach
}

/// Advance the current action; true when it completes this tick
fn progress(world: &mut World, idx: usize, duration: u32) -> bool {
    let agent = &mut world.agents[idx];
    agent.action_progress += 1;
    if agent.action_progress >= duration.max(1) {
        agent.action_progress = 0;
        true
    } else {
        false
    }
}

// === STATES ===

fn explore(world: &mut World, idx: usize) {
    let arrival = world.config.decisions.arrival_distance;
    let radius = world.config.decisions.explore_radius.max(1.0);
    let pos = world.agents[idx].position;

    let target = match world.agents[idx].wander_target {
        Some(t) if t.distance(&pos) > arrival => t,
        _ => {
            let rng = world.rng_mut();
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let dist = rng.gen_range(0.0..radius);
            world.terrain.clamp_to_bounds(pos + Vec2::from_angle(angle) * dist)
        }
    };
    world.agents[idx].wander_target = Some(target);
    approach(world, idx, target, arrival);
}

fn move_to_point(world: &mut World, idx: usize) {
    let Some(target) = world.agents[idx].manual_target else {
        return;
    };
    let arrival = world.config.decisions.arrival_distance;
    if approach(world, idx, target, arrival) {
        world.agents[idx].manual_target = None;
    }
}

/// Eat one unit of carried food, food store first; false when nothing is carried
fn eat_carried(world: &mut World, idx: usize) -> bool {
    let agent = &mut world.agents[idx];
    let (kind, from_store) = match agent.food_store.first_food() {
        Some(kind) => (kind, true),
        None => match agent.inventory.first_food() {
            Some(kind) => (kind, false),
            None => return false,
        },
    };
    if from_store {
        agent.food_store.remove(kind, 1);
    } else {
        agent.inventory.remove(kind, 1);
    }
    let restore = world.config.items.hunger_restore(kind).unwrap_or(0.0);
    agent.hunger = (agent.hunger - restore).max(0.0);
    true
}

fn find_food(world: &mut World, idx: usize) {
    if eat_carried(world, idx) {
        return;
    }
    let cfg = world.config.decisions.clone();
    let pos = world.agents[idx].position;
    let Some((id, target, kind)) = world
        .nearest_food_resource(pos, cfg.gather_radius)
        .map(|r| (r.id, r.position, r.kind))
    else {
        explore(world, idx);
        return;
    };

    world.agents[idx].action_target = Some(id);
    if !approach(world, idx, target, cfg.interact_distance) {
        return;
    }
    world.agents[idx].is_bending = true;
    if let Ok(1) = world.take_from_resource(id, 1) {
        let restore = world.config.items.hunger_restore(kind).unwrap_or(0.0);
        let agent = &mut world.agents[idx];
        agent.hunger = (agent.hunger - restore).max(0.0);
    }
}

/// Move carried food into the food store and feed into the animal store
fn store_food(world: &mut World, idx: usize) {
    let agent = &mut world.agents[idx];
    let moving: Vec<(ItemKind, u32)> = agent
        .inventory
        .iter()
        .filter(|s| s.kind.is_food() || s.kind == ItemKind::AnimalFeed)
        .map(|s| (s.kind, s.quantity))
        .collect();
    for (kind, quantity) in moving {
        let moved = agent.inventory.remove(kind, quantity);
        if kind == ItemKind::AnimalFeed {
            agent.animal_food_store.add(kind, moved);
        } else {
            agent.food_store.add(kind, moved);
        }
    }
}

fn find_heat(world: &mut World, idx: usize) {
    let cfg = world.config.decisions.clone();
    let pos = world.agents[idx].position;
    let Some((fire_id, fire_pos, heat_radius, fuel)) = world
        .nearest_fire(pos, cfg.heat_search_radius)
        .map(|f| (f.id, f.position, f.heat_radius, f.fuel))
    else {
        return;
    };
    let reach = cfg.interact_distance.max(heat_radius * 0.5);
    if !approach(world, idx, fire_pos, reach) {
        return;
    }

    // Keep a dying fire going with carried wood
    if fuel < world.config.fires.full_intensity_fuel
        && world.agents[idx].inventory.remove(ItemKind::Wood, 1) == 1
    {
        if let Err(e) = world.add_wood_to_fire(fire_id, 1.0) {
            tracing::debug!("Could not refuel fire {}: {}", fire_id, e);
        }
    }
}

fn build_fire(world: &mut World, idx: usize, events: &mut Vec<SimulationEvent>) {
    let cfg = world.config.decisions.clone();
    world.agents[idx].is_bending = true;
    if !progress(world, idx, cfg.fire_build_ticks) {
        return;
    }

    let agent = &mut world.agents[idx];
    if agent.inventory.count(ItemKind::Wood) < cfg.fire_wood_cost {
        return;
    }
    agent.inventory.remove(ItemKind::Wood, cfg.fire_wood_cost);
    agent.is_bending = false;
    let (pos, by) = (agent.position, agent.id);

    match world.create_fire(pos, cfg.fire_initial_fuel, Some(by)) {
        Ok(fire) => events.push(SimulationEvent::FireLit { fire, by: Some(by) }),
        Err(e) => tracing::warn!("Agent {} failed to light a fire: {}", by, e),
    }
}

/// Defend against or hunt the agent's attack target
fn engage_predator(world: &mut World, idx: usize, events: &mut Vec<SimulationEvent>) {
    let cfg = world.config.decisions.clone();
    let Some(predator_id) = world.agents[idx].attack_target else {
        return;
    };
    let Some((target, size)) = world
        .predator(predator_id)
        .filter(|p| p.is_alive())
        .map(|p| (p.position, p.size))
    else {
        world.agents[idx].attack_target = None;
        return;
    };

    if !approach(world, idx, target, cfg.attack_range + size) {
        return;
    }
    let agent = &mut world.agents[idx];
    if agent.attack_cooldown > 0 {
        return;
    }
    agent.attack_cooldown = cfg.attack_cooldown;
    let level = agent.skill_level(SkillKind::Hunting) as f32;
    let damage = cfg.attack_damage * (1.0 + cfg.attack_damage_per_level * level);
    let by = agent.id;

    let Some(predator) = world.predator_mut(predator_id) else {
        return;
    };
    predator.health = (predator.health - damage).max(0.0);
    if predator.health > 0.0 {
        return;
    }

    let meat_count = world.config.predators.meat_from_predator;
    world.remove_predator(predator_id);
    world.agents[idx].attack_target = None;
    let meat = world.spawn_resource(ItemKind::RawMeat, target, meat_count.max(1)).ok();
    tracing::info!("Predator {} killed by agent {}", predator_id, by);
    events.push(SimulationEvent::PredatorKilled { predator: predator_id, by, meat });
}

fn flee(world: &mut World, idx: usize) {
    let cfg = world.config.decisions.clone();
    let pos = world.agents[idx].position;
    let Some(threat) = world
        .nearest_predator(pos, cfg.threat_radius * 1.5)
        .map(|(p, _)| p.position)
    else {
        return;
    };
    let mut away = (pos - threat).normalize();
    if away == Vec2::ZERO {
        away = Vec2::new(1.0, 0.0);
    }
    let agent = &world.agents[idx];
    let target = pos + away * (agent.speed * cfg.flee_speed_multiplier);
    step_agent(world, idx, target, cfg.flee_speed_multiplier);
}

/// First pet of the agent that matches, nearest first
fn nearest_pet_where(
    world: &World,
    idx: usize,
    predicate: impl Fn(&crate::entity::Animal) -> bool,
) -> Option<(EntityId, Vec2)> {
    let agent = &world.agents[idx];
    crate::ecs::query::nearest_within(
        world.pets_of(agent.id).filter(|a| predicate(a)),
        agent.position,
        f32::INFINITY,
        |a| a.position,
    )
    .map(|(a, _)| (a.id, a.position))
}

fn feed_animal(world: &mut World, idx: usize) {
    let cfg = world.config.decisions.clone();
    let Some((pet, pet_pos)) = nearest_pet_where(world, idx, |a| a.hunger > cfg.pet_hunger_threshold)
    else {
        return;
    };
    world.agents[idx].action_target = Some(pet);
    if !approach(world, idx, pet_pos, cfg.interact_distance) {
        return;
    }

    let agent = &mut world.agents[idx];
    let fed = agent.animal_food_store.remove(ItemKind::AnimalFeed, 1) == 1
        || agent.inventory.remove(ItemKind::AnimalFeed, 1) == 1;
    if !fed {
        return;
    }
    if let Some(animal) = world.animal_mut(pet) {
        animal.hunger = (animal.hunger - cfg.pet_feed_restore).max(0.0);
    }
}

fn play_with_pet(world: &mut World, idx: usize) {
    let cfg = world.config.decisions.clone();
    let Some((pet, pet_pos)) = nearest_pet_where(world, idx, |_| true) else {
        return;
    };
    world.agents[idx].action_target = Some(pet);
    if !approach(world, idx, pet_pos, cfg.interact_distance) {
        return;
    }
    if progress(world, idx, cfg.play_ticks) {
        let agent = &mut world.agents[idx];
        agent.fear = (agent.fear - cfg.play_fear_relief).max(0.0);
    }
}

fn cook(world: &mut World, idx: usize) {
    let cfg = world.config.decisions.clone();
    let pos = world.agents[idx].position;
    let Some((fire_pos, heat_radius)) = world
        .nearest_fire(pos, cfg.heat_search_radius)
        .map(|f| (f.position, f.heat_radius))
    else {
        return;
    };
    if !approach(world, idx, fire_pos, cfg.interact_distance.max(heat_radius * 0.5)) {
        return;
    }
    if !progress(world, idx, cfg.cook_ticks) {
        return;
    }
    // Cooked meat goes back where the raw meat came from
    let agent = &mut world.agents[idx];
    if agent.inventory.remove(ItemKind::RawMeat, 1) == 1 {
        agent.inventory.add(ItemKind::CookedMeat, 1);
    } else if agent.food_store.remove(ItemKind::RawMeat, 1) == 1 {
        agent.food_store.add(ItemKind::CookedMeat, 1);
    }
}

fn build_shelter(world: &mut World, idx: usize, events: &mut Vec<SimulationEvent>) {
    let cfg = world.config.decisions.clone();
    world.agents[idx].is_bending = true;
    if !progress(world, idx, cfg.build_ticks) {
        return;
    }

    let agent = &mut world.agents[idx];
    let inv = &mut agent.inventory;
    if inv.count(ItemKind::Wood) < cfg.shelter_wood || inv.count(ItemKind::Stone) < cfg.shelter_stone {
        return;
    }
    inv.remove(ItemKind::Wood, cfg.shelter_wood);
    inv.remove(ItemKind::Stone, cfg.shelter_stone);
    agent.is_bending = false;
    let (pos, by) = (agent.position, agent.id);

    match world.spawn_owned_resource(ItemKind::Shelter, pos, 1, by) {
        Ok(shelter) => {
            tracing::debug!("Agent {} built shelter {}", by, shelter);
            events.push(SimulationEvent::ShelterBuilt { shelter, by });
        }
        Err(e) => tracing::warn!("Agent {} failed to build a shelter: {}", by, e),
    }
}

fn fish(world: &mut World, idx: usize) {
    let cfg = world.config.decisions.clone();
    let pos = world.agents[idx].position;
    let Some(pond) = world.terrain.nearest_pond(pos).copied() else {
        return;
    };
    if !approach(world, idx, pond.center, pond.radius + cfg.fish_distance) {
        return;
    }
    if !progress(world, idx, cfg.fish_ticks) {
        return;
    }

    let level = world.agents[idx].skill_level(SkillKind::Fishing) as f32;
    let chance = (cfg.fish_success_chance * (1.0 + 0.1 * level)).min(1.0);
    if world.rng_mut().gen::<f32>() < chance {
        world.agents[idx].inventory.add(ItemKind::Fish, 1);
    }
}

fn farm(world: &mut World, idx: usize) {
    let cfg = world.config.decisions.clone();
    let pos = world.agents[idx].position;
    let Some(clearing) = world.terrain.nearest_clearing(pos).copied() else {
        return;
    };
    if !approach(world, idx, clearing.center, clearing.radius) {
        return;
    }
    world.agents[idx].is_bending = true;
    if !progress(world, idx, cfg.farm_ticks) {
        return;
    }

    let agent = &mut world.agents[idx];
    if agent.inventory.remove(ItemKind::Seeds, 1) == 0 {
        return;
    }
    let at = agent.position;
    if let Err(e) = world.spawn_resource(ItemKind::Berries, at, cfg.farm_berry_yield) {
        tracing::warn!("Harvest at ({:.1}, {:.1}) failed: {}", at.x, at.y, e);
    }
}

fn heal(world: &mut World, idx: usize) {
    let cfg = world.config.decisions.clone();
    if !progress(world, idx, cfg.heal_ticks) {
        return;
    }
    let agent = &mut world.agents[idx];
    if agent.inventory.remove(ItemKind::Herbs, 1) == 1 {
        let level = agent.skill_level(SkillKind::Healing) as f32;
        agent.health = (agent.health + cfg.heal_amount * (1.0 + 0.1 * level)).min(MAX_HEALTH);
    }
}

fn recover(world: &mut World, idx: usize) {
    let rate = world.config.decisions.recover_rate;
    let agent = &mut world.agents[idx];
    agent.health = (agent.health + rate).min(MAX_HEALTH);
}

fn chop_wood(world: &mut World, idx: usize, events: &mut Vec<SimulationEvent>) {
    let cfg = world.config.decisions.clone();
    let pos = world.agents[idx].position;

    // Keep working the same tree while it stands
    let current = world.agents[idx]
        .action_target
        .and_then(|id| world.tree(id))
        .filter(|t| t.is_choppable())
        .map(|t| (t.id, t.position));
    let Some((tree, tree_pos)) = current.or_else(|| {
        world
            .nearest_choppable_tree(pos, cfg.gather_radius)
            .map(|t| (t.id, t.position))
    }) else {
        let agent = &mut world.agents[idx];
        agent.is_chopping = false;
        agent.action_progress = 0;
        return;
    };

    if world.agents[idx].action_target != Some(tree) {
        world.agents[idx].action_target = Some(tree);
        world.agents[idx].action_progress = 0;
    }
    if !approach(world, idx, tree_pos, cfg.interact_distance) {
        return;
    }
    world.agents[idx].is_chopping = true;
    if !progress(world, idx, cfg.chop_ticks) {
        return;
    }

    let by = world.agents[idx].id;
    world.agents[idx].is_chopping = false;
    world.agents[idx].action_target = None;
    let quantity = match world.fell_tree(tree) {
        Ok((_, quantity)) => quantity,
        Err(e) => {
            tracing::debug!("Agent {} lost tree {}: {}", by, tree, e);
            return;
        }
    };
    world.agents[idx].inventory.add(ItemKind::Wood, quantity);
    events.push(SimulationEvent::TreeFelled { tree, wood: None, by: Some(by) });
}

fn gather_supplies(world: &mut World, idx: usize) {
    let cfg = world.config.decisions.clone();
    let pos = world.agents[idx].position;
    let Some((id, target, kind, quantity)) = world
        .nearest_resource_where(pos, cfg.gather_radius, |r| {
            r.quantity > 0 && is_loose_supply(r.kind, r.owner)
        })
        .map(|r| (r.id, r.position, r.kind, r.quantity))
    else {
        return;
    };
    world.agents[idx].action_target = Some(id);
    if !approach(world, idx, target, cfg.interact_distance) {
        return;
    }
    world.agents[idx].is_bending = true;
    if let Ok(taken) = world.take_from_resource(id, quantity) {
        world.agents[idx].inventory.add(kind, taken);
    }
}

/// Positions of all moving entities, for change detection
pub fn moving_positions(world: &World) -> Vec<(EntityKind, EntityId, Vec2)> {
    world
        .agents
        .iter()
        .map(|a| (EntityKind::Agent, a.id, a.position))
        .chain(world.animals.iter().map(|a| (EntityKind::Animal, a.id, a.position)))
        .chain(world.predators.iter().map(|p| (EntityKind::Predator, p.id, p.position)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::entity::archetype::Gender;
    use crate::entity::{AnimalKind, PredatorKind};
    use crate::sync::EntityDelta;

    fn world_with_agent(state: AgentState) -> (World, EntityId) {
        let mut world = World::empty(SimulationConfig::default());
        let id = world.create_agent("Ada", 30, Gender::Female, Vec2::new(100.0, 100.0));
        world.agent_mut(id).unwrap().set_state(state);
        (world, id)
    }

    fn run(world: &mut World, ticks: u32) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            execute_actions(world, &mut events);
        }
        events
    }

    #[test]
    fn test_find_food_eats_one_berry() {
        let (mut world, id) = world_with_agent(AgentState::FindFood);
        world.agent_mut(id).unwrap().hunger = 95.0;
        let berries = world.spawn_resource(ItemKind::Berries, Vec2::new(100.0, 100.0), 10).unwrap();

        run(&mut world, 1);

        let restore = world.config.items.berries_restore;
        assert!((world.agent(id).unwrap().hunger - (95.0 - restore)).abs() < 0.001);
        assert_eq!(world.resource(berries).unwrap().quantity, 9);
    }

    #[test]
    fn test_find_food_prefers_food_store() {
        let (mut world, id) = world_with_agent(AgentState::FindFood);
        let agent = world.agent_mut(id).unwrap();
        agent.hunger = 80.0;
        agent.food_store.add(ItemKind::CookedMeat, 1);
        let berries = world.spawn_resource(ItemKind::Berries, Vec2::new(100.0, 100.0), 2).unwrap();

        run(&mut world, 1);

        assert!(world.agent(id).unwrap().food_store.is_empty());
        assert_eq!(world.agent(id).unwrap().hunger, 40.0);
        assert_eq!(world.resource(berries).unwrap().quantity, 2);
    }

    #[test]
    fn test_chop_wood_fells_and_collects() {
        let (mut world, id) = world_with_agent(AgentState::ChopWood);
        let tree = world.spawn_tree(Vec2::new(105.0, 100.0), 5000.0);
        let expected = world.tree(tree).unwrap().wood_yield;
        let ticks = world.config.decisions.chop_ticks;
        world.drain_deltas();

        let events = run(&mut world, ticks);

        assert!(world.tree(tree).is_none());
        assert_eq!(world.agent(id).unwrap().inventory.count(ItemKind::Wood), expected);
        assert!(world.resources.is_empty());
        assert!(events
            .iter()
            .any(|e| matches!(e, SimulationEvent::TreeFelled { wood: None, .. })));
        // Carried wood never appears as a resource
        let deltas = world.drain_deltas();
        assert_eq!(deltas.len(), 1);
        assert!(matches!(deltas[0], EntityDelta::Removed { kind: EntityKind::Tree, .. }));
        assert!(world.agent(id).unwrap().skills.experience(SkillKind::Woodcutting) > 0.0);
    }

    #[test]
    fn test_interrupted_chop_keeps_harvest() {
        let (mut world, id) = world_with_agent(AgentState::ChopWood);
        world.agent_mut(id).unwrap().inventory.add(ItemKind::Wood, 2);
        world.spawn_tree(Vec2::new(105.0, 100.0), 5000.0);

        run(&mut world, 10);
        assert!(world.agent(id).unwrap().is_chopping);

        world.agent_mut(id).unwrap().set_state(AgentState::Explore);
        let agent = world.agent(id).unwrap();
        assert!(!agent.is_chopping);
        assert_eq!(agent.action_progress, 0);
        assert_eq!(agent.inventory.count(ItemKind::Wood), 2);
    }

    #[test]
    fn test_build_fire_spends_wood() {
        let (mut world, id) = world_with_agent(AgentState::BuildFire);
        world.agent_mut(id).unwrap().inventory.add(ItemKind::Wood, 3);
        let ticks = world.config.decisions.fire_build_ticks;

        let events = run(&mut world, ticks);

        assert_eq!(world.fires.len(), 1);
        assert_eq!(world.fires[0].owner, Some(id));
        assert_eq!(world.agent(id).unwrap().inventory.count(ItemKind::Wood), 1);
        assert!(events.iter().any(|e| matches!(e, SimulationEvent::FireLit { .. })));
    }

    #[test]
    fn test_defend_kills_predator_and_drops_meat() {
        let (mut world, id) = world_with_agent(AgentState::Defend);
        let wolf = world.spawn_predator(PredatorKind::Wolf, Vec2::new(110.0, 100.0)).unwrap();
        world.predator_mut(wolf).unwrap().health = 5.0;
        world.agent_mut(id).unwrap().attack_target = Some(wolf);

        let events = run(&mut world, 1);

        assert!(world.predator(wolf).is_none());
        let meat = world.resources.iter().find(|r| r.kind == ItemKind::RawMeat).unwrap();
        assert_eq!(meat.quantity, world.config.predators.meat_from_predator);
        assert!(events.iter().any(|e| matches!(e, SimulationEvent::PredatorKilled { .. })));
        assert_eq!(world.agent(id).unwrap().attack_target, None);
    }

    #[test]
    fn test_flee_moves_away() {
        let (mut world, id) = world_with_agent(AgentState::Flee);
        world.spawn_predator(PredatorKind::Bear, Vec2::new(90.0, 100.0)).unwrap();

        run(&mut world, 1);

        assert!(world.agent(id).unwrap().position.x > 100.0);
    }

    #[test]
    fn test_feed_pet_from_animal_store() {
        let (mut world, id) = world_with_agent(AgentState::FeedAnimal);
        let dog = world.spawn_animal(AnimalKind::Dog, Vec2::new(101.0, 100.0), Some(id)).unwrap();
        world.animal_mut(dog).unwrap().hunger = 80.0;
        world.agent_mut(id).unwrap().animal_food_store.add(ItemKind::AnimalFeed, 1);

        run(&mut world, 1);

        assert_eq!(world.animal(dog).unwrap().hunger, 50.0);
        assert!(world.agent(id).unwrap().animal_food_store.is_empty());
    }

    #[test]
    fn test_store_food_moves_items() {
        let (mut world, id) = world_with_agent(AgentState::StoreFood);
        let inv = &mut world.agent_mut(id).unwrap().inventory;
        inv.add(ItemKind::Berries, 4);
        inv.add(ItemKind::Wood, 2);
        inv.add(ItemKind::AnimalFeed, 1);

        run(&mut world, 1);

        let agent = world.agent(id).unwrap();
        assert_eq!(agent.food_store.count(ItemKind::Berries), 4);
        assert_eq!(agent.animal_food_store.count(ItemKind::AnimalFeed), 1);
        assert_eq!(agent.inventory.count(ItemKind::Wood), 2);
        assert_eq!(agent.inventory.first_food(), None);
    }

    #[test]
    fn test_move_to_point_clears_target() {
        let (mut world, id) = world_with_agent(AgentState::MoveToPoint);
        world.agent_mut(id).unwrap().manual_target = Some(Vec2::new(103.0, 100.0));

        run(&mut world, 5);

        let agent = world.agent(id).unwrap();
        assert_eq!(agent.manual_target, None);
        assert!(agent.position.distance(&Vec2::new(103.0, 100.0)) <= world.config.decisions.arrival_distance);
    }

    #[test]
    fn test_cook_uses_stored_raw_meat() {
        let (mut world, id) = world_with_agent(AgentState::Cook);
        world.agent_mut(id).unwrap().food_store.add(ItemKind::RawMeat, 2);
        world.create_fire(Vec2::new(105.0, 100.0), 10.0, None).unwrap();
        let ticks = world.config.decisions.cook_ticks;

        run(&mut world, ticks);

        let agent = world.agent(id).unwrap();
        assert_eq!(agent.food_store.count(ItemKind::RawMeat), 1);
        assert_eq!(agent.food_store.count(ItemKind::CookedMeat), 1);
    }

    #[test]
    fn test_build_shelter() {
        let (mut world, id) = world_with_agent(AgentState::Build);
        let inv = &mut world.agent_mut(id).unwrap().inventory;
        inv.add(ItemKind::Wood, 8);
        inv.add(ItemKind::Stone, 4);
        let ticks = world.config.decisions.build_ticks;

        run(&mut world, ticks);

        let shelter = world.resources.iter().find(|r| r.kind == ItemKind::Shelter).unwrap();
        assert_eq!(shelter.owner, Some(id));
        assert!(world.is_sheltered(Vec2::new(100.0, 100.0)));
        assert!(world.agent(id).unwrap().inventory.is_empty());
    }
}
