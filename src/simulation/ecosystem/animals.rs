//! Domestic animals: hunger, territory around water, following and feeding

use rand::Rng;

use crate::core::types::{EntityId, Vec2};
use crate::ecs::world::World;
use crate::entity::agent::MAX_HUNGER;
use crate::simulation::tick::SimulationEvent;

/// Advance every animal by one tick
pub fn update_animals(world: &mut World, events: &mut Vec<SimulationEvent>) {
    for idx in 0..world.animals.len() {
        {
            let cfg = &world.config.animals;
            let animal = &mut world.animals[idx];
            animal.hunger = (animal.hunger + cfg.hunger_rate).min(MAX_HUNGER);
            animal.feed_cooldown = animal.feed_cooldown.saturating_sub(1);
        }

        match world.animals[idx].owner {
            Some(owner) => follow_owner(world, idx, owner),
            None => roam_near_water(world, idx),
        }

        if let Some(agent) = eat_from_nearby_agent(world, idx) {
            events.push(SimulationEvent::AnimalFed { animal: world.animals[idx].id, agent });
        }
    }
}

/// Steer toward the owner when too far; drop a vanished owner
fn follow_owner(world: &mut World, idx: usize, owner: EntityId) {
    let Some(owner_pos) = world.agent(owner).map(|a| a.position) else {
        let animal = &mut world.animals[idx];
        tracing::debug!("Animal {} lost its owner {}", animal.id, owner);
        animal.owner = None;
        animal.tamed = false;
        return;
    };

    let cfg = &world.config.animals;
    let animal = &mut world.animals[idx];
    let distance = animal.position.distance(&owner_pos);
    if distance > cfg.follow_distance {
        let step = animal.speed * cfg.follow_speed_multiplier;
        animal.direction = (owner_pos - animal.position).normalize();
        animal.position = animal.position.step_toward(owner_pos, step);
    }
}

/// Wander while keeping within the configured band around the nearest pond
fn roam_near_water(world: &mut World, idx: usize) {
    let cfg = world.config.animals.clone();

    if world.rng_mut().gen::<f32>() < cfg.turn_chance {
        let angle = world.rng_mut().gen_range(0.0..std::f32::consts::TAU);
        world.animals[idx].direction = Vec2::from_angle(angle);
    }

    let animal = &world.animals[idx];
    let proposed = animal.position + animal.direction * animal.speed;

    let Some(pond) = world.terrain.nearest_pond(proposed).copied() else {
        // No water: bounce off the world edges
        let clamped = world.terrain.clamp_to_bounds(proposed);
        let animal = &mut world.animals[idx];
        if clamped != proposed {
            animal.direction = -animal.direction;
        }
        animal.position = clamped;
        return;
    };

    let to_water = pond.distance_to_edge(proposed);
    let animal = &mut world.animals[idx];
    let closing_in = to_water < pond.distance_to_edge(animal.position);
    if to_water < cfg.min_water_distance && closing_in {
        // Too close and heading in: stay put and turn around
        animal.direction = -animal.direction;
    } else if to_water > cfg.max_water_distance {
        animal.direction = (pond.center - animal.position).normalize();
        animal.position = animal.position + animal.direction * animal.speed;
    } else {
        animal.position = proposed;
    }
    animal.position = world.terrain.clamp_to_bounds(animal.position);
}

/// Eat one unit of food from a hungry agent within reach
///
/// Food store first, then food carried in the inventory. Returns the agent
/// that gave up food.
fn eat_from_nearby_agent(world: &mut World, idx: usize) -> Option<EntityId> {
    let cfg = world.config.animals.clone();
    let animal = &world.animals[idx];
    if animal.feed_cooldown > 0 {
        return None;
    }
    let pos = animal.position;

    let agent_idx = world.agents.iter().position(|a| {
        a.is_alive()
            && a.hunger > cfg.feed_agent_hunger_threshold
            && a.position.distance(&pos) <= cfg.interaction_distance
            && (a.food_store.first_food().is_some() || a.inventory.first_food().is_some())
    })?;

    let agent = &mut world.agents[agent_idx];
    if let Some(kind) = agent.food_store.first_food() {
        agent.food_store.remove(kind, 1);
    } else if let Some(kind) = agent.inventory.first_food() {
        agent.inventory.remove(kind, 1);
    }
    let agent_id = agent.id;

    let animal = &mut world.animals[idx];
    animal.hunger = (animal.hunger - cfg.feed_hunger_restore).max(0.0);
    animal.feed_cooldown = cfg.feed_cooldown;
    Some(agent_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::entity::archetype::Gender;
    use crate::entity::{AnimalKind, ItemKind};
    use crate::environment::Pond;

    fn world() -> World {
        let mut config = SimulationConfig::default();
        config.animals.turn_chance = 0.0;
        World::empty(config)
    }

    #[test]
    fn test_hunger_rises() {
        let mut world = world();
        let id = world.spawn_animal(AnimalKind::Goat, Vec2::new(500.0, 500.0), None).unwrap();
        update_animals(&mut world, &mut Vec::new());
        assert!(world.animal(id).unwrap().hunger > 0.0);
    }

    #[test]
    fn test_too_close_to_water_turns_back() {
        let mut world = world();
        world.terrain.ponds.push(Pond { center: Vec2::new(500.0, 500.0), radius: 50.0 });
        let id = world.spawn_animal(AnimalKind::Sheep, Vec2::new(565.0, 500.0), None).unwrap();
        world.animal_mut(id).unwrap().direction = Vec2::new(-1.0, 0.0);

        update_animals(&mut world, &mut Vec::new());

        let animal = world.animal(id).unwrap();
        assert_eq!(animal.position, Vec2::new(565.0, 500.0));
        assert_eq!(animal.direction, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_animal_inside_shore_band_walks_out() {
        let mut world = world();
        world.terrain.ponds.push(Pond { center: Vec2::new(500.0, 500.0), radius: 50.0 });
        let id = world.spawn_animal(AnimalKind::Goat, Vec2::new(560.0, 500.0), None).unwrap();
        world.animal_mut(id).unwrap().direction = Vec2::new(1.0, 0.0);

        for _ in 0..100 {
            update_animals(&mut world, &mut Vec::new());
        }

        let animal = world.animal(id).unwrap();
        let pond = world.terrain.ponds[0];
        assert!(pond.distance_to_edge(animal.position) >= world.config.animals.min_water_distance);
    }

    #[test]
    fn test_too_far_from_water_heads_back() {
        let mut world = world();
        world.terrain.ponds.push(Pond { center: Vec2::new(100.0, 100.0), radius: 30.0 });
        let start = Vec2::new(800.0, 100.0);
        let id = world.spawn_animal(AnimalKind::Goat, start, None).unwrap();

        update_animals(&mut world, &mut Vec::new());

        let animal = world.animal(id).unwrap();
        assert!(animal.position.x < start.x);
    }

    #[test]
    fn test_pet_follows_owner() {
        let mut world = world();
        let owner = world.create_agent("Ada", 30, Gender::Female, Vec2::new(100.0, 100.0));
        let dog = world.spawn_animal(AnimalKind::Dog, Vec2::new(300.0, 100.0), Some(owner)).unwrap();

        update_animals(&mut world, &mut Vec::new());

        assert!(world.animal(dog).unwrap().position.x < 300.0);
    }

    #[test]
    fn test_missing_owner_is_cleared() {
        let mut world = world();
        let owner = world.create_agent("Ada", 30, Gender::Female, Vec2::ZERO);
        let dog = world.spawn_animal(AnimalKind::Dog, Vec2::new(300.0, 100.0), Some(owner)).unwrap();
        world.reset_roster();

        update_animals(&mut world, &mut Vec::new());

        let animal = world.animal(dog).unwrap();
        assert_eq!(animal.owner, None);
        assert!(!animal.tamed);
    }

    #[test]
    fn test_animal_eats_from_hungry_agent_with_cooldown() {
        let mut world = world();
        let agent = world.create_agent("Ada", 30, Gender::Female, Vec2::new(500.0, 500.0));
        {
            let a = world.agent_mut(agent).unwrap();
            a.hunger = 70.0;
            a.food_store.add(ItemKind::Berries, 2);
        }
        let cat = world.spawn_animal(AnimalKind::Cat, Vec2::new(505.0, 500.0), None).unwrap();
        world.animal_mut(cat).unwrap().hunger = 50.0;
        world.animal_mut(cat).unwrap().speed = 0.0;

        let mut events = Vec::new();
        update_animals(&mut world, &mut events);
        update_animals(&mut world, &mut events);

        assert_eq!(world.agent(agent).unwrap().food_store.count(ItemKind::Berries), 1);
        assert_eq!(events.len(), 1);
        assert!(world.animal(cat).unwrap().hunger < 50.0);
    }

    #[test]
    fn test_animal_ignores_fed_agent() {
        let mut world = world();
        let agent = world.create_agent("Ada", 30, Gender::Female, Vec2::new(500.0, 500.0));
        world.agent_mut(agent).unwrap().food_store.add(ItemKind::Berries, 2);
        world.spawn_animal(AnimalKind::Cat, Vec2::new(505.0, 500.0), None).unwrap();

        update_animals(&mut world, &mut Vec::new());

        assert_eq!(world.agent(agent).unwrap().food_store.count(ItemKind::Berries), 2);
    }
}
