//! Fire fuel consumption and extinguishing

use crate::core::types::EntityId;
use crate::ecs::world::World;
use crate::simulation::tick::SimulationEvent;

/// Burn fuel on every fire and remove the ones that went out
pub fn update_fires(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let cfg = world.config.fires.clone();
    let mut extinguished: Vec<EntityId> = Vec::new();

    for fire in &mut world.fires {
        fire.fuel = (fire.fuel - cfg.burn_rate).max(0.0);
        fire.refresh(&cfg);
        if fire.is_extinguished(&cfg) {
            extinguished.push(fire.id);
        }
    }

    for id in extinguished {
        if world.remove_fire(id).is_some() {
            tracing::debug!("Fire {} went out at tick {}", id, world.current_tick);
            events.push(SimulationEvent::FireExtinguished { fire: id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::Vec2;

    #[test]
    fn test_fire_burns_down_and_is_removed() {
        let mut world = World::empty(SimulationConfig::default());
        let id = world.create_fire(Vec2::ZERO, 5.0, None).unwrap();
        let mut events = Vec::new();

        let mut last_fuel = world.fire(id).unwrap().fuel;
        for _ in 0..600 {
            update_fires(&mut world, &mut events);
            match world.fire(id) {
                Some(fire) => {
                    assert!(fire.fuel <= last_fuel);
                    last_fuel = fire.fuel;
                }
                None => break,
            }
        }

        assert!(world.fire(id).is_none());
        assert_eq!(events, vec![SimulationEvent::FireExtinguished { fire: id }]);
    }

    #[test]
    fn test_intensity_follows_fuel() {
        let mut world = World::empty(SimulationConfig::default());
        let id = world.create_fire(Vec2::ZERO, 10.0, None).unwrap();
        let mut events = Vec::new();
        update_fires(&mut world, &mut events);

        let fire = world.fire(id).unwrap();
        assert_eq!(fire.intensity, 1.0);
        assert!(fire.heat_radius > world.config.fires.base_heat_radius);
    }
}
