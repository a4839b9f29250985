//! World query surface: nearest-entity and terrain lookups
//!
//! Every system reaches the world's collections through these helpers so it
//! never depends on how entities are stored. Searches are linear scans in
//! insertion order; ties on distance go to the earlier entity.

use ordered_float::OrderedFloat;

use crate::core::types::{EntityId, Vec2};
use crate::ecs::world::World;
use crate::entity::{Agent, Animal, Fire, ItemKind, Predator, Resource, Tree};

/// Closest item within `radius` of `pos`, earliest wins on ties
pub fn nearest_within<'a, T>(
    items: impl IntoIterator<Item = &'a T>,
    pos: Vec2,
    radius: f32,
    position_of: impl Fn(&T) -> Vec2,
) -> Option<(&'a T, f32)>
where
    T: 'a,
{
    items
        .into_iter()
        .map(|item| {
            let d = position_of(item).distance(&pos);
            (item, d)
        })
        .filter(|(_, d)| *d <= radius)
        // min_by_key keeps the first of equal keys
        .min_by_key(|(_, d)| OrderedFloat(*d))
}

impl World {
    /// Nearest tree worth felling
    pub fn nearest_choppable_tree(&self, pos: Vec2, radius: f32) -> Option<&Tree> {
        nearest_within(
            self.trees.iter().filter(|t| t.is_choppable()),
            pos,
            radius,
            |t| t.position,
        )
        .map(|(t, _)| t)
    }

    pub fn nearest_fire(&self, pos: Vec2, radius: f32) -> Option<&Fire> {
        nearest_within(&self.fires, pos, radius, |f| f.position).map(|(f, _)| f)
    }

    /// Fires whose heat radius reaches `pos`, with their distance
    pub fn fires_warming(&self, pos: Vec2) -> impl Iterator<Item = (&Fire, f32)> + '_ {
        self.fires.iter().filter_map(move |f| {
            let d = f.position.distance(&pos);
            (d <= f.heat_radius).then_some((f, d))
        })
    }

    pub fn nearest_resource_where(
        &self,
        pos: Vec2,
        radius: f32,
        predicate: impl Fn(&Resource) -> bool,
    ) -> Option<&Resource> {
        nearest_within(
            self.resources.iter().filter(|r| predicate(r)),
            pos,
            radius,
            |r| r.position,
        )
        .map(|(r, _)| r)
    }

    pub fn nearest_food_resource(&self, pos: Vec2, radius: f32) -> Option<&Resource> {
        self.nearest_resource_where(pos, radius, |r| r.kind.is_food() && r.quantity > 0)
    }

    pub fn nearest_predator(&self, pos: Vec2, radius: f32) -> Option<(&Predator, f32)> {
        nearest_within(
            self.predators.iter().filter(|p| p.is_alive()),
            pos,
            radius,
            |p| p.position,
        )
    }

    pub fn nearest_living_agent(&self, pos: Vec2, radius: f32) -> Option<(&Agent, f32)> {
        nearest_within(
            self.agents.iter().filter(|a| a.is_alive()),
            pos,
            radius,
            |a| a.position,
        )
    }

    /// Animals following the given agent
    pub fn pets_of(&self, agent: EntityId) -> impl Iterator<Item = &Animal> + '_ {
        self.animals.iter().filter(move |a| a.owner == Some(agent))
    }

    pub fn nearest_pet(&self, agent: EntityId, pos: Vec2) -> Option<&Animal> {
        nearest_within(self.pets_of(agent), pos, f32::INFINITY, |a| a.position).map(|(a, _)| a)
    }

    /// Distance to the closest pond shoreline, `None` without ponds
    pub fn distance_to_water(&self, pos: Vec2) -> Option<f32> {
        self.terrain.distance_to_water(pos)
    }

    /// Whether a placed shelter covers `pos`
    pub fn is_sheltered(&self, pos: Vec2) -> bool {
        let radius = self.config.needs.shelter_radius;
        self.resources
            .iter()
            .any(|r| r.kind == ItemKind::Shelter && r.position.distance(&pos) <= radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::entity::archetype::Gender;
    use crate::entity::{AnimalKind, PredatorKind};

    #[test]
    fn test_nearest_within_prefers_closest_then_first() {
        let points = [Vec2::new(5.0, 0.0), Vec2::new(3.0, 0.0), Vec2::new(0.0, 3.0)];
        let (p, d) = nearest_within(&points, Vec2::ZERO, 10.0, |p| *p).unwrap();
        assert_eq!(*p, Vec2::new(3.0, 0.0));
        assert!((d - 3.0).abs() < 0.001);

        assert!(nearest_within(&points, Vec2::ZERO, 1.0, |p| *p).is_none());
    }

    #[test]
    fn test_nearest_choppable_tree_skips_saplings() {
        let mut world = World::empty(SimulationConfig::default());
        world.spawn_tree(Vec2::new(1.0, 0.0), 0.0);
        let mature = world.spawn_tree(Vec2::new(50.0, 0.0), 5000.0);

        let found = world.nearest_choppable_tree(Vec2::ZERO, 100.0).unwrap();
        assert_eq!(found.id, mature);
    }

    #[test]
    fn test_fires_warming_respects_heat_radius() {
        let mut world = World::empty(SimulationConfig::default());
        world.create_fire(Vec2::ZERO, 5.0, None).unwrap();
        assert_eq!(world.fires_warming(Vec2::new(10.0, 0.0)).count(), 1);
        assert_eq!(world.fires_warming(Vec2::new(500.0, 0.0)).count(), 0);
    }

    #[test]
    fn test_pets_of() {
        let mut world = World::empty(SimulationConfig::default());
        let owner = world.create_agent("Ada", 30, Gender::Female, Vec2::ZERO);
        world.spawn_animal(AnimalKind::Dog, Vec2::new(10.0, 0.0), Some(owner)).unwrap();
        world.spawn_animal(AnimalKind::Goat, Vec2::new(1.0, 0.0), None).unwrap();

        assert_eq!(world.pets_of(owner).count(), 1);
        assert_eq!(world.nearest_pet(owner, Vec2::ZERO).unwrap().kind, AnimalKind::Dog);
    }

    #[test]
    fn test_nearest_predator_ignores_far() {
        let mut world = World::empty(SimulationConfig::default());
        world.spawn_predator(PredatorKind::Wolf, Vec2::new(300.0, 0.0)).unwrap();
        assert!(world.nearest_predator(Vec2::ZERO, 100.0).is_none());
        assert!(world.nearest_predator(Vec2::ZERO, 400.0).is_some());
    }
}
