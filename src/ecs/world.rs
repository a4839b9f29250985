//! World - owns every entity collection of one simulated world

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::{ensure_non_negative, EcoError, Result};
use crate::core::types::{EntityId, EntityKind, Tick, Vec2};
use crate::entity::archetype::Gender;
use crate::entity::{
    Agent, Animal, AnimalKind, Fire, ItemKind, Predator, PredatorKind, Resource, Tree,
};
use crate::environment::{Terrain, Weather, WeatherState};
use crate::sync::{EntityDelta, EntityRecord};

/// The simulated world containing all entities
///
/// Collections are insertion-ordered; systems iterate them in that order,
/// which makes "first found" searches deterministic.
pub struct World {
    pub current_tick: Tick,
    pub config: SimulationConfig,
    pub agents: Vec<Agent>,
    pub animals: Vec<Animal>,
    pub predators: Vec<Predator>,
    pub trees: Vec<Tree>,
    pub fires: Vec<Fire>,
    pub resources: Vec<Resource>,
    pub terrain: Terrain,
    pub weather: WeatherState,
    rng: ChaCha8Rng,
    deltas: Vec<EntityDelta>,
}

impl World {
    /// World with no terrain and no entities
    pub fn empty(config: SimulationConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.world.seed);
        let terrain = Terrain::empty(config.world.width, config.world.height);
        Self {
            current_tick: 0,
            config,
            agents: Vec::new(),
            animals: Vec::new(),
            predators: Vec::new(),
            trees: Vec::new(),
            fires: Vec::new(),
            resources: Vec::new(),
            terrain,
            weather: WeatherState::new(Weather::Clear, 0),
            rng,
            deltas: Vec::new(),
        }
    }

    /// World with generated terrain, forest, berry patches and stone
    pub fn new(config: SimulationConfig) -> Self {
        let mut world = Self::empty(config);
        world.generate_static_features();
        world
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Uniform point inside the bounds, `margin` away from the edges
    pub fn random_point(&mut self, margin: f32) -> Vec2 {
        self.terrain.random_point(&mut self.rng, margin)
    }

    pub(crate) fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    fn generate_static_features(&mut self) {
        self.generate_trees_and_terrain();

        let world_cfg = self.config.world.clone();
        for _ in 0..world_cfg.initial_berry_patches {
            let pos = self.terrain.random_point(&mut self.rng, 5.0);
            self.insert_resource(Resource::new(
                ItemKind::Berries,
                pos,
                world_cfg.berries_per_patch,
                self.current_tick,
            ));
        }

        for _ in 0..world_cfg.initial_stone_piles {
            let pos = self.terrain.random_point(&mut self.rng, 5.0);
            self.insert_resource(Resource::new(ItemKind::Stone, pos, 6, self.current_tick));
        }
    }

    pub fn tick(&mut self) {
        self.current_tick += 1;
    }

    /// Roll the weather once its interval has passed; returns a change
    pub fn roll_weather(&mut self) -> Option<Weather> {
        let interval = self.config.world.weather_change_interval;
        self.weather.update(self.current_tick, interval, &mut self.rng)
    }

    // === DELTAS ===

    fn record(&mut self, delta: EntityDelta) {
        self.deltas.push(delta);
    }

    pub(crate) fn record_moved(&mut self, kind: EntityKind, id: EntityId, position: Vec2) {
        self.record(EntityDelta::Moved { kind, id, position });
    }

    /// Take every delta produced since the last drain
    pub fn drain_deltas(&mut self) -> Vec<EntityDelta> {
        std::mem::take(&mut self.deltas)
    }

    pub fn pending_deltas(&self) -> &[EntityDelta] {
        &self.deltas
    }

    /// Apply a delta received from another participant
    ///
    /// Remote deltas are not echoed back into the outgoing delta log.
    pub fn apply_delta(&mut self, delta: EntityDelta) -> Result<()> {
        match delta {
            EntityDelta::Created(record) => {
                self.upsert_record(record);
                Ok(())
            }
            EntityDelta::Moved { kind, id, position } => {
                if !position.is_finite() {
                    return Err(EcoError::invalid_range("position", position.x));
                }
                let slot = match kind {
                    EntityKind::Agent => self.agent_mut(id).map(|e| &mut e.position),
                    EntityKind::Animal => self.animal_mut(id).map(|e| &mut e.position),
                    EntityKind::Predator => self.predator_mut(id).map(|e| &mut e.position),
                    EntityKind::Tree => self.tree_mut(id).map(|e| &mut e.position),
                    EntityKind::Fire => self.fire_mut(id).map(|e| &mut e.position),
                    EntityKind::Resource => self.resource_mut(id).map(|e| &mut e.position),
                };
                let slot = slot.ok_or(EcoError::not_found(kind, id))?;
                *slot = position;
                Ok(())
            }
            EntityDelta::Removed { kind, id } => {
                let removed = match kind {
                    EntityKind::Agent => remove_by_id(&mut self.agents, id, |e| e.id).is_some(),
                    EntityKind::Animal => remove_by_id(&mut self.animals, id, |e| e.id).is_some(),
                    EntityKind::Predator => {
                        remove_by_id(&mut self.predators, id, |e| e.id).is_some()
                    }
                    EntityKind::Tree => remove_by_id(&mut self.trees, id, |e| e.id).is_some(),
                    EntityKind::Fire => remove_by_id(&mut self.fires, id, |e| e.id).is_some(),
                    EntityKind::Resource => {
                        remove_by_id(&mut self.resources, id, |e| e.id).is_some()
                    }
                };
                if removed {
                    Ok(())
                } else {
                    Err(EcoError::not_found(kind, id))
                }
            }
        }
    }

    fn upsert_record(&mut self, record: EntityRecord) {
        fn upsert<T>(items: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> EntityId) {
            let id = id_of(&item);
            match items.iter_mut().find(|e| id_of(e) == id) {
                Some(existing) => *existing = item,
                None => items.push(item),
            }
        }
        match record {
            EntityRecord::Agent(e) => upsert(&mut self.agents, e, |e| e.id),
            EntityRecord::Animal(e) => upsert(&mut self.animals, e, |e| e.id),
            EntityRecord::Predator(e) => upsert(&mut self.predators, e, |e| e.id),
            EntityRecord::Tree(e) => upsert(&mut self.trees, e, |e| e.id),
            EntityRecord::Fire(e) => upsert(&mut self.fires, e, |e| e.id),
            EntityRecord::Resource(e) => upsert(&mut self.resources, e, |e| e.id),
        }
    }

    // === SPAWNING ===

    pub fn spawn_agent(&mut self, agent: Agent) -> EntityId {
        let id = agent.id;
        self.record(EntityDelta::Created(EntityRecord::Agent(agent.clone())));
        self.agents.push(agent);
        id
    }

    /// Create an agent whose archetype follows from age and gender
    pub fn create_agent(
        &mut self,
        name: impl Into<String>,
        age: u32,
        gender: Gender,
        position: Vec2,
    ) -> EntityId {
        let agent = Agent::new(name, age, gender, position, &self.config.archetypes, self.current_tick);
        self.spawn_agent(agent)
    }

    pub fn spawn_animal(
        &mut self,
        kind: AnimalKind,
        position: Vec2,
        owner: Option<EntityId>,
    ) -> Result<EntityId> {
        ensure_position(position)?;
        if let Some(owner) = owner {
            if self.agent(owner).is_none() {
                return Err(EcoError::not_found(EntityKind::Agent, owner));
            }
        }
        let mut animal = Animal::new(kind, position, self.config.animals.speed, self.current_tick);
        if let Some(owner) = owner {
            animal = animal.owned_by(owner);
        }
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        animal.direction = Vec2::from_angle(angle);

        let id = animal.id;
        self.record(EntityDelta::Created(EntityRecord::Animal(animal.clone())));
        self.animals.push(animal);
        Ok(id)
    }

    pub fn spawn_predator(&mut self, kind: PredatorKind, position: Vec2) -> Result<EntityId> {
        ensure_position(position)?;
        let predator = Predator::new(kind, position, self.current_tick);
        let id = predator.id;
        self.record(EntityDelta::Created(EntityRecord::Predator(predator.clone())));
        self.predators.push(predator);
        Ok(id)
    }

    /// Plant a tree; its wood yield is rolled now and never changes
    pub fn spawn_tree(&mut self, position: Vec2, age: f32) -> EntityId {
        let cfg = &self.config.trees;
        let wood_yield = self.rng.gen_range(cfg.min_wood_yield..=cfg.max_wood_yield);
        let tree = Tree::new(position, age, wood_yield, cfg, self.current_tick);
        let id = tree.id;
        self.record(EntityDelta::Created(EntityRecord::Tree(tree.clone())));
        self.trees.push(tree);
        id
    }

    pub fn create_fire(
        &mut self,
        position: Vec2,
        fuel: f32,
        owner: Option<EntityId>,
    ) -> Result<EntityId> {
        ensure_position(position)?;
        let fuel = ensure_non_negative("fuel", fuel)?;
        if fuel == 0.0 {
            return Err(EcoError::invalid_range("fuel", fuel));
        }
        let fire = Fire::new(position, fuel, owner, &self.config.fires, self.current_tick);
        let id = fire.id;
        tracing::debug!("Fire {} lit at ({:.1}, {:.1}) with {:.2} fuel", id, position.x, position.y, fire.fuel);
        self.record(EntityDelta::Created(EntityRecord::Fire(fire.clone())));
        self.fires.push(fire);
        Ok(id)
    }

    pub fn spawn_resource(&mut self, kind: ItemKind, position: Vec2, quantity: u32) -> Result<EntityId> {
        ensure_position(position)?;
        if quantity == 0 {
            return Err(EcoError::invalid_range("quantity", 0));
        }
        Ok(self.insert_resource(Resource::new(kind, position, quantity, self.current_tick)))
    }

    /// Spawn a resource that belongs to an agent, such as a built shelter
    pub fn spawn_owned_resource(
        &mut self,
        kind: ItemKind,
        position: Vec2,
        quantity: u32,
        owner: EntityId,
    ) -> Result<EntityId> {
        ensure_position(position)?;
        if quantity == 0 {
            return Err(EcoError::invalid_range("quantity", 0));
        }
        let mut resource = Resource::new(kind, position, quantity, self.current_tick);
        resource.owner = Some(owner);
        Ok(self.insert_resource(resource))
    }

    fn insert_resource(&mut self, resource: Resource) -> EntityId {
        let id = resource.id;
        self.record(EntityDelta::Created(EntityRecord::Resource(resource.clone())));
        self.resources.push(resource);
        id
    }

    // === ATOMIC WORLD OPERATIONS ===

    /// Fell a tree: remove it and drop its recorded wood yield in its place
    pub fn chop_tree(&mut self, id: EntityId) -> Result<EntityId> {
        let (position, quantity) = self.fell_tree(id)?;
        let wood = self.insert_resource(Resource::new(
            ItemKind::Wood,
            position,
            quantity,
            self.current_tick,
        ));
        tracing::debug!("Tree {} felled, {} wood dropped", id, quantity);
        Ok(wood)
    }

    /// Remove a tree and return where it stood and how much wood it yields
    pub fn fell_tree(&mut self, id: EntityId) -> Result<(Vec2, u32)> {
        let tree = self
            .remove_tree(id)
            .ok_or(EcoError::not_found(EntityKind::Tree, id))?;
        Ok((tree.position, tree.wood_yield.max(1)))
    }

    /// Add wood to a fire, capped at the maximum fuel; returns the new fuel
    pub fn add_wood_to_fire(&mut self, id: EntityId, wood: f32) -> Result<f32> {
        let wood = ensure_non_negative("wood", wood)?;
        if wood == 0.0 {
            return Err(EcoError::invalid_range("wood", wood));
        }
        let cfg = self.config.fires.clone();
        let fire = self
            .fire_mut(id)
            .ok_or(EcoError::not_found(EntityKind::Fire, id))?;
        fire.fuel = (fire.fuel + wood).min(cfg.max_fuel);
        fire.refresh(&cfg);
        Ok(fire.fuel)
    }

    /// Take up to `amount` from a resource, removing it once empty
    pub fn take_from_resource(&mut self, id: EntityId, amount: u32) -> Result<u32> {
        let resource = self
            .resource_mut(id)
            .ok_or(EcoError::not_found(EntityKind::Resource, id))?;
        let taken = resource.take(amount);
        if resource.is_depleted() {
            self.remove_resource(id);
        }
        Ok(taken)
    }

    // === REMOVAL ===

    pub fn remove_tree(&mut self, id: EntityId) -> Option<Tree> {
        let removed = remove_by_id(&mut self.trees, id, |e| e.id);
        if removed.is_some() {
            self.record(EntityDelta::Removed { kind: EntityKind::Tree, id });
        }
        removed
    }

    pub fn remove_fire(&mut self, id: EntityId) -> Option<Fire> {
        let removed = remove_by_id(&mut self.fires, id, |e| e.id);
        if removed.is_some() {
            self.record(EntityDelta::Removed { kind: EntityKind::Fire, id });
        }
        removed
    }

    pub fn remove_animal(&mut self, id: EntityId) -> Option<Animal> {
        let removed = remove_by_id(&mut self.animals, id, |e| e.id);
        if removed.is_some() {
            self.record(EntityDelta::Removed { kind: EntityKind::Animal, id });
        }
        removed
    }

    pub fn remove_predator(&mut self, id: EntityId) -> Option<Predator> {
        let removed = remove_by_id(&mut self.predators, id, |e| e.id);
        if removed.is_some() {
            self.record(EntityDelta::Removed { kind: EntityKind::Predator, id });
        }
        removed
    }

    pub fn remove_resource(&mut self, id: EntityId) -> Option<Resource> {
        let removed = remove_by_id(&mut self.resources, id, |e| e.id);
        if removed.is_some() {
            self.record(EntityDelta::Removed { kind: EntityKind::Resource, id });
        }
        removed
    }

    // === RESETS ===

    /// Remove every agent
    pub fn reset_roster(&mut self) {
        let ids: Vec<EntityId> = self.agents.iter().map(|a| a.id).collect();
        self.agents.clear();
        for id in ids {
            self.record(EntityDelta::Removed { kind: EntityKind::Agent, id });
        }
    }

    /// Clear animals, predators and fires and regenerate terrain and forest
    ///
    /// Takes `&mut self`, so it can never run in the middle of a tick.
    pub fn reset_world(&mut self) {
        let removed: Vec<(EntityKind, EntityId)> = self
            .animals
            .iter()
            .map(|e| (EntityKind::Animal, e.id))
            .chain(self.predators.iter().map(|e| (EntityKind::Predator, e.id)))
            .chain(self.fires.iter().map(|e| (EntityKind::Fire, e.id)))
            .chain(self.trees.iter().map(|e| (EntityKind::Tree, e.id)))
            .collect();
        self.animals.clear();
        self.predators.clear();
        self.fires.clear();
        self.trees.clear();
        for (kind, id) in removed {
            self.record(EntityDelta::Removed { kind, id });
        }

        self.generate_trees_and_terrain();
        tracing::info!(
            "World reset at tick {}: {} trees regenerated",
            self.current_tick,
            self.trees.len()
        );
    }

    fn generate_trees_and_terrain(&mut self) {
        let world_cfg = self.config.world.clone();
        self.terrain = Terrain::generate(&world_cfg, &mut self.rng);
        for _ in 0..world_cfg.initial_trees {
            let pos = self.terrain.random_point(&mut self.rng, 5.0);
            let age = self.rng.gen_range(0.0..self.config.trees.old_age);
            self.spawn_tree(pos, age);
        }
    }

    // === LOOKUPS ===

    pub fn agent(&self, id: EntityId) -> Option<&Agent> {
        self.agents.iter().find(|e| e.id == id)
    }

    pub fn agent_mut(&mut self, id: EntityId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|e| e.id == id)
    }

    pub fn agent_index(&self, id: EntityId) -> Option<usize> {
        self.agents.iter().position(|e| e.id == id)
    }

    pub fn animal(&self, id: EntityId) -> Option<&Animal> {
        self.animals.iter().find(|e| e.id == id)
    }

    pub fn animal_mut(&mut self, id: EntityId) -> Option<&mut Animal> {
        self.animals.iter_mut().find(|e| e.id == id)
    }

    pub fn predator(&self, id: EntityId) -> Option<&Predator> {
        self.predators.iter().find(|e| e.id == id)
    }

    pub fn predator_mut(&mut self, id: EntityId) -> Option<&mut Predator> {
        self.predators.iter_mut().find(|e| e.id == id)
    }

    pub fn tree(&self, id: EntityId) -> Option<&Tree> {
        self.trees.iter().find(|e| e.id == id)
    }

    pub fn tree_mut(&mut self, id: EntityId) -> Option<&mut Tree> {
        self.trees.iter_mut().find(|e| e.id == id)
    }

    pub fn fire(&self, id: EntityId) -> Option<&Fire> {
        self.fires.iter().find(|e| e.id == id)
    }

    pub fn fire_mut(&mut self, id: EntityId) -> Option<&mut Fire> {
        self.fires.iter_mut().find(|e| e.id == id)
    }

    pub fn resource(&self, id: EntityId) -> Option<&Resource> {
        self.resources.iter().find(|e| e.id == id)
    }

    pub fn resource_mut(&mut self, id: EntityId) -> Option<&mut Resource> {
        self.resources.iter_mut().find(|e| e.id == id)
    }

    pub fn living_agent_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::empty(SimulationConfig::default())
    }
}

/// Remove an element by id, preserving the order of the rest
fn remove_by_id<T>(items: &mut Vec<T>, id: EntityId, id_of: impl Fn(&T) -> EntityId) -> Option<T> {
    let idx = items.iter().position(|e| id_of(e) == id)?;
    Some(items.remove(idx))
}

fn ensure_position(position: Vec2) -> Result<()> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(EcoError::invalid_range("position", position.x))
    }
}
