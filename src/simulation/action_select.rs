//! Action selection - picks each agent's behavioral state every tick
//!
//! The world is read once into a [`SelectionContext`], then a fixed priority
//! list is walked and the first matching rule wins. Selection never mutates
//! the world; applying the choice is left to [`decide`].

use crate::core::config::DecisionConfig;
use crate::core::types::{EntityId, Tick};
use crate::ecs::world::World;
use crate::entity::agent::{AgentState, Mood};
use crate::entity::ItemKind;
use crate::simulation::tick::SimulationEvent;
use crate::skills::SkillKind;

/// Everything the priority list looks at for one agent
#[derive(Debug, Clone, Default)]
pub struct SelectionContext {
    pub alive: bool,
    pub current: Option<AgentState>,
    pub health: f32,
    pub hunger: f32,
    pub temperature: f32,
    /// Energy as a percentage of the archetype maximum
    pub energy_pct: f32,
    pub mood: Mood,
    pub hunting_level: u32,

    /// Closest living predator inside the threat radius
    pub threat: Option<EntityId>,
    pub has_manual_target: bool,

    pub has_herbs: bool,
    pub has_raw_meat: bool,
    pub has_food_in_inventory: bool,
    pub has_animal_feed: bool,
    pub has_seeds: bool,
    pub wood: u32,
    pub stone: u32,

    /// A fire inside the heat search radius
    pub fire_nearby: bool,
    pub tree_nearby: bool,
    pub has_pet: bool,
    pub hungry_pet: bool,
    /// Predator inside the hunt radius
    pub prey: Option<EntityId>,
    pub clearing_exists: bool,
    pub sheltered: bool,
    pub near_water: bool,
    pub loose_supplies: bool,
}

/// Chosen state plus the predator to engage, if any
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub state: AgentState,
    pub attack_target: Option<EntityId>,
}

impl Choice {
    fn to(state: AgentState) -> Self {
        Self { state, attack_target: None }
    }
}

/// Walk the priority list; first match wins
pub fn select_state(ctx: &SelectionContext, cfg: &DecisionConfig) -> Choice {
    if !ctx.alive {
        return Choice::to(AgentState::Dead);
    }

    // Threat response overrides everything
    if let Some(predator) = ctx.threat {
        if ctx.hunting_level >= cfg.defend_skill_level || ctx.health >= cfg.defend_health {
            return Choice { state: AgentState::Defend, attack_target: Some(predator) };
        }
        return Choice::to(AgentState::Flee);
    }

    if ctx.has_manual_target {
        return Choice::to(AgentState::MoveToPoint);
    }

    let wounded = ctx.health < cfg.heal_threshold;
    if wounded && ctx.has_herbs {
        return Choice::to(AgentState::Heal);
    }

    // Hunger outranks RecoverSelf; only herbs beat it
    if ctx.hunger > cfg.search_food_threshold {
        if ctx.has_raw_meat && ctx.fire_nearby {
            return Choice::to(AgentState::Cook);
        }
        return Choice::to(AgentState::FindFood);
    }

    if wounded {
        return Choice::to(AgentState::RecoverSelf);
    }

    if ctx.temperature < cfg.cold_threshold {
        if ctx.fire_nearby {
            return Choice::to(AgentState::FindHeat);
        }
        if ctx.wood >= cfg.fire_wood_cost {
            return Choice::to(AgentState::BuildFire);
        }
        if ctx.tree_nearby {
            return Choice::to(AgentState::ChopWood);
        }
    }

    if let Some(state) = select_rest(ctx, cfg) {
        return Choice::to(state);
    }

    if ctx.hungry_pet && ctx.has_animal_feed {
        return Choice::to(AgentState::FeedAnimal);
    }

    if ctx.has_raw_meat && ctx.fire_nearby {
        return Choice::to(AgentState::Cook);
    }

    if ctx.has_food_in_inventory {
        return Choice::to(AgentState::StoreFood);
    }

    if ctx.wood < cfg.wood_reserve && ctx.tree_nearby {
        return Choice::to(AgentState::ChopWood);
    }

    if ctx.mood == Mood::Anxious && ctx.has_pet {
        return Choice::to(AgentState::PlayWithPet);
    }

    if let Some(predator) = ctx.prey {
        if ctx.hunger > cfg.hunt_hunger_threshold && ctx.health >= cfg.hunt_health {
            return Choice { state: AgentState::Hunt, attack_target: Some(predator) };
        }
    }

    if let Some(state) = select_work(ctx, cfg) {
        return Choice::to(state);
    }

    Choice::to(AgentState::Explore)
}

/// Sleep or rest, holding the state until energy passes the exit level
fn select_rest(ctx: &SelectionContext, cfg: &DecisionConfig) -> Option<AgentState> {
    match ctx.current {
        Some(state @ (AgentState::Rest | AgentState::Sleep)) if ctx.energy_pct < cfg.rest_exit => {
            if state == AgentState::Rest && ctx.energy_pct < cfg.sleep_threshold {
                Some(AgentState::Sleep)
            } else {
                Some(state)
            }
        }
        _ if ctx.energy_pct < cfg.sleep_threshold => Some(AgentState::Sleep),
        _ if ctx.energy_pct < cfg.rest_threshold => Some(AgentState::Rest),
        _ => None,
    }
}

/// Productive work once nothing urgent is pending
fn select_work(ctx: &SelectionContext, cfg: &DecisionConfig) -> Option<AgentState> {
    if ctx.has_seeds && ctx.clearing_exists {
        return Some(AgentState::Farm);
    }
    if ctx.wood >= cfg.shelter_wood && ctx.stone >= cfg.shelter_stone && !ctx.sheltered {
        return Some(AgentState::Build);
    }
    if ctx.near_water && ctx.hunger > cfg.fish_hunger_threshold {
        return Some(AgentState::Fish);
    }
    if ctx.loose_supplies {
        return Some(AgentState::GatherSupplies);
    }
    None
}

/// Loose resources worth picking up: supplies lying unowned on the ground
pub fn is_loose_supply(kind: ItemKind, owner: Option<EntityId>) -> bool {
    kind.is_supply() && owner.is_none()
}

/// Read the world into a selection context for the agent at `idx`
pub fn build_context(world: &World, idx: usize) -> SelectionContext {
    let agent = &world.agents[idx];
    let cfg = &world.config.decisions;
    let pos = agent.position;
    let inv = &agent.inventory;

    let threat = world.nearest_predator(pos, cfg.threat_radius).map(|(p, _)| p.id);
    let prey = world.nearest_predator(pos, cfg.hunt_radius).map(|(p, _)| p.id);

    let mut has_pet = false;
    let mut hungry_pet = false;
    for pet in world.pets_of(agent.id) {
        has_pet = true;
        hungry_pet |= pet.hunger > cfg.pet_hunger_threshold;
    }

    let energy_pct = if agent.max_energy > 0.0 {
        agent.energy / agent.max_energy * 100.0
    } else {
        0.0
    };

    SelectionContext {
        alive: agent.is_alive(),
        current: Some(agent.state),
        health: agent.health,
        hunger: agent.hunger,
        temperature: agent.temperature,
        energy_pct,
        mood: agent.mood,
        hunting_level: agent.skill_level(SkillKind::Hunting),
        threat,
        has_manual_target: agent.manual_target.is_some(),
        has_herbs: inv.has(ItemKind::Herbs),
        has_raw_meat: inv.has(ItemKind::RawMeat) || agent.food_store.has(ItemKind::RawMeat),
        has_food_in_inventory: inv.first_food().is_some(),
        has_animal_feed: inv.has(ItemKind::AnimalFeed)
            || agent.animal_food_store.has(ItemKind::AnimalFeed),
        has_seeds: inv.has(ItemKind::Seeds),
        wood: inv.count(ItemKind::Wood),
        stone: inv.count(ItemKind::Stone),
        fire_nearby: world.nearest_fire(pos, cfg.heat_search_radius).is_some(),
        tree_nearby: world.nearest_choppable_tree(pos, cfg.gather_radius).is_some(),
        has_pet,
        hungry_pet,
        prey,
        clearing_exists: !world.terrain.clearings.is_empty(),
        sheltered: world.is_sheltered(pos),
        near_water: world
            .distance_to_water(pos)
            .is_some_and(|d| d <= cfg.gather_radius),
        loose_supplies: world
            .nearest_resource_where(pos, cfg.gather_radius, |r| {
                r.quantity > 0 && is_loose_supply(r.kind, r.owner)
            })
            .is_some(),
    }
}

/// Choose and apply a state for every living agent
pub fn decide(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let tick: Tick = world.current_tick;
    for idx in 0..world.agents.len() {
        if !world.agents[idx].is_alive() {
            continue;
        }
        let ctx = build_context(world, idx);
        let choice = select_state(&ctx, &world.config.decisions);

        let agent = &mut world.agents[idx];
        let from = agent.state;
        if agent.set_state(choice.state) {
            tracing::debug!("{} {} -> {} at tick {}", agent.name, from, choice.state, tick);
            events.push(SimulationEvent::StateChanged {
                agent: agent.id,
                from,
                to: choice.state,
            });
        }
        if choice.attack_target.is_some() {
            agent.attack_target = choice.attack_target;
        }
    }
}
