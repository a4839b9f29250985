//! Agent decision scenarios run through the full tick pipeline

use wildhearth::command::{execute_command, Command};
use wildhearth::core::config::SimulationConfig;
use wildhearth::core::types::{EntityId, Vec2};
use wildhearth::ecs::world::World;
use wildhearth::entity::{AgentState, Gender, ItemKind, PredatorKind};
use wildhearth::environment::Weather;
use wildhearth::simulation::tick::{run_simulation_tick, SimulationEvent};

fn world_with_agent() -> (World, EntityId) {
    let mut world = World::empty(SimulationConfig::default());
    let id = world.create_agent("Ada", 30, Gender::Female, Vec2::new(500.0, 500.0));
    (world, id)
}

fn run(world: &mut World, ticks: u32) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        events.extend(run_simulation_tick(world));
    }
    events
}

#[test]
fn test_cold_agent_with_wood_builds_fire() {
    let (mut world, ada) = world_with_agent();
    world.weather.current = Weather::Snow;
    let agent = world.agent_mut(ada).unwrap();
    agent.temperature = 15.0;
    agent.inventory.add(ItemKind::Wood, 3);

    let events = run(&mut world, 80);

    assert_eq!(world.fires.len(), 1);
    assert_eq!(world.fires[0].owner, Some(ada));
    assert!(world.agent(ada).unwrap().inventory.count(ItemKind::Wood) <= 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimulationEvent::FireLit { by: Some(by), .. } if *by == ada)));
}

#[test]
fn test_wounded_agent_flees_predator() {
    let (mut world, ada) = world_with_agent();
    world.agent_mut(ada).unwrap().health = 50.0;
    world.spawn_predator(PredatorKind::Wolf, Vec2::new(540.0, 500.0)).unwrap();

    run(&mut world, 1);

    let agent = world.agent(ada).unwrap();
    assert_eq!(agent.state, AgentState::Flee);
    assert!(agent.position.x < 500.0);
}

#[test]
fn test_healthy_agent_defends() {
    let (mut world, ada) = world_with_agent();
    let wolf = world.spawn_predator(PredatorKind::Wolf, Vec2::new(540.0, 500.0)).unwrap();

    run(&mut world, 1);

    let agent = world.agent(ada).unwrap();
    assert_eq!(agent.state, AgentState::Defend);
    assert_eq!(agent.attack_target, Some(wolf));
}

#[test]
fn test_manual_target_is_walked_and_cleared() {
    let (mut world, ada) = world_with_agent();
    execute_command(
        &mut world,
        Command::SetManualTarget { agent: ada, target: Some(Vec2::new(560.0, 500.0)) },
    )
    .unwrap();

    let first = run(&mut world, 1);
    assert!(first.iter().any(|e| matches!(
        e,
        SimulationEvent::StateChanged { to: AgentState::MoveToPoint, .. }
    )));

    run(&mut world, 300);
    assert_eq!(world.agent(ada).unwrap().manual_target, None);
}

#[test]
fn test_agent_low_on_wood_fells_nearby_tree() {
    let (mut world, ada) = world_with_agent();
    let tree = world.spawn_tree(Vec2::new(520.0, 500.0), 5000.0);

    let events = run(&mut world, 400);

    assert!(world.tree(tree).is_none());
    assert!(events.iter().any(
        |e| matches!(e, SimulationEvent::TreeFelled { tree: t, by: Some(by), .. } if *t == tree && *by == ada)
    ));
    assert!(world.agent(ada).unwrap().inventory.count(ItemKind::Wood) > 0);
}

#[test]
fn test_starving_agent_dies_once() {
    let (mut world, ada) = world_with_agent();
    let agent = world.agent_mut(ada).unwrap();
    agent.hunger = 100.0;
    agent.health = 1.0;

    let events = run(&mut world, 100);

    assert!(!world.agent(ada).unwrap().is_alive());
    let deaths = events
        .iter()
        .filter(|e| matches!(e, SimulationEvent::AgentDied { agent } if *agent == ada))
        .count();
    assert_eq!(deaths, 1);
}

#[test]
fn test_starving_wounded_agent_eats_before_recovering() {
    let (mut world, ada) = world_with_agent();
    let agent = world.agent_mut(ada).unwrap();
    agent.hunger = 100.0;
    agent.health = 20.0;
    let berries = world
        .spawn_resource(ItemKind::Berries, Vec2::new(502.0, 500.0), 10)
        .unwrap();

    run(&mut world, 10);

    let agent = world.agent(ada).unwrap();
    assert!(agent.is_alive());
    assert!(agent.hunger < world.config.decisions.search_food_threshold);
    assert_eq!(agent.state, AgentState::RecoverSelf);
    assert_eq!(world.resource(berries).unwrap().quantity, 7);
}

#[test]
fn test_agent_cooks_raw_meat_at_nearby_fire() {
    let (mut world, ada) = world_with_agent();
    let agent = world.agent_mut(ada).unwrap();
    agent.hunger = 55.0;
    agent.inventory.add(ItemKind::RawMeat, 2);
    world.create_fire(Vec2::new(510.0, 500.0), 20.0, None).unwrap();

    let events = run(&mut world, 200);

    let agent = world.agent(ada).unwrap();
    let cooked = agent.inventory.count(ItemKind::CookedMeat) + agent.food_store.count(ItemKind::CookedMeat);
    let raw = agent.inventory.count(ItemKind::RawMeat) + agent.food_store.count(ItemKind::RawMeat);
    assert_eq!(cooked, 2);
    assert_eq!(raw, 0);
    assert!(events.iter().any(|e| matches!(
        e,
        SimulationEvent::StateChanged { to: AgentState::Cook, .. }
    )));
}

#[test]
fn test_dead_agent_never_changes_state() {
    let (mut world, ada) = world_with_agent();
    execute_command(&mut world, Command::SetHealth { agent: ada, health: 0.0 }).unwrap();

    let events = run(&mut world, 20);

    assert_eq!(world.agent(ada).unwrap().state, AgentState::Dead);
    assert!(!events
        .iter()
        .any(|e| matches!(e, SimulationEvent::StateChanged { agent, .. } if *agent == ada)));
}

#[test]
fn test_reset_world_keeps_roster() {
    let mut world = World::new(SimulationConfig::default());
    let ada = world.create_agent("Ada", 30, Gender::Female, Vec2::new(500.0, 500.0));
    world.spawn_predator(PredatorKind::Bear, Vec2::new(100.0, 100.0)).unwrap();
    run(&mut world, 5);

    execute_command(&mut world, Command::ResetWorld).unwrap();

    assert!(world.agent(ada).is_some());
    assert!(world.predators.is_empty());
    assert_eq!(world.trees.len(), world.config.world.initial_trees);
}
