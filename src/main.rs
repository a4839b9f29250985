//! Headless Wildhearth runner
//!
//! Loads a config, spawns a starting band, drives the simulation through
//! frame callbacks at the requested speed and prints a summary.

use std::path::PathBuf;

use clap::Parser;
use rand::Rng;
use serde::Serialize;

use wildhearth::command::{execute_command, Command};
use wildhearth::core::error::Result;
use wildhearth::core::types::{EntityId, Vec2};
use wildhearth::core::SimulationConfig;
use wildhearth::entity::{AnimalKind, Gender, PredatorKind};
use wildhearth::simulation::{Simulation, SimulationEvent};

/// Headless ecosystem runner
#[derive(Parser, Debug)]
#[command(name = "wildhearth")]
#[command(about = "Run a Wildhearth world without a renderer and report what happened")]
struct Args {
    /// TOML config (defaults to the built-in values)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ticks to simulate
    #[arg(long, default_value_t = 5000)]
    ticks: u64,

    /// Speed multiplier
    #[arg(long, default_value_t = 1)]
    speed: u32,

    /// Agents in the starting band
    #[arg(long, default_value_t = 4)]
    agents: usize,

    /// Override the world seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final world as JSON
    #[arg(long)]
    snapshot_out: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    ticks: u64,
    frames: u64,
    agents_alive: usize,
    agents_dead: usize,
    animals: usize,
    predators: usize,
    trees: usize,
    fires: usize,
    resources: usize,
    weather: String,
    trees_felled: usize,
    fires_lit: usize,
    fires_extinguished: usize,
    animals_killed: usize,
    predators_killed: usize,
    shelters_built: usize,
    state_changes: usize,
}

impl RunSummary {
    fn record(&mut self, event: &SimulationEvent) {
        match event {
            SimulationEvent::TreeFelled { .. } => self.trees_felled += 1,
            SimulationEvent::FireLit { .. } => self.fires_lit += 1,
            SimulationEvent::FireExtinguished { .. } => self.fires_extinguished += 1,
            SimulationEvent::AnimalKilled { .. } => self.animals_killed += 1,
            SimulationEvent::PredatorKilled { .. } => self.predators_killed += 1,
            SimulationEvent::ShelterBuilt { .. } => self.shelters_built += 1,
            SimulationEvent::StateChanged { .. } => self.state_changes += 1,
            _ => {}
        }
    }
}

const NAMES: [&str; 8] = ["Ada", "Bram", "Cora", "Dunn", "Edda", "Finn", "Gale", "Hale"];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wildhearth=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }

    let mut sim = Simulation::new(config);
    sim.clock.set_speed(args.speed)?;
    spawn_initial_population(&mut sim, args.agents)?;

    tracing::info!(
        "Running {} ticks at speed {} ({} frames per tick)",
        args.ticks,
        sim.clock.speed(),
        sim.clock.frames_per_tick()
    );

    let mut summary = RunSummary::default();
    let target = sim.world.current_tick + args.ticks;
    while sim.world.current_tick < target {
        summary.frames += 1;
        if let Some(events) = sim.on_frame() {
            for event in &events {
                summary.record(event);
            }
            sim.world.drain_deltas();
        }
    }

    let world = &sim.world;
    summary.ticks = world.current_tick;
    summary.agents_alive = world.living_agent_count();
    summary.agents_dead = world.agents.len() - summary.agents_alive;
    summary.animals = world.animals.len();
    summary.predators = world.predators.len();
    summary.trees = world.trees.len();
    summary.fires = world.fires.len();
    summary.resources = world.resources.len();
    summary.weather = world.weather.current.to_string();

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    if let Some(path) = &args.snapshot_out {
        world.snapshot().save(path)?;
    }

    Ok(())
}

/// A band of agents near the map center, one dog, two goats and a wolf
fn spawn_initial_population(sim: &mut Simulation, agents: usize) -> Result<()> {
    let world = &mut sim.world;
    let center = Vec2::new(world.config.world.width / 2.0, world.config.world.height / 2.0);

    let mut first: Option<EntityId> = None;
    for i in 0..agents {
        let dx = world.rng_mut().gen_range(-40.0..40.0);
        let dy = world.rng_mut().gen_range(-40.0..40.0);
        let offset = Vec2::new(dx, dy);
        let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
        let age = world.rng_mut().gen_range(16..60);
        let position = world.terrain.clamp_to_bounds(center + offset);
        let outcome = execute_command(
            world,
            Command::CreateAgent {
                name: NAMES[i % NAMES.len()].to_string(),
                age,
                gender,
                position,
                owner: None,
            },
        )?;
        first = first.or(outcome.created_id());
    }

    world.spawn_animal(AnimalKind::Dog, center, first)?;
    let pasture = world.random_point(10.0);
    world.spawn_animal(AnimalKind::Goat, pasture, None)?;
    world.spawn_animal(AnimalKind::Goat, pasture + Vec2::new(8.0, 0.0), None)?;
    let den = world.random_point(10.0);
    world.spawn_predator(PredatorKind::Wolf, den)?;
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("=== WILDHEARTH RUN ===");
    println!("Ticks: {} ({} frames)", summary.ticks, summary.frames);
    println!("Weather: {}", summary.weather);
    println!();
    println!("Agents: {} alive, {} dead", summary.agents_alive, summary.agents_dead);
    println!("Animals: {}  Predators: {}", summary.animals, summary.predators);
    println!("Trees: {}  Fires: {}  Resources: {}", summary.trees, summary.fires, summary.resources);
    println!();
    println!("--- Events ---");
    println!("Trees felled: {}", summary.trees_felled);
    println!("Fires lit: {} / extinguished: {}", summary.fires_lit, summary.fires_extinguished);
    println!("Animals killed: {}", summary.animals_killed);
    println!("Predators killed: {}", summary.predators_killed);
    println!("Shelters built: {}", summary.shelters_built);
    println!("State changes: {}", summary.state_changes);
}
