//! Tick throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use wildhearth::core::config::SimulationConfig;
use wildhearth::core::types::Vec2;
use wildhearth::ecs::world::World;
use wildhearth::entity::{AnimalKind, Gender, PredatorKind};
use wildhearth::simulation::action_select::{select_state, SelectionContext};
use wildhearth::simulation::tick::run_simulation_tick;

fn populated_world(agents: usize) -> World {
    let mut world = World::new(SimulationConfig::default());
    for i in 0..agents {
        let x = world.rng_mut().gen_range(100.0..900.0);
        let y = world.rng_mut().gen_range(100.0..900.0);
        let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
        world.create_agent(format!("agent-{}", i), 20 + (i as u32 % 40), gender, Vec2::new(x, y));
    }
    for _ in 0..agents / 2 {
        let pos = world.random_point(10.0);
        let _ = world.spawn_animal(AnimalKind::Goat, pos, None);
    }
    for _ in 0..(agents / 10).max(1) {
        let pos = world.random_point(10.0);
        let _ = world.spawn_predator(PredatorKind::Wolf, pos);
    }
    world
}

fn benchmark_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_tick");

    for agents in [10usize, 50, 200].iter() {
        let mut world = populated_world(*agents);
        for _ in 0..10 {
            run_simulation_tick(&mut world);
        }

        group.bench_with_input(BenchmarkId::new("agents", agents), agents, |b, _| {
            b.iter(|| {
                let events = run_simulation_tick(&mut world);
                world.drain_deltas();
                black_box(events)
            });
        });
    }

    group.finish();
}

fn benchmark_select_state(c: &mut Criterion) {
    let config = SimulationConfig::default();
    let ctx = SelectionContext {
        alive: true,
        health: 80.0,
        hunger: 30.0,
        temperature: 55.0,
        energy_pct: 70.0,
        wood: 6,
        ..Default::default()
    };

    c.bench_function("select_state", |b| {
        b.iter(|| select_state(black_box(&ctx), &config.decisions));
    });
}

criterion_group!(benches, benchmark_tick, benchmark_select_state);
criterion_main!(benches);
