//! Simulation clock - maps host frame callbacks onto simulation ticks
//!
//! Speed divides a base frame budget: at speed `s` one tick runs every
//! `max(1, base_frames_per_tick / s)` callbacks. At most one tick runs per
//! callback and a paused clock never ticks.

use crate::core::config::{ClockConfig, SimulationConfig};
use crate::core::error::{EcoError, Result};
use crate::ecs::world::World;
use crate::simulation::tick::{run_simulation_tick, SimulationEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationClock {
    base_frames_per_tick: u32,
    max_speed: u32,
    speed: u32,
    paused: bool,
    frame_counter: u32,
}

impl SimulationClock {
    pub fn new(config: &ClockConfig) -> Self {
        let max_speed = config.max_speed.max(1);
        Self {
            base_frames_per_tick: config.base_frames_per_tick.max(1),
            max_speed,
            speed: config.default_speed.clamp(1, max_speed),
            paused: false,
            frame_counter: 0,
        }
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Change the speed multiplier; must lie in `1..=max_speed`
    pub fn set_speed(&mut self, speed: u32) -> Result<()> {
        if speed == 0 || speed > self.max_speed {
            return Err(EcoError::invalid_range("speed", speed));
        }
        self.speed = speed;
        self.frame_counter = 0;
        Ok(())
    }

    pub fn frames_per_tick(&self) -> u32 {
        (self.base_frames_per_tick / self.speed).max(1)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Count one host frame; true when a tick is due
    pub fn on_frame(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.frame_counter += 1;
        if self.frame_counter >= self.frames_per_tick() {
            self.frame_counter = 0;
            true
        } else {
            false
        }
    }
}

/// A world driven by a clock
pub struct Simulation {
    pub world: World,
    pub clock: SimulationClock,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let clock = SimulationClock::new(&config.clock);
        Self { world: World::new(config), clock }
    }

    pub fn from_world(world: World) -> Self {
        let clock = SimulationClock::new(&world.config.clock);
        Self { world, clock }
    }

    /// Host frame callback; runs a tick when one is due
    pub fn on_frame(&mut self) -> Option<Vec<SimulationEvent>> {
        if self.clock.on_frame() {
            Some(run_simulation_tick(&mut self.world))
        } else {
            None
        }
    }

    /// Run one tick immediately, even while paused
    pub fn step(&mut self) -> Vec<SimulationEvent> {
        run_simulation_tick(&mut self.world)
    }

    /// Run `ticks` ticks back to back, collecting their events
    pub fn run_ticks(&mut self, ticks: u64) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(run_simulation_tick(&mut self.world));
        }
        events
    }

    pub fn reset_world(&mut self) {
        self.world.reset_world();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> SimulationClock {
        SimulationClock::new(&ClockConfig::default())
    }

    #[test]
    fn test_frames_per_tick_follows_speed() {
        let mut c = clock();
        assert_eq!(c.frames_per_tick(), 8);
        c.set_speed(2).unwrap();
        assert_eq!(c.frames_per_tick(), 4);
        c.set_speed(8).unwrap();
        assert_eq!(c.frames_per_tick(), 1);
    }

    #[test]
    fn test_speed_out_of_range() {
        let mut c = clock();
        assert!(matches!(c.set_speed(0), Err(EcoError::InvalidRange { .. })));
        assert!(matches!(c.set_speed(9), Err(EcoError::InvalidRange { .. })));
        assert_eq!(c.speed(), 1);
    }

    #[test]
    fn test_one_tick_per_budget() {
        let mut c = clock();
        c.set_speed(4).unwrap();
        let ticks = (0..20).filter(|_| c.on_frame()).count();
        assert_eq!(ticks, 10);
    }

    #[test]
    fn test_paused_clock_never_ticks() {
        let mut c = clock();
        c.pause();
        assert!((0..100).all(|_| !c.on_frame()));
        assert!(!c.toggle_pause());
        assert!((0..8).any(|_| c.on_frame()));
    }

    #[test]
    fn test_simulation_on_frame_advances_world() {
        let mut sim = Simulation::new(SimulationConfig::default());
        for _ in 0..16 {
            sim.on_frame();
        }
        assert_eq!(sim.world.current_tick, 2);
    }
}
