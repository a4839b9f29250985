//! Wildhearth - tick-based survival ecosystem
//!
//! Agents driven by hunger, warmth, energy and fear share a small world with
//! domestic animals, predators, trees and fires. Hosts drive it through
//! [`simulation::Simulation`], mutate it with [`command::Command`], render
//! [`snapshot::WorldSnapshot`]s and relay [`sync::EntityDelta`]s.

pub mod command;
pub mod core;
pub mod ecs;
pub mod entity;
pub mod environment;
pub mod simulation;
pub mod skills;
pub mod snapshot;
pub mod sync;
