pub mod action_execute;
pub mod action_select;
pub mod clock;
pub mod ecosystem;
pub mod needs;
pub mod tick;

pub use action_select::{select_state, Choice, SelectionContext};
pub use clock::{Simulation, SimulationClock};
pub use tick::{run_simulation_tick, SimulationEvent};
