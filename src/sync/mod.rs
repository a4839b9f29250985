pub mod delta;

pub use delta::{EntityDelta, EntityRecord};
