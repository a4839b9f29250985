pub mod query;
pub mod world;

pub use world::World;
