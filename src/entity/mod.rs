pub mod agent;
pub mod animal;
pub mod archetype;
pub mod fire;
pub mod item;
pub mod predator;
pub mod resource;
pub mod tree;

pub use agent::{Agent, AgentState, Mood};
pub use animal::{Animal, AnimalKind};
pub use archetype::{Archetype, ArchetypeStats, ArchetypeTable, Gender};
pub use fire::Fire;
pub use item::{Inventory, ItemKind, ItemStack};
pub use predator::{Predator, PredatorKind, PreyRef};
pub use resource::Resource;
pub use tree::{Tree, TreeLifecycle};
