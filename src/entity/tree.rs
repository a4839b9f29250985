//! Trees and their age-driven lifecycle

use serde::{Deserialize, Serialize};

use crate::core::config::TreeConfig;
use crate::core::types::{EntityId, Tick, Vec2};

/// Growth stage, strictly ordered by age
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
pub enum TreeLifecycle {
    Young,
    Mature,
    Old,
    DeadStump,
}

impl TreeLifecycle {
    /// Pure function of age
    pub fn for_age(age: f32, config: &TreeConfig) -> Self {
        if age >= config.dead_age {
            Self::DeadStump
        } else if age >= config.old_age {
            Self::Old
        } else if age >= config.mature_age {
            Self::Mature
        } else {
            Self::Young
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub id: EntityId,
    pub position: Vec2,
    pub age: f32,
    pub size: f32,
    pub lifecycle: TreeLifecycle,
    /// Wood dropped when felled; fixed at creation
    pub wood_yield: u32,
    pub created_tick: Tick,
}

impl Tree {
    pub fn new(position: Vec2, age: f32, wood_yield: u32, config: &TreeConfig, tick: Tick) -> Self {
        let age = age.max(0.0);
        let grown = (config.initial_size + config.growth_rate * age.min(config.mature_age))
            .min(config.max_size);
        Self {
            id: EntityId::new(),
            position,
            age,
            size: grown,
            lifecycle: TreeLifecycle::for_age(age, config),
            wood_yield,
            created_tick: tick,
        }
    }

    /// Worth chopping: grown and still standing
    pub fn is_choppable(&self) -> bool {
        matches!(self.lifecycle, TreeLifecycle::Mature | TreeLifecycle::Old)
    }
}
