//! Wild predators

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Tick, Vec2};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum PredatorKind {
    Wolf,
    Bear,
    Boar,
}

impl PredatorKind {
    pub fn base_speed(&self) -> f32 {
        match self {
            Self::Wolf => 1.6,
            Self::Bear => 1.2,
            Self::Boar => 1.4,
        }
    }

    pub fn size(&self) -> f32 {
        match self {
            Self::Wolf => 8.0,
            Self::Bear => 14.0,
            Self::Boar => 10.0,
        }
    }

    pub fn max_health(&self) -> f32 {
        match self {
            Self::Wolf => 60.0,
            Self::Bear => 120.0,
            Self::Boar => 80.0,
        }
    }
}

/// What a predator is hunting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreyRef {
    Agent(EntityId),
    Animal(EntityId),
}

impl PreyRef {
    pub fn id(&self) -> EntityId {
        match self {
            Self::Agent(id) | Self::Animal(id) => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predator {
    pub id: EntityId,
    pub kind: PredatorKind,
    pub position: Vec2,
    pub health: f32,
    pub hunger: f32,
    /// Deterrence in [0, 100]; decays every tick
    pub fear: f32,
    pub target: Option<PreyRef>,
    pub speed: f32,
    pub size: f32,
    pub attack_cooldown: u32,
    /// Heading while wandering without prey
    pub direction: Vec2,
    pub created_tick: Tick,
}

impl Predator {
    pub fn new(kind: PredatorKind, position: Vec2, tick: Tick) -> Self {
        Self {
            id: EntityId::new(),
            kind,
            position,
            health: kind.max_health(),
            hunger: 50.0,
            fear: 0.0,
            target: None,
            speed: kind.base_speed(),
            size: kind.size(),
            attack_cooldown: 0,
            direction: Vec2::new(0.0, 1.0),
            created_tick: tick,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}
