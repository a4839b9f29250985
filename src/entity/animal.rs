//! Domestic animals

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Tick, Vec2};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum AnimalKind {
    Dog,
    Cat,
    Chicken,
    Goat,
    Sheep,
}

impl AnimalKind {
    /// Contact radius used by predators
    pub fn size(&self) -> f32 {
        match self {
            Self::Chicken => 5.0,
            Self::Cat => 6.0,
            Self::Dog => 8.0,
            Self::Goat | Self::Sheep => 10.0,
        }
    }

    /// Multiplier on the base animal speed
    pub fn speed_factor(&self) -> f32 {
        match self {
            Self::Dog => 1.5,
            Self::Cat => 1.3,
            Self::Chicken => 0.8,
            Self::Goat => 1.0,
            Self::Sheep => 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: EntityId,
    pub kind: AnimalKind,
    pub position: Vec2,
    pub health: f32,
    pub hunger: f32,
    /// Agent this animal follows
    pub owner: Option<EntityId>,
    pub tamed: bool,
    /// Unit heading
    pub direction: Vec2,
    pub speed: f32,
    /// Ticks until the animal may eat from an agent again
    pub feed_cooldown: u32,
    pub created_tick: Tick,
}

impl Animal {
    pub fn new(kind: AnimalKind, position: Vec2, base_speed: f32, tick: Tick) -> Self {
        Self {
            id: EntityId::new(),
            kind,
            position,
            health: 100.0,
            hunger: 0.0,
            owner: None,
            tamed: false,
            direction: Vec2::new(1.0, 0.0),
            speed: base_speed * kind.speed_factor(),
            feed_cooldown: 0,
            created_tick: tick,
        }
    }

    pub fn owned_by(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self.tamed = true;
        self
    }

    pub fn size(&self) -> f32 {
        self.kind.size()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}
