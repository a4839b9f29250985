//! Entity delta records exchanged with the network relay
//!
//! The relay mirrors per-world entity lists between participants. The engine
//! only produces and accepts these records; transport, retry and sessions
//! belong to the relay.

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, EntityKind, Vec2};
use crate::entity::{Agent, Animal, Fire, Predator, Resource, Tree};

/// Full record of a newly created entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityRecord {
    Agent(Agent),
    Animal(Animal),
    Predator(Predator),
    Tree(Tree),
    Fire(Fire),
    Resource(Resource),
}

impl EntityRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Agent(_) => EntityKind::Agent,
            Self::Animal(_) => EntityKind::Animal,
            Self::Predator(_) => EntityKind::Predator,
            Self::Tree(_) => EntityKind::Tree,
            Self::Fire(_) => EntityKind::Fire,
            Self::Resource(_) => EntityKind::Resource,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            Self::Agent(e) => e.id,
            Self::Animal(e) => e.id,
            Self::Predator(e) => e.id,
            Self::Tree(e) => e.id,
            Self::Fire(e) => e.id,
            Self::Resource(e) => e.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityDelta {
    Created(EntityRecord),
    Moved { kind: EntityKind, id: EntityId, position: Vec2 },
    Removed { kind: EntityKind, id: EntityId },
}

impl EntityDelta {
    pub fn id(&self) -> EntityId {
        match self {
            Self::Created(record) => record.id(),
            Self::Moved { id, .. } | Self::Removed { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Created(record) => record.kind(),
            Self::Moved { kind, .. } | Self::Removed { kind, .. } => *kind,
        }
    }
}
