//! Control-surface requests accepted by the engine

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, EntityKind, Vec2};
use crate::entity::archetype::Gender;
use crate::entity::{AnimalKind, ItemKind, PredatorKind};
use crate::skills::SkillKind;

/// One request from a player, admin panel or replay log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    CreateAgent {
        name: String,
        age: u32,
        gender: Gender,
        position: Vec2,
        owner: Option<String>,
    },
    /// Remove every agent
    ResetRoster,
    /// Walk an agent to a point; `None` clears the request
    SetManualTarget {
        agent: EntityId,
        target: Option<Vec2>,
    },
    FellTree {
        tree: EntityId,
    },
    CreateFire {
        position: Vec2,
        fuel: f32,
        owner: Option<EntityId>,
    },
    AddWoodToFire {
        fire: EntityId,
        wood: f32,
    },
    SpawnResource {
        kind: ItemKind,
        position: Vec2,
        quantity: u32,
    },
    SpawnAnimal {
        kind: AnimalKind,
        position: Vec2,
        owner: Option<EntityId>,
    },
    SpawnPredator {
        kind: PredatorKind,
        position: Vec2,
    },
    GiveItem {
        agent: EntityId,
        kind: ItemKind,
        quantity: u32,
    },
    SetMoney {
        agent: EntityId,
        amount: i64,
    },
    SetHealth {
        agent: EntityId,
        health: f32,
    },
    SetSkill {
        agent: EntityId,
        skill: SkillKind,
        experience: f32,
    },
    /// Regenerate terrain and forest, clearing animals, predators and fires
    ResetWorld,
}

/// What a successful command produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Created { kind: EntityKind, id: EntityId },
    /// Fuel of a fire after refuelling
    Fuel(f32),
    Done,
}

impl CommandOutcome {
    pub fn created_id(&self) -> Option<EntityId> {
        match self {
            Self::Created { id, .. } => Some(*id),
            _ => None,
        }
    }
}
