//! Harvestable resources lying in the world

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Tick, Vec2};
use crate::entity::item::ItemKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: EntityId,
    pub kind: ItemKind,
    pub position: Vec2,
    pub quantity: u32,
    pub owner: Option<EntityId>,
    pub created_tick: Tick,
}

impl Resource {
    pub fn new(kind: ItemKind, position: Vec2, quantity: u32, tick: Tick) -> Self {
        Self {
            id: EntityId::new(),
            kind,
            position,
            quantity,
            owner: None,
            created_tick: tick,
        }
    }

    /// Take up to `amount` units, returns how many were taken
    pub fn take(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.quantity);
        self.quantity -= taken;
        taken
    }

    pub fn is_depleted(&self) -> bool {
        self.quantity == 0
    }
}
