//! Item kinds and stacking inventories

use serde::{Deserialize, Serialize};

/// Everything an agent can carry or find lying in the world
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum ItemKind {
    Wood,
    Stone,
    Berries,
    RawMeat,
    CookedMeat,
    Fish,
    Herbs,
    Seeds,
    AnimalFeed,
    Clothing,
    /// Placed shelter; only ever exists as a world resource
    Shelter,
}

impl ItemKind {
    /// Edible by agents and animals
    pub fn is_food(&self) -> bool {
        matches!(
            self,
            Self::Berries | Self::RawMeat | Self::CookedMeat | Self::Fish
        )
    }

    /// Can be picked up by `gatherSupplies`
    pub fn is_supply(&self) -> bool {
        matches!(
            self,
            Self::Wood | Self::Stone | Self::Herbs | Self::Seeds | Self::AnimalFeed | Self::Clothing
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub quantity: u32,
}

/// Unordered list of item stacks, at most one stack per kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    stacks: Vec<ItemStack>,
}

impl Inventory {
    pub fn new() -> Self {
        Self { stacks: Vec::new() }
    }

    pub fn add(&mut self, kind: ItemKind, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.stacks.iter_mut().find(|s| s.kind == kind) {
            Some(stack) => stack.quantity = stack.quantity.saturating_add(quantity),
            None => self.stacks.push(ItemStack { kind, quantity }),
        }
    }

    /// Remove up to `quantity`, returns how many were actually removed
    pub fn remove(&mut self, kind: ItemKind, quantity: u32) -> u32 {
        let Some(idx) = self.stacks.iter().position(|s| s.kind == kind) else {
            return 0;
        };
        let removed = quantity.min(self.stacks[idx].quantity);
        self.stacks[idx].quantity -= removed;
        if self.stacks[idx].quantity == 0 {
            self.stacks.swap_remove(idx);
        }
        removed
    }

    pub fn count(&self, kind: ItemKind) -> u32 {
        self.stacks
            .iter()
            .find(|s| s.kind == kind)
            .map_or(0, |s| s.quantity)
    }

    pub fn has(&self, kind: ItemKind) -> bool {
        self.count(kind) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.stacks.iter()
    }

    /// First food stack, in stack order
    pub fn first_food(&self) -> Option<ItemKind> {
        self.stacks.iter().find(|s| s.kind.is_food()).map(|s| s.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merges_stacks() {
        let mut inv = Inventory::new();
        inv.add(ItemKind::Wood, 2);
        inv.add(ItemKind::Wood, 3);
        assert_eq!(inv.count(ItemKind::Wood), 5);
        assert_eq!(inv.iter().count(), 1);
    }

    #[test]
    fn test_remove_clamps_and_drops_empty_stack() {
        let mut inv = Inventory::new();
        inv.add(ItemKind::Berries, 2);
        assert_eq!(inv.remove(ItemKind::Berries, 5), 2);
        assert!(inv.is_empty());
        assert_eq!(inv.remove(ItemKind::Berries, 1), 0);
    }

    #[test]
    fn test_first_food_skips_supplies() {
        let mut inv = Inventory::new();
        inv.add(ItemKind::Wood, 4);
        inv.add(ItemKind::Fish, 1);
        assert_eq!(inv.first_food(), Some(ItemKind::Fish));
    }

    #[test]
    fn test_food_tags() {
        assert!(ItemKind::Berries.is_food());
        assert!(!ItemKind::AnimalFeed.is_food());
        assert!(ItemKind::Wood.is_supply());
        assert!(!ItemKind::Shelter.is_supply());
    }
}
