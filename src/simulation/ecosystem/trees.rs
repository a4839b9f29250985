//! Tree growth and aging

use crate::ecs::world::World;
use crate::entity::TreeLifecycle;

/// Age every tree, grow young ones and update lifecycle stages
pub fn update_trees(world: &mut World) {
    let cfg = &world.config.trees;
    for tree in &mut world.trees {
        tree.age += cfg.age_rate;
        if tree.age < cfg.mature_age {
            tree.size = (tree.size + cfg.growth_rate * cfg.age_rate).min(cfg.max_size);
        }
        let stage = TreeLifecycle::for_age(tree.age, cfg);
        if stage != tree.lifecycle {
            tracing::debug!("Tree {} is now {:?}", tree.id, stage);
            tree.lifecycle = stage;
        }
    }
}
