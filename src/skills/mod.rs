//! Skill experience and levels
//!
//! Experience accumulates while an agent performs a skill-relevant action.
//! It only ever grows, except through an explicit administrative reset.
//! Levels follow a square-root curve: quick early gains, slow mastery.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Experience needed for level 1; level n needs n² times this
pub const XP_PER_LEVEL: f32 = 10.0;

pub const MAX_LEVEL: u32 = 10;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum SkillKind {
    Foraging,
    Woodcutting,
    Firemaking,
    Hunting,
    Fishing,
    Farming,
    Building,
    Cooking,
    Healing,
    AnimalCare,
}

impl SkillKind {
    pub const ALL: [SkillKind; 10] = [
        SkillKind::Foraging,
        SkillKind::Woodcutting,
        SkillKind::Firemaking,
        SkillKind::Hunting,
        SkillKind::Fishing,
        SkillKind::Farming,
        SkillKind::Building,
        SkillKind::Cooking,
        SkillKind::Healing,
        SkillKind::AnimalCare,
    ];
}

/// Calculate level from accumulated experience
pub fn level_for_experience(experience: f32) -> u32 {
    if !experience.is_finite() || experience <= 0.0 {
        return 0;
    }
    ((experience / XP_PER_LEVEL).sqrt().floor() as u32).min(MAX_LEVEL)
}

/// Per-agent skill experience
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillBook {
    experience: AHashMap<SkillKind, f32>,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn experience(&self, skill: SkillKind) -> f32 {
        self.experience.get(&skill).copied().unwrap_or(0.0)
    }

    pub fn level(&self, skill: SkillKind) -> u32 {
        level_for_experience(self.experience(skill))
    }

    /// Add experience; non-positive or non-finite amounts are ignored
    pub fn gain(&mut self, skill: SkillKind, amount: f32) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        *self.experience.entry(skill).or_insert(0.0) += amount;
    }

    /// Overwrite experience; the only way it can go down
    pub fn reset(&mut self, skill: SkillKind, experience: f32) {
        self.experience.insert(skill, experience.max(0.0));
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillKind, f32)> + '_ {
        self.experience.iter().map(|(k, v)| (*k, *v))
    }
}
