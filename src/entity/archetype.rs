//! Agent archetypes and their stat presets
//!
//! An archetype is picked once, at creation, from the agent's age and
//! gender. Everything that differs between archetypes is a row in
//! [`ArchetypeTable`], so new presets are data, not code.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Age/gender category determining base stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Man,
    Woman,
    Boy,
    Girl,
    Elder,
}

/// Age at which children become adults
pub const ADULT_AGE: u32 = 16;
/// Age at which adults become elders
pub const ELDER_AGE: u32 = 60;

impl Archetype {
    pub fn for_identity(age: u32, gender: Gender) -> Self {
        match (age, gender) {
            (a, _) if a >= ELDER_AGE => Self::Elder,
            (a, Gender::Male) if a >= ADULT_AGE => Self::Man,
            (_, Gender::Male) => Self::Boy,
            (a, Gender::Female) if a >= ADULT_AGE => Self::Woman,
            (_, Gender::Female) => Self::Girl,
        }
    }

    pub fn is_child(&self) -> bool {
        matches!(self, Self::Boy | Self::Girl)
    }
}

impl Default for Archetype {
    fn default() -> Self {
        Self::Man
    }
}

/// Base stats for one archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeStats {
    pub max_energy: f32,
    /// Distance moved per tick
    pub speed: f32,
    pub hunger_multiplier: f32,
    pub experience_multiplier: f32,
    pub starting_health: f32,
}

/// Stat preset per archetype
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeTable {
    pub man: ArchetypeStats,
    pub woman: ArchetypeStats,
    pub boy: ArchetypeStats,
    pub girl: ArchetypeStats,
    pub elder: ArchetypeStats,
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        Self {
            man: ArchetypeStats {
                max_energy: 100.0,
                speed: 1.5,
                hunger_multiplier: 1.1,
                experience_multiplier: 1.0,
                starting_health: 100.0,
            },
            woman: ArchetypeStats {
                max_energy: 100.0,
                speed: 1.4,
                hunger_multiplier: 1.0,
                experience_multiplier: 1.1,
                starting_health: 100.0,
            },
            boy: ArchetypeStats {
                max_energy: 80.0,
                speed: 1.2,
                hunger_multiplier: 0.8,
                experience_multiplier: 1.5,
                starting_health: 80.0,
            },
            girl: ArchetypeStats {
                max_energy: 80.0,
                speed: 1.2,
                hunger_multiplier: 0.8,
                experience_multiplier: 1.5,
                starting_health: 80.0,
            },
            elder: ArchetypeStats {
                max_energy: 70.0,
                speed: 1.0,
                hunger_multiplier: 0.9,
                experience_multiplier: 0.7,
                starting_health: 90.0,
            },
        }
    }
}

impl ArchetypeTable {
    pub fn stats(&self, archetype: Archetype) -> &ArchetypeStats {
        match archetype {
            Archetype::Man => &self.man,
            Archetype::Woman => &self.woman,
            Archetype::Boy => &self.boy,
            Archetype::Girl => &self.girl,
            Archetype::Elder => &self.elder,
        }
    }
}
