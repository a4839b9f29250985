//! Agent record: identity, vitals, carried items and behavioral state

use serde::{Deserialize, Serialize};

use crate::core::config::NeedsConfig;
use crate::core::types::{EntityId, Tick, Vec2};
use crate::entity::archetype::{Archetype, ArchetypeTable, Gender};
use crate::entity::item::Inventory;
use crate::skills::{SkillBook, SkillKind};

pub const MAX_HEALTH: f32 = 100.0;
pub const MAX_HUNGER: f32 = 100.0;
pub const MAX_FEAR: f32 = 100.0;

/// Temperature a freshly created agent starts at
pub const COMFORTABLE_TEMPERATURE: f32 = 60.0;

/// Behavioral state; exactly one is active per agent
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum AgentState {
    Explore,
    FindFood,
    StoreFood,
    Rest,
    Sleep,
    FindHeat,
    BuildFire,
    Defend,
    Flee,
    FeedAnimal,
    PlayWithPet,
    MoveToPoint,
    Cook,
    Hunt,
    Build,
    Fish,
    Farm,
    Heal,
    ChopWood,
    GatherSupplies,
    RecoverSelf,
    Dead,
}

impl AgentState {
    /// Skill practiced while in this state
    pub fn skill(&self) -> Option<SkillKind> {
        match self {
            Self::FindFood | Self::GatherSupplies => Some(SkillKind::Foraging),
            Self::ChopWood => Some(SkillKind::Woodcutting),
            Self::BuildFire => Some(SkillKind::Firemaking),
            Self::Defend | Self::Hunt => Some(SkillKind::Hunting),
            Self::Fish => Some(SkillKind::Fishing),
            Self::Farm => Some(SkillKind::Farming),
            Self::Build => Some(SkillKind::Building),
            Self::Cook => Some(SkillKind::Cooking),
            Self::Heal => Some(SkillKind::Healing),
            Self::FeedAnimal | Self::PlayWithPet => Some(SkillKind::AnimalCare),
            _ => None,
        }
    }

    /// States that recover energy instead of spending it
    pub fn is_restful(&self) -> bool {
        matches!(self, Self::Rest | Self::Sleep | Self::RecoverSelf | Self::Dead)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub enum Mood {
    #[default]
    Neutral,
    Anxious,
    Fearful,
}

/// A simulated character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: EntityId,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub archetype: Archetype,
    /// Player or session controlling this agent
    pub owner: Option<String>,

    pub health: f32,
    pub energy: f32,
    pub max_energy: f32,
    pub hunger: f32,
    pub temperature: f32,
    pub mood: Mood,
    pub state: AgentState,

    pub position: Vec2,
    pub speed: f32,

    pub inventory: Inventory,
    pub food_store: Inventory,
    pub animal_food_store: Inventory,
    pub skills: SkillBook,
    pub money: u32,

    pub is_bending: bool,
    pub is_chopping: bool,
    /// Predator this agent means to attack
    pub attack_target: Option<EntityId>,
    pub fear: f32,

    /// Position requested by the control surface
    pub manual_target: Option<Vec2>,
    /// Entity the current action is working on (tree, resource, pet)
    pub action_target: Option<EntityId>,
    /// Ticks spent in the current action
    pub action_progress: u32,
    pub wander_target: Option<Vec2>,
    pub attack_cooldown: u32,
    pub created_tick: Tick,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        gender: Gender,
        position: Vec2,
        table: &ArchetypeTable,
        tick: Tick,
    ) -> Self {
        let archetype = Archetype::for_identity(age, gender);
        let stats = table.stats(archetype);
        Self {
            id: EntityId::new(),
            name: name.into(),
            age,
            gender,
            archetype,
            owner: None,
            health: stats.starting_health.min(MAX_HEALTH),
            energy: stats.max_energy,
            max_energy: stats.max_energy,
            hunger: 0.0,
            temperature: COMFORTABLE_TEMPERATURE,
            mood: Mood::Neutral,
            state: AgentState::Explore,
            position,
            speed: stats.speed,
            inventory: Inventory::new(),
            food_store: Inventory::new(),
            animal_food_store: Inventory::new(),
            skills: SkillBook::new(),
            money: 0,
            is_bending: false,
            is_chopping: false,
            attack_target: None,
            fear: 0.0,
            manual_target: None,
            action_target: None,
            action_progress: 0,
            wander_target: None,
            attack_cooldown: 0,
            created_tick: tick,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn is_alive(&self) -> bool {
        self.state != AgentState::Dead
    }

    /// Switch behavioral state, aborting the in-progress action
    ///
    /// Already committed effects (harvested wood, eaten food) are kept.
    /// Returns true when the state actually changed. A dead agent never
    /// leaves `Dead`.
    pub fn set_state(&mut self, state: AgentState) -> bool {
        if self.state == state || self.state == AgentState::Dead {
            return false;
        }
        self.state = state;
        self.action_progress = 0;
        self.action_target = None;
        self.is_bending = false;
        self.is_chopping = false;
        if !matches!(state, AgentState::Defend | AgentState::Hunt) {
            self.attack_target = None;
        }
        if state != AgentState::Explore {
            self.wander_target = None;
        }
        true
    }

    /// Enter the terminal state
    pub fn die(&mut self) {
        self.health = 0.0;
        self.set_state(AgentState::Dead);
        self.attack_target = None;
        self.manual_target = None;
    }

    /// Bring every vital back inside its declared range
    pub fn clamp_vitals(&mut self, needs: &NeedsConfig) {
        self.health = clamp_finite(self.health, 0.0, MAX_HEALTH);
        self.hunger = clamp_finite(self.hunger, 0.0, MAX_HUNGER);
        self.energy = clamp_finite(self.energy, 0.0, self.max_energy);
        self.temperature =
            clamp_finite(self.temperature, needs.min_temperature, needs.max_temperature);
        self.fear = clamp_finite(self.fear, 0.0, MAX_FEAR);
    }

    pub fn skill_level(&self, skill: SkillKind) -> u32 {
        self.skills.level(skill)
    }
}

/// Clamp, mapping NaN to the lower bound
pub fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> Agent {
        Agent::new("Ada", 30, Gender::Female, Vec2::ZERO, &ArchetypeTable::default(), 0)
    }

    #[test]
    fn test_new_agent_uses_archetype_stats() {
        let a = agent();
        assert_eq!(a.archetype, Archetype::Woman);
        assert_eq!(a.energy, a.max_energy);
        assert_eq!(a.state, AgentState::Explore);
    }

    #[test]
    fn test_state_switch_aborts_action() {
        let mut a = agent();
        a.set_state(AgentState::ChopWood);
        a.is_chopping = true;
        a.action_progress = 50;
        a.inventory.add(crate::entity::item::ItemKind::Wood, 3);

        assert!(a.set_state(AgentState::FindFood));
        assert!(!a.is_chopping);
        assert_eq!(a.action_progress, 0);
        // Committed harvest survives the switch
        assert_eq!(a.inventory.count(crate::entity::item::ItemKind::Wood), 3);
    }

    #[test]
    fn test_dead_is_terminal() {
        let mut a = agent();
        a.die();
        assert!(!a.is_alive());
        assert!(!a.set_state(AgentState::Explore));
        assert_eq!(a.state, AgentState::Dead);
    }

    #[test]
    fn test_clamp_vitals() {
        let mut a = agent();
        a.health = 150.0;
        a.hunger = -5.0;
        a.energy = f32::NAN;
        a.temperature = 1000.0;
        a.clamp_vitals(&NeedsConfig::default());
        assert_eq!(a.health, MAX_HEALTH);
        assert_eq!(a.hunger, 0.0);
        assert_eq!(a.energy, 0.0);
        assert_eq!(a.temperature, 100.0);
    }
}
