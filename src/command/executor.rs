//! Command execution - validates a request and applies it to the world

use crate::command::request::{Command, CommandOutcome};
use crate::core::error::{EcoError, Result};
use crate::core::types::{EntityId, EntityKind};
use crate::ecs::world::World;
use crate::entity::agent::{Agent, MAX_HEALTH};

/// Apply one command; rejected commands leave the world untouched
pub fn execute_command(world: &mut World, command: Command) -> Result<CommandOutcome> {
    let label = command_label(&command);
    let result = apply(world, command);
    match &result {
        Ok(outcome) => tracing::debug!("Command {} applied: {:?}", label, outcome),
        Err(e) => tracing::warn!("Command {} rejected: {}", label, e),
    }
    result
}

fn apply(world: &mut World, command: Command) -> Result<CommandOutcome> {
    match command {
        Command::CreateAgent { name, age, gender, position, owner } => {
            if !position.is_finite() {
                return Err(EcoError::invalid_range("position", position.x));
            }
            let mut agent = Agent::new(
                name,
                age,
                gender,
                position,
                &world.config.archetypes,
                world.current_tick,
            );
            agent.owner = owner;
            let id = world.spawn_agent(agent);
            Ok(created(EntityKind::Agent, id))
        }
        Command::ResetRoster => {
            world.reset_roster();
            Ok(CommandOutcome::Done)
        }
        Command::SetManualTarget { agent, target } => {
            if let Some(t) = target {
                if !t.is_finite() {
                    return Err(EcoError::invalid_range("target", t.x));
                }
            }
            let target = target.map(|t| world.terrain.clamp_to_bounds(t));
            agent_mut(world, agent)?.manual_target = target;
            Ok(CommandOutcome::Done)
        }
        Command::FellTree { tree } => {
            let wood = world.chop_tree(tree)?;
            Ok(created(EntityKind::Resource, wood))
        }
        Command::CreateFire { position, fuel, owner } => {
            if let Some(owner) = owner {
                agent_mut(world, owner)?;
            }
            let id = world.create_fire(position, fuel, owner)?;
            Ok(created(EntityKind::Fire, id))
        }
        Command::AddWoodToFire { fire, wood } => {
            let fuel = world.add_wood_to_fire(fire, wood)?;
            Ok(CommandOutcome::Fuel(fuel))
        }
        Command::SpawnResource { kind, position, quantity } => {
            let id = world.spawn_resource(kind, position, quantity)?;
            Ok(created(EntityKind::Resource, id))
        }
        Command::SpawnAnimal { kind, position, owner } => {
            let id = world.spawn_animal(kind, position, owner)?;
            Ok(created(EntityKind::Animal, id))
        }
        Command::SpawnPredator { kind, position } => {
            let id = world.spawn_predator(kind, position)?;
            Ok(created(EntityKind::Predator, id))
        }
        Command::GiveItem { agent, kind, quantity } => {
            if quantity == 0 {
                return Err(EcoError::invalid_range("quantity", 0));
            }
            agent_mut(world, agent)?.inventory.add(kind, quantity);
            Ok(CommandOutcome::Done)
        }
        Command::SetMoney { agent, amount } => {
            let money = u32::try_from(amount)
                .map_err(|_| EcoError::invalid_range("money", amount as f64))?;
            agent_mut(world, agent)?.money = money;
            Ok(CommandOutcome::Done)
        }
        Command::SetHealth { agent, health } => {
            if !(0.0..=MAX_HEALTH).contains(&health) {
                return Err(EcoError::invalid_range("health", health));
            }
            // Dead agents are terminal and count as missing here
            let agent = agent_mut(world, agent)?;
            if !agent.is_alive() {
                return Err(EcoError::not_found(EntityKind::Agent, agent.id));
            }
            agent.health = health;
            if health <= 0.0 {
                agent.die();
            }
            Ok(CommandOutcome::Done)
        }
        Command::SetSkill { agent, skill, experience } => {
            if !experience.is_finite() || experience < 0.0 {
                return Err(EcoError::invalid_range("experience", experience));
            }
            agent_mut(world, agent)?.skills.reset(skill, experience);
            Ok(CommandOutcome::Done)
        }
        Command::ResetWorld => {
            world.reset_world();
            Ok(CommandOutcome::Done)
        }
    }
}

fn agent_mut(world: &mut World, id: EntityId) -> Result<&mut Agent> {
    world
        .agent_mut(id)
        .ok_or(EcoError::not_found(EntityKind::Agent, id))
}

fn created(kind: EntityKind, id: EntityId) -> CommandOutcome {
    CommandOutcome::Created { kind, id }
}

fn command_label(command: &Command) -> &'static str {
    match command {
        Command::CreateAgent { .. } => "create_agent",
        Command::ResetRoster => "reset_roster",
        Command::SetManualTarget { .. } => "set_manual_target",
        Command::FellTree { .. } => "fell_tree",
        Command::CreateFire { .. } => "create_fire",
        Command::AddWoodToFire { .. } => "add_wood_to_fire",
        Command::SpawnResource { .. } => "spawn_resource",
        Command::SpawnAnimal { .. } => "spawn_animal",
        Command::SpawnPredator { .. } => "spawn_predator",
        Command::GiveItem { .. } => "give_item",
        Command::SetMoney { .. } => "set_money",
        Command::SetHealth { .. } => "set_health",
        Command::SetSkill { .. } => "set_skill",
        Command::ResetWorld => "reset_world",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::Vec2;
    use crate::entity::archetype::Gender;
    use crate::entity::ItemKind;
    use crate::skills::SkillKind;

    fn world_with_agent() -> (World, EntityId) {
        let mut world = World::empty(SimulationConfig::default());
        let outcome = execute_command(
            &mut world,
            Command::CreateAgent {
                name: "Bram".into(),
                age: 40,
                gender: Gender::Male,
                position: Vec2::new(10.0, 10.0),
                owner: Some("player-1".into()),
            },
        )
        .unwrap();
        let id = outcome.created_id().unwrap();
        (world, id)
    }

    #[test]
    fn test_create_agent_with_owner() {
        let (world, id) = world_with_agent();
        assert_eq!(world.agent(id).unwrap().owner.as_deref(), Some("player-1"));
    }

    #[test]
    fn test_fell_tree_twice() {
        let mut world = World::empty(SimulationConfig::default());
        let tree = world.spawn_tree(Vec2::ZERO, 5000.0);
        assert!(execute_command(&mut world, Command::FellTree { tree }).is_ok());
        let err = execute_command(&mut world, Command::FellTree { tree }).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(world.resources.len(), 1);
    }

    #[test]
    fn test_admin_values_validated() {
        let (mut world, id) = world_with_agent();
        let negative = execute_command(&mut world, Command::SetMoney { agent: id, amount: -5 });
        assert!(matches!(negative, Err(EcoError::InvalidRange { field: "money", .. })));

        let too_high = execute_command(&mut world, Command::SetHealth { agent: id, health: 150.0 });
        assert!(matches!(too_high, Err(EcoError::InvalidRange { field: "health", .. })));

        let nan = execute_command(
            &mut world,
            Command::SetSkill { agent: id, skill: SkillKind::Hunting, experience: f32::NAN },
        );
        assert!(matches!(nan, Err(EcoError::InvalidRange { .. })));

        execute_command(&mut world, Command::SetMoney { agent: id, amount: 25 }).unwrap();
        assert_eq!(world.agent(id).unwrap().money, 25);
    }

    #[test]
    fn test_set_skill_can_lower_experience() {
        let (mut world, id) = world_with_agent();
        world.agent_mut(id).unwrap().skills.gain(SkillKind::Fishing, 50.0);
        execute_command(
            &mut world,
            Command::SetSkill { agent: id, skill: SkillKind::Fishing, experience: 10.0 },
        )
        .unwrap();
        assert_eq!(world.agent(id).unwrap().skills.experience(SkillKind::Fishing), 10.0);
    }

    #[test]
    fn test_set_health_zero_kills() {
        let (mut world, id) = world_with_agent();
        execute_command(&mut world, Command::SetHealth { agent: id, health: 0.0 }).unwrap();
        assert!(!world.agent(id).unwrap().is_alive());
    }

    #[test]
    fn test_unknown_agent_not_found() {
        let mut world = World::empty(SimulationConfig::default());
        let result = execute_command(
            &mut world,
            Command::GiveItem { agent: EntityId::new(), kind: ItemKind::Wood, quantity: 1 },
        );
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_refuel_reports_fuel() {
        let mut world = World::empty(SimulationConfig::default());
        let fire = execute_command(
            &mut world,
            Command::CreateFire { position: Vec2::ZERO, fuel: 2.0, owner: None },
        )
        .unwrap()
        .created_id()
        .unwrap();
        let outcome = execute_command(&mut world, Command::AddWoodToFire { fire, wood: 3.0 }).unwrap();
        assert_eq!(outcome, CommandOutcome::Fuel(5.0));
    }

    #[test]
    fn test_reset_roster() {
        let (mut world, _) = world_with_agent();
        execute_command(&mut world, Command::ResetRoster).unwrap();
        assert!(world.agents.is_empty());
    }
}
