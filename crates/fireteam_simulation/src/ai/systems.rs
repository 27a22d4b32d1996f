//! Brain systems: execute текущего goal, затем re-arbitrate

use bevy::ecs::error::BevyError;
use bevy::prelude::*;

use super::brain::Brain;
use super::context::GoalContext;
use super::goal::GoalKind;
use crate::animation::AnimationController;
use crate::components::Perception;
use crate::config::SimulationConfig;
use crate::TickDelta;

/// Событие: brain сменил активный goal
#[derive(Event, Debug, Clone, PartialEq)]
pub struct GoalChanged {
    pub entity: Entity,
    pub from: Option<GoalKind>,
    pub to: Option<GoalKind>,
}

/// Система: execute текущего goal каждого brain
pub fn brain_execute(
    mut brains: Query<(
        Entity,
        &mut Brain,
        &mut Transform,
        &mut AnimationController,
        &Perception,
    )>,
    config: Res<SimulationConfig>,
    delta: Res<TickDelta>,
) -> Result<(), BevyError> {
    for (entity, mut brain, mut transform, mut animation, perception) in brains.iter_mut() {
        let mut ctx = GoalContext {
            owner: entity,
            transform: &mut transform,
            animation: &mut animation,
            perception,
            config: &config,
            delta: delta.0,
        };

        brain.execute(&mut ctx)?;
    }
    Ok(())
}

/// Система: re-arbitrate (может сменить goal: terminate старого → activate нового)
pub fn brain_arbitrate(
    mut brains: Query<(
        Entity,
        &mut Brain,
        &mut Transform,
        &mut AnimationController,
        &Perception,
    )>,
    config: Res<SimulationConfig>,
    delta: Res<TickDelta>,
    mut goal_events: EventWriter<GoalChanged>,
) -> Result<(), BevyError> {
    for (entity, mut brain, mut transform, mut animation, perception) in brains.iter_mut() {
        let previous = brain.current_goal_kind();

        let mut ctx = GoalContext {
            owner: entity,
            transform: &mut transform,
            animation: &mut animation,
            perception,
            config: &config,
            delta: delta.0,
        };

        if brain.arbitrate(&mut ctx)? {
            let current = brain.current_goal_kind();
            crate::log_info(&format!(
                "Brain {:?}: goal {:?} → {:?}",
                entity, previous, current
            ));
            goal_events.write(GoalChanged {
                entity,
                from: previous,
                to: current,
            });
        }
    }
    Ok(())
}
