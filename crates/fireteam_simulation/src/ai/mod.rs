//! AI decision-making module
//!
//! Two-level goal arbitration (Think/Evaluator/Goal):
//! - Evaluator оценивает desirability и находит цель
//! - Brain выбирает лучший evaluator и ставит его goal
//! - Goal управляет animation sequence и поворотом owner'а

use bevy::prelude::*;

pub mod brain;
pub mod context;
pub mod evaluator;
pub mod goal;
pub mod goals;
pub mod systems;


// Re-export основных типов
pub use brain::Brain;
pub use context::{GoalContext, OwnerView};
pub use evaluator::{Evaluation, Evaluator};
pub use goal::{Goal, GoalKind, GoalStack, GoalStatus};
pub use goals::{AimEvaluator, AimGoal, IdleEvaluator, IdleGoal};
pub use systems::GoalChanged;

use crate::{SimulationTick, TickPhase};

/// AI Plugin
///
/// Порядок выполнения внутри TickPhase::Think:
/// 1. brain_execute: execute текущего goal
/// 2. brain_arbitrate: выбор лучшего goal (возможна смена)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GoalChanged>().add_systems(
            SimulationTick,
            (systems::brain_execute, systems::brain_arbitrate)
                .chain()
                .in_set(TickPhase::Think),
        );
    }
}
