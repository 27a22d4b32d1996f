//! Evaluator: scoring + установка своего goal
//!
//! Evaluation несёт и score, и найденную цель: goal получает её явно
//! при конструировании (никаких side channel через entity state).

use bevy::prelude::*;

use super::context::{GoalContext, OwnerView};
use super::goal::{Goal, GoalKind, GoalStack};
use crate::error::BehaviorError;

/// Результат оценки evaluator'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Desirability в [0, 1]
    pub desirability: f32,
    /// Цель, найденная при scoring (если evaluator её ищет)
    pub target: Option<Entity>,
}

impl Evaluation {
    pub fn score(desirability: f32) -> Self {
        Self {
            desirability,
            target: None,
        }
    }

    pub fn with_target(desirability: f32, target: Entity) -> Self {
        Self {
            desirability,
            target: Some(target),
        }
    }
}

pub trait Evaluator: Send + Sync + 'static {
    /// Kind goal'а, который ставит этот evaluator
    fn goal_kind(&self) -> GoalKind;

    fn evaluate(&self, owner: &OwnerView) -> Evaluation;

    fn create_goal(&self, owner: Entity, evaluation: &Evaluation) -> Box<dyn Goal>;

    /// Поставить goal. Если уже активен goal того же kind: no-op (без рестарта).
    ///
    /// Возвращает `true` если goal был заменён.
    fn set_goal(
        &self,
        goals: &mut GoalStack,
        evaluation: &Evaluation,
        ctx: &mut GoalContext,
    ) -> Result<bool, BehaviorError> {
        if goals.current_kind() == Some(self.goal_kind()) {
            goals.refresh_current(evaluation);
            return Ok(false);
        }

        goals.clear(ctx)?;
        goals.push(self.create_goal(ctx.owner, evaluation), ctx)?;
        Ok(true)
    }
}
