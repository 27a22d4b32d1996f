//! Brain: goal arbiter персонажа
//!
//! Каждый тик: execute() текущего goal → arbitrate() среди evaluators.
//! Выбор: строго максимальный desirability, при равенстве: первый зарегистрированный.

use bevy::prelude::*;

use super::context::{GoalContext, OwnerView};
use super::evaluator::{Evaluation, Evaluator};
use super::goal::{GoalKind, GoalStack};
use crate::error::BehaviorError;

/// Brain компонент (эксклюзивно принадлежит одному entity)
#[derive(Component, Default)]
pub struct Brain {
    evaluators: Vec<Box<dyn Evaluator>>,
    goals: GoalStack,
}

impl std::fmt::Debug for Brain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Brain")
            .field(
                "evaluators",
                &self.evaluators.iter().map(|e| e.goal_kind()).collect::<Vec<_>>(),
            )
            .field("goals", &self.goals)
            .finish()
    }
}

impl Brain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evaluator(mut self, evaluator: impl Evaluator) -> Self {
        self.add_evaluator(evaluator);
        self
    }

    /// Порядок регистрации влияет только на tie-break
    pub fn add_evaluator(&mut self, evaluator: impl Evaluator) {
        self.evaluators.push(Box::new(evaluator));
    }

    pub fn evaluator_count(&self) -> usize {
        self.evaluators.len()
    }

    pub fn goals(&self) -> &GoalStack {
        &self.goals
    }

    pub fn current_goal_kind(&self) -> Option<GoalKind> {
        self.goals.current_kind()
    }

    /// Execute текущего goal. No-op если goal нет.
    pub fn execute(&mut self, ctx: &mut GoalContext) -> Result<(), BehaviorError> {
        self.goals.execute_current(ctx)
    }

    /// Оценить всех evaluators и вернуть победителя (index + evaluation)
    pub fn select(&self, owner: &OwnerView) -> Result<Option<(usize, Evaluation)>, BehaviorError> {
        let mut best: Option<(usize, Evaluation)> = None;

        for (index, evaluator) in self.evaluators.iter().enumerate() {
            let mut evaluation = evaluator.evaluate(owner);

            if !evaluation.desirability.is_finite() {
                return Err(BehaviorError::InvalidDesirability {
                    kind: evaluator.goal_kind(),
                    value: evaluation.desirability,
                });
            }
            evaluation.desirability = evaluation.desirability.clamp(0.0, 1.0);

            // Строго больше: при равенстве остаётся более ранний
            let better = best
                .as_ref()
                .map_or(true, |(_, current)| evaluation.desirability > current.desirability);
            if better {
                best = Some((index, evaluation));
            }
        }

        Ok(best)
    }

    /// Выбрать лучший goal и поставить его через evaluator.set_goal.
    ///
    /// Возвращает `true` если активный goal сменился.
    pub fn arbitrate(&mut self, ctx: &mut GoalContext) -> Result<bool, BehaviorError> {
        let Some((index, evaluation)) = self.select(&ctx.view())? else {
            return Ok(false);
        };

        self.evaluators[index].set_goal(&mut self.goals, &evaluation, ctx)
    }

    /// Terminate всех goals (например перед удалением entity)
    pub fn clear_goals(&mut self, ctx: &mut GoalContext) -> Result<(), BehaviorError> {
        self.goals.clear(ctx)
    }
}
