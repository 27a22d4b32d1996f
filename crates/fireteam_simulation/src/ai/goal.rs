//! Goal lifecycle и GoalStack
//!
//! Lifecycle: Inactive --activate()--> Active --terminate()--> Terminated
//! Статус меняет только GoalStack (т.е. Brain), не сами goals.

use bevy::prelude::*;

use super::context::GoalContext;
use super::evaluator::Evaluation;
use crate::error::BehaviorError;

/// Тип goal (для idempotent set_goal и exhaustiveness по архетипам)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum GoalKind {
    Idle,
    Aim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum GoalStatus {
    #[default]
    Inactive,
    Active,
    Terminated,
}

/// Stateful behavior, привязанный к одному entity
pub trait Goal: Send + Sync + 'static {
    fn kind(&self) -> GoalKind;

    /// Owner (non-owning ссылка)
    fn owner(&self) -> Entity;

    fn activate(&mut self, ctx: &mut GoalContext) -> Result<(), BehaviorError>;

    fn execute(&mut self, _ctx: &mut GoalContext) -> Result<(), BehaviorError> {
        Ok(())
    }

    fn terminate(&mut self, _ctx: &mut GoalContext) -> Result<(), BehaviorError> {
        Ok(())
    }

    /// Свежая оценка для уже активного goal того же kind (без рестарта)
    fn refresh(&mut self, _evaluation: &Evaluation) {}
}

struct StackedGoal {
    goal: Box<dyn Goal>,
    status: GoalStatus,
}

/// Стек активных subgoals (depth 1 для leaf goals, больше: для composite)
#[derive(Default)]
pub struct GoalStack {
    goals: Vec<StackedGoal>,
}

impl std::fmt::Debug for GoalStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.goals.iter().map(|entry| (entry.goal.kind(), entry.status)))
            .finish()
    }
}

impl GoalStack {
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn current(&self) -> Option<&dyn Goal> {
        self.goals.last().map(|entry| entry.goal.as_ref())
    }

    pub fn current_kind(&self) -> Option<GoalKind> {
        self.current().map(|goal| goal.kind())
    }

    pub fn current_status(&self) -> Option<GoalStatus> {
        self.goals.last().map(|entry| entry.status)
    }

    /// Активировать goal и положить на стек
    pub fn push(&mut self, mut goal: Box<dyn Goal>, ctx: &mut GoalContext) -> Result<(), BehaviorError> {
        debug_assert_eq!(goal.owner(), ctx.owner, "goal bound to a different owner");

        goal.activate(ctx)?;
        self.goals.push(StackedGoal {
            goal,
            status: GoalStatus::Active,
        });
        Ok(())
    }

    /// Execute верхнего goal (только Active)
    pub fn execute_current(&mut self, ctx: &mut GoalContext) -> Result<(), BehaviorError> {
        let Some(entry) = self.goals.last_mut() else {
            return Ok(());
        };

        debug_assert_eq!(entry.status, GoalStatus::Active, "executing a goal that is not active");
        if entry.status != GoalStatus::Active {
            return Ok(());
        }

        entry.goal.execute(ctx)
    }

    pub fn refresh_current(&mut self, evaluation: &Evaluation) {
        if let Some(entry) = self.goals.last_mut() {
            entry.goal.refresh(evaluation);
        }
    }

    /// Terminate всех goals в обратном порядке активации и очистить стек
    pub fn clear(&mut self, ctx: &mut GoalContext) -> Result<(), BehaviorError> {
        while let Some(mut entry) = self.goals.pop() {
            if entry.status == GoalStatus::Active {
                entry.status = GoalStatus::Terminated;
                entry.goal.terminate(ctx)?;
            }
        }
        Ok(())
    }
}
