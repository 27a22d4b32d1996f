//! Idle goal: default behavior, когда больше нечего делать

use bevy::prelude::*;

use crate::ai::context::{GoalContext, OwnerView};
use crate::ai::evaluator::{Evaluation, Evaluator};
use crate::ai::goal::{Goal, GoalKind};
use crate::error::BehaviorError;

/// Evaluator с константным baseline score
///
/// Baseline зависит от архетипа: низкий (0.2): персонаж предпочитает
/// любое другое поведение, 1.0: idle всегда на равных.
#[derive(Debug, Clone)]
pub struct IdleEvaluator {
    pub baseline: f32,
    /// Idle клип архетипа
    pub clip: String,
}

impl IdleEvaluator {
    pub fn new(baseline: f32, clip: impl Into<String>) -> Self {
        Self {
            baseline,
            clip: clip.into(),
        }
    }
}

impl Evaluator for IdleEvaluator {
    fn goal_kind(&self) -> GoalKind {
        GoalKind::Idle
    }

    fn evaluate(&self, _owner: &OwnerView) -> Evaluation {
        Evaluation::score(self.baseline)
    }

    fn create_goal(&self, owner: Entity, _evaluation: &Evaluation) -> Box<dyn Goal> {
        Box::new(IdleGoal::new(owner, self.clip.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct IdleGoal {
    owner: Entity,
    clip: String,
}

impl IdleGoal {
    pub fn new(owner: Entity, clip: impl Into<String>) -> Self {
        Self {
            owner,
            clip: clip.into(),
        }
    }
}

impl Goal for IdleGoal {
    fn kind(&self) -> GoalKind {
        GoalKind::Idle
    }

    fn owner(&self) -> Entity {
        self.owner
    }

    fn activate(&mut self, ctx: &mut GoalContext) -> Result<(), BehaviorError> {
        crate::log(&format!("Idle goal activate: {:?}", self.owner));

        // Через очередь: если ещё доигрывает one-shot (aim-to-down), idle стартует после него
        ctx.animation.queue_animation(&self.clip)?;
        Ok(())
    }

    fn terminate(&mut self, _ctx: &mut GoalContext) -> Result<(), BehaviorError> {
        // Анимации не останавливаем: их перекроет следующий запрос
        crate::log(&format!("Idle goal terminate: {:?}", self.owner));
        Ok(())
    }
}
