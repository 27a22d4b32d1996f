//! Aim goal: поднять винтовку и держать цель в прицеле
//!
//! Animation sequence:
//! - activate: rifle-down-to-aim (once) → rifle-aiming-idle (loop)
//! - terminate: rifle-aim-to-down (once) → rifle-idle (loop)

use bevy::prelude::*;

use crate::ai::context::{GoalContext, OwnerView};
use crate::ai::evaluator::{Evaluation, Evaluator};
use crate::ai::goal::{Goal, GoalKind};
use crate::animation::clip_names;
use crate::error::BehaviorError;
use crate::movement::turn_towards;
use crate::perception::{acquire_target, FirstCandidate, TargetSelector};

/// Evaluator: 1.0 если есть цель в perception, иначе 0.0
///
/// Найденная цель возвращается в Evaluation и передаётся в AimGoal.
#[derive(Debug, Clone, Default)]
pub struct AimEvaluator<S = FirstCandidate> {
    pub selector: S,
}

impl AimEvaluator {
    /// Default policy: первый кандидат в perception
    pub fn first_candidate() -> Self {
        Self {
            selector: FirstCandidate,
        }
    }
}

impl<S: TargetSelector> AimEvaluator<S> {
    pub fn new(selector: S) -> Self {
        Self { selector }
    }
}

impl<S: TargetSelector> Evaluator for AimEvaluator<S> {
    fn goal_kind(&self) -> GoalKind {
        GoalKind::Aim
    }

    fn evaluate(&self, owner: &OwnerView) -> Evaluation {
        match acquire_target(&self.selector, owner) {
            Some(target) => Evaluation::with_target(1.0, target),
            None => Evaluation::score(0.0),
        }
    }

    fn create_goal(&self, owner: Entity, evaluation: &Evaluation) -> Box<dyn Goal> {
        debug_assert!(evaluation.target.is_some(), "aim goal installed without a target");
        Box::new(AimGoal::new(owner, evaluation.target))
    }
}

#[derive(Debug, Clone)]
pub struct AimGoal {
    owner: Entity,
    target: Option<Entity>,
    /// Смотрим на цель (в пределах tolerance)
    on_target: bool,
}

impl AimGoal {
    pub fn new(owner: Entity, target: Option<Entity>) -> Self {
        Self {
            owner,
            target,
            on_target: false,
        }
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn is_on_target(&self) -> bool {
        self.on_target
    }
}

impl Goal for AimGoal {
    fn kind(&self) -> GoalKind {
        GoalKind::Aim
    }

    fn owner(&self) -> Entity {
        self.owner
    }

    fn activate(&mut self, ctx: &mut GoalContext) -> Result<(), BehaviorError> {
        crate::log(&format!(
            "Aim goal activate: {:?} → target {:?}",
            self.owner, self.target
        ));

        ctx.animation.queue_animation(clip_names::RIFLE_DOWN_TO_AIM)?;
        ctx.animation.queue_animation(clip_names::RIFLE_AIMING_IDLE)?;
        Ok(())
    }

    fn execute(&mut self, ctx: &mut GoalContext) -> Result<(), BehaviorError> {
        // Цель могла выйти из perception на этом тике: arbitrate снимет goal
        let Some(position) = self
            .target
            .and_then(|target| ctx.perception.find(target))
            .map(|perceived| perceived.position)
        else {
            self.on_target = false;
            return Ok(());
        };

        // Поворот только по Y
        let max_step = ctx.config.aim_turn_rate * ctx.delta;
        self.on_target = turn_towards(ctx.transform, position, max_step, ctx.config.aim_tolerance);
        Ok(())
    }

    fn terminate(&mut self, ctx: &mut GoalContext) -> Result<(), BehaviorError> {
        crate::log(&format!("Aim goal terminate: {:?}", self.owner));

        ctx.animation.queue_animation(clip_names::RIFLE_AIM_TO_DOWN)?;
        ctx.animation.queue_animation(clip_names::RIFLE_IDLE)?;
        Ok(())
    }

    fn refresh(&mut self, evaluation: &Evaluation) {
        if evaluation.target.is_some() && evaluation.target != self.target {
            crate::log(&format!(
                "Aim goal retarget: {:?} {:?} → {:?}",
                self.owner, self.target, evaluation.target
            ));
            self.target = evaluation.target;
        }
    }
}
