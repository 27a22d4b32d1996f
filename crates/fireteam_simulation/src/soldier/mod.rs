//! Soldier archetypes + spawn helpers
//!
//! Архетипы:
//! - American: Idle(0.2) + Aim(FirstCandidate): целится при первой возможности
//! - German: Idle(1.0) со своим idle клипом, не целится
//!
//! Spawn helpers работают напрямую с &mut World (setup до первого тика,
//! тесты, демо-сценарий).

use bevy::prelude::*;

use crate::ai::{AimEvaluator, Brain, IdleEvaluator};
use crate::animation::{clip_names, AnimationController, ClipLibrary};
use crate::components::{Category, CirclePatrol, Faction, Perception, RenderState, Soldier};
use crate::config::SimulationConfig;
use crate::error::AnimationError;

/// Клипы, которые использует AimGoal
const AIM_CLIPS: [&str; 3] = [
    clip_names::RIFLE_DOWN_TO_AIM,
    clip_names::RIFLE_AIMING_IDLE,
    clip_names::RIFLE_AIM_TO_DOWN,
];

impl Faction {
    /// Idle клип архетипа
    pub fn idle_clip(&self) -> &'static str {
        match self {
            Faction::American => clip_names::RIFLE_IDLE,
            Faction::German => clip_names::RIFLE_IDLE_ALT,
        }
    }

    /// Baseline desirability для IdleEvaluator
    pub fn idle_baseline(&self) -> f32 {
        match self {
            Faction::American => 0.2,
            Faction::German => 1.0,
        }
    }

    /// Все клипы, которые goals архетипа могут запросить
    pub fn clip_set(&self) -> Vec<&'static str> {
        let mut clips = vec![self.idle_clip()];
        if self.aims() {
            clips.extend(AIM_CLIPS);
        }
        clips
    }

    pub fn aims(&self) -> bool {
        matches!(self, Faction::American)
    }

    /// Brain с evaluators архетипа (порядок регистрации = tie-break)
    pub fn brain(&self) -> Brain {
        let brain = Brain::new().with_evaluator(IdleEvaluator::new(self.idle_baseline(), self.idle_clip()));
        if self.aims() {
            brain.with_evaluator(AimEvaluator::first_candidate())
        } else {
            brain
        }
    }
}

/// Spawn солдата с полным набором компонентов
///
/// Клипы архетипа резолвятся через ClipLibrary (или soldier_defaults,
/// если resource не вставлен). Неизвестный клип: ошибка setup'а.
pub fn spawn_soldier(world: &mut World, faction: Faction, position: Vec3) -> Result<Entity, AnimationError> {
    let config = world.get_resource::<SimulationConfig>().cloned().unwrap_or_default();

    let controller = match world.get_resource::<ClipLibrary>() {
        Some(library) => AnimationController::from_library(library, &faction.clip_set(), config.blend_duration)?,
        None => AnimationController::from_library(
            &ClipLibrary::soldier_defaults(),
            &faction.clip_set(),
            config.blend_duration,
        )?,
    };

    let entity = world
        .spawn((
            Soldier { faction },
            Transform::from_translation(position),
            Perception::new(config.perception_radius),
            controller,
            faction.brain(),
            RenderState::default(),
        ))
        .id();

    crate::log(&format!("Spawned {:?} soldier {:?} at {:?}", faction, entity, position));
    Ok(entity)
}

/// Spawn мишени на CirclePatrol
pub fn spawn_target(world: &mut World, position: Vec3) -> Entity {
    let speed = world
        .get_resource::<SimulationConfig>()
        .map(|config| config.patrol_speed)
        .unwrap_or_else(|| SimulationConfig::default().patrol_speed);

    let entity = world
        .spawn((
            Category::Target,
            Transform::from_translation(position),
            CirclePatrol::new(speed),
        ))
        .id();

    crate::log(&format!("Spawned target {:?} at {:?}", entity, position));
    entity
}

/// Удалить entity из мира
///
/// Perception соседей обновится на следующем тике (фаза Perceive).
/// Возвращает false если entity уже нет.
pub fn despawn_entity(world: &mut World, entity: Entity) -> bool {
    let removed = world.despawn(entity);
    if removed {
        crate::log(&format!("Despawned {:?}", entity));
    }
    removed
}
