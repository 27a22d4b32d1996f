//! Animation module: clip registry + per-character controller
//!
//! Симуляция считает только тайминги и blend weights.
//! Позы (skeleton sampling): ответственность внешнего renderer'а через RenderState.

use bevy::ecs::error::BevyError;
use bevy::prelude::*;

pub mod clip;
pub mod controller;


pub use clip::{names as clip_names, Clip, ClipLibrary, LoopMode};
pub use controller::{AnimationController, ClipPlayback};

use crate::{SimulationTick, TickDelta, TickPhase};

/// Событие: one-shot клип доиграл до конца
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationFinished {
    pub entity: Entity,
    pub clip: String,
}

/// Animation Plugin
///
/// advance_animations в фазе TickPhase::Animate (до brain execute).
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationFinished>().add_systems(
            SimulationTick,
            advance_animations.in_set(TickPhase::Animate),
        );
    }
}

/// Система: продвинуть playback time всех controller'ов
pub fn advance_animations(
    mut controllers: Query<(Entity, &mut AnimationController)>,
    delta: Res<TickDelta>,
    mut finished_events: EventWriter<AnimationFinished>,
) -> Result<(), BevyError> {
    for (entity, mut controller) in controllers.iter_mut() {
        if let Some(clip) = controller.advance(delta.0)? {
            crate::log(&format!("Animation: {:?} finished `{}`", entity, clip));
            finished_events.write(AnimationFinished { entity, clip });
        }
    }
    Ok(())
}
