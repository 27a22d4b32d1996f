//! Render sync: ECS → RenderState (one-way, в конце тика)
//!
//! Renderer не пишет обратно в симуляцию, только читает RenderState.

use bevy::prelude::*;

use crate::animation::AnimationController;
use crate::components::RenderState;

/// Система: записать transform + blend weights в RenderState
pub fn sync_render_state(
    mut query: Query<(&Transform, Option<&AnimationController>, &mut RenderState)>,
) {
    for (transform, controller, mut render) in query.iter_mut() {
        let clip_weights = controller.map(|controller| controller.weights()).unwrap_or_default();

        let next = RenderState {
            translation: transform.translation,
            rotation: transform.rotation,
            clip_weights,
        };

        if *render != next {
            *render = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{clip_names, ClipLibrary};

    #[test]
    fn test_sync_copies_transform_and_weights() {
        let mut world = World::new();
        let library = ClipLibrary::soldier_defaults();
        let mut controller =
            AnimationController::from_library(&library, &[clip_names::RIFLE_IDLE], 0.5).unwrap();
        controller.play_animation(clip_names::RIFLE_IDLE).unwrap();

        let entity = world
            .spawn((
                Transform::from_xyz(1.0, 2.0, 3.0),
                controller,
                RenderState::default(),
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(sync_render_state);
        schedule.run(&mut world);

        let render = world.get::<RenderState>(entity).unwrap();
        assert_eq!(render.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(render.clip_weights, vec![(clip_names::RIFLE_IDLE.to_string(), 1.0)]);
    }
}
