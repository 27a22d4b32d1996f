//! CirclePatrol система: мишени ездят по окружности

use bevy::prelude::*;

use crate::components::CirclePatrol;
use crate::TickDelta;

/// Система: сдвинуть все patrol entity на один тик
pub fn advance_patrols(mut patrols: Query<(&mut Transform, &mut CirclePatrol)>, delta: Res<TickDelta>) {
    for (mut transform, mut patrol) in patrols.iter_mut() {
        let offset = patrol.step(delta.0);
        transform.translation += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_patrols_moves_transform() {
        let mut world = World::new();
        world.insert_resource(TickDelta(0.25));
        let entity = world
            .spawn((Transform::from_xyz(1.0, 0.0, 1.0), CirclePatrol::new(4.0)))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(advance_patrols);
        schedule.run(&mut world);

        let transform = world.get::<Transform>(entity).unwrap();
        let patrol = world.get::<CirclePatrol>(entity).unwrap();
        assert_eq!(patrol.elapsed, 0.25);
        assert!((transform.translation.x - (1.0 + 0.25_f32.sin())).abs() < 1e-5);
        assert!((transform.translation.z - (1.0 - 0.25_f32.cos())).abs() < 1e-5);
    }
}
