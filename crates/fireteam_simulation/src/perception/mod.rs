//! Perception domain: кто кого видит на этом тике
//!
//! update_perception пересчитывает snapshot для каждого наблюдателя
//! (сфера радиуса perception.radius, граница включительно).
//! Target selection (какого соседа выбрать): в target.rs.

use bevy::prelude::*;

pub mod target;

pub use target::{acquire_target, target_candidates, ClosestFirst, FirstCandidate, InFieldOfView, TargetSelector};

use crate::components::{Category, PerceivedEntity, Perception};

/// Система: пересобрать perception snapshot всех наблюдателей
///
/// Соседи упорядочены по Entity (детерминизм, не зависит от порядка query).
/// Сам наблюдатель в свой snapshot не попадает.
pub fn update_perception(
    mut observers: Query<(Entity, &Transform, &mut Perception)>,
    candidates: Query<(Entity, &Transform, &Category)>,
) {
    let mut world_snapshot: Vec<PerceivedEntity> = candidates
        .iter()
        .map(|(entity, transform, category)| PerceivedEntity {
            entity,
            category: *category,
            position: transform.translation,
        })
        .collect();
    world_snapshot.sort_by_key(|perceived| perceived.entity);

    for (observer, transform, mut perception) in observers.iter_mut() {
        let radius_sq = perception.radius * perception.radius;
        let origin = transform.translation;

        let neighbors: Vec<PerceivedEntity> = world_snapshot
            .iter()
            .filter(|perceived| perceived.entity != observer)
            .filter(|perceived| perceived.position.distance_squared(origin) <= radius_sq)
            .copied()
            .collect();

        // Не трогаем компонент без надобности (Changed<Perception> остаётся тихим)
        if perception.neighbors() != neighbors.as_slice() {
            perception.set_neighbors(neighbors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_perception(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(update_perception);
        schedule.run(world);
    }

    #[test]
    fn test_perception_radius_is_inclusive() {
        let mut world = World::new();
        let observer = world
            .spawn((Transform::default(), Perception::new(10.0)))
            .id();
        let on_edge = world
            .spawn((Transform::from_xyz(10.0, 0.0, 0.0), Category::Target))
            .id();
        world.spawn((Transform::from_xyz(10.01, 0.0, 0.0), Category::Target));

        run_perception(&mut world);

        let perception = world.get::<Perception>(observer).unwrap();
        assert_eq!(perception.neighbors().len(), 1);
        assert_eq!(perception.neighbors()[0].entity, on_edge);
    }

    #[test]
    fn test_perception_excludes_self_and_orders_by_entity() {
        let mut world = World::new();
        let observer = world
            .spawn((Transform::default(), Perception::new(5.0), Category::Soldier))
            .id();
        let first = world
            .spawn((Transform::from_xyz(0.0, 0.0, 4.0), Category::Target))
            .id();
        let second = world
            .spawn((Transform::from_xyz(1.0, 0.0, 0.0), Category::Scenery))
            .id();

        run_perception(&mut world);

        let perception = world.get::<Perception>(observer).unwrap();
        let seen: Vec<Entity> = perception.neighbors().iter().map(|p| p.entity).collect();
        assert_eq!(seen, vec![first, second]);
        assert_eq!(perception.of_category(Category::Target).count(), 1);
    }

    #[test]
    fn test_perception_drops_target_out_of_range() {
        let mut world = World::new();
        let observer = world
            .spawn((Transform::default(), Perception::new(3.0)))
            .id();
        let target = world
            .spawn((Transform::from_xyz(0.0, 0.0, -2.0), Category::Target))
            .id();

        run_perception(&mut world);
        assert!(world.get::<Perception>(observer).unwrap().find(target).is_some());

        world.get_mut::<Transform>(target).unwrap().translation.z = -5.0;
        run_perception(&mut world);
        assert!(world.get::<Perception>(observer).unwrap().find(target).is_none());
    }
}
