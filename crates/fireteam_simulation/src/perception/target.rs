//! Target selection: какую из видимых мишеней взять в прицел
//!
//! Default policy: первый Category::Target в perception (порядок по Entity).
//! Альтернативы подключаются через AimEvaluator<S>.

use bevy::prelude::*;

use crate::ai::context::OwnerView;
use crate::components::{Category, PerceivedEntity, Perception};

/// Стратегия выбора цели среди кандидатов
///
/// candidates никогда не пустой (acquire_target проверяет заранее).
pub trait TargetSelector: Send + Sync + 'static {
    fn select(&self, owner: &OwnerView, candidates: &[PerceivedEntity]) -> Option<Entity>;
}

/// Первый кандидат в порядке perception
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FirstCandidate;

impl TargetSelector for FirstCandidate {
    fn select(&self, _owner: &OwnerView, candidates: &[PerceivedEntity]) -> Option<Entity> {
        candidates.first().map(|candidate| candidate.entity)
    }
}

/// Ближайший кандидат (при равенстве: первый по порядку)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClosestFirst;

impl TargetSelector for ClosestFirst {
    fn select(&self, owner: &OwnerView, candidates: &[PerceivedEntity]) -> Option<Entity> {
        let origin = owner.transform.translation;
        candidates
            .iter()
            .map(|candidate| (candidate.entity, candidate.position.distance_squared(origin)))
            .reduce(|best, next| if next.1.total_cmp(&best.1).is_lt() { next } else { best })
            .map(|(entity, _)| entity)
    }
}

/// Фильтр по углу обзора (в плоскости XZ), затем inner policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InFieldOfView<S = FirstCandidate> {
    /// Половина угла обзора (радианы)
    pub half_angle: f32,
    pub inner: S,
}

impl InFieldOfView {
    pub fn new(half_angle: f32) -> Self {
        Self {
            half_angle,
            inner: FirstCandidate,
        }
    }
}

impl<S: TargetSelector> InFieldOfView<S> {
    pub fn with_inner(half_angle: f32, inner: S) -> Self {
        Self { half_angle, inner }
    }

    fn is_visible(&self, owner: &OwnerView, position: Vec3) -> bool {
        let to_target = position - owner.transform.translation;
        let flat = Vec3::new(to_target.x, 0.0, to_target.z);
        if flat.length_squared() <= f32::EPSILON {
            // Цель прямо над/под нами
            return true;
        }

        let forward = *owner.transform.forward();
        let flat_forward = Vec3::new(forward.x, 0.0, forward.z);
        if flat_forward.length_squared() <= f32::EPSILON {
            return true;
        }

        flat_forward.angle_between(flat) <= self.half_angle
    }
}

impl<S: TargetSelector> TargetSelector for InFieldOfView<S> {
    fn select(&self, owner: &OwnerView, candidates: &[PerceivedEntity]) -> Option<Entity> {
        let visible: Vec<PerceivedEntity> = candidates
            .iter()
            .filter(|candidate| self.is_visible(owner, candidate.position))
            .copied()
            .collect();

        if visible.is_empty() {
            return None;
        }
        self.inner.select(owner, &visible)
    }
}

/// Все мишени из perception snapshot (в порядке perception)
pub fn target_candidates(perception: &Perception) -> Vec<PerceivedEntity> {
    perception.of_category(Category::Target).copied().collect()
}

/// Найти цель для owner'а: None если мишеней не видно
pub fn acquire_target<S: TargetSelector + ?Sized>(selector: &S, owner: &OwnerView) -> Option<Entity> {
    let candidates = target_candidates(owner.perception);
    if candidates.is_empty() {
        return None;
    }
    selector.select(owner, &candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn target(index: u32, position: Vec3) -> PerceivedEntity {
        PerceivedEntity {
            entity: Entity::from_raw(index),
            category: Category::Target,
            position,
        }
    }

    fn perception_with(neighbors: Vec<PerceivedEntity>) -> Perception {
        let mut perception = Perception::new(20.0);
        perception.set_neighbors(neighbors);
        perception
    }

    fn owner<'a>(transform: &'a Transform, perception: &'a Perception) -> OwnerView<'a> {
        OwnerView {
            entity: Entity::from_raw(0),
            transform,
            perception,
        }
    }

    #[test]
    fn test_first_candidate_ignores_non_targets() {
        let transform = Transform::default();
        let perception = perception_with(vec![
            PerceivedEntity {
                entity: Entity::from_raw(1),
                category: Category::Soldier,
                position: Vec3::X,
            },
            target(2, Vec3::new(5.0, 0.0, 0.0)),
            target(3, Vec3::new(1.0, 0.0, 0.0)),
        ]);

        let picked = acquire_target(&FirstCandidate, &owner(&transform, &perception));
        assert_eq!(picked, Some(Entity::from_raw(2)));
    }

    #[test]
    fn test_no_targets_gives_none() {
        let transform = Transform::default();
        let perception = perception_with(vec![]);

        assert_eq!(acquire_target(&FirstCandidate, &owner(&transform, &perception)), None);
        assert_eq!(acquire_target(&ClosestFirst, &owner(&transform, &perception)), None);
    }

    #[test]
    fn test_closest_first_prefers_nearest_then_order() {
        let transform = Transform::default();
        let perception = perception_with(vec![
            target(2, Vec3::new(5.0, 0.0, 0.0)),
            target(3, Vec3::new(0.0, 0.0, 2.0)),
            target(4, Vec3::new(-2.0, 0.0, 0.0)),
        ]);

        let picked = acquire_target(&ClosestFirst, &owner(&transform, &perception));
        assert_eq!(picked, Some(Entity::from_raw(3)));
    }

    #[test]
    fn test_field_of_view_filters_behind() {
        // Forward по умолчанию = -Z
        let transform = Transform::default();
        let perception = perception_with(vec![
            target(2, Vec3::new(0.0, 0.0, 4.0)),
            target(3, Vec3::new(1.0, 0.0, -4.0)),
        ]);

        let selector = InFieldOfView::new(FRAC_PI_4);
        let picked = acquire_target(&selector, &owner(&transform, &perception));
        assert_eq!(picked, Some(Entity::from_raw(3)));

        let only_behind = perception_with(vec![target(2, Vec3::new(0.0, 0.0, 4.0))]);
        assert_eq!(acquire_target(&selector, &owner(&transform, &only_behind)), None);
    }

    #[test]
    fn test_field_of_view_with_closest_inner() {
        let transform = Transform::default();
        let perception = perception_with(vec![
            target(2, Vec3::new(0.0, 0.0, -8.0)),
            target(3, Vec3::new(0.5, 0.0, -3.0)),
        ]);

        let selector = InFieldOfView::with_inner(FRAC_PI_4, ClosestFirst);
        let picked = acquire_target(&selector, &owner(&transform, &perception));
        assert_eq!(picked, Some(Entity::from_raw(3)));
    }
}
