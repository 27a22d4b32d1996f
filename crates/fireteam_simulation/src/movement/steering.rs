//! Yaw steering: поворот вокруг Y к точке в мире
//!
//! Pitch/roll не трогаем: солдат остаётся вертикальным.

use bevy::prelude::*;

/// Rotation, при которой forward (-Z) смотрит на target в плоскости XZ
///
/// None если target прямо над/под origin (направление не определено).
pub fn yaw_towards(origin: Vec3, target: Vec3) -> Option<Quat> {
    let dx = target.x - origin.x;
    let dz = target.z - origin.z;
    if dx * dx + dz * dz <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-dx, -dz)))
}

/// Повернуть transform к target не больше чем на max_step радиан
///
/// Возвращает true если после шага угол до цели <= tolerance.
pub fn turn_towards(transform: &mut Transform, target: Vec3, max_step: f32, tolerance: f32) -> bool {
    let Some(desired) = yaw_towards(transform.translation, target) else {
        return true;
    };

    let angle = transform.rotation.angle_between(desired);
    if angle <= tolerance {
        return true;
    }

    if max_step <= 0.0 {
        return false;
    }

    let t = (max_step / angle).min(1.0);
    transform.rotation = transform.rotation.slerp(desired, t).normalize();

    t >= 1.0 || transform.rotation.angle_between(desired) <= tolerance
}
