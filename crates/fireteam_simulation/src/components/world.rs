//! World компоненты: CirclePatrol (движение мишеней), RenderState (выход для renderer'а)

use bevy::prelude::*;

/// Движение по окружности (мишени в демо-сцене)
///
/// Каждый тик: elapsed += dt, затем
/// x += sin(elapsed) * speed * dt, z -= cos(elapsed) * speed * dt
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CirclePatrol {
    /// Накопленное время (секунды)
    pub elapsed: f32,
    /// Линейная скорость (м/с)
    pub speed: f32,
}

impl CirclePatrol {
    pub fn new(speed: f32) -> Self {
        Self {
            elapsed: 0.0,
            speed,
        }
    }

    /// Смещение за один тик (elapsed уже продвинут)
    pub fn step(&mut self, delta: f32) -> Vec3 {
        self.elapsed += delta;
        let distance = self.speed * delta;
        Vec3::new(self.elapsed.sin() * distance, 0.0, -self.elapsed.cos() * distance)
    }
}

/// Snapshot для внешнего renderer'а
///
/// ECS authoritative, renderer только читает (one-way sync в конце тика).
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct RenderState {
    pub translation: Vec3,
    pub rotation: Quat,
    /// (clip name, weight), в сумме 1.0 пока что-то играет
    pub clip_weights: Vec<(String, f32)>,
}
