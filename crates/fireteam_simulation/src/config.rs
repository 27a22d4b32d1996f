//! Конфигурация симуляции (tick rate, perception, animation, aim)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Глобальные параметры симуляции
///
/// Вставляется как Resource до SimulationPlugin (иначе берётся Default).
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Частота FixedUpdate тика (Hz)
    pub tick_hz: f64,
    /// Радиус восприятия соседей (метры)
    pub perception_radius: f32,
    /// Длительность cross-fade между клипами (секунды)
    pub blend_duration: f32,
    /// Скорость поворота при прицеливании (рад/сек)
    pub aim_turn_rate: f32,
    /// Допуск по углу, при котором считаем что смотрим на цель (рад)
    pub aim_tolerance: f32,
    /// Скорость движения мишени по кругу (м/сек)
    pub patrol_speed: f32,
    /// Seed для DeterministicRng
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            perception_radius: 10.0,
            blend_duration: 0.5,
            aim_turn_rate: std::f32::consts::TAU,
            aim_tolerance: 0.01,
            patrol_speed: 3.0, // 0.05 м за тик при 60Hz
            seed: 42,
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Длительность одного fixed тика (секунды)
    pub fn tick_delta(&self) -> f32 {
        (1.0 / self.tick_hz) as f32
    }

    /// Тот же тик как Duration, ровно как считает Time::<Fixed>::from_hz
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_hz)
    }
}
