//! Демо-сценарий для headless бинаря
//!
//! Отряд из двух американцев и немца, мишень на CirclePatrol рядом.
//! Позиции слегка дрожат через DeterministicRng (seed → одинаковая сцена).

use bevy::prelude::*;
use rand::Rng;

use crate::components::Faction;
use crate::error::AnimationError;
use crate::soldier::{spawn_soldier, spawn_target};
use crate::DeterministicRng;

/// Entity демо-сцены
#[derive(Debug, Clone)]
pub struct DemoScenario {
    pub soldiers: Vec<Entity>,
    pub target: Entity,
}

/// Базовые позиции (до jitter)
const SQUAD: [(Faction, Vec3); 3] = [
    (Faction::American, Vec3::new(0.0, 0.0, 0.0)),
    (Faction::American, Vec3::new(4.0, 0.0, 2.0)),
    (Faction::German, Vec3::new(-4.0, 0.0, 2.0)),
];

const TARGET_POSITION: Vec3 = Vec3::new(0.0, 0.0, -6.0);

/// Максимальный jitter по X/Z (метры)
const SPAWN_JITTER: f32 = 0.5;

pub fn spawn_demo_scenario(world: &mut World) -> Result<DemoScenario, AnimationError> {
    let offsets: Vec<Vec3> = match world.get_resource_mut::<DeterministicRng>() {
        Some(mut rng) => (0..=SQUAD.len())
            .map(|_| {
                Vec3::new(
                    rng.rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER),
                    0.0,
                    rng.rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER),
                )
            })
            .collect(),
        None => vec![Vec3::ZERO; SQUAD.len() + 1],
    };

    let mut soldiers = Vec::with_capacity(SQUAD.len());
    for ((faction, position), offset) in SQUAD.iter().zip(&offsets) {
        soldiers.push(spawn_soldier(world, *faction, *position + *offset)?);
    }

    let target = spawn_target(world, TARGET_POSITION + offsets[SQUAD.len()]);

    crate::log_info(&format!(
        "Demo scenario: {} soldiers, target {:?}",
        soldiers.len(),
        target
    ));

    Ok(DemoScenario { soldiers, target })
}
