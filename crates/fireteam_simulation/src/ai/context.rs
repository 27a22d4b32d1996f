//! Контекст для evaluators и goals
//!
//! Goals мутируют только своего owner'а (transform + animation).
//! Perception: read-only snapshot текущего тика.

use bevy::prelude::*;

use crate::animation::AnimationController;
use crate::components::Perception;
use crate::config::SimulationConfig;

/// Read-only вид на owner'а для scoring
#[derive(Debug, Clone, Copy)]
pub struct OwnerView<'a> {
    pub entity: Entity,
    pub transform: &'a Transform,
    pub perception: &'a Perception,
}

/// Mutable контекст goal lifecycle (activate/execute/terminate)
pub struct GoalContext<'a> {
    pub owner: Entity,
    pub transform: &'a mut Transform,
    pub animation: &'a mut AnimationController,
    pub perception: &'a Perception,
    pub config: &'a SimulationConfig,
    /// Длительность текущего тика (секунды)
    pub delta: f32,
}

impl<'a> GoalContext<'a> {
    pub fn view(&self) -> OwnerView<'_> {
        OwnerView {
            entity: self.owner,
            transform: &*self.transform,
            perception: self.perception,
        }
    }
}
