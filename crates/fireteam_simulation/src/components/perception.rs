//! Perception: read-only snapshot соседей в радиусе
//!
//! Пересчитывается раз в тик системой update_perception.
//! Потребители (evaluators, goals) только читают.

use bevy::prelude::*;

use super::actor::Category;

/// Сосед, видимый на этом тике
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerceivedEntity {
    pub entity: Entity,
    pub category: Category,
    /// Позиция на момент snapshot
    pub position: Vec3,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Perception {
    /// Радиус восприятия (метры)
    pub radius: f32,
    neighbors: Vec<PerceivedEntity>,
}

impl Default for Perception {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl Perception {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            neighbors: Vec::new(),
        }
    }

    /// Соседи в порядке entity id
    pub fn neighbors(&self) -> &[PerceivedEntity] {
        &self.neighbors
    }

    pub fn set_neighbors(&mut self, neighbors: Vec<PerceivedEntity>) {
        self.neighbors = neighbors;
    }

    pub fn find(&self, entity: Entity) -> Option<&PerceivedEntity> {
        self.neighbors.iter().find(|perceived| perceived.entity == entity)
    }

    pub fn of_category(&self, category: Category) -> impl Iterator<Item = &PerceivedEntity> {
        self.neighbors
            .iter()
            .filter(move |perceived| perceived.category == category)
    }
}
