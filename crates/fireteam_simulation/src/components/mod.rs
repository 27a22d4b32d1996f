//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: Soldier, Faction, Category
//! - perception: snapshot соседей в радиусе (Perception, PerceivedEntity)
//! - world: перемещение мишеней и render sync (CirclePatrol, RenderState)

pub mod actor;
pub mod perception;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use perception::*;
pub use world::*;
