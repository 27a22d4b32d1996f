//! Movement domain: поворот к цели и патрулирование мишеней
//!
//! Содержит:
//! - turn_towards (yaw steering для AimGoal)
//! - advance_patrols (CirclePatrol система, фаза Advance)

pub mod patrol;
pub mod steering;

pub use patrol::advance_patrols;
pub use steering::{turn_towards, yaw_towards};
