//! Конкретные goals + их evaluators

pub mod aim;
pub mod idle;

pub use aim::{AimEvaluator, AimGoal};
pub use idle::{IdleEvaluator, IdleGoal};
