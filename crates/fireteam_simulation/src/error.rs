//! Ошибки симуляции
//!
//! Таксономия:
//! - AnimationError: ошибки конфигурации клипов (unknown clip, битый manifest).
//!   Это setup bug, не runtime условие → hard failure, без retry.
//! - BehaviorError: ошибки goal/evaluator слоя (включая animation ошибки
//!   из activate/terminate хуков).

use thiserror::Error;

use crate::ai::GoalKind;

/// Ошибки animation controller / clip library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Клип не зарегистрирован (в controller или library)
    #[error("could not find animation clip `{name}`")]
    UnknownClip { name: String },

    /// Клип с таким именем уже зарегистрирован
    #[error("animation clip `{name}` is already registered")]
    DuplicateClip { name: String },

    /// Длительность клипа должна быть конечной и > 0
    #[error("animation clip `{name}` has invalid duration {duration}")]
    InvalidDuration { name: String, duration: f32 },
}

impl AnimationError {
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownClip { name: name.into() }
    }
}

/// Ошибки brain / goal lifecycle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BehaviorError {
    #[error(transparent)]
    Animation(#[from] AnimationError),

    /// Evaluator вернул NaN/inf: logic error, не recoverable
    #[error("evaluator for {kind:?} produced non-finite desirability {value}")]
    InvalidDesirability { kind: GoalKind, value: f32 },
}
