//! Clip definitions и ClipLibrary (asset registry)
//!
//! Library заполняется один раз до старта симуляции (all-or-nothing).
//! Controller'ы биндят клипы по имени на этапе spawn: ошибки здесь = setup bug.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::AnimationError;

/// Имена клипов солдата
pub mod names {
    pub const RIFLE_IDLE: &str = "rifle-idle";
    /// Idle вариант для немецкого архетипа
    pub const RIFLE_IDLE_ALT: &str = "rifle-idle-1";
    pub const RIFLE_DOWN_TO_AIM: &str = "rifle-down-to-aim";
    pub const RIFLE_AIMING_IDLE: &str = "rifle-aiming-idle";
    pub const RIFLE_AIM_TO_DOWN: &str = "rifle-aim-to-down";
}

/// Режим проигрывания клипа (задаётся при регистрации)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum LoopMode {
    /// One-shot: clamp на последнем кадре, не прерывается очередью
    Once,
    /// Loop: прерываемый
    Repeat,
}

/// Pre-authored skeletal animation clip (только тайминги: позы живут в renderer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Clip {
    pub name: String,
    /// Длительность (секунды)
    pub duration: f32,
    pub mode: LoopMode,
}

impl Clip {
    pub fn once(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            mode: LoopMode::Once,
        }
    }

    pub fn repeat(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            mode: LoopMode::Repeat,
        }
    }

    pub fn is_looping(&self) -> bool {
        self.mode == LoopMode::Repeat
    }

    /// Длительность конечная и > 0 (иначе rem_euclid/clamp дают NaN)
    pub fn validate(&self) -> Result<(), AnimationError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(AnimationError::InvalidDuration {
                name: self.name.clone(),
                duration: self.duration,
            });
        }
        Ok(())
    }
}

/// Registry: name → Clip
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ClipLibrary {
    clips: HashMap<String, Clip>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Собрать library из набора клипов. Любая ошибка → вся загрузка отклонена.
    pub fn from_clips(clips: impl IntoIterator<Item = Clip>) -> Result<Self, AnimationError> {
        let mut library = Self::new();
        for clip in clips {
            library.register(clip)?;
        }
        Ok(library)
    }

    /// Стандартный набор клипов солдата
    pub fn soldier_defaults() -> Self {
        let mut library = Self::new();
        for clip in [
            Clip::repeat(names::RIFLE_IDLE, 2.0),
            Clip::repeat(names::RIFLE_IDLE_ALT, 2.5),
            Clip::once(names::RIFLE_DOWN_TO_AIM, 0.6),
            Clip::repeat(names::RIFLE_AIMING_IDLE, 2.0),
            Clip::once(names::RIFLE_AIM_TO_DOWN, 0.6),
        ] {
            library.clips.insert(clip.name.clone(), clip);
        }
        library
    }

    pub fn register(&mut self, clip: Clip) -> Result<(), AnimationError> {
        clip.validate()?;
        if self.clips.contains_key(&clip.name) {
            return Err(AnimationError::DuplicateClip { name: clip.name });
        }

        self.clips.insert(clip.name.clone(), clip);
        Ok(())
    }

    pub fn get_clip(&self, name: &str) -> Result<&Clip, AnimationError> {
        self.clips.get(name).ok_or_else(|| AnimationError::unknown(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
