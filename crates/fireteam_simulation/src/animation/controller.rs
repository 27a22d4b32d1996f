//! AnimationController: проигрывание клипов с cross-fade и FIFO очередью
//!
//! State machine:
//! NoClipPlaying → Playing(clip) → [one-shot закончился] → NoClipPlaying | Playing(next queued)
//!
//! Правила очереди:
//! - Loop клипы прерываемые: очередь продвигается сразу
//! - One-shot клипы доигрывают до конца, потом completion достаёт следующий

use bevy::prelude::*;
use std::collections::{HashMap, VecDeque};

use super::clip::{Clip, ClipLibrary, LoopMode};
use crate::error::AnimationError;

/// Состояние проигрывания одного клипа
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPlayback {
    pub name: String,
    /// Позиция проигрывания (секунды)
    pub time: f32,
    /// Blend weight (0..=1)
    pub weight: f32,
}

impl ClipPlayback {
    fn start(name: &str) -> Self {
        Self {
            name: name.to_string(),
            time: 0.0,
            weight: 1.0,
        }
    }
}

/// Уходящий клип во время cross-fade
#[derive(Debug, Clone, PartialEq)]
struct FadingClip {
    playback: ClipPlayback,
    /// Weight клипа в момент старта fade
    start_weight: f32,
}

/// Cross-fade от видимой позы к current
///
/// Видимая поза может состоять из нескольких клипов (смена клипа посреди fade).
/// Сумма start_weight = 1, поэтому сумма всех weights остаётся 1.
#[derive(Debug, Clone, PartialEq)]
struct CrossFade {
    from: Vec<FadingClip>,
    elapsed: f32,
    duration: f32,
}

impl CrossFade {
    fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

/// Per-character animation controller
///
/// Живёт и умирает вместе с персонажем. Клипы биндятся на spawn.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct AnimationController {
    clips: HashMap<String, Clip>,
    blend_duration: f32,
    current: Option<ClipPlayback>,
    fade: Option<CrossFade>,
    /// Последний кадр законченного one-shot, держится пока ничего не играет
    held: Option<ClipPlayback>,
    pending: VecDeque<String>,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl AnimationController {
    pub fn new(blend_duration: f32) -> Self {
        Self {
            clips: HashMap::new(),
            blend_duration: blend_duration.max(0.0),
            current: None,
            fade: None,
            held: None,
            pending: VecDeque::new(),
        }
    }

    /// Биндит набор клипов из library. Отсутствующее имя → setup error.
    pub fn from_library(
        library: &ClipLibrary,
        names: &[&str],
        blend_duration: f32,
    ) -> Result<Self, AnimationError> {
        let mut controller = Self::new(blend_duration);
        for name in names {
            controller.bind(library.get_clip(name)?.clone())?;
        }
        Ok(controller)
    }

    /// Забиндить клип (повторный bind того же имени заменяет клип)
    pub fn bind(&mut self, clip: Clip) -> Result<(), AnimationError> {
        clip.validate()?;
        self.clips.insert(clip.name.clone(), clip);
        Ok(())
    }

    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn blend_duration(&self) -> f32 {
        self.blend_duration
    }

    pub fn current_clip(&self) -> Option<&str> {
        self.current.as_ref().map(|playback| playback.name.as_str())
    }

    pub fn current_time(&self) -> Option<f32> {
        self.current.as_ref().map(|playback| playback.time)
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_blending(&self) -> bool {
        self.fade.is_some()
    }

    /// Клип, чей последний кадр держится после завершения (ничего не играет)
    pub fn held_clip(&self) -> Option<&str> {
        self.held.as_ref().map(|playback| playback.name.as_str())
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    /// Немедленно проиграть клип (cross-fade от видимой сейчас позы).
    ///
    /// Возвращает `false` если клип уже играет (no-op, без рестарта).
    /// Неизвестное имя → `UnknownClip`, состояние не меняется.
    pub fn play_animation(&mut self, name: &str) -> Result<bool, AnimationError> {
        if !self.clips.contains_key(name) {
            return Err(AnimationError::unknown(name));
        }

        if self.current_clip() == Some(name) {
            return Ok(false);
        }

        let mut incoming = ClipPlayback::start(name);
        self.held = None;
        let outgoing = self.take_visible();
        self.fade = if self.blend_duration > 0.0 && !outgoing.is_empty() {
            incoming.weight = 0.0;
            Some(CrossFade {
                from: outgoing,
                elapsed: 0.0,
                duration: self.blend_duration,
            })
        } else {
            None
        };
        self.current = Some(incoming);

        Ok(true)
    }

    /// Добавить клип в очередь и сразу попытаться его продвинуть.
    pub fn queue_animation(&mut self, name: &str) -> Result<(), AnimationError> {
        if !self.clips.contains_key(name) {
            return Err(AnimationError::unknown(name));
        }

        self.pending.push_back(name.to_string());
        self.promote_pending()
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Продвинуть время проигрывания.
    ///
    /// Возвращает имя one-shot клипа, который закончился на этом шаге.
    pub fn advance(&mut self, delta: f32) -> Result<Option<String>, AnimationError> {
        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += delta;
            for fading in fade.from.iter_mut() {
                if let Some(clip) = self.clips.get(&fading.playback.name) {
                    // Уходящий one-shot просто держит последний кадр
                    step_playback(&mut fading.playback, clip, delta);
                }
            }
        }

        let progress = self.fade.as_ref().map_or(1.0, CrossFade::progress);
        if progress >= 1.0 {
            self.fade = None;
        } else if let Some(fade) = self.fade.as_mut() {
            for fading in fade.from.iter_mut() {
                fading.playback.weight = fading.start_weight * (1.0 - progress);
            }
        }

        let Some(current) = self.current.as_mut() else {
            return Ok(None);
        };
        current.weight = progress;

        let finished = match self.clips.get(&current.name) {
            Some(clip) => step_playback(current, clip, delta),
            None => false,
        };
        if !finished {
            return Ok(None);
        }

        let finished_name = current.name.clone();
        self.complete_current()?;
        Ok(Some(finished_name))
    }

    /// Blend weights всех клипов, влияющих на позу (для render sync)
    pub fn weights(&self) -> Vec<(String, f32)> {
        let mut weights = Vec::with_capacity(2);
        if let Some(fade) = &self.fade {
            weights.extend(
                fade.from
                    .iter()
                    .map(|fading| (fading.playback.name.clone(), fading.playback.weight)),
            );
        }
        if let Some(current) = &self.current {
            weights.push((current.name.clone(), current.weight));
        }
        if let Some(held) = &self.held {
            weights.push((held.name.clone(), held.weight));
        }
        weights
    }

    /// Забрать всё, что сейчас видно (fading + current) как источники нового fade
    ///
    /// Клипы с нулевым weight (промоутнуты в этом же вызове, ещё не видны) отбрасываются.
    fn take_visible(&mut self) -> Vec<FadingClip> {
        let outgoing = self.fade.take().map(|fade| fade.from).unwrap_or_default();

        outgoing
            .into_iter()
            .map(|fading| fading.playback)
            .chain(self.current.take())
            .filter(|playback| playback.weight > 0.0)
            .map(|playback| FadingClip {
                start_weight: playback.weight,
                playback,
            })
            .collect()
    }

    /// Loop клипы (и пустой controller) прерываемые, one-shot: нет
    fn is_interruptible(&self) -> bool {
        match &self.current {
            None => true,
            Some(playback) => self
                .clips
                .get(&playback.name)
                .map_or(true, Clip::is_looping),
        }
    }

    fn promote_pending(&mut self) -> Result<(), AnimationError> {
        while self.is_interruptible() {
            let Some(next) = self.pending.pop_front() else {
                break;
            };
            self.play_animation(&next)?;
        }
        Ok(())
    }

    /// Completion signal: one-shot закончился
    fn complete_current(&mut self) -> Result<(), AnimationError> {
        match self.pending.pop_front() {
            Some(next) => {
                if self.current_clip() == Some(next.as_str()) {
                    // Тот же one-shot в очереди ещё раз: рестарт с начала
                    if let Some(current) = self.current.as_mut() {
                        current.time = 0.0;
                    }
                } else {
                    self.play_animation(&next)?;
                }
                self.promote_pending()
            }
            None => {
                self.fade = None;
                self.held = self.current.take().map(|mut playback| {
                    playback.weight = 1.0;
                    playback
                });
                Ok(())
            }
        }
    }
}

/// Шаг времени одного клипа. `true` если one-shot дошёл до конца (clamp).
fn step_playback(playback: &mut ClipPlayback, clip: &Clip, delta: f32) -> bool {
    playback.time += delta;
    match clip.mode {
        LoopMode::Repeat => {
            playback.time = playback.time.rem_euclid(clip.duration);
            false
        }
        LoopMode::Once => {
            if playback.time >= clip.duration {
                playback.time = clip.duration;
                true
            } else {
                false
            }
        }
    }
}
