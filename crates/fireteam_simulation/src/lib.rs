//! FIRETEAM Simulation Core
//!
//! ECS-симуляция солдат на Bevy 0.16 (headless)
//!
//! Один тик (SimulationTick schedule, фазы строго по порядку):
//! 1. Advance: мишени двигаются (CirclePatrol)
//! 2. Perceive: perception snapshot соседей
//! 3. Animate: animation controllers продвигают время
//! 4. Think: brain execute, затем arbitrate
//! 5. Sync: RenderState для внешнего renderer'а

use bevy::ecs::schedule::{ExecutorKind, ScheduleLabel};
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod movement;
pub mod perception;
pub mod scenario;
pub mod soldier;
pub mod sync;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, Brain, Evaluation, Evaluator, Goal, GoalChanged, GoalKind};
pub use animation::{AnimationController, AnimationFinished, AnimationPlugin, Clip, ClipLibrary, LoopMode};
pub use components::*;
pub use config::SimulationConfig;
pub use error::{AnimationError, BehaviorError};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use soldier::{despawn_entity, spawn_soldier, spawn_target};

/// Schedule одного simulation тика
///
/// Запускается через `tick()` (тесты, внешний driver) или из FixedUpdate.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationTick;

/// Фазы тика (chain: строго последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickPhase {
    Advance,
    Perceive,
    Animate,
    Think,
    Sync,
}

/// Длительность текущего тика (секунды)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct TickDelta(pub f32);

/// Прогнать один тик симуляции
///
/// Паникует если SimulationPlugin не добавлен (нет SimulationTick schedule).
pub fn tick(world: &mut World, delta: f32) {
    world.insert_resource(TickDelta(delta));
    world.run_schedule(SimulationTick);
}

/// Exclusive система: FixedUpdate → SimulationTick
pub fn run_simulation_tick(world: &mut World) {
    let delta = world.resource::<Time<Fixed>>().delta_secs();
    tick(world, delta);
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Config вставляется снаружи до plugin (иначе Default)
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();

        if !app.world().contains_resource::<ClipLibrary>() {
            app.insert_resource(ClipLibrary::soldier_defaults());
        }

        // Детерминизм: тик всегда single-threaded
        let mut schedule = Schedule::new(SimulationTick);
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        app.add_schedule(schedule)
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
            // Детерминистичный RNG (seed из config)
            .insert_resource(DeterministicRng::new(config.seed))
            .insert_resource(TickDelta(config.tick_delta()))
            .insert_resource(config)
            .configure_sets(
                SimulationTick,
                (
                    TickPhase::Advance,
                    TickPhase::Perceive,
                    TickPhase::Animate,
                    TickPhase::Think,
                    TickPhase::Sync,
                )
                    .chain(),
            )
            .add_systems(
                SimulationTick,
                (
                    movement::advance_patrols.in_set(TickPhase::Advance),
                    perception::update_perception.in_set(TickPhase::Perceive),
                    sync::sync_render_state.in_set(TickPhase::Sync),
                ),
            )
            // Подсистемы
            .add_plugins((AnimationPlugin, AIPlugin))
            .add_systems(FixedUpdate, run_simulation_tick);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(SimulationConfig::with_seed(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
