//! Headless симуляция FIRETEAM
//!
//! Демо-сцена без рендера: солдаты целятся в мишень, потом мишень убирается
//! и американцы опускают винтовки. Смены goals логируются.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use fireteam_simulation::scenario::spawn_demo_scenario;
use fireteam_simulation::{
    create_headless_app, despawn_entity, log_error, log_info, set_log_level, Brain, LogLevel,
    SimulationConfig,
};

const TICK_COUNT: u32 = 600;
/// Тик, на котором мишень исчезает
const TARGET_REMOVAL_TICK: u32 = 300;

fn main() {
    let seed = 42;
    set_log_level(LogLevel::Info);
    log_info(&format!("Starting FIRETEAM headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);

    // Время двигается ровно на один fixed timestep за app.update().
    // Первый update только инициализирует Time (тика нет).
    let tick_duration = app.world().resource::<SimulationConfig>().tick_duration();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(tick_duration));

    let scenario = match spawn_demo_scenario(app.world_mut()) {
        Ok(scenario) => scenario,
        Err(err) => {
            log_error(&format!("Demo scenario setup failed: {}", err));
            std::process::exit(1);
        }
    };

    for tick in 0..TICK_COUNT {
        app.update();

        if tick == TARGET_REMOVAL_TICK {
            despawn_entity(app.world_mut(), scenario.target);
            log_info(&format!("Tick {}: target removed", tick));
        }

        if tick % 100 == 0 {
            let world = app.world_mut();
            let mut brains = world.query::<(Entity, &Brain)>();
            for (entity, brain) in brains.iter(world) {
                log_info(&format!("Tick {}: {:?} goal {:?}", tick, entity, brain.current_goal_kind()));
            }
        }
    }

    log_info("Simulation complete!");
}
