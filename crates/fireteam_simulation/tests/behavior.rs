//! End-to-end поведение солдат через headless App
//!
//! Сцена собирается spawn helper'ами, тики гоняются через `tick()`.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use fireteam_simulation::animation::clip_names;
use fireteam_simulation::{
    create_headless_app, despawn_entity, spawn_soldier, spawn_target, tick, AnimationController,
    AnimationFinished, Brain, CirclePatrol, Faction, GoalChanged, GoalKind, Perception, RenderState,
    SimulationConfig,
};

const DELTA: f32 = 1.0 / 60.0;

fn run_ticks(app: &mut App, count: usize) {
    for _ in 0..count {
        tick(app.world_mut(), DELTA);
    }
}

fn goal_of(app: &App, entity: Entity) -> Option<GoalKind> {
    app.world().get::<Brain>(entity).unwrap().current_goal_kind()
}

fn controller_of(app: &App, entity: Entity) -> &AnimationController {
    app.world().get::<AnimationController>(entity).unwrap()
}

fn goal_changes(app: &App) -> Vec<GoalChanged> {
    let events = app.world().resource::<Events<GoalChanged>>();
    let mut cursor = events.get_cursor();
    cursor.read(events).cloned().collect()
}

#[test]
fn test_soldier_idles_without_target() {
    let mut app = create_headless_app(1);
    let soldier = spawn_soldier(app.world_mut(), Faction::American, Vec3::ZERO).unwrap();

    for _ in 0..30 {
        run_ticks(&mut app, 1);
        assert_eq!(goal_of(&app, soldier), Some(GoalKind::Idle));
    }

    assert_eq!(controller_of(&app, soldier).current_clip(), Some(clip_names::RIFLE_IDLE));

    // Idle ставится один раз
    let changes = goal_changes(&app);
    assert_eq!(
        changes,
        vec![GoalChanged {
            entity: soldier,
            from: None,
            to: Some(GoalKind::Idle),
        }]
    );
}

#[test]
fn test_soldier_aims_at_target_in_range() {
    let mut app = create_headless_app(2);
    let soldier = spawn_soldier(app.world_mut(), Faction::American, Vec3::ZERO).unwrap();
    let target = spawn_target(app.world_mut(), Vec3::new(0.0, 0.0, -5.0));

    run_ticks(&mut app, 1);
    assert_eq!(goal_of(&app, soldier), Some(GoalKind::Aim));
    assert!(app
        .world()
        .get::<Perception>(soldier)
        .unwrap()
        .find(target)
        .is_some());

    // Подъём винтовки: one-shot, aiming idle ждёт в очереди
    let controller = controller_of(&app, soldier);
    assert_eq!(controller.current_clip(), Some(clip_names::RIFLE_DOWN_TO_AIM));
    assert_eq!(
        controller.pending().collect::<Vec<_>>(),
        vec![clip_names::RIFLE_AIMING_IDLE]
    );

    // 0.6с down-to-aim → aiming idle
    run_ticks(&mut app, 45);
    assert_eq!(
        controller_of(&app, soldier).current_clip(),
        Some(clip_names::RIFLE_AIMING_IDLE)
    );

    let finished = app.world().resource::<Events<AnimationFinished>>();
    let mut cursor = finished.get_cursor();
    let clips: Vec<String> = cursor.read(finished).map(|event| event.clip.clone()).collect();
    assert_eq!(clips, vec![clip_names::RIFLE_DOWN_TO_AIM.to_string()]);
}

#[test]
fn test_soldier_faces_target() {
    let mut app = create_headless_app(3);
    let soldier = spawn_soldier(app.world_mut(), Faction::American, Vec3::ZERO).unwrap();
    let target = spawn_target(app.world_mut(), Vec3::new(5.0, 0.0, 0.0));

    run_ticks(&mut app, 30);

    let soldier_transform = *app.world().get::<Transform>(soldier).unwrap();
    let target_position = app.world().get::<Transform>(target).unwrap().translation;
    let to_target = (target_position - soldier_transform.translation).with_y(0.0).normalize();
    let forward = soldier_transform.forward().with_y(0.0).normalize();

    assert!(forward.angle_between(to_target) < 0.1, "forward {forward:?}, to target {to_target:?}");

    // RenderState отражает тот же поворот
    let render = app.world().get::<RenderState>(soldier).unwrap();
    assert_eq!(render.rotation, soldier_transform.rotation);
}

#[test]
fn test_soldier_returns_to_idle_after_target_removed() {
    let mut app = create_headless_app(4);
    let soldier = spawn_soldier(app.world_mut(), Faction::American, Vec3::ZERO).unwrap();
    let target = spawn_target(app.world_mut(), Vec3::new(0.0, 0.0, -4.0));

    run_ticks(&mut app, 60);
    assert_eq!(goal_of(&app, soldier), Some(GoalKind::Aim));

    assert!(despawn_entity(app.world_mut(), target));
    run_ticks(&mut app, 1);

    assert_eq!(goal_of(&app, soldier), Some(GoalKind::Idle));
    let controller = controller_of(&app, soldier);
    assert_eq!(controller.current_clip(), Some(clip_names::RIFLE_AIM_TO_DOWN));
    // rifle-idle из AimGoal::terminate и из IdleGoal::activate, повтор схлопнется при promote
    let pending: Vec<&str> = controller.pending().collect();
    assert_eq!(pending, vec![clip_names::RIFLE_IDLE, clip_names::RIFLE_IDLE]);

    run_ticks(&mut app, 60);
    assert_eq!(controller_of(&app, soldier).current_clip(), Some(clip_names::RIFLE_IDLE));
    assert_eq!(controller_of(&app, soldier).pending().count(), 0);

    let kinds: Vec<Option<GoalKind>> = goal_changes(&app).into_iter().map(|change| change.to).collect();
    assert_eq!(kinds, vec![Some(GoalKind::Aim), Some(GoalKind::Idle)]);
}

#[test]
fn test_german_soldier_ignores_target() {
    let mut app = create_headless_app(5);
    let soldier = spawn_soldier(app.world_mut(), Faction::German, Vec3::ZERO).unwrap();
    spawn_target(app.world_mut(), Vec3::new(0.0, 0.0, -3.0));

    run_ticks(&mut app, 20);

    assert_eq!(goal_of(&app, soldier), Some(GoalKind::Idle));
    assert_eq!(
        controller_of(&app, soldier).current_clip(),
        Some(clip_names::RIFLE_IDLE_ALT)
    );
}

#[test]
fn test_target_out_of_range_is_ignored() {
    let mut app = create_headless_app(6);
    let soldier = spawn_soldier(app.world_mut(), Faction::American, Vec3::ZERO).unwrap();
    // Радиус perception 10м, patrol смещает мишень на ~0.05м за тик
    spawn_target(app.world_mut(), Vec3::new(0.0, 0.0, -30.0));

    run_ticks(&mut app, 10);

    assert_eq!(goal_of(&app, soldier), Some(GoalKind::Idle));
    assert!(app.world().get::<Perception>(soldier).unwrap().neighbors().is_empty());
}

#[test]
fn test_render_weights_stay_normalized_when_target_returns() {
    let mut app = create_headless_app(7);
    let soldier = spawn_soldier(app.world_mut(), Faction::American, Vec3::ZERO).unwrap();
    let target = spawn_target(app.world_mut(), Vec3::new(0.0, 0.0, -4.0));

    let assert_normalized = |app: &App, step: usize| {
        let render = app.world().get::<RenderState>(soldier).unwrap();
        let total: f32 = render.clip_weights.iter().map(|(_, weight)| weight).sum();
        assert!(
            (total - 1.0).abs() < 1e-4,
            "tick {}: weights {:?}",
            step,
            render.clip_weights
        );
    };

    for step in 0..60 {
        run_ticks(&mut app, 1);
        assert_normalized(&app, step);
    }

    // Мишень пропала: aim-to-down, затем новая мишень пока aim-to-down ещё играет
    despawn_entity(app.world_mut(), target);
    for step in 60..70 {
        run_ticks(&mut app, 1);
        assert_normalized(&app, step);
    }
    assert_eq!(
        controller_of(&app, soldier).current_clip(),
        Some(clip_names::RIFLE_AIM_TO_DOWN)
    );

    spawn_target(app.world_mut(), Vec3::new(0.0, 0.0, -4.0));
    for step in 70..160 {
        run_ticks(&mut app, 1);
        assert_normalized(&app, step);
    }

    assert_eq!(goal_of(&app, soldier), Some(GoalKind::Aim));
    assert_eq!(
        controller_of(&app, soldier).current_clip(),
        Some(clip_names::RIFLE_AIMING_IDLE)
    );
}

#[test]
fn test_manual_time_runs_one_tick_per_update() {
    let mut app = create_headless_app(8);
    let tick_duration = app.world().resource::<SimulationConfig>().tick_duration();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(tick_duration));
    let target = spawn_target(app.world_mut(), Vec3::ZERO);

    // Первый update только инициализирует Time
    for _ in 0..=10 {
        app.update();
    }

    let elapsed = app.world().get::<CirclePatrol>(target).unwrap().elapsed;
    assert!((elapsed - 10.0 / 60.0).abs() < 1e-5, "elapsed {}", elapsed);
}
