//! Integration tests for the visualization layer.
//!
//! These run the simulation driver headless on `MinimalPlugins`, feeding it
//! key presses and manual frame times.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crisis_core::{Config, LoopControl, Simulation};
use crisis_viz::sim_runner::{NeuralView, SimRunnerPlugin};

/// Build a headless app with a 100 ms tick and 200 ms frames.
fn test_app(seed: u64) -> App {
    let mut config = Config::default();
    config.simulation.tick_interval_ms = 100;
    let control = LoopControl::new(config.tick_interval());

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(200)))
        .insert_resource(Simulation::new(config, seed))
        .insert_resource(control)
        .add_plugins(SimRunnerPlugin);
    app
}

/// Press a key for exactly one frame.
fn press(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    input.release_all();
    input.clear();
}

fn tick(app: &App) -> u64 {
    app.world().resource::<Simulation>().state.tick
}

#[test]
fn test_driver_advances_ticks() {
    let mut app = test_app(42);
    for _ in 0..5 {
        app.update();
    }
    assert!(tick(&app) >= 4, "only {} ticks ran", tick(&app));
    assert!(app.world().resource::<Simulation>().state.log.total() >= 8);
}

#[test]
fn test_space_pauses_and_resumes() {
    let mut app = test_app(42);
    app.update();

    press(&mut app, KeyCode::Space);
    assert!(app.world().resource::<LoopControl>().paused);

    let paused_at = tick(&app);
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(tick(&app), paused_at);

    press(&mut app, KeyCode::Space);
    assert!(!app.world().resource::<LoopControl>().paused);
    app.update();
    assert!(tick(&app) > paused_at);
}

#[test]
fn test_speed_keys() {
    let mut app = test_app(1);
    press(&mut app, KeyCode::Equal);
    assert_eq!(app.world().resource::<LoopControl>().speed(), 1.25);

    press(&mut app, KeyCode::Minus);
    press(&mut app, KeyCode::Minus);
    assert_eq!(app.world().resource::<LoopControl>().speed(), 0.75);
}

#[test]
fn test_restart_uses_next_seed() {
    let mut app = test_app(10);
    for _ in 0..4 {
        app.update();
    }

    // Freeze time so the restarted world stays at tick 0
    app.world_mut().resource_mut::<LoopControl>().paused = true;
    press(&mut app, KeyCode::KeyR);

    let sim = app.world().resource::<Simulation>();
    assert_eq!(sim.seed(), 11);
    assert_eq!(sim.state.tick, 0);
    assert!(sim.state.log.is_empty());
}

#[test]
fn test_layout_key_cycles_neural_view() {
    let mut app = test_app(3);
    let before = app.world().resource::<NeuralView>().layout;
    press(&mut app, KeyCode::KeyL);
    assert_eq!(app.world().resource::<NeuralView>().layout, before.next());
}

#[test]
fn test_escape_requests_exit() {
    let mut app = test_app(3);
    press(&mut app, KeyCode::Escape);
    assert!(!app.world().resource::<Events<AppExit>>().is_empty());
}
