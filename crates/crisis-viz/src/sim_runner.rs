//! Simulation runner: drives the crisis from frame time and user input.
//!
//! This is the only place the [`Simulation`] is mutated. Input systems turn
//! keys and button clicks into [`ControlCommand`] events; the driver applies
//! them, then converts elapsed time into ticks through the [`TickTimer`].
//! Drawing systems run afterwards in [`CrisisSet::Draw`] and only read.

use bevy::app::AppExit;
use bevy::prelude::*;

use crisis_core::{Config, LoopControl, NeuralLayout, Simulation, TickTimer};

/// Plugin for driving the simulation.
pub struct SimRunnerPlugin;

impl Plugin for SimRunnerPlugin {
    fn build(&self, app: &mut App) {
        // Simulation and LoopControl are normally inserted by main.rs
        if !app.world().contains_resource::<Simulation>() {
            let config = Config::default();
            let seed = config.simulation.seed;
            app.insert_resource(Simulation::new(config, seed));
        }
        if !app.world().contains_resource::<LoopControl>() {
            let interval = app.world().resource::<Simulation>().config.tick_interval();
            app.insert_resource(LoopControl::new(interval));
        }

        app.init_resource::<TickTimer>()
            .init_resource::<NeuralView>()
            .add_event::<ControlCommand>()
            .configure_sets(Update, (CrisisSet::Input, CrisisSet::Drive, CrisisSet::Draw).chain())
            .add_systems(
                Update,
                (read_keyboard, read_buttons).in_set(CrisisSet::Input),
            )
            .add_systems(
                Update,
                (apply_control_commands, drive_simulation)
                    .chain()
                    .in_set(CrisisSet::Drive),
            );
    }
}

/// Ordering of the per-frame work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CrisisSet {
    /// Keyboard and button handling
    Input,
    /// Mutates the simulation
    Drive,
    /// Reads the simulation and draws
    Draw,
}

/// A user request, from a key or a button.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    TogglePause,
    SpeedUp,
    SpeedDown,
    /// Start over with the next seed
    Restart,
    CycleLayout,
    Quit,
}

impl ControlCommand {
    /// Command bound to a key, if any.
    pub fn for_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Space => Some(ControlCommand::TogglePause),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(ControlCommand::SpeedUp),
            KeyCode::Minus | KeyCode::NumpadSubtract => Some(ControlCommand::SpeedDown),
            KeyCode::KeyR => Some(ControlCommand::Restart),
            KeyCode::KeyL => Some(ControlCommand::CycleLayout),
            KeyCode::Escape => Some(ControlCommand::Quit),
            _ => None,
        }
    }
}

/// Clickable control button.
#[derive(Component, Debug, Clone, Copy)]
pub struct ControlButton(pub ControlCommand);

/// Display-side neural panel state.
#[derive(Resource, Debug, Clone, Default)]
pub struct NeuralView {
    pub layout: NeuralLayout,
}

fn read_keyboard(keyboard: Res<ButtonInput<KeyCode>>, mut commands: EventWriter<ControlCommand>) {
    for key in keyboard.get_just_pressed() {
        if let Some(command) = ControlCommand::for_key(*key) {
            commands.send(command);
        }
    }
}

fn read_buttons(
    buttons: Query<(&Interaction, &ControlButton), Changed<Interaction>>,
    mut commands: EventWriter<ControlCommand>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            commands.send(button.0);
        }
    }
}

fn apply_control_commands(
    mut events: EventReader<ControlCommand>,
    mut sim: ResMut<Simulation>,
    mut control: ResMut<LoopControl>,
    mut timer: ResMut<TickTimer>,
    mut neural: ResMut<NeuralView>,
    mut exit: EventWriter<AppExit>,
) {
    for command in events.read() {
        match command {
            ControlCommand::TogglePause => {
                control.toggle_pause();
                tracing::info!("Simulation {}", if control.paused { "paused" } else { "resumed" });
            }
            ControlCommand::SpeedUp => {
                control.speed_up();
                tracing::info!("Speed: {:.2}x", control.speed());
            }
            ControlCommand::SpeedDown => {
                control.speed_down();
                tracing::info!("Speed: {:.2}x", control.speed());
            }
            ControlCommand::Restart => {
                let seed = sim.seed().wrapping_add(1);
                sim.restart(seed);
                timer.reset();
            }
            ControlCommand::CycleLayout => {
                neural.layout = neural.layout.next();
                tracing::info!("Neural layout: {}", neural.layout.name());
            }
            ControlCommand::Quit => {
                exit.send(AppExit::Success);
            }
        }
    }
}

fn drive_simulation(
    time: Res<Time>,
    control: Res<LoopControl>,
    mut timer: ResMut<TickTimer>,
    mut sim: ResMut<Simulation>,
) {
    let due = timer.advance(time.delta(), &control);
    for _ in 0..due {
        if sim.is_over() {
            break;
        }
        let report = sim.step();
        if let Some(outcome) = report.outcome {
            tracing::info!("Tick {}: {}", report.tick, outcome.title());
        }
    }
}
