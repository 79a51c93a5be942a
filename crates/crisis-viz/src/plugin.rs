//! Main visualization plugin that ties all systems together.

use bevy::prelude::*;

use crate::debug::DebugPlugin;
use crate::layout::{LayoutPlugin, DESIGN_SIZE};
use crate::neural::NeuralPlugin;
use crate::overlay::OverlayPlugin;
use crate::sim_runner::SimRunnerPlugin;
use crate::units::UnitPlugin;
use crate::world::WorldPlugin;

/// Window title.
pub const WINDOW_TITLE: &str = "Nuclear Crisis Simulation";

/// Main plugin for the crisis visualization.
///
/// Sets up the window and adds every sub-plugin. The simulation driver runs
/// before any drawing system each frame.
pub struct CrisisVizPlugin;

impl Plugin for CrisisVizPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                resolution: (DESIGN_SIZE.x, DESIGN_SIZE.y).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((
            SimRunnerPlugin,
            LayoutPlugin,
            WorldPlugin,
            UnitPlugin,
            NeuralPlugin,
            OverlayPlugin,
            DebugPlugin,
        ));
    }
}
