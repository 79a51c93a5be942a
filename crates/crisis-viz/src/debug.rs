//! Debug overlay for development information display.
//!
//! Shows FPS, tick, unit count and log size. F3 toggles the overlay, F4 the
//! FPS line.

use bevy::prelude::*;
use std::collections::VecDeque;

use crisis_core::{LoopControl, Simulation};

use crate::sim_runner::CrisisSet;
use crate::units::VisualUnit;

/// Plugin for the debug overlay.
pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugOverlay>()
            .add_systems(Startup, setup_debug_overlay)
            .add_systems(
                Update,
                (toggle_debug_overlay, update_debug_display)
                    .chain()
                    .in_set(CrisisSet::Draw),
            );
    }
}

/// Resource controlling debug overlay settings.
#[derive(Resource)]
pub struct DebugOverlay {
    /// Whether the debug overlay is visible.
    pub enabled: bool,
    /// Show FPS counter.
    pub show_fps: bool,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self {
            enabled: false,
            show_fps: true,
        }
    }
}

impl DebugOverlay {
    /// Applies this frame's F3/F4 presses. Returns whether anything changed.
    pub fn handle_keys(&mut self, toggle_overlay: bool, toggle_fps: bool) -> bool {
        if toggle_overlay {
            self.enabled = !self.enabled;
        }
        if toggle_fps {
            self.show_fps = !self.show_fps;
        }
        toggle_overlay || toggle_fps
    }
}

/// Component marking the debug overlay container.
#[derive(Component)]
pub struct DebugOverlayContainer;

/// Component for the debug text.
#[derive(Component)]
pub struct DebugText;

/// Rolling FPS samples.
#[derive(Default)]
struct FpsHistory {
    history: VecDeque<f32>,
}

impl FpsHistory {
    fn push(&mut self, fps: f32) {
        self.history.push_back(fps);
        if self.history.len() > 60 {
            self.history.pop_front();
        }
    }

    fn average(&self) -> f32 {
        if self.history.is_empty() {
            0.0
        } else {
            self.history.iter().sum::<f32>() / self.history.len() as f32
        }
    }
}

fn setup_debug_overlay(mut commands: Commands) {
    // Below the status bar, over the map
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    top: Val::Px(48.0),
                    left: Val::Px(16.0),
                    padding: UiRect::all(Val::Px(10.0)),
                    flex_direction: FlexDirection::Column,
                    ..default()
                },
                background_color: Color::srgba(0.0, 0.0, 0.0, 0.8).into(),
                visibility: Visibility::Hidden,
                z_index: ZIndex::Global(20),
                ..default()
            },
            DebugOverlayContainer,
        ))
        .with_children(|parent| {
            parent.spawn(TextBundle::from_section(
                "DEBUG (F3 to toggle, F4 for FPS)",
                TextStyle {
                    font_size: 14.0,
                    color: Color::srgb(0.9, 0.9, 0.3),
                    ..default()
                },
            ));

            parent.spawn((
                TextBundle::from_section(
                    "",
                    TextStyle {
                        font_size: 12.0,
                        color: Color::srgb(0.8, 0.8, 0.8),
                        ..default()
                    },
                ),
                DebugText,
            ));
        });
}

fn toggle_debug_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_overlay: ResMut<DebugOverlay>,
    mut container: Query<&mut Visibility, With<DebugOverlayContainer>>,
) {
    let overlay_key = keyboard.just_pressed(KeyCode::F3);
    let fps_key = keyboard.just_pressed(KeyCode::F4);
    if !(overlay_key || fps_key) {
        return;
    }
    debug_overlay.handle_keys(overlay_key, fps_key);
    if fps_key {
        tracing::info!("Debug FPS counter: {}", if debug_overlay.show_fps { "ON" } else { "OFF" });
    }
    if overlay_key {
        for mut visibility in container.iter_mut() {
            *visibility = if debug_overlay.enabled {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }

        let status = if debug_overlay.enabled { "ON" } else { "OFF" };
        tracing::info!("Debug overlay: {}", status);
    }
}

fn update_debug_display(
    debug_overlay: Res<DebugOverlay>,
    sim: Res<Simulation>,
    control: Res<LoopControl>,
    units: Query<&VisualUnit>,
    time: Res<Time>,
    mut fps_history: Local<FpsHistory>,
    mut debug_text: Query<&mut Text, With<DebugText>>,
) {
    let dt = time.delta_seconds();
    if dt > 0.0 {
        fps_history.push(1.0 / dt);
    }
    if !debug_overlay.enabled {
        return;
    }

    let avg_fps = fps_history.average();
    let mut lines = Vec::new();

    if debug_overlay.show_fps {
        let warning = if avg_fps < 30.0 { "LOW!" } else { "" };
        lines.push(format!("FPS: {:.0} {}", avg_fps, warning));
    }

    lines.push(format!("Tick: {}", sim.state.tick));
    lines.push(format!("Tick interval: {} ms", control.tick_interval().as_millis()));
    lines.push(format!(
        "Units: {} ({} drawn)",
        sim.state.units.len(),
        units.iter().count()
    ));
    lines.push(format!(
        "Log: {} kept / {} total",
        sim.state.log.len(),
        sim.state.log.total()
    ));
    lines.push(format!("Negotiation streak: {}", sim.state.negotiation_streak));

    let color = if avg_fps < 30.0 {
        Color::srgb(1.0, 0.3, 0.3)
    } else if avg_fps < 55.0 {
        Color::srgb(1.0, 0.8, 0.3)
    } else {
        Color::srgb(0.8, 0.8, 0.8)
    };

    for mut text in debug_text.iter_mut() {
        if let Some(section) = text.sections.first_mut() {
            section.value = lines.join("\n");
            section.style.color = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_overlay_default() {
        let overlay = DebugOverlay::default();
        assert!(!overlay.enabled);
        assert!(overlay.show_fps);
    }

    #[test]
    fn test_debug_keys() {
        let mut overlay = DebugOverlay::default();
        assert!(!overlay.handle_keys(false, false));

        assert!(overlay.handle_keys(false, true));
        assert!(!overlay.show_fps);
        assert!(!overlay.enabled);

        assert!(overlay.handle_keys(true, true));
        assert!(overlay.enabled);
        assert!(overlay.show_fps);
    }

    #[test]
    fn test_fps_history() {
        let mut history = FpsHistory::default();
        assert_eq!(history.average(), 0.0);

        history.push(60.0);
        history.push(60.0);
        assert_eq!(history.average(), 60.0);

        history.push(30.0);
        assert!((history.average() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_fps_history_window() {
        let mut history = FpsHistory::default();
        for _ in 0..100 {
            history.push(10.0);
        }
        history.push(70.0);
        assert_eq!(history.history.len(), 60);
        assert!((history.average() - 11.0).abs() < 0.01);
    }
}
