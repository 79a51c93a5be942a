//! Colours shared by the drawing systems.

use bevy::prelude::*;

use crisis_core::ActivationLevel;
use crisis_events::Nation;

pub const BACKGROUND: Color = Color::srgb(0.06, 0.07, 0.09);
pub const OCEAN: Color = Color::srgb(0.08, 0.16, 0.28);
pub const PANEL: Color = Color::srgba(0.12, 0.13, 0.16, 0.92);
pub const TEXT: Color = Color::srgb(0.88, 0.88, 0.88);
pub const TEXT_DIM: Color = Color::srgb(0.6, 0.6, 0.62);
pub const HEADER: Color = Color::srgb(0.95, 0.8, 0.3);
pub const LOCATION: Color = Color::srgb(0.75, 0.75, 0.7);
pub const ALERT: Color = Color::srgb(1.0, 0.25, 0.2);
pub const BUTTON: Color = Color::srgb(0.2, 0.22, 0.27);
pub const BUTTON_HOVER: Color = Color::srgb(0.28, 0.3, 0.36);
pub const BUTTON_PRESSED: Color = Color::srgb(0.35, 0.5, 0.35);
pub const CONNECTION: Color = Color::srgba(0.5, 0.6, 0.8, 0.5);

const CALM_RGB: [f32; 3] = [0.2, 0.8, 0.25];
const WARN_RGB: [f32; 3] = [0.95, 0.85, 0.2];
const DANGER_RGB: [f32; 3] = [0.9, 0.15, 0.15];

/// Gradient green -> yellow -> red over tension `[0, 100]`.
pub fn tension_rgb(tension: f32) -> [f32; 3] {
    let t = if tension.is_finite() {
        (tension / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (from, to, f) = if t < 0.5 {
        (CALM_RGB, WARN_RGB, t * 2.0)
    } else {
        (WARN_RGB, DANGER_RGB, (t - 0.5) * 2.0)
    };
    [
        from[0] + (to[0] - from[0]) * f,
        from[1] + (to[1] - from[1]) * f,
        from[2] + (to[2] - from[2]) * f,
    ]
}

pub fn tension_color(tension: f32) -> Color {
    let [r, g, b] = tension_rgb(tension);
    Color::srgb(r, g, b)
}

/// Marker colour for a unit owner.
pub fn nation_color(nation: Nation) -> Color {
    match nation {
        Nation::UnitedStates => Color::srgb(0.25, 0.5, 0.95),
        Nation::NorthKorea => Color::srgb(0.9, 0.25, 0.25),
        Nation::SouthKorea => Color::srgb(0.4, 0.75, 0.95),
        Nation::Japan => Color::srgb(0.95, 0.95, 0.95),
        Nation::China => Color::srgb(0.95, 0.7, 0.1),
        Nation::Russia => Color::srgb(0.6, 0.4, 0.8),
    }
}

/// Node colour on a neural panel.
pub fn activation_color(level: ActivationLevel) -> Color {
    match level {
        ActivationLevel::Inactive => Color::srgb(0.3, 0.3, 0.35),
        ActivationLevel::Low => Color::srgb(0.2, 0.6, 0.9),
        ActivationLevel::Medium => Color::srgb(0.95, 0.75, 0.2),
        ActivationLevel::High => Color::srgb(0.95, 0.25, 0.2),
    }
}
