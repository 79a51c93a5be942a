//! Screen layout: where each panel sits for a given window size.
//!
//! Rects are in window pixels with the origin at the top-left and y growing
//! down, matching UI node placement. Sprites and gizmos live in camera space
//! (origin at the centre, y up); [`ScreenLayout::to_world`] converts.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::sim_runner::CrisisSet;

/// Window size the layout is designed for.
pub const DESIGN_SIZE: Vec2 = Vec2::new(1200.0, 800.0);
/// Smallest size the layout scales down to.
pub const MIN_SIZE: Vec2 = Vec2::new(800.0, 600.0);

const MARGIN: f32 = 8.0;
const STATUS_HEIGHT: f32 = 32.0;
const TENSION_HEIGHT: f32 = 60.0;
const PRESIDENT_HEIGHT: f32 = 150.0;
const CONTROLS_HEIGHT: f32 = 44.0;

/// Plugin keeping [`ScreenLayout`] in sync with the window.
pub struct LayoutPlugin;

impl Plugin for LayoutPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenLayout>()
            .add_systems(Update, update_screen_layout.in_set(CrisisSet::Drive));
    }
}

/// Panel rectangles for the current window.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ScreenLayout {
    pub window: Vec2,
    pub status_bar: Rect,
    pub map: Rect,
    pub tension: Rect,
    /// Indexed by `ActorId::index`
    pub presidents: [Rect; 2],
    /// Indexed by `ActorId::index`
    pub neural: [Rect; 2],
    pub event_log: Rect,
    pub controls: Rect,
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::compute(DESIGN_SIZE)
    }
}

impl ScreenLayout {
    pub fn compute(window: Vec2) -> Self {
        let size = window.max(MIN_SIZE);
        let (w, h) = (size.x, size.y);
        let split_x = (w * 0.62).round();

        let status_bar = Rect::new(0.0, 0.0, w, STATUS_HEIGHT);
        let top = STATUS_HEIGHT + MARGIN;

        // Left column: map above, neural panels below
        let left_x0 = MARGIN;
        let left_x1 = split_x - MARGIN / 2.0;
        let map = Rect::new(left_x0, top, left_x1, (h * 0.58).round());
        let neural_y0 = map.max.y + MARGIN;
        let neural_y1 = h - MARGIN;
        let neural_mid = (left_x0 + left_x1) / 2.0;
        let neural = [
            Rect::new(left_x0, neural_y0, neural_mid - MARGIN / 2.0, neural_y1),
            Rect::new(neural_mid + MARGIN / 2.0, neural_y0, left_x1, neural_y1),
        ];

        // Right column: tension, presidents, log, controls
        let right_x0 = split_x + MARGIN / 2.0;
        let right_x1 = w - MARGIN;
        let tension = Rect::new(right_x0, top, right_x1, top + TENSION_HEIGHT);
        let pres_y0 = tension.max.y + MARGIN;
        let pres_y1 = pres_y0 + PRESIDENT_HEIGHT;
        let right_mid = (right_x0 + right_x1) / 2.0;
        let presidents = [
            Rect::new(right_x0, pres_y0, right_mid - MARGIN / 2.0, pres_y1),
            Rect::new(right_mid + MARGIN / 2.0, pres_y0, right_x1, pres_y1),
        ];
        let controls = Rect::new(right_x0, h - MARGIN - CONTROLS_HEIGHT, right_x1, h - MARGIN);
        let event_log = Rect::new(right_x0, pres_y1 + MARGIN, right_x1, controls.min.y - MARGIN);

        Self {
            window: size,
            status_bar,
            map,
            tension,
            presidents,
            neural,
            event_log,
            controls,
        }
    }

    /// Converts a window-pixel point to camera space.
    pub fn to_world(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x - self.window.x / 2.0, self.window.y / 2.0 - point.y)
    }

    /// Centre of a rect in camera space.
    pub fn world_center(&self, rect: Rect) -> Vec2 {
        self.to_world(rect.center())
    }

    /// Maps a unit-square point (x east, y north) inside `rect` to camera
    /// space.
    pub fn place_in(&self, rect: Rect, unit: Vec2) -> Vec2 {
        let px = rect.min.x + unit.x * rect.width();
        let py = rect.max.y - unit.y * rect.height();
        self.to_world(Vec2::new(px, py))
    }

    /// Event-log lines that fit the log panel.
    pub fn log_lines(&self) -> usize {
        const LINE_HEIGHT: f32 = 16.0;
        const HEADER: f32 = 28.0;
        (((self.event_log.height() - HEADER) / LINE_HEIGHT).floor() as usize).max(1)
    }

    /// All panel rects, for overlap checks.
    pub fn panels(&self) -> Vec<Rect> {
        let mut panels = vec![
            self.status_bar,
            self.map,
            self.tension,
            self.event_log,
            self.controls,
        ];
        panels.extend(self.presidents);
        panels.extend(self.neural);
        panels
    }
}

/// Absolute UI style covering a layout rect.
pub fn absolute_style(rect: Rect) -> Style {
    Style {
        position_type: PositionType::Absolute,
        left: Val::Px(rect.min.x),
        top: Val::Px(rect.min.y),
        width: Val::Px(rect.width()),
        height: Val::Px(rect.height()),
        ..default()
    }
}

/// Updates node placement fields of `style` to cover `rect`.
pub fn place_style(style: &mut Style, rect: Rect) {
    style.left = Val::Px(rect.min.x);
    style.top = Val::Px(rect.min.y);
    style.width = Val::Px(rect.width());
    style.height = Val::Px(rect.height());
}

fn update_screen_layout(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut layout: ResMut<ScreenLayout>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    let next = ScreenLayout::compute(size);
    if *layout != next {
        *layout = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_tiles(layout: &ScreenLayout) {
        let bounds = Rect::new(0.0, 0.0, layout.window.x, layout.window.y);
        let panels = layout.panels();
        for (i, a) in panels.iter().enumerate() {
            assert!(a.width() > 0.0 && a.height() > 0.0, "panel {} is empty", i);
            assert_eq!(bounds.union(*a), bounds, "panel {} leaves the window", i);
            for b in panels.iter().skip(i + 1) {
                assert!(a.intersect(*b).is_empty(), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_design_layout_tiles() {
        assert_tiles(&ScreenLayout::compute(DESIGN_SIZE));
    }

    #[test]
    fn test_resized_layouts_tile() {
        assert_tiles(&ScreenLayout::compute(Vec2::new(1920.0, 1080.0)));
        assert_tiles(&ScreenLayout::compute(Vec2::new(800.0, 600.0)));
    }

    #[test]
    fn test_tiny_window_clamped() {
        let layout = ScreenLayout::compute(Vec2::new(200.0, 100.0));
        assert_eq!(layout.window, MIN_SIZE);
    }

    #[test]
    fn test_to_world() {
        let layout = ScreenLayout::compute(DESIGN_SIZE);
        assert_eq!(layout.to_world(Vec2::ZERO), Vec2::new(-600.0, 400.0));
        assert_eq!(layout.to_world(DESIGN_SIZE / 2.0), Vec2::ZERO);
    }

    #[test]
    fn test_place_in_orientation() {
        let layout = ScreenLayout::compute(DESIGN_SIZE);
        let south_west = layout.place_in(layout.map, Vec2::ZERO);
        let north_east = layout.place_in(layout.map, Vec2::ONE);
        assert!(north_east.x > south_west.x);
        assert!(north_east.y > south_west.y);
    }

    #[test]
    fn test_log_lines_positive() {
        assert!(ScreenLayout::compute(DESIGN_SIZE).log_lines() >= 10);
        assert!(ScreenLayout::compute(MIN_SIZE).log_lines() >= 1);
    }
}
