//! World rendering: camera, map background and gazetteer locations.

use bevy::prelude::*;

use crisis_core::{Gazetteer, MapProjection, Simulation};

use crate::layout::ScreenLayout;
use crate::palette;
use crate::sim_runner::CrisisSet;

/// Plugin for the strategic map.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(palette::BACKGROUND))
            .init_resource::<MapView>()
            .add_systems(Startup, (setup_camera, spawn_map))
            .add_systems(
                Update,
                (sync_map_projection, place_map, draw_locations)
                    .chain()
                    .in_set(CrisisSet::Draw),
            );
    }
}

/// Marker for the main 2D camera.
#[derive(Component)]
pub struct MainCamera;

/// Marker for the ocean rectangle.
#[derive(Component)]
pub struct MapBackground;

/// Label for a gazetteer place.
#[derive(Component)]
pub struct LocationLabel {
    pub index: usize,
}

/// Projection and place list used for drawing.
#[derive(Resource, Debug, Clone)]
pub struct MapView {
    pub projection: MapProjection,
    pub gazetteer: Gazetteer,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            projection: MapProjection::default(),
            gazetteer: Gazetteer::new(),
        }
    }
}

impl MapView {
    /// Camera-space position of a projected point on the map panel.
    pub fn to_screen(&self, layout: &ScreenLayout, point: crisis_events::GeoPoint) -> Vec2 {
        let (x, y) = self.projection.project(point);
        layout.place_in(layout.map, Vec2::new(x, y))
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2dBundle::default(), MainCamera));
}

fn spawn_map(mut commands: Commands, view: Res<MapView>) {
    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: palette::OCEAN,
                custom_size: Some(Vec2::ONE),
                ..default()
            },
            transform: Transform::from_xyz(0.0, 0.0, -10.0),
            ..default()
        },
        MapBackground,
    ));

    for (index, (name, _)) in view.gazetteer.places().enumerate() {
        commands.spawn((
            Text2dBundle {
                text: Text::from_section(
                    name,
                    TextStyle {
                        font_size: 12.0,
                        color: palette::TEXT_DIM,
                        ..default()
                    },
                ),
                transform: Transform::from_xyz(0.0, 0.0, 2.0),
                ..default()
            },
            LocationLabel { index },
        ));
    }

    tracing::info!("Spawned map with {} locations", view.gazetteer.places().count());
}

/// Keeps the projection in line with the running configuration.
fn sync_map_projection(sim: Res<Simulation>, mut view: ResMut<MapView>) {
    let projection = MapProjection::from_config(&sim.config.map);
    if view.projection != projection {
        view.projection = projection;
    }
}

fn place_map(
    layout: Res<ScreenLayout>,
    view: Res<MapView>,
    mut background: Query<(&mut Transform, &mut Sprite), With<MapBackground>>,
    mut labels: Query<(&mut Transform, &LocationLabel), Without<MapBackground>>,
) {
    if !layout.is_changed() && !view.is_changed() {
        return;
    }

    let center = layout.world_center(layout.map);
    for (mut transform, mut sprite) in background.iter_mut() {
        transform.translation = center.extend(-10.0);
        sprite.custom_size = Some(layout.map.size());
    }

    let places: Vec<_> = view.gazetteer.places().collect();
    for (mut transform, label) in labels.iter_mut() {
        if let Some((_, point)) = places.get(label.index) {
            let pos = view.to_screen(&layout, *point) + Vec2::new(0.0, 12.0);
            transform.translation = pos.extend(2.0);
        }
    }
}

fn draw_locations(layout: Res<ScreenLayout>, view: Res<MapView>, mut gizmos: Gizmos) {
    for (_, point) in view.gazetteer.places() {
        let pos = view.to_screen(&layout, point);
        gizmos.circle_2d(pos, 4.0, palette::LOCATION);
    }

    let map = layout.map;
    let min = layout.to_world(Vec2::new(map.min.x, map.max.y));
    let max = layout.to_world(Vec2::new(map.max.x, map.min.y));
    let border = Color::srgba(0.5, 0.6, 0.7, 0.6);
    gizmos.line_2d(min, Vec2::new(max.x, min.y), border);
    gizmos.line_2d(Vec2::new(max.x, min.y), max, border);
    gizmos.line_2d(max, Vec2::new(min.x, max.y), border);
    gizmos.line_2d(Vec2::new(min.x, max.y), min, border);
}
