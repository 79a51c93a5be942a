//! Unit rendering: markers, movement and alert rings.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crisis_core::Simulation;
use crisis_events::{Nation, UnitMarker, UnitStatus, UnitType};

use crate::layout::ScreenLayout;
use crate::palette;
use crate::sim_runner::CrisisSet;
use crate::world::MapView;

/// Plugin for unit markers.
pub struct UnitPlugin;

impl Plugin for UnitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UnitEntities>().add_systems(
            Update,
            (sync_units_with_state, interpolate_unit_movement, draw_alert_rings)
                .chain()
                .in_set(CrisisSet::Draw),
        );
    }
}

/// Visual representation of a unit.
#[derive(Component)]
pub struct VisualUnit {
    pub unit_id: u32,
    pub owner: Nation,
    pub unit_type: UnitType,
    pub status: UnitStatus,
    /// Target position for movement interpolation.
    pub target_position: Vec2,
    /// Movement speed in pixels per second.
    pub move_speed: f32,
}

/// Map of unit IDs to their entities.
#[derive(Resource, Default)]
pub struct UnitEntities {
    pub map: HashMap<u32, Entity>,
}

/// Marker size for a unit type.
pub fn marker_size(unit_type: UnitType) -> Vec2 {
    match unit_type {
        UnitType::Carrier => Vec2::new(18.0, 10.0),
        UnitType::Submarine => Vec2::new(14.0, 6.0),
        UnitType::AirBase => Vec2::new(12.0, 12.0),
        UnitType::MissileSite => Vec2::new(8.0, 16.0),
    }
}

/// Spreads units sharing a site so they do not stack.
fn stack_offset(slot: usize) -> Vec2 {
    let col = (slot % 3) as f32 - 1.0;
    let row = (slot / 3) as f32;
    Vec2::new(col * 20.0, -row * 16.0 - 14.0)
}

fn sync_units_with_state(
    mut commands: Commands,
    sim: Res<Simulation>,
    layout: Res<ScreenLayout>,
    view: Res<MapView>,
    mut unit_entities: ResMut<UnitEntities>,
    mut units: Query<&mut VisualUnit>,
) {
    let live: HashSet<u32> = sim.state.units.iter().map(|u| u.unit_id).collect();

    let stale: Vec<u32> = unit_entities
        .map
        .keys()
        .filter(|id| !live.contains(*id))
        .copied()
        .collect();
    for id in stale {
        if let Some(entity) = unit_entities.map.remove(&id) {
            commands.entity(entity).despawn_recursive();
        }
    }

    let mut per_site: HashMap<&str, usize> = HashMap::new();
    for unit in &sim.state.units {
        let slot = per_site.entry(unit.site.as_str()).or_insert(0);
        let target = view.to_screen(&layout, unit.position) + stack_offset(*slot);
        *slot += 1;

        if let Some(&entity) = unit_entities.map.get(&unit.unit_id) {
            if let Ok(mut visual) = units.get_mut(entity) {
                // Ids restart with the world, so an id can name a new unit
                if visual.owner == unit.owner && visual.unit_type == unit.unit_type {
                    visual.target_position = target;
                    visual.status = unit.status;
                    continue;
                }
            }
            commands.entity(entity).despawn_recursive();
        }
        let entity = spawn_unit(&mut commands, unit, target);
        unit_entities.map.insert(unit.unit_id, entity);
    }
}

fn spawn_unit(commands: &mut Commands, unit: &UnitMarker, position: Vec2) -> Entity {
    tracing::debug!("Spawning marker for {} at {}", unit.label(), unit.site);
    commands
        .spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: palette::nation_color(unit.owner),
                    custom_size: Some(marker_size(unit.unit_type)),
                    ..default()
                },
                transform: Transform::from_xyz(position.x, position.y, 1.0),
                ..default()
            },
            VisualUnit {
                unit_id: unit.unit_id,
                owner: unit.owner,
                unit_type: unit.unit_type,
                status: unit.status,
                target_position: position,
                move_speed: 240.0,
            },
        ))
        .id()
}

/// Smoothly moves markers toward their targets.
fn interpolate_unit_movement(time: Res<Time>, mut units: Query<(&mut Transform, &VisualUnit)>) {
    for (mut transform, unit) in units.iter_mut() {
        let current = transform.translation.truncate();
        let target = unit.target_position;
        let distance = current.distance(target);

        if distance > 0.5 {
            let direction = (target - current) / distance;
            let movement = direction * unit.move_speed * time.delta_seconds();

            if movement.length() > distance {
                transform.translation = target.extend(transform.translation.z);
            } else {
                transform.translation += movement.extend(0.0);
            }
        }
    }
}

fn draw_alert_rings(time: Res<Time>, units: Query<(&Transform, &VisualUnit)>, mut gizmos: Gizmos) {
    let pulse = 1.0 + 0.25 * (time.elapsed_seconds() * 4.0).sin();
    for (transform, unit) in units.iter() {
        if unit.status == UnitStatus::HighAlert {
            gizmos.circle_2d(transform.translation.truncate(), 14.0 * pulse, palette::ALERT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_entities_default() {
        let entities = UnitEntities::default();
        assert!(entities.map.is_empty());
    }

    #[test]
    fn test_stack_offsets_distinct() {
        let offsets: Vec<_> = (0..6).map(stack_offset).collect();
        for (i, a) in offsets.iter().enumerate() {
            for b in offsets.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert_eq!(stack_offset(1).x, 0.0);
    }

    #[test]
    fn test_marker_sizes_positive() {
        for unit_type in [
            UnitType::Carrier,
            UnitType::Submarine,
            UnitType::AirBase,
            UnitType::MissileSite,
        ] {
            let size = marker_size(unit_type);
            assert!(size.x > 0.0 && size.y > 0.0);
        }
    }
}
