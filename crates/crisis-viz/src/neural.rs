//! Neural activity panels, one per president.
//!
//! Targets come from `crisis_core::activations`; the displayed values ease
//! toward them so the panels pulse rather than jump between ticks. A strip
//! under each panel plots the last ticks of two regions, captioned with the
//! most active region and what it stands for.

use bevy::prelude::*;

use crisis_core::neural::CONNECTIONS;
use crisis_core::{
    activations, ActivationHistory, ActivationLevel, BrainRegion, RegionActivations, Simulation,
};
use crisis_events::ActorId;

use crate::layout::ScreenLayout;
use crate::palette;
use crate::sim_runner::{CrisisSet, NeuralView};

/// Fraction of the gap closed per frame at 60 fps.
const EASE_RATE: f32 = 0.05;
/// Activations above this get a percentage label.
const LABEL_THRESHOLD: f32 = 0.1;

/// Plugin for the neural panels.
pub struct NeuralPlugin;

impl Plugin for NeuralPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DisplayedActivations>()
            .init_resource::<ActivationHistories>()
            .add_systems(Startup, spawn_neural_panels)
            .add_systems(
                Update,
                (
                    ease_activations,
                    record_history,
                    place_neural_panels,
                    draw_neural_panels,
                    draw_history,
                    update_region_labels,
                    update_dominant_captions,
                )
                    .chain()
                    .in_set(CrisisSet::Draw),
            );
    }
}

/// Activations currently drawn, indexed by `ActorId::index`.
#[derive(Resource, Debug, Clone, Default)]
pub struct DisplayedActivations(pub [RegionActivations; 2]);

/// Regions plotted in the history strip, with their line colors.
const PLOTTED: [(BrainRegion, Color); 2] = [
    (BrainRegion::Hypothalamus, palette::ALERT),
    (BrainRegion::Prefrontal, palette::HEADER),
];

/// Target activations sampled once per tick, indexed by `ActorId::index`.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActivationHistories {
    pub panels: [ActivationHistory; 2],
    last_tick: u64,
}

impl ActivationHistories {
    /// Samples both actors if the tick moved since the last sample.
    ///
    /// A tick lower than the last one means the run restarted, so the old
    /// samples are dropped first. Returns whether a sample was taken.
    pub fn record(&mut self, sim: &Simulation) -> bool {
        let tick = sim.state.tick;
        if tick < self.last_tick {
            for history in self.panels.iter_mut() {
                history.clear();
            }
        } else if tick == self.last_tick && !self.panels[0].is_empty() {
            return false;
        }
        self.last_tick = tick;
        for actor in ActorId::ALL {
            let state = sim.state.actor(actor);
            self.panels[actor.index()].push(activations(state.stress(), state.approval()));
        }
        true
    }
}

/// Background sprite of a panel.
#[derive(Component)]
pub struct NeuralPanel(pub ActorId);

/// Title text of a panel.
#[derive(Component)]
pub struct NeuralTitle(pub ActorId);

/// Caption naming the most active region of a panel.
#[derive(Component)]
pub struct DominantCaption(pub ActorId);

/// Per-region label on a panel.
#[derive(Component)]
pub struct RegionLabel {
    pub actor: ActorId,
    pub region: BrainRegion,
}

/// Per-frame easing rate for a frame of `dt` seconds.
pub fn frame_rate_adjusted(rate: f32, dt: f32) -> f32 {
    1.0 - (1.0 - rate).powf(dt * 60.0)
}

/// Node radius for an activation.
pub fn node_radius(panel: Rect, activation: f32) -> f32 {
    let base = panel.width().min(panel.height()) * 0.045;
    base * (1.0 + activation.clamp(0.0, 1.0))
}

/// Label text for a region, or empty when quiet.
pub fn region_label(region: BrainRegion, activation: f32) -> String {
    if activation > LABEL_THRESHOLD {
        format!("{} {}%", region.abbreviation(), (activation * 100.0).round() as u32)
    } else {
        region.abbreviation().to_string()
    }
}

/// Most active region, or `None` when every region is quiet.
pub fn dominant_region(acts: &RegionActivations) -> Option<BrainRegion> {
    acts.iter()
        .filter(|&(_, v)| v > LABEL_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(region, _)| region)
}

pub fn dominant_caption(acts: &RegionActivations) -> String {
    match dominant_region(acts) {
        Some(region) => format!("{}: {}", region.name(), region.description()),
        None => "Resting".to_string(),
    }
}

/// History samples as unit-square points, oldest at the left edge.
pub fn sparkline(history: &ActivationHistory, region: BrainRegion) -> Vec<Vec2> {
    let span = history.capacity().saturating_sub(1).max(1) as f32;
    history
        .series(region)
        .enumerate()
        .map(|(i, v)| Vec2::new(i as f32 / span, v.clamp(0.0, 1.0)))
        .collect()
}

fn spawn_neural_panels(mut commands: Commands) {
    for actor in ActorId::ALL {
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: palette::PANEL,
                    custom_size: Some(Vec2::ONE),
                    ..default()
                },
                transform: Transform::from_xyz(0.0, 0.0, -5.0),
                ..default()
            },
            NeuralPanel(actor),
        ));

        commands.spawn((
            Text2dBundle {
                text: Text::from_section(
                    format!("{} Neural Activity", actor.leader_title()),
                    TextStyle {
                        font_size: 14.0,
                        color: palette::HEADER,
                        ..default()
                    },
                ),
                transform: Transform::from_xyz(0.0, 0.0, 3.0),
                ..default()
            },
            NeuralTitle(actor),
        ));

        commands.spawn((
            Text2dBundle {
                text: Text::from_section(
                    "",
                    TextStyle {
                        font_size: 11.0,
                        color: palette::TEXT_DIM,
                        ..default()
                    },
                ),
                transform: Transform::from_xyz(0.0, 0.0, 3.0),
                ..default()
            },
            DominantCaption(actor),
        ));

        for region in BrainRegion::ALL {
            commands.spawn((
                Text2dBundle {
                    text: Text::from_section(
                        region.abbreviation(),
                        TextStyle {
                            font_size: 11.0,
                            color: palette::TEXT,
                            ..default()
                        },
                    ),
                    transform: Transform::from_xyz(0.0, 0.0, 3.0),
                    ..default()
                },
                RegionLabel { actor, region },
            ));
        }
    }
}

fn ease_activations(
    time: Res<Time>,
    sim: Res<Simulation>,
    mut displayed: ResMut<DisplayedActivations>,
) {
    let rate = frame_rate_adjusted(EASE_RATE, time.delta_seconds());
    for actor in ActorId::ALL {
        let state = sim.state.actor(actor);
        let target = activations(state.stress(), state.approval());
        displayed.0[actor.index()].ease_toward(&target, rate);
    }
}

fn record_history(sim: Res<Simulation>, mut histories: ResMut<ActivationHistories>) {
    if sim.is_changed() {
        histories.record(&sim);
    }
}

fn place_neural_panels(
    layout: Res<ScreenLayout>,
    mut panels: Query<(&mut Transform, &mut Sprite, &NeuralPanel)>,
    mut titles: Query<(&mut Transform, &NeuralTitle), Without<NeuralPanel>>,
) {
    if !layout.is_changed() {
        return;
    }
    for (mut transform, mut sprite, panel) in panels.iter_mut() {
        let rect = layout.neural[panel.0.index()];
        transform.translation = layout.world_center(rect).extend(-5.0);
        sprite.custom_size = Some(rect.size());
    }
    for (mut transform, title) in titles.iter_mut() {
        let rect = layout.neural[title.0.index()];
        let top = layout.to_world(Vec2::new(rect.center().x, rect.min.y + 12.0));
        transform.translation = top.extend(3.0);
    }
}

/// Area of a panel used for nodes, below the title.
fn node_area(panel: Rect) -> Rect {
    Rect::new(panel.min.x + 10.0, panel.min.y + 28.0, panel.max.x - 10.0, panel.max.y - 62.0)
}

/// Strip along the bottom of a panel holding the history plot.
fn history_strip(panel: Rect) -> Rect {
    Rect::new(panel.min.x + 10.0, panel.max.y - 40.0, panel.max.x - 10.0, panel.max.y - 6.0)
}

fn draw_neural_panels(
    layout: Res<ScreenLayout>,
    view: Res<NeuralView>,
    displayed: Res<DisplayedActivations>,
    mut gizmos: Gizmos,
) {
    for actor in ActorId::ALL {
        let panel = layout.neural[actor.index()];
        let area = node_area(panel);
        let acts = &displayed.0[actor.index()];
        let pos = |region: BrainRegion| {
            let (x, y) = region.position(view.layout);
            layout.place_in(area, Vec2::new(x, y))
        };

        for (a, b) in CONNECTIONS {
            let strength = (acts.get(a) + acts.get(b)) / 2.0;
            let color = palette::CONNECTION.with_alpha(0.2 + 0.6 * strength);
            gizmos.line_2d(pos(a), pos(b), color);
        }

        for (region, activation) in acts.iter() {
            let color = palette::activation_color(ActivationLevel::from_activation(activation));
            let radius = node_radius(panel, activation);
            gizmos.circle_2d(pos(region), radius, color);
            if activation > LABEL_THRESHOLD {
                gizmos.circle_2d(pos(region), radius * activation, color);
            }
        }
    }
}

fn draw_history(
    layout: Res<ScreenLayout>,
    histories: Res<ActivationHistories>,
    mut gizmos: Gizmos,
) {
    for actor in ActorId::ALL {
        let strip = history_strip(layout.neural[actor.index()]);
        let history = &histories.panels[actor.index()];
        gizmos.line_2d(
            layout.place_in(strip, Vec2::ZERO),
            layout.place_in(strip, Vec2::X),
            palette::CONNECTION,
        );
        if history.len() < 2 {
            continue;
        }
        for (region, color) in PLOTTED {
            let points = sparkline(history, region)
                .into_iter()
                .map(|p| layout.place_in(strip, p));
            gizmos.linestrip_2d(points, color);
        }
    }
}

fn update_dominant_captions(
    layout: Res<ScreenLayout>,
    displayed: Res<DisplayedActivations>,
    mut captions: Query<(&mut Transform, &mut Text, &DominantCaption)>,
) {
    for (mut transform, mut text, caption) in captions.iter_mut() {
        let panel = layout.neural[caption.0.index()];
        let anchor = Vec2::new(panel.center().x, history_strip(panel).min.y - 10.0);
        transform.translation = layout.to_world(anchor).extend(3.0);

        let value = dominant_caption(&displayed.0[caption.0.index()]);
        if let Some(section) = text.sections.first_mut() {
            if section.value != value {
                section.value = value;
            }
        }
    }
}

fn update_region_labels(
    layout: Res<ScreenLayout>,
    view: Res<NeuralView>,
    displayed: Res<DisplayedActivations>,
    mut labels: Query<(&mut Transform, &mut Text, &RegionLabel)>,
) {
    for (mut transform, mut text, label) in labels.iter_mut() {
        let panel = layout.neural[label.actor.index()];
        let activation = displayed.0[label.actor.index()].get(label.region);
        let (x, y) = label.region.position(view.layout);
        let node = layout.place_in(node_area(panel), Vec2::new(x, y));
        let offset = node_radius(panel, activation) + 8.0;
        transform.translation = (node - Vec2::new(0.0, offset)).extend(3.0);

        let value = region_label(label.region, activation);
        if let Some(section) = text.sections.first_mut() {
            if section.value != value {
                section.value = value;
            }
        }
    }
}
