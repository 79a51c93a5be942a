//! UI overlays: status bar, tension indicator, president panels, event log,
//! outcome banner and control buttons.

use bevy::prelude::*;

use crisis_core::{Actor, EventLog, LoopControl, Simulation};
use crisis_events::{ActorId, CrisisClock, Outcome};

use crate::layout::{absolute_style, place_style, ScreenLayout};
use crate::palette;
use crate::sim_runner::{ControlButton, ControlCommand, CrisisSet};

/// Decisions listed on a president panel.
const PANEL_DECISIONS: usize = 3;

/// Plugin for UI overlay rendering.
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_overlay).add_systems(
            Update,
            (
                place_panels,
                update_status_bar,
                update_tension_indicator,
                update_president_panels,
                update_event_log,
                update_outcome_banner,
                style_buttons,
            )
                .in_set(CrisisSet::Draw),
        );
    }
}

/// Which layout rect a UI node follows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSlot {
    StatusBar,
    Tension,
    President(ActorId),
    EventLog,
    Controls,
    /// Centred over the map
    Banner,
}

impl PanelSlot {
    pub fn rect(self, layout: &ScreenLayout) -> Rect {
        match self {
            PanelSlot::StatusBar => layout.status_bar,
            PanelSlot::Tension => layout.tension,
            PanelSlot::President(actor) => layout.presidents[actor.index()],
            PanelSlot::EventLog => layout.event_log,
            PanelSlot::Controls => layout.controls,
            PanelSlot::Banner => {
                let map = layout.map;
                let center = map.center();
                Rect::from_center_size(center, Vec2::new(map.width() * 0.7, 70.0))
            }
        }
    }
}

#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct TensionText;

#[derive(Component)]
pub struct TensionFill;

#[derive(Component)]
pub struct PresidentText(pub ActorId);

#[derive(Component)]
pub struct EventLogText;

#[derive(Component)]
pub struct OutcomeBanner;

#[derive(Component)]
pub struct OutcomeText;

/// Label of the pause button, which flips to "Resume".
#[derive(Component)]
pub struct PauseLabel;

fn text_style(size: f32, color: Color) -> TextStyle {
    TextStyle {
        font_size: size,
        color,
        ..default()
    }
}

fn panel_style(rect: Rect) -> Style {
    Style {
        padding: UiRect::all(Val::Px(8.0)),
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(4.0),
        ..absolute_style(rect)
    }
}

fn setup_overlay(mut commands: Commands, layout: Res<ScreenLayout>) {
    // Status bar
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    align_items: AlignItems::Center,
                    ..panel_style(layout.status_bar)
                },
                background_color: palette::PANEL.into(),
                ..default()
            },
            PanelSlot::StatusBar,
        ))
        .with_children(|parent| {
            parent.spawn((
                TextBundle::from_section("", text_style(14.0, palette::TEXT)),
                StatusText,
            ));
        });

    // Tension indicator
    commands
        .spawn((
            NodeBundle {
                style: panel_style(layout.tension),
                background_color: palette::PANEL.into(),
                ..default()
            },
            PanelSlot::Tension,
        ))
        .with_children(|parent| {
            parent.spawn((
                TextBundle::from_section("", text_style(14.0, palette::TEXT)),
                TensionText,
            ));
            parent
                .spawn(NodeBundle {
                    style: Style {
                        width: Val::Percent(100.0),
                        height: Val::Px(14.0),
                        ..default()
                    },
                    background_color: Color::srgb(0.2, 0.2, 0.22).into(),
                    ..default()
                })
                .with_children(|bar| {
                    bar.spawn((
                        NodeBundle {
                            style: Style {
                                width: Val::Percent(50.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            background_color: palette::tension_color(50.0).into(),
                            ..default()
                        },
                        TensionFill,
                    ));
                });
        });

    // President panels
    for actor in ActorId::ALL {
        commands
            .spawn((
                NodeBundle {
                    style: panel_style(layout.presidents[actor.index()]),
                    background_color: palette::PANEL.into(),
                    ..default()
                },
                PanelSlot::President(actor),
            ))
            .with_children(|parent| {
                parent.spawn(TextBundle::from_section(
                    actor.leader_title(),
                    text_style(15.0, palette::nation_color(actor.nation())),
                ));
                parent.spawn((
                    TextBundle::from_section("", text_style(13.0, palette::TEXT)),
                    PresidentText(actor),
                ));
            });
    }

    // Event log
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    overflow: Overflow::clip(),
                    ..panel_style(layout.event_log)
                },
                background_color: palette::PANEL.into(),
                ..default()
            },
            PanelSlot::EventLog,
        ))
        .with_children(|parent| {
            parent.spawn(TextBundle::from_section(
                "Event Log",
                text_style(15.0, palette::HEADER),
            ));
            parent.spawn((
                TextBundle::from_section("", text_style(12.0, palette::TEXT)),
                EventLogText,
            ));
        });

    // Control buttons
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(8.0),
                    justify_content: JustifyContent::SpaceBetween,
                    ..absolute_style(layout.controls)
                },
                ..default()
            },
            PanelSlot::Controls,
        ))
        .with_children(|parent| {
            for (command, label) in [
                (ControlCommand::TogglePause, "Pause"),
                (ControlCommand::SpeedDown, "Speed Down"),
                (ControlCommand::SpeedUp, "Speed Up"),
            ] {
                parent
                    .spawn((
                        ButtonBundle {
                            style: Style {
                                flex_grow: 1.0,
                                justify_content: JustifyContent::Center,
                                align_items: AlignItems::Center,
                                ..default()
                            },
                            background_color: palette::BUTTON.into(),
                            ..default()
                        },
                        ControlButton(command),
                    ))
                    .with_children(|button| {
                        let mut text =
                            button.spawn(TextBundle::from_section(label, text_style(14.0, palette::TEXT)));
                        if command == ControlCommand::TogglePause {
                            text.insert(PauseLabel);
                        }
                    });
            }
        });

    // Outcome banner, hidden until an outcome holds
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..absolute_style(PanelSlot::Banner.rect(&layout))
                },
                background_color: Color::srgba(0.0, 0.0, 0.0, 0.85).into(),
                visibility: Visibility::Hidden,
                z_index: ZIndex::Global(10),
                ..default()
            },
            PanelSlot::Banner,
            OutcomeBanner,
        ))
        .with_children(|parent| {
            parent.spawn((
                TextBundle::from_section("", text_style(28.0, palette::ALERT)),
                OutcomeText,
            ));
        });
}

fn place_panels(layout: Res<ScreenLayout>, mut panels: Query<(&PanelSlot, &mut Style)>) {
    if !layout.is_changed() {
        return;
    }
    for (slot, mut style) in panels.iter_mut() {
        place_style(&mut style, slot.rect(&layout));
    }
}

/// Status bar contents.
pub fn status_line(sim: &Simulation, control: &LoopControl) -> String {
    format!(
        "Tick {}  |  {}  |  {}  |  Seed {}  |  [Space] pause  [+/-] speed  [R] restart  [L] layout  [F3/F4] debug",
        sim.state.tick,
        CrisisClock::from_tick(sim.state.tick),
        control.status_label(),
        sim.seed(),
    )
}

/// President panel body.
pub fn president_lines(actor: &Actor) -> String {
    let current = actor
        .current_action
        .map(|k| k.label())
        .unwrap_or("none");
    let recent: Vec<&str> = actor
        .recent_decisions()
        .take(PANEL_DECISIONS)
        .map(|k| k.label())
        .collect();
    format!(
        "Approval: {:.1}%\nStress: {:.1}%\nAction: {}\nRecent: {}",
        actor.approval(),
        actor.stress(),
        current,
        if recent.is_empty() {
            "-".to_string()
        } else {
            recent.join(", ")
        }
    )
}

/// Newest `lines` log entries, oldest first.
pub fn log_text(log: &EventLog, lines: usize) -> String {
    log.recent(lines)
        .map(|e| e.display_line())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Banner text for an outcome.
pub fn banner_text(outcome: Outcome) -> String {
    outcome.title().to_uppercase()
}

fn update_status_bar(
    sim: Res<Simulation>,
    control: Res<LoopControl>,
    mut texts: Query<&mut Text, With<StatusText>>,
    mut pause_labels: Query<&mut Text, (With<PauseLabel>, Without<StatusText>)>,
) {
    if !sim.is_changed() && !control.is_changed() {
        return;
    }
    let line = status_line(&sim, &control);
    for mut text in texts.iter_mut() {
        text.sections[0].value.clone_from(&line);
    }
    let label = if control.paused { "Resume" } else { "Pause" };
    for mut text in pause_labels.iter_mut() {
        text.sections[0].value = label.to_string();
    }
}

fn update_tension_indicator(
    sim: Res<Simulation>,
    mut texts: Query<&mut Text, With<TensionText>>,
    mut fills: Query<(&mut Style, &mut BackgroundColor), With<TensionFill>>,
) {
    if !sim.is_changed() {
        return;
    }
    let tension = sim.state.tension();
    for mut text in texts.iter_mut() {
        text.sections[0].value = format!(
            "Global Tension: {:.1}  ({})",
            tension,
            sim.state.tension_band().label()
        );
        text.sections[0].style.color = palette::tension_color(tension);
    }
    for (mut style, mut color) in fills.iter_mut() {
        style.width = Val::Percent(tension);
        *color = palette::tension_color(tension).into();
    }
}

fn update_president_panels(sim: Res<Simulation>, mut texts: Query<(&mut Text, &PresidentText)>) {
    if !sim.is_changed() {
        return;
    }
    for (mut text, panel) in texts.iter_mut() {
        text.sections[0].value = president_lines(sim.state.actor(panel.0));
    }
}

fn update_event_log(
    sim: Res<Simulation>,
    layout: Res<ScreenLayout>,
    mut texts: Query<&mut Text, With<EventLogText>>,
) {
    if !sim.is_changed() && !layout.is_changed() {
        return;
    }
    let body = log_text(&sim.state.log, layout.log_lines());
    for mut text in texts.iter_mut() {
        text.sections[0].value.clone_from(&body);
    }
}

fn update_outcome_banner(
    sim: Res<Simulation>,
    mut banners: Query<&mut Visibility, With<OutcomeBanner>>,
    mut texts: Query<&mut Text, With<OutcomeText>>,
) {
    if !sim.is_changed() {
        return;
    }
    let outcome = sim.outcome();
    for mut visibility in banners.iter_mut() {
        *visibility = if outcome.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if let Some(outcome) = outcome {
        for mut text in texts.iter_mut() {
            text.sections[0].value = banner_text(outcome);
        }
    }
}

fn style_buttons(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<ControlButton>)>,
) {
    for (interaction, mut color) in buttons.iter_mut() {
        *color = match interaction {
            Interaction::Pressed => palette::BUTTON_PRESSED,
            Interaction::Hovered => palette::BUTTON_HOVER,
            Interaction::None => palette::BUTTON,
        }
        .into();
    }
}
