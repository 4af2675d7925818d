//! View buttons, controls guide and crosshair.

use crate::{
    ViewerState,
    ui::{
        cameras::{ViewCommand, ViewMode},
        components::{
            DOLLHOUSE_BUTTON, DOLLHOUSE_BUTTON_HOVERED, FPS_BUTTON, FPS_BUTTON_HOVERED,
            PANEL_BACKGROUND, TEXT_COLOR,
        },
    },
};
use app::LOG_VIEW;
use bevy::{input_focus::InputFocus, prelude::*};

pub(super) struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(ViewerState::Exploring), spawn_hud)
            .add_systems(
                Update,
                (handle_button_interactions, update_crosshair_visibility)
                    .run_if(in_state(ViewerState::Exploring)),
            );
    }
}

/// Marker component for HUD entities
#[derive(Component)]
pub(super) struct Hud;

#[derive(Component)]
pub(super) struct Crosshair;

/// Component identifying the view a button switches to
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudButton {
    Dollhouse,
    Fps,
}

impl HudButton {
    fn label(self) -> &'static str {
        match self {
            Self::Dollhouse => "Dollhouse View",
            Self::Fps => "FPS View",
        }
    }

    fn command(self) -> ViewCommand {
        match self {
            Self::Dollhouse => ViewCommand::SwitchToDollhouse,
            Self::Fps => ViewCommand::SwitchToFps,
        }
    }

    fn color(self, hovered: bool) -> Color {
        match (self, hovered) {
            (Self::Dollhouse, false) => DOLLHOUSE_BUTTON,
            (Self::Dollhouse, true) => DOLLHOUSE_BUTTON_HOVERED,
            (Self::Fps, false) => FPS_BUTTON,
            (Self::Fps, true) => FPS_BUTTON_HOVERED,
        }
    }
}

const GUIDE: [(&str, &str); 4] = [
    ("WASD", "Move"),
    ("SPACE", "Jump"),
    ("SHIFT", "Sprint (2.5x speed)"),
    ("MOUSE", "Look around"),
];

fn spawn_hud(mut commands: Commands) {
    // Buttons, top left
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Px(16.0),
                column_gap: Val::Px(8.0),
                ..default()
            },
            Hud,
            Name::new("HUD Buttons"),
        ))
        .with_children(|parent| {
            for button in [HudButton::Dollhouse, HudButton::Fps] {
                parent
                    .spawn((
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BorderRadius::all(Val::Px(8.0)),
                        BackgroundColor(button.color(false)),
                        button,
                    ))
                    .with_children(|label| {
                        label.spawn((
                            Text::new(button.label()),
                            TextFont {
                                font_size: 16.0,
                                ..default()
                            },
                            TextColor(TEXT_COLOR),
                        ));
                    });
            }
        });

    // Controls guide, bottom left
    let mut guide = GUIDE
        .iter()
        .map(|(key, action)| format!("{key} - {action}"))
        .collect::<Vec<_>>();
    guide.push("Click anywhere to lock the cursor in FPS view".to_string());
    guide.push("C toggles the view, ESC releases the cursor".to_string());

    commands.spawn((
        Text::new(guide.join("\n")),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(TEXT_COLOR),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(16.0),
            left: Val::Px(16.0),
            padding: UiRect::all(Val::Px(16.0)),
            ..default()
        },
        BorderRadius::all(Val::Px(8.0)),
        BackgroundColor(PANEL_BACKGROUND),
        Hud,
        Name::new("Controls Guide"),
    ));

    // Crosshair, centred
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Inherited,
            Crosshair,
            Hud,
            Name::new("Crosshair"),
        ))
        .with_children(|parent| {
            let color = BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.6));
            parent.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(2.0),
                    height: Val::Px(16.0),
                    ..default()
                },
                color,
            ));
            parent.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(16.0),
                    height: Val::Px(2.0),
                    ..default()
                },
                color,
            ));
        });
}

/// Handles button interactions (hover, press) and sends view commands
fn handle_button_interactions(
    mut input_focus: Option<ResMut<InputFocus>>,
    mut interaction_query: Query<
        (Entity, &Interaction, &HudButton, &mut BackgroundColor),
        Changed<Interaction>,
    >,
    mut view_commands: MessageWriter<ViewCommand>,
) {
    for (entity, interaction, button, mut color) in &mut interaction_query {
        match *interaction {
            Interaction::Pressed => {
                if let Some(focus) = input_focus.as_mut() {
                    focus.set(entity);
                }
                *color = button.color(true).into();
                info!(target: LOG_VIEW, "{} button pressed", button.label());
                view_commands.write(button.command());
            }
            Interaction::Hovered => {
                *color = button.color(true).into();
            }
            Interaction::None => {
                *color = button.color(false).into();
            }
        }
    }
}

fn update_crosshair_visibility(
    mode: Res<ViewMode>,
    mut crosshair: Query<&mut Visibility, With<Crosshair>>,
) {
    if !mode.is_changed() {
        return;
    }
    let visibility = match *mode {
        ViewMode::Fps => Visibility::Inherited,
        ViewMode::Dollhouse => Visibility::Hidden,
    };
    for mut current in &mut crosshair {
        current.set_if_neq(visibility);
    }
}
