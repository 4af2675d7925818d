mod cursor;
mod dollhouse;
mod first_person;
mod mode_handler;

use crate::{ViewerState, navigation::NavigationController, settings::ViewSettings};
use app::LOG_VIEW;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use settings::SettingsArc;

pub use cursor::CursorState;
use first_person::FirstPersonView;

/// Marker component for the single scene camera
#[derive(Component)]
pub struct ViewerCamera;

/// Resource tracking which view is currently active
#[derive(Resource, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum ViewMode {
    #[default]
    Fps,
    Dollhouse,
}

/// Request to change the active view, sent by HUD buttons and hotkeys.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    SwitchToDollhouse,
    SwitchToFps,
}

impl ViewCommand {
    pub fn target_mode(self) -> ViewMode {
        match self {
            Self::SwitchToDollhouse => ViewMode::Dollhouse,
            Self::SwitchToFps => ViewMode::Fps,
        }
    }
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewSystems {
    /// View switches
    Commands,
    /// Mouse look and orbit activation
    Look,
}

pub fn is_fps_active(mode: Res<ViewMode>) -> bool {
    *mode == ViewMode::Fps
}

/// Main camera plugin that coordinates the view modes
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanOrbitCameraPlugin)
            .add_message::<ViewCommand>()
            .init_resource::<ViewMode>()
            .init_resource::<CursorState>()
            .configure_sets(Update, (ViewSystems::Commands, ViewSystems::Look).chain())
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                mode_handler::handle_view_commands.in_set(ViewSystems::Commands),
            )
            .add_systems(
                Update,
                (
                    dollhouse::activate_orbit_after_delay,
                    (
                        cursor::lock_cursor_on_click,
                        first_person::update_first_person_view_from_input,
                        first_person::apply_first_person_orientation,
                    )
                        .chain()
                        .run_if(in_state(ViewerState::Exploring).and(is_fps_active)),
                )
                    .in_set(ViewSystems::Look),
            )
            .add_systems(
                Update,
                cursor::apply_cursor_state.after(ViewSystems::Look),
            );
    }
}

fn spawn_camera(mut commands: Commands, settings: Res<SettingsArc<ViewSettings>>) {
    commands.spawn((
        Name::new("Viewer Camera"),
        ViewerCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.field_of_view_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            ..default()
        }),
        Transform::from_translation(settings.fps_start()),
        FirstPersonView::new(&settings),
        NavigationController::default(),
    ));

    info!(target: LOG_VIEW, "Viewer camera spawned at {}", settings.fps_start());
}
