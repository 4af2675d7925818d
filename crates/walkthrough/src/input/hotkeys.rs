//! Keyboard shortcuts for the view switch and pointer release.

use crate::{
    ViewerState,
    ui::cameras::{CursorState, ViewCommand, ViewMode},
};
use app::LOG_INPUT;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

pub struct HotkeyPlugin;

impl Plugin for HotkeyPlugin {
    fn build(&self, app: &mut App) {
        app.add_input_context::<ViewerContext>()
            .add_systems(OnEnter(ViewerState::Exploring), spawn_viewer_context)
            .add_observer(handle_toggle_view)
            .add_observer(handle_release_cursor);
    }
}

/// Input context active while exploring the model.
#[derive(Component, Default)]
struct ViewerContext;

/// Switch between FPS and dollhouse view
#[derive(Debug, InputAction)]
#[action_output(bool)]
struct ToggleView;

/// Give the pointer back to the desktop
#[derive(Debug, InputAction)]
#[action_output(bool)]
struct ReleaseCursor;

fn spawn_viewer_context(mut commands: Commands) {
    commands.spawn((
        Name::new("Viewer Input Context"),
        ViewerContext,
        actions!(
            ViewerContext[
                (
                    Action::<ToggleView>::default(),
                    bindings![KeyCode::KeyC],
                ),
                (
                    Action::<ReleaseCursor>::default(),
                    bindings![KeyCode::Escape],
                ),
            ]
        ),
    ));

    info!(target: LOG_INPUT, "Viewer hotkeys initialized");
}

fn handle_toggle_view(
    _trigger: On<Start<ToggleView>>,
    mode: Res<ViewMode>,
    mut commands: MessageWriter<ViewCommand>,
) {
    let command = match *mode {
        ViewMode::Fps => ViewCommand::SwitchToDollhouse,
        ViewMode::Dollhouse => ViewCommand::SwitchToFps,
    };
    debug!(target: LOG_INPUT, "Toggle view hotkey: {command:?}");
    commands.write(command);
}

fn handle_release_cursor(_trigger: On<Start<ReleaseCursor>>, mut cursor: ResMut<CursorState>) {
    if *cursor != CursorState::FREE {
        *cursor = CursorState::FREE;
        debug!(target: LOG_INPUT, "Pointer released");
    }
}
