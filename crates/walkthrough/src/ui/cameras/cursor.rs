//! Pointer capture for the primary window
//!
//! Systems request a state through [`CursorState`]; only
//! [`apply_cursor_state`] touches the window.

use app::LOG_VIEW;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

/// Resource tracking desired cursor state
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct CursorState {
    pub grab_mode: CursorGrabMode,
    pub visible: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self::FREE
    }
}

impl CursorState {
    pub const FREE: Self = Self {
        grab_mode: CursorGrabMode::None,
        visible: true,
    };

    pub const LOCKED: Self = Self {
        grab_mode: CursorGrabMode::Locked,
        visible: false,
    };

    pub fn is_locked(&self) -> bool {
        self.grab_mode == CursorGrabMode::Locked
    }
}

/// System that applies cursor state changes to the window
pub fn apply_cursor_state(
    cursor_state: Res<CursorState>,
    mut window_query: Query<(&mut Window, &mut CursorOptions), With<PrimaryWindow>>,
) {
    if !cursor_state.is_changed() {
        return;
    }

    let Ok((mut window, mut cursor)) = window_query.single_mut() else {
        return;
    };

    cursor.grab_mode = cursor_state.grab_mode;
    cursor.visible = cursor_state.visible;

    if cursor_state.grab_mode != CursorGrabMode::None {
        window.focused = true;
    }
    debug!(target: LOG_VIEW, "Cursor grab mode set to {:?}", cursor_state.grab_mode);
}

/// Requests capture when the viewport is clicked outside of any button.
pub fn lock_cursor_on_click(
    mouse: Res<ButtonInput<MouseButton>>,
    interactions: Query<&Interaction>,
    mut cursor: ResMut<CursorState>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    if interactions.iter().any(|i| *i != Interaction::None) {
        return;
    }
    cursor.set_if_neq(CursorState::LOCKED);
}
