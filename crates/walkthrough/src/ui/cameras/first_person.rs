use super::{CursorState, ViewerCamera};
use crate::settings::ViewSettings;
use bevy::{
    input::mouse::MouseMotion,
    math::EulerRot,
    prelude::{MessageReader, *},
};
use std::f32::consts::TAU;

/// Stores current yaw/pitch for the first-person camera.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct FirstPersonView {
    pub yaw: f32,
    pub pitch: f32,
    pub sensitivity: f32,
    pub pitch_limit: f32,
}

impl FirstPersonView {
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: settings.mouse_sensitivity,
            pitch_limit: settings.pitch_limit,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    pub fn look(&mut self, delta: Vec2) {
        let delta = delta * self.sensitivity;
        self.yaw = (self.yaw - delta.x).rem_euclid(TAU);
        self.pitch = (self.pitch - delta.y).clamp(-self.pitch_limit, self.pitch_limit);
    }
}

/// Mouse look, only while the pointer is captured.
pub(super) fn update_first_person_view_from_input(
    mut mouse_motion: MessageReader<MouseMotion>,
    cursor: Res<CursorState>,
    mut view_query: Query<&mut FirstPersonView, With<ViewerCamera>>,
) {
    if !cursor.is_locked() {
        // Drain events so they don't accumulate while the pointer is free.
        mouse_motion.clear();
        return;
    }

    let Ok(mut view) = view_query.single_mut() else {
        mouse_motion.clear();
        return;
    };

    for motion in mouse_motion.read() {
        view.look(motion.delta);
    }
}

pub(super) fn apply_first_person_orientation(
    mut query: Query<
        (&FirstPersonView, &mut Transform),
        (With<ViewerCamera>, Changed<FirstPersonView>),
    >,
) {
    for (view, mut transform) in &mut query {
        transform.rotation = view.rotation();
    }
}

pub(super) fn set_view_from_rotation(view: &mut FirstPersonView, rotation: Quat) {
    let (yaw, pitch, _) = rotation.to_euler(EulerRot::YXZ);
    view.yaw = yaw;
    view.pitch = pitch.clamp(-view.pitch_limit, view.pitch_limit);
}
