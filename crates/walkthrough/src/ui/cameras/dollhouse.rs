//! Overview orbit around the model.
//!
//! Orbit input is not enabled on the switch itself: the camera first sits at
//! the overview pose, and a [`PanOrbitCamera`] is attached once
//! [`OrbitActivation`] runs out.

pub mod util;

use super::ViewerCamera;
use crate::settings::ViewSettings;
use app::LOG_VIEW;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;
use settings::SettingsArc;

/// Pending orbit enablement on the viewer camera.
#[derive(Component, Debug)]
pub struct OrbitActivation {
    pub timer: Timer,
}

impl OrbitActivation {
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            timer: Timer::new(settings.orbit_delay(), TimerMode::Once),
        }
    }
}

/// Orbit controller around the configured target, starting from `transform`.
pub fn orbit_camera(transform: &Transform, settings: &ViewSettings) -> PanOrbitCamera {
    let focus = settings.orbit_focus();
    let mut orbit = PanOrbitCamera {
        focus,
        zoom_lower_limit: settings.orbit_min_distance,
        zoom_upper_limit: Some(settings.orbit_max_distance),
        ..default()
    };

    let (yaw, pitch, radius) =
        util::calculate_from_translation_and_focus(transform.translation, focus, orbit.axis);
    orbit.yaw = Some(yaw);
    orbit.pitch = Some(pitch);
    orbit.radius = Some(radius.clamp(settings.orbit_min_distance, settings.orbit_max_distance));
    orbit
}

pub(super) fn activate_orbit_after_delay(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<SettingsArc<ViewSettings>>,
    mut pending: Query<(Entity, &mut Transform, &mut OrbitActivation), With<ViewerCamera>>,
) {
    for (entity, mut transform, mut activation) in &mut pending {
        if !activation.timer.tick(time.delta()).just_finished() {
            continue;
        }

        let orbit = orbit_camera(&transform, &settings);
        if let (Some(yaw), Some(pitch), Some(radius)) = (orbit.yaw, orbit.pitch, orbit.radius) {
            *transform = util::orbit_transform(yaw, pitch, radius, orbit.focus, orbit.axis);
        }

        commands
            .entity(entity)
            .remove::<OrbitActivation>()
            .insert(orbit);
        info!(target: LOG_VIEW, "Orbit controls enabled around {}", settings.orbit_focus());
    }
}
