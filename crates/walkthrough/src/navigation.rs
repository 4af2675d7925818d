mod controller;

use crate::{
    ViewerState,
    input::MovementInput,
    settings::NavigationSettings,
    ui::cameras::{ViewSystems, ViewerCamera, is_fps_active},
};
use app::LOG_NAVIGATION;
use bevy::prelude::*;
use settings::SettingsArc;

pub use controller::{NavigationController, NavigationEvent};

/// Moves the camera from held keys while in FPS mode.
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            physics_navigation
                .after(ViewSystems::Look)
                .run_if(in_state(ViewerState::Exploring).and(is_fps_active)),
        );
    }
}

fn physics_navigation(
    time: Res<Time>,
    input: Res<MovementInput>,
    settings: Res<SettingsArc<NavigationSettings>>,
    mut cameras: Query<(&mut Transform, &mut NavigationController), With<ViewerCamera>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (mut transform, mut controller) in &mut cameras {
        let look = transform.forward().as_vec3();
        let mut translation = transform.translation;

        match controller.step(&input, look, &mut translation, dt, &settings) {
            Some(NavigationEvent::Jumped) => {
                debug!(target: LOG_NAVIGATION, "Jumped from y={:.2}", translation.y)
            }
            Some(NavigationEvent::Landed) => {
                debug!(target: LOG_NAVIGATION, "Landed at {translation}")
            }
            None => {}
        }

        transform.translation = translation;
    }
}
