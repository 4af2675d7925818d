pub mod cameras;
pub mod components;
mod hud;
mod loader;

use bevy::{input_focus::InputFocus, prelude::*};
use cameras::CameraPlugin;
use hud::HudPlugin;
use loader::LoaderPlugin;

/// Main UI plugin that coordinates cameras, overlays and the HUD
pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CameraPlugin, LoaderPlugin, HudPlugin))
            .init_resource::<InputFocus>();
    }
}
