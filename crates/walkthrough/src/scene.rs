mod lighting;
mod model;

use bevy::prelude::*;

pub use lighting::LightingPlugin;
pub use model::ModelPlugin;

/// Lighting and the explored model
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((LightingPlugin, ModelPlugin));
    }
}
