mod app;
mod input;
mod navigation;
mod scene;
mod settings;
mod ui;
mod utils;

use crate::input::InputPlugin;
use crate::navigation::NavigationPlugin;
use crate::scene::ScenePlugin;
use crate::ui::UIPlugin;

use ::app::LOG_MAIN;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

/// Tracks whether the model is still being loaded.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ViewerState {
    #[default]
    Loading,
    Exploring,
}

fn main() -> anyhow::Result<()> {
    let mut viewer = app::init()?;

    viewer.app_mut().init_state::<ViewerState>();

    viewer.app_mut().add_plugins((
        EnhancedInputPlugin,
        InputPlugin,
        NavigationPlugin,
        ScenePlugin,
        UIPlugin,
    ));

    info!(target: LOG_MAIN, "Starting viewer");
    viewer.run();
    Ok(())
}
