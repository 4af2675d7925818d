use crate::settings::{ModelSettings, NavigationSettings, ViewSettings};
use app::{AppBuilder, Application, BevyApp, BoxError, LOG_MAIN};
use bevy::{input::common_conditions::input_just_pressed, log::LogPlugin, prelude::*};
use settings::{AppSettingsExt, SettingsError, SettingsStore, reload_settings};
use thiserror::Error;

pub struct WalkthroughApp;

impl Application for WalkthroughApp {
    const APP_ID: &'static str = "walkthrough";
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to prepare application directories or logging: {0}")]
    Context(#[source] BoxError),

    #[error("failed to open settings: {0}")]
    Settings(#[from] SettingsError),
}

pub fn init() -> Result<BevyApp<WalkthroughApp>, StartupError> {
    let mut viewer = AppBuilder::<WalkthroughApp>::new(env!("CARGO_PKG_VERSION"))
        .map_err(StartupError::Context)?
        .build_with_bevy(|mut app, ctx| {
            info!(target: LOG_MAIN, "{} v{}", ctx.app_id(), ctx.version());

            app.add_plugins(
                DefaultPlugins
                    .build()
                    .disable::<LogPlugin>()
                    .set(WindowPlugin {
                        primary_window: Some(Window {
                            title: "Walkthrough Viewer".to_string(),
                            ..default()
                        }),
                        ..default()
                    }),
            );
            app
        });

    let paths = viewer.context().path_context();
    info!(target: LOG_MAIN, "Data directory: {}", paths.data_root().display());
    let settings_file = paths.settings_file();
    let store = SettingsStore::builder()
        .with_settings_file(settings_file)
        .build()?;

    viewer
        .app_mut()
        .insert_settings_store(store)
        .register_settings_section::<NavigationSettings>()
        .register_settings_section::<ViewSettings>()
        .register_settings_section::<ModelSettings>()
        .add_systems(
            Update,
            reload_settings.run_if(input_just_pressed(KeyCode::F5)),
        );

    Ok(viewer)
}
