use bevy::{
    app::App,
    ecs::resource::Resource,
    prelude::{Deref, World},
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{Settings, SettingsStore};

#[derive(Resource, Clone)]
pub struct SettingsStoreRef(pub Arc<SettingsStore>);

/// Snapshot of one settings section, refreshed by [`reload_settings`].
#[derive(Resource, Deref, Clone)]
pub struct SettingsArc<T: Send + Sync + 'static>(pub Arc<T>);

impl<T: Send + Sync + 'static> SettingsArc<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }
}

#[derive(Resource, Default)]
struct SettingsRegistry {
    updaters: Vec<fn(&Arc<SettingsStore>, &mut World)>,
}

pub trait AppSettingsExt {
    fn insert_settings_store(&mut self, store: SettingsStore) -> &mut Self;

    /// Registers `S` with the store and exposes it as `SettingsArc<S>`.
    ///
    /// Without a store, or when the stored delta does not fit `S`, the
    /// section falls back to `S::default()`.
    fn register_settings_section<S: Settings>(&mut self) -> &mut Self;
}

impl AppSettingsExt for App {
    fn insert_settings_store(&mut self, store: SettingsStore) -> &mut Self {
        self.world_mut()
            .insert_resource(SettingsStoreRef(Arc::new(store)));
        self.world_mut()
            .init_resource::<SettingsRegistry>();
        self
    }

    fn register_settings_section<S: Settings>(&mut self) -> &mut Self {
        let store = self
            .world()
            .get_resource::<SettingsStoreRef>()
            .map(|store| store.0.clone());

        let Some(store) = store else {
            warn!("no settings store, using defaults for '{}'", S::name());
            self.world_mut()
                .insert_resource(SettingsArc::new(S::default()));
            return self;
        };

        let value = store.register::<S>().and_then(|_| store.get::<S>());
        let value = match value {
            Ok(value) => value,
            Err(err) => {
                warn!("settings section '{}' unusable ({err}), using defaults", S::name());
                Arc::new(S::default())
            }
        };
        self.world_mut().insert_resource(SettingsArc::<S>(value));

        fn update_one<S: Settings>(store: &Arc<SettingsStore>, world: &mut World) {
            match store.get::<S>() {
                Ok(new_arc) => {
                    world.insert_resource(SettingsArc::<S>(new_arc));
                }
                Err(err) => warn!("failed to refresh settings section '{}': {err}", S::name()),
            }
        }

        self.world_mut()
            .get_resource_or_init::<SettingsRegistry>()
            .updaters
            .push(update_one::<S>);
        self
    }
}

/// Exclusive system: re-reads the settings file and refreshes every
/// registered `SettingsArc<_>` resource.
pub fn reload_settings(world: &mut World) {
    let Some(store) = world
        .get_resource::<SettingsStoreRef>()
        .map(|store| store.0.clone())
    else {
        return;
    };

    if let Err(err) = store.reload() {
        warn!("settings reload failed, keeping previous values: {err}");
        return;
    }

    let updaters = world
        .get_resource::<SettingsRegistry>()
        .map(|registry| registry.updaters.clone())
        .unwrap_or_default();
    for update in updaters {
        update(&store, world);
    }
    info!("settings reloaded from {:?}", store.file_path());
}
