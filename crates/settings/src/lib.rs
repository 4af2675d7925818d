#[cfg(feature = "bevy")]
mod bevy_adapter;
mod errors;
mod store;

#[cfg(feature = "bevy")]
pub use bevy_adapter::*;
pub use errors::SettingsError;
pub use store::{SettingsStore, SettingsStoreBuilder};

use serde::{Serialize, de::DeserializeOwned};

/// A typed section of the settings file.
///
/// The default value is the baseline; only fields that differ from it are
/// written to disk.
pub trait Settings: Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Key of this section at the root of the settings file.
    const SECTION: &'static str;

    fn name() -> &'static str {
        Self::SECTION
    }
}
