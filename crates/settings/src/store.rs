use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Settings, SettingsError};

use ron::value::{Map as RonMap, Value as RonValue};
use serde::Serialize;
use tracing::debug;

/// Convert any serializable struct to `ron::Value`.
fn to_ron_value<T: Serialize>(value: &T) -> Result<RonValue, SettingsError> {
    let s = ron::to_string(value)?;
    Ok(ron::from_str(&s)?)
}

fn to_ron_map<T: Serialize>(value: &T) -> Result<RonMap, SettingsError> {
    match to_ron_value(value)? {
        RonValue::Map(m) => Ok(m),
        _ => Err(SettingsError::Invalid("section must serialize to a map")),
    }
}

fn from_ron_value<T: Settings>(value: &RonValue) -> Result<T, SettingsError> {
    Ok(value.clone().into_rust::<T>()?)
}

/// Merge default + delta recursively (maps only).
fn merge_maps(default: &RonMap, delta: &RonMap) -> RonMap {
    let mut merged = default.clone();
    for (k, v_delta) in delta.iter() {
        let rec = match (merged.get(k), v_delta) {
            (Some(RonValue::Map(def_m)), RonValue::Map(delta_m)) => {
                RonValue::Map(merge_maps(def_m, delta_m))
            }
            _ => v_delta.clone(),
        };
        merged.insert(k.clone(), rec);
    }
    merged
}

/// Compute recursive diff (new vs default). Returns None if identical.
fn diff_value(new_v: &RonValue, default_v: &RonValue) -> Option<RonValue> {
    match (new_v, default_v) {
        (RonValue::Map(new_m), RonValue::Map(def_m)) => {
            let diff_m = diff_map(new_m, def_m);
            (!diff_m.is_empty()).then_some(RonValue::Map(diff_m))
        }
        _ => (new_v != default_v).then(|| new_v.clone()),
    }
}

fn diff_map(new_m: &RonMap, def_m: &RonMap) -> RonMap {
    let mut out = RonMap::new();
    for (k, new_v) in new_m.iter() {
        match def_m.get(k) {
            Some(def_v) => {
                if let Some(d) = diff_value(new_v, def_v) {
                    out.insert(k.clone(), d);
                }
            }
            None => {
                out.insert(k.clone(), new_v.clone());
            }
        }
    }
    out
}

fn merge_section(default_map: &RonMap, delta: Option<&RonValue>) -> RonValue {
    match delta {
        Some(RonValue::Map(delta_m)) => RonValue::Map(merge_maps(default_map, delta_m)),
        // Not a map: cannot be reconciled with the section shape
        Some(_) | None => RonValue::Map(default_map.clone()),
    }
}

/// Checks that a merged section value still deserializes into its type.
type SectionCheck = fn(&RonValue) -> Result<(), SettingsError>;

fn check_section<T: Settings>(value: &RonValue) -> Result<(), SettingsError> {
    from_ron_value::<T>(value)
        .map(|_| ())
        .map_err(|err| SettingsError::Mismatch {
            section: T::name(),
            source: Box::new(err),
        })
}

fn read_deltas(file_path: &PathBuf) -> Result<HashMap<String, RonValue>, SettingsError> {
    if !file_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(file_path)?;
    if content.trim().is_empty() {
        return Ok(HashMap::new());
    }

    Ok(ron::from_str(&content)?)
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Builder for `SettingsStore` (single delta file).
#[derive(Default)]
pub struct SettingsStoreBuilder {
    settings_file: Option<PathBuf>,
}

impl SettingsStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    pub fn build(self) -> Result<SettingsStore, SettingsError> {
        let file_path = self
            .settings_file
            .ok_or(SettingsError::Invalid("settings file not specified"))?;

        if let Some(dir) = file_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let deltas = read_deltas(&file_path)?;

        Ok(SettingsStore {
            file_path,
            deltas: RwLock::new(deltas),
            defaults: RwLock::new(HashMap::new()),
            checks: RwLock::new(HashMap::new()),
            values: RwLock::new(HashMap::new()),
        })
    }
}

/// Settings store (thread-safe).
///
/// Each registered section is the merge of its `Default` value and the delta
/// read from the settings file. Updates persist only the recursive diff
/// against the defaults.
pub struct SettingsStore {
    file_path: PathBuf,
    deltas: RwLock<HashMap<String, RonValue>>, // section -> delta value (usually Map)
    defaults: RwLock<HashMap<&'static str, RonMap>>, // section -> full default map
    checks: RwLock<HashMap<&'static str, SectionCheck>>,
    values: RwLock<HashMap<&'static str, RonValue>>, // section -> full effective merged value
}

impl SettingsStore {
    pub fn builder() -> SettingsStoreBuilder {
        SettingsStoreBuilder::new()
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }

    pub fn is_registered<T: Settings>(&self) -> bool {
        read(&self.values).contains_key(T::name())
    }

    /// Register a section type (loads defaults and applies existing delta if present).
    pub fn register<T: Settings>(&self) -> Result<(), SettingsError> {
        let section = T::name();
        if self.is_registered::<T>() {
            return Err(SettingsError::Invalid("section already registered"));
        }

        let default_map = to_ron_map(&T::default())?;
        let merged_value = merge_section(&default_map, read(&self.deltas).get(section));

        // Reject deltas that do not fit the section type
        check_section::<T>(&merged_value)?;

        write(&self.defaults).insert(section, default_map);
        write(&self.checks).insert(section, check_section::<T>);
        write(&self.values).insert(section, merged_value);
        debug!("registered settings section '{section}'");

        Ok(())
    }

    /// Snapshot get (Arc).
    pub fn get<T: Settings>(&self) -> Result<Arc<T>, SettingsError> {
        self.try_get::<T>()?.ok_or(SettingsError::NotRegistered)
    }

    /// Optional variant: None if not registered.
    pub fn try_get<T: Settings>(&self) -> Result<Option<Arc<T>>, SettingsError> {
        let values = read(&self.values);
        let Some(value) = values.get(T::name()) else {
            return Ok(None);
        };
        Ok(Some(Arc::new(from_ron_value::<T>(value)?)))
    }

    /// Update via mutable closure. Only delta (recursive) is persisted.
    pub fn update<T, F>(&self, mutator: F) -> Result<(), SettingsError>
    where
        T: Settings,
        F: FnOnce(&mut T),
    {
        let section = T::name();

        let mut instance: T = {
            let values = read(&self.values);
            let raw = values.get(section).ok_or(SettingsError::NotRegistered)?;
            from_ron_value(raw)?
        };
        mutator(&mut instance);

        let new_map = to_ron_map(&instance)?;
        let diff_root = {
            let defaults = read(&self.defaults);
            let default_map = defaults.get(section).ok_or(SettingsError::NotRegistered)?;
            diff_map(&new_map, default_map)
        };

        write(&self.values).insert(section, RonValue::Map(new_map));
        {
            let mut deltas = write(&self.deltas);
            if diff_root.is_empty() {
                deltas.remove(section);
            } else {
                deltas.insert(section.to_string(), RonValue::Map(diff_root));
            }
        }

        self.persist_deltas()
    }

    /// Reload deltas from disk and re-merge all registered sections.
    ///
    /// Nothing changes unless the file parses and every registered section
    /// still fits its type.
    pub fn reload(&self) -> Result<(), SettingsError> {
        let new_deltas = read_deltas(&self.file_path)?;

        let merged = {
            let defaults = read(&self.defaults);
            let checks = read(&self.checks);
            let mut merged = HashMap::with_capacity(defaults.len());
            for (section, default_map) in defaults.iter() {
                let value = merge_section(default_map, new_deltas.get(*section));
                if let Some(check) = checks.get(section) {
                    check(&value)?;
                }
                merged.insert(*section, value);
            }
            merged
        };

        write(&self.values).extend(merged);
        *write(&self.deltas) = new_deltas;
        debug!("reloaded settings from {:?}", self.file_path);
        Ok(())
    }

    fn persist_deltas(&self) -> Result<(), SettingsError> {
        let clean: HashMap<String, RonValue> = read(&self.deltas)
            .iter()
            .filter(|(_, v)| !matches!(v, RonValue::Map(m) if m.is_empty()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let pretty = ron::ser::PrettyConfig::default();
        let ron_string = ron::ser::to_string_pretty(&clean, pretty)?;

        let tmp = self.file_path.with_extension("tmp");
        fs::write(&tmp, ron_string)?;
        fs::rename(&tmp, &self.file_path)?;
        Ok(())
    }
}
