//! User-tunable sections of `walkthrough.settings.ron`.
//!
//! Every field has a default; the settings file only stores what differs.

use bevy::prelude::Vec3;
use serde::{Deserialize, Serialize};
use settings::Settings;
use std::f32::consts::PI;
use std::time::Duration;

/// Tuning of the first-person physics controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    pub jump_force: f32,
    /// Downward acceleration magnitude.
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub ground_friction: f32,
    pub air_friction: f32,
    pub ground_acceleration: f32,
    pub air_acceleration: f32,
    pub ground_height: f32,
    /// Eye height above the ground plane.
    pub player_height: f32,
    pub airborne_tolerance: f32,
    /// Frame rate at which the friction factors are applied unscaled.
    pub friction_reference_fps: f32,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            move_speed: 30.0,
            sprint_multiplier: 2.5,
            jump_force: 20.0,
            gravity: 35.0,
            max_fall_speed: 30.0,
            ground_friction: 0.9,
            air_friction: 0.95,
            ground_acceleration: 20.0,
            air_acceleration: 8.0,
            ground_height: 8.0,
            player_height: 1.6,
            airborne_tolerance: 0.1,
            friction_reference_fps: 60.0,
        }
    }
}

impl NavigationSettings {
    /// Height of the camera while standing on the ground plane.
    pub fn eye_level(&self) -> f32 {
        self.ground_height + self.player_height
    }
}

impl Settings for NavigationSettings {
    const SECTION: &'static str = "navigation";
}

/// Camera placement for both view modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub fps_start_position: [f32; 3],
    pub overview_position: [f32; 3],
    pub overview_look_at: [f32; 3],
    pub orbit_target: [f32; 3],
    pub orbit_enable_delay_ms: u64,
    pub orbit_min_distance: f32,
    pub orbit_max_distance: f32,
    pub mouse_sensitivity: f32,
    /// Maximum look angle above or below the horizon, in radians.
    pub pitch_limit: f32,
    pub field_of_view_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            fps_start_position: [0.0, 10.0, 20.0],
            overview_position: [0.0, 80.0, 100.0],
            overview_look_at: [0.0, 0.0, 0.0],
            orbit_target: [0.0, 20.0, 0.0],
            orbit_enable_delay_ms: 100,
            orbit_min_distance: 20.0,
            orbit_max_distance: 200.0,
            mouse_sensitivity: 0.0016,
            pitch_limit: 0.4 * PI,
            field_of_view_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl ViewSettings {
    pub fn fps_start(&self) -> Vec3 {
        Vec3::from_array(self.fps_start_position)
    }

    pub fn overview(&self) -> Vec3 {
        Vec3::from_array(self.overview_position)
    }

    pub fn overview_focus(&self) -> Vec3 {
        Vec3::from_array(self.overview_look_at)
    }

    pub fn orbit_focus(&self) -> Vec3 {
        Vec3::from_array(self.orbit_target)
    }

    pub fn orbit_delay(&self) -> Duration {
        Duration::from_millis(self.orbit_enable_delay_ms)
    }
}

impl Settings for ViewSettings {
    const SECTION: &'static str = "view";
}

/// Which assets to show and how large.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// glTF file, relative to the asset directory.
    pub model_path: String,
    pub texture_path: String,
    pub scale: f32,
    /// sRGB hex colour for meshes without texture coordinates.
    pub fallback_color: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model_path: "models/tour.glb".to_string(),
            texture_path: "textures/tour.jpg".to_string(),
            scale: 100.0,
            fallback_color: 0xcccccc,
        }
    }
}

impl Settings for ModelSettings {
    const SECTION: &'static str = "model";
}

#[cfg(test)]
mod tests {
    use super::*;
    use settings::SettingsStore;

    fn temp_settings_file(name: &str) -> std::path::PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("walkthrough_{name}_{nanos}.settings.ron"))
    }

    #[test]
    fn defaults_put_the_eye_above_the_ground_plane() {
        let nav = NavigationSettings::default();
        assert!((nav.eye_level() - 9.6).abs() < 1e-5);

        let view = ViewSettings::default();
        assert_eq!(view.fps_start(), Vec3::new(0.0, 10.0, 20.0));
        assert_eq!(view.orbit_delay(), Duration::from_millis(100));
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let path = temp_settings_file("partial");
        std::fs::write(
            &path,
            r#"{
                "navigation": { "move_speed": 12.0 },
                "view": { "orbit_target": (1.0, 2.0, 3.0) },
            }"#,
        )
        .expect("write settings");

        let store = SettingsStore::builder()
            .with_settings_file(path.clone())
            .build()
            .expect("build store");
        store.register::<NavigationSettings>().expect("navigation");
        store.register::<ViewSettings>().expect("view");
        store.register::<ModelSettings>().expect("model");

        let nav = store.get::<NavigationSettings>().expect("navigation");
        assert_eq!(nav.move_speed, 12.0);
        assert_eq!(nav.jump_force, 20.0);

        let view = store.get::<ViewSettings>().expect("view");
        assert_eq!(view.orbit_focus(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(view.overview(), Vec3::new(0.0, 80.0, 100.0));

        let model = store.get::<ModelSettings>().expect("model");
        assert_eq!(*model, ModelSettings::default());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn reload_with_a_wrongly_typed_field_keeps_the_active_values() {
        let path = temp_settings_file("reload_mismatch");
        std::fs::write(&path, r#"{ "navigation": { "move_speed": 12.0 } }"#)
            .expect("write settings");

        let store = SettingsStore::builder()
            .with_settings_file(path.clone())
            .build()
            .expect("build store");
        store.register::<NavigationSettings>().expect("navigation");

        std::fs::write(&path, r#"{ "navigation": { "move_speed": "fast" } }"#)
            .expect("edit settings");
        assert!(store.reload().is_err());

        let nav = store.get::<NavigationSettings>().expect("still readable");
        assert_eq!(nav.move_speed, 12.0);

        let _ = std::fs::remove_file(path);
    }
}
