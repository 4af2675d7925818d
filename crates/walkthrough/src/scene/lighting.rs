use app::LOG_SCENE;
use bevy::prelude::*;

/// Plugin for managing scene lighting
pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_lighting);
    }
}

/// Marker component for lighting entities
#[derive(Component)]
struct LightingEntity;

fn setup_lighting(mut commands: Commands, ambient_light: Option<ResMut<AmbientLight>>) {
    if let Some(mut ambient_light) = ambient_light {
        ambient_light.brightness = 400.0;
        ambient_light.color = Color::WHITE;
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 3_000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        LightingEntity,
        Name::new("Main Directional Light"),
    ));

    commands.spawn((
        PointLight {
            intensity: 300_000.0,
            ..default()
        },
        Transform::from_xyz(0.0, 5.0, 0.0),
        LightingEntity,
        Name::new("Fill Point Light"),
    ));

    debug!(target: LOG_SCENE, "Scene lighting ready");
}
