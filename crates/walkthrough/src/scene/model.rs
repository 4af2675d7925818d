//! The explored model: glTF scene plus a baked texture on unlit materials.

use crate::{ViewerState, settings::ModelSettings};
use app::LOG_SCENE;
use bevy::{
    asset::LoadState,
    image::{
        ImageAddressMode, ImageFilterMode, ImageLoaderSettings, ImageSampler,
        ImageSamplerDescriptor,
    },
    prelude::*,
};
use settings::SettingsArc;

pub struct ModelPlugin;

impl Plugin for ModelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_model)
            .add_systems(
                Update,
                check_model_loaded.run_if(in_state(ViewerState::Loading)),
            )
            .add_systems(
                Update,
                assign_materials.run_if(resource_exists::<ModelAssets>),
            );
    }
}

/// Marker for the entity that carries the model's scene root
#[derive(Component)]
pub struct ModelRoot;

/// Set once a mesh got its viewer material.
#[derive(Component)]
struct MaterialAssigned;

#[derive(Resource)]
pub struct ModelAssets {
    pub scene: Handle<Scene>,
    pub texture: Handle<Image>,
    pub textured: Handle<StandardMaterial>,
    pub fallback: Handle<StandardMaterial>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelMaterial {
    Textured,
    Fallback,
}

/// Meshes without texture coordinates cannot show the baked texture.
pub fn material_kind(mesh: &Mesh) -> ModelMaterial {
    if mesh.contains_attribute(Mesh::ATTRIBUTE_UV_0) {
        ModelMaterial::Textured
    } else {
        ModelMaterial::Fallback
    }
}

fn hex_color(rgb: u32) -> Color {
    Color::srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

fn viewer_material(base: StandardMaterial) -> StandardMaterial {
    StandardMaterial {
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..base
    }
}

fn texture_sampler() -> ImageSamplerDescriptor {
    ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        address_mode_w: ImageAddressMode::Repeat,
        mag_filter: ImageFilterMode::Linear,
        min_filter: ImageFilterMode::Linear,
        mipmap_filter: ImageFilterMode::Linear,
        ..default()
    }
}

fn load_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<SettingsArc<ModelSettings>>,
) {
    let scene =
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(settings.model_path.clone()));
    let texture = asset_server.load_with_settings(
        settings.texture_path.clone(),
        |loader: &mut ImageLoaderSettings| {
            loader.is_srgb = true;
            loader.sampler = ImageSampler::Descriptor(texture_sampler());
        },
    );

    let textured = materials.add(viewer_material(StandardMaterial {
        base_color_texture: Some(texture.clone()),
        ..default()
    }));
    let fallback = materials.add(viewer_material(StandardMaterial {
        base_color: hex_color(settings.fallback_color),
        ..default()
    }));

    commands.spawn((
        SceneRoot(scene.clone()),
        Transform::from_scale(Vec3::splat(settings.scale)),
        ModelRoot,
        Name::new("Model"),
    ));
    commands.insert_resource(ModelAssets {
        scene,
        texture,
        textured,
        fallback,
    });

    info!(
        target: LOG_SCENE,
        "Loading model '{}' with texture '{}'", settings.model_path, settings.texture_path
    );
}

/// Leaves the loading state once the model either loaded or failed.
fn check_model_loaded(
    asset_server: Res<AssetServer>,
    assets: Option<Res<ModelAssets>>,
    mut next_state: ResMut<NextState<ViewerState>>,
) {
    let Some(assets) = assets else {
        return;
    };

    let texture_state = asset_server.load_state(&assets.texture);
    if matches!(texture_state, LoadState::Loading) {
        return;
    }
    if let LoadState::Failed(err) = texture_state {
        error!(target: LOG_SCENE, "Texture failed to load: {err}");
    }

    match asset_server.load_state(&assets.scene) {
        LoadState::Loaded => {
            info!(target: LOG_SCENE, "Model loaded");
            next_state.set(ViewerState::Exploring);
        }
        LoadState::Failed(err) => {
            error!(target: LOG_SCENE, "Model failed to load, exploring an empty scene: {err}");
            next_state.set(ViewerState::Exploring);
        }
        _ => {}
    }
}

/// Swaps every mesh below the model root to the textured or fallback material.
fn assign_materials(
    mut commands: Commands,
    assets: Res<ModelAssets>,
    meshes: Res<Assets<Mesh>>,
    roots: Query<Entity, With<ModelRoot>>,
    children: Query<&Children>,
    mesh_entities: Query<(&Mesh3d, Option<&Name>), Without<MaterialAssigned>>,
) {
    for root in &roots {
        for entity in children.iter_descendants(root) {
            let Ok((mesh, name)) = mesh_entities.get(entity) else {
                continue;
            };
            let Some(mesh) = meshes.get(&mesh.0) else {
                continue;
            };

            let material = match material_kind(mesh) {
                ModelMaterial::Textured => assets.textured.clone(),
                ModelMaterial::Fallback => {
                    warn!(
                        target: LOG_SCENE,
                        "Mesh {} has no UV coordinates, using fallback material",
                        name.map(Name::as_str).unwrap_or("<unnamed>")
                    );
                    assets.fallback.clone()
                }
            };

            commands
                .entity(entity)
                .insert((MeshMaterial3d(material), MaterialAssigned));
        }
    }
}
