use bevy::prelude::*;

/// Orbit parameters that reproduce `translation` around `focus`.
pub fn calculate_from_translation_and_focus(
    translation: Vec3,
    focus: Vec3,
    axis: [Vec3; 3],
) -> (f32, f32, f32) {
    let axis = Mat3::from_cols(axis[0], axis[1], axis[2]);
    let comp_vec = translation - focus;
    let mut radius = comp_vec.length();
    if radius == 0.0 {
        radius = 0.05; // Radius 0 causes problems
    }
    let comp_vec = axis * comp_vec;
    let yaw = comp_vec.x.atan2(comp_vec.z);
    let pitch = (comp_vec.y / radius).asin();
    (yaw, pitch, radius)
}

/// Camera pose for the given orbit parameters, looking at `focus`.
pub fn orbit_transform(yaw: f32, pitch: f32, radius: f32, focus: Vec3, axis: [Vec3; 3]) -> Transform {
    let yaw_rot = Quat::from_axis_angle(axis[1], yaw);
    let pitch_rot = Quat::from_axis_angle(axis[0], -pitch);
    let rotation = yaw_rot * pitch_rot;
    Transform {
        translation: focus + rotation * Vec3::new(0.0, 0.0, radius),
        rotation,
        ..default()
    }
}
