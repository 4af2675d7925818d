mod hotkeys;

use bevy::{input::InputSystems, prelude::*};

pub use hotkeys::HotkeyPlugin;

/// Held movement keys, rebuilt from the keyboard every frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
}

impl MovementInput {
    pub fn from_keys(keys: &ButtonInput<KeyCode>) -> Self {
        Self {
            forward: keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
            backward: keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
            left: keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
            right: keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
            jump: keys.pressed(KeyCode::Space),
            sprint: keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        }
    }
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementInput>()
            .add_plugins(HotkeyPlugin)
            .add_systems(PreUpdate, track_movement_keys.after(InputSystems));
    }
}

fn track_movement_keys(keys: Res<ButtonInput<KeyCode>>, mut movement: ResMut<MovementInput>) {
    let next = MovementInput::from_keys(&keys);
    movement.set_if_neq(next);
}
