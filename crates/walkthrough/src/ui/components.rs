use bevy::prelude::*;

/// Dollhouse button colours (#9333ea, #7e22ce on hover)
pub const DOLLHOUSE_BUTTON: Color = Color::srgb(0.576, 0.2, 0.918);
pub const DOLLHOUSE_BUTTON_HOVERED: Color = Color::srgb(0.494, 0.133, 0.808);

/// FPS button colours (#16a34a, #15803d on hover)
pub const FPS_BUTTON: Color = Color::srgb(0.086, 0.639, 0.29);
pub const FPS_BUTTON_HOVERED: Color = Color::srgb(0.082, 0.502, 0.239);

pub const PANEL_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);
pub const TEXT_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);
