//! First-person physics: input blending, friction, jump and gravity over a
//! single ground plane.

use crate::{input::MovementInput, settings::NavigationSettings};
use bevy::prelude::*;

/// Per-camera motion state integrated once per frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct NavigationController {
    pub velocity: Vec3,
    pub grounded: bool,
    /// Jump key state of the previous step, for edge detection.
    pub jump_held: bool,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded: true,
            jump_held: false,
        }
    }
}

/// State transitions reported by [`NavigationController::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    Jumped,
    Landed,
}

/// Forward and right vectors on the horizontal plane for a look direction.
///
/// Both are zero when looking straight up or down.
pub fn horizontal_basis(look: Vec3) -> (Vec3, Vec3) {
    let forward = Vec3::new(look.x, 0.0, look.z).normalize_or_zero();
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    (forward, right)
}

/// Sum of the held directions, normalised when non-zero.
pub fn movement_direction(input: &MovementInput, forward: Vec3, right: Vec3) -> Vec3 {
    let mut direction = Vec3::ZERO;
    if input.forward {
        direction += forward;
    }
    if input.backward {
        direction -= forward;
    }
    if input.right {
        direction += right;
    }
    if input.left {
        direction -= right;
    }
    direction.normalize_or_zero()
}

impl NavigationController {
    /// Advances the controller by `dt` seconds and moves `translation`.
    pub fn step(
        &mut self,
        input: &MovementInput,
        look: Vec3,
        translation: &mut Vec3,
        dt: f32,
        settings: &NavigationSettings,
    ) -> Option<NavigationEvent> {
        let mut event = None;

        let (forward, right) = horizontal_basis(look);
        let direction = movement_direction(input, forward, right);
        let speed = if input.sprint {
            settings.move_speed * settings.sprint_multiplier
        } else {
            settings.move_speed
        };
        let target = direction * speed;

        let acceleration = if self.grounded {
            settings.ground_acceleration
        } else {
            settings.air_acceleration
        };
        let blend = 1.0 - (-acceleration * dt).exp();
        self.velocity.x += (target.x - self.velocity.x) * blend;
        self.velocity.z += (target.z - self.velocity.z) * blend;

        // Opposite keys cancel out and count as no input
        if direction == Vec3::ZERO {
            let friction = if self.grounded {
                settings.ground_friction
            } else {
                settings.air_friction
            };
            let decay = friction.powf(dt * settings.friction_reference_fps);
            self.velocity.x *= decay;
            self.velocity.z *= decay;
        }

        let jump_pressed = input.jump && !self.jump_held;
        self.jump_held = input.jump;
        if jump_pressed && self.grounded {
            self.velocity.y = settings.jump_force;
            self.grounded = false;
            event = Some(NavigationEvent::Jumped);
        }

        if !self.grounded {
            self.velocity.y -= settings.gravity * dt;
            self.velocity.y = self.velocity.y.max(-settings.max_fall_speed);
        }

        let ground = settings.eye_level();
        let next_y = translation.y + self.velocity.y * dt;
        if next_y <= ground && self.velocity.y <= 0.0 {
            translation.y = ground;
            self.velocity.y = 0.0;
            if !self.grounded {
                event = Some(NavigationEvent::Landed);
            }
            self.grounded = true;
        } else {
            translation.y = next_y;
            if translation.y > ground + settings.airborne_tolerance {
                self.grounded = false;
            }
        }

        translation.x += self.velocity.x * dt;
        translation.z += self.velocity.z * dt;

        event
    }

    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn grounded_at_eye_level(settings: &NavigationSettings) -> (NavigationController, Vec3) {
        (
            NavigationController::default(),
            Vec3::new(0.0, settings.eye_level(), 0.0),
        )
    }

    fn direction_keys(mask: u8) -> MovementInput {
        MovementInput {
            forward: mask & 1 != 0,
            backward: mask & 2 != 0,
            left: mask & 4 != 0,
            right: mask & 8 != 0,
            ..default()
        }
    }

    #[test]
    fn input_vector_is_unit_or_zero_for_every_key_combination() {
        let looks = [
            Vec3::NEG_Z,
            Vec3::new(1.0, -0.7, 0.3),
            Vec3::new(-0.2, 0.95, -0.1),
            Vec3::new(3.0, 0.0, 4.0),
        ];
        for look in looks {
            let (forward, right) = horizontal_basis(look);
            for mask in 0..16u8 {
                let input = direction_keys(mask);
                let direction = movement_direction(&input, forward, right);
                assert!(direction.length() <= 1.0 + 1e-5, "mask {mask} look {look}");
                assert_eq!(direction.y, 0.0);
                if mask == 0 {
                    assert_eq!(direction, Vec3::ZERO);
                }
            }
        }
    }

    #[test]
    fn opposite_keys_cancel() {
        let (forward, right) = horizontal_basis(Vec3::NEG_Z);
        let input = MovementInput {
            forward: true,
            backward: true,
            left: true,
            right: true,
            ..default()
        };
        assert_eq!(movement_direction(&input, forward, right), Vec3::ZERO);
    }

    #[test]
    fn right_is_to_the_right_of_forward() {
        let (forward, right) = horizontal_basis(Vec3::NEG_Z);
        assert!((forward - Vec3::NEG_Z).length() < 1e-6);
        assert!((right - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn pitch_does_not_change_walking_speed() {
        let settings = NavigationSettings::default();
        let input = MovementInput {
            forward: true,
            ..default()
        };

        let (mut level, mut level_pos) = grounded_at_eye_level(&settings);
        let (mut pitched, mut pitched_pos) = grounded_at_eye_level(&settings);
        for _ in 0..30 {
            level.step(&input, Vec3::NEG_Z, &mut level_pos, DT, &settings);
            pitched.step(
                &input,
                Vec3::new(0.0, -0.9, -0.1),
                &mut pitched_pos,
                DT,
                &settings,
            );
        }
        assert!((level.horizontal_speed() - pitched.horizontal_speed()).abs() < 1e-4);
        assert_eq!(pitched_pos.y, settings.eye_level());
    }

    #[test]
    fn holding_jump_gives_a_single_impulse() {
        let settings = NavigationSettings::default();
        let (mut controller, mut position) = grounded_at_eye_level(&settings);
        let input = MovementInput {
            jump: true,
            ..default()
        };

        let mut jumps = 0;
        let mut landings = 0;
        for _ in 0..600 {
            match controller.step(&input, Vec3::NEG_Z, &mut position, DT, &settings) {
                Some(NavigationEvent::Jumped) => jumps += 1,
                Some(NavigationEvent::Landed) => landings += 1,
                None => {}
            }
        }

        assert_eq!(jumps, 1);
        assert_eq!(landings, 1);
        assert!(controller.grounded);
        assert_eq!(position.y, settings.eye_level());
    }

    #[test]
    fn jump_pressed_in_the_air_is_ignored() {
        let settings = NavigationSettings::default();
        let mut controller = NavigationController::default();
        let mut position = Vec3::new(0.0, settings.eye_level() + 20.0, 0.0);
        let idle = MovementInput::default();
        let jump = MovementInput {
            jump: true,
            ..default()
        };

        controller.step(&idle, Vec3::NEG_Z, &mut position, DT, &settings);
        assert!(!controller.grounded);

        let mut jumps = 0;
        for _ in 0..600 {
            if controller.step(&jump, Vec3::NEG_Z, &mut position, DT, &settings)
                == Some(NavigationEvent::Jumped)
            {
                jumps += 1;
            }
        }
        assert_eq!(jumps, 0);
        assert!(controller.grounded);

        controller.step(&idle, Vec3::NEG_Z, &mut position, DT, &settings);
        let event = controller.step(&jump, Vec3::NEG_Z, &mut position, DT, &settings);
        assert_eq!(event, Some(NavigationEvent::Jumped));
    }

    #[test]
    fn friction_strictly_slows_an_idle_camera() {
        let settings = NavigationSettings::default();
        let (mut controller, mut position) = grounded_at_eye_level(&settings);
        controller.velocity = Vec3::new(40.0, 0.0, -25.0);
        let idle = MovementInput::default();

        let mut previous = controller.horizontal_speed();
        for _ in 0..120 {
            controller.step(&idle, Vec3::NEG_Z, &mut position, DT, &settings);
            let speed = controller.horizontal_speed();
            assert!(speed < previous, "{speed} should be below {previous}");
            previous = speed;
        }
        assert!(previous < 1e-3);
    }

    #[test]
    fn cancelled_keys_decay_like_no_keys() {
        let settings = NavigationSettings::default();
        let start = Vec3::new(40.0, 0.0, 0.0);
        let idle = MovementInput::default();
        let cancelled = [
            direction_keys(1 | 2),
            direction_keys(4 | 8),
            direction_keys(1 | 2 | 4 | 8),
        ];

        let (mut reference, mut reference_pos) = grounded_at_eye_level(&settings);
        reference.velocity = start;
        reference.step(&idle, Vec3::NEG_Z, &mut reference_pos, DT, &settings);

        for input in cancelled {
            let (mut controller, mut position) = grounded_at_eye_level(&settings);
            controller.velocity = start;
            controller.step(&input, Vec3::NEG_Z, &mut position, DT, &settings);

            assert!(
                (controller.horizontal_speed() - reference.horizontal_speed()).abs() < 1e-5,
                "{input:?}: {} vs idle {}",
                controller.horizontal_speed(),
                reference.horizontal_speed()
            );
            assert_eq!(position, reference_pos);
        }
    }

    #[test]
    fn fall_speed_is_capped() {
        let settings = NavigationSettings::default();
        let mut controller = NavigationController {
            grounded: false,
            ..default()
        };
        let mut position = Vec3::new(0.0, 500.0, 0.0);
        let idle = MovementInput::default();

        for _ in 0..600 {
            controller.step(&idle, Vec3::NEG_Z, &mut position, DT, &settings);
            assert!(controller.velocity.y >= -settings.max_fall_speed);
        }
        assert_eq!(controller.velocity.y, -settings.max_fall_speed);
    }

    #[test]
    fn ground_clamp_is_idempotent() {
        let settings = NavigationSettings::default();
        let (mut controller, mut position) = grounded_at_eye_level(&settings);
        let idle = MovementInput::default();

        for _ in 0..10 {
            let event = controller.step(&idle, Vec3::NEG_Z, &mut position, DT, &settings);
            assert_eq!(event, None);
            assert_eq!(position, Vec3::new(0.0, settings.eye_level(), 0.0));
            assert_eq!(controller, NavigationController::default());
        }
    }

    #[test]
    fn starting_above_ground_falls_and_lands() {
        let settings = NavigationSettings::default();
        let mut controller = NavigationController::default();
        let mut position = Vec3::new(0.0, 10.0, 20.0);
        let idle = MovementInput::default();

        let mut landed = false;
        for _ in 0..120 {
            if controller.step(&idle, Vec3::NEG_Z, &mut position, DT, &settings)
                == Some(NavigationEvent::Landed)
            {
                landed = true;
            }
        }
        assert!(landed);
        assert_eq!(position.y, settings.eye_level());
    }

    #[test]
    fn sprinting_forward_approaches_sprint_speed() {
        let settings = NavigationSettings::default();
        let (mut controller, mut position) = grounded_at_eye_level(&settings);
        let input = MovementInput {
            forward: true,
            sprint: true,
            ..default()
        };

        for _ in 0..60 {
            controller.step(&input, Vec3::NEG_Z, &mut position, DT, &settings);
        }

        let expected = settings.move_speed * settings.sprint_multiplier;
        assert!((controller.horizontal_speed() - expected).abs() < expected * 1e-3);
        assert!(controller.velocity.z < 0.0);
        assert!(position.z < -50.0);
    }
}
