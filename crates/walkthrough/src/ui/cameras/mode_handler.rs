use super::{
    CursorState, ViewCommand, ViewMode, ViewerCamera,
    dollhouse::OrbitActivation,
    first_person::{FirstPersonView, set_view_from_rotation},
};
use crate::{input::MovementInput, navigation::NavigationController, settings::ViewSettings};
use app::LOG_VIEW;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;
use settings::SettingsArc;

/// Applies view switches as instant teleports.
///
/// A command for the mode that is already active repeats the teleport.
pub fn handle_view_commands(
    mut commands: Commands,
    mut messages: MessageReader<ViewCommand>,
    mut current_mode: ResMut<ViewMode>,
    mut cursor: ResMut<CursorState>,
    settings: Res<SettingsArc<ViewSettings>>,
    input: Res<MovementInput>,
    mut camera_query: Query<(Entity, &mut Transform), With<ViewerCamera>>,
) {
    for command in messages.read() {
        let Ok((camera_entity, mut camera_transform)) = camera_query.single_mut() else {
            warn!(target: LOG_VIEW, "No viewer camera for {command:?}");
            continue;
        };

        let mode = command.target_mode();
        remove_mode_components(&mut commands, camera_entity);
        *camera_transform = transform_for_mode(mode, &settings, &camera_transform);
        add_mode_components(
            &mut commands,
            camera_entity,
            mode,
            &settings,
            &camera_transform,
            input.jump,
        );

        let requested = match mode {
            ViewMode::Fps => CursorState::LOCKED,
            ViewMode::Dollhouse => CursorState::FREE,
        };
        cursor.set_if_neq(requested);
        *current_mode = mode;

        info!(
            target: LOG_VIEW,
            "Switched to {mode:?} view at {}", camera_transform.translation
        );
    }
}

fn remove_mode_components(commands: &mut Commands, entity: Entity) {
    commands.entity(entity).remove::<(
        FirstPersonView,
        NavigationController,
        PanOrbitCamera,
        OrbitActivation,
    )>();
}

fn add_mode_components(
    commands: &mut Commands,
    entity: Entity,
    mode: ViewMode,
    settings: &ViewSettings,
    transform: &Transform,
    jump_held: bool,
) {
    match mode {
        ViewMode::Fps => {
            let mut view = FirstPersonView::new(settings);
            set_view_from_rotation(&mut view, transform.rotation);
            // A Space press that is still held from before the switch is no jump
            let controller = NavigationController {
                jump_held,
                ..default()
            };
            commands.entity(entity).insert((view, controller));
        }
        ViewMode::Dollhouse => {
            commands.entity(entity).insert(OrbitActivation::new(settings));
        }
    }
}

fn transform_for_mode(mode: ViewMode, settings: &ViewSettings, current: &Transform) -> Transform {
    match mode {
        ViewMode::Fps => {
            // Keep the heading, but never start with a pitch mouse look could not reach
            let mut view = FirstPersonView::new(settings);
            set_view_from_rotation(&mut view, current.rotation);
            Transform::from_translation(settings.fps_start()).with_rotation(view.rotation())
        }
        ViewMode::Dollhouse => Transform::from_translation(settings.overview())
            .looking_at(settings.overview_focus(), Vec3::Y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::cameras::dollhouse::activate_orbit_after_delay;
    use std::time::Duration;

    fn view_app() -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<ViewMode>()
            .insert_resource(CursorState::LOCKED)
            .init_resource::<MovementInput>()
            .insert_resource(SettingsArc::new(ViewSettings::default()))
            .add_message::<ViewCommand>()
            .add_systems(
                Update,
                (handle_view_commands, activate_orbit_after_delay).chain(),
            );

        let settings = ViewSettings::default();
        let camera = app
            .world_mut()
            .spawn((
                ViewerCamera,
                Transform::from_translation(Vec3::new(5.0, 9.6, -3.0)),
                FirstPersonView::new(&settings),
                NavigationController {
                    velocity: Vec3::new(10.0, -4.0, 2.0),
                    grounded: false,
                    jump_held: true,
                },
            ))
            .id();
        (app, camera)
    }

    fn advance(app: &mut App, millis: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(millis));
        app.update();
    }

    #[test]
    fn dollhouse_releases_the_pointer_and_teleports_to_the_overview() {
        let (mut app, camera) = view_app();
        let settings = ViewSettings::default();

        app.world_mut().write_message(ViewCommand::SwitchToDollhouse);
        app.update();

        assert_eq!(*app.world().resource::<ViewMode>(), ViewMode::Dollhouse);
        assert_eq!(*app.world().resource::<CursorState>(), CursorState::FREE);

        let entity = app.world().entity(camera);
        assert_eq!(
            entity.get::<Transform>().expect("transform").translation,
            settings.overview()
        );
        assert!(!entity.contains::<FirstPersonView>());
        assert!(!entity.contains::<NavigationController>());
        assert!(entity.contains::<OrbitActivation>());
        assert!(!entity.contains::<PanOrbitCamera>());
    }

    #[test]
    fn orbit_is_enabled_after_the_delay_without_moving_the_camera() {
        let (mut app, camera) = view_app();
        let settings = ViewSettings::default();

        app.world_mut().write_message(ViewCommand::SwitchToDollhouse);
        app.update();

        advance(&mut app, 50);
        assert!(!app.world().entity(camera).contains::<PanOrbitCamera>());

        advance(&mut app, 60);
        let entity = app.world().entity(camera);
        let orbit = entity.get::<PanOrbitCamera>().expect("orbit camera");
        assert_eq!(orbit.focus, settings.orbit_focus());
        assert!(!entity.contains::<OrbitActivation>());

        let translation = entity.get::<Transform>().expect("transform").translation;
        assert!((translation - settings.overview()).length() < 1e-3);
    }

    #[test]
    fn fps_teleports_to_the_start_and_disables_orbit() {
        let (mut app, camera) = view_app();
        let settings = ViewSettings::default();

        app.world_mut().write_message(ViewCommand::SwitchToDollhouse);
        app.update();
        advance(&mut app, 200);
        assert!(app.world().entity(camera).contains::<PanOrbitCamera>());

        app.world_mut().write_message(ViewCommand::SwitchToFps);
        app.update();

        assert_eq!(*app.world().resource::<ViewMode>(), ViewMode::Fps);
        assert_eq!(*app.world().resource::<CursorState>(), CursorState::LOCKED);

        let entity = app.world().entity(camera);
        let transform = entity.get::<Transform>().expect("transform");
        assert_eq!(transform.translation, settings.fps_start());
        assert!(!entity.contains::<PanOrbitCamera>());
        assert!(!entity.contains::<OrbitActivation>());
        assert_eq!(
            entity.get::<NavigationController>(),
            Some(&NavigationController::default())
        );

        let view = entity.get::<FirstPersonView>().expect("first person view");
        assert!(view.pitch.abs() <= settings.pitch_limit);
    }

    #[test]
    fn repeated_fps_command_teleports_again_and_resets_motion() {
        let (mut app, camera) = view_app();
        let settings = ViewSettings::default();

        app.world_mut().write_message(ViewCommand::SwitchToFps);
        app.update();

        let entity = app.world().entity(camera);
        assert_eq!(
            entity.get::<Transform>().expect("transform").translation,
            settings.fps_start()
        );
        assert_eq!(
            entity.get::<NavigationController>(),
            Some(&NavigationController::default())
        );
    }

    #[test]
    fn space_held_through_the_switch_is_not_a_new_press() {
        let (mut app, camera) = view_app();
        app.world_mut().resource_mut::<MovementInput>().jump = true;

        app.world_mut().write_message(ViewCommand::SwitchToDollhouse);
        app.update();
        app.world_mut().write_message(ViewCommand::SwitchToFps);
        app.update();

        let controller = *app
            .world()
            .get::<NavigationController>(camera)
            .expect("navigation controller");
        assert!(controller.jump_held);
        assert!(controller.grounded);
        assert_eq!(controller.velocity, Vec3::ZERO);
    }

    #[test]
    fn quick_switch_back_cancels_pending_orbit() {
        let (mut app, camera) = view_app();

        app.world_mut().write_message(ViewCommand::SwitchToDollhouse);
        app.update();
        app.world_mut().write_message(ViewCommand::SwitchToFps);
        advance(&mut app, 500);

        let entity = app.world().entity(camera);
        assert!(!entity.contains::<OrbitActivation>());
        assert!(!entity.contains::<PanOrbitCamera>());
        assert_eq!(*app.world().resource::<ViewMode>(), ViewMode::Fps);
    }
}
