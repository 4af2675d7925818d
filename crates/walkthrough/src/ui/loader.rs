//! "Loading..." overlay shown until the model is ready.

use crate::{ViewerState, ui::components::TEXT_COLOR, utils::cleanup};
use bevy::prelude::*;

pub(super) struct LoaderPlugin;

impl Plugin for LoaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(ViewerState::Loading), spawn_loader)
            .add_systems(OnExit(ViewerState::Loading), cleanup::<LoadingOverlay>);
    }
}

#[derive(Component)]
pub(super) struct LoadingOverlay;

fn spawn_loader(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            LoadingOverlay,
            Name::new("Loading Overlay"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Loading..."),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn overlay_lives_only_while_loading() {
        let mut app = App::new();
        app.add_plugins((StatesPlugin, LoaderPlugin))
            .init_state::<ViewerState>();

        app.update();
        let overlays = app
            .world_mut()
            .query_filtered::<Entity, With<LoadingOverlay>>()
            .iter(app.world())
            .count();
        assert_eq!(overlays, 1);

        app.world_mut()
            .resource_mut::<NextState<ViewerState>>()
            .set(ViewerState::Exploring);
        app.update();
        let overlays = app
            .world_mut()
            .query_filtered::<Entity, With<LoadingOverlay>>()
            .iter(app.world())
            .count();
        assert_eq!(overlays, 0);
    }
}
