//! Mouse pointer tracking

use crate::rendering::cameras::BoardCamera;
use crate::targeting::TargetingSystemSet;
use bevy::prelude::*;

/// Single source of truth for the pointer position
#[derive(Resource, Debug, Default, Clone)]
pub struct PointerInfo {
    /// Screen space coordinates (pixels), `None` outside the window
    pub screen: Option<Vec2>,
    /// Board coordinates under the pointer
    pub world: Option<Vec2>,
    /// The pointer is over an interactive UI node
    pub over_ui: bool,
}

/// Plugin that converts the cursor position once per frame
pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerInfo>().add_systems(
            Update,
            update_pointer_position.before(TargetingSystemSet::Input),
        );
    }
}

/// This is the only place screen to board conversion happens
fn update_pointer_position(
    mut pointer_info: ResMut<PointerInfo>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<BoardCamera>>,
    interactions: Query<&Interaction>,
) {
    pointer_info.over_ui = interactions
        .iter()
        .any(|interaction| *interaction != Interaction::None);

    let Ok(window) = windows.single() else {
        return;
    };
    pointer_info.screen = window.cursor_position();
    pointer_info.world = match (pointer_info.screen, camera_query.single()) {
        (Some(screen_pos), Ok((camera, camera_transform))) => camera
            .viewport_to_world_2d(camera_transform, screen_pos)
            .ok(),
        _ => None,
    };
}
