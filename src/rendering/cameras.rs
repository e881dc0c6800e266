//! Camera for the board
//!
//! A single 2D camera renders both the board sprites and the UI panels.
//! PanCam lets the middle mouse button drag the board around; left and right
//! buttons are left to targeting.

use crate::ui::theme::BACKGROUND_COLOR;
use bevy::prelude::*;
use bevy_pancam::*;

const MIN_CAMERA_SCALE: f32 = 0.5;
const MAX_CAMERA_SCALE: f32 = 3.0;

/// Component that marks the board camera
#[derive(Component)]
pub struct BoardCamera;

/// Spawns the board camera
pub fn spawn_board_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(BACKGROUND_COLOR),
            ..default()
        },
        BoardCamera,
        PanCam {
            // Left click selects targets, right click cancels
            grab_buttons: vec![MouseButton::Middle],
            min_scale: MIN_CAMERA_SCALE,
            max_scale: MAX_CAMERA_SCALE,
            ..default()
        },
    ));
}

/// Plugin to organize camera-related systems
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanCamPlugin)
            .add_systems(Startup, spawn_board_camera);
    }
}
