//! Application initialization and configuration

use crate::board::BoardPlugin;
use crate::core::cli::CliArgs;
use crate::core::errors::BoardResult;
use crate::core::pointer::PointerPlugin;
use crate::core::settings::TargetingSettings;
use crate::rendering::CameraPlugin;
use crate::targeting::{TargetingCoordinator, TargetingPlugin};
use crate::ui::theme::{
    BACKGROUND_COLOR, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH,
};
use bevy::prelude::*;
use bevy::winit::WinitSettings;

/// Creates a fully configured Bevy GUI application ready to run
pub fn create_app(cli_args: CliArgs) -> BoardResult<App> {
    cli_args.validate()?;
    let settings = load_settings(&cli_args)?;

    let mut app = App::new();
    configure_app_settings(&mut app, cli_args, settings);
    add_all_plugins(&mut app);
    Ok(app)
}

/// Targeting settings from `--config`, or the defaults
fn load_settings(cli_args: &CliArgs) -> BoardResult<TargetingSettings> {
    match &cli_args.config {
        Some(path) => {
            let settings = TargetingSettings::from_file(path)?;
            info!("Loaded targeting settings from {}", path.display());
            Ok(settings)
        }
        None => Ok(TargetingSettings::default()),
    }
}

/// Sets up application resources and configuration
fn configure_app_settings(
    app: &mut App,
    cli_args: CliArgs,
    settings: TargetingSettings,
) {
    let debug = cli_args.debug;
    app.insert_resource(cli_args)
        .insert_resource(settings)
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        // Pulsing highlights need continuous updates while the window has focus
        .insert_resource(WinitSettings::game());

    if debug {
        app.add_systems(Update, log_targeting_state);
    }
}

/// Configure the default Bevy plugins with custom settings
pub fn configure_default_plugins() -> bevy::app::PluginGroupBuilder {
    DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
                ..default()
            }),
            ..default()
        })
        // Disable Bevy's default LogPlugin since we're using our own custom logger
        .build()
        .disable::<bevy::log::LogPlugin>()
}

/// Adds all plugins to the application in logical groups
fn add_all_plugins(app: &mut App) {
    app.add_plugins(configure_default_plugins())
        .add_plugins((CameraPlugin, PointerPlugin))
        .add_plugins((TargetingPlugin, BoardPlugin));
}

/// Prints the coordinator state whenever it changes, enabled by `--debug`
fn log_targeting_state(coordinator: Res<TargetingCoordinator>) {
    if !coordinator.is_changed() {
        return;
    }
    match coordinator.session_id() {
        Some(id) => info!(
            "Targeting session {} active, allowed {:?}, {} candidates",
            id,
            coordinator.allowed_categories(),
            coordinator.registered().len()
        ),
        None => info!(
            "Targeting idle, {} candidates registered",
            coordinator.registered().len()
        ),
    }
}
