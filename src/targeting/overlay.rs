//! Screen dimming and prompt shown while a session runs
//!
//! The presenter is created on the first session and reused afterwards. It
//! never takes pointer focus, so candidates below stay clickable. Without a
//! camera there is nothing to draw on; targeting still works, just without
//! the dim layer.

use super::coordinator::TargetingCoordinator;
use crate::core::settings::TargetingSettings;
use bevy::prelude::*;
use bevy::ui::FocusPolicy;

/// Root node of the dimming layer
#[derive(Component, Debug, Default)]
pub struct TargetingOverlay;

/// Prompt text inside the overlay
#[derive(Component, Debug, Default)]
pub struct TargetingPrompt;

/// Tracks the lazily spawned overlay entities
#[derive(Resource, Debug, Default)]
pub struct OverlayPresenter {
    root: Option<Entity>,
    prompt: Option<Entity>,
    warned_missing_surface: bool,
}

impl OverlayPresenter {
    pub fn is_created(&self) -> bool {
        self.root.is_some()
    }

    pub fn root(&self) -> Option<Entity> {
        self.root
    }

    pub fn prompt(&self) -> Option<Entity> {
        self.prompt
    }
}

fn spawn_overlay(
    commands: &mut Commands,
    settings: &TargetingSettings,
    prompt: &str,
) -> (Entity, Entity) {
    let root = commands
        .spawn((
            TargetingOverlay,
            Node {
                position_type: PositionType::Absolute,
                left: Val::ZERO,
                top: Val::ZERO,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::FlexStart,
                ..default()
            },
            BackgroundColor(settings.overlay_color),
            FocusPolicy::Pass,
            // Below every other UI root, above the board
            GlobalZIndex(-1),
            Visibility::Inherited,
        ))
        .id();

    let prompt = commands
        .spawn((
            TargetingPrompt,
            Node {
                width: Val::Px(settings.prompt_width),
                margin: UiRect::top(Val::Px(settings.prompt_offset)),
                justify_content: JustifyContent::Center,
                ..default()
            },
            Text::new(prompt),
            TextFont {
                font_size: settings.prompt_font_size,
                ..default()
            },
            TextColor(settings.prompt_color),
            TextLayout::new_with_justify(JustifyText::Center),
            FocusPolicy::Pass,
        ))
        .id();

    commands.entity(root).add_child(prompt);
    (root, prompt)
}

/// Show or hide the overlay whenever the coordinator changes
pub fn sync_overlay(
    mut commands: Commands,
    coordinator: Res<TargetingCoordinator>,
    settings: Res<TargetingSettings>,
    mut presenter: ResMut<OverlayPresenter>,
    cameras: Query<(), With<Camera>>,
    mut roots: Query<&mut Visibility, With<TargetingOverlay>>,
    mut prompts: Query<&mut Text, With<TargetingPrompt>>,
) {
    if !coordinator.is_changed() {
        return;
    }

    let prompt_text = settings.prompt_for(coordinator.prompt());

    if !coordinator.is_active() {
        if let Some(root) = presenter.root {
            if let Ok(mut visibility) = roots.get_mut(root) {
                *visibility = Visibility::Hidden;
            }
        }
        return;
    }

    let Some(root) = presenter.root else {
        if cameras.is_empty() {
            if !presenter.warned_missing_surface {
                warn!("No camera to draw the targeting overlay on, continuing without it");
                presenter.warned_missing_surface = true;
            }
            return;
        }
        let (root, prompt) = spawn_overlay(&mut commands, &settings, &prompt_text);
        presenter.root = Some(root);
        presenter.prompt = Some(prompt);
        debug!("Created targeting overlay");
        return;
    };

    if let Ok(mut visibility) = roots.get_mut(root) {
        *visibility = Visibility::Inherited;
    }
    if let Some(prompt) = presenter.prompt {
        if let Ok(mut text) = prompts.get_mut(prompt) {
            text.0 = prompt_text;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targeting::candidate::{FlatSurface, Targetable};
    use crate::targeting::context::Targeting;
    use crate::targeting::coordinator::TargetingRequest;
    use crate::targeting::category::TargetCategory;
    use crate::targeting::selection::PlayerId;

    #[derive(Resource, Default)]
    struct SessionControl(Option<bool>);

    /// `Some(true)` opens a session with a prompt, `Some(false)` cancels it
    fn drive(mut command: ResMut<SessionControl>, mut targeting: Targeting) {
        match command.0.take() {
            Some(true) => {
                targeting.begin(
                    TargetingRequest::new([TargetCategory::Player], |_| {})
                        .with_prompt("Choose a player"),
                );
            }
            Some(false) => {
                targeting.cancel();
            }
            None => {}
        }
    }

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TargetingSettings::default())
            .init_resource::<TargetingCoordinator>()
            .init_resource::<OverlayPresenter>()
            .init_resource::<SessionControl>()
            .add_systems(Update, (drive, sync_overlay).chain());
        app.world_mut().spawn((
            Targetable::player(Some(PlayerId(0)), "P1"),
            FlatSurface,
            Transform::default(),
        ));
        app
    }

    fn run(app: &mut App, command: bool) {
        app.world_mut().resource_mut::<SessionControl>().0 = Some(command);
        app.update();
    }

    #[test]
    fn missing_camera_degrades_to_no_overlay() {
        let mut app = app();
        run(&mut app, true);

        assert!(app.world().resource::<TargetingCoordinator>().is_active());
        let presenter = app.world().resource::<OverlayPresenter>();
        assert!(!presenter.is_created());
        assert!(presenter.warned_missing_surface);
    }

    #[test]
    fn overlay_is_created_once_and_hidden_on_cancel() {
        let mut app = app();
        app.world_mut().spawn(Camera::default());

        run(&mut app, true);
        let root = app.world().resource::<OverlayPresenter>().root().unwrap();
        let prompt = app.world().resource::<OverlayPresenter>().prompt().unwrap();
        assert_eq!(
            app.world().get::<Visibility>(root),
            Some(&Visibility::Inherited)
        );
        assert_eq!(app.world().get::<Text>(prompt).unwrap().0, "Choose a player");

        run(&mut app, false);
        assert_eq!(app.world().get::<Visibility>(root), Some(&Visibility::Hidden));

        run(&mut app, true);
        assert_eq!(app.world().resource::<OverlayPresenter>().root(), Some(root));
        assert_eq!(
            app.world().get::<Visibility>(root),
            Some(&Visibility::Inherited)
        );
        let mut overlays = app.world_mut().query::<&TargetingOverlay>();
        assert_eq!(overlays.iter(app.world()).count(), 1);
    }
}
