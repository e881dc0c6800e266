//! Key help and the action log

use super::rules::{ActionLog, EFFECT_HOTKEYS, SPAWN_MONSTER_KEY};
use crate::ui::theme::*;
use bevy::prelude::*;

#[derive(Component, Debug)]
pub struct ActionLogText;

fn key_name(key: KeyCode) -> String {
    let name = format!("{:?}", key);
    name.trim_start_matches("Digit")
        .trim_start_matches("Key")
        .to_string()
}

/// Help line listing every hotkey
pub fn help_text() -> String {
    let mut parts = EFFECT_HOTKEYS
        .iter()
        .map(|(key, effect)| format!("{}: {}", key_name(*key), effect))
        .collect::<Vec<_>>();
    parts.push(format!("{}: spawn monster", key_name(SPAWN_MONSTER_KEY)));
    parts.push("Esc / right click: cancel".to_string());
    parts.join("   ")
}

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(PANEL_MARGIN),
            top: Val::Px(PANEL_MARGIN),
            ..default()
        },
        Text::new(help_text()),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(HUD_TEXT_COLOR),
    ));
    commands.spawn((
        ActionLogText,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(PANEL_MARGIN),
            bottom: Val::Px(PANEL_MARGIN),
            ..default()
        },
        Text::new(""),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(HUD_TEXT_COLOR),
    ));
}

pub fn refresh_action_log(
    log: Res<ActionLog>,
    mut texts: Query<&mut Text, With<ActionLogText>>,
) {
    if !log.is_changed() {
        return;
    }
    let lines = log.lines().collect::<Vec<_>>().join("\n");
    for mut text in &mut texts {
        text.0 = lines.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_every_hotkey() {
        let help = help_text();
        assert!(help.starts_with("1: Damage 1"));
        assert!(help.contains("4: Bolt 1"));
        assert!(help.contains("M: spawn monster"));
    }
}
