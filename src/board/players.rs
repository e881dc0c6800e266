//! Players at the table and their stat panels
//!
//! Each panel is a UI button and a Player candidate, so effects that target
//! a player are resolved by clicking the panel.

use crate::targeting::{FlatSurface, PlayerId, Targetable};
use crate::ui::theme::*;
use bevy::prelude::*;

pub const STARTING_HEALTH: i32 = 2;
pub const STARTING_COINS: u32 = 3;
pub const STARTING_ATTACK: i32 = 1;

/// Stats of one player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerData {
    pub id: PlayerId,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub coins: u32,
    pub attack: i32,
}

impl PlayerData {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            health: STARTING_HEALTH,
            max_health: STARTING_HEALTH,
            coins: STARTING_COINS,
            attack: STARTING_ATTACK,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    /// Heal up to max health
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn stats_line(&self) -> String {
        format!(
            "HP {}/{}  ATK {}  {}c",
            self.health, self.max_health, self.attack, self.coins
        )
    }
}

/// Everyone seated at the table, indexed by [`PlayerId`]
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerRoster {
    players: Vec<PlayerData>,
}

impl PlayerRoster {
    pub fn with_seats(count: usize) -> Self {
        let players = (0..count)
            .map(|seat| PlayerData::new(PlayerId(seat), format!("Player {}", seat + 1)))
            .collect();
        Self { players }
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerData> {
        self.players.get(id.0)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut PlayerData> {
        self.players.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerData> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Stat panel of a player
#[derive(Component, Debug)]
pub struct PlayerPanel {
    pub player: PlayerId,
}

/// Text node showing a player's stats
#[derive(Component, Debug)]
pub struct PlayerStatsText {
    pub player: PlayerId,
}

/// Spawns a column of player panels along the left edge
pub fn spawn_player_panels(mut commands: Commands, roster: Res<PlayerRoster>) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(PANEL_MARGIN),
            top: Val::Px(PANEL_MARGIN * 5.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(PANEL_MARGIN),
            ..default()
        })
        .with_children(|column| {
            for player in roster.iter() {
                column
                    .spawn((
                        Button,
                        Node {
                            width: Val::Px(PANEL_WIDTH),
                            padding: UiRect::all(Val::Px(PANEL_PADDING)),
                            border: UiRect::all(Val::Px(PANEL_BORDER_WIDTH)),
                            flex_direction: FlexDirection::Column,
                            row_gap: Val::Px(PANEL_ROW_GAP),
                            ..default()
                        },
                        BackgroundColor(PANEL_BACKGROUND_COLOR),
                        BorderColor(PANEL_BORDER_COLOR),
                        PlayerPanel { player: player.id },
                        Targetable::player(Some(player.id), player.name.clone()),
                        FlatSurface,
                    ))
                    .with_children(|panel| {
                        panel.spawn((
                            Text::new(player.name.clone()),
                            TextFont {
                                font_size: PANEL_TITLE_FONT_SIZE,
                                ..default()
                            },
                            TextColor(PANEL_TEXT_COLOR),
                        ));
                        panel.spawn((
                            Text::new(player.stats_line()),
                            TextFont {
                                font_size: PANEL_TEXT_FONT_SIZE,
                                ..default()
                            },
                            TextColor(PANEL_TEXT_COLOR),
                            PlayerStatsText { player: player.id },
                        ));
                    });
            }
        });
}

/// Keeps the panel text in step with the roster
pub fn refresh_player_panels(
    roster: Res<PlayerRoster>,
    mut texts: Query<(&PlayerStatsText, &mut Text)>,
) {
    if !roster.is_changed() {
        return;
    }
    for (stats, mut text) in &mut texts {
        if let Some(player) = roster.get(stats.player) {
            let line = player.stats_line();
            if text.0 != line {
                text.0 = line;
            }
        }
    }
}
