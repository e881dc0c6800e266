//! The game board around targeting
//!
//! Players, monsters and discard piles are the objects card effects can
//! target. The demo rule engine in [`rules`] plays effects from the keyboard.

use crate::core::cli::CliArgs;
use crate::targeting::TargetingSystemSet;
use bevy::prelude::*;

pub mod discard;
pub mod hud;
pub mod monsters;
pub mod players;
pub mod preview;
pub mod rules;

pub use discard::DiscardPiles;
pub use monsters::{MonsterCard, MonsterSlots};
pub use players::{PlayerData, PlayerRoster};
pub use preview::CardPreview;
pub use rules::{ActionLog, CardEffect, EffectQueue, ResolvedEffect};

/// How the table is set up at startup
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSetup {
    pub players: usize,
    pub monsters: usize,
}

impl Default for TableSetup {
    fn default() -> Self {
        Self {
            players: 2,
            monsters: 2,
        }
    }
}

impl From<&CliArgs> for TableSetup {
    fn from(args: &CliArgs) -> Self {
        Self {
            players: args.players,
            monsters: args.monsters,
        }
    }
}

/// Board systems run around the targeting sets
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum BoardSystemSet {
    /// Effects are played, before candidates register
    Play,
    /// Chosen effects are applied, after targeting input
    Resolve,
    /// Panels and labels follow the game state
    Display,
}

/// Plugin adding the board, its panels and the demo rule engine
pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        let setup = match app.world().get_resource::<TableSetup>() {
            Some(setup) => *setup,
            None => app
                .world()
                .get_resource::<CliArgs>()
                .map(TableSetup::from)
                .unwrap_or_default(),
        };

        app.insert_resource(setup)
            .insert_resource(PlayerRoster::with_seats(setup.players))
            .init_resource::<MonsterSlots>()
            .init_resource::<DiscardPiles>()
            .init_resource::<CardPreview>()
            .init_resource::<EffectQueue>()
            .init_resource::<ActionLog>()
            .configure_sets(
                Update,
                (
                    BoardSystemSet::Play.before(TargetingSystemSet::Registration),
                    BoardSystemSet::Resolve.after(TargetingSystemSet::Input),
                    BoardSystemSet::Display.after(BoardSystemSet::Resolve),
                ),
            )
            .add_systems(
                Startup,
                (
                    players::spawn_player_panels,
                    discard::spawn_discard_piles,
                    monsters::spawn_initial_monsters,
                    preview::spawn_preview_panel,
                    hud::spawn_hud,
                ),
            )
            .add_systems(
                Update,
                (
                    rules::play_effects_from_hotkeys,
                    rules::spawn_monster_from_hotkey,
                )
                    .in_set(BoardSystemSet::Play),
            )
            .add_systems(
                Update,
                (
                    rules::apply_resolved_effects,
                    monsters::despawn_defeated_monsters,
                )
                    .chain()
                    .in_set(BoardSystemSet::Resolve),
            )
            .add_systems(
                Update,
                (
                    players::refresh_player_panels,
                    discard::refresh_discard_piles,
                    monsters::refresh_monster_labels,
                    hud::refresh_action_log,
                    (
                        preview::preview_hovered_monster,
                        preview::tick_preview_fade,
                        preview::sync_preview_panel,
                    )
                        .chain(),
                )
                    .in_set(BoardSystemSet::Display),
            );
    }
}
