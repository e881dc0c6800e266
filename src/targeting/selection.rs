//! The value handed back to the rule engine when a target is chosen

use super::category::TargetCategory;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat index of a player at the table
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// Which discard pile a selection refers to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum PileKind {
    #[default]
    Loot,
    Treasure,
    Monster,
}

impl fmt::Display for PileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PileKind::Loot => "loot",
            PileKind::Treasure => "treasure",
            PileKind::Monster => "monster",
        };
        f.write_str(name)
    }
}

/// The concrete referent of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPayload {
    Player(PlayerId),
    /// The monster card entity on the board
    Monster(Entity),
    DiscardPile(PileKind),
}

/// Immutable description of what the player picked.
///
/// A selection with category [`TargetCategory::None`] means the candidate
/// could not resolve its referent. Callers must treat it as an aborted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    category: TargetCategory,
    payload: Option<TargetPayload>,
}

impl Selection {
    pub fn for_player(player: PlayerId) -> Self {
        Self {
            category: TargetCategory::Player,
            payload: Some(TargetPayload::Player(player)),
        }
    }

    pub fn for_monster(monster: Entity) -> Self {
        Self {
            category: TargetCategory::Monster,
            payload: Some(TargetPayload::Monster(monster)),
        }
    }

    pub fn for_discard_pile(pile: PileKind) -> Self {
        Self {
            category: TargetCategory::DiscardPile,
            payload: Some(TargetPayload::DiscardPile(pile)),
        }
    }

    /// The failure value: nothing could be resolved
    pub fn unresolved() -> Self {
        Self {
            category: TargetCategory::None,
            payload: None,
        }
    }

    pub fn category(&self) -> TargetCategory {
        self.category
    }

    pub fn payload(&self) -> Option<TargetPayload> {
        self.payload
    }

    /// True when this selection names a usable target
    pub fn is_resolved(&self) -> bool {
        self.category != TargetCategory::None
            && (!self.category.requires_payload() || self.payload.is_some())
    }

    pub fn player(&self) -> Option<PlayerId> {
        match self.payload {
            Some(TargetPayload::Player(id)) => Some(id),
            _ => None,
        }
    }

    pub fn monster(&self) -> Option<Entity> {
        match self.payload {
            Some(TargetPayload::Monster(entity)) => Some(entity),
            _ => None,
        }
    }

    pub fn pile(&self) -> Option<PileKind> {
        match self.payload {
            Some(TargetPayload::DiscardPile(pile)) => Some(pile),
            _ => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload {
            Some(TargetPayload::Player(id)) => write!(f, "player {id}"),
            Some(TargetPayload::Monster(entity)) => {
                write!(f, "monster {entity}")
            }
            Some(TargetPayload::DiscardPile(pile)) => {
                write!(f, "{pile} discard pile")
            }
            None => write!(f, "unresolved {}", self.category),
        }
    }
}
