//! Target categories
//!
//! Every candidate on the board belongs to exactly one category for its whole
//! lifetime. A targeting session is opened with the set of categories the card
//! effect accepts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// What a selection can denote
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum TargetCategory {
    /// No valid target could be resolved
    #[default]
    None,
    Player,
    Monster,
    DiscardPile,
}

impl TargetCategory {
    /// Categories that must carry a concrete referent in their selection
    pub fn requires_payload(self) -> bool {
        matches!(self, TargetCategory::Player | TargetCategory::Monster)
    }

    /// Every category a card effect can ask for
    pub const SELECTABLE: [TargetCategory; 3] = [
        TargetCategory::Player,
        TargetCategory::Monster,
        TargetCategory::DiscardPile,
    ];
}

impl fmt::Display for TargetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetCategory::None => "none",
            TargetCategory::Player => "player",
            TargetCategory::Monster => "monster",
            TargetCategory::DiscardPile => "discard pile",
        };
        f.write_str(name)
    }
}

/// Set of categories eligible during a session
pub type CategorySet = HashSet<TargetCategory>;

/// Human readable list used in log lines, in a stable order
pub fn describe(categories: &CategorySet) -> String {
    let mut names: Vec<String> = TargetCategory::SELECTABLE
        .iter()
        .chain(std::iter::once(&TargetCategory::None))
        .filter(|c| categories.contains(*c))
        .map(|c| c.to_string())
        .collect();
    if names.is_empty() {
        names.push("nothing".to_string());
    }
    names.join(", ")
}
