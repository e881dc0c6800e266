//! Interactive target selection
//!
//! A card effect opens a session with the categories it accepts, the player
//! clicks one highlighted object on the board, and the effect's callback
//! receives the resulting [`Selection`]. Cancelling (Escape or right click by
//! default) ends the session without calling back.
//!
//! Candidates come from two surfaces: UI panels such as a player's stats
//! ([`FlatSurface`]) and sprites on the board such as monster cards
//! ([`WorldSurface`]). Both share one registry in [`TargetingCoordinator`].

use crate::core::pointer::PointerInfo;
use crate::core::settings::TargetingSettings;
use bevy::prelude::*;

pub mod candidate;
pub mod category;
pub mod context;
pub mod coordinator;
pub mod highlight;
pub mod input;
pub mod overlay;
pub mod registration;
pub mod selection;

pub use candidate::{CandidateBinding, FlatSurface, Targetable, WorldSurface};
pub use category::{CategorySet, TargetCategory};
pub use context::Targeting;
pub use coordinator::{
    CandidatePool, OnChosen, SessionId, TargetingCoordinator, TargetingRequest,
};
pub use highlight::{HighlightStyle, OriginalLook};
pub use overlay::OverlayPresenter;
pub use selection::{PileKind, PlayerId, Selection, TargetPayload};

/// System sets for targeting, run in this order every frame
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum TargetingSystemSet {
    /// Candidates join and leave the registry
    Registration,
    /// Clicks and the cancel key are turned into coordinator calls
    Input,
    /// Overlay and highlight visuals follow the coordinator
    Presentation,
}

/// Plugin adding the selection coordinator and its candidate systems
pub struct TargetingPlugin;

impl Plugin for TargetingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TargetingCoordinator>()
            .init_resource::<TargetingSettings>()
            .init_resource::<OverlayPresenter>()
            .init_resource::<PointerInfo>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .configure_sets(
                Update,
                (
                    TargetingSystemSet::Registration,
                    TargetingSystemSet::Input,
                    TargetingSystemSet::Presentation,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    registration::unregister_removed_candidates,
                    registration::register_new_candidates,
                    registration::capture_original_look,
                )
                    .chain()
                    .in_set(TargetingSystemSet::Registration),
            )
            .add_systems(
                Update,
                (
                    input::handle_flat_interactions,
                    input::handle_world_clicks,
                    input::poll_cancel_input,
                )
                    .chain()
                    .in_set(TargetingSystemSet::Input),
            )
            .add_systems(
                Update,
                (
                    overlay::sync_overlay,
                    highlight::sync_highlight_visuals,
                    highlight::animate_highlight_pulse,
                )
                    .chain()
                    .in_set(TargetingSystemSet::Presentation),
            );
    }
}
