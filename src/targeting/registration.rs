//! Candidate lifecycle
//!
//! Candidates enter the registry when their `Targetable` component appears and
//! leave it when the component (or the whole entity) goes away. Spawning a
//! candidate before the coordinator exists is fine: the plugin initializes the
//! coordinator and the next registration pass picks the candidate up.

use super::candidate::Targetable;
use super::context::Targeting;
use super::coordinator::TargetingCoordinator;
use super::highlight::OriginalLook;
use bevy::prelude::*;

/// Register candidates spawned since the last frame
pub fn register_new_candidates(mut targeting: Targeting) {
    let registered = targeting.register_added();
    if registered > 0 {
        debug!("Registered {} new targeting candidates", registered);
    }
}

/// Drop despawned candidates from the registry
pub fn unregister_removed_candidates(
    mut removed: RemovedComponents<Targetable>,
    mut coordinator: ResMut<TargetingCoordinator>,
) {
    for entity in removed.read() {
        if coordinator.unregister(entity) {
            debug!("Unregistered targeting candidate {}", entity);
        }
    }
}

/// Snapshot the look of new candidates so un-highlighting can restore it
#[allow(clippy::type_complexity)]
pub fn capture_original_look(
    mut commands: Commands,
    new_candidates: Query<
        (
            Entity,
            &Transform,
            Option<&Sprite>,
            Option<&BackgroundColor>,
            Option<&Outline>,
        ),
        (Added<Targetable>, Without<OriginalLook>),
    >,
) {
    for (entity, transform, sprite, background, outline) in &new_candidates {
        let look = OriginalLook::capture(transform, sprite, background, outline);
        commands.entity(entity).insert(look);
    }
}
