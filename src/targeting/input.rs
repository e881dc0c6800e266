//! Pointer and keyboard input for targeting
//!
//! Flat candidates are clicked through Bevy UI's `Interaction`; world
//! candidates by testing the pointer's world position against their bounds.
//! At most one activation completes per frame: the first one ends the
//! session, and every later activation finds nothing to complete.

use super::candidate::{pick_topmost, FlatSurface, WorldSurface};
use super::context::Targeting;
use crate::core::pointer::PointerInfo;
use crate::core::settings::TargetingSettings;
use bevy::prelude::*;

/// UI candidates report presses and hover transitions
pub fn handle_flat_interactions(
    interactions: Query<
        (Entity, &Interaction),
        (Changed<Interaction>, With<FlatSurface>),
    >,
    mut targeting: Targeting,
) {
    for (entity, interaction) in &interactions {
        match interaction {
            Interaction::Pressed => {
                if targeting.activate(entity) {
                    return;
                }
            }
            Interaction::Hovered => targeting.hover(entity, true),
            Interaction::None => targeting.hover(entity, false),
        }
    }
}

/// World candidates are hit-tested on left click
pub fn handle_world_clicks(
    mouse: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerInfo>,
    surfaces: Query<(
        Entity,
        &GlobalTransform,
        &WorldSurface,
        Option<&Sprite>,
    )>,
    mut targeting: Targeting,
) {
    if !targeting.is_active() || !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    // Screen panels sit above the board
    if pointer.over_ui {
        return;
    }
    let Some(point) = pointer.world else {
        return;
    };

    let hits = surfaces
        .iter()
        .filter(|(entity, ..)| {
            targeting
                .candidate(*entity)
                .is_some_and(|candidate| candidate.is_interactable())
        })
        .filter_map(|(entity, transform, surface, sprite)| {
            let bounds = surface.bounds(transform, sprite)?;
            Some((entity, bounds, transform.translation().z))
        })
        .collect::<Vec<_>>();

    if let Some(entity) = pick_topmost(point, hits) {
        targeting.activate(entity);
    }
}

/// Cancel key and secondary button both abort the running session
pub fn poll_cancel_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    settings: Res<TargetingSettings>,
    mut targeting: Targeting,
) {
    if !targeting.is_active() || !settings.allow_cancel {
        return;
    }
    if keys.just_pressed(settings.cancel_key)
        || mouse.just_pressed(settings.cancel_button)
    {
        targeting.cancel();
    }
}
