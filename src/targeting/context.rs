//! System parameter handed to everything that talks to the coordinator
//!
//! Rule-engine systems open sessions through [`Targeting`], input systems
//! report activations through it. There is no global instance; the
//! coordinator is a resource and this parameter borrows it together with the
//! candidate components for the duration of one system run.

use super::candidate::{FlatSurface, Targetable, WorldSurface};
use super::category::TargetCategory;
use super::coordinator::{
    CandidatePool, SessionId, TargetingCoordinator, TargetingRequest,
};
use crate::board::preview::CardPreview;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// ECS-backed [`CandidatePool`]
#[derive(SystemParam)]
pub struct CandidateQuery<'w, 's> {
    candidates: Query<
        'w,
        's,
        (
            Entity,
            &'static mut Targetable,
            Option<Ref<'static, FlatSurface>>,
            Option<Ref<'static, WorldSurface>>,
        ),
        Or<(With<FlatSurface>, With<WorldSurface>)>,
    >,
}

impl CandidateQuery<'_, '_> {
    /// Candidates that became complete since this system last ran: either
    /// the component or the surface marker may arrive last
    fn newly_added(&mut self) -> Vec<Entity> {
        self.candidates
            .iter_mut()
            .filter(|(_, candidate, flat, world)| {
                candidate.is_added()
                    || flat.as_ref().is_some_and(|flat| flat.is_added())
                    || world.as_ref().is_some_and(|world| world.is_added())
            })
            .map(|(entity, ..)| entity)
            .collect()
    }
}

impl CandidatePool for CandidateQuery<'_, '_> {
    fn candidate(&self, id: Entity) -> Option<&Targetable> {
        self.candidates.get(id).ok().map(|(_, candidate, ..)| candidate)
    }

    fn candidate_mut(&mut self, id: Entity) -> Option<&mut Targetable> {
        self.candidates
            .get_mut(id)
            .ok()
            .map(|(_, candidate, ..)| candidate.into_inner())
    }

    fn discover(&self) -> Vec<Entity> {
        self.candidates.iter().map(|(entity, ..)| entity).collect()
    }
}

/// Context for opening, driving and cancelling targeting sessions
#[derive(SystemParam)]
pub struct Targeting<'w, 's> {
    coordinator: ResMut<'w, TargetingCoordinator>,
    candidates: CandidateQuery<'w, 's>,
    preview: Option<ResMut<'w, CardPreview>>,
}

impl Targeting<'_, '_> {
    pub fn is_active(&self) -> bool {
        self.coordinator.is_active()
    }

    pub fn is_category_allowed(&self, category: TargetCategory) -> bool {
        self.coordinator.is_category_allowed(category)
    }

    pub fn coordinator(&self) -> &TargetingCoordinator {
        &self.coordinator
    }

    pub fn candidate(&self, entity: Entity) -> Option<&Targetable> {
        self.candidates.candidate(entity)
    }

    /// Open a session. Any card preview is hidden before the session shows,
    /// since both compete for the pointer.
    pub fn begin(&mut self, request: TargetingRequest) -> SessionId {
        if let Some(preview) = self.preview.as_mut() {
            preview.hide_immediate();
        }
        self.coordinator.begin(request, &mut self.candidates)
    }

    pub fn cancel(&mut self) -> bool {
        if !self.coordinator.is_active() {
            return false;
        }
        self.coordinator.cancel(&mut self.candidates)
    }

    /// Pointer activation on a candidate. Honored only when the candidate is
    /// interactable and its category is allowed right now.
    pub fn activate(&mut self, entity: Entity) -> bool {
        let Some(candidate) = self.candidates.candidate(entity) else {
            return false;
        };
        if !candidate.is_interactable()
            || !self.coordinator.is_category_allowed(candidate.category())
        {
            return false;
        }
        self.coordinator
            .candidate_activated(entity, &mut self.candidates)
    }

    /// Pointer entered or left a flat candidate
    pub fn hover(&mut self, entity: Entity, inside: bool) {
        let Some(candidate) = self.candidates.candidate(entity) else {
            return;
        };
        let category = candidate.category();
        let highlighted = candidate.is_highlighted();

        if inside && self.coordinator.is_category_allowed(category) {
            if !highlighted {
                if let Some(candidate) = self.candidates.candidate_mut(entity) {
                    candidate.highlight(true);
                }
            }
        } else if !inside && !self.coordinator.is_active() && highlighted {
            if let Some(candidate) = self.candidates.candidate_mut(entity) {
                candidate.highlight(false);
            }
        }
    }

    /// Register every candidate that appeared since the last run
    pub fn register_added(&mut self) -> usize {
        let added = self.candidates.newly_added();
        let mut registered = 0;
        for entity in added {
            if self.coordinator.register(entity, &mut self.candidates) {
                registered += 1;
            }
        }
        registered
    }
}
