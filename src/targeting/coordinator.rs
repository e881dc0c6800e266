//! Selection coordinator
//!
//! Owns the registry of live candidates and the single targeting session.
//! A session runs from [`TargetingCoordinator::begin`] until a candidate is
//! activated or the session is cancelled. Whichever happens first tears down
//! every highlight and consumes the session, so the completion callback can
//! fire at most once.
//!
//! The coordinator never owns candidates. It stores their entity ids and
//! reaches them through a [`CandidatePool`], which the ECS glue backs with a
//! query and tests back with a plain map.

use super::candidate::Targetable;
use super::category::{describe, CategorySet, TargetCategory};
use super::selection::Selection;
use bevy::prelude::*;
use std::fmt;

/// Completion callback of a session
pub type OnChosen = Box<dyn FnOnce(Selection) + Send + Sync + 'static>;

/// Identifies one run of targeting in logs and to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// By-id access to candidates the coordinator does not own
pub trait CandidatePool {
    fn candidate(&self, id: Entity) -> Option<&Targetable>;

    fn candidate_mut(&mut self, id: Entity) -> Option<&mut Targetable>;

    /// Every candidate currently present in the scene, registered or not
    fn discover(&self) -> Vec<Entity>;
}

/// What a card effect asks the player to pick
pub struct TargetingRequest {
    allowed: CategorySet,
    prompt: Option<String>,
    on_chosen: OnChosen,
}

impl TargetingRequest {
    pub fn new(
        allowed: impl IntoIterator<Item = TargetCategory>,
        on_chosen: impl FnOnce(Selection) + Send + Sync + 'static,
    ) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
            prompt: None,
            on_chosen: Box::new(on_chosen),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn allowed(&self) -> &CategorySet {
        &self.allowed
    }
}

impl fmt::Debug for TargetingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetingRequest")
            .field("allowed", &self.allowed)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

struct TargetingSession {
    id: SessionId,
    allowed: CategorySet,
    prompt: Option<String>,
    on_chosen: OnChosen,
}

impl TargetingSession {
    fn allows(&self, category: TargetCategory) -> bool {
        self.allowed.contains(&category)
    }
}

impl fmt::Debug for TargetingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetingSession")
            .field("id", &self.id)
            .field("allowed", &self.allowed)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

/// The targeting core.
///
/// Inactive means "no session": the allowed set, prompt and callback only
/// exist inside a session, so ending one clears all of them at once.
#[derive(Resource, Debug, Default)]
pub struct TargetingCoordinator {
    registry: Vec<Entity>,
    session: Option<TargetingSession>,
    sessions_started: u64,
}

impl TargetingCoordinator {
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|session| session.id)
    }

    /// Allowed categories of the running session. Empty when inactive
    pub fn allowed_categories(&self) -> CategorySet {
        self.session
            .as_ref()
            .map(|session| session.allowed.clone())
            .unwrap_or_default()
    }

    /// Prompt of the running session, if it was given one
    pub fn prompt(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|session| session.prompt.as_deref())
    }

    pub fn is_registered(&self, id: Entity) -> bool {
        self.registry.contains(&id)
    }

    pub fn registered(&self) -> &[Entity] {
        &self.registry
    }

    /// True iff a session is running and accepts `category`
    pub fn is_category_allowed(&self, category: TargetCategory) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.allows(category))
    }

    /// Add a candidate. Returns false if it was already registered.
    ///
    /// A candidate joining mid-session receives the current eligibility right
    /// away.
    pub fn register(
        &mut self,
        id: Entity,
        pool: &mut impl CandidatePool,
    ) -> bool {
        if self.registry.contains(&id) {
            return false;
        }
        self.registry.push(id);

        if let Some(session) = &self.session {
            if let Some(candidate) = pool.candidate_mut(id) {
                let eligible = session.allows(candidate.category());
                candidate.apply_eligibility(eligible);
                debug!(
                    "Late candidate '{}' joined session {} (eligible: {})",
                    candidate.label(),
                    session.id,
                    eligible
                );
            }
        }
        true
    }

    /// Remove a candidate. Returns false if it was not registered
    pub fn unregister(&mut self, id: Entity) -> bool {
        let before = self.registry.len();
        self.registry.retain(|registered| *registered != id);
        self.registry.len() != before
    }

    /// Open a session.
    ///
    /// A session that is still running is cancelled first; its callback is
    /// dropped without being called.
    pub fn begin(
        &mut self,
        request: TargetingRequest,
        pool: &mut impl CandidatePool,
    ) -> SessionId {
        if let Some(previous) = self.session_id() {
            warn!(
                "Targeting session {} still open, cancelling it before starting a new one",
                previous
            );
            self.cancel(pool);
        }

        if self.registry.is_empty() {
            let found = pool.discover();
            if !found.is_empty() {
                debug!(
                    "Registry empty at session start, discovered {} candidates in the scene",
                    found.len()
                );
            }
            for id in found {
                if !self.registry.contains(&id) {
                    self.registry.push(id);
                }
            }
        }

        self.sessions_started += 1;
        let session = TargetingSession {
            id: SessionId(self.sessions_started),
            allowed: request.allowed,
            prompt: request.prompt.filter(|prompt| !prompt.trim().is_empty()),
            on_chosen: request.on_chosen,
        };

        let mut eligible_count = 0;
        for id in self.registry.clone() {
            if let Some(candidate) = pool.candidate_mut(id) {
                let eligible = session.allows(candidate.category());
                candidate.apply_eligibility(eligible);
                if eligible {
                    eligible_count += 1;
                }
            }
        }

        info!(
            "Targeting session {} started. Allowed: {} ({} eligible of {} candidates)",
            session.id,
            describe(&session.allowed),
            eligible_count,
            self.registry.len()
        );

        let id = session.id;
        self.session = Some(session);
        id
    }

    /// A candidate reports that the player activated it.
    ///
    /// Ignored when no session runs, when the candidate is gone or no longer
    /// registered, or when its category is not allowed; stale clicks are
    /// expected while the scene changes. Returns true when the session
    /// completed.
    pub fn candidate_activated(
        &mut self,
        id: Entity,
        pool: &mut impl CandidatePool,
    ) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        if !self.registry.contains(&id) {
            return false;
        }
        let Some(candidate) = pool.candidate(id) else {
            return false;
        };
        if !session.allows(candidate.category()) {
            return false;
        }

        let selection = candidate.build_selection();
        self.complete(selection, pool);
        true
    }

    /// Abort the running session without calling back. Returns false if
    /// nothing was running
    pub fn cancel(&mut self, pool: &mut impl CandidatePool) -> bool {
        match self.end_session(pool) {
            Some(session) => {
                info!("Targeting session {} cancelled", session.id);
                true
            }
            None => false,
        }
    }

    fn complete(&mut self, selection: Selection, pool: &mut impl CandidatePool) {
        let Some(session) = self.end_session(pool) else {
            return;
        };
        info!(
            "Targeting session {} completed with {}",
            session.id, selection
        );
        (session.on_chosen)(selection);
    }

    /// Consume the session and switch every registered candidate off
    fn end_session(
        &mut self,
        pool: &mut impl CandidatePool,
    ) -> Option<TargetingSession> {
        let session = self.session.take()?;
        for id in self.registry.clone() {
            if let Some(candidate) = pool.candidate_mut(id) {
                candidate.apply_eligibility(false);
            }
        }
        Some(session)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::targeting::selection::{PileKind, PlayerId};
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    /// In-memory pool standing in for the ECS world
    #[derive(Default)]
    pub(crate) struct MemoryPool {
        pub candidates: BTreeMap<Entity, Targetable>,
    }

    impl MemoryPool {
        pub fn spawn(&mut self, index: u32, candidate: Targetable) -> Entity {
            let id = Entity::from_raw(index);
            self.candidates.insert(id, candidate);
            id
        }

        pub fn get(&self, id: Entity) -> &Targetable {
            &self.candidates[&id]
        }
    }

    impl CandidatePool for MemoryPool {
        fn candidate(&self, id: Entity) -> Option<&Targetable> {
            self.candidates.get(&id)
        }

        fn candidate_mut(&mut self, id: Entity) -> Option<&mut Targetable> {
            self.candidates.get_mut(&id)
        }

        fn discover(&self) -> Vec<Entity> {
            self.candidates.keys().copied().collect()
        }
    }

    type Chosen = Arc<Mutex<Vec<Selection>>>;

    fn recording_request(
        allowed: impl IntoIterator<Item = TargetCategory>,
    ) -> (TargetingRequest, Chosen) {
        let chosen: Chosen = Arc::default();
        let sink = chosen.clone();
        let request = TargetingRequest::new(allowed, move |selection| {
            sink.lock().unwrap().push(selection);
        });
        (request, chosen)
    }

    fn board() -> (TargetingCoordinator, MemoryPool, Entity, Entity, Entity) {
        let mut pool = MemoryPool::default();
        let monster = pool.spawn(1, Targetable::monster(None, "Gaper"));
        pool.candidates
            .get_mut(&monster)
            .unwrap()
            .rebind_monster(Some(monster));
        let player = pool.spawn(2, Targetable::player(Some(PlayerId(0)), "P1"));
        let pile =
            pool.spawn(3, Targetable::discard_pile(PileKind::Loot, "loot"));

        let mut coordinator = TargetingCoordinator::default();
        for id in [monster, player, pile] {
            coordinator.register(id, &mut pool);
        }
        (coordinator, pool, monster, player, pile)
    }

    fn assert_torn_down(coordinator: &TargetingCoordinator, pool: &MemoryPool) {
        assert!(!coordinator.is_active());
        assert!(coordinator.allowed_categories().is_empty());
        assert!(coordinator.session_id().is_none());
        assert!(coordinator.prompt().is_none());
        for candidate in pool.candidates.values() {
            assert!(!candidate.is_highlighted(), "{} still lit", candidate.label());
            assert!(!candidate.is_interactable());
        }
    }

    #[test]
    fn register_is_idempotent_and_silent_outside_sessions() {
        let (mut coordinator, mut pool, monster, _, _) = board();
        assert!(!coordinator.register(monster, &mut pool));
        assert_eq!(coordinator.registered().len(), 3);
        assert!(!pool.get(monster).is_highlighted());

        assert!(coordinator.unregister(monster));
        assert!(!coordinator.unregister(monster));
        assert!(!coordinator.is_registered(monster));
    }

    #[test]
    fn begin_highlights_only_allowed_categories() {
        let (mut coordinator, mut pool, monster, player, pile) = board();
        let (request, _) = recording_request([TargetCategory::Monster]);
        coordinator.begin(request.with_prompt("Deal 1 damage"), &mut pool);

        assert!(coordinator.is_active());
        assert_eq!(coordinator.prompt(), Some("Deal 1 damage"));
        assert!(coordinator.is_category_allowed(TargetCategory::Monster));
        assert!(!coordinator.is_category_allowed(TargetCategory::Player));
        assert!(pool.get(monster).is_highlighted());
        assert!(pool.get(monster).is_interactable());
        assert!(!pool.get(player).is_highlighted());
        assert!(!pool.get(player).is_interactable());
        assert!(!pool.get(pile).is_highlighted());
    }

    #[test]
    fn blank_prompt_is_treated_as_missing() {
        let (mut coordinator, mut pool, ..) = board();
        let (request, _) = recording_request([TargetCategory::Player]);
        coordinator.begin(request.with_prompt("   "), &mut pool);
        assert_eq!(coordinator.prompt(), None);
    }

    #[test]
    fn disallowed_click_is_ignored_then_allowed_click_completes() {
        let (mut coordinator, mut pool, monster, player, _) = board();
        let (request, chosen) = recording_request([TargetCategory::Monster]);
        let session = coordinator.begin(request, &mut pool);

        assert!(!coordinator.candidate_activated(player, &mut pool));
        assert!(chosen.lock().unwrap().is_empty());
        assert_eq!(coordinator.session_id(), Some(session));
        assert!(pool.get(monster).is_highlighted());

        assert!(coordinator.candidate_activated(monster, &mut pool));
        assert_eq!(
            chosen.lock().unwrap().as_slice(),
            &[Selection::for_monster(monster)]
        );
        assert_torn_down(&coordinator, &pool);
    }

    #[test]
    fn callback_fires_at_most_once() {
        let (mut coordinator, mut pool, monster, _, _) = board();
        let (request, chosen) = recording_request([TargetCategory::Monster]);
        coordinator.begin(request, &mut pool);

        assert!(coordinator.candidate_activated(monster, &mut pool));
        assert!(!coordinator.candidate_activated(monster, &mut pool));
        assert!(!coordinator.cancel(&mut pool));
        assert_eq!(chosen.lock().unwrap().len(), 1);
    }

    #[test]
    fn cancel_tears_down_without_callback() {
        let (mut coordinator, mut pool, monster, ..) = board();
        let (request, chosen) = recording_request([
            TargetCategory::Monster,
            TargetCategory::Player,
        ]);
        coordinator.begin(request, &mut pool);

        assert!(coordinator.cancel(&mut pool));
        assert_torn_down(&coordinator, &pool);
        assert!(!coordinator.candidate_activated(monster, &mut pool));
        assert!(chosen.lock().unwrap().is_empty());

        // Cancelling again is a no-op
        assert!(!coordinator.cancel(&mut pool));
    }

    #[test]
    fn cancel_with_no_eligible_candidates() {
        let mut pool = MemoryPool::default();
        pool.spawn(1, Targetable::discard_pile(PileKind::Loot, "loot"));
        let mut coordinator = TargetingCoordinator::default();
        let (request, chosen) = recording_request([TargetCategory::Player]);
        coordinator.begin(request, &mut pool);
        assert!(coordinator.is_active());

        coordinator.cancel(&mut pool);
        assert!(!coordinator.is_active());
        assert!(chosen.lock().unwrap().is_empty());
    }

    #[test]
    fn late_candidate_receives_current_eligibility() {
        let (mut coordinator, mut pool, ..) = board();
        let (request, _) = recording_request([TargetCategory::Monster]);
        coordinator.begin(request, &mut pool);

        let late_monster = pool.spawn(10, Targetable::monster(None, "Clotty"));
        let late_player = pool.spawn(11, Targetable::player(Some(PlayerId(1)), "P2"));
        coordinator.register(late_monster, &mut pool);
        coordinator.register(late_player, &mut pool);

        assert!(pool.get(late_monster).is_highlighted());
        assert!(pool.get(late_monster).is_interactable());
        assert!(!pool.get(late_player).is_highlighted());
        assert!(!pool.get(late_player).is_interactable());
    }

    #[test]
    fn unregistered_candidate_is_left_alone_by_teardown() {
        let (mut coordinator, mut pool, monster, ..) = board();
        let (request, _) = recording_request([TargetCategory::Monster]);
        coordinator.begin(request, &mut pool);

        coordinator.unregister(monster);
        coordinator.cancel(&mut pool);
        // No further events reach a candidate once it left the registry
        assert!(pool.get(monster).is_highlighted());
    }

    #[test]
    fn unregistered_candidate_cannot_complete_the_session() {
        let (mut coordinator, mut pool, monster, ..) = board();
        let (request, chosen) = recording_request([TargetCategory::Monster]);
        coordinator.begin(request, &mut pool);

        coordinator.unregister(monster);
        assert!(pool.candidate(monster).is_some());
        assert!(!coordinator.candidate_activated(monster, &mut pool));
        assert!(coordinator.is_active());
        assert!(chosen.lock().unwrap().is_empty());
    }

    #[test]
    fn despawned_candidate_click_is_ignored() {
        let (mut coordinator, mut pool, monster, ..) = board();
        let (request, chosen) = recording_request([TargetCategory::Monster]);
        coordinator.begin(request, &mut pool);

        pool.candidates.remove(&monster);
        coordinator.unregister(monster);
        assert!(!coordinator.candidate_activated(monster, &mut pool));
        assert!(coordinator.is_active());
        assert!(chosen.lock().unwrap().is_empty());
    }

    #[test]
    fn reentrant_begin_cancels_the_first_session() {
        let (mut coordinator, mut pool, monster, player, _) = board();
        let (first, first_chosen) = recording_request([TargetCategory::Monster]);
        let (second, second_chosen) = recording_request([TargetCategory::Player]);

        let first_id = coordinator.begin(first, &mut pool);
        let second_id = coordinator.begin(second, &mut pool);
        assert_ne!(first_id, second_id);

        assert!(!pool.get(monster).is_highlighted());
        assert!(pool.get(player).is_highlighted());
        assert!(!coordinator.candidate_activated(monster, &mut pool));

        assert!(coordinator.candidate_activated(player, &mut pool));
        assert!(first_chosen.lock().unwrap().is_empty());
        assert_eq!(
            second_chosen.lock().unwrap().as_slice(),
            &[Selection::for_player(PlayerId(0))]
        );
    }

    #[test]
    fn empty_registry_falls_back_to_discovery() {
        let mut pool = MemoryPool::default();
        let player = pool.spawn(4, Targetable::player(Some(PlayerId(2)), "P3"));
        let mut coordinator = TargetingCoordinator::default();

        let (request, chosen) = recording_request([TargetCategory::Player]);
        coordinator.begin(request, &mut pool);

        assert!(coordinator.is_registered(player));
        assert!(pool.get(player).is_highlighted());
        assert!(coordinator.candidate_activated(player, &mut pool));
        assert_eq!(chosen.lock().unwrap()[0].player(), Some(PlayerId(2)));
    }

    #[test]
    fn missing_payload_completes_with_unresolved_selection() {
        let mut pool = MemoryPool::default();
        let seat = pool.spawn(5, Targetable::player(None, "empty seat"));
        let mut coordinator = TargetingCoordinator::default();
        coordinator.register(seat, &mut pool);

        let (request, chosen) = recording_request([TargetCategory::Player]);
        coordinator.begin(request, &mut pool);
        assert!(coordinator.candidate_activated(seat, &mut pool));

        let chosen = chosen.lock().unwrap();
        assert_eq!(chosen.len(), 1);
        assert!(!chosen[0].is_resolved());
        assert_torn_down(&coordinator, &pool);
    }

    #[test]
    fn allowed_set_is_empty_when_inactive() {
        let coordinator = TargetingCoordinator::default();
        assert!(coordinator.allowed_categories().is_empty());
        assert!(!coordinator.is_category_allowed(TargetCategory::Player));
        assert_eq!(coordinator.session_id(), None);
    }
}
