//! Selectable board objects
//!
//! A candidate is any entity carrying [`Targetable`]. The component holds the
//! shared contract (fixed category, payload binding, interactable and
//! highlight flags). How a click reaches it depends on the surface marker next
//! to it:
//! - [`FlatSurface`] for UI nodes, activated through Bevy's `Interaction`
//! - [`WorldSurface`] for sprites, activated by a point-in-bounds test

use super::category::TargetCategory;
use super::selection::{PileKind, PlayerId, Selection};
use bevy::prelude::*;

/// Where the candidate gets its referent from when it is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateBinding {
    Player(Option<PlayerId>),
    Monster(Option<Entity>),
    DiscardPile(PileKind),
    Unbound,
}

/// A selectable object on the board
#[derive(Component, Debug, Clone)]
pub struct Targetable {
    category: TargetCategory,
    binding: CandidateBinding,
    label: String,
    interactable: bool,
    highlighted: bool,
}

impl Targetable {
    fn new(
        category: TargetCategory,
        binding: CandidateBinding,
        label: impl Into<String>,
    ) -> Self {
        Self {
            category,
            binding,
            label: label.into(),
            interactable: false,
            highlighted: false,
        }
    }

    /// A player seat. `None` leaves the seat unassigned
    pub fn player(player: Option<PlayerId>, label: impl Into<String>) -> Self {
        Self::new(
            TargetCategory::Player,
            CandidateBinding::Player(player),
            label,
        )
    }

    pub fn monster(monster: Option<Entity>, label: impl Into<String>) -> Self {
        Self::new(
            TargetCategory::Monster,
            CandidateBinding::Monster(monster),
            label,
        )
    }

    pub fn discard_pile(pile: PileKind, label: impl Into<String>) -> Self {
        Self::new(
            TargetCategory::DiscardPile,
            CandidateBinding::DiscardPile(pile),
            label,
        )
    }

    /// A candidate of the given category with nothing to resolve
    pub fn unbound(category: TargetCategory, label: impl Into<String>) -> Self {
        Self::new(category, CandidateBinding::Unbound, label)
    }

    pub fn category(&self) -> TargetCategory {
        self.category
    }

    pub fn binding(&self) -> CandidateBinding {
        self.binding
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Point a monster candidate at a different card, or at nothing.
    ///
    /// The category never changes; rebinding a non-monster candidate is ignored.
    pub fn rebind_monster(&mut self, monster: Option<Entity>) {
        if let CandidateBinding::Monster(current) = &mut self.binding {
            *current = monster;
        } else {
            warn!(
                "Ignoring monster rebind on {} candidate '{}'",
                self.category, self.label
            );
        }
    }

    /// Gates whether activation is honored. No visual effect
    pub fn set_interactable(&mut self, can: bool) {
        self.interactable = can;
    }

    /// Toggle the targeting emphasis. Returns true when the state changed
    pub fn highlight(&mut self, on: bool) -> bool {
        let changed = self.highlighted != on;
        self.highlighted = on;
        changed
    }

    /// Highlight and interactable always move together during a session
    pub fn apply_eligibility(&mut self, eligible: bool) {
        self.highlight(eligible);
        self.set_interactable(eligible);
    }

    /// Resolve the binding into a selection.
    ///
    /// A missing referent is recoverable: it is logged and reported as
    /// [`Selection::unresolved`].
    pub fn build_selection(&self) -> Selection {
        match (self.category, self.binding) {
            (TargetCategory::Player, CandidateBinding::Player(Some(id))) => {
                Selection::for_player(id)
            }
            (TargetCategory::Monster, CandidateBinding::Monster(Some(entity))) => {
                Selection::for_monster(entity)
            }
            (
                TargetCategory::DiscardPile,
                CandidateBinding::DiscardPile(pile),
            ) => Selection::for_discard_pile(pile),
            (category, binding) => {
                warn!(
                    "Could not build a {} selection for '{}' (binding: {:?})",
                    category, self.label, binding
                );
                Selection::unresolved()
            }
        }
    }
}

/// Marker for candidates living in the UI overlay
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct FlatSurface;

/// Marker for candidates living in world space, hit-tested spatially
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct WorldSurface {
    /// Explicit bounds size. Falls back to the sprite's custom size
    pub size: Option<Vec2>,
}

impl WorldSurface {
    pub fn sized(size: Vec2) -> Self {
        Self { size: Some(size) }
    }

    /// Axis-aligned world bounds of the candidate, if it has a known size
    pub fn bounds(
        &self,
        transform: &GlobalTransform,
        sprite: Option<&Sprite>,
    ) -> Option<Rect> {
        let size = self
            .size
            .or_else(|| sprite.and_then(|sprite| sprite.custom_size))?;
        let transform = transform.compute_transform();
        let scaled = size * transform.scale.truncate().abs();
        Some(Rect::from_center_size(transform.translation.truncate(), scaled))
    }
}

/// Pick the topmost candidate under `point`. Ties on depth keep the first
pub fn pick_topmost(
    point: Vec2,
    candidates: impl IntoIterator<Item = (Entity, Rect, f32)>,
) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;
    for (entity, rect, depth) in candidates {
        if !rect.contains(point) {
            continue;
        }
        match best {
            Some((_, best_depth)) if best_depth >= depth => {}
            _ => best = Some((entity, depth)),
        }
    }
    best.map(|(entity, _)| entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_is_idempotent() {
        let mut candidate = Targetable::player(Some(PlayerId(0)), "P1");
        assert!(candidate.highlight(true));
        assert!(!candidate.highlight(true));
        assert!(candidate.is_highlighted());
        assert!(candidate.highlight(false));
        assert!(!candidate.is_highlighted());
    }

    #[test]
    fn interactable_does_not_touch_highlight() {
        let mut candidate =
            Targetable::discard_pile(PileKind::Loot, "loot discard");
        candidate.set_interactable(true);
        assert!(candidate.is_interactable());
        assert!(!candidate.is_highlighted());
    }

    #[test]
    fn unassigned_player_builds_unresolved_selection() {
        let candidate = Targetable::player(None, "empty seat");
        let selection = candidate.build_selection();
        assert_eq!(selection.category(), TargetCategory::None);
        assert!(!selection.is_resolved());
    }

    #[test]
    fn cleared_monster_binding_builds_unresolved_selection() {
        let monster = Entity::from_raw(3);
        let mut candidate = Targetable::monster(Some(monster), "Gaper");
        assert_eq!(candidate.build_selection().monster(), Some(monster));

        candidate.rebind_monster(None);
        assert_eq!(candidate.category(), TargetCategory::Monster);
        assert!(!candidate.build_selection().is_resolved());
    }

    #[test]
    fn rebind_does_not_change_category() {
        let mut candidate = Targetable::player(Some(PlayerId(1)), "P2");
        candidate.rebind_monster(Some(Entity::from_raw(9)));
        assert_eq!(candidate.category(), TargetCategory::Player);
        assert_eq!(candidate.build_selection().player(), Some(PlayerId(1)));
    }

    #[test]
    fn world_bounds_use_sprite_size_and_scale() {
        let surface = WorldSurface::default();
        let sprite = Sprite {
            custom_size: Some(Vec2::new(100.0, 140.0)),
            ..default()
        };
        let transform = GlobalTransform::from(
            Transform::from_xyz(50.0, 0.0, 1.0).with_scale(Vec3::splat(2.0)),
        );

        let bounds = surface.bounds(&transform, Some(&sprite)).unwrap();
        assert!(bounds.min.abs_diff_eq(Vec2::new(-50.0, -140.0), 1e-4));
        assert!(bounds.max.abs_diff_eq(Vec2::new(150.0, 140.0), 1e-4));
        assert!(surface.bounds(&transform, None).is_none());
    }

    #[test]
    fn topmost_hit_wins() {
        let back = Entity::from_raw(1);
        let front = Entity::from_raw(2);
        let far = Entity::from_raw(3);
        let rect = Rect::from_center_size(Vec2::ZERO, Vec2::splat(10.0));
        let elsewhere =
            Rect::from_center_size(Vec2::new(100.0, 0.0), Vec2::splat(10.0));

        let picked = pick_topmost(
            Vec2::new(1.0, 1.0),
            [(back, rect, 0.0), (front, rect, 2.0), (far, elsewhere, 5.0)],
        );
        assert_eq!(picked, Some(front));
        assert_eq!(pick_topmost(Vec2::new(50.0, 50.0), [(back, rect, 0.0)]), None);
    }
}
