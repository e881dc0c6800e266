//! Discard piles for loot, treasure and monster cards

use crate::targeting::{FlatSurface, PileKind, Targetable};
use crate::ui::theme::*;
use bevy::prelude::*;

/// Cards in each discard pile, top card last
#[derive(Resource, Debug, Default, Clone)]
pub struct DiscardPiles {
    loot: Vec<String>,
    treasure: Vec<String>,
    monster: Vec<String>,
}

impl DiscardPiles {
    fn pile(&self, kind: PileKind) -> &Vec<String> {
        match kind {
            PileKind::Loot => &self.loot,
            PileKind::Treasure => &self.treasure,
            PileKind::Monster => &self.monster,
        }
    }

    fn pile_mut(&mut self, kind: PileKind) -> &mut Vec<String> {
        match kind {
            PileKind::Loot => &mut self.loot,
            PileKind::Treasure => &mut self.treasure,
            PileKind::Monster => &mut self.monster,
        }
    }

    pub fn push(&mut self, kind: PileKind, card: impl Into<String>) {
        self.pile_mut(kind).push(card.into());
    }

    pub fn count(&self, kind: PileKind) -> usize {
        self.pile(kind).len()
    }

    pub fn top(&self, kind: PileKind) -> Option<&str> {
        self.pile(kind).last().map(String::as_str)
    }
}

/// A discard pile widget
#[derive(Component, Debug)]
pub struct DiscardPileWidget {
    pub kind: PileKind,
}

#[derive(Component, Debug)]
pub struct DiscardPileText {
    pub kind: PileKind,
}

fn pile_color(kind: PileKind) -> Color {
    match kind {
        PileKind::Loot => LOOT_PILE_COLOR,
        PileKind::Treasure => TREASURE_PILE_COLOR,
        PileKind::Monster => MONSTER_PILE_COLOR,
    }
}

fn pile_caption(kind: PileKind, piles: &DiscardPiles) -> String {
    let top = piles.top(kind).unwrap_or("empty");
    format!("{} discard ({})\n{}", kind, piles.count(kind), top)
}

/// Spawns the three piles along the bottom edge
pub fn spawn_discard_piles(mut commands: Commands, piles: Res<DiscardPiles>) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            right: Val::Px(PANEL_MARGIN),
            bottom: Val::Px(PANEL_MARGIN),
            column_gap: Val::Px(PANEL_MARGIN),
            ..default()
        })
        .with_children(|row| {
            for kind in [PileKind::Loot, PileKind::Treasure, PileKind::Monster] {
                row.spawn((
                    Button,
                    Node {
                        width: Val::Px(PILE_SIZE.x),
                        min_height: Val::Px(PILE_SIZE.y),
                        padding: UiRect::all(Val::Px(PANEL_PADDING / 2.0)),
                        border: UiRect::all(Val::Px(PANEL_BORDER_WIDTH)),
                        ..default()
                    },
                    BackgroundColor(pile_color(kind)),
                    BorderColor(PANEL_BORDER_COLOR),
                    DiscardPileWidget { kind },
                    Targetable::discard_pile(kind, format!("{} discard", kind)),
                    FlatSurface,
                ))
                .with_children(|pile| {
                    pile.spawn((
                        DiscardPileText { kind },
                        Text::new(pile_caption(kind, &piles)),
                        TextFont {
                            font_size: PANEL_TEXT_FONT_SIZE,
                            ..default()
                        },
                        TextColor(PANEL_TEXT_COLOR),
                    ));
                });
            }
        });
}

pub fn refresh_discard_piles(
    piles: Res<DiscardPiles>,
    mut texts: Query<(&DiscardPileText, &mut Text)>,
) {
    if !piles.is_changed() {
        return;
    }
    for (pile, mut text) in &mut texts {
        text.0 = pile_caption(pile.kind, &piles);
    }
}
