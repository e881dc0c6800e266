//! Monster cards in the monster slots
//!
//! Monsters are sprites on the board. Each one is its own Monster candidate,
//! bound to its own entity, and hit-tested in world space.

use crate::core::settings::{
    MONSTER_CARD_SIZE, MONSTER_SLOTS, MONSTER_SLOT_SPACING,
};
use super::discard::DiscardPiles;
use crate::targeting::{PileKind, Targetable, WorldSurface};
use crate::ui::theme::*;
use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

const MONSTER_ROW_Y: f32 = 80.0;
const MONSTER_LABEL_Z: f32 = 0.1;

const MONSTER_NAMES: &[&str] = &[
    "Gaper", "Pooter", "Clotty", "Horf", "Fatty", "Dip", "Leaper", "Boom Fly",
    "Monstro", "Gurdy",
];

/// A monster face up on the board
#[derive(Component, Debug, Clone)]
pub struct MonsterCard {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub slot: usize,
}

impl MonsterCard {
    pub fn damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    pub fn label(&self) -> String {
        format!("{}\nHP {}/{}", self.name, self.health, self.max_health)
    }
}

/// Label drawn on top of a monster card
#[derive(Component, Debug)]
pub struct MonsterLabel {
    pub card: Entity,
}

/// Which monster slots are taken
#[derive(Resource, Debug, Default)]
pub struct MonsterSlots {
    occupants: [Option<Entity>; MONSTER_SLOTS],
}

impl MonsterSlots {
    pub fn first_free(&self) -> Option<usize> {
        self.occupants.iter().position(Option::is_none)
    }

    pub fn occupant(&self, slot: usize) -> Option<Entity> {
        self.occupants.get(slot).copied().flatten()
    }

    pub fn occupied(&self) -> usize {
        self.occupants.iter().filter(|slot| slot.is_some()).count()
    }

    fn fill(&mut self, slot: usize, monster: Entity) {
        if let Some(occupant) = self.occupants.get_mut(slot) {
            *occupant = Some(monster);
        }
    }

    fn vacate(&mut self, monster: Entity) {
        for occupant in &mut self.occupants {
            if *occupant == Some(monster) {
                *occupant = None;
            }
        }
    }
}

/// Board position of a monster slot, slots are centered on the origin
pub fn slot_position(slot: usize) -> Vec2 {
    let offset = slot as f32 - (MONSTER_SLOTS as f32 - 1.0) / 2.0;
    Vec2::new(offset * MONSTER_SLOT_SPACING, MONSTER_ROW_Y)
}

/// Random monster name and health
pub fn random_monster(rng: &mut impl Rng) -> (String, i32) {
    let name = MONSTER_NAMES.choose(rng).copied().unwrap_or("Gaper");
    (name.to_string(), rng.gen_range(1..=4))
}

/// Put a monster in the first free slot. Returns `None` when the board is full
pub fn spawn_monster(
    commands: &mut Commands,
    slots: &mut MonsterSlots,
    name: &str,
    health: i32,
) -> Option<Entity> {
    let Some(slot) = slots.first_free() else {
        warn!("No free monster slot for '{}'", name);
        return None;
    };
    let card = MonsterCard {
        name: name.to_string(),
        health,
        max_health: health,
        slot,
    };
    let label_text = card.label();

    let entity = commands
        .spawn((
            Sprite::from_color(MONSTER_CARD_COLOR, MONSTER_CARD_SIZE),
            Transform::from_translation(slot_position(slot).extend(0.0)),
            WorldSurface::default(),
            card,
        ))
        .id();
    // The candidate refers to the card it sits on
    commands
        .entity(entity)
        .insert(Targetable::monster(Some(entity), name));

    let label = commands
        .spawn((
            MonsterLabel { card: entity },
            Text2d::new(label_text),
            TextFont {
                font_size: CARD_LABEL_FONT_SIZE,
                ..default()
            },
            TextColor(MONSTER_LABEL_COLOR),
            TextLayout::new_with_justify(JustifyText::Center),
            Transform::from_xyz(0.0, 0.0, MONSTER_LABEL_Z),
        ))
        .id();
    commands.entity(entity).add_child(label);

    slots.fill(slot, entity);
    info!("Spawned monster '{}' in slot {}", name, slot);
    Some(entity)
}

/// Deal the starting monsters
pub fn spawn_initial_monsters(
    mut commands: Commands,
    mut slots: ResMut<MonsterSlots>,
    setup: Res<super::TableSetup>,
) {
    let mut rng = rand::thread_rng();
    for _ in 0..setup.monsters {
        let (name, health) = random_monster(&mut rng);
        spawn_monster(&mut commands, &mut slots, &name, health);
    }
}

/// Update labels of monsters whose health changed
pub fn refresh_monster_labels(
    monsters: Query<&MonsterCard, Changed<MonsterCard>>,
    mut labels: Query<(&MonsterLabel, &mut Text2d)>,
) {
    for (label, mut text) in &mut labels {
        if let Ok(card) = monsters.get(label.card) {
            text.0 = card.label();
        }
    }
}

/// Defeated monsters go to the monster discard pile. Despawning the card
/// also unregisters its candidate
pub fn despawn_defeated_monsters(
    mut commands: Commands,
    mut slots: ResMut<MonsterSlots>,
    mut piles: ResMut<DiscardPiles>,
    monsters: Query<(Entity, &MonsterCard), Changed<MonsterCard>>,
) {
    for (entity, card) in &monsters {
        if card.is_defeated() {
            info!("'{}' was defeated", card.name);
            slots.vacate(entity);
            piles.push(PileKind::Monster, card.name.clone());
            commands.entity(entity).despawn();
        }
    }
}
