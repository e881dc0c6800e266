//! Demo rule engine
//!
//! Number keys play card effects. Each effect opens a targeting session and
//! its callback queues the effect together with the chosen target; the queue
//! is applied after input handling in the same frame.

use super::discard::DiscardPiles;
use super::monsters::{random_monster, spawn_monster, MonsterCard, MonsterSlots};
use super::players::PlayerRoster;
use crate::targeting::{
    Selection, TargetCategory, TargetPayload, Targeting, TargetingRequest,
};
use crate::ui::theme::ACTION_LOG_LINES;
use bevy::prelude::*;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// A card effect that needs a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEffect {
    /// Damage a monster
    Damage(i32),
    /// Heal a player
    Heal(i32),
    /// Discard a loot card onto a pile
    Discard,
    /// Damage a player or a monster
    Bolt(i32),
}

/// Keys that play each effect
pub const EFFECT_HOTKEYS: [(KeyCode, CardEffect); 4] = [
    (KeyCode::Digit1, CardEffect::Damage(1)),
    (KeyCode::Digit2, CardEffect::Heal(1)),
    (KeyCode::Digit3, CardEffect::Discard),
    (KeyCode::Digit4, CardEffect::Bolt(1)),
];

/// Spawns a monster, also while a session runs
pub const SPAWN_MONSTER_KEY: KeyCode = KeyCode::KeyM;

impl CardEffect {
    pub fn targets(self) -> &'static [TargetCategory] {
        match self {
            CardEffect::Damage(_) => &[TargetCategory::Monster],
            CardEffect::Heal(_) => &[TargetCategory::Player],
            CardEffect::Discard => &[TargetCategory::DiscardPile],
            CardEffect::Bolt(_) => &[TargetCategory::Player, TargetCategory::Monster],
        }
    }

    /// Bolt uses the default prompt
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            CardEffect::Damage(_) => Some("Choose a monster to damage"),
            CardEffect::Heal(_) => Some("Choose a player to heal"),
            CardEffect::Discard => Some("Choose a discard pile"),
            CardEffect::Bolt(_) => None,
        }
    }
}

impl fmt::Display for CardEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardEffect::Damage(amount) => write!(f, "Damage {}", amount),
            CardEffect::Heal(amount) => write!(f, "Heal {}", amount),
            CardEffect::Discard => f.write_str("Discard"),
            CardEffect::Bolt(amount) => write!(f, "Bolt {}", amount),
        }
    }
}

/// An effect whose target has been chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEffect {
    pub effect: CardEffect,
    pub selection: Selection,
}

/// Effects handed over by targeting callbacks, waiting to be applied
#[derive(Resource, Debug, Clone, Default)]
pub struct EffectQueue(Arc<Mutex<Vec<ResolvedEffect>>>);

impl EffectQueue {
    pub fn push(&self, resolved: ResolvedEffect) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(resolved);
    }

    pub fn drain(&self) -> Vec<ResolvedEffect> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Targeting request whose callback queues `effect`
    pub fn request(&self, effect: CardEffect) -> TargetingRequest {
        let queue = self.clone();
        let request = TargetingRequest::new(effect.targets().iter().copied(), move |selection| {
            queue.push(ResolvedEffect { effect, selection });
        });
        match effect.prompt() {
            Some(prompt) => request.with_prompt(prompt),
            None => request,
        }
    }
}

/// Recent game actions, newest last
#[derive(Resource, Debug, Default)]
pub struct ActionLog {
    lines: VecDeque<String>,
}

impl ActionLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > ACTION_LOG_LINES {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }
}

pub fn play_effects_from_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    queue: Res<EffectQueue>,
    mut targeting: Targeting,
    mut log: ResMut<ActionLog>,
) {
    let Some((_, effect)) = EFFECT_HOTKEYS
        .iter()
        .find(|(key, _)| keys.just_pressed(*key))
    else {
        return;
    };
    let session = targeting.begin(queue.request(*effect));
    log.push(format!("Playing {} ({})", effect, session));
}

pub fn spawn_monster_from_hotkey(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut slots: ResMut<MonsterSlots>,
    mut log: ResMut<ActionLog>,
) {
    if !keys.just_pressed(SPAWN_MONSTER_KEY) {
        return;
    }
    let (name, health) = random_monster(&mut rand::thread_rng());
    if spawn_monster(&mut commands, &mut slots, &name, health).is_some() {
        log.push(format!("{} appears", name));
    } else {
        log.push("The monster slots are full");
    }
}

/// Apply every effect whose target was chosen
pub fn apply_resolved_effects(
    queue: Res<EffectQueue>,
    mut roster: ResMut<PlayerRoster>,
    mut piles: ResMut<DiscardPiles>,
    mut monsters: Query<&mut MonsterCard>,
    mut log: ResMut<ActionLog>,
) {
    if queue.is_empty() {
        return;
    }
    for ResolvedEffect { effect, selection } in queue.drain() {
        match (effect, selection.payload()) {
            (_, None) => {
                warn!("{} aborted, its target could not be resolved", effect);
                log.push(format!("{} fizzles", effect));
            }
            (
                CardEffect::Damage(amount) | CardEffect::Bolt(amount),
                Some(TargetPayload::Monster(entity)),
            ) => match monsters.get_mut(entity) {
                Ok(mut card) => {
                    card.damage(amount);
                    log.push(format!("{} hits {}", effect, card.name));
                }
                Err(_) => {
                    warn!("{} target {} left the board", effect, entity);
                    log.push(format!("{} fizzles", effect));
                }
            },
            (CardEffect::Bolt(amount), Some(TargetPayload::Player(id))) => {
                if let Some(player) = roster.get_mut(id) {
                    player.damage(amount);
                    log.push(format!("{} hits {}", effect, player.name));
                }
            }
            (CardEffect::Heal(amount), Some(TargetPayload::Player(id))) => {
                if let Some(player) = roster.get_mut(id) {
                    player.heal(amount);
                    log.push(format!("{} heals {}", effect, player.name));
                }
            }
            (CardEffect::Discard, Some(TargetPayload::DiscardPile(kind))) => {
                piles.push(kind, "Loot card");
                log.push(format!("Loot card goes to the {} discard", kind));
            }
            (effect, Some(payload)) => {
                warn!("{} cannot apply to {:?}", effect, payload);
            }
        }
    }
}
