//! Enlarged card preview shown while hovering a card
//!
//! Hovering a monster shows its card in a side panel. The preview never
//! shows while a targeting session runs, and opening a session hides it at
//! once.

use super::monsters::MonsterCard;
use crate::core::pointer::PointerInfo;
use crate::targeting::candidate::pick_topmost;
use crate::targeting::{TargetingCoordinator, WorldSurface};
use crate::ui::theme::*;
use bevy::prelude::*;

/// Seconds a hidden preview takes to fade out
pub const PREVIEW_FADE_SECS: f32 = 0.15;

/// What the preview displays
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewCard {
    pub title: String,
    pub body: String,
    /// Board entity the card belongs to
    pub source: Option<Entity>,
}

/// The single card preview of the board
#[derive(Resource, Debug, Default)]
pub struct CardPreview {
    card: Option<PreviewCard>,
    /// Remaining fade time once hidden with a fade
    fading: Option<f32>,
}

impl CardPreview {
    pub fn show(&mut self, card: PreviewCard) {
        self.fading = None;
        self.card = Some(card);
    }

    /// Fade the preview out
    pub fn hide(&mut self) {
        if self.card.is_some() && self.fading.is_none() {
            self.fading = Some(PREVIEW_FADE_SECS);
        }
    }

    /// Remove the preview without fading
    pub fn hide_immediate(&mut self) {
        self.card = None;
        self.fading = None;
    }

    pub fn is_visible(&self) -> bool {
        self.card.is_some()
    }

    pub fn card(&self) -> Option<&PreviewCard> {
        self.card.as_ref()
    }

    pub fn source(&self) -> Option<Entity> {
        self.card.as_ref().and_then(|card| card.source)
    }

    /// Opacity of the panel, from 1 when shown down to 0 at the end of a fade
    pub fn opacity(&self) -> f32 {
        match (&self.card, self.fading) {
            (None, _) => 0.0,
            (Some(_), None) => 1.0,
            (Some(_), Some(left)) => (left / PREVIEW_FADE_SECS).clamp(0.0, 1.0),
        }
    }

    fn tick(&mut self, delta: f32) {
        if let Some(left) = self.fading {
            let left = left - delta;
            if left <= 0.0 {
                self.hide_immediate();
            } else {
                self.fading = Some(left);
            }
        }
    }
}

impl PreviewCard {
    pub fn for_monster(entity: Entity, card: &MonsterCard) -> Self {
        Self {
            title: card.name.clone(),
            body: format!("Health {}/{}\nSlot {}", card.health, card.max_health, card.slot + 1),
            source: Some(entity),
        }
    }
}

/// Root node of the preview panel
#[derive(Component, Debug)]
pub struct PreviewPanel;

#[derive(Component, Debug)]
pub struct PreviewTitle;

#[derive(Component, Debug)]
pub struct PreviewBody;

pub fn spawn_preview_panel(mut commands: Commands) {
    commands
        .spawn((
            PreviewPanel,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(PANEL_MARGIN),
                top: Val::Px(PANEL_MARGIN * 5.0),
                width: Val::Px(PREVIEW_WIDTH),
                padding: UiRect::all(Val::Px(PANEL_PADDING)),
                border: UiRect::all(Val::Px(PANEL_BORDER_WIDTH)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(PANEL_ROW_GAP),
                ..default()
            },
            BackgroundColor(PREVIEW_BACKGROUND_COLOR),
            BorderColor(PANEL_BORDER_COLOR),
            Visibility::Hidden,
        ))
        .with_children(|panel| {
            panel.spawn((
                PreviewTitle,
                Text::new(""),
                TextFont {
                    font_size: PANEL_TITLE_FONT_SIZE,
                    ..default()
                },
                TextColor(PANEL_TEXT_COLOR),
            ));
            panel.spawn((
                PreviewBody,
                Text::new(""),
                TextFont {
                    font_size: PANEL_TEXT_FONT_SIZE,
                    ..default()
                },
                TextColor(PANEL_TEXT_COLOR),
            ));
        });
}

/// Show the hovered monster, unless a targeting session is running
pub fn preview_hovered_monster(
    pointer: Res<PointerInfo>,
    coordinator: Res<TargetingCoordinator>,
    mut preview: ResMut<CardPreview>,
    monsters: Query<(
        Entity,
        &MonsterCard,
        &GlobalTransform,
        &WorldSurface,
        Option<&Sprite>,
    )>,
) {
    if coordinator.is_active() {
        if preview.is_visible() {
            preview.hide_immediate();
        }
        return;
    }

    let hovered = match (pointer.world, pointer.over_ui) {
        (Some(point), false) => pick_topmost(
            point,
            monsters.iter().filter_map(|(entity, _, transform, surface, sprite)| {
                let bounds = surface.bounds(transform, sprite)?;
                Some((entity, bounds, transform.translation().z))
            }),
        ),
        _ => None,
    };

    match hovered.and_then(|entity| Some((entity, monsters.get(entity).ok()?.1))) {
        Some((entity, card)) => {
            let next = PreviewCard::for_monster(entity, card);
            if preview.card() != Some(&next) || preview.fading.is_some() {
                preview.show(next);
            }
        }
        None => {
            if preview.is_visible() && preview.fading.is_none() {
                preview.hide();
            }
        }
    }
}

pub fn tick_preview_fade(time: Res<Time>, mut preview: ResMut<CardPreview>) {
    if preview.fading.is_some() {
        preview.tick(time.delta_secs());
    }
}

/// Mirror the preview resource onto its panel
pub fn sync_preview_panel(
    preview: Res<CardPreview>,
    mut panels: Query<(&mut Visibility, &mut BackgroundColor), With<PreviewPanel>>,
    mut titles: Query<&mut Text, (With<PreviewTitle>, Without<PreviewBody>)>,
    mut bodies: Query<&mut Text, (With<PreviewBody>, Without<PreviewTitle>)>,
) {
    if !preview.is_changed() {
        return;
    }
    let opacity = preview.opacity();
    for (mut visibility, mut background) in &mut panels {
        *visibility = if preview.is_visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        background.0 = PREVIEW_BACKGROUND_COLOR
            .with_alpha(PREVIEW_BACKGROUND_COLOR.alpha() * opacity);
    }
    if let Some(card) = preview.card() {
        for mut title in &mut titles {
            title.0 = card.title.clone();
        }
        for mut body in &mut bodies {
            body.0 = card.body.clone();
        }
    }
}
