//! Visual emphasis for eligible candidates
//!
//! `Targetable::highlighted` is the source of truth. The systems here mirror
//! it onto tint, scale and outline, and always restore from the snapshot taken
//! when the candidate first appeared.

use super::candidate::{FlatSurface, Targetable};
use crate::core::settings::TargetingSettings;
use bevy::prelude::*;
use std::f32::consts::TAU;

/// How highlighted candidates look
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightStyle {
    /// Tint applied to the sprite or node background
    pub tint: Color,
    /// Scale multiplier while highlighted
    pub scale: f32,
    pub pulse_enabled: bool,
    /// Scale multiplier at the top of the pulse
    pub pulse_scale: f32,
    /// Seconds for one grow or shrink half of the pulse
    pub pulse_half_period: f32,
    /// Outline is only drawn on flat candidates
    pub outline_enabled: bool,
    pub outline_color: Color,
    pub outline_width: f32,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            tint: Color::srgba(1.0, 1.0, 0.5, 0.9),
            scale: 1.08,
            pulse_enabled: true,
            pulse_scale: 1.12,
            pulse_half_period: 0.6,
            outline_enabled: true,
            outline_color: Color::srgba(1.0, 0.92, 0.016, 0.95),
            outline_width: 2.0,
        }
    }
}

impl HighlightStyle {
    /// Scale multiplier of a pulsing candidate at `elapsed` seconds
    pub fn pulse_multiplier(&self, elapsed: f32) -> f32 {
        if !self.pulse_enabled || self.pulse_half_period <= 0.0 {
            return self.scale;
        }
        // Yoyo between the highlight scale and the pulse scale
        let phase = elapsed / (2.0 * self.pulse_half_period);
        let t = 0.5 - 0.5 * (phase * TAU).cos();
        self.scale + (self.pulse_scale - self.scale) * t
    }
}

/// Pre-highlight look of a candidate, captured once and never overwritten
#[derive(Component, Debug, Clone)]
pub struct OriginalLook {
    tint: Option<Color>,
    scale: Vec3,
    outline: Option<Outline>,
}

impl OriginalLook {
    pub fn capture(
        transform: &Transform,
        sprite: Option<&Sprite>,
        background: Option<&BackgroundColor>,
        outline: Option<&Outline>,
    ) -> Self {
        let tint = sprite
            .map(|sprite| sprite.color)
            .or_else(|| background.map(|background| background.0));
        Self {
            tint,
            scale: transform.scale,
            outline: outline.cloned(),
        }
    }

    pub fn tint(&self) -> Option<Color> {
        self.tint
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn outline(&self) -> Option<&Outline> {
        self.outline.as_ref()
    }
}

/// Mirror highlight state onto candidates whose state changed
#[allow(clippy::type_complexity)]
pub fn sync_highlight_visuals(
    mut commands: Commands,
    settings: Res<TargetingSettings>,
    mut candidates: Query<
        (
            Entity,
            &Targetable,
            &OriginalLook,
            &mut Transform,
            Option<&mut Sprite>,
            Option<&mut BackgroundColor>,
            Has<FlatSurface>,
        ),
        Or<(Changed<Targetable>, Added<OriginalLook>)>,
    >,
) {
    let style = &settings.highlight;
    for (entity, candidate, look, mut transform, sprite, background, is_flat) in
        &mut candidates
    {
        let on = candidate.is_highlighted();
        let tint = if on { Some(style.tint) } else { look.tint() };

        if let Some(tint) = tint {
            if let Some(mut sprite) = sprite {
                if sprite.color != tint {
                    sprite.color = tint;
                }
            } else if let Some(mut background) = background {
                if background.0 != tint {
                    background.0 = tint;
                }
            }
        }

        let scale = if on {
            look.scale() * style.scale
        } else {
            look.scale()
        };
        if transform.scale != scale {
            transform.scale = scale;
        }

        if is_flat && style.outline_enabled {
            if on {
                commands.entity(entity).insert(Outline::new(
                    Val::Px(style.outline_width),
                    Val::ZERO,
                    style.outline_color,
                ));
            } else if let Some(outline) = look.outline() {
                commands.entity(entity).insert(outline.clone());
            } else {
                commands.entity(entity).remove::<Outline>();
            }
        }
    }
}

/// Breathe highlighted candidates between the two highlight scales
pub fn animate_highlight_pulse(
    time: Res<Time>,
    settings: Res<TargetingSettings>,
    mut candidates: Query<(&Targetable, &OriginalLook, &mut Transform)>,
) {
    let style = &settings.highlight;
    if !style.pulse_enabled {
        return;
    }
    let multiplier = style.pulse_multiplier(time.elapsed_secs());
    for (candidate, look, mut transform) in &mut candidates {
        if candidate.is_highlighted() {
            transform.scale = look.scale() * multiplier;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targeting::selection::PlayerId;

    fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TargetingSettings::default())
            .add_systems(Update, sync_highlight_visuals);
        app
    }

    #[test]
    fn pulse_stays_between_highlight_and_pulse_scale() {
        let style = HighlightStyle::default();
        assert!((style.pulse_multiplier(0.0) - style.scale).abs() < 1e-5);
        assert!(
            (style.pulse_multiplier(style.pulse_half_period) - style.pulse_scale)
                .abs()
                < 1e-5
        );
        for step in 0..20 {
            let m = style.pulse_multiplier(step as f32 * 0.13);
            assert!(m >= style.scale - 1e-5 && m <= style.pulse_scale + 1e-5);
        }
    }

    #[test]
    fn pulse_disabled_holds_highlight_scale() {
        let style = HighlightStyle {
            pulse_enabled: false,
            ..default()
        };
        assert_eq!(style.pulse_multiplier(0.3), style.scale);
    }

    #[test]
    fn original_look_prefers_sprite_tint() {
        let sprite = Sprite::from_color(Color::srgb(0.2, 0.3, 0.4), Vec2::ONE);
        let background = BackgroundColor(Color::BLACK);
        let look = OriginalLook::capture(
            &Transform::from_scale(Vec3::splat(1.5)),
            Some(&sprite),
            Some(&background),
            None,
        );
        assert_eq!(look.tint(), Some(Color::srgb(0.2, 0.3, 0.4)));
        assert_eq!(look.scale(), Vec3::splat(1.5));
        assert!(look.outline().is_none());
    }

    #[test]
    fn highlight_round_trip_restores_the_original_look() {
        let mut app = headless_app();
        let original = Color::srgb(0.3, 0.1, 0.1);
        let transform = Transform::from_scale(Vec3::splat(0.5));
        let sprite = Sprite::from_color(original, Vec2::new(80.0, 110.0));
        let look = OriginalLook::capture(&transform, Some(&sprite), None, None);
        let entity = app
            .world_mut()
            .spawn((Targetable::monster(None, "Gaper"), sprite, transform, look))
            .id();
        app.update();

        let style = HighlightStyle::default();
        for _ in 0..2 {
            app.world_mut()
                .get_mut::<Targetable>(entity)
                .unwrap()
                .highlight(true);
            app.update();
        }
        let world = app.world();
        assert_eq!(world.get::<Sprite>(entity).unwrap().color, style.tint);
        assert_eq!(
            world.get::<Transform>(entity).unwrap().scale,
            Vec3::splat(0.5) * style.scale
        );

        app.world_mut()
            .get_mut::<Targetable>(entity)
            .unwrap()
            .highlight(false);
        app.update();
        let world = app.world();
        assert_eq!(world.get::<Sprite>(entity).unwrap().color, original);
        assert_eq!(world.get::<Transform>(entity).unwrap().scale, Vec3::splat(0.5));
    }

    #[test]
    fn flat_candidate_gets_outline_only_while_highlighted() {
        let mut app = headless_app();
        let transform = Transform::default();
        let background = BackgroundColor(Color::srgb(0.1, 0.1, 0.1));
        let look = OriginalLook::capture(&transform, None, Some(&background), None);
        let entity = app
            .world_mut()
            .spawn((
                Targetable::player(Some(PlayerId(0)), "P1"),
                FlatSurface,
                background,
                transform,
                look,
            ))
            .id();
        app.update();
        assert!(app.world().get::<Outline>(entity).is_none());

        app.world_mut()
            .get_mut::<Targetable>(entity)
            .unwrap()
            .highlight(true);
        app.update();
        assert!(app.world().get::<Outline>(entity).is_some());
        assert_eq!(
            app.world().get::<BackgroundColor>(entity).unwrap().0,
            HighlightStyle::default().tint
        );

        app.world_mut()
            .get_mut::<Targetable>(entity)
            .unwrap()
            .highlight(false);
        app.update();
        assert!(app.world().get::<Outline>(entity).is_none());
        assert_eq!(
            app.world().get::<BackgroundColor>(entity).unwrap().0,
            Color::srgb(0.1, 0.1, 0.1)
        );
    }
}
