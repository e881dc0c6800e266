use bevy::prelude::*;

// Font Sizes
pub const PANEL_TITLE_FONT_SIZE: f32 = 22.0;
pub const PANEL_TEXT_FONT_SIZE: f32 = 16.0;
pub const CARD_LABEL_FONT_SIZE: f32 = 18.0;
pub const HUD_FONT_SIZE: f32 = 14.0;

// Panel Visual Style Constants
pub const PANEL_BACKGROUND_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 1.0);
pub const PANEL_BORDER_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 1.0);
pub const PANEL_BORDER_WIDTH: f32 = 2.0;
pub const PANEL_PADDING: f32 = 12.0;
pub const PANEL_MARGIN: f32 = 16.0;
pub const PANEL_WIDTH: f32 = 200.0;
pub const PANEL_ROW_GAP: f32 = 4.0;
pub const PANEL_TEXT_COLOR: Color = Color::srgb(0.85, 0.85, 0.85);

// Discard Pile Colors
pub const LOOT_PILE_COLOR: Color = Color::srgb(0.45, 0.32, 0.12);
pub const TREASURE_PILE_COLOR: Color = Color::srgb(0.55, 0.45, 0.1);
pub const MONSTER_PILE_COLOR: Color = Color::srgb(0.4, 0.12, 0.12);
pub const PILE_SIZE: Vec2 = Vec2::new(110.0, 70.0);

// Monster Cards
pub const MONSTER_CARD_COLOR: Color = Color::srgb(0.35, 0.15, 0.15);
pub const MONSTER_LABEL_COLOR: Color = Color::srgb(1.0, 0.95, 0.9);

// Card Preview
pub const PREVIEW_BACKGROUND_COLOR: Color = Color::srgba(0.05, 0.05, 0.05, 0.92);
pub const PREVIEW_WIDTH: f32 = 260.0;

// HUD
pub const HUD_TEXT_COLOR: Color = Color::srgb(0.75, 0.75, 0.75);
pub const ACTION_LOG_LINES: usize = 6;

// Window Configuration
pub const WINDOW_TITLE: &str = "Lootboard";
pub const WINDOW_WIDTH: f32 = 1280.0;
pub const WINDOW_HEIGHT: f32 = 800.0;

// Background Color
pub const BACKGROUND_COLOR: Color = Color::srgb(0.08, 0.1, 0.09);
