// Settings ///////////////////////////////////////////////////////////////////
// Board layout constants and the runtime targeting settings. Targeting
// settings can be overridden from a JSON file passed with `--config`.

use crate::core::errors::{BoardContext, BoardResult};
use crate::targeting::highlight::HighlightStyle;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Board Layout ///////////////////////////////////////////////////////////////

/// Maximum number of seats at the table
pub const MAX_PLAYERS: usize = 4;
/// Number of monster slots on the board
pub const MONSTER_SLOTS: usize = 6;
/// Size of a monster card sprite in world units
pub const MONSTER_CARD_SIZE: Vec2 = Vec2::new(120.0, 168.0);
/// Horizontal distance between monster slots
pub const MONSTER_SLOT_SPACING: f32 = 150.0;

// Targeting //////////////////////////////////////////////////////////////////

/// Prompt shown when a card effect does not provide one
pub const DEFAULT_PROMPT: &str = "Choose a target";

/// Runtime settings for targeting sessions
#[derive(Resource, Debug, Clone)]
pub struct TargetingSettings {
    /// Whether the cancel key and button may abort a session
    pub allow_cancel: bool,
    pub cancel_key: KeyCode,
    pub cancel_button: MouseButton,
    pub default_prompt: String,
    /// Dimming layer color, alpha around 0.5 keeps the board readable
    pub overlay_color: Color,
    pub prompt_color: Color,
    pub prompt_font_size: f32,
    /// Distance of the prompt from the top of the screen in pixels
    pub prompt_offset: f32,
    pub prompt_width: f32,
    pub highlight: HighlightStyle,
}

impl Default for TargetingSettings {
    fn default() -> Self {
        Self {
            allow_cancel: true,
            cancel_key: KeyCode::Escape,
            cancel_button: MouseButton::Right,
            default_prompt: DEFAULT_PROMPT.to_string(),
            overlay_color: Color::srgba(0.0, 0.0, 0.0, 0.5),
            prompt_color: Color::srgba(1.0, 1.0, 1.0, 0.95),
            prompt_font_size: 36.0,
            prompt_offset: 20.0,
            prompt_width: 800.0,
            highlight: HighlightStyle::default(),
        }
    }
}

impl TargetingSettings {
    /// The prompt to display for a session
    pub fn prompt_for(&self, prompt: Option<&str>) -> String {
        match prompt {
            Some(prompt) if !prompt.trim().is_empty() => prompt.to_string(),
            _ => self.default_prompt.clone(),
        }
    }

    /// Load defaults overridden by the JSON file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> BoardResult<Self> {
        let file = TargetingConfigFile::load(path)?;
        let mut settings = Self::default();
        file.apply(&mut settings);
        Ok(settings)
    }
}

/// On-disk form of [`TargetingSettings`]. Every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetingConfigFile {
    pub allow_cancel: Option<bool>,
    pub default_prompt: Option<String>,
    pub overlay_color: Option<[f32; 4]>,
    pub prompt_color: Option<[f32; 4]>,
    pub prompt_font_size: Option<f32>,
    pub prompt_offset: Option<f32>,
    pub prompt_width: Option<f32>,
    pub highlight_color: Option<[f32; 4]>,
    pub highlight_scale: Option<f32>,
    pub pulse_enabled: Option<bool>,
    pub pulse_scale: Option<f32>,
    pub pulse_half_period: Option<f32>,
    pub outline_enabled: Option<bool>,
    pub outline_color: Option<[f32; 4]>,
    pub outline_width: Option<f32>,
}

fn rgba(color: [f32; 4]) -> Color {
    Color::srgba(color[0], color[1], color[2], color[3])
}

impl TargetingConfigFile {
    pub fn load<P: AsRef<Path>>(path: P) -> BoardResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).with_file_context("read", path)?;
        Self::parse(&contents).with_file_context("parse", path)
    }

    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    pub fn apply(self, settings: &mut TargetingSettings) {
        if let Some(allow) = self.allow_cancel {
            settings.allow_cancel = allow;
        }
        if let Some(prompt) = self.default_prompt {
            settings.default_prompt = prompt;
        }
        if let Some(color) = self.overlay_color {
            settings.overlay_color = rgba(color);
        }
        if let Some(color) = self.prompt_color {
            settings.prompt_color = rgba(color);
        }
        if let Some(size) = self.prompt_font_size {
            settings.prompt_font_size = size;
        }
        if let Some(offset) = self.prompt_offset {
            settings.prompt_offset = offset;
        }
        if let Some(width) = self.prompt_width {
            settings.prompt_width = width;
        }

        let highlight = &mut settings.highlight;
        if let Some(color) = self.highlight_color {
            highlight.tint = rgba(color);
        }
        if let Some(scale) = self.highlight_scale {
            highlight.scale = scale;
        }
        if let Some(enabled) = self.pulse_enabled {
            highlight.pulse_enabled = enabled;
        }
        if let Some(scale) = self.pulse_scale {
            highlight.pulse_scale = scale;
        }
        if let Some(period) = self.pulse_half_period {
            highlight.pulse_half_period = period;
        }
        if let Some(enabled) = self.outline_enabled {
            highlight.outline_enabled = enabled;
        }
        if let Some(color) = self.outline_color {
            highlight.outline_color = rgba(color);
        }
        if let Some(width) = self.outline_width {
            highlight.outline_width = width;
        }
    }
}
