//! Lootboard: a card game board with interactive target selection

pub mod board;
pub mod core;
pub mod rendering;
pub mod targeting;
pub mod ui;
pub mod utils;

pub use crate::core::{create_app, CliArgs};
pub use crate::targeting::{
    Selection, TargetCategory, Targeting, TargetingPlugin, TargetingRequest,
};
