//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - Application initialization and configuration
//! - Settings and CLI handling
//! - Pointer position tracking
//! - Error handling

pub mod app;
pub mod cli;
pub mod errors;
pub mod pointer;
pub mod settings;

// Re-export commonly used items
pub use app::create_app;
pub use cli::CliArgs;
pub use errors::{BoardContext, BoardResult};
pub use pointer::{PointerInfo, PointerPlugin};
pub use settings::TargetingSettings;
