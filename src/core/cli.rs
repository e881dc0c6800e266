//! Command line arguments for the application

use crate::core::errors::{ensure, validate_config_path, BoardResult};
use crate::core::settings::{MAX_PLAYERS, MONSTER_SLOTS};
use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// command line arguments for table setup and targeting configuration
#[derive(Parser, Debug, Clone, Resource)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// path to a JSON file overriding the targeting settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// how many players sit at the table
    #[arg(long, default_value_t = 2)]
    pub players: usize,

    /// how many monsters are face up when the game starts
    #[arg(long, default_value_t = 2)]
    pub monsters: usize,

    /// display debug information
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            config: None,
            players: 2,
            monsters: 2,
            debug: false,
        }
    }
}

impl CliArgs {
    pub fn validate(&self) -> BoardResult<()> {
        ensure!(
            (1..=MAX_PLAYERS).contains(&self.players),
            "--players must be between 1 and {}, got {}",
            MAX_PLAYERS,
            self.players
        );
        ensure!(
            self.monsters <= MONSTER_SLOTS,
            "--monsters must be at most {}, got {}",
            MONSTER_SLOTS,
            self.monsters
        );
        if let Some(path) = &self.config {
            validate_config_path(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let args = CliArgs::parse_from(["lootboard"]);
        assert_eq!(args.players, 2);
        assert_eq!(args.monsters, 2);
        assert!(args.config.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn player_count_is_bounded() {
        let args = CliArgs::parse_from(["lootboard", "--players", "5"]);
        assert!(args.validate().is_err());
        let args = CliArgs::parse_from(["lootboard", "--players", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn too_many_monsters_is_rejected() {
        let args = CliArgs::parse_from(["lootboard", "--monsters", "7"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn missing_config_file_is_rejected() {
        let args =
            CliArgs::parse_from(["lootboard", "--config", "nowhere/targeting.json"]);
        assert!(args.validate().is_err());
    }
}
