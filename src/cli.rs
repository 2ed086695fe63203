//! Command-line flags, applied on top of file and environment settings.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::core::difficulty_multiplier;
use crate::engine::load_config;
use crate::types::GameConfig;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "blockfall", version, about, long_about = None)]
pub struct Args {
    /// Difficulty from 1 (slow) to 5 (fast); 3 is neutral.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub difficulty: Option<u8>,

    /// Seed for the piece generator.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Hide the ghost piece.
    #[arg(long)]
    pub no_ghost: bool,

    /// Hide the next-piece preview.
    #[arg(long)]
    pub no_next: bool,

    /// Disable holding.
    #[arg(long)]
    pub no_hold: bool,

    /// JSON settings file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Append JSON-lines game events to this file.
    #[arg(long)]
    pub log_path: Option<PathBuf>,
}

impl Args {
    /// Defaults, then `--config`, then environment, then these flags
    pub fn resolve_config(&self) -> Result<GameConfig> {
        let mut config = load_config(self.config.as_deref())?;
        self.apply(&mut config);
        Ok(config)
    }

    /// Override `config` with the flags that were given
    pub fn apply(&self, config: &mut GameConfig) {
        if let Some(setting) = self.difficulty {
            config.speed_multiplier = difficulty_multiplier(setting);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.no_ghost {
            config.display_ghost = false;
        }
        if self.no_next {
            config.display_next = false;
        }
        if self.no_hold {
            config.hold_allowed = false;
        }
    }
}
