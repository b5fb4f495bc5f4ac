//! Game configuration, read from TOML.

use std::path::Path;

use chessmate_core::{CheckPolicy, GeneratorOptions, PromotionPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::SearchOptions;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Per-game engine settings. Missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Search deeper once the end game begins
    pub increase_end_game_difficulty: bool,
    /// Plies added when that happens
    pub end_game_difficulty_increase: u8,
    pub check_policy: CheckPolicy,
    pub promotion_policy: PromotionPolicy,
    /// Alpha-beta pruning; off runs plain minimax
    pub pruning: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            increase_end_game_difficulty: true,
            end_game_difficulty_increase: 2,
            check_policy: CheckPolicy::Strict,
            promotion_policy: PromotionPolicy::QueenOnly,
            pruning: true,
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            check_policy: self.check_policy,
            promotion_policy: self.promotion_policy,
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            pruning: self.pruning,
            generator: self.generator_options(),
        }
    }
}

/// Search depth for a difficulty level: `2 * difficulty + 1` plies.
pub fn depth_for_difficulty(difficulty: u8) -> u8 {
    difficulty.saturating_mul(2).saturating_add(1)
}
