//! Rules and layout configuration (.json)
//!
//! Every key is optional; missing keys take the defaults below. The two
//! files are read once at startup and folded into an [`EngineConfig`] that
//! the engine receives by value.

use crate::core::{MatchingRules, Point};
use crate::game::EngineConfig;
use crate::undo::DEFAULT_UNDO_DEPTH;
use crate::{MatchError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Upper bound accepted for `MaxUndoSteps`
pub const MAX_UNDO_STEPS_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UndoSettings {
    #[serde(rename = "MaxUndoSteps")]
    pub max_undo_steps: usize,
    #[serde(rename = "EnableUndo")]
    pub enable_undo: bool,
}

impl Default for UndoSettings {
    fn default() -> Self {
        UndoSettings {
            max_undo_steps: DEFAULT_UNDO_DEPTH,
            enable_undo: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardGenerationSettings {
    /// First id handed out when a level is generated
    #[serde(rename = "StartingCardId")]
    pub starting_card_id: u32,
    #[serde(rename = "ShuffleOnLoad")]
    pub shuffle_on_load: bool,
}

impl Default for CardGenerationSettings {
    fn default() -> Self {
        CardGenerationSettings {
            starting_card_id: 1000,
            shuffle_on_load: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    #[serde(rename = "AllowCyclicMatching")]
    pub allow_cyclic_matching: bool,
    #[serde(rename = "IgnoreSuit")]
    pub ignore_suit: bool,
    #[serde(rename = "MatchDifference")]
    pub match_difference: u8,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        MatchingSettings {
            allow_cyclic_matching: true,
            ignore_suit: true,
            match_difference: 1,
        }
    }
}

impl From<MatchingSettings> for MatchingRules {
    fn from(settings: MatchingSettings) -> Self {
        MatchingRules {
            match_difference: settings.match_difference,
            allow_cyclic: settings.allow_cyclic_matching,
            ignore_suit: settings.ignore_suit,
        }
    }
}

/// Game rules file
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRulesConfig {
    #[serde(rename = "UndoSettings")]
    pub undo: UndoSettings,
    #[serde(rename = "CardGeneration")]
    pub card_generation: CardGenerationSettings,
    #[serde(rename = "MatchingRules")]
    pub matching: MatchingSettings,
}

impl GameRulesConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config: Self = read_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.undo.max_undo_steps > MAX_UNDO_STEPS_LIMIT {
            return Err(MatchError::InvalidConfig(format!(
                "MaxUndoSteps must be at most {MAX_UNDO_STEPS_LIMIT}, got {}",
                self.undo.max_undo_steps
            )));
        }
        if !(1..=12).contains(&self.matching.match_difference) {
            return Err(MatchError::InvalidConfig(format!(
                "MatchDifference must be in 1..=12, got {}",
                self.matching.match_difference
            )));
        }
        Ok(())
    }

    /// Undo depth the engine should use; 0 when undo is switched off
    pub fn effective_undo_depth(&self) -> usize {
        if self.undo.enable_undo {
            self.undo.max_undo_steps
        } else {
            0
        }
    }
}

/// Screen layout file; only the positions the engine needs are read
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    #[serde(rename = "StackPosition")]
    pub stack_position: Point,
    #[serde(rename = "CurrentCardPosition")]
    pub current_card_position: Point,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            stack_position: Point::new(100.0, 200.0),
            current_card_position: Point::new(300.0, 200.0),
        }
    }
}

impl LayoutConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        read_json(path)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

impl EngineConfig {
    /// Fold the rules and layout files into the engine's configuration
    pub fn from_configs(rules: &GameRulesConfig, layout: &LayoutConfig) -> Self {
        EngineConfig {
            max_undo_depth: rules.effective_undo_depth(),
            matching: rules.matching.into(),
            current_card_position: layout.current_card_position,
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
