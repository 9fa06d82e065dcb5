//! Engine that owns one level's state and undo history
//!
//! The move entry points live in [`moves`](crate::game::moves) and the undo
//! entry point in [`undo_engine`](crate::game::undo_engine); this module
//! holds the shared struct, its configuration and the read-only surface.

use crate::core::{CardId, MatchingRules, Point, Rank};
use crate::game::{GameLogger, GameState, VerbosityLevel};
use crate::loader::{GameRulesConfig, LayoutConfig, LevelConfig, LevelGenerator};
use crate::undo::{UndoHistory, DEFAULT_UNDO_DEPTH};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Everything the engine needs to know that is not game state
///
/// Passed in by value at construction; nothing is read from globals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum undo depth; 0 disables undo
    pub max_undo_depth: usize,
    pub matching: MatchingRules,
    /// Where the active current card sits in world space
    pub current_card_position: Point,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_undo_depth: DEFAULT_UNDO_DEPTH,
            matching: MatchingRules::default(),
            current_card_position: Point::new(300.0, 200.0),
        }
    }
}

/// Move and undo engine for one level
///
/// Owns the [`GameState`] and [`UndoHistory`] exclusively. Every mutation
/// completes synchronously inside the call that requested it, so a caller
/// animating the result can accept the next request immediately.
#[derive(Debug, Clone)]
pub struct GameEngine {
    pub(crate) state: GameState,
    pub(crate) history: UndoHistory,
    pub(crate) config: EngineConfig,
    pub(crate) logger: GameLogger,
}

impl GameEngine {
    /// Take ownership of a freshly generated level
    ///
    /// Runs the initial deal if the level has no current card yet.
    pub fn new(state: GameState, config: EngineConfig) -> Self {
        let mut engine = GameEngine {
            state,
            history: UndoHistory::new(config.max_undo_depth),
            config,
            logger: GameLogger::new(),
        };
        engine.start_level();
        engine
    }

    /// Generate `level` and start it with the configuration the files describe
    pub fn from_level(
        level: &LevelConfig,
        rules: &GameRulesConfig,
        layout: &LayoutConfig,
        seed: u64,
    ) -> Result<Self> {
        let state = LevelGenerator::from_rules(rules, layout, seed).generate(level)?;
        Ok(GameEngine::new(state, EngineConfig::from_configs(rules, layout)))
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    /// Replace the level; the undo history is cleared
    pub fn reset(&mut self, state: GameState) {
        self.state = state;
        self.history.clear();
        self.start_level();
    }

    fn start_level(&mut self) {
        if let Some(dealt) = self.state.initial_deal(self.config.current_card_position) {
            self.logger
                .verbose(format_args!("Initial deal: card {dealt} is current"));
        }
        self.logger.normal(format_args!(
            "Level {} started: {} playfield, {} draw pile, undo depth {}",
            self.state.level_id(),
            self.state.playfield().len(),
            self.state.draw_pile().len(),
            self.history.capacity()
        ));
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.history.len()
    }

    /// Numbered descriptions of the undoable moves, oldest first
    pub fn undo_summary(&self) -> Vec<String> {
        self.history
            .records()
            .iter()
            .enumerate()
            .map(|(i, record)| format!("{}. {}", i + 1, record))
            .collect()
    }

    /// Playfield cards the player may play right now
    pub fn matchable_cards(&self) -> Vec<CardId> {
        self.state.matchable_cards(&self.config.matching).into_vec()
    }

    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    pub fn is_stuck(&self) -> bool {
        self.state.is_stuck(&self.config.matching)
    }

    /// Change the undo depth mid-game
    ///
    /// Shrinking drops the oldest records that no longer fit; 0 disables undo
    /// and discards the whole history.
    pub fn set_max_undo_depth(&mut self, depth: usize) {
        self.config.max_undo_depth = depth;
        self.history.set_capacity(depth);
        self.logger.verbose(format_args!(
            "Undo depth set to {depth} ({} records kept)",
            self.history.len()
        ));
    }

    /// Setup helper for puzzles and tests: rewrite a card's rank in place
    ///
    /// Not a move. It records nothing, and undo does not revert it.
    pub fn set_card_rank(&mut self, card_id: CardId, rank: Rank) -> Result<()> {
        self.state.set_rank(card_id, rank)?;
        self.logger
            .verbose(format_args!("Setup: card {card_id} rank set to {rank}"));
        Ok(())
    }
}
