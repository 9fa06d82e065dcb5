//! Game state and the move/undo engine

pub mod engine;
pub mod logger;
pub mod moves;
pub mod state;
pub mod undo_engine;

pub use engine::{EngineConfig, GameEngine};
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use state::GameState;
pub use undo_engine::{RestoredCurrent, ReverseDescription};
