//! Level and configuration loaders
//!
//! Parsers for level files, the rules and layout files, and compact card
//! notation, plus the generator that turns a level into a game state.

pub mod config;
pub mod generator;
pub mod level;
pub mod notation;

pub use config::{GameRulesConfig, LayoutConfig};
pub use generator::LevelGenerator;
pub use level::{CardData, LevelConfig, LevelLoader};
pub use notation::{format_card_notation, parse_card_list, parse_card_notation};
