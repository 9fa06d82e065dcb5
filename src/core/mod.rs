//! Core card types and the matching rule

pub mod card;
pub mod entity;
pub mod rules;
pub mod zorder;

pub use card::{Card, Point, Rank, Suit};
pub use entity::{CardId, EntityStore};
pub use rules::{can_match, MatchingRules};
