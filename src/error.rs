//! Error types for the card-match engine

use crate::core::CardId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Card not found: {0}")]
    CardNotFound(CardId),

    #[error("No current card to match against")]
    NoCurrentCard,

    #[error("Card {card} does not match current card {current}")]
    NoMatch { card: CardId, current: CardId },

    #[error("Draw pile is empty")]
    EmptyDrawPile,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Undo consistency violation: expected card {expected} on top of current history, found {found:?}")]
    ConsistencyViolation { expected: CardId, found: Option<CardId> },

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl MatchError {
    /// Gameplay rejections that leave the model untouched and surface as a no-op
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MatchError::CardNotFound(_)
                | MatchError::NoCurrentCard
                | MatchError::NoMatch { .. }
                | MatchError::EmptyDrawPile
                | MatchError::NothingToUndo
        )
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
