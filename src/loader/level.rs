//! Level files (.json)
//!
//! A level lists the playfield cards with their positions and the cards of
//! the draw pile, bottom first. Faces are 0-based (0 = ace, 12 = king) and
//! suits are 0..=3 in club, diamond, heart, spade order.

use crate::core::{Point, Rank, Suit};
use crate::loader::notation::parse_card_notation;
use crate::{MatchError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One card as written in a level file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardData {
    #[serde(rename = "CardFace")]
    pub face: u8,
    #[serde(rename = "CardSuit")]
    pub suit: u8,
    #[serde(rename = "Position", default)]
    pub position: Point,
}

impl CardData {
    pub fn new(rank: Rank, suit: Suit, position: Point) -> Self {
        CardData {
            face: rank.face_index(),
            suit: suit.index(),
            position,
        }
    }

    pub fn rank(&self) -> Result<Rank> {
        Rank::from_face_index(self.face)
    }

    pub fn card_suit(&self) -> Result<Suit> {
        Suit::from_index(self.suit)
    }
}

/// A level as loaded from disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(rename = "LevelId")]
    pub level_id: i32,
    #[serde(rename = "LevelName", default)]
    pub level_name: String,
    #[serde(rename = "Playfield", default)]
    pub playfield: Vec<CardData>,
    /// Draw pile, bottom first
    #[serde(rename = "Stack", default)]
    pub stack: Vec<CardData>,
}

impl LevelConfig {
    /// Build a level from card notation, laying the playfield out in a row
    ///
    /// Handy for tests and the CLI: `from_notation(1, &["AS", "3D"], &["5H", "2H"])`.
    pub fn from_notation(level_id: i32, playfield: &[&str], stack: &[&str]) -> Result<Self> {
        let level = LevelConfig {
            level_id,
            level_name: format!("Level {level_id}"),
            playfield: cards_from_notation(playfield, |i| {
                Point::new(150.0 + 120.0 * i as f32, 1200.0)
            })?,
            stack: cards_from_notation(stack, |_| Point::ZERO)?,
        };
        level.validate()?;
        Ok(level)
    }

    /// Reject levels the engine cannot start
    pub fn validate(&self) -> Result<()> {
        if self.level_id <= 0 {
            return Err(MatchError::InvalidLevel(format!(
                "level id must be positive, got {}",
                self.level_id
            )));
        }
        if self.playfield.is_empty() {
            return Err(MatchError::InvalidLevel("playfield is empty".to_string()));
        }
        if self.stack.is_empty() {
            return Err(MatchError::InvalidLevel("stack is empty".to_string()));
        }

        let sections = [("playfield", &self.playfield), ("stack", &self.stack)];
        for (section, cards) in sections {
            for (i, card) in cards.iter().enumerate() {
                if card.face > 12 {
                    return Err(MatchError::InvalidLevel(format!(
                        "{section} card {i}: face {} out of range 0..=12",
                        card.face
                    )));
                }
                if card.suit > 3 {
                    return Err(MatchError::InvalidLevel(format!(
                        "{section} card {i}: suit {} out of range 0..=3",
                        card.suit
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn total_cards(&self) -> usize {
        self.playfield.len() + self.stack.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "Level {} \"{}\": {} playfield cards, {} stack cards",
            self.level_id,
            self.level_name,
            self.playfield.len(),
            self.stack.len()
        )
    }
}

fn cards_from_notation(notations: &[&str], place: impl Fn(usize) -> Point) -> Result<Vec<CardData>> {
    notations
        .iter()
        .enumerate()
        .map(|(i, notation)| {
            let (rank, suit) = parse_card_notation(notation)?;
            Ok(CardData::new(rank, suit, place(i)))
        })
        .collect()
}

/// Loader for level files
pub struct LevelLoader;

impl LevelLoader {
    /// Load and validate a level from a .json file
    pub fn load_from_file(path: &Path) -> Result<LevelConfig> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a level from its JSON text
    pub fn parse(content: &str) -> Result<LevelConfig> {
        let level: LevelConfig = serde_json::from_str(content)?;
        level.validate()?;
        Ok(level)
    }

    /// Load a level without blocking the runtime
    pub async fn load_async(path: &Path) -> Result<LevelConfig> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"{
        "LevelId": 3,
        "LevelName": "Two rows",
        "Playfield": [
            {"CardFace": 12, "CardSuit": 0, "Position": {"x": 250, "y": 1000}},
            {"CardFace": 2, "CardSuit": 3, "Position": {"x": 300, "y": 800}}
        ],
        "Stack": [
            {"CardFace": 1, "CardSuit": 2, "Position": {"x": 0, "y": 0}},
            {"CardFace": 0, "CardSuit": 1}
        ]
    }"#;

    #[test]
    fn test_parse_level() {
        let level = LevelLoader::parse(LEVEL).unwrap();
        assert_eq!(level.level_id, 3);
        assert_eq!(level.total_cards(), 4);
        assert_eq!(level.playfield[0].rank().unwrap(), Rank::KING);
        assert_eq!(level.playfield[1].card_suit().unwrap(), Suit::Spades);
        assert_eq!(level.playfield[0].position, Point::new(250.0, 1000.0));
        assert_eq!(level.stack[1].position, Point::ZERO);
        assert_eq!(
            level.summary(),
            "Level 3 \"Two rows\": 2 playfield cards, 2 stack cards"
        );
    }

    #[test]
    fn test_validation_failures() {
        let mut level = LevelLoader::parse(LEVEL).unwrap();
        level.level_id = 0;
        assert!(matches!(level.validate(), Err(MatchError::InvalidLevel(_))));

        let mut level = LevelLoader::parse(LEVEL).unwrap();
        level.stack.clear();
        assert!(level.validate().is_err());

        let mut level = LevelLoader::parse(LEVEL).unwrap();
        level.playfield[1].face = 13;
        assert!(level.validate().is_err());

        let mut level = LevelLoader::parse(LEVEL).unwrap();
        level.stack[0].suit = 4;
        assert!(level.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            LevelLoader::parse("{\"LevelId\": "),
            Err(MatchError::SerializationError(_))
        ));
        assert!(matches!(
            LevelLoader::parse("{\"LevelId\": 1}"),
            Err(MatchError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_from_notation() {
        let level = LevelConfig::from_notation(7, &["AS", "10H"], &["KC"]).unwrap();
        assert_eq!(level.playfield[1].face, 9);
        assert_eq!(level.playfield[1].suit, 2);
        assert_ne!(level.playfield[0].position, level.playfield[1].position);
        assert!(LevelConfig::from_notation(7, &["AS"], &[]).is_err());
        assert!(LevelConfig::from_notation(7, &["XS"], &["KC"]).is_err());
    }
}
