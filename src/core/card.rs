//! Card types and definitions

use crate::core::CardId;
use crate::{MatchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card rank, Ace = 1 through King = 13
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const JACK: Rank = Rank(11);
    pub const QUEEN: Rank = Rank(12);
    pub const KING: Rank = Rank(13);

    pub fn new(value: u8) -> Result<Self> {
        if (1..=13).contains(&value) {
            Ok(Rank(value))
        } else {
            Err(MatchError::ParseError(format!("Rank out of range: {value}")))
        }
    }

    /// Build a rank from a zero-based face index (Ace = 0 … King = 12)
    pub fn from_face_index(face: u8) -> Result<Self> {
        Rank::new(face.saturating_add(1))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn face_index(&self) -> u8 {
        self.0 - 1
    }

    pub fn symbol(&self) -> &'static str {
        match self.0 {
            1 => "A",
            2 => "2",
            3 => "3",
            4 => "4",
            5 => "5",
            6 => "6",
            7 => "7",
            8 => "8",
            9 => "9",
            10 => "10",
            11 => "J",
            12 => "Q",
            _ => "K",
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = MatchError;

    fn try_from(value: u8) -> Result<Self> {
        Rank::new(value)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Suit from its zero-based index in level files
    pub fn from_index(index: u8) -> Result<Self> {
        Suit::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| MatchError::ParseError(format!("Suit index out of range: {index}")))
    }

    pub fn index(&self) -> u8 {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

/// World-space position of a card
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.0}, {:.0})", self.x, self.y)
    }
}

/// A card in play
///
/// `id` is fixed at creation. Everything else is mutable state that the
/// engine snapshots into undo records before it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub rank: Rank,
    pub suit: Suit,
    pub position: Point,
    /// Paint/stacking order within the card's container
    pub z_order: i32,
    pub face_up: bool,
}

impl Card {
    pub fn new(id: CardId, rank: Rank, suit: Suit) -> Self {
        Card {
            id,
            rank,
            suit,
            position: Point::ZERO,
            z_order: 0,
            face_up: true,
        }
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    pub fn face_down(mut self) -> Self {
        self.face_up = false;
        self
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}#{}", self.suit.symbol(), self.rank, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_bounds() {
        assert!(Rank::new(0).is_err());
        assert!(Rank::new(14).is_err());
        assert_eq!(Rank::new(1).unwrap(), Rank::ACE);
        assert_eq!(Rank::from_face_index(12).unwrap(), Rank::KING);
        assert_eq!(Rank::QUEEN.face_index(), 11);
    }

    #[test]
    fn test_suit_index_round_trip() {
        for suit in Suit::ALL {
            assert_eq!(Suit::from_index(suit.index()).unwrap(), suit);
        }
        assert!(Suit::from_index(4).is_err());
    }

    #[test]
    fn test_card_creation() {
        let card = Card::new(CardId::new(7), Rank::JACK, Suit::Hearts)
            .at(Point::new(120.0, 40.0))
            .with_z_order(203);

        assert_eq!(card.id, CardId::new(7));
        assert!(card.face_up);
        assert_eq!(card.z_order, 203);
        assert_eq!(card.to_string(), "♥J#7");
        assert!(!card.face_down().face_up);
    }

    #[test]
    fn test_rank_rejects_bad_json() {
        assert!(serde_json::from_str::<Rank>("0").is_err());
        assert_eq!(serde_json::from_str::<Rank>("13").unwrap(), Rank::KING);
    }
}
