//! Compact card notation
//!
//! Parses card strings like "AS", "10H", "qd" or "K♠": a rank token
//! (A, 2-10, J, Q, K) followed by a suit letter or symbol.

use crate::core::{Rank, Suit};
use crate::{MatchError, Result};

/// Parse a single card from notation like "10H" or "K♠"
pub fn parse_card_notation(notation: &str) -> Result<(Rank, Suit)> {
    let notation = notation.trim();
    let Some(suit_char) = notation.chars().last() else {
        return Err(MatchError::ParseError("Empty card notation".to_string()));
    };
    let rank_part = &notation[..notation.len() - suit_char.len_utf8()];

    let rank = parse_rank(rank_part).ok_or_else(|| {
        MatchError::ParseError(format!("Invalid rank in card notation: {notation}"))
    })?;
    let suit = parse_suit(suit_char).ok_or_else(|| {
        MatchError::ParseError(format!("Invalid suit in card notation: {notation}"))
    })?;

    Ok((rank, suit))
}

/// Parse a comma-separated list of cards, e.g. "AS, 2H, 10C"
pub fn parse_card_list(list: &str) -> Result<Vec<(Rank, Suit)>> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_card_notation)
        .collect()
}

/// Print a card back in notation, using the suit letter
pub fn format_card_notation(rank: Rank, suit: Suit) -> String {
    format!("{}{}", rank.symbol(), suit.letter())
}

fn parse_rank(token: &str) -> Option<Rank> {
    let value = match token.to_ascii_uppercase().as_str() {
        "A" => 1,
        "J" => 11,
        "Q" => 12,
        "K" => 13,
        other => other.parse::<u8>().ok()?,
    };
    Rank::new(value).ok()
}

fn parse_suit(c: char) -> Option<Suit> {
    Suit::ALL
        .into_iter()
        .find(|suit| suit.letter() == c.to_ascii_uppercase() || suit.symbol() == c)
}
