//! Matching rule between a playfield card and the current card

use crate::core::{Card, Rank};
use serde::{Deserialize, Serialize};

const RANK_COUNT: u8 = 13;

/// Two ranks match when they differ by exactly one, with Ace and King adjacent
pub fn can_match(a: Rank, b: Rank) -> bool {
    let diff = a.value().abs_diff(b.value());
    diff == 1 || diff == RANK_COUNT - 1
}

/// Configurable form of [`can_match`]
///
/// The defaults reproduce `can_match` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingRules {
    /// Rank distance that counts as a match (1..=12)
    pub match_difference: u8,
    /// Treat Ace and King as neighbours
    pub allow_cyclic: bool,
    /// When false, suits must also be equal
    pub ignore_suit: bool,
}

impl MatchingRules {
    pub fn ranks_match(&self, a: Rank, b: Rank) -> bool {
        let diff = a.value().abs_diff(b.value());
        diff == self.match_difference
            || (self.allow_cyclic && RANK_COUNT.checked_sub(self.match_difference) == Some(diff))
    }

    pub fn matches(&self, card: &Card, current: &Card) -> bool {
        self.ranks_match(card.rank, current.rank) && (self.ignore_suit || card.suit == current.suit)
    }
}

impl Default for MatchingRules {
    fn default() -> Self {
        MatchingRules {
            match_difference: 1,
            allow_cyclic: true,
            ignore_suit: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, Suit};

    fn rank(v: u8) -> Rank {
        Rank::new(v).unwrap()
    }

    #[test]
    fn test_known_pairs() {
        assert!(can_match(rank(1), rank(13)));
        assert!(can_match(rank(1), rank(2)));
        assert!(can_match(rank(12), rank(13)));
        assert!(!can_match(rank(5), rank(7)));
        assert!(!can_match(rank(1), rank(4)));
        assert!(!can_match(rank(6), rank(6)));
    }

    #[test]
    fn test_symmetry_over_all_ranks() {
        for a in 1..=13 {
            for b in 1..=13 {
                assert_eq!(can_match(rank(a), rank(b)), can_match(rank(b), rank(a)));
            }
        }
    }

    #[test]
    fn test_default_rules_agree_with_can_match() {
        let rules = MatchingRules::default();
        for a in 1..=13 {
            for b in 1..=13 {
                assert_eq!(rules.ranks_match(rank(a), rank(b)), can_match(rank(a), rank(b)));
            }
        }
    }

    #[test]
    fn test_non_cyclic_rules() {
        let rules = MatchingRules {
            allow_cyclic: false,
            ..MatchingRules::default()
        };
        assert!(!rules.ranks_match(Rank::ACE, Rank::KING));
        assert!(rules.ranks_match(Rank::QUEEN, Rank::KING));
    }

    #[test]
    fn test_suit_sensitive_rules() {
        let rules = MatchingRules {
            ignore_suit: false,
            ..MatchingRules::default()
        };
        let two_hearts = Card::new(CardId::new(1), rank(2), Suit::Hearts);
        let three_hearts = Card::new(CardId::new(2), rank(3), Suit::Hearts);
        let three_spades = Card::new(CardId::new(3), rank(3), Suit::Spades);

        assert!(rules.matches(&two_hearts, &three_hearts));
        assert!(!rules.matches(&two_hearts, &three_spades));
        assert!(MatchingRules::default().matches(&two_hearts, &three_spades));
    }

    #[test]
    fn test_wider_difference() {
        let rules = MatchingRules {
            match_difference: 2,
            ..MatchingRules::default()
        };
        assert!(rules.ranks_match(rank(5), rank(7)));
        assert!(rules.ranks_match(rank(1), rank(12)));
        assert!(!rules.ranks_match(rank(5), rank(6)));
    }
}
