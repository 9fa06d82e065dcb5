//! Card containers (playfield, draw pile, current-card history)

use crate::core::CardId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three places a card can live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Playfield,
    DrawPile,
    CurrentHistory,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Zone::Playfield => "playfield",
            Zone::DrawPile => "draw pile",
            Zone::CurrentHistory => "current history",
        };
        f.write_str(name)
    }
}

/// A zone containing card ids
///
/// The draw pile and current history are LIFO (top = last element). The
/// playfield is kept in paint order by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardZone {
    pub zone_type: Zone,

    cards: Vec<CardId>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    /// Push on top
    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    /// Insert keeping the zone sorted by `key`
    ///
    /// Equal keys keep insertion order, so re-inserting a card with the key it
    /// had when it left restores its exact slot.
    pub fn insert_sorted_by_key<K, F>(&mut self, card_id: CardId, key: F)
    where
        K: Ord,
        F: Fn(CardId) -> K,
    {
        let new_key = key(card_id);
        let pos = self.cards.partition_point(|&id| key(id) <= new_key);
        self.cards.insert(pos, card_id);
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|&id| id == card_id) {
            // remove() rather than swap_remove(): iteration order is observable
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn draw_top(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    pub fn peek_top(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_zone() {
        let mut zone = CardZone::new(Zone::Playfield);

        assert_eq!(zone.len(), 0);
        assert!(zone.is_empty());

        let card1 = CardId::new(10);
        let card2 = CardId::new(11);

        zone.add(card1);
        zone.add(card2);

        assert_eq!(zone.len(), 2);
        assert!(zone.contains(card1));
        assert!(zone.contains(card2));

        assert!(zone.remove(card1));
        assert!(!zone.remove(card1));
        assert_eq!(zone.len(), 1);
        assert!(!zone.contains(card1));
    }

    #[test]
    fn test_draw_pile_operations() {
        let mut pile = CardZone::new(Zone::DrawPile);

        let card1 = CardId::new(10);
        let card2 = CardId::new(11);
        let card3 = CardId::new(12);

        pile.add(card1); // Bottom
        pile.add(card2);
        pile.add(card3); // Top

        assert_eq!(pile.peek_top(), Some(card3));
        assert_eq!(pile.draw_top(), Some(card3));
        assert_eq!(pile.len(), 2);
        assert_eq!(pile.draw_top(), Some(card2));
        assert_eq!(pile.draw_top(), Some(card1));
        assert!(pile.is_empty());
        assert_eq!(pile.draw_top(), None);
    }

    #[test]
    fn test_sorted_reinsertion_restores_slot() {
        let mut zone = CardZone::new(Zone::Playfield);
        let key = |id: CardId| (id.as_u32() % 3, id);

        for raw in [5, 1, 9, 3, 7] {
            zone.insert_sorted_by_key(CardId::new(raw), key);
        }
        let before = zone.clone();

        assert!(zone.remove(CardId::new(7)));
        zone.insert_sorted_by_key(CardId::new(7), key);
        assert_eq!(zone, before);

        let keys: Vec<_> = zone.iter().map(key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
