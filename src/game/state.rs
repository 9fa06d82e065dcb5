//! Main game state structure

use crate::core::{zorder, Card, CardId, EntityStore, MatchingRules, Point, Rank};
use crate::zones::{CardZone, Zone};
use crate::{MatchError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Complete model of one level in progress
///
/// Cards live in `cards`; the three containers hold ids only, so a card's
/// data has exactly one home and its container is a matter of membership.
/// Fields are private: outside the crate the state is read-only, and all
/// mutation goes through [`GameEngine`](crate::game::GameEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    cards: EntityStore<Card>,

    /// Face-up cards still to clear, kept in paint order (z-order, then id)
    playfield: CardZone,

    /// Reserve pile, top = last
    draw_pile: CardZone,

    /// Cards played onto the current pile, active card = last
    current_history: CardZone,

    score: i32,
    move_count: u32,
    level_id: u32,
}

impl GameState {
    /// Create an empty state whose first generated card id is `first_card_id`
    pub fn new(level_id: u32, first_card_id: u32) -> Self {
        GameState {
            cards: EntityStore::starting_at(first_card_id),
            playfield: CardZone::new(Zone::Playfield),
            draw_pile: CardZone::new(Zone::DrawPile),
            current_history: CardZone::new(Zone::CurrentHistory),
            score: 0,
            move_count: 0,
            level_id,
        }
    }

    // ---- level construction ----

    pub(crate) fn next_card_id(&mut self) -> Result<CardId> {
        self.cards.next_id()
    }

    /// Add a card to the playfield, forced face-up
    pub(crate) fn add_playfield_card(&mut self, mut card: Card) {
        card.face_up = true;
        self.cards.insert(card.id, card);
        self.insert_playfield(card.id);
    }

    /// Push a card onto the top of the draw pile
    pub(crate) fn add_draw_pile_card(&mut self, card: Card) {
        self.cards.insert(card.id, card);
        self.draw_pile.add(card.id);
    }

    /// Deal the first current card from the draw pile, without an undo record
    ///
    /// Only runs while the current history is empty; once anything is on the
    /// current pile this is a no-op for the life of the state.
    pub fn initial_deal(&mut self, current_position: Point) -> Option<CardId> {
        if !self.current_history.is_empty() {
            return None;
        }
        let card_id = self.draw_pile.draw_top()?;
        self.push_current(card_id, current_position);
        Some(card_id)
    }

    // ---- queries ----

    pub fn level_id(&self) -> u32 {
        self.level_id
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn card(&self, card_id: CardId) -> Result<&Card> {
        self.cards.get(card_id)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn playfield(&self) -> &CardZone {
        &self.playfield
    }

    pub fn draw_pile(&self) -> &CardZone {
        &self.draw_pile
    }

    pub fn current_history(&self) -> &CardZone {
        &self.current_history
    }

    /// A card that is on the playfield right now
    pub fn playfield_card(&self, card_id: CardId) -> Result<&Card> {
        if !self.playfield.contains(card_id) {
            return Err(MatchError::CardNotFound(card_id));
        }
        self.cards.get(card_id)
    }

    /// The card new moves must match against
    pub fn active_current_card(&self) -> Option<&Card> {
        self.current_history
            .peek_top()
            .and_then(|id| self.cards.get(id).ok())
    }

    pub fn top_of_draw_pile(&self) -> Option<&Card> {
        self.draw_pile.peek_top().and_then(|id| self.cards.get(id).ok())
    }

    pub fn zone_of(&self, card_id: CardId) -> Option<Zone> {
        [&self.playfield, &self.draw_pile, &self.current_history]
            .into_iter()
            .find(|zone| zone.contains(card_id))
            .map(|zone| zone.zone_type)
    }

    /// Playfield cards that can be played onto the current card, in paint order
    pub fn matchable_cards(&self, rules: &MatchingRules) -> SmallVec<[CardId; 8]> {
        let Some(current) = self.active_current_card() else {
            return SmallVec::new();
        };
        self.playfield
            .iter()
            .filter(|&id| {
                self.cards
                    .get(id)
                    .map(|card| card.face_up && rules.matches(card, current))
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn has_matchable_cards(&self, rules: &MatchingRules) -> bool {
        !self.matchable_cards(rules).is_empty()
    }

    /// The level is cleared when the playfield is empty
    pub fn is_won(&self) -> bool {
        self.playfield.is_empty()
    }

    /// No playfield move is possible and nothing is left to draw
    pub fn is_stuck(&self, rules: &MatchingRules) -> bool {
        !self.is_won() && self.draw_pile.is_empty() && !self.has_matchable_cards(rules)
    }

    /// Describe every broken structural invariant (empty when consistent)
    ///
    /// Every stored card must be in exactly one container, containers may
    /// only hold stored cards, and playfield cards must be face-up.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        for (id, card) in self.cards.iter() {
            let homes = [&self.playfield, &self.draw_pile, &self.current_history]
                .into_iter()
                .filter(|zone| zone.contains(*id))
                .count();
            if homes != 1 {
                violations.push(format!("card {id} is in {homes} containers"));
            }
            if self.playfield.contains(*id) && !card.face_up {
                violations.push(format!("playfield card {id} is face down"));
            }
        }

        for zone in [&self.playfield, &self.draw_pile, &self.current_history] {
            for id in zone.iter() {
                if !self.cards.contains(id) {
                    violations.push(format!("{} holds unknown card {id}", zone.zone_type));
                }
            }
        }

        violations
    }

    // ---- mutation primitives used by the move and undo engines ----

    pub(crate) fn card_mut(&mut self, card_id: CardId) -> Result<&mut Card> {
        self.cards.get_mut(card_id)
    }

    pub(crate) fn set_rank(&mut self, card_id: CardId, rank: Rank) -> Result<()> {
        self.cards.get_mut(card_id)?.rank = rank;
        Ok(())
    }

    /// Insert into the playfield at the slot its z-order dictates
    pub(crate) fn insert_playfield(&mut self, card_id: CardId) {
        let cards = &self.cards;
        self.playfield.insert_sorted_by_key(card_id, |id| {
            let z = cards.get(id).map(|card| card.z_order).unwrap_or(i32::MAX);
            (z, id)
        });
    }

    pub(crate) fn remove_from_playfield(&mut self, card_id: CardId) -> bool {
        self.playfield.remove(card_id)
    }

    pub(crate) fn take_draw_top(&mut self) -> Option<CardId> {
        self.draw_pile.draw_top()
    }

    pub(crate) fn return_to_draw_pile(&mut self, card_id: CardId) {
        self.draw_pile.add(card_id);
    }

    /// Make `card_id` the active current card, face-up at the current slot
    pub(crate) fn push_current(&mut self, card_id: CardId, position: Point) {
        let depth = self.current_history.len();
        if let Ok(card) = self.cards.get_mut(card_id) {
            card.face_up = true;
            card.position = position;
            card.z_order = zorder::current_card(depth);
        }
        self.current_history.add(card_id);
    }

    pub(crate) fn pop_current(&mut self) -> Option<CardId> {
        self.current_history.draw_top()
    }

    pub(crate) fn record_move(&mut self, score_delta: i32) {
        self.move_count += 1;
        self.score += score_delta;
    }

    pub(crate) fn revert_move(&mut self, score_delta: i32) {
        self.move_count = self.move_count.saturating_sub(1);
        self.score -= score_delta;
    }
}
