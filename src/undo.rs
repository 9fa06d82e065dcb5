//! Undo records and the bounded undo history
//!
//! Every accepted move produces one immutable [`UndoRecord`] holding enough
//! world-space and flip/z-order state to reverse it without consulting
//! anything else. [`UndoHistory`] keeps the most recent N of them.

use crate::core::{Card, CardId, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of undoable moves kept
pub const DEFAULT_UNDO_DEPTH: usize = 10;

/// Snapshot of a card moving onto the current-card pile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The card that moved, as it was before the move
    pub source: Card,
    /// The current card it was placed on, as it was before the move
    pub target: Card,
    pub source_world_position: Point,
    pub target_world_position: Point,
    /// Paint order in the playfield, or stacking order in the draw pile
    pub source_z_order: i32,
    pub source_was_face_up: bool,
    pub target_was_face_up: bool,
    pub score_delta: i32,
}

impl MoveRecord {
    /// Capture both cards before either is mutated
    pub fn capture(source: &Card, target: &Card, score_delta: i32) -> Self {
        MoveRecord {
            source: *source,
            target: *target,
            source_world_position: source.position,
            target_world_position: target.position,
            source_z_order: source.z_order,
            source_was_face_up: source.face_up,
            target_was_face_up: target.face_up,
            score_delta,
        }
    }
}

/// One reversible transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UndoRecord {
    /// Playfield card moved onto the current card
    CardMove(MoveRecord),
    /// Draw-pile top moved onto the current card
    StackOperation(MoveRecord),
    /// A card's face state toggled outside a move
    CardFlip { card: Card, previous_face_up: bool },
}

/// Tag of an [`UndoRecord`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UndoKind {
    CardMove,
    StackOperation,
    CardFlip,
}

impl UndoRecord {
    pub fn card_flip(card: &Card, previous_face_up: bool) -> Self {
        UndoRecord::CardFlip {
            card: *card,
            previous_face_up,
        }
    }

    pub fn kind(&self) -> UndoKind {
        match self {
            UndoRecord::CardMove(_) => UndoKind::CardMove,
            UndoRecord::StackOperation(_) => UndoKind::StackOperation,
            UndoRecord::CardFlip { .. } => UndoKind::CardFlip,
        }
    }

    /// Id of the card this record moves or flips
    pub fn card_id(&self) -> CardId {
        match self {
            UndoRecord::CardMove(m) | UndoRecord::StackOperation(m) => m.source.id,
            UndoRecord::CardFlip { card, .. } => card.id,
        }
    }

    pub fn move_record(&self) -> Option<&MoveRecord> {
        match self {
            UndoRecord::CardMove(m) | UndoRecord::StackOperation(m) => Some(m),
            UndoRecord::CardFlip { .. } => None,
        }
    }

    pub fn score_delta(&self) -> i32 {
        self.move_record().map_or(0, |m| m.score_delta)
    }

    pub fn description(&self) -> &'static str {
        match self.kind() {
            UndoKind::CardMove => "playfield to current",
            UndoKind::StackOperation => "draw pile to current",
            UndoKind::CardFlip => "card flip",
        }
    }
}

impl fmt::Display for UndoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndoRecord::CardMove(m) | UndoRecord::StackOperation(m) => write!(
                f,
                "{}: {} {} -> {} {}",
                self.description(),
                m.source,
                m.source_world_position,
                m.target,
                m.target_world_position
            ),
            UndoRecord::CardFlip {
                card,
                previous_face_up,
            } => write!(
                f,
                "{}: {} (was {})",
                self.description(),
                card,
                if *previous_face_up { "face up" } else { "face down" }
            ),
        }
    }
}

/// Bounded log of undo records (most recent at end)
///
/// Pushing past capacity silently drops the oldest record. A capacity of 0
/// disables undo: nothing is ever stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoHistory {
    records: Vec<UndoRecord>,
    capacity: usize,
}

impl UndoHistory {
    pub fn new(capacity: usize) -> Self {
        UndoHistory {
            records: Vec::with_capacity(capacity.min(DEFAULT_UNDO_DEPTH * 10)),
            capacity,
        }
    }

    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Append a record, evicting the oldest if over capacity
    ///
    /// Returns false if the record was not stored (undo disabled).
    pub fn push(&mut self, record: UndoRecord) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.records.push(record);
        self.truncate_to_capacity();
        true
    }

    pub fn peek(&self) -> Option<&UndoRecord> {
        self.records.last()
    }

    pub fn pop(&mut self) -> Option<UndoRecord> {
        self.records.pop()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, dropping the oldest records that no longer fit
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.truncate_to_capacity();
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Oldest first
    pub fn records(&self) -> &[UndoRecord] {
        &self.records
    }

    fn truncate_to_capacity(&mut self) {
        if self.records.len() > self.capacity {
            let excess = self.records.len() - self.capacity;
            self.records.drain(..excess);
        }
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rank, Suit};

    fn flip(id: u32) -> UndoRecord {
        let card = Card::new(CardId::new(id), Rank::ACE, Suit::Clubs);
        UndoRecord::card_flip(&card, false)
    }

    #[test]
    fn test_push_pop() {
        let mut history = UndoHistory::default();
        assert_eq!(history.len(), 0);

        assert!(history.push(flip(1)));
        assert_eq!(history.len(), 1);
        assert_eq!(history.peek().unwrap().card_id(), CardId::new(1));

        let popped = history.pop().unwrap();
        assert!(matches!(popped, UndoRecord::CardFlip { .. }));
        assert!(history.is_empty());
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn test_eviction_keeps_most_recent() {
        let mut history = UndoHistory::new(3);
        for id in 1..=5 {
            history.push(flip(id));
        }

        assert_eq!(history.len(), 3);
        let ids: Vec<_> = history.records().iter().map(|r| r.card_id().as_u32()).collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[test]
    fn test_disabled_history() {
        let mut history = UndoHistory::disabled();
        assert!(!history.push(flip(1)));
        assert_eq!(history.len(), 0); // Nothing stored when disabled
    }

    #[test]
    fn test_shrinking_capacity() {
        let mut history = UndoHistory::new(5);
        for id in 1..=4 {
            history.push(flip(id));
        }
        history.set_capacity(2);
        let ids: Vec<_> = history.records().iter().map(|r| r.card_id().as_u32()).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_move_record_capture() {
        let source = Card::new(CardId::new(1), Rank::new(2).unwrap(), Suit::Hearts)
            .at(Point::new(10.0, 20.0))
            .with_z_order(205);
        let target = Card::new(CardId::new(2), Rank::new(3).unwrap(), Suit::Spades)
            .at(Point::new(300.0, 200.0));

        let record = UndoRecord::CardMove(MoveRecord::capture(&source, &target, 0));
        let m = record.move_record().unwrap();

        assert_eq!(record.kind(), UndoKind::CardMove);
        assert_eq!(record.card_id(), CardId::new(1));
        assert_eq!(m.source_world_position, Point::new(10.0, 20.0));
        assert_eq!(m.target_world_position, Point::new(300.0, 200.0));
        assert_eq!(m.source_z_order, 205);
        assert!(m.source_was_face_up && m.target_was_face_up);
        assert_eq!(record.score_delta(), 0);
    }
}
