//! Undo: pop the latest record and replay its inverse against the model
//!
//! The model is fully restored before `undo` returns. The returned
//! [`ReverseDescription`] only tells the view layer what to animate; it
//! carries ids and values, never anything the view must keep alive.

use crate::core::{CardId, Point};
use crate::game::GameEngine;
use crate::undo::{MoveRecord, UndoKind, UndoRecord};
use crate::zones::Zone;
use crate::{MatchError, Result};
use serde::{Deserialize, Serialize};

/// A card that became the active current card again after an undo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestoredCurrent {
    pub card_id: CardId,
    pub face_up: bool,
}

/// What the view layer has to animate to show an undo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReverseDescription {
    pub kind: UndoKind,
    pub card_id: CardId,
    /// Where the card was before the undo
    pub from_position: Point,
    /// Where the card has been restored to
    pub to_position: Point,
    pub z_order: i32,
    pub face_up: bool,
    /// Container the card now lives in
    pub destination: Zone,
    /// The card uncovered on the current pile, for move undos
    pub restored_current: Option<RestoredCurrent>,
    /// Score change that was reverted
    pub score_delta: i32,
}

impl GameEngine {
    /// Reverse the most recent recorded move
    ///
    /// On `ConsistencyViolation` the record is kept and nothing is mutated:
    /// the model is not repaired speculatively.
    pub fn undo(&mut self) -> Result<ReverseDescription> {
        let Some(record) = self.history.peek().copied() else {
            return self.reject("undo", MatchError::NothingToUndo);
        };
        self.verify_undoable(&record)?;
        self.history.pop();

        let description = match record {
            UndoRecord::CardMove(m) => self.reverse_move(&m, UndoKind::CardMove, Zone::Playfield)?,
            UndoRecord::StackOperation(m) => {
                self.reverse_move(&m, UndoKind::StackOperation, Zone::DrawPile)?
            }
            UndoRecord::CardFlip {
                card,
                previous_face_up,
            } => {
                let stored = self.state.card_mut(card.id)?;
                stored.face_up = previous_face_up;
                let position = stored.position;
                let z_order = stored.z_order;
                ReverseDescription {
                    kind: UndoKind::CardFlip,
                    card_id: card.id,
                    from_position: position,
                    to_position: position,
                    z_order,
                    face_up: previous_face_up,
                    destination: self.state.zone_of(card.id).unwrap_or(Zone::DrawPile),
                    restored_current: None,
                    score_delta: 0,
                }
            }
        };

        self.logger.normal(format_args!(
            "Undo {} ({} left): {}",
            record.description(),
            self.history.len(),
            record
        ));

        Ok(description)
    }

    /// Check that the model is in the state the record left it in
    fn verify_undoable(&self, record: &UndoRecord) -> Result<()> {
        match record {
            UndoRecord::CardMove(m) | UndoRecord::StackOperation(m) => {
                let history = self.state.current_history().cards();
                let top = history.last().copied();
                let below = history.len().checked_sub(2).map(|i| history[i]);
                if top != Some(m.source.id) {
                    return self.consistency_violation(record, m.source.id, top);
                }
                if below != Some(m.target.id) {
                    return self.consistency_violation(record, m.target.id, below);
                }
            }
            UndoRecord::CardFlip { card, .. } => {
                if self.state.zone_of(card.id).is_none() {
                    return self.consistency_violation(record, card.id, None);
                }
            }
        }
        Ok(())
    }

    fn consistency_violation(
        &self,
        record: &UndoRecord,
        expected: CardId,
        found: Option<CardId>,
    ) -> Result<()> {
        self.logger.bug(format_args!(
            "cannot undo {record}: expected card {expected} on the current pile, found {found:?}"
        ));
        Err(MatchError::ConsistencyViolation { expected, found })
    }

    fn reverse_move(
        &mut self,
        m: &MoveRecord,
        kind: UndoKind,
        destination: Zone,
    ) -> Result<ReverseDescription> {
        self.state.pop_current();

        let target = self.state.card_mut(m.target.id)?;
        target.face_up = m.target_was_face_up;

        let source = self.state.card_mut(m.source.id)?;
        let from_position = source.position;
        source.position = m.source_world_position;
        source.z_order = m.source_z_order;
        source.face_up = m.source_was_face_up;

        match destination {
            Zone::Playfield => self.state.insert_playfield(m.source.id),
            _ => self.state.return_to_draw_pile(m.source.id),
        }
        self.state.revert_move(m.score_delta);

        Ok(ReverseDescription {
            kind,
            card_id: m.source.id,
            from_position,
            to_position: m.source_world_position,
            z_order: m.source_z_order,
            face_up: m.source_was_face_up,
            destination,
            restored_current: Some(RestoredCurrent {
                card_id: m.target.id,
                face_up: m.target_was_face_up,
            }),
            score_delta: m.score_delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::zorder;
    use crate::game::EngineConfig;
    use crate::loader::{LevelConfig, LevelGenerator};

    fn engine_for(playfield: &[&str], stack: &[&str], depth: usize) -> GameEngine {
        let level = LevelConfig::from_notation(1, playfield, stack).unwrap();
        let state = LevelGenerator::new(1).generate(&level).unwrap();
        let config = EngineConfig {
            max_undo_depth: depth,
            ..EngineConfig::default()
        };
        let mut engine = GameEngine::new(state, config);
        engine.logger_mut().enable_capture();
        engine
    }

    #[test]
    fn test_undo_playfield_move() {
        let mut engine = engine_for(&["2S", "9D"], &["3H"], 10);
        let before = engine.state().clone();
        let origin = engine.state().card(CardId::new(1)).unwrap().position;

        engine.apply_playfield_move(CardId::new(1)).unwrap();
        let reverse = engine.undo().unwrap();

        assert_eq!(engine.state(), &before);
        assert_eq!(reverse.kind, UndoKind::CardMove);
        assert_eq!(reverse.card_id, CardId::new(1));
        assert_eq!(reverse.from_position, EngineConfig::default().current_card_position);
        assert_eq!(reverse.to_position, origin);
        assert_eq!(reverse.z_order, zorder::normal_card(0));
        assert_eq!(reverse.destination, Zone::Playfield);
        assert_eq!(
            reverse.restored_current,
            Some(RestoredCurrent {
                card_id: CardId::new(3),
                face_up: true
            })
        );
    }

    #[test]
    fn test_undo_stack_draw_returns_card_to_top() {
        let mut engine = engine_for(&["KS"], &["7C", "8D", "3H"], 10);
        let before = engine.state().clone();

        engine.apply_stack_draw().unwrap();
        let reverse = engine.undo().unwrap();

        assert_eq!(engine.state(), &before);
        assert_eq!(reverse.destination, Zone::DrawPile);
        assert!(!reverse.face_up);
        assert_eq!(engine.state().top_of_draw_pile().unwrap().id, CardId::new(3));
    }

    #[test]
    fn test_undo_flip() {
        let mut engine = engine_for(&["KS"], &["7C", "8D", "3H"], 10);
        let before = engine.state().clone();

        engine.flip_card(CardId::new(2)).unwrap();
        let reverse = engine.undo().unwrap();

        assert_eq!(engine.state(), &before);
        assert_eq!(reverse.kind, UndoKind::CardFlip);
        assert_eq!(reverse.destination, Zone::DrawPile);
        assert!(!reverse.face_up);
        assert_eq!(reverse.restored_current, None);
    }

    #[test]
    fn test_nothing_to_undo() {
        let mut engine = engine_for(&["KS"], &["3H"], 10);
        assert!(matches!(engine.undo(), Err(MatchError::NothingToUndo)));
    }

    #[test]
    fn test_undo_disabled() {
        let mut engine = engine_for(&["2S"], &["3H"], 0);
        engine.apply_playfield_move(CardId::new(1)).unwrap();
        assert!(matches!(engine.undo(), Err(MatchError::NothingToUndo)));
        assert!(engine.is_won());
    }

    #[test]
    fn test_consistency_violation_leaves_model_alone() {
        let mut engine = engine_for(&["2S", "4D"], &["3H"], 10);
        engine.apply_playfield_move(CardId::new(1)).unwrap();

        // Corrupt the current pile behind the engine's back
        let stray = engine.state.pop_current().unwrap();
        engine.state.insert_playfield(stray);
        let corrupted = engine.state().clone();

        let err = engine.undo().unwrap_err();
        assert!(matches!(
            err,
            MatchError::ConsistencyViolation { expected, found: Some(found) }
                if expected == CardId::new(1) && found == CardId::new(3)
        ));
        assert!(!err.is_recoverable());
        assert_eq!(engine.state(), &corrupted);
        assert_eq!(engine.undo_count(), 1);
        assert!(engine
            .logger()
            .logs()
            .iter()
            .any(|log| log.category.as_deref() == Some("bug")));
    }

    #[test]
    fn test_undo_is_logged() {
        let mut engine = engine_for(&["2S"], &["3H"], 10);
        engine.apply_playfield_move(CardId::new(1)).unwrap();
        engine.undo().unwrap();

        let logs = engine.logger().logs();
        assert!(logs
            .iter()
            .any(|log| log.message.starts_with("Undo playfield to current (0 left)")));
    }
}
