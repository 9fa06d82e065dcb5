//! Forward moves: playfield card onto current, draw-pile top onto current
//!
//! Each entry point checks every precondition before touching the model, so
//! a rejected request leaves state and history exactly as they were.

use crate::core::CardId;
use crate::game::GameEngine;
use crate::undo::{MoveRecord, UndoRecord};
use crate::zones::Zone;
use crate::{MatchError, Result};

/// No scoring rule exists yet; the delta still flows through records and undo
const MOVE_SCORE_DELTA: i32 = 0;

impl GameEngine {
    /// Play a playfield card onto the active current card
    pub fn apply_playfield_move(&mut self, card_id: CardId) -> Result<UndoRecord> {
        let card = match self.state.playfield_card(card_id) {
            Ok(card) => *card,
            Err(err) => return self.reject("playfield move", err),
        };
        let Some(current) = self.state.active_current_card().copied() else {
            return self.reject("playfield move", MatchError::NoCurrentCard);
        };
        if !self.config.matching.matches(&card, &current) {
            return self.reject(
                "playfield move",
                MatchError::NoMatch {
                    card: card.id,
                    current: current.id,
                },
            );
        }

        // Snapshot before any mutation
        let record = UndoRecord::CardMove(MoveRecord::capture(&card, &current, MOVE_SCORE_DELTA));
        self.history.push(record);

        self.state.remove_from_playfield(card_id);
        self.state.push_current(card_id, current.position);
        self.state.record_move(MOVE_SCORE_DELTA);

        self.logger.verbose(format_args!(
            "Move {}: {} onto {}",
            self.state.move_count(),
            card,
            current
        ));
        if self.state.is_won() {
            self.logger.minimal(format_args!(
                "Level {} cleared in {} moves",
                self.state.level_id(),
                self.state.move_count()
            ));
        }

        Ok(record)
    }

    /// Move the top of the draw pile onto the active current card
    ///
    /// Draws need no rank match.
    pub fn apply_stack_draw(&mut self) -> Result<UndoRecord> {
        let Some(top) = self.state.top_of_draw_pile().copied() else {
            return self.reject("draw", MatchError::EmptyDrawPile);
        };
        let Some(current) = self.state.active_current_card().copied() else {
            return self.reject("draw", MatchError::NoCurrentCard);
        };

        let record =
            UndoRecord::StackOperation(MoveRecord::capture(&top, &current, MOVE_SCORE_DELTA));
        self.history.push(record);

        self.state.take_draw_top();
        self.state.push_current(top.id, current.position);
        self.state.record_move(MOVE_SCORE_DELTA);

        self.logger.verbose(format_args!(
            "Move {}: drew {} onto {} ({} left)",
            self.state.move_count(),
            top,
            current,
            self.state.draw_pile().len()
        ));

        Ok(record)
    }

    /// Toggle the face of a draw-pile card
    ///
    /// Not a move: score and move count are untouched, but the flip is
    /// recorded and can be undone.
    pub fn flip_card(&mut self, card_id: CardId) -> Result<UndoRecord> {
        if self.state.zone_of(card_id) != Some(Zone::DrawPile) {
            return self.reject("flip", MatchError::CardNotFound(card_id));
        }
        let card = self.state.card_mut(card_id)?;
        let record = UndoRecord::card_flip(card, card.face_up);
        card.face_up = !card.face_up;
        let face_up = card.face_up;
        self.history.push(record);

        self.logger.verbose(format_args!(
            "Flipped card {card_id} {}",
            if face_up { "face up" } else { "face down" }
        ));

        Ok(record)
    }

    pub(crate) fn reject<T>(&self, action: &str, err: MatchError) -> Result<T> {
        self.logger
            .verbose(format_args!("Rejected {action}: {err}"));
        Err(err)
    }
}
