//! Level generation
//!
//! Turns a [`LevelConfig`] into a fresh [`GameState`]: ids are handed out
//! in order (playfield first, then the draw pile from the bottom), playfield
//! cards are dealt face-up at their configured positions and draw-pile cards
//! face-down at the stack position.

use crate::core::{zorder, Card, Point, Rank, Suit};
use crate::game::GameState;
use crate::loader::{GameRulesConfig, LayoutConfig, LevelConfig};
use crate::{MatchError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Builds game states from level configs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelGenerator {
    first_card_id: u32,
    stack_position: Point,
    /// Seed for shuffling faces across each container's slots
    shuffle_seed: Option<u64>,
}

impl LevelGenerator {
    pub fn new(first_card_id: u32) -> Self {
        LevelGenerator {
            first_card_id,
            stack_position: LayoutConfig::default().stack_position,
            shuffle_seed: None,
        }
    }

    /// Generator set up the way the rules file asks for
    pub fn from_rules(rules: &GameRulesConfig, layout: &LayoutConfig, seed: u64) -> Self {
        let generator =
            LevelGenerator::new(rules.card_generation.starting_card_id).with_layout(layout);
        if rules.card_generation.shuffle_on_load {
            generator.with_shuffle(seed)
        } else {
            generator
        }
    }

    pub fn with_layout(mut self, layout: &LayoutConfig) -> Self {
        self.stack_position = layout.stack_position;
        self
    }

    /// Shuffle which face lands in which slot; positions and z-order stay put
    pub fn with_shuffle(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn generate(&self, level: &LevelConfig) -> Result<GameState> {
        level.validate()?;
        let level_id = u32::try_from(level.level_id)
            .map_err(|_| MatchError::InvalidLevel(format!("bad level id {}", level.level_id)))?;
        let id_range_fits = u32::try_from(level.total_cards())
            .ok()
            .and_then(|count| self.first_card_id.checked_add(count))
            .is_some();
        if !id_range_fits {
            return Err(MatchError::InvalidLevel(format!(
                "{} cards do not fit in the id range starting at {}",
                level.total_cards(),
                self.first_card_id
            )));
        }

        let mut playfield_faces = faces(&level.playfield)?;
        let mut stack_faces = faces(&level.stack)?;
        if let Some(seed) = self.shuffle_seed {
            let mut rng = ChaCha12Rng::seed_from_u64(seed);
            playfield_faces.shuffle(&mut rng);
            stack_faces.shuffle(&mut rng);
        }

        let mut state = GameState::new(level_id, self.first_card_id);

        for (i, (data, (rank, suit))) in level.playfield.iter().zip(playfield_faces).enumerate() {
            let id = state.next_card_id()?;
            let card = Card::new(id, rank, suit)
                .at(data.position)
                .with_z_order(zorder::normal_card(i));
            state.add_playfield_card(card);
        }

        for (i, (rank, suit)) in stack_faces.into_iter().enumerate() {
            let id = state.next_card_id()?;
            let card = Card::new(id, rank, suit)
                .at(self.stack_position)
                .with_z_order(zorder::stack_card(i))
                .face_down();
            state.add_draw_pile_card(card);
        }

        Ok(state)
    }
}

fn faces(cards: &[crate::loader::CardData]) -> Result<Vec<(Rank, Suit)>> {
    cards
        .iter()
        .map(|data| Ok((data.rank()?, data.card_suit()?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;
    use crate::zones::Zone;

    fn level() -> LevelConfig {
        LevelConfig::from_notation(4, &["KC", "2S", "QH", "5D"], &["AH", "7C", "9S"]).unwrap()
    }

    #[test]
    fn test_generate_assigns_ids_in_order() {
        let state = LevelGenerator::new(1000).generate(&level()).unwrap();

        assert_eq!(state.level_id(), 4);
        assert_eq!(state.card_count(), 7);
        assert_eq!(
            state.playfield().cards(),
            &[CardId::new(1000), CardId::new(1001), CardId::new(1002), CardId::new(1003)]
        );
        assert_eq!(
            state.draw_pile().cards(),
            &[CardId::new(1004), CardId::new(1005), CardId::new(1006)]
        );
        assert!(state.current_history().is_empty());
        assert!(state.invariant_violations().is_empty());
    }

    #[test]
    fn test_generate_places_cards() {
        let layout = LayoutConfig {
            stack_position: Point::new(80.0, 90.0),
            ..LayoutConfig::default()
        };
        let level = level();
        let state = LevelGenerator::new(1).with_layout(&layout).generate(&level).unwrap();

        let king = state.card(CardId::new(1)).unwrap();
        assert!(king.face_up);
        assert_eq!(king.rank, Rank::KING);
        assert_eq!(king.position, level.playfield[0].position);
        assert_eq!(king.z_order, zorder::normal_card(0));

        let top = state.top_of_draw_pile().unwrap();
        assert_eq!(top.id, CardId::new(7));
        assert!(!top.face_up);
        assert_eq!(top.position, Point::new(80.0, 90.0));
        assert_eq!(top.z_order, zorder::stack_card(2));
        assert_eq!(state.zone_of(CardId::new(5)), Some(Zone::DrawPile));
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let level = level();
        let a = LevelGenerator::new(1).with_shuffle(42).generate(&level).unwrap();
        let b = LevelGenerator::new(1).with_shuffle(42).generate(&level).unwrap();
        assert_eq!(a, b);

        // Positions and layering do not move with the faces
        for (i, data) in level.playfield.iter().enumerate() {
            let card = a.card(CardId::new(i as u32 + 1)).unwrap();
            assert_eq!(card.position, data.position);
            assert_eq!(card.z_order, zorder::normal_card(i));
        }

        let mut ranks: Vec<u8> = a.playfield().iter().map(|id| a.card(id).unwrap().rank.value()).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![2, 5, 12, 13]);
    }

    #[test]
    fn test_starting_id_near_u32_max() {
        let level = LevelConfig::from_notation(1, &["2S"], &["3H"]).unwrap();

        let result = LevelGenerator::new(u32::MAX).generate(&level);
        assert!(matches!(result, Err(MatchError::InvalidLevel(_))));
        let result = LevelGenerator::new(u32::MAX - 1).generate(&level);
        assert!(matches!(result, Err(MatchError::InvalidLevel(_))));

        // The last two ids below the limit still work
        let state = LevelGenerator::new(u32::MAX - 2).generate(&level).unwrap();
        assert_eq!(state.playfield().cards(), &[CardId::new(u32::MAX - 2)]);
        assert_eq!(state.draw_pile().cards(), &[CardId::new(u32::MAX - 1)]);
    }

    #[test]
    fn test_from_rules() {
        let rules = GameRulesConfig::parse(
            r#"{"CardGeneration": {"StartingCardId": 500, "ShuffleOnLoad": true}}"#,
        )
        .unwrap();
        let generator = LevelGenerator::from_rules(&rules, &LayoutConfig::default(), 9);
        let state = generator.generate(&level()).unwrap();

        assert_eq!(state.playfield().cards()[0], CardId::new(500));
        assert_eq!(state, LevelGenerator::new(500).with_shuffle(9).generate(&level()).unwrap());
    }
}
