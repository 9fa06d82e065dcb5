//! Z-order layers for cards in each container

/// Base layer for playfield cards
pub const CARDS_NORMAL: i32 = 200;

/// Base layer for the current-card pile
pub const CARDS_CURRENT: i32 = 300;

/// Base layer for the draw pile
pub const CARDS_STACK: i32 = 400;

/// Playfield cards overlap in at most this many distinct levels
const MAX_OVERLAP: usize = 50;

/// Paint order for the `index`-th playfield card of a level
pub fn normal_card(index: usize) -> i32 {
    CARDS_NORMAL + (index % MAX_OVERLAP) as i32
}

/// Stacking order for the `index`-th card from the bottom of the draw pile
pub fn stack_card(index: usize) -> i32 {
    CARDS_STACK + index as i32
}

/// Z-order for a card that becomes current on top of `depth` earlier ones
pub fn current_card(depth: usize) -> i32 {
    CARDS_CURRENT + depth as i32
}
