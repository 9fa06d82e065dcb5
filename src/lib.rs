//! Card-match solitaire engine
//!
//! Cards are cleared from a playfield onto a single current card when their
//! ranks are adjacent, with a draw pile to fall back on. Every accepted move
//! is recorded so it can be undone exactly, up to a configurable depth.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod undo;
pub mod zones;

pub use error::{MatchError, Result};
