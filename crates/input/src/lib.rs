//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The game is
//! turn-based (one accepted action per tick), so there is no repeat handling:
//! every key press is one action.

pub mod map;

pub use glyphcast_types as types;

pub use map::{handle_key_event, should_quit};
