//! glyphcast (workspace facade crate).
//!
//! Re-exports the member crates as `glyphcast::{core, input, term, types}` and
//! hosts the pieces only the binary needs: config file loading and log setup.

pub mod config;
pub mod logging;

pub use glyphcast_core as core;
pub use glyphcast_input as input;
pub use glyphcast_term as term;
pub use glyphcast_types as types;
