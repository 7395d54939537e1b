//! Terminal presentation for glyphcast.
//!
//! Rendering is split into a pure half and an I/O half:
//!
//! - [`Compositor`] turns a [`glyphcast_core::Scene`] into a [`FrameBuffer`]
//!   (sky, floor, walls, sprites, post-fx, then minimap and compass).
//! - [`hud`] draws the status strip and the full-screen map.
//! - [`TerminalRenderer`] diffs frames and flushes them through crossterm.
//!
//! Everything except the renderer can be unit-tested without a terminal.

pub mod compositor;
pub mod fb;
pub mod hud;
pub mod overlay;
pub mod postfx;
pub mod renderer;

pub use glyphcast_core as core;
pub use glyphcast_types as types;

pub use compositor::{Compositor, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use hud::{draw_hud, draw_map_view, HUD_ROWS};
pub use overlay::{draw_compass, draw_minimap, heading_label};
pub use postfx::{DamageFlash, FrameContext, PostFxStack, PostProcess, SkyTwinkle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
