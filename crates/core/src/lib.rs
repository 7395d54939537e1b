//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the level model, the ray caster, level generation,
//! enemy AI and the tick loop that ties them together. It has **no
//! dependencies** on the terminal or any I/O, which keeps it:
//!
//! - **Deterministic**: a seed plus an action sequence replays exactly
//! - **Testable**: every module carries its own unit tests
//! - **Portable**: the renderer is just one consumer of [`GameState::scene`]
//!
//! # Module Structure
//!
//! - [`grid`]: text-form tile grid with bounds-checked access and flood fill
//! - [`caster`]: step-marching ray caster and projection helpers
//! - [`generator`]: room-and-corridor and cave generators, door/exit placement
//! - [`mission`]: doors, exits and level objectives
//! - [`pickups`]: health, ammo and keycard placement
//! - [`actors`]: enemy behaviors, shooter state machine, projectiles
//! - [`player`]: pose, vitals and weapons
//! - [`level`]: a generated level and its entity state
//! - [`game_state`]: per-action tick orchestration
//! - [`rng`]: seeded LCG used for every random decision
//!
//! # Example
//!
//! ```
//! use glyphcast_core::GameState;
//! use glyphcast_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! assert!(game.level().grid.is_walkable_at(game.player().x, game.player().y));
//!
//! // Every movement action advances exactly one tick.
//! assert!(game.apply_action(GameAction::TurnRight));
//! assert!(game.apply_action(GameAction::MoveForward));
//! assert_eq!(game.ticks(), 2);
//!
//! // Toggling the map does not.
//! assert!(!game.apply_action(GameAction::ToggleMap));
//! assert_eq!(game.ticks(), 2);
//! ```

pub mod actors;
pub mod caster;
pub mod game_state;
pub mod generator;
pub mod grid;
pub mod level;
pub mod mission;
pub mod pickups;
pub mod player;
pub mod rng;

pub use glyphcast_types as types;

// Re-export commonly used types for convenience
pub use actors::{
    spawn_enemies, spawn_enemies_avoiding, AiReport, Behavior, Enemy, EnemyAi, Hit, HitSource,
    Projectile, ShooterState,
};
pub use caster::{correct_fish_eye, wall_glyph, wall_height, Caster, RayHit, VisitedSet};
pub use game_state::{GameState, Notification, RecentHit, Scene};
pub use generator::LevelGenerator;
pub use grid::{classify, Grid, GridError, TileClass};
pub use level::{GenerationReport, Level, Room};
pub use mission::{generate_objectives, objectives_complete, Door, Exit, Objective};
pub use pickups::{spawn_pickups, Pickup};
pub use player::{normalize_angle, normalize_bearing, Player};
pub use rng::SimpleRng;
