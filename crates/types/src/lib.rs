//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! Everything here is pure data: glyph tables, kind enums, tuning constants
//! and the configuration tree. Nothing in this crate touches the terminal.
//!
//! # Glyph classes
//!
//! The level grid is stored as text. A small reserved set of glyphs is
//! walkable; everything else blocks unless it is an entity marker.
//!
//! | Class | Glyphs | Notes |
//! |-------|--------|-------|
//! | Floor | `.` `·` `~` ` ` | walkable, one per theme |
//! | Door | `|` `∥` | locked / unlocked, blocking until opened |
//! | Exit | `>` `»` | inactive / active, walkable |
//! | Special | `Q` `A` `L` `B` `Σ` `Ω` `¤` `≡` | walkable room/theme markers |
//! | Void | `∅` | sentinel returned for out-of-bounds samples |
//!
//! # Simulation constants
//!
//! All timers are expressed in ticks. One tick is one accepted input line,
//! so behavior is deterministic for a fixed seed and input sequence.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FOV` | π/3 | horizontal field of view |
//! | `DEFAULT_MAX_DEPTH` | 16.0 | ray march limit in tiles |
//! | `DEFAULT_RAY_STEP` | 0.02 | ray march increment in tiles |
//! | `PLAYER_MAX_HEALTH` | 100 | heal cap |
//! | `SCORE_TICK_INTERVAL` | 100 | ticks per survival point |
//!
//! # Examples
//!
//! ```
//! use glyphcast_types::{is_walkable_glyph, EnemyKind, GameAction, Theme};
//!
//! assert!(is_walkable_glyph('.'));
//! assert!(!is_walkable_glyph('#'));
//!
//! assert_eq!(EnemyKind::from_str("tank"), Some(EnemyKind::Tank));
//! assert_eq!(GameAction::from_str("fire"), Some(GameAction::Fire));
//! assert_eq!(Theme::for_level(1), Theme::Atman);
//! ```

pub mod config;

pub use config::{
    EnemyConfig, GameConfig, GenerationStrategy, GeneratorConfig, GraphicsConfig, PlayerConfig,
    SpawnConfig,
};

/// Glyphs that count as floor for collision and rendering.
pub const WALKABLE_GLYPHS: [char; 4] = ['.', '·', '~', ' '];

/// Locked door marker.
pub const DOOR_LOCKED_GLYPH: char = '|';

/// Unlocked (but still closed) door marker.
pub const DOOR_UNLOCKED_GLYPH: char = '∥';

/// Exit marker before the level objectives are complete.
pub const EXIT_INACTIVE_GLYPH: char = '>';

/// Exit marker once every objective is complete.
pub const EXIT_ACTIVE_GLYPH: char = '»';

/// Sentinel tile for samples outside the grid.
pub const VOID_GLYPH: char = '∅';

/// Default wall glyph used by test grids and the cave fallback.
pub const DEFAULT_WALL_GLYPH: char = '#';

/// Horizontal field of view (60°).
pub const DEFAULT_FOV: f32 = std::f32::consts::FRAC_PI_3;

/// Maximum ray length in tiles.
pub const DEFAULT_MAX_DEPTH: f32 = 16.0;

/// Ray march increment in tiles.
pub const DEFAULT_RAY_STEP: f32 = 0.02;

/// Near-to-far wall shading palette.
pub const DEFAULT_WALL_PALETTE: &str = "█▓▒░·";

/// Player health cap.
pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Distance at which a pickup is collected.
pub const PICKUP_RADIUS: f32 = 0.6;

/// Distance at which a projectile connects with its target.
pub const PROJECTILE_HIT_RADIUS: f32 = 0.5;

/// Distance at which runners and tanks deal contact damage.
pub const CONTACT_RADIUS: f32 = 0.75;

/// Ticks between passive survival points.
pub const SCORE_TICK_INTERVAL: u64 = 100;

/// Score for stepping on an active exit.
pub const LEVEL_CLEAR_BONUS: u32 = 500;

/// Score for collecting any pickup.
pub const PICKUP_SCORE: u32 = 10;

/// Lifetime of HUD notifications.
pub const NOTIFICATION_TTL_TICKS: u32 = 6;

/// Upper bound on live projectiles owned by one enemy.
pub const MAX_ENEMY_PROJECTILES: usize = 8;

/// Returns true if `ch` is a floor-class glyph.
#[inline]
pub fn is_walkable_glyph(ch: char) -> bool {
    WALKABLE_GLYPHS.contains(&ch)
}

/// Returns true if `ch` is a door marker (locked or unlocked).
#[inline]
pub fn is_door_glyph(ch: char) -> bool {
    ch == DOOR_LOCKED_GLYPH || ch == DOOR_UNLOCKED_GLYPH
}

/// Returns true if `ch` is an exit marker (active or not).
#[inline]
pub fn is_exit_glyph(ch: char) -> bool {
    ch == EXIT_INACTIVE_GLYPH || ch == EXIT_ACTIVE_GLYPH
}

/// Returns true if `ch` is a theme or room special marker.
#[inline]
pub fn is_special_glyph(ch: char) -> bool {
    Theme::ALL.iter().any(|t| t.special() == ch)
        || RoomKind::ALL.iter().any(|k| k.special_glyph() == Some(ch))
}

/// Visual theme of a level.
///
/// Themes cycle with the level index and decide the wall, floor and special
/// glyphs written by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Quantum,
    Atman,
    Loqiemean,
    Batut,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Quantum, Theme::Atman, Theme::Loqiemean, Theme::Batut];

    /// Theme used for a given level index.
    pub fn for_level(level: u32) -> Self {
        Self::ALL[(level as usize) % Self::ALL.len()]
    }

    pub fn wall(&self) -> char {
        match self {
            Theme::Quantum => '#',
            Theme::Atman => '%',
            Theme::Loqiemean => '▓',
            Theme::Batut => '█',
        }
    }

    pub fn floor(&self) -> char {
        match self {
            Theme::Quantum => '.',
            Theme::Atman => '·',
            Theme::Loqiemean => '~',
            Theme::Batut => ' ',
        }
    }

    pub fn special(&self) -> char {
        match self {
            Theme::Quantum => 'Q',
            Theme::Atman => 'A',
            Theme::Loqiemean => 'L',
            Theme::Batut => 'B',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Quantum => "quantum",
            Theme::Atman => "atman",
            Theme::Loqiemean => "loqiemean",
            Theme::Batut => "batut",
        }
    }
}

/// Wall material, used to pick a shading palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Stone,
    Brick,
    Crystal,
    Metal,
    Door,
}

impl Material {
    /// Material for a blocking glyph.
    pub fn from_glyph(ch: char) -> Self {
        match ch {
            '%' => Material::Brick,
            '▓' | '▒' => Material::Crystal,
            '█' => Material::Metal,
            c if is_door_glyph(c) => Material::Door,
            _ => Material::Stone,
        }
    }

    /// Near-to-far palette for this material.
    pub fn palette(&self) -> &'static [char] {
        match self {
            Material::Stone => &['█', '▓', '▒', '░', '·'],
            Material::Brick => &['▓', '▒', '%', ':', '·'],
            Material::Crystal => &['◆', '◈', '◇', '◦', '·'],
            Material::Metal => &['█', '▉', '▊', '▌', '▏'],
            Material::Door => &['‖', '|', '¦', ':', '.'],
        }
    }
}

/// Room classification used by the room-and-corridor generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomKind {
    Spawn,
    Armory,
    Medical,
    Reactor,
    Storage,
    Generic,
}

impl RoomKind {
    pub const ALL: [RoomKind; 6] = [
        RoomKind::Spawn,
        RoomKind::Armory,
        RoomKind::Medical,
        RoomKind::Reactor,
        RoomKind::Storage,
        RoomKind::Generic,
    ];

    /// Weighted pool for randomly placed rooms (spawn is never drawn).
    pub const POOL: [(RoomKind, u32); 5] = [
        (RoomKind::Generic, 4),
        (RoomKind::Storage, 2),
        (RoomKind::Armory, 1),
        (RoomKind::Medical, 1),
        (RoomKind::Reactor, 1),
    ];

    /// Interior floor glyph, falling back to the theme floor.
    pub fn floor_glyph(&self, theme_floor: char) -> char {
        match self {
            RoomKind::Medical => '·',
            RoomKind::Reactor => '~',
            _ => theme_floor,
        }
    }

    /// Themed marker stamped at the room center.
    pub fn special_glyph(&self) -> Option<char> {
        match self {
            RoomKind::Armory => Some('Σ'),
            RoomKind::Medical => Some('Ω'),
            RoomKind::Reactor => Some('¤'),
            RoomKind::Storage => Some('≡'),
            RoomKind::Spawn | RoomKind::Generic => None,
        }
    }

    /// Probability that the center marker is stamped.
    pub fn special_chance(&self) -> f32 {
        match self {
            RoomKind::Reactor => 0.9,
            RoomKind::Armory | RoomKind::Medical => 0.6,
            RoomKind::Storage => 0.3,
            RoomKind::Spawn | RoomKind::Generic => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomKind::Spawn => "spawn",
            RoomKind::Armory => "armory",
            RoomKind::Medical => "medical",
            RoomKind::Reactor => "reactor",
            RoomKind::Storage => "storage",
            RoomKind::Generic => "generic",
        }
    }
}

/// Hostile actor kinds.
///
/// - **Runner**: fast, fragile, chases the player
/// - **Tank**: slow, durable, chases the player
/// - **Shooter**: stationary, telegraphs then fires projectiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Runner,
    Tank,
    Shooter,
}

impl EnemyKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "runner" => Some(EnemyKind::Runner),
            "tank" => Some(EnemyKind::Tank),
            "shooter" => Some(EnemyKind::Shooter),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Runner => "runner",
            EnemyKind::Tank => "tank",
            EnemyKind::Shooter => "shooter",
        }
    }

    pub fn base_health(&self) -> i32 {
        match self {
            EnemyKind::Runner => 30,
            EnemyKind::Tank => 120,
            EnemyKind::Shooter => 50,
        }
    }

    /// Damage per tick while touching the player (shooters use projectiles).
    pub fn contact_damage(&self) -> i32 {
        match self {
            EnemyKind::Runner => 3,
            EnemyKind::Tank => 7,
            EnemyKind::Shooter => 0,
        }
    }

    pub fn score_value(&self) -> u32 {
        match self {
            EnemyKind::Runner => 100,
            EnemyKind::Tank => 250,
            EnemyKind::Shooter => 150,
        }
    }
}

/// Collectible kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickupKind {
    Health,
    Ammo,
    Keycard,
}

impl PickupKind {
    pub fn glyph(&self) -> char {
        match self {
            PickupKind::Health => '+',
            PickupKind::Ammo => '∎',
            PickupKind::Keycard => '⌘',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PickupKind::Health => "health",
            PickupKind::Ammo => "ammo",
            PickupKind::Keycard => "keycard",
        }
    }
}

/// Mission objective kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectiveKind {
    Kill,
    Collect,
    Survive,
}

impl ObjectiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveKind::Kill => "kill",
            ObjectiveKind::Collect => "collect",
            ObjectiveKind::Survive => "survive",
        }
    }
}

/// Player weapon modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponMode {
    /// Narrow hitscan, one target.
    Pistol,
    /// Wide cone, every target inside it, short range.
    Shotgun,
    /// Slow projectile with splash damage.
    Rocket,
}

impl WeaponMode {
    pub fn ammo_cost(&self) -> i32 {
        match self {
            WeaponMode::Pistol => 1,
            WeaponMode::Shotgun => 2,
            WeaponMode::Rocket => 3,
        }
    }

    pub fn damage(&self) -> i32 {
        match self {
            WeaponMode::Pistol => 25,
            WeaponMode::Shotgun => 40,
            WeaponMode::Rocket => 70,
        }
    }

    /// Half-angle of the hit cone in radians.
    pub fn cone(&self) -> f32 {
        match self {
            WeaponMode::Pistol => 0.08,
            WeaponMode::Shotgun => 0.3,
            WeaponMode::Rocket => 0.0,
        }
    }

    pub fn range(&self) -> f32 {
        match self {
            WeaponMode::Pistol => DEFAULT_MAX_DEPTH,
            WeaponMode::Shotgun => 6.0,
            WeaponMode::Rocket => DEFAULT_MAX_DEPTH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponMode::Pistol => "pistol",
            WeaponMode::Shotgun => "shotgun",
            WeaponMode::Rocket => "rocket",
        }
    }
}

/// Player commands. One accepted action advances the simulation one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    Fire,
    SelectWeapon(WeaponMode),
    /// Let one tick pass without moving.
    Wait,
    Pause,
    ToggleMap,
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use glyphcast_types::{GameAction, WeaponMode};
    ///
    /// assert_eq!(GameAction::from_str("forward"), Some(GameAction::MoveForward));
    /// let shotgun = GameAction::SelectWeapon(WeaponMode::Shotgun);
    /// assert_eq!(GameAction::from_str("weapon2"), Some(shotgun));
    /// assert_eq!(GameAction::from_str("dance"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "forward" => Some(GameAction::MoveForward),
            "back" => Some(GameAction::MoveBack),
            "strafeleft" => Some(GameAction::StrafeLeft),
            "straferight" => Some(GameAction::StrafeRight),
            "turnleft" => Some(GameAction::TurnLeft),
            "turnright" => Some(GameAction::TurnRight),
            "fire" => Some(GameAction::Fire),
            "weapon1" => Some(GameAction::SelectWeapon(WeaponMode::Pistol)),
            "weapon2" => Some(GameAction::SelectWeapon(WeaponMode::Shotgun)),
            "weapon3" => Some(GameAction::SelectWeapon(WeaponMode::Rocket)),
            "wait" => Some(GameAction::Wait),
            "pause" => Some(GameAction::Pause),
            "map" => Some(GameAction::ToggleMap),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveForward => "forward",
            GameAction::MoveBack => "back",
            GameAction::StrafeLeft => "strafeLeft",
            GameAction::StrafeRight => "strafeRight",
            GameAction::TurnLeft => "turnLeft",
            GameAction::TurnRight => "turnRight",
            GameAction::Fire => "fire",
            GameAction::SelectWeapon(WeaponMode::Pistol) => "weapon1",
            GameAction::SelectWeapon(WeaponMode::Shotgun) => "weapon2",
            GameAction::SelectWeapon(WeaponMode::Rocket) => "weapon3",
            GameAction::Wait => "wait",
            GameAction::Pause => "pause",
            GameAction::ToggleMap => "map",
            GameAction::Restart => "restart",
        }
    }

    /// Whether this action advances the simulation by a tick.
    pub fn advances_tick(&self) -> bool {
        !matches!(
            self,
            GameAction::Pause | GameAction::ToggleMap | GameAction::Restart
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkable_set_is_the_theme_floors() {
        for theme in Theme::ALL {
            assert!(is_walkable_glyph(theme.floor()), "{:?}", theme);
            assert!(!is_walkable_glyph(theme.wall()), "{:?}", theme);
            assert!(is_special_glyph(theme.special()));
        }
    }

    #[test]
    fn markers_are_not_floor() {
        for ch in [
            DOOR_LOCKED_GLYPH,
            DOOR_UNLOCKED_GLYPH,
            EXIT_INACTIVE_GLYPH,
            EXIT_ACTIVE_GLYPH,
            VOID_GLYPH,
        ] {
            assert!(!is_walkable_glyph(ch));
        }
    }

    #[test]
    fn tank_is_tougher_than_runner() {
        assert!(EnemyKind::Tank.base_health() > EnemyKind::Runner.base_health());
    }

    #[test]
    fn action_strings_roundtrip() {
        let all = [
            GameAction::MoveForward,
            GameAction::TurnLeft,
            GameAction::SelectWeapon(WeaponMode::Rocket),
            GameAction::ToggleMap,
        ];
        for a in all {
            assert_eq!(GameAction::from_str(a.as_str()), Some(a));
        }
    }

    #[test]
    fn door_material_uses_door_palette() {
        assert_eq!(Material::from_glyph(DOOR_LOCKED_GLYPH), Material::Door);
        assert_eq!(Material::from_glyph('#'), Material::Stone);
    }
}
