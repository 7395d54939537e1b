//! Configuration tree.
//!
//! Every section derives `Default` and is marked `#[serde(default)]`, so a
//! partial (or empty) document is always accepted and the engine runs with no
//! configuration at all.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_FOV, DEFAULT_MAX_DEPTH, DEFAULT_RAY_STEP, DEFAULT_WALL_PALETTE};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub graphics: GraphicsConfig,
    pub spawns: SpawnConfig,
    pub enemies: EnemyConfig,
    pub player: PlayerConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Field of view in radians.
    pub fov: f32,
    pub max_depth: f32,
    pub ray_step: f32,
    /// Near-to-far palette for stone walls.
    pub wall_palette: String,
    /// Substitute per-material palettes for the default one.
    pub materials_enabled: bool,
    pub floor_char: char,
    pub sky_char: char,
    /// Probability of a floor cell getting a texture glyph.
    pub floor_texture_chance: f32,
    pub minimap_enabled: bool,
    pub minimap_width: u16,
    pub minimap_height: u16,
    pub sky_twinkle: bool,
    pub damage_flash: bool,
    pub damage_flash_frames: u32,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV,
            max_depth: DEFAULT_MAX_DEPTH,
            ray_step: DEFAULT_RAY_STEP,
            wall_palette: DEFAULT_WALL_PALETTE.to_string(),
            materials_enabled: true,
            floor_char: '.',
            sky_char: ' ',
            floor_texture_chance: 0.04,
            minimap_enabled: true,
            minimap_width: 15,
            minimap_height: 8,
            sky_twinkle: true,
            damage_flash: true,
            damage_flash_frames: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub door_count: usize,
    pub exit_count: usize,
    pub enemy_count: usize,
    /// Extra enemies per level index.
    pub enemies_per_level: usize,
    pub health_pack_chance: f32,
    pub ammo_pack_chance: f32,
    pub keycard_chance: f32,
    /// Fraction of walkable cells rolled for pickups.
    pub pickup_budget_ratio: f32,
    pub health_amount: i32,
    pub ammo_amount: i32,
    /// Enemies never spawn closer than this to the player start.
    pub safe_radius: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            door_count: 2,
            exit_count: 1,
            enemy_count: 6,
            enemies_per_level: 1,
            health_pack_chance: 0.08,
            ammo_pack_chance: 0.10,
            keycard_chance: 0.03,
            pickup_budget_ratio: 0.2,
            health_amount: 20,
            ammo_amount: 15,
            safe_radius: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub runner_speed: f32,
    pub tank_speed: f32,
    pub shooter_chance: f32,
    pub tank_chance: f32,
    /// Shooters only wind up when the player is this close.
    pub aggro_range: f32,
    /// Per-tick probability that an idle shooter in range starts a telegraph.
    pub fire_chance: f32,
    pub telegraph_ticks: u32,
    pub cooldown_ticks: u32,
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    pub projectile_lifetime: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            runner_speed: 0.12,
            tank_speed: 0.05,
            shooter_chance: 0.3,
            tank_chance: 0.2,
            aggro_range: 8.0,
            fire_chance: 0.15,
            telegraph_ticks: 3,
            cooldown_ticks: 8,
            projectile_speed: 0.35,
            projectile_damage: 8,
            projectile_lifetime: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub move_step: f32,
    /// Radians per turn action.
    pub turn_step: f32,
    pub start_health: i32,
    pub start_ammo: i32,
    pub rocket_speed: f32,
    pub rocket_splash: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_step: 0.25,
            turn_step: 0.2,
            start_health: 100,
            start_ammo: 50,
            rocket_speed: 0.6,
            rocket_splash: 1.2,
        }
    }
}

/// Terrain strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStrategy {
    /// Caves every third level, rooms otherwise.
    #[default]
    Auto,
    Rooms,
    Caves,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub strategy: GenerationStrategy,
    pub base_width: usize,
    pub base_height: usize,
    pub max_width: usize,
    pub max_height: usize,
    /// Rooms requested besides the spawn room.
    pub room_count: usize,
    /// Placement attempts per requested room.
    pub attempts_per_room: usize,
    pub cave_fill: f32,
    pub cave_passes: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            strategy: GenerationStrategy::Auto,
            base_width: 32,
            base_height: 20,
            max_width: 80,
            max_height: 48,
            room_count: 7,
            attempts_per_room: 10,
            cave_fill: 0.45,
            cave_passes: 4,
        }
    }
}
