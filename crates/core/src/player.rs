//! Player pose, vitals and inventory

use std::f32::consts::TAU;

use crate::grid::Grid;
use crate::types::{PlayerConfig, WeaponMode, PLAYER_MAX_HEALTH};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Facing in radians, kept in [0, 2π). 0 faces east, π/2 faces south.
    pub angle: f32,
    pub health: i32,
    pub ammo: i32,
    pub score: u32,
    pub keycards: u32,
    pub weapon: WeaponMode,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32, cfg: &PlayerConfig) -> Self {
        Self {
            x,
            y,
            angle: normalize_angle(angle),
            health: cfg.start_health.clamp(1, PLAYER_MAX_HEALTH),
            ammo: cfg.start_ammo.max(0),
            score: 0,
            keycards: 0,
            weapon: WeaponMode::Pistol,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Move by a delta if the destination tile is walkable. Returns whether it moved.
    pub fn try_move(&mut self, dx: f32, dy: f32, grid: &Grid) -> bool {
        let (nx, ny) = (self.x + dx, self.y + dy);
        if grid.is_walkable_at(nx, ny) {
            self.x = nx;
            self.y = ny;
            true
        } else {
            false
        }
    }

    /// Delta for a move of `step` along the facing (positive) or against it.
    pub fn forward_delta(&self, step: f32) -> (f32, f32) {
        let (sin, cos) = self.angle.sin_cos();
        (cos * step, sin * step)
    }

    /// Delta for a sideways move; positive `step` strafes right.
    pub fn strafe_delta(&self, step: f32) -> (f32, f32) {
        let (sin, cos) = self.angle.sin_cos();
        (-sin * step, cos * step)
    }

    pub fn rotate(&mut self, delta: f32) {
        self.angle = normalize_angle(self.angle + delta);
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health = (self.health - damage.max(0)).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount.max(0)).min(PLAYER_MAX_HEALTH);
    }

    pub fn add_ammo(&mut self, amount: i32) {
        self.ammo = self.ammo.saturating_add(amount.max(0));
    }

    /// Spend ammo for the current weapon. Returns false if there is not enough.
    pub fn shoot(&mut self) -> bool {
        let cost = self.weapon.ammo_cost();
        if self.ammo < cost {
            return false;
        }
        self.ammo -= cost;
        true
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn has_keycard(&self) -> bool {
        self.keycards > 0
    }
}

/// Wrap an angle into [0, 2π).
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Wrap an angle difference into (-π, π].
pub fn normalize_bearing(angle: f32) -> f32 {
    let a = normalize_angle(angle);
    if a > std::f32::consts::PI {
        a - TAU
    } else {
        a
    }
}
