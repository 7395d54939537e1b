//! Ray caster - step-marching projection over the tile grid
//!
//! A ray advances from the origin in fixed increments. Each sample is floored
//! to a tile and bounds-checked before the grid is read; leaving the grid or
//! exceeding `max_depth` yields a miss (`max_depth` + [`VOID_GLYPH`]).
//!
//! Projection helpers (fish-eye correction, wall height, palette lookup) are
//! free functions so the compositor and tests can use them independently.

use crate::grid::Grid;
use crate::types::{GraphicsConfig, DEFAULT_MAX_DEPTH, DEFAULT_RAY_STEP, VOID_GLYPH};

/// Smallest accepted march increment; finer steps fall back to the default.
pub const MIN_RAY_STEP: f32 = 1e-3;

/// Result of one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Raw (uncorrected) distance travelled, at most `max_depth`.
    pub distance: f32,
    /// Blocking glyph that stopped the ray, or the void sentinel on a miss.
    pub tile: char,
    pub x: i32,
    pub y: i32,
}

impl RayHit {
    pub fn is_miss(&self) -> bool {
        self.tile == VOID_GLYPH
    }
}

/// Tiles any ray has passed through. Only ever grows until `reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedSet {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl VisitedSet {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    /// Clear and resize for a new level.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.bits.clear();
        self.bits.resize(width * height, false);
    }

    pub fn mark(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.bits[y as usize * self.width + x as usize] = true;
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.bits[y as usize * self.width + x as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// Step-marching caster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Caster {
    max_depth: f32,
    step: f32,
}

impl Default for Caster {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH, DEFAULT_RAY_STEP)
    }
}

impl Caster {
    /// Non-positive or non-finite parameters fall back to the defaults, as
    /// does a step below [`MIN_RAY_STEP`].
    pub fn new(max_depth: f32, step: f32) -> Self {
        let max_depth = if max_depth.is_finite() && max_depth > 0.0 {
            max_depth
        } else {
            DEFAULT_MAX_DEPTH
        };
        let step = if step.is_finite() && step >= MIN_RAY_STEP {
            step
        } else {
            DEFAULT_RAY_STEP
        };
        Self { max_depth, step }
    }

    pub fn from_config(cfg: &GraphicsConfig) -> Self {
        Self::new(cfg.max_depth, cfg.ray_step)
    }

    pub fn max_depth(&self) -> f32 {
        self.max_depth
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Cast one ray without recording visited tiles.
    pub fn cast(&self, grid: &Grid, ox: f32, oy: f32, angle: f32) -> RayHit {
        self.march(grid, ox, oy, angle, |_, _| {})
    }

    /// Cast one ray, marking every in-bounds tile it samples.
    pub fn cast_marking(
        &self,
        grid: &Grid,
        ox: f32,
        oy: f32,
        angle: f32,
        visited: &mut VisitedSet,
    ) -> RayHit {
        self.march(grid, ox, oy, angle, |x, y| visited.mark(x, y))
    }

    fn march(
        &self,
        grid: &Grid,
        ox: f32,
        oy: f32,
        angle: f32,
        mut on_sample: impl FnMut(i32, i32),
    ) -> RayHit {
        let miss = |x: i32, y: i32| RayHit {
            distance: self.max_depth,
            tile: VOID_GLYPH,
            x,
            y,
        };
        if !(ox.is_finite() && oy.is_finite() && angle.is_finite()) {
            return miss(-1, -1);
        }

        let (dy, dx) = angle.sin_cos();
        let steps = (self.max_depth / self.step).ceil() as u32;
        let mut last = (ox.floor() as i32, oy.floor() as i32);

        // Distance is recomputed from the step index so error does not accumulate.
        for i in 1..=steps {
            let d = (i as f32 * self.step).min(self.max_depth);
            let tx = (ox + dx * d).floor() as i32;
            let ty = (oy + dy * d).floor() as i32;
            last = (tx, ty);

            let Some(tile) = grid.get(tx, ty) else {
                return miss(tx, ty);
            };
            on_sample(tx, ty);
            if !grid.is_walkable(tx, ty) {
                return RayHit {
                    distance: d,
                    tile,
                    x: tx,
                    y: ty,
                };
            }
        }
        miss(last.0, last.1)
    }

    /// Whether nothing blocks the straight segment between two points.
    pub fn has_line_of_sight(&self, grid: &Grid, from: (f32, f32), to: (f32, f32)) -> bool {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let dist = dx.hypot(dy);
        if !dist.is_finite() {
            return false;
        }
        if dist > self.max_depth {
            return false;
        }
        let steps = (dist / self.step).ceil() as u32;
        for i in 1..steps {
            let t = i as f32 / steps as f32;
            if !grid.is_walkable_at(from.0 + dx * t, from.1 + dy * t) {
                return false;
            }
        }
        true
    }
}

/// Remove fish-eye distortion from a raw ray distance.
#[inline]
pub fn correct_fish_eye(raw: f32, ray_angle: f32, player_angle: f32) -> f32 {
    raw * (ray_angle - player_angle).cos()
}

/// Projected wall height in rows. Near-zero distances yield full height.
#[inline]
pub fn wall_height(screen_height: usize, distance: f32) -> usize {
    if !(distance > f32::EPSILON) {
        return screen_height;
    }
    let h = screen_height as f32 / distance;
    if h >= screen_height as f32 {
        screen_height
    } else {
        h as usize
    }
}

/// Pick a shade from a near-to-far palette by `distance / max_depth`.
pub fn wall_glyph(distance: f32, max_depth: f32, palette: &[char]) -> char {
    let Some(&last) = palette.last() else {
        return ' ';
    };
    if !(max_depth > 0.0) || !distance.is_finite() {
        return last;
    }
    let t = (distance / max_depth).clamp(0.0, 1.0);
    let idx = (t * (palette.len() - 1) as f32).round() as usize;
    palette[idx.min(palette.len() - 1)]
}
