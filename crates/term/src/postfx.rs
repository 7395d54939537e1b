//! Post-process stack
//!
//! Cosmetic passes run after the 3D view is composed and before the
//! protected overlays (minimap, compass). Each pass takes the whole buffer and
//! returns a whole buffer. Passes run in registration order and may keep
//! their own state, but nothing else.

use glyphcast_core::{normalize_bearing, RecentHit};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Per-frame inputs shared with every pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub tick: u64,
    /// First floor row; rows above it are sky.
    pub horizon: u16,
    pub sky_char: char,
    pub player_angle: f32,
    pub recent_hit: Option<RecentHit>,
}

pub trait PostProcess {
    fn name(&self) -> &'static str;

    fn apply(&mut self, fb: FrameBuffer, ctx: &FrameContext) -> FrameBuffer;
}

/// Ordered list of passes.
#[derive(Default)]
pub struct PostFxStack {
    passes: Vec<Box<dyn PostProcess>>,
}

impl PostFxStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pass: Box<dyn PostProcess>) {
        self.passes.push(pass);
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    pub fn apply(&mut self, fb: FrameBuffer, ctx: &FrameContext) -> FrameBuffer {
        self.passes.iter_mut().fold(fb, |fb, pass| pass.apply(fb, ctx))
    }
}

/// Integer hash for stable per-cell noise.
pub(crate) fn cell_hash(x: u32, y: u32, salt: u32) -> u32 {
    let mut h = x
        .wrapping_mul(0x8DA6_B343)
        .wrapping_add(y.wrapping_mul(0xD816_3841))
        .wrapping_add(salt.wrapping_mul(0xCB1A_B31F));
    h ^= h >> 13;
    h = h.wrapping_mul(0x5bd1_e995);
    h ^ (h >> 15)
}

/// Sparse stars in the sky that shift every few ticks.
#[derive(Debug, Clone, Copy)]
pub struct SkyTwinkle {
    /// Stars per 1024 sky cells.
    pub density: u32,
}

impl Default for SkyTwinkle {
    fn default() -> Self {
        Self { density: 12 }
    }
}

const STARS: [char; 3] = ['.', '*', '+'];

impl PostProcess for SkyTwinkle {
    fn name(&self) -> &'static str {
        "sky-twinkle"
    }

    fn apply(&mut self, mut fb: FrameBuffer, ctx: &FrameContext) -> FrameBuffer {
        let phase = (ctx.tick / 3) as u32;
        let style = CellStyle::fg(Rgb::new(200, 200, 255)).on(SKY_BG);
        for y in 0..ctx.horizon.min(fb.height()) {
            for x in 0..fb.width() {
                if fb.char_at(x, y) != Some(ctx.sky_char) {
                    continue;
                }
                let h = cell_hash(x as u32, y as u32, phase);
                if h % 1024 < self.density {
                    fb.put_char(x, y, STARS[(h >> 10) as usize % STARS.len()], style);
                }
            }
        }
        fb
    }
}

pub(crate) const SKY_BG: Rgb = Rgb::new(8, 10, 28);

/// Red edge on the side the last hit came from.
#[derive(Debug, Clone, Copy)]
pub struct DamageFlash {
    pub frames: u32,
}

impl PostProcess for DamageFlash {
    fn name(&self) -> &'static str {
        "damage-flash"
    }

    fn apply(&mut self, mut fb: FrameBuffer, ctx: &FrameContext) -> FrameBuffer {
        let Some(hit) = ctx.recent_hit else {
            return fb;
        };
        if hit.age >= self.frames || fb.width() == 0 {
            return fb;
        }
        let bearing = normalize_bearing(hit.direction - ctx.player_angle);
        let red = CellStyle::fg(Rgb::new(255, 60, 60))
            .on(Rgb::new(90, 0, 0))
            .bold();
        let right = fb.width() - 1;
        let columns: &[u16] = if bearing.abs() > 2.5 {
            // From behind: both edges.
            &[0, right]
        } else if bearing < -0.3 {
            &[0]
        } else if bearing > 0.3 {
            &[right]
        } else {
            &[]
        };
        for &x in columns {
            for y in 0..fb.height() {
                fb.restyle(x, y, red);
            }
        }
        if columns.is_empty() {
            for x in 0..fb.width() {
                fb.restyle(x, 0, red);
            }
        }
        fb
    }
}
