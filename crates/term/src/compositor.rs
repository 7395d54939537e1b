//! Compositor: maps a `Scene` into a terminal framebuffer.
//!
//! This module is pure (no I/O). Layers are drawn in a fixed order:
//!
//! | Layer     | Source                                   |
//! |-----------|------------------------------------------|
//! | sky       | `graphics.sky_char` above the horizon    |
//! | floor     | `graphics.floor_char` + hashed texture   |
//! | walls     | one ray per column, fish-eye corrected   |
//! | sprites   | far-to-near, occluded by the depth row   |
//! | post-fx   | [`PostFxStack`], in registration order   |
//! | overlays  | minimap and compass, never post-processed|

use glyphcast_core::{
    correct_fish_eye, normalize_bearing, wall_glyph, wall_height, Caster, Scene, VisitedSet,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::overlay::{draw_compass, draw_minimap};
use crate::postfx::{
    cell_hash, DamageFlash, FrameContext, PostFxStack, PostProcess, SkyTwinkle, SKY_BG,
};
use crate::types::{GraphicsConfig, Material};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const FLOOR_TEXTURE: [char; 3] = [',', '`', '\''];

/// Sprites closer than this are skipped; their bearing is unstable.
const MIN_SPRITE_DISTANCE: f32 = 0.2;

#[derive(Debug, Clone, Copy)]
struct Sprite {
    x: f32,
    y: f32,
    glyph: char,
    style: CellStyle,
    on_floor: bool,
}

/// First-person renderer with per-level fog-of-war memory.
pub struct Compositor {
    graphics: GraphicsConfig,
    caster: Caster,
    palette: Vec<char>,
    visited: VisitedSet,
    epoch: Option<u32>,
    effects: PostFxStack,
    depth: Vec<f32>,
}

impl Compositor {
    /// Build a compositor with the post-process passes enabled in `graphics`.
    pub fn new(graphics: &GraphicsConfig) -> Self {
        let mut effects = PostFxStack::new();
        if graphics.sky_twinkle {
            effects.push(Box::new(SkyTwinkle::default()));
        }
        if graphics.damage_flash {
            effects.push(Box::new(DamageFlash {
                frames: graphics.damage_flash_frames,
            }));
        }
        let mut palette: Vec<char> = graphics.wall_palette.chars().collect();
        if palette.is_empty() {
            palette = Material::Stone.palette().to_vec();
        }
        Self {
            graphics: graphics.clone(),
            caster: Caster::from_config(graphics),
            palette,
            visited: VisitedSet::new(0, 0),
            epoch: None,
            effects,
            depth: Vec::new(),
        }
    }

    pub fn push_effect(&mut self, pass: Box<dyn PostProcess>) {
        self.effects.push(pass);
    }

    pub fn effects(&self) -> &PostFxStack {
        &self.effects
    }

    /// Tiles revealed on the current level.
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn render(&mut self, scene: &Scene<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    /// Render the scene into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&mut self, scene: &Scene<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        let grid = &scene.level.grid;
        if self.epoch != Some(scene.level_epoch) {
            self.visited.reset(grid.width(), grid.height());
            self.epoch = Some(scene.level_epoch);
        }

        fb.resize(viewport.width, viewport.height);
        if viewport.width == 0 || viewport.height == 0 {
            return;
        }
        let horizon = viewport.height / 2;

        self.draw_background(fb, horizon, scene.level.seed);
        self.draw_walls(fb, scene);
        self.draw_sprites(fb, scene, horizon);

        let ctx = FrameContext {
            tick: scene.tick,
            horizon,
            sky_char: self.graphics.sky_char,
            player_angle: scene.player.angle,
            recent_hit: scene.recent_hit,
        };
        *fb = self.effects.apply(std::mem::take(fb), &ctx);
        // A pass may hand back a buffer of another size.
        fb.resize(viewport.width, viewport.height);

        if self.graphics.minimap_enabled {
            draw_minimap(
                fb,
                scene,
                &self.visited,
                self.graphics.minimap_width,
                self.graphics.minimap_height,
            );
        }
        draw_compass(fb, scene.player.angle);
    }

    fn draw_background(&self, fb: &mut FrameBuffer, horizon: u16, seed: u32) {
        let w = fb.width();
        let h = fb.height();
        let sky = CellStyle::fg(Rgb::new(120, 120, 160)).on(SKY_BG);
        fb.fill_rect(0, 0, w, horizon, self.graphics.sky_char, sky);

        let base = Rgb::new(150, 120, 80);
        let rows = h.saturating_sub(horizon).max(1) as f32;
        let threshold = (self.graphics.floor_texture_chance.clamp(0.0, 1.0) * 1024.0) as u32;
        for y in horizon..h {
            // Brighter toward the bottom of the screen.
            let k = 0.3 + 0.7 * ((y - horizon + 1) as f32 / rows);
            let style = CellStyle::fg(base.scaled(k));
            for x in 0..w {
                let hash = cell_hash(x as u32, y as u32, seed);
                let ch = if hash % 1024 < threshold {
                    FLOOR_TEXTURE[(hash >> 10) as usize % FLOOR_TEXTURE.len()]
                } else {
                    self.graphics.floor_char
                };
                fb.put_char(x, y, ch, style);
            }
        }
    }

    fn draw_walls(&mut self, fb: &mut FrameBuffer, scene: &Scene<'_>) {
        let w = fb.width() as usize;
        let h = fb.height() as usize;
        let player = scene.player;
        let fov = self.graphics.fov;
        let max_depth = self.caster.max_depth();

        self.depth.clear();
        self.depth.resize(w, max_depth);

        for col in 0..w {
            let ray_angle = player.angle - fov / 2.0 + (col as f32 + 0.5) / w as f32 * fov;
            let hit = self.caster.cast_marking(
                &scene.level.grid,
                player.x,
                player.y,
                ray_angle,
                &mut self.visited,
            );
            if hit.is_miss() {
                continue;
            }
            let dist = correct_fish_eye(hit.distance, ray_angle, player.angle).max(0.0);
            self.depth[col] = dist;

            let material = Material::from_glyph(hit.tile);
            let palette: &[char] = if self.graphics.materials_enabled {
                material.palette()
            } else {
                &self.palette
            };
            let glyph = wall_glyph(dist, max_depth, palette);
            let shade = 1.0 - 0.7 * (dist / max_depth).clamp(0.0, 1.0);
            let style = CellStyle::fg(material_color(material).scaled(shade));

            let height = wall_height(h, dist);
            let top = (h - height) / 2;
            for row in top..top + height {
                fb.put_char(col as u16, row as u16, glyph, style);
            }
        }
    }

    fn draw_sprites(&self, fb: &mut FrameBuffer, scene: &Scene<'_>, horizon: u16) {
        let w = fb.width();
        let h = fb.height() as usize;
        let player = scene.player;
        let fov = self.graphics.fov;

        let mut sprites = collect_sprites(scene);
        let dist = |s: &Sprite| ((s.x - player.x).powi(2) + (s.y - player.y).powi(2)).sqrt();
        sprites.sort_by(|a, b| dist(b).total_cmp(&dist(a)));

        for sprite in &sprites {
            let d = dist(sprite);
            if d < MIN_SPRITE_DISTANCE || d > self.caster.max_depth() {
                continue;
            }
            let bearing =
                normalize_bearing((sprite.y - player.y).atan2(sprite.x - player.x) - player.angle);
            if bearing.abs() >= fov / 2.0 {
                continue;
            }
            let col = (((bearing + fov / 2.0) / fov) * w as f32) as u16;
            let col = col.min(w - 1);
            let forward = d * bearing.cos();
            if forward >= self.depth[col as usize] {
                continue;
            }
            let row = if sprite.on_floor {
                let offset = (wall_height(h, forward) / 2) as u16;
                (horizon + offset).min(fb.height() - 1)
            } else {
                horizon.min(fb.height() - 1)
            };
            fb.put_char(col, row, sprite.glyph, sprite.style);
        }
    }
}

fn collect_sprites(scene: &Scene<'_>) -> Vec<Sprite> {
    let mut out = Vec::new();
    let pickup = CellStyle::fg(Rgb::new(90, 230, 120)).bold();
    for p in scene.level.pickups.iter().filter(|p| !p.taken) {
        out.push(Sprite {
            x: p.x,
            y: p.y,
            glyph: p.kind.glyph(),
            style: pickup,
            on_floor: true,
        });
    }
    let enemy = CellStyle::fg(Rgb::new(240, 70, 70)).bold();
    let bolt = CellStyle::fg(Rgb::new(255, 160, 40));
    for e in &scene.level.enemies {
        if e.alive {
            out.push(Sprite {
                x: e.x,
                y: e.y,
                glyph: e.glyph(),
                style: enemy,
                on_floor: false,
            });
        }
        for p in e.projectiles.iter().filter(|p| p.alive) {
            out.push(Sprite {
                x: p.x,
                y: p.y,
                glyph: '*',
                style: bolt,
                on_floor: false,
            });
        }
    }
    let rocket = CellStyle::fg(Rgb::new(255, 230, 80)).bold();
    for p in scene.projectiles.iter().filter(|p| p.alive) {
        out.push(Sprite {
            x: p.x,
            y: p.y,
            glyph: 'o',
            style: rocket,
            on_floor: false,
        });
    }
    out
}

fn material_color(material: Material) -> Rgb {
    match material {
        Material::Stone => Rgb::new(200, 200, 200),
        Material::Brick => Rgb::new(200, 110, 80),
        Material::Crystal => Rgb::new(120, 200, 255),
        Material::Metal => Rgb::new(170, 180, 200),
        Material::Door => Rgb::new(230, 190, 60),
    }
}
