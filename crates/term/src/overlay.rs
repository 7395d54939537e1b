//! Protected overlays: minimap and compass.
//!
//! These are stamped after post-processing so effects never distort them.

use std::f32::consts::FRAC_PI_4;

use glyphcast_core::{normalize_angle, Scene, VisitedSet};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

const HEADINGS: [&str; 8] = ["E", "SE", "S", "SW", "W", "NW", "N", "NE"];

/// Compass label for a facing. 0 is east and angles grow clockwise on
/// screen, so π/2 is south.
pub fn heading_label(angle: f32) -> &'static str {
    let sector = (normalize_angle(angle) / FRAC_PI_4).round() as usize % HEADINGS.len();
    HEADINGS[sector]
}

/// Draw the compass centered on the top row.
pub fn draw_compass(fb: &mut FrameBuffer, angle: f32) {
    let text = format!("[{}]", heading_label(angle));
    let len = text.chars().count() as u16;
    if fb.width() < len || fb.height() == 0 {
        return;
    }
    let x = (fb.width() - len) / 2;
    let style = CellStyle::fg(Rgb::new(255, 255, 255)).on(Rgb::new(30, 30, 50)).bold();
    fb.put_str(x, 0, &text, style);
}

/// Draw a player-centered window of revealed tiles in the top-right corner.
///
/// Tiles no ray has touched yet stay blank. Live enemies standing on revealed
/// tiles show as `e`.
pub fn draw_minimap(
    fb: &mut FrameBuffer,
    scene: &Scene<'_>,
    visited: &VisitedSet,
    width: u16,
    height: u16,
) {
    let w = width.min(fb.width());
    let h = height.min(fb.height());
    if w == 0 || h == 0 {
        return;
    }
    let origin_x = fb.width() - w;
    let grid = &scene.level.grid;
    let (px, py) = (scene.player.x.floor() as i32, scene.player.y.floor() as i32);
    let left = px - (w / 2) as i32;
    let top = py - (h / 2) as i32;

    let unknown = CellStyle::fg(Rgb::new(40, 40, 40)).on(Rgb::new(10, 10, 10));
    let known = CellStyle::fg(Rgb::new(160, 160, 160)).on(Rgb::new(10, 10, 10));
    let me = CellStyle::fg(Rgb::new(255, 255, 80)).on(Rgb::new(10, 10, 10)).bold();
    let foe = CellStyle::fg(Rgb::new(240, 70, 70)).on(Rgb::new(10, 10, 10));

    for my in 0..h {
        for mx in 0..w {
            let (tx, ty) = (left + mx as i32, top + my as i32);
            let (x, y) = (origin_x + mx, my);
            if (tx, ty) == (px, py) {
                fb.put_char(x, y, '@', me);
                continue;
            }
            if !visited.contains(tx, ty) {
                fb.put_char(x, y, ' ', unknown);
                continue;
            }
            let enemy_here = scene.level.enemies.iter().any(|e| {
                e.alive && e.x.floor() as i32 == tx && e.y.floor() as i32 == ty
            });
            if enemy_here {
                fb.put_char(x, y, 'e', foe);
            } else {
                fb.put_char(x, y, grid.get(tx, ty).unwrap_or(' '), known);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphcast_core::{Grid, Level, Player};
    use glyphcast_types::PlayerConfig;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn headings_follow_screen_axes() {
        assert_eq!(heading_label(0.0), "E");
        assert_eq!(heading_label(FRAC_PI_2), "S");
        assert_eq!(heading_label(PI), "W");
        assert_eq!(heading_label(3.0 * FRAC_PI_2), "N");
        assert_eq!(heading_label(-FRAC_PI_2), "N");
        assert_eq!(heading_label(0.1), "E");
    }

    #[test]
    fn compass_is_centered() {
        let mut fb = FrameBuffer::new(11, 2);
        draw_compass(&mut fb, PI);
        assert_eq!(fb.row_text(0), "    [W]    ");
    }

    #[test]
    fn minimap_shows_only_visited_tiles() {
        let grid = Grid::from_rows(&["#####", "#...#", "#####"]).unwrap();
        let level = Level::from_grid(grid, (1.5, 1.5));
        let player = Player::new(2.5, 1.5, 0.0, &PlayerConfig::default());
        let mut visited = VisitedSet::new(5, 3);
        visited.mark(3, 1);
        visited.mark(4, 1);

        let mut fb = FrameBuffer::new(5, 3);
        draw_minimap(&mut fb, &Scene::new(&level, &player), &visited, 5, 3);
        assert_eq!(fb.row_text(0), "     ");
        assert_eq!(fb.row_text(1), "  @.#");
    }
}
