//! HUD strip and full-screen map view.

use glyphcast_core::{normalize_bearing, GameState};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::overlay::heading_label;

/// Rows reserved at the bottom of the screen by [`draw_hud`].
pub const HUD_ROWS: u16 = 2;

/// Arrow pointing at where a hit came from, relative to the facing.
pub fn damage_arrow(bearing: f32) -> char {
    let b = normalize_bearing(bearing);
    if b.abs() <= std::f32::consts::FRAC_PI_4 {
        '↑'
    } else if b.abs() >= 3.0 * std::f32::consts::FRAC_PI_4 {
        '↓'
    } else if b > 0.0 {
        '→'
    } else {
        '←'
    }
}

/// First status line: vitals, weapon, level and heading.
pub fn status_line(state: &GameState) -> String {
    let p = state.player();
    let mut line = format!(
        "HP {:>3}  AMMO {:>3}  KEYS {}  {:<7}  SCORE {:>6}  LVL {}  {}",
        p.health,
        p.ammo,
        p.keycards,
        p.weapon.as_str().to_uppercase(),
        p.score,
        state.level().index,
        heading_label(p.angle),
    );
    if let Some(hit) = state.recent_hit() {
        line.push_str("  HIT ");
        line.push(damage_arrow(hit.direction - p.angle));
    }
    line
}

/// Second status line: the newest notification, else objective progress.
pub fn objective_line(state: &GameState) -> String {
    if let Some(n) = state.notifications().last() {
        return n.text.clone();
    }
    let objectives = &state.level().objectives;
    if objectives.is_empty() {
        return "No objectives: find the exit".to_string();
    }
    objectives
        .iter()
        .map(|o| {
            let mark = if o.completed { '✓' } else { '·' };
            format!("{mark} {}", o.progress_text())
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Draw the HUD over the bottom rows, plus a banner when paused or dead.
pub fn draw_hud(fb: &mut FrameBuffer, state: &GameState) {
    let (w, h) = (fb.width(), fb.height());
    if h < HUD_ROWS {
        return;
    }
    let bar = CellStyle::fg(Rgb::new(230, 230, 230)).on(Rgb::new(25, 25, 35));
    let low = state.player().health <= 25;
    let status_style = if low {
        CellStyle::fg(Rgb::new(255, 90, 90)).on(Rgb::new(25, 25, 35)).bold()
    } else {
        bar
    };

    let top = h - HUD_ROWS;
    fb.fill_rect(0, top, w, HUD_ROWS, ' ', bar);
    fb.put_str(1, top, &status_line(state), status_style);
    fb.put_str(1, top + 1, &objective_line(state), bar);

    let banner = if state.game_over() {
        Some("GAME OVER - press r to restart")
    } else if state.paused() {
        Some("PAUSED")
    } else {
        None
    };
    if let Some(text) = banner {
        let len = text.chars().count() as u16;
        let x = w.saturating_sub(len) / 2;
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).on(Rgb::new(120, 0, 0)).bold();
        fb.put_str(x, top / 2, text, style);
    }
}

/// Draw the whole level grid with the player marker, centered.
///
/// Levels larger than the screen are clipped around the player.
pub fn draw_map_view(fb: &mut FrameBuffer, state: &GameState) {
    let (w, h) = (fb.width(), fb.height());
    let bg = CellStyle::fg(Rgb::new(170, 170, 170));
    fb.clear(bg.cell(' '));

    let level = state.level();
    let grid = &level.grid;
    let p = state.player();
    let (px, py) = (p.x.floor() as i32, p.y.floor() as i32);

    let span = |screen: u16, size: usize, focus: i32| -> i32 {
        if size as i32 <= screen as i32 {
            -((screen as i32 - size as i32) / 2)
        } else {
            (focus - screen as i32 / 2).clamp(0, size as i32 - screen as i32)
        }
    };
    let left = span(w, grid.width(), px);
    let top = span(h, grid.height(), py);

    let door = CellStyle::fg(Rgb::new(230, 190, 60));
    let exit = CellStyle::fg(Rgb::new(90, 230, 120)).bold();
    for sy in 0..h {
        for sx in 0..w {
            let (tx, ty) = (left + sx as i32, top + sy as i32);
            let Some(ch) = grid.get(tx, ty) else {
                continue;
            };
            let style = if level.door_at(tx, ty).is_some() {
                door
            } else if level.exit_at(tx, ty).is_some() {
                exit
            } else {
                bg
            };
            fb.put_char(sx, sy, ch, style);
        }
    }
    if (0..w as i32).contains(&(px - left)) && (0..h as i32).contains(&(py - top)) {
        let me = CellStyle::fg(Rgb::new(255, 255, 80)).bold();
        fb.put_char((px - left) as u16, (py - top) as u16, '@', me);
    }
}
