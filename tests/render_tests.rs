//! Composed frames for generated levels.

use glyphcast::core::GameState;
use glyphcast::term::{draw_hud, draw_map_view, Compositor, FrameBuffer, Viewport, HUD_ROWS};
use glyphcast::types::{GameAction, GraphicsConfig};

fn frame(game: &GameState, compositor: &mut Compositor, vp: Viewport) -> FrameBuffer {
    let mut fb = FrameBuffer::default();
    compositor.render_into(&game.scene(), vp, &mut fb);
    draw_hud(&mut fb, game);
    fb
}

#[test]
fn frames_fill_the_viewport() {
    let game = GameState::new(9);
    let mut compositor = Compositor::new(&GraphicsConfig::default());
    for (w, h) in [(80, 24), (40, 12), (120, 40), (3, 3)] {
        let fb = frame(&game, &mut compositor, Viewport::new(w, h));
        let lines = fb.to_lines();
        assert_eq!(lines.len(), h as usize);
        assert!(lines.iter().all(|l| l.chars().count() == w as usize));
    }
}

#[test]
fn identical_state_renders_identically() {
    let game = GameState::new(77);
    let vp = Viewport::new(64, 20);
    let a = frame(&game, &mut Compositor::new(&GraphicsConfig::default()), vp);
    let b = frame(&game, &mut Compositor::new(&GraphicsConfig::default()), vp);
    assert_eq!(a, b);
}

#[test]
fn hud_occupies_the_bottom_rows() {
    let game = GameState::new(3);
    let mut compositor = Compositor::new(&GraphicsConfig::default());
    let fb = frame(&game, &mut compositor, Viewport::new(100, 30));
    assert!(fb.row_text(30 - HUD_ROWS).contains("HP 100"));
    // The level banner is the newest notification on a fresh game.
    assert!(fb.row_text(29).contains("Level 1"));
}

#[test]
fn turning_reveals_more_of_the_level() {
    let mut game = GameState::new(5);
    let mut compositor = Compositor::new(&GraphicsConfig::default());
    let vp = Viewport::new(60, 20);
    frame(&game, &mut compositor, vp);
    let before = compositor.visited().count();
    assert!(before > 0);

    for _ in 0..8 {
        game.apply_action(GameAction::TurnRight);
        frame(&game, &mut compositor, vp);
    }
    assert!(compositor.visited().count() > before);
}

#[test]
fn map_view_shows_the_grid_and_player() {
    let game = GameState::new(21);
    let grid = &game.level().grid;
    let mut fb = FrameBuffer::new(grid.width() as u16 + 4, grid.height() as u16 + 2);
    draw_map_view(&mut fb, &game);
    let text = fb.to_lines().join("\n");
    assert_eq!(text.matches('@').count(), 1);
    // The top wall row appears verbatim.
    assert!(text.contains(&grid.row(0)));
}
