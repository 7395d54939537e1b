//! Ray caster behavior on hand-made grids.

use std::f32::consts::{FRAC_PI_2, PI};

use glyphcast::core::{correct_fish_eye, wall_glyph, wall_height, Caster, Grid, VisitedSet};
use glyphcast::types::{Material, DEFAULT_MAX_DEPTH, VOID_GLYPH};

fn five_by_five() -> Grid {
    Grid::from_rows(&["#####", "#...#", "#...#", "#...#", "#####"]).unwrap()
}

#[test]
fn unit_step_hits_east_border_at_three() {
    let hit = Caster::new(16.0, 1.0).cast(&five_by_five(), 1.5, 1.5, 0.0);
    assert_eq!(hit.tile, '#');
    assert!((hit.distance - 3.0).abs() < 1e-4, "{}", hit.distance);
    assert_eq!((hit.x, hit.y), (4, 1));
}

#[test]
fn fine_step_finds_the_wall_face() {
    let hit = Caster::new(16.0, 0.01).cast(&five_by_five(), 1.5, 1.5, 0.0);
    assert_eq!(hit.tile, '#');
    // The wall face sits 2.5 tiles east of the tile center.
    assert!((hit.distance - 2.5).abs() < 0.02, "{}", hit.distance);
}

#[test]
fn rays_in_every_direction_stop_at_the_border() {
    let grid = five_by_five();
    let caster = Caster::new(DEFAULT_MAX_DEPTH, 0.02);
    for i in 0..32 {
        let angle = i as f32 / 32.0 * 2.0 * PI;
        let hit = caster.cast(&grid, 2.5, 2.5, angle);
        assert_eq!(hit.tile, '#', "angle {angle}");
        assert!(hit.distance <= 2.5 * std::f32::consts::SQRT_2 + 0.05);
    }
}

#[test]
fn open_edge_yields_a_void_miss_at_max_depth() {
    let grid = Grid::from_rows(&["....", "....", "...."]).unwrap();
    let hit = Caster::new(8.0, 0.05).cast(&grid, 1.5, 1.5, FRAC_PI_2);
    assert!(hit.is_miss());
    assert_eq!(hit.tile, VOID_GLYPH);
    assert_eq!(hit.distance, 8.0);
}

#[test]
fn marking_only_grows() {
    let grid = five_by_five();
    let caster = Caster::new(DEFAULT_MAX_DEPTH, 0.05);
    let mut visited = VisitedSet::new(grid.width(), grid.height());
    let mut last = 0;
    for i in 0..8 {
        caster.cast_marking(&grid, 2.5, 2.5, i as f32 * 0.8, &mut visited);
        assert!(visited.count() >= last);
        last = visited.count();
    }
    assert!(visited.contains(2, 2));
}

#[test]
fn projection_helpers_agree() {
    let d = correct_fish_eye(4.0, 0.3, 0.3);
    assert_eq!(d, 4.0);
    assert!(correct_fish_eye(4.0, 0.5, 0.0) < 4.0);

    assert_eq!(wall_height(24, 0.0), 24);
    assert_eq!(wall_height(24, 2.0), 12);
    assert!(wall_height(24, 30.0) <= 1);

    let palette = Material::Stone.palette();
    assert_eq!(wall_glyph(0.0, 16.0, palette), palette[0]);
    assert_eq!(wall_glyph(16.0, 16.0, palette), palette[palette.len() - 1]);
    assert_eq!(wall_glyph(100.0, 16.0, palette), palette[palette.len() - 1]);
}
