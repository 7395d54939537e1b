//! Cellular-automaton caves
//!
//! Noise is smoothed by a majority rule over each 3×3 neighborhood (the cell
//! included, out-of-bounds counted as wall). The wall threshold tightens over
//! the passes so early passes grow walls and late passes open the space up.
//! The automaton alone does not guarantee one connected cave; see
//! [`repair_connectivity`].

use log::debug;

use crate::grid::{classify, Grid};
use crate::rng::SimpleRng;

use super::rooms::{carve_l_corridor, manhattan};

const PASS_THRESHOLDS: [usize; 4] = [5, 5, 6, 6];

fn threshold(pass: usize) -> usize {
    PASS_THRESHOLDS[pass.min(PASS_THRESHOLDS.len() - 1)]
}

/// Build a smoothed noise grid. The border is always `wall`.
pub fn cellular_automaton(
    width: usize,
    height: usize,
    wall: char,
    floor: char,
    fill: f32,
    passes: usize,
    rng: &mut SimpleRng,
) -> Grid {
    let mut solid = vec![true; width * height];
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            solid[y * width + x] = rng.chance(fill);
        }
    }

    for pass in 0..passes {
        let limit = threshold(pass);
        let mut next = solid.clone();
        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                let mut walls = 0;
                for ny in y - 1..=y + 1 {
                    for nx in x - 1..=x + 1 {
                        if solid[ny * width + nx] {
                            walls += 1;
                        }
                    }
                }
                next[y * width + x] = walls >= limit;
            }
        }
        solid = next;
    }

    let mut grid = Grid::new(width, height, wall);
    for y in 0..height {
        for x in 0..width {
            if !solid[y * width + x] {
                grid.set(x as i32, y as i32, floor);
            }
        }
    }
    grid
}

/// Clear a square of floor around `center`, staying off the border.
pub fn carve_clearing(grid: &mut Grid, center: (usize, usize), radius: usize, floor: char) {
    let (cx, cy) = center;
    for y in cy.saturating_sub(radius)..=cy + radius {
        for x in cx.saturating_sub(radius)..=cx + radius {
            if grid.in_bounds(x as i32, y as i32) && !grid.is_border(x, y) {
                grid.set(x as i32, y as i32, floor);
            }
        }
    }
}

/// Join every walkable region to the region containing `spawn`.
///
/// Each stray region gets an L corridor from its first tile (row-major) to
/// the nearest tile already reachable from spawn. Returns the number of
/// regions joined.
pub fn repair_connectivity(grid: &mut Grid, spawn: (usize, usize), floor: char) -> usize {
    let passable = |c: char| classify(c).is_passable();
    let width = grid.width();
    let mut repaired = 0;
    if !grid.in_bounds(spawn.0 as i32, spawn.1 as i32) || grid.is_border(spawn.0, spawn.1) {
        return repaired;
    }

    loop {
        let reach = grid.flood_fill(spawn, passable);
        let stray = (0..grid.height())
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .find(|&(x, y)| !reach[y * width + x] && grid.is_walkable(x as i32, y as i32));
        let Some(stray) = stray else {
            break;
        };

        let target = reach
            .iter()
            .enumerate()
            .filter(|(_, &r)| r)
            .map(|(i, _)| (i % width, i / width))
            .min_by_key(|&t| manhattan(t, stray))
            .unwrap_or(spawn);

        carve_l_corridor(grid, stray, target, floor);
        repaired += 1;
    }

    if repaired > 0 {
        debug!("joined {} stray cave regions to spawn", repaired);
    }
    repaired
}
