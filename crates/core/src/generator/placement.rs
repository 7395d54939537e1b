//! Door and exit placement over finished terrain

use crate::grid::{traversable, Grid, TileClass};
use crate::mission::{Door, Exit};
use crate::rng::SimpleRng;

/// Wall tiles with floor on both opposite sides (left/right or up/down).
pub fn door_candidates(grid: &Grid) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for y in 1..grid.height().saturating_sub(1) {
        for x in 1..grid.width().saturating_sub(1) {
            let (xi, yi) = (x as i32, y as i32);
            if !matches!(crate::grid::classify(grid.tile_at(xi, yi)), TileClass::Wall(_)) {
                continue;
            }
            let horizontal = grid.is_floor(xi - 1, yi) && grid.is_floor(xi + 1, yi);
            let vertical = grid.is_floor(xi, yi - 1) && grid.is_floor(xi, yi + 1);
            if horizontal || vertical {
                out.push((x, y));
            }
        }
    }
    out
}

/// Turn up to `count` shuffled candidates into locked doors.
///
/// Doors only ever replace walls, so they add passages and never cut one.
pub fn place_doors(grid: &mut Grid, count: usize, rng: &mut SimpleRng) -> Vec<Door> {
    let mut candidates = door_candidates(grid);
    rng.shuffle(&mut candidates);

    let mut doors = Vec::new();
    for (x, y) in candidates {
        if doors.len() >= count {
            break;
        }
        // Keep doors apart so two never form one wide gate.
        if doors
            .iter()
            .any(|d: &Door| d.x.abs_diff(x) + d.y.abs_diff(y) <= 1)
        {
            continue;
        }
        let door = Door::new(x, y, true);
        grid.set(x as i32, y as i32, door.glyph());
        doors.push(door);
    }
    doors
}

/// Put up to `count` inactive exits on the floor tiles farthest from spawn.
///
/// Distance is the walking distance (doors count as passable). Ties break
/// row-major so placement is stable for a given grid.
pub fn place_exits(grid: &mut Grid, spawn: (usize, usize), count: usize) -> Vec<Exit> {
    let width = grid.width();
    let dist = grid.distances_from(spawn, traversable);

    let mut candidates: Vec<(u32, usize, usize)> = grid
        .walkable_cells()
        .into_iter()
        .filter_map(|(x, y)| match dist[y * width + x] {
            Some(d) if d > 0 => Some((d, x, y)),
            _ => None,
        })
        .collect();
    candidates.sort_by(|a, b| b.0.cmp(&a.0).then(a.2.cmp(&b.2)).then(a.1.cmp(&b.1)));

    let mut exits = Vec::new();
    for (_, x, y) in candidates.into_iter().take(count) {
        let exit = Exit::new(x, y);
        grid.set(x as i32, y as i32, exit.glyph());
        exits.push(exit);
    }
    exits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DOOR_LOCKED_GLYPH, EXIT_INACTIVE_GLYPH};

    fn two_rooms() -> Grid {
        Grid::from_rows(&[
            "#########",
            "#...#...#",
            "#...#...#",
            "#.......#",
            "#########",
        ])
        .unwrap()
    }

    #[test]
    fn test_door_candidates_separate_floor() {
        let g = two_rooms();
        let c = door_candidates(&g);
        assert_eq!(c, vec![(4, 1), (4, 2)]);
    }

    #[test]
    fn test_place_doors_locks_and_marks_grid() {
        let mut g = two_rooms();
        let doors = place_doors(&mut g, 5, &mut SimpleRng::new(4));
        // Adjacent candidates: only one survives the spacing rule.
        assert_eq!(doors.len(), 1);
        let d = doors[0];
        assert!(d.locked && !d.opened);
        assert_eq!(g.tile_at(d.x as i32, d.y as i32), DOOR_LOCKED_GLYPH);
    }

    #[test]
    fn test_exit_is_farthest_tile() {
        let mut g = two_rooms();
        let exits = place_exits(&mut g, (1, 1), 1);
        assert_eq!(exits.len(), 1);
        assert_eq!((exits[0].x, exits[0].y), (7, 1));
        assert!(!exits[0].active);
        assert_eq!(g.tile_at(7, 1), EXIT_INACTIVE_GLYPH);
    }

    #[test]
    fn test_no_space_no_exits() {
        let mut g = Grid::from_rows(&["###", "#.#", "###"]).unwrap();
        assert!(place_exits(&mut g, (1, 1), 2).is_empty());
        assert!(place_doors(&mut g, 2, &mut SimpleRng::new(1)).is_empty());
    }
}
