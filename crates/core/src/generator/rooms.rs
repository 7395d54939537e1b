//! Room-and-corridor terrain
//!
//! Rooms are rejection-sampled inside the wall border; a candidate is dropped
//! when its 1-tile-grown box touches an accepted room, so every pair of rooms
//! keeps at least one wall between them. Connection is greedy: repeatedly join
//! the unconnected room nearest to any connected one with an L-shaped corridor.

use log::debug;

use crate::grid::Grid;
use crate::level::Room;
use crate::rng::SimpleRng;
use crate::types::{GeneratorConfig, RoomKind, Theme};

const SPAWN_ORIGIN: (usize, usize) = (1, 1);
const ROOM_WIDTH: (i32, i32) = (4, 8);
const ROOM_HEIGHT: (i32, i32) = (3, 6);

/// Place the spawn room plus up to `room_count` random rooms and carve them.
///
/// The spawn room is always first in the returned list. Fewer rooms than
/// requested is a normal outcome when the attempt budget runs out.
pub fn place_rooms(
    grid: &mut Grid,
    theme: Theme,
    cfg: &GeneratorConfig,
    rng: &mut SimpleRng,
) -> Vec<Room> {
    let (w, h) = (grid.width(), grid.height());
    let mut rooms = Vec::with_capacity(cfg.room_count + 1);

    let spawn_w = (rng.range_inclusive(4, 6) as usize).min(w.saturating_sub(2));
    let spawn_h = (rng.range_inclusive(3, 4) as usize).min(h.saturating_sub(2));
    if spawn_w == 0 || spawn_h == 0 {
        return rooms;
    }
    let spawn = Room::new(SPAWN_ORIGIN.0, SPAWN_ORIGIN.1, spawn_w, spawn_h, RoomKind::Spawn);
    carve_room(grid, &spawn, theme, rng);
    rooms.push(spawn);

    let attempts = cfg.room_count * cfg.attempts_per_room.max(1);
    let mut placed = 0;
    for _ in 0..attempts {
        if placed >= cfg.room_count {
            break;
        }
        let rw = rng.range_inclusive(ROOM_WIDTH.0, ROOM_WIDTH.1);
        let rh = rng.range_inclusive(ROOM_HEIGHT.0, ROOM_HEIGHT.1);
        // Interior must stay inside the border: 1 <= x and x + rw <= w - 1.
        let max_x = w as i32 - 1 - rw;
        let max_y = h as i32 - 1 - rh;
        if max_x < 1 || max_y < 1 {
            continue;
        }
        let x = rng.range_inclusive(1, max_x) as usize;
        let y = rng.range_inclusive(1, max_y) as usize;
        let kind = rng
            .pick_weighted(&RoomKind::POOL)
            .unwrap_or(RoomKind::Generic);
        let candidate = Room::new(x, y, rw as usize, rh as usize, kind);

        if rooms.iter().any(|r| candidate.overlaps(r, 1)) {
            continue;
        }
        carve_room(grid, &candidate, theme, rng);
        rooms.push(candidate);
        placed += 1;
    }

    debug!(
        "placed {}/{} rooms in {} attempts",
        placed, cfg.room_count, attempts
    );
    rooms
}

/// Fill a room interior with its floor glyph and maybe stamp its marker.
pub fn carve_room(grid: &mut Grid, room: &Room, theme: Theme, rng: &mut SimpleRng) {
    let floor = room.kind.floor_glyph(theme.floor());
    for (x, y) in room.cells() {
        grid.set(x as i32, y as i32, floor);
    }
    if let Some(special) = room.kind.special_glyph() {
        if rng.chance(room.kind.special_chance()) {
            let (cx, cy) = room.center();
            grid.set(cx as i32, cy as i32, special);
        }
    }
}

/// Join every room to the spawn room's network. Returns the joined pairs.
pub fn connect_rooms(grid: &mut Grid, rooms: &[Room], floor: char) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    if rooms.is_empty() {
        return edges;
    }
    let mut connected = vec![false; rooms.len()];
    connected[0] = true;

    for _ in 1..rooms.len() {
        let mut best: Option<(usize, usize, usize)> = None;
        for (i, a) in rooms.iter().enumerate().filter(|(i, _)| connected[*i]) {
            for (j, b) in rooms.iter().enumerate().filter(|(j, _)| !connected[*j]) {
                let d = manhattan(a.center(), b.center());
                if best.map(|(_, _, bd)| d < bd).unwrap_or(true) {
                    best = Some((i, j, d));
                }
            }
        }
        let Some((i, j, _)) = best else {
            break;
        };
        carve_l_corridor(grid, rooms[i].center(), rooms[j].center(), floor);
        connected[j] = true;
        edges.push((i, j));
    }
    edges
}

/// Carve a horizontal run from `from`, then a vertical run to `to`.
///
/// Only blocking tiles are overwritten, so markers along the way survive.
/// Border tiles are never carved.
pub fn carve_l_corridor(grid: &mut Grid, from: (usize, usize), to: (usize, usize), floor: char) {
    let (x0, y0) = from;
    let (x1, y1) = to;
    for x in x0.min(x1)..=x0.max(x1) {
        carve_tile(grid, x, y0, floor);
    }
    for y in y0.min(y1)..=y0.max(y1) {
        carve_tile(grid, x1, y, floor);
    }
}

fn carve_tile(grid: &mut Grid, x: usize, y: usize, floor: char) {
    if grid.is_border(x, y) {
        return;
    }
    if !grid.is_walkable(x as i32, y as i32) {
        grid.set(x as i32, y as i32, floor);
    }
}

pub(crate) fn manhattan(a: (usize, usize), b: (usize, usize)) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::is_walkable_glyph;

    fn blank(w: usize, h: usize) -> Grid {
        Grid::new(w, h, '#')
    }

    #[test]
    fn test_spawn_room_first_and_near_origin() {
        let mut g = blank(40, 24);
        let rooms = place_rooms(
            &mut g,
            Theme::Quantum,
            &GeneratorConfig::default(),
            &mut SimpleRng::new(3),
        );
        assert_eq!(rooms[0].kind, RoomKind::Spawn);
        assert_eq!((rooms[0].x, rooms[0].y), (1, 1));
    }

    #[test]
    fn test_rooms_never_touch() {
        for seed in 1..30 {
            let mut g = blank(48, 30);
            let rooms = place_rooms(
                &mut g,
                Theme::Atman,
                &GeneratorConfig::default(),
                &mut SimpleRng::new(seed),
            );
            for (i, a) in rooms.iter().enumerate() {
                assert!(a.x >= 1 && a.x + a.width <= g.width() - 1);
                assert!(a.y >= 1 && a.y + a.height <= g.height() - 1);
                for b in rooms.iter().skip(i + 1) {
                    assert!(!a.overlaps(b, 1), "seed {}: {:?} vs {:?}", seed, a, b);
                }
            }
        }
    }

    #[test]
    fn test_tiny_grid_places_fewer_rooms() {
        let mut g = blank(9, 7);
        let cfg = GeneratorConfig {
            room_count: 10,
            ..GeneratorConfig::default()
        };
        let rooms = place_rooms(&mut g, Theme::Quantum, &cfg, &mut SimpleRng::new(1));
        assert!(rooms.len() < 11);
        assert!(g.border_is_solid());
    }

    #[test]
    fn test_connect_reaches_every_room() {
        for seed in 1..30 {
            let mut g = blank(48, 30);
            let rooms = place_rooms(
                &mut g,
                Theme::Quantum,
                &GeneratorConfig::default(),
                &mut SimpleRng::new(seed),
            );
            let edges = connect_rooms(&mut g, &rooms, '.');
            assert_eq!(edges.len(), rooms.len() - 1);

            let (sx, sy) = rooms[0].center();
            let reach = g.flood_fill((sx, sy), |c| {
                crate::grid::classify(c).is_passable()
            });
            for room in &rooms {
                for (x, y) in room.cells() {
                    assert!(reach[y * g.width() + x], "seed {}: ({}, {})", seed, x, y);
                }
            }
        }
    }

    #[test]
    fn test_l_corridor_shape() {
        let mut g = blank(10, 8);
        carve_l_corridor(&mut g, (2, 2), (6, 5), '.');
        assert!(is_walkable_glyph(g.tile_at(4, 2)));
        assert!(is_walkable_glyph(g.tile_at(6, 2)));
        assert!(is_walkable_glyph(g.tile_at(6, 4)));
        assert!(!is_walkable_glyph(g.tile_at(2, 4)));
    }
}
