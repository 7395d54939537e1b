//! Grid module - the level's tile grid
//!
//! The grid is a rectangle of single glyphs stored row-major in a flat `Vec`.
//! The same glyphs are used for collision, rendering and the textual map
//! view, so `to_text`/`from_text` are lossless.
//!
//! Coordinates: (x, y) where x grows east (columns) and y grows south (rows).
//! Every accessor takes signed coordinates and bounds-checks before indexing;
//! out-of-range reads yield [`VOID_GLYPH`] or `None`, never a panic.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use thiserror::Error;

pub use crate::types::is_walkable_glyph;
use crate::types::{
    is_door_glyph, is_exit_glyph, is_special_glyph, Material, DOOR_LOCKED_GLYPH,
    EXIT_ACTIVE_GLYPH, VOID_GLYPH,
};

/// Errors produced when parsing a grid from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid text has no rows")]
    Empty,
    #[error("row {row} has {found} glyphs, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Classification of a single glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileClass {
    Floor,
    Wall(Material),
    Door { locked: bool },
    Exit { active: bool },
    Special,
    Void,
}

impl TileClass {
    /// Whether actors may stand on this tile.
    pub fn is_passable(&self) -> bool {
        matches!(
            self,
            TileClass::Floor | TileClass::Exit { .. } | TileClass::Special
        )
    }
}

/// Classify a glyph.
pub fn classify(ch: char) -> TileClass {
    if ch == VOID_GLYPH {
        TileClass::Void
    } else if is_walkable_glyph(ch) {
        TileClass::Floor
    } else if is_door_glyph(ch) {
        TileClass::Door {
            locked: ch == DOOR_LOCKED_GLYPH,
        }
    } else if is_exit_glyph(ch) {
        TileClass::Exit {
            active: ch == EXIT_ACTIVE_GLYPH,
        }
    } else if is_special_glyph(ch) {
        TileClass::Special
    } else {
        TileClass::Wall(Material::from_glyph(ch))
    }
}

/// Rectangular glyph grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major glyphs (y * width + x)
    cells: Vec<char>,
}

impl Grid {
    /// Create a grid filled with one glyph.
    pub fn new(width: usize, height: usize, fill: char) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Create a floor-filled grid with a blocking border.
    pub fn bordered(width: usize, height: usize, wall: char, floor: char) -> Self {
        let mut grid = Self::new(width, height, floor);
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    grid.cells[y * width + x] = wall;
                }
            }
        }
        grid
    }

    /// Parse equal-length rows of glyphs.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let first = rows.first().ok_or(GridError::Empty)?;
        let width = first.as_ref().chars().count();
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let before = cells.len();
            cells.extend(line.as_ref().chars());
            let found = cells.len() - before;
            if found != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
        }
        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Parse the newline-separated text form.
    pub fn from_text(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text.lines().collect();
        Self::from_rows(&rows)
    }

    /// Serialize to the newline-separated text form (no trailing newline).
    pub fn to_text(&self) -> String {
        self.rows().join("\n")
    }

    pub fn rows(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row(y)).collect()
    }

    pub fn row(&self, y: usize) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y * self.width;
        self.cells[start..start + self.width].iter().collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Glyph at (x, y), or None if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Glyph at (x, y), or the void sentinel if out of bounds.
    pub fn tile_at(&self, x: i32, y: i32) -> char {
        self.get(x, y).unwrap_or(VOID_GLYPH)
    }

    /// Set glyph at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, ch: char) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = ch;
                true
            }
            None => false,
        }
    }

    /// Whether actors may occupy the tile. Out of bounds is never walkable.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        classify(self.tile_at(x, y)).is_passable()
    }

    /// Whether the tile holds a floor-class glyph.
    pub fn is_floor(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map(is_walkable_glyph).unwrap_or(false)
    }

    /// Walkability at a continuous position (floored to a tile).
    pub fn is_walkable_at(&self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        self.is_walkable(x.floor() as i32, y.floor() as i32)
    }

    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// All floor-class tiles in row-major order. Markers (exits, specials) are excluded.
    pub fn walkable_cells(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if is_walkable_glyph(self.cells[y * self.width + x]) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    /// In-bounds 4-neighbours of a tile.
    pub fn neighbors4(&self, x: usize, y: usize) -> ArrayVec<(usize, usize), 4> {
        let mut out = ArrayVec::new();
        if x > 0 {
            out.push((x - 1, y));
        }
        if y > 0 {
            out.push((x, y - 1));
        }
        if x + 1 < self.width {
            out.push((x + 1, y));
        }
        if y + 1 < self.height {
            out.push((x, y + 1));
        }
        out
    }

    /// Breadth-first distances from `start` over tiles accepted by `passable`.
    ///
    /// The start tile is always included. Unreached tiles are `None`.
    pub fn distances_from(
        &self,
        start: (usize, usize),
        passable: impl Fn(char) -> bool,
    ) -> Vec<Option<u32>> {
        let mut dist = vec![None; self.cells.len()];
        if start.0 >= self.width || start.1 >= self.height {
            return dist;
        }
        let mut queue = VecDeque::new();
        dist[start.1 * self.width + start.0] = Some(0);
        queue.push_back(start);

        while let Some((x, y)) = queue.pop_front() {
            let d = dist[y * self.width + x].unwrap_or(0);
            for (nx, ny) in self.neighbors4(x, y) {
                let i = ny * self.width + nx;
                if dist[i].is_none() && passable(self.cells[i]) {
                    dist[i] = Some(d + 1);
                    queue.push_back((nx, ny));
                }
            }
        }
        dist
    }

    /// Reachability mask from `start` over tiles accepted by `passable`.
    pub fn flood_fill(&self, start: (usize, usize), passable: impl Fn(char) -> bool) -> Vec<bool> {
        self.distances_from(start, passable)
            .into_iter()
            .map(|d| d.is_some())
            .collect()
    }

    /// Whether every border tile blocks.
    pub fn border_is_solid(&self) -> bool {
        (0..self.height).all(|y| {
            (0..self.width).all(|x| {
                !self.is_border(x, y) || !classify(self.cells[y * self.width + x]).is_passable()
            })
        })
    }
}

/// Passability used by reachability checks: doors count, since a keycard opens them.
pub fn traversable(ch: char) -> bool {
    match classify(ch) {
        TileClass::Door { .. } => true,
        class => class.is_passable(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(&["#####", "#...#", "#.#.#", "#...#", "#####"]).unwrap()
    }

    #[test]
    fn test_index_bounds() {
        let g = sample();
        assert_eq!(g.index(0, 0), Some(0));
        assert_eq!(g.index(4, 4), Some(24));
        assert_eq!(g.index(-1, 0), None);
        assert_eq!(g.index(5, 0), None);
        assert_eq!(g.index(0, 5), None);
    }

    #[test]
    fn test_out_of_bounds_is_void() {
        let g = sample();
        assert_eq!(g.tile_at(-3, 2), VOID_GLYPH);
        assert_eq!(g.tile_at(2, 99), VOID_GLYPH);
        assert!(!g.is_walkable(-1, -1));
        assert!(!g.is_walkable_at(f32::NAN, 1.0));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Grid::from_rows(&["###", "#.", "###"]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(Grid::from_text(""), Err(GridError::Empty));
    }

    #[test]
    fn test_multibyte_glyphs_count_as_one() {
        let g = Grid::from_rows(&["▓▓▓", "▓~▓", "▓▓▓"]).unwrap();
        assert_eq!(g.width(), 3);
        assert!(g.is_walkable(1, 1));
        assert_eq!(classify('▓'), TileClass::Wall(Material::Crystal));
    }

    #[test]
    fn test_text_round_trip_keeps_glyphs_and_walkability() {
        let g = Grid::from_rows(&["█████", "█  B█", "█ █ █", "█ | »", "█████"]).unwrap();
        let text = g.to_text();
        let back = Grid::from_text(&text).unwrap();
        assert_eq!(back, g);
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(back.is_walkable(x, y), g.is_walkable(x, y), "({x}, {y})");
            }
        }
        assert!(back.is_walkable(1, 1));
        assert!(!back.is_walkable(2, 2));
    }

    #[test]
    fn test_flood_fill_respects_walls() {
        let g = Grid::from_rows(&["#####", "#.#.#", "#####"]).unwrap();
        let mask = g.flood_fill((1, 1), is_walkable_glyph);
        assert!(mask[1 * 5 + 1]);
        assert!(!mask[1 * 5 + 3]);
    }

    #[test]
    fn test_distances_ring() {
        let g = sample();
        let d = g.distances_from((1, 1), is_walkable_glyph);
        assert_eq!(d[1 * 5 + 1], Some(0));
        assert_eq!(d[3 * 5 + 3], Some(4));
        assert_eq!(d[2 * 5 + 2], None);
    }

    #[test]
    fn test_classify_markers() {
        assert_eq!(classify('|'), TileClass::Door { locked: true });
        assert_eq!(classify('»'), TileClass::Exit { active: true });
        assert!(classify('Q').is_passable());
        assert!(!classify('|').is_passable());
        assert!(traversable('|'));
    }

    #[test]
    fn test_bordered_grid() {
        let g = Grid::bordered(6, 4, '#', '.');
        assert!(g.border_is_solid());
        assert_eq!(g.walkable_cells().len(), 4 * 2);
    }
}
