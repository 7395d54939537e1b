//! Level - a generated grid plus the entities layered over it

use crate::actors::Enemy;
use crate::grid::Grid;
use crate::mission::{objectives_complete, Door, Exit, Objective};
use crate::pickups::Pickup;
use crate::types::{GenerationStrategy, ObjectiveKind, RoomKind, Theme};

/// Axis-aligned room interior, in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub kind: RoomKind,
}

impl Room {
    pub fn new(x: usize, y: usize, width: usize, height: usize, kind: RoomKind) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
        }
    }

    pub fn center(&self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Whether this room, grown by `margin` on every side, touches `other`.
    pub fn overlaps(&self, other: &Room, margin: usize) -> bool {
        let (ax0, ay0) = (self.x.saturating_sub(margin), self.y.saturating_sub(margin));
        let (ax1, ay1) = (
            self.x + self.width + margin,
            self.y + self.height + margin,
        );
        ax0 < other.x + other.width
            && other.x < ax1
            && ay0 < other.y + other.height
            && other.y < ay1
    }

    /// Interior tiles, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

/// What generation produced versus what was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    /// Resolved strategy (never `Auto`).
    pub strategy: GenerationStrategy,
    pub rooms_requested: usize,
    pub rooms_placed: usize,
    /// Cave regions joined to the spawn region by the repair pass.
    pub regions_repaired: usize,
    pub doors_requested: usize,
    pub doors_placed: usize,
    pub exits_requested: usize,
    pub exits_placed: usize,
}

impl GenerationReport {
    pub fn room_shortfall(&self) -> usize {
        self.rooms_requested.saturating_sub(self.rooms_placed)
    }
}

impl Default for GenerationReport {
    fn default() -> Self {
        Self {
            strategy: GenerationStrategy::Rooms,
            rooms_requested: 0,
            rooms_placed: 0,
            regions_repaired: 0,
            doors_requested: 0,
            doors_placed: 0,
            exits_requested: 0,
            exits_placed: 0,
        }
    }
}

/// One playable level.
///
/// Collection shapes are fixed after generation; only door, exit, pickup,
/// objective and enemy state changes. Empty collections are valid.
#[derive(Debug, Clone)]
pub struct Level {
    /// 1-based level number.
    pub index: u32,
    pub seed: u32,
    pub theme: Theme,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub exits: Vec<Exit>,
    pub pickups: Vec<Pickup>,
    pub objectives: Vec<Objective>,
    pub enemies: Vec<Enemy>,
    /// Player start position (tile center).
    pub spawn: (f32, f32),
    pub report: GenerationReport,
}

impl Level {
    /// Wrap a hand-made grid with no entities.
    pub fn from_grid(grid: Grid, spawn: (f32, f32)) -> Self {
        Self {
            index: 1,
            seed: 0,
            theme: Theme::Quantum,
            grid,
            rooms: Vec::new(),
            doors: Vec::new(),
            exits: Vec::new(),
            pickups: Vec::new(),
            objectives: Vec::new(),
            enemies: Vec::new(),
            spawn,
            report: GenerationReport::default(),
        }
    }

    pub fn door_at(&self, x: i32, y: i32) -> Option<&Door> {
        self.doors
            .iter()
            .find(|d| d.x as i32 == x && d.y as i32 == y)
    }

    /// Try to open the door at (x, y). On success the tile becomes floor.
    pub fn open_door(&mut self, x: i32, y: i32, has_keycard: bool) -> bool {
        let floor = self.theme.floor();
        let Some(door) = self
            .doors
            .iter_mut()
            .find(|d| d.x as i32 == x && d.y as i32 == y)
        else {
            return false;
        };
        if !door.try_open(has_keycard) {
            return false;
        }
        self.grid.set(x, y, floor);
        true
    }

    pub fn exit_at(&self, x: i32, y: i32) -> Option<&Exit> {
        self.exits
            .iter()
            .find(|e| e.x as i32 == x && e.y as i32 == y)
    }

    /// Whether (x, y) floors onto an active exit.
    pub fn is_active_exit_at(&self, x: f32, y: f32) -> bool {
        self.exit_at(x.floor() as i32, y.floor() as i32)
            .map(|e| e.active)
            .unwrap_or(false)
    }

    pub fn objectives_complete(&self) -> bool {
        objectives_complete(&self.objectives)
    }

    /// Feed progress to every objective of `kind`. Returns the objectives
    /// completed by this call.
    pub fn advance_objective(&mut self, kind: ObjectiveKind, delta: u32) -> Vec<Objective> {
        self.objectives
            .iter_mut()
            .filter(|o| o.kind == kind)
            .filter_map(|o| if o.update(delta) { Some(o.clone()) } else { None })
            .collect()
    }

    /// Activate exits once objectives are complete. Returns true on the
    /// transition.
    pub fn refresh_exits(&mut self) -> bool {
        if !self.objectives_complete() {
            return false;
        }
        let mut changed = false;
        for exit in self.exits.iter_mut().filter(|e| !e.active) {
            exit.active = true;
            self.grid.set(exit.x as i32, exit.y as i32, exit.glyph());
            changed = true;
        }
        changed
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DOOR_LOCKED_GLYPH, EXIT_ACTIVE_GLYPH, EXIT_INACTIVE_GLYPH};

    fn corridor_level() -> Level {
        let grid = Grid::from_rows(&["#######", "#..|.>#", "#######"]).unwrap();
        let mut level = Level::from_grid(grid, (1.5, 1.5));
        level.doors.push(Door::new(3, 1, true));
        level.exits.push(Exit::new(5, 1));
        level
    }

    #[test]
    fn test_room_overlap_margin() {
        let a = Room::new(2, 2, 3, 3, RoomKind::Generic);
        let touching = Room::new(5, 2, 3, 3, RoomKind::Generic);
        let far = Room::new(8, 2, 3, 3, RoomKind::Generic);
        assert!(a.overlaps(&touching, 1));
        assert!(!a.overlaps(&touching, 0));
        assert!(!a.overlaps(&far, 1));
        assert_eq!(a.cells().count(), 9);
        assert_eq!(a.center(), (3, 3));
    }

    #[test]
    fn test_door_opens_into_floor() {
        let mut level = corridor_level();
        assert_eq!(level.grid.tile_at(3, 1), DOOR_LOCKED_GLYPH);
        assert!(!level.open_door(3, 1, false));
        assert!(!level.grid.is_walkable(3, 1));
        assert!(level.open_door(3, 1, true));
        assert!(level.grid.is_walkable(3, 1));
        assert!(level.door_at(3, 1).map(|d| d.opened).unwrap_or(false));
    }

    #[test]
    fn test_exit_activation_follows_objectives() {
        let mut level = corridor_level();
        level.objectives.push(Objective::new(ObjectiveKind::Kill, 2));
        assert!(!level.refresh_exits());
        assert_eq!(level.grid.tile_at(5, 1), EXIT_INACTIVE_GLYPH);

        assert!(level.advance_objective(ObjectiveKind::Kill, 1).is_empty());
        assert_eq!(level.advance_objective(ObjectiveKind::Kill, 1).len(), 1);
        assert!(level.refresh_exits());
        assert!(!level.refresh_exits());
        assert_eq!(level.grid.tile_at(5, 1), EXIT_ACTIVE_GLYPH);
        assert!(level.is_active_exit_at(5.4, 1.6));
    }

    #[test]
    fn test_minimal_level_treats_missing_data_as_empty() {
        let mut level = Level::from_grid(Grid::bordered(4, 4, '#', '.'), (1.5, 1.5));
        assert!(level.objectives_complete());
        assert!(!level.refresh_exits());
        assert!(!level.open_door(1, 1, true));
        assert!(level.exit_at(1, 1).is_none());
    }
}
