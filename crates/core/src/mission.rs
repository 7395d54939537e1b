//! Mission state: doors, exits and level objectives
//!
//! These records are created once by the generator. Afterwards only their
//! state fields change, and every change is one-way:
//!
//! - a door goes closed → opened (a locked one needs a keycard)
//! - an exit goes inactive → active when all objectives are complete
//! - an objective's `current` only grows, capped at `target`

use crate::types::{
    ObjectiveKind, DOOR_LOCKED_GLYPH, DOOR_UNLOCKED_GLYPH, EXIT_ACTIVE_GLYPH, EXIT_INACTIVE_GLYPH,
};

/// Door on a former wall tile between two walkable regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Door {
    pub x: usize,
    pub y: usize,
    pub locked: bool,
    pub opened: bool,
}

impl Door {
    pub fn new(x: usize, y: usize, locked: bool) -> Self {
        Self {
            x,
            y,
            locked,
            opened: false,
        }
    }

    /// Attempt to open the door. Returns true only on the transition.
    pub fn try_open(&mut self, has_keycard: bool) -> bool {
        if self.opened || (self.locked && !has_keycard) {
            return false;
        }
        self.opened = true;
        true
    }

    /// Grid glyph while closed. Opened doors are written back as floor.
    pub fn glyph(&self) -> char {
        if self.locked {
            DOOR_LOCKED_GLYPH
        } else {
            DOOR_UNLOCKED_GLYPH
        }
    }
}

/// Level exit, usable once active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    pub x: usize,
    pub y: usize,
    pub active: bool,
}

impl Exit {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            active: false,
        }
    }

    pub fn glyph(&self) -> char {
        if self.active {
            EXIT_ACTIVE_GLYPH
        } else {
            EXIT_INACTIVE_GLYPH
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Objective {
    pub kind: ObjectiveKind,
    pub target: u32,
    pub current: u32,
    pub completed: bool,
}

impl Objective {
    pub fn new(kind: ObjectiveKind, target: u32) -> Self {
        Self {
            kind,
            target,
            current: 0,
            completed: target == 0,
        }
    }

    /// Advance progress. Returns true when this call completes the objective.
    pub fn update(&mut self, delta: u32) -> bool {
        let was = self.completed;
        self.current = self.target.min(self.current.saturating_add(delta));
        self.completed = self.current >= self.target;
        self.completed && !was
    }

    pub fn description(&self) -> String {
        match self.kind {
            ObjectiveKind::Kill => "Eliminate hostiles".to_string(),
            ObjectiveKind::Collect => "Collect items".to_string(),
            ObjectiveKind::Survive => format!("Survive {} ticks", self.target),
        }
    }

    /// HUD line, e.g. `Eliminate hostiles: 1/3`.
    pub fn progress_text(&self) -> String {
        format!("{}: {}/{}", self.description(), self.current, self.target)
    }
}

/// Whether every objective is complete. An empty list counts as complete.
pub fn objectives_complete(objectives: &[Objective]) -> bool {
    objectives.iter().all(|o| o.completed)
}

/// Derive level objectives from the spawned content.
///
/// | Kind | Unlocks | Target |
/// |------|---------|--------|
/// | kill | enemies present | `max(2, enemies/2 + level/3)`, at most `enemies` |
/// | collect | level ≥ 2, pickups present | `max(1, pickups/3)` |
/// | survive | level ≥ 5 | `min(300, 120 + level*15)` ticks |
pub fn generate_objectives(level: u32, enemy_count: usize, pickup_count: usize) -> Vec<Objective> {
    let mut out = Vec::new();

    if enemy_count > 0 {
        let enemies = enemy_count as u32;
        let target = (enemies / 2 + level / 3).max(2).min(enemies);
        out.push(Objective::new(ObjectiveKind::Kill, target));
    }

    if level >= 2 && pickup_count > 0 {
        let target = (pickup_count as u32 / 3).max(1);
        out.push(Objective::new(ObjectiveKind::Collect, target));
    }

    if level >= 5 {
        let ticks = (120 + level * 15).min(300);
        out.push(Objective::new(ObjectiveKind::Survive, ticks));
    }

    out
}
