//! Pickup placement

use log::debug;

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::types::{PickupKind, SpawnConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    /// Tile center.
    pub x: f32,
    pub y: f32,
    pub amount: i32,
    pub taken: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, tile: (usize, usize), amount: i32) -> Self {
        Self {
            kind,
            x: tile.0 as f32 + 0.5,
            y: tile.1 as f32 + 0.5,
            amount,
            taken: false,
        }
    }

    /// Mark as taken. Returns true only the first time.
    pub fn take(&mut self) -> bool {
        if self.taken {
            return false;
        }
        self.taken = true;
        true
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        (self.x - x).hypot(self.y - y)
    }
}

/// Roll pickups over a shuffled budget of floor tiles.
///
/// Each budgeted tile rolls once: keycard below `keycard_chance`, health below
/// `keycard + health`, ammo below `keycard + health + ammo`, nothing otherwise.
/// With `guarantee_keycard` at least one keycard is placed when any floor
/// tile is free. `reserved` tiles (e.g. the player start) never get a pickup.
pub fn spawn_pickups(
    grid: &Grid,
    cfg: &SpawnConfig,
    rng: &mut SimpleRng,
    guarantee_keycard: bool,
    reserved: &[(usize, usize)],
) -> Vec<Pickup> {
    let mut spots = grid.walkable_cells();
    spots.retain(|t| !reserved.contains(t));
    rng.shuffle(&mut spots);

    let budget =
        ((spots.len() as f32 * cfg.pickup_budget_ratio.max(0.0)) as usize).min(spots.len());
    let kc = cfg.keycard_chance;
    let hp = kc + cfg.health_pack_chance;
    let am = hp + cfg.ammo_pack_chance;

    let mut pickups = Vec::new();
    for &tile in &spots[..budget] {
        let r = rng.next_f32();
        if r < kc {
            pickups.push(Pickup::new(PickupKind::Keycard, tile, 1));
        } else if r < hp {
            pickups.push(Pickup::new(PickupKind::Health, tile, cfg.health_amount));
        } else if r < am {
            pickups.push(Pickup::new(PickupKind::Ammo, tile, cfg.ammo_amount));
        }
    }

    if guarantee_keycard && !pickups.iter().any(|p| p.kind == PickupKind::Keycard) {
        // First tile past the budget, else reuse a rolled tile that stayed empty.
        let used = |t: &(usize, usize)| {
            pickups
                .iter()
                .any(|p| p.x as usize == t.0 && p.y as usize == t.1)
        };
        if let Some(&tile) = spots.iter().skip(budget).chain(spots.iter()).find(|t| !used(t)) {
            pickups.push(Pickup::new(PickupKind::Keycard, tile, 1));
        } else if let Some(first) = pickups.first_mut() {
            first.kind = PickupKind::Keycard;
            first.amount = 1;
        }
    }

    debug!(
        "spawned {} pickups from a budget of {} tiles",
        pickups.len(),
        budget
    );
    pickups
}
