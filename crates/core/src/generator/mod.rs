//! Level generator
//!
//! Builds a complete [`Level`] from a level index and seed:
//!
//! 1. Terrain: rooms and corridors, or smoothed caves with a connectivity repair.
//! 2. Doors on separating walls, exits on the tiles farthest from spawn.
//! 3. Pickups, then enemies away from the spawn point.
//! 4. Objectives derived from the enemy and pickup counts.
//!
//! Every step draws from one [`SimpleRng`] derived from `(seed, index)`, so a
//! level is reproducible from those two numbers alone.
//!
//! # Strategy selection
//!
//! | Config | Level index | Terrain |
//! |--------|-------------|---------|
//! | `auto` | multiple of 3 | caves |
//! | `auto` | otherwise | rooms |
//! | `rooms` / `caves` | any | as configured |

pub mod caves;
pub mod placement;
pub mod rooms;

use log::{info, warn};

use crate::actors::spawn_enemies_avoiding;
use crate::grid::Grid;
use crate::level::{GenerationReport, Level};
use crate::mission::generate_objectives;
use crate::pickups::spawn_pickups;
use crate::rng::SimpleRng;
use crate::types::{GameConfig, GenerationStrategy, Theme};

const MIN_WIDTH: usize = 12;
const MIN_HEIGHT: usize = 9;
/// Cave spawn tile; a 3×3 clearing is carved around it.
const CAVE_SPAWN: (usize, usize) = (2, 2);

#[derive(Debug, Clone, Default)]
pub struct LevelGenerator {
    config: GameConfig,
}

impl LevelGenerator {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Strategy used for a level index.
    pub fn strategy_for(&self, index: u32) -> GenerationStrategy {
        match self.config.generator.strategy {
            GenerationStrategy::Auto if index > 0 && index % 3 == 0 => GenerationStrategy::Caves,
            GenerationStrategy::Auto => GenerationStrategy::Rooms,
            other => other,
        }
    }

    /// Grid size for a level index: grows 4×2 per level, capped.
    pub fn size_for(&self, index: u32) -> (usize, usize) {
        let g = &self.config.generator;
        let step = index.saturating_sub(1) as usize;
        let w = (g.base_width + step * 4).min(g.max_width.max(g.base_width));
        let h = (g.base_height + step * 2).min(g.max_height.max(g.base_height));
        (w.max(MIN_WIDTH), h.max(MIN_HEIGHT))
    }

    pub fn generate(&self, index: u32, seed: u32) -> Level {
        let mut rng = SimpleRng::derive(seed, index);
        let theme = Theme::for_level(index);
        let strategy = self.strategy_for(index);
        let (width, height) = self.size_for(index);
        let gen_cfg = &self.config.generator;
        let spawns = &self.config.spawns;

        let mut report = GenerationReport {
            strategy,
            doors_requested: spawns.door_count,
            exits_requested: spawns.exit_count,
            ..GenerationReport::default()
        };

        let (mut grid, rooms, spawn_tile) = match strategy {
            GenerationStrategy::Caves => {
                let mut grid = caves::cellular_automaton(
                    width,
                    height,
                    theme.wall(),
                    theme.floor(),
                    gen_cfg.cave_fill,
                    gen_cfg.cave_passes,
                    &mut rng,
                );
                caves::carve_clearing(&mut grid, CAVE_SPAWN, 1, theme.floor());
                report.regions_repaired =
                    caves::repair_connectivity(&mut grid, CAVE_SPAWN, theme.floor());
                (grid, Vec::new(), CAVE_SPAWN)
            }
            _ => {
                let mut grid = Grid::new(width, height, theme.wall());
                let rooms = rooms::place_rooms(&mut grid, theme, gen_cfg, &mut rng);
                rooms::connect_rooms(&mut grid, &rooms, theme.floor());
                report.rooms_requested = gen_cfg.room_count;
                report.rooms_placed = rooms.len().saturating_sub(1);
                let spawn = rooms.first().map(|r| r.center()).unwrap_or((1, 1));
                (grid, rooms, spawn)
            }
        };

        if report.room_shortfall() > 0 {
            warn!(
                "level {}: placed {} of {} rooms",
                index, report.rooms_placed, report.rooms_requested
            );
        }

        // The spawn tile must stay plain floor so nothing is placed under the player.
        grid.set(spawn_tile.0 as i32, spawn_tile.1 as i32, theme.floor());

        let doors = placement::place_doors(&mut grid, spawns.door_count, &mut rng);
        let exits = placement::place_exits(&mut grid, spawn_tile, spawns.exit_count);
        report.doors_placed = doors.len();
        report.exits_placed = exits.len();

        let spawn = (spawn_tile.0 as f32 + 0.5, spawn_tile.1 as f32 + 0.5);
        let pickups = spawn_pickups(&grid, spawns, &mut rng, !doors.is_empty(), &[spawn_tile]);

        let enemy_count =
            spawns.enemy_count + spawns.enemies_per_level * index.saturating_sub(1) as usize;
        let enemies = spawn_enemies_avoiding(
            &grid,
            enemy_count,
            &self.config.enemies,
            spawn,
            spawns.safe_radius,
            &mut rng,
        );

        let objectives = generate_objectives(index, enemies.len(), pickups.len());

        info!(
            "generated level {} ({}, {:?}, {}x{}): {} rooms, {} doors, {} exits, {} pickups, {} enemies, {} objectives",
            index,
            theme.as_str(),
            strategy,
            width,
            height,
            rooms.len(),
            doors.len(),
            exits.len(),
            pickups.len(),
            enemies.len(),
            objectives.len()
        );

        let mut level = Level {
            index,
            seed,
            theme,
            grid,
            rooms,
            doors,
            exits,
            pickups,
            objectives,
            enemies,
            spawn,
            report,
        };
        // A level without objectives opens its exits immediately.
        level.refresh_exits();
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GeneratorConfig;

    #[test]
    fn test_auto_strategy_cycles() {
        let gen = LevelGenerator::default();
        assert_eq!(gen.strategy_for(1), GenerationStrategy::Rooms);
        assert_eq!(gen.strategy_for(3), GenerationStrategy::Caves);
        assert_eq!(gen.strategy_for(4), GenerationStrategy::Rooms);
    }

    #[test]
    fn test_size_grows_and_caps() {
        let gen = LevelGenerator::default();
        assert_eq!(gen.size_for(1), (32, 20));
        assert_eq!(gen.size_for(2), (36, 22));
        assert_eq!(gen.size_for(500), (80, 48));
    }

    #[test]
    fn test_same_seed_same_level() {
        let gen = LevelGenerator::default();
        let a = gen.generate(2, 77);
        let b = gen.generate(2, 77);
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.doors, b.doors);
        assert_eq!(a.pickups, b.pickups);
    }

    #[test]
    fn test_spawn_is_walkable() {
        let gen = LevelGenerator::default();
        for index in 1..=6 {
            let level = gen.generate(index, 1234);
            assert!(level.grid.is_walkable_at(level.spawn.0, level.spawn.1));
            assert!(level.grid.border_is_solid());
            assert_eq!(level.theme, Theme::for_level(index));
        }
    }

    #[test]
    fn test_forced_caves_have_no_rooms() {
        let cfg = GameConfig {
            generator: GeneratorConfig {
                strategy: GenerationStrategy::Caves,
                ..GeneratorConfig::default()
            },
            ..GameConfig::default()
        };
        let level = LevelGenerator::new(cfg).generate(1, 5);
        assert!(level.rooms.is_empty());
        assert_eq!(level.report.strategy, GenerationStrategy::Caves);
    }
}
