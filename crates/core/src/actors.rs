//! Actors - hostile enemies and projectiles
//!
//! Behavior is a closed set dispatched on [`Behavior`]:
//!
//! - **Chase** (runners, tanks): step straight at the player each tick, only
//!   committing the move when the destination tile is walkable.
//! - **Shooter**: stationary, runs `Idle → Telegraph → Cooldown → Idle`.
//!   All countdowns are in ticks.
//!
//! ```text
//!   Idle ──(in range, in sight, roll)──▶ Telegraph{n}
//!    ▲                                      │ n reaches 0: fire
//!    └──────(n reaches 0)──── Cooldown{n} ◀─┘
//! ```

use arrayvec::ArrayVec;

use crate::caster::Caster;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::types::{
    EnemyConfig, EnemyKind, CONTACT_RADIUS, MAX_ENEMY_PROJECTILES, PROJECTILE_HIT_RADIUS,
};

/// Below this distance a chaser stops stepping (it is on top of the player).
const CHASE_STOP_DISTANCE: f32 = 0.1;

/// Moving shot, owned by the enemy that fired it or by the level for player shots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub damage: i32,
    /// Ticks left before it fizzles.
    pub ttl: u32,
    /// Blast radius on impact; zero for direct-hit shots.
    pub splash: f32,
    pub alive: bool,
}

impl Projectile {
    /// Projectile from `(x, y)` toward `angle` at `speed` tiles per tick.
    pub fn aimed(x: f32, y: f32, angle: f32, speed: f32, damage: i32, ttl: u32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x,
            y,
            vx: cos * speed,
            vy: sin * speed,
            damage,
            ttl,
            splash: 0.0,
            alive: true,
        }
    }

    pub fn with_splash(mut self, radius: f32) -> Self {
        self.splash = radius;
        self
    }

    /// Move one tick. Dies on leaving walkable space or when its lifetime ends.
    pub fn advance(&mut self, grid: &Grid) {
        if !self.alive {
            return;
        }
        self.x += self.vx;
        self.y += self.vy;
        self.ttl = self.ttl.saturating_sub(1);
        if !grid.is_walkable_at(self.x, self.y) || self.ttl == 0 {
            self.alive = false;
        }
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        (self.x - x).hypot(self.y - y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShooterState {
    Idle,
    Telegraph { ticks: u32 },
    Cooldown { ticks: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    Chase { speed: f32 },
    Shooter { state: ShooterState },
}

impl Behavior {
    pub fn for_kind(kind: EnemyKind, cfg: &EnemyConfig) -> Self {
        match kind {
            EnemyKind::Runner => Behavior::Chase {
                speed: cfg.runner_speed,
            },
            EnemyKind::Tank => Behavior::Chase {
                speed: cfg.tank_speed,
            },
            EnemyKind::Shooter => Behavior::Shooter {
                state: ShooterState::Idle,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub behavior: Behavior,
    pub alive: bool,
    pub projectiles: ArrayVec<Projectile, MAX_ENEMY_PROJECTILES>,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32, cfg: &EnemyConfig) -> Self {
        Self {
            kind,
            x,
            y,
            health: kind.base_health(),
            behavior: Behavior::for_kind(kind, cfg),
            alive: true,
            projectiles: ArrayVec::new(),
        }
    }

    /// Apply damage. Returns true when this hit kills.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= damage.max(0);
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        (self.x - x).hypot(self.y - y)
    }

    pub fn shooter_state(&self) -> Option<ShooterState> {
        match self.behavior {
            Behavior::Shooter { state } => Some(state),
            Behavior::Chase { .. } => None,
        }
    }

    /// Sprite glyph. A telegraphing shooter shows its wind-up.
    pub fn glyph(&self) -> char {
        match (self.kind, self.behavior) {
            (_, Behavior::Shooter { state: ShooterState::Telegraph { .. } }) => '!',
            (EnemyKind::Runner, _) => 'r',
            (EnemyKind::Tank, _) => 'T',
            (EnemyKind::Shooter, _) => 'S',
        }
    }
}

/// Spawn up to `count` enemies on shuffled floor tiles.
pub fn spawn_enemies(
    grid: &Grid,
    count: usize,
    cfg: &EnemyConfig,
    rng: &mut SimpleRng,
) -> Vec<Enemy> {
    spawn_enemies_avoiding(grid, count, cfg, (f32::NAN, f32::NAN), 0.0, rng)
}

/// Like [`spawn_enemies`], skipping tiles within `safe_radius` of `avoid`.
pub fn spawn_enemies_avoiding(
    grid: &Grid,
    count: usize,
    cfg: &EnemyConfig,
    avoid: (f32, f32),
    safe_radius: f32,
    rng: &mut SimpleRng,
) -> Vec<Enemy> {
    let mut tiles: Vec<(f32, f32)> = grid
        .walkable_cells()
        .into_iter()
        .map(|(x, y)| (x as f32 + 0.5, y as f32 + 0.5))
        // NaN distances compare false, so an unset `avoid` keeps every tile.
        .filter(|&(x, y)| !((x - avoid.0).hypot(y - avoid.1) < safe_radius))
        .collect();
    rng.shuffle(&mut tiles);

    tiles
        .into_iter()
        .take(count)
        .map(|(x, y)| {
            let roll = rng.next_f32();
            let kind = if roll < cfg.shooter_chance {
                EnemyKind::Shooter
            } else if roll < cfg.shooter_chance + cfg.tank_chance {
                EnemyKind::Tank
            } else {
                EnemyKind::Runner
            };
            Enemy::new(kind, x, y, cfg)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSource {
    Contact,
    Projectile,
}

/// Damage dealt to the player this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub damage: i32,
    /// World angle from the player toward the attacker.
    pub direction: f32,
    pub source: HitSource,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiReport {
    pub hits: Vec<Hit>,
    /// Shots fired this tick.
    pub shots: usize,
}

impl AiReport {
    pub fn total_damage(&self) -> i32 {
        self.hits.iter().map(|h| h.damage).sum()
    }
}

/// Per-tick enemy update.
#[derive(Debug, Clone)]
pub struct EnemyAi {
    cfg: EnemyConfig,
    caster: Caster,
}

impl EnemyAi {
    pub fn new(cfg: EnemyConfig, caster: Caster) -> Self {
        Self { cfg, caster }
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.cfg
    }

    /// Advance every enemy and its projectiles by one tick.
    pub fn update(
        &self,
        enemies: &mut [Enemy],
        player: (f32, f32),
        grid: &Grid,
        rng: &mut SimpleRng,
    ) -> AiReport {
        let mut report = AiReport::default();

        for enemy in enemies.iter_mut() {
            if enemy.alive {
                match enemy.behavior {
                    Behavior::Chase { speed } => {
                        self.chase(enemy, speed, player, grid, &mut report)
                    }
                    Behavior::Shooter { state } => {
                        let next = self.shooter_step(enemy, state, player, grid, rng, &mut report);
                        enemy.behavior = Behavior::Shooter { state: next };
                    }
                }
            }

            // In-flight shots outlive their shooter.
            for p in enemy.projectiles.iter_mut() {
                p.advance(grid);
                if p.alive && p.distance_to(player.0, player.1) <= PROJECTILE_HIT_RADIUS {
                    p.alive = false;
                    report.hits.push(Hit {
                        damage: p.damage,
                        direction: (p.y - player.1).atan2(p.x - player.0),
                        source: HitSource::Projectile,
                    });
                }
            }
            enemy.projectiles.retain(|p| p.alive);
        }

        report
    }

    fn chase(
        &self,
        enemy: &mut Enemy,
        speed: f32,
        player: (f32, f32),
        grid: &Grid,
        report: &mut AiReport,
    ) {
        let (dx, dy) = (player.0 - enemy.x, player.1 - enemy.y);
        let dist = dx.hypot(dy);
        if dist > CHASE_STOP_DISTANCE {
            let nx = enemy.x + speed * dx / dist;
            let ny = enemy.y + speed * dy / dist;
            if grid.is_walkable_at(nx, ny) {
                enemy.x = nx;
                enemy.y = ny;
            }
        }

        if enemy.distance_to(player.0, player.1) <= CONTACT_RADIUS {
            let damage = enemy.kind.contact_damage();
            if damage > 0 {
                report.hits.push(Hit {
                    damage,
                    direction: (enemy.y - player.1).atan2(enemy.x - player.0),
                    source: HitSource::Contact,
                });
            }
        }
    }

    fn shooter_step(
        &self,
        enemy: &mut Enemy,
        state: ShooterState,
        player: (f32, f32),
        grid: &Grid,
        rng: &mut SimpleRng,
        report: &mut AiReport,
    ) -> ShooterState {
        match state {
            ShooterState::Idle => {
                let in_range = enemy.distance_to(player.0, player.1) <= self.cfg.aggro_range;
                if in_range
                    && self
                        .caster
                        .has_line_of_sight(grid, (enemy.x, enemy.y), player)
                    && rng.chance(self.cfg.fire_chance)
                {
                    ShooterState::Telegraph {
                        ticks: self.cfg.telegraph_ticks,
                    }
                } else {
                    ShooterState::Idle
                }
            }
            ShooterState::Telegraph { ticks } => {
                let ticks = ticks.saturating_sub(1);
                if ticks > 0 {
                    return ShooterState::Telegraph { ticks };
                }
                let angle = (player.1 - enemy.y).atan2(player.0 - enemy.x);
                let shot = Projectile::aimed(
                    enemy.x,
                    enemy.y,
                    angle,
                    self.cfg.projectile_speed,
                    self.cfg.projectile_damage,
                    self.cfg.projectile_lifetime,
                );
                if enemy.projectiles.try_push(shot).is_ok() {
                    report.shots += 1;
                }
                ShooterState::Cooldown {
                    ticks: self.cfg.cooldown_ticks,
                }
            }
            ShooterState::Cooldown { ticks } => {
                let ticks = ticks.saturating_sub(1);
                if ticks > 0 {
                    ShooterState::Cooldown { ticks }
                } else {
                    ShooterState::Idle
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hall() -> Grid {
        Grid::bordered(20, 5, '#', '.')
    }

    fn eager() -> EnemyConfig {
        EnemyConfig {
            fire_chance: 1.0,
            ..EnemyConfig::default()
        }
    }

    #[test]
    fn test_spawn_bounded_by_tiles() {
        let g = Grid::from_rows(&["#####", "#...#", "#####"]).unwrap();
        let cfg = EnemyConfig {
            shooter_chance: 0.3,
            tank_chance: 0.2,
            ..EnemyConfig::default()
        };
        let enemies = spawn_enemies(&g, 6, &cfg, &mut SimpleRng::new(42));
        assert_eq!(enemies.len(), 3);
        for e in &enemies {
            assert!(g.is_walkable_at(e.x, e.y));
            assert_eq!(e.health, e.kind.base_health());
        }
    }

    #[test]
    fn test_spawn_respects_safe_radius() {
        let g = hall();
        let enemies = spawn_enemies_avoiding(
            &g,
            50,
            &EnemyConfig::default(),
            (1.5, 1.5),
            4.0,
            &mut SimpleRng::new(1),
        );
        assert!(!enemies.is_empty());
        assert!(enemies.iter().all(|e| e.distance_to(1.5, 1.5) >= 4.0));
    }

    #[test]
    fn test_chaser_steps_toward_player() {
        let g = hall();
        let ai = EnemyAi::new(EnemyConfig::default(), Caster::default());
        let mut enemies = vec![Enemy::new(EnemyKind::Runner, 10.5, 2.5, ai.config())];
        ai.update(&mut enemies, (2.5, 2.5), &g, &mut SimpleRng::new(1));
        assert!(enemies[0].x < 10.5);
        assert_eq!(enemies[0].y, 2.5);
    }

    #[test]
    fn test_chaser_blocked_by_wall_stays_put() {
        let g = Grid::from_rows(&["#####", "#.#.#", "#####"]).unwrap();
        let ai = EnemyAi::new(
            EnemyConfig {
                runner_speed: 1.0,
                ..EnemyConfig::default()
            },
            Caster::default(),
        );
        let mut enemies = vec![Enemy::new(EnemyKind::Runner, 3.5, 1.5, ai.config())];
        ai.update(&mut enemies, (1.5, 1.5), &g, &mut SimpleRng::new(1));
        assert_eq!((enemies[0].x, enemies[0].y), (3.5, 1.5));
    }

    #[test]
    fn test_contact_damage_reports_direction() {
        let g = hall();
        let ai = EnemyAi::new(EnemyConfig::default(), Caster::default());
        let mut enemies = vec![Enemy::new(EnemyKind::Tank, 3.0, 2.5, ai.config())];
        let report = ai.update(&mut enemies, (2.5, 2.5), &g, &mut SimpleRng::new(1));
        assert_eq!(report.hits.len(), 1);
        assert_eq!(report.hits[0].damage, EnemyKind::Tank.contact_damage());
        // Attacker is east of the player.
        assert!(report.hits[0].direction.abs() < 0.01);
    }

    #[test]
    fn test_shooter_out_of_range_stays_idle() {
        let g = Grid::bordered(60, 5, '#', '.');
        let ai = EnemyAi::new(eager(), Caster::default());
        let mut enemies = vec![Enemy::new(EnemyKind::Shooter, 50.5, 2.5, ai.config())];
        let mut rng = SimpleRng::new(9);
        for _ in 0..500 {
            ai.update(&mut enemies, (1.5, 2.5), &g, &mut rng);
            assert_eq!(enemies[0].shooter_state(), Some(ShooterState::Idle));
        }
    }

    #[test]
    fn test_shooter_cycle_and_projectile_hit() {
        let g = hall();
        let cfg = eager();
        let ai = EnemyAi::new(cfg.clone(), Caster::default());
        let mut enemies = vec![Enemy::new(EnemyKind::Shooter, 6.5, 2.5, &cfg)];
        let mut rng = SimpleRng::new(3);
        let player = (2.5, 2.5);

        ai.update(&mut enemies, player, &g, &mut rng);
        assert_eq!(
            enemies[0].shooter_state(),
            Some(ShooterState::Telegraph { ticks: cfg.telegraph_ticks })
        );
        assert_eq!(enemies[0].glyph(), '!');

        for _ in 1..cfg.telegraph_ticks {
            ai.update(&mut enemies, player, &g, &mut rng);
        }
        assert!(enemies[0].projectiles.is_empty());
        let fired = ai.update(&mut enemies, player, &g, &mut rng);
        assert_eq!(fired.shots, 1);
        assert_eq!(
            enemies[0].shooter_state(),
            Some(ShooterState::Cooldown { ticks: cfg.cooldown_ticks })
        );

        // 4 tiles at 0.35 per tick: hits within a dozen ticks, from the east.
        let mut hit = None;
        for _ in 0..12 {
            let r = ai.update(&mut enemies, player, &g, &mut rng);
            if let Some(h) = r.hits.first() {
                hit = Some(*h);
                break;
            }
        }
        let hit = hit.expect("projectile should reach the player");
        assert_eq!(hit.source, HitSource::Projectile);
        assert_eq!(hit.damage, cfg.projectile_damage);
        assert!(hit.direction.abs() < 0.01);
    }

    #[test]
    fn test_projectile_dies_in_wall() {
        let g = Grid::from_rows(&["####", "#..#", "####"]).unwrap();
        let mut p = Projectile::aimed(1.5, 1.5, 0.0, 1.0, 5, 10);
        p.advance(&g);
        assert!(p.alive);
        p.advance(&g);
        assert!(!p.alive);
    }

    #[test]
    fn test_projectile_ttl() {
        let g = hall();
        let mut p = Projectile::aimed(1.5, 2.5, 0.0, 0.1, 5, 2);
        p.advance(&g);
        p.advance(&g);
        assert!(!p.alive);
    }

    #[test]
    fn test_damage_kills_once() {
        let mut e = Enemy::new(EnemyKind::Runner, 1.5, 1.5, &EnemyConfig::default());
        assert!(!e.take_damage(10));
        assert!(e.take_damage(100));
        assert!(!e.alive);
        assert!(!e.take_damage(100));
    }
}
