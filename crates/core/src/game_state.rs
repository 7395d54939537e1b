//! Game state module - ties the level, player and actors into one tick loop
//!
//! One accepted action is one tick. A tick runs, in order: objective timers,
//! enemy AI and enemy projectiles, player projectiles, pickups, passive score,
//! exit activation, then death and exit checks. Rendering reads the result
//! through [`GameState::scene`].

use log::info;

use crate::actors::{Enemy, EnemyAi, Projectile};
use crate::caster::Caster;
use crate::generator::LevelGenerator;
use crate::level::Level;
use crate::player::{normalize_bearing, Player};
use crate::rng::SimpleRng;
use crate::types::{
    EnemyKind, GameAction, GameConfig, ObjectiveKind, PickupKind, WeaponMode, LEVEL_CLEAR_BONUS,
    NOTIFICATION_TTL_TICKS, PICKUP_RADIUS, PICKUP_SCORE, PROJECTILE_HIT_RADIUS,
    SCORE_TICK_INTERVAL,
};

/// Salt for the AI stream so it never mirrors the level stream.
const AI_STREAM_SALT: u32 = 0xA1;
/// Ticks a damage indicator stays visible.
const HIT_MEMORY_TICKS: u32 = 4;
/// Rocket lifetime in ticks.
const ROCKET_TTL: u32 = 40;
/// Half-width of an enemy sprite for hitscan, in tiles.
const TARGET_HALF_WIDTH: f32 = 0.4;

/// Short HUD banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub ttl: u32,
}

/// Most recent damage taken by the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentHit {
    /// World angle from the player toward the attacker.
    pub direction: f32,
    /// Ticks since the hit.
    pub age: u32,
}

/// Read-only view of everything the compositor draws.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub level: &'a Level,
    pub player: &'a Player,
    /// Player-owned projectiles. Enemy projectiles live on each enemy.
    pub projectiles: &'a [Projectile],
    pub tick: u64,
    /// Changes whenever a new level is loaded.
    pub level_epoch: u32,
    pub recent_hit: Option<RecentHit>,
}

impl<'a> Scene<'a> {
    pub fn new(level: &'a Level, player: &'a Player) -> Self {
        Self {
            level,
            player,
            projectiles: &[],
            tick: 0,
            level_epoch: 0,
            recent_hit: None,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    generator: LevelGenerator,
    ai: EnemyAi,
    caster: Caster,
    seed: u32,
    start_level: u32,
    rng: SimpleRng,
    level: Level,
    player: Player,
    projectiles: Vec<Projectile>,
    ticks: u64,
    /// Increments on every level load (next level or restart).
    level_epoch: u32,
    paused: bool,
    game_over: bool,
    show_map: bool,
    notifications: Vec<Notification>,
    recent_hit: Option<RecentHit>,
    kills: u32,
}

impl GameState {
    /// Create a new game at level 1 with the default configuration.
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, GameConfig::default(), 1)
    }

    pub fn with_config(seed: u32, config: GameConfig, start_level: u32) -> Self {
        let generator = LevelGenerator::new(config.clone());
        let level = generator.generate(start_level.max(1), seed);
        Self::assemble(seed, config, generator, level)
    }

    /// Start from a prepared level. Later levels are still generated.
    pub fn from_level(seed: u32, config: GameConfig, level: Level) -> Self {
        let generator = LevelGenerator::new(config.clone());
        Self::assemble(seed, config, generator, level)
    }

    fn assemble(seed: u32, config: GameConfig, generator: LevelGenerator, level: Level) -> Self {
        let caster = Caster::from_config(&config.graphics);
        let player = Player::new(level.spawn.0, level.spawn.1, 0.0, &config.player);
        let mut state = Self {
            ai: EnemyAi::new(config.enemies.clone(), caster),
            caster,
            seed,
            start_level: level.index,
            rng: SimpleRng::derive(seed, AI_STREAM_SALT),
            player,
            projectiles: Vec::new(),
            ticks: 0,
            level_epoch: 0,
            paused: false,
            game_over: false,
            show_map: false,
            notifications: Vec::new(),
            recent_hit: None,
            kills: 0,
            config,
            generator,
            level,
        };
        state.notify(format!(
            "Level {} - {}",
            state.level.index,
            state.level.theme.as_str()
        ));
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Get mutable level access (for test setup)
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Get mutable player access (for test setup)
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.level.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn caster(&self) -> &Caster {
        &self.caster
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn level_epoch(&self) -> u32 {
        self.level_epoch
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn show_map(&self) -> bool {
        self.show_map
    }

    pub fn recent_hit(&self) -> Option<RecentHit> {
        self.recent_hit
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drain pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            level: &self.level,
            player: &self.player,
            projectiles: &self.projectiles,
            tick: self.ticks,
            level_epoch: self.level_epoch,
            recent_hit: self.recent_hit,
        }
    }

    /// Apply one player action.
    ///
    /// Returns true if the action advanced the simulation by a tick. Pause,
    /// map and restart never tick; nothing ticks while paused or dead.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.restart();
                return false;
            }
            GameAction::Pause => {
                if !self.game_over {
                    self.paused = !self.paused;
                }
                return false;
            }
            GameAction::ToggleMap => {
                self.show_map = !self.show_map;
                return false;
            }
            _ => {}
        }
        if self.paused || self.game_over {
            return false;
        }

        let step = self.config.player.move_step;
        let turn = self.config.player.turn_step;
        match action {
            GameAction::MoveForward => self.step(self.player.forward_delta(step)),
            GameAction::MoveBack => self.step(self.player.forward_delta(-step)),
            GameAction::StrafeLeft => self.step(self.player.strafe_delta(-step)),
            GameAction::StrafeRight => self.step(self.player.strafe_delta(step)),
            GameAction::TurnLeft => self.player.rotate(-turn),
            GameAction::TurnRight => self.player.rotate(turn),
            GameAction::Fire => self.fire(),
            GameAction::SelectWeapon(mode) => {
                if self.player.weapon != mode {
                    self.player.weapon = mode;
                    self.notify(format!("Weapon: {}", mode.as_str()));
                }
            }
            GameAction::Wait => {}
            GameAction::Pause | GameAction::ToggleMap | GameAction::Restart => return false,
        }

        self.tick();
        true
    }

    /// Move the player, opening a door that blocks the way when possible.
    fn step(&mut self, (dx, dy): (f32, f32)) {
        let tx = (self.player.x + dx).floor() as i32;
        let ty = (self.player.y + dy).floor() as i32;
        let closed_door = self.level.door_at(tx, ty).map(|d| !d.opened).unwrap_or(false);
        if closed_door {
            let has_key = self.player.has_keycard();
            if self.level.open_door(tx, ty, has_key) {
                self.notify("Door opened".to_string());
            } else {
                self.notify("Locked - find a keycard".to_string());
            }
        }
        self.player.try_move(dx, dy, &self.level.grid);
    }

    fn fire(&mut self) {
        if !self.player.shoot() {
            self.notify("Out of ammo".to_string());
            return;
        }
        let weapon = self.player.weapon;
        match weapon {
            WeaponMode::Rocket => {
                let rocket = Projectile::aimed(
                    self.player.x,
                    self.player.y,
                    self.player.angle,
                    self.config.player.rocket_speed,
                    weapon.damage(),
                    ROCKET_TTL,
                )
                .with_splash(self.config.player.rocket_splash);
                self.projectiles.push(rocket);
            }
            WeaponMode::Pistol | WeaponMode::Shotgun => self.hitscan(weapon),
        }
    }

    /// Instant hit on enemies inside the weapon cone with a clear line of sight.
    fn hitscan(&mut self, weapon: WeaponMode) {
        let (px, py, facing) = (self.player.x, self.player.y, self.player.angle);
        let mut targets: Vec<(usize, f32)> = self
            .level
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alive)
            .filter_map(|(i, e)| {
                let dist = e.distance_to(px, py);
                if dist > weapon.range() {
                    return None;
                }
                if dist <= f32::EPSILON {
                    return Some((i, 0.0));
                }
                let bearing = normalize_bearing((e.y - py).atan2(e.x - px) - facing);
                let tolerance = weapon.cone() + (TARGET_HALF_WIDTH / dist).atan();
                let visible = bearing.abs() <= tolerance
                    && self
                        .caster
                        .has_line_of_sight(&self.level.grid, (px, py), (e.x, e.y));
                visible.then_some((i, dist))
            })
            .collect();
        targets.sort_by(|a, b| a.1.total_cmp(&b.1));
        if weapon == WeaponMode::Pistol {
            targets.truncate(1);
        }

        for (i, _) in targets {
            self.damage_enemy(i, weapon.damage());
        }
    }

    fn damage_enemy(&mut self, index: usize, damage: i32) {
        let Some(enemy) = self.level.enemies.get_mut(index) else {
            return;
        };
        if enemy.take_damage(damage) {
            let kind = enemy.kind;
            self.on_kill(kind);
        }
    }

    fn on_kill(&mut self, kind: EnemyKind) {
        self.kills += 1;
        self.player.score += kind.score_value();
        for done in self.level.advance_objective(ObjectiveKind::Kill, 1) {
            self.notify(format!("Objective complete: {}", done.description()));
        }
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) {
        self.ticks += 1;
        for n in self.notifications.iter_mut() {
            n.ttl = n.ttl.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl > 0);
        self.recent_hit = self
            .recent_hit
            .map(|h| RecentHit {
                age: h.age + 1,
                ..h
            })
            .filter(|h| h.age <= HIT_MEMORY_TICKS);

        for done in self.level.advance_objective(ObjectiveKind::Survive, 1) {
            self.notify(format!("Objective complete: {}", done.description()));
        }

        let report = self.ai.update(
            &mut self.level.enemies,
            self.player.position(),
            &self.level.grid,
            &mut self.rng,
        );
        for hit in &report.hits {
            self.player.take_damage(hit.damage);
            self.recent_hit = Some(RecentHit {
                direction: hit.direction,
                age: 0,
            });
        }

        self.advance_projectiles();
        self.collect_pickups();

        if self.ticks % SCORE_TICK_INTERVAL == 0 {
            self.player.score += 1;
        }

        if self.level.refresh_exits() {
            self.notify("Exit active".to_string());
        }

        if self.player.is_dead() {
            self.game_over = true;
            info!(
                "player died on level {} at tick {} with score {}",
                self.level.index, self.ticks, self.player.score
            );
            self.notify("You died - press r to restart".to_string());
            return;
        }

        if self.level.is_active_exit_at(self.player.x, self.player.y) {
            self.player.score += LEVEL_CLEAR_BONUS;
            let next = self.level.index + 1;
            self.load_level(next);
        }
    }

    fn advance_projectiles(&mut self) {
        let mut blasts = Vec::new();
        for p in self.projectiles.iter_mut() {
            p.advance(&self.level.grid);
            let struck = self
                .level
                .enemies
                .iter()
                .any(|e| e.alive && p.distance_to(e.x, e.y) <= PROJECTILE_HIT_RADIUS);
            if struck || !p.alive {
                p.alive = false;
                blasts.push((p.x, p.y, p.damage, p.splash.max(PROJECTILE_HIT_RADIUS)));
            }
        }
        self.projectiles.retain(|p| p.alive);

        for (bx, by, damage, radius) in blasts {
            let caught: Vec<usize> = self
                .level
                .enemies
                .iter()
                .enumerate()
                .filter(|(_, e)| e.alive && e.distance_to(bx, by) <= radius)
                .map(|(i, _)| i)
                .collect();
            for i in caught {
                self.damage_enemy(i, damage);
            }
        }
    }

    fn collect_pickups(&mut self) {
        let (px, py) = self.player.position();
        let mut taken = Vec::new();
        for p in self.level.pickups.iter_mut() {
            if !p.taken && p.distance_to(px, py) <= PICKUP_RADIUS && p.take() {
                taken.push((p.kind, p.amount));
            }
        }

        for (kind, amount) in taken {
            match kind {
                PickupKind::Health => self.player.heal(amount),
                PickupKind::Ammo => self.player.add_ammo(amount),
                PickupKind::Keycard => self.player.keycards += 1,
            }
            self.player.score += PICKUP_SCORE;
            let text = match kind {
                PickupKind::Keycard => "Picked up a keycard".to_string(),
                _ => format!("+{} {}", amount, kind.as_str()),
            };
            self.notify(text);
            for done in self.level.advance_objective(ObjectiveKind::Collect, 1) {
                self.notify(format!("Objective complete: {}", done.description()));
            }
        }
    }

    fn load_level(&mut self, index: u32) {
        self.level = self.generator.generate(index, self.seed);
        self.player.x = self.level.spawn.0;
        self.player.y = self.level.spawn.1;
        self.player.angle = 0.0;
        self.player.keycards = 0;
        self.projectiles.clear();
        self.recent_hit = None;
        self.level_epoch += 1;
        info!(
            "entered level {} ({}) with score {}",
            index,
            self.level.theme.as_str(),
            self.player.score
        );
        self.notify(format!("Level {} - {}", index, self.level.theme.as_str()));
    }

    /// Start over from the first level with a fresh player.
    pub fn restart(&mut self) {
        self.player = Player::new(0.0, 0.0, 0.0, &self.config.player);
        self.ticks = 0;
        self.kills = 0;
        self.paused = false;
        self.game_over = false;
        self.notifications.clear();
        self.rng = SimpleRng::derive(self.seed, AI_STREAM_SALT);
        self.load_level(self.start_level);
    }

    fn notify(&mut self, text: String) {
        self.notifications.push(Notification {
            text,
            ttl: NOTIFICATION_TTL_TICKS,
        });
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}
