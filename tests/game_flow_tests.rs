//! Game flow through `GameState::apply_action`.

use glyphcast::core::{Door, Enemy, Exit, GameState, Grid, Level, Objective, Pickup};
use glyphcast::types::{
    EnemyConfig, EnemyKind, GameAction, GameConfig, ObjectiveKind, PickupKind, WeaponMode,
};

fn state_on(rows: &[&str], spawn: (f32, f32), config: GameConfig) -> GameState {
    let level = Level::from_grid(Grid::from_rows(rows).unwrap(), spawn);
    GameState::from_level(11, config, level)
}

fn wide_hall() -> GameState {
    state_on(
        &[
            "##########",
            "#........#",
            "#........#",
            "#........#",
            "##########",
        ],
        (1.5, 2.5),
        GameConfig::default(),
    )
}

fn add_enemy(game: &mut GameState, kind: EnemyKind, x: f32, y: f32) {
    let cfg = game.config().enemies.clone();
    game.level_mut().enemies.push(Enemy::new(kind, x, y, &cfg));
}

#[test]
fn shotgun_hits_every_target_in_its_cone() {
    let mut game = wide_hall();
    add_enemy(&mut game, EnemyKind::Runner, 4.5, 2.1);
    add_enemy(&mut game, EnemyKind::Runner, 4.5, 2.9);
    game.apply_action(GameAction::SelectWeapon(WeaponMode::Shotgun));
    let ammo = game.player().ammo;

    game.apply_action(GameAction::Fire);
    assert_eq!(game.kills(), 2);
    assert_eq!(game.player().ammo, ammo - WeaponMode::Shotgun.ammo_cost());
    assert_eq!(game.player().score, 2 * EnemyKind::Runner.score_value());
}

#[test]
fn pistol_hits_only_the_nearest_target() {
    let mut game = wide_hall();
    add_enemy(&mut game, EnemyKind::Runner, 4.5, 2.5);
    add_enemy(&mut game, EnemyKind::Runner, 6.5, 2.5);

    game.apply_action(GameAction::Fire);
    let damaged: Vec<bool> = game
        .enemies()
        .iter()
        .map(|e| e.health < EnemyKind::Runner.base_health())
        .collect();
    assert_eq!(damaged, vec![true, false]);
}

#[test]
fn rocket_splash_catches_a_cluster() {
    let mut game = wide_hall();
    add_enemy(&mut game, EnemyKind::Runner, 7.5, 2.3);
    add_enemy(&mut game, EnemyKind::Runner, 7.5, 2.7);
    game.apply_action(GameAction::SelectWeapon(WeaponMode::Rocket));
    game.apply_action(GameAction::Fire);
    assert_eq!(game.projectiles().len(), 1);

    for _ in 0..20 {
        if game.kills() == 2 {
            break;
        }
        game.apply_action(GameAction::Wait);
    }
    assert_eq!(game.kills(), 2);
    assert!(game.projectiles().is_empty());
}

#[test]
fn shooter_telegraphs_then_hits_the_player() {
    let config = GameConfig {
        enemies: EnemyConfig {
            fire_chance: 1.0,
            ..EnemyConfig::default()
        },
        ..GameConfig::default()
    };
    let mut game = state_on(&["########", "#......#", "########"], (1.5, 1.5), config);
    add_enemy(&mut game, EnemyKind::Shooter, 5.5, 1.5);
    let start = game.player().health;

    let mut telegraphed = false;
    let mut hit = false;
    for _ in 0..40 {
        game.apply_action(GameAction::Wait);
        telegraphed |= game.enemies()[0].glyph() == '!';
        hit |= game.recent_hit().is_some();
    }
    assert!(telegraphed);
    assert!(hit);
    assert!(game.player().health < start);
}

#[test]
fn keycard_on_the_way_opens_the_door() {
    let mut game = state_on(
        &["#######", "#..|..#", "#######"],
        (1.5, 1.5),
        GameConfig::default(),
    );
    game.level_mut().doors.push(Door::new(3, 1, true));
    game.level_mut()
        .pickups
        .push(Pickup::new(PickupKind::Keycard, (2, 1), 1));

    for _ in 0..10 {
        game.apply_action(GameAction::MoveForward);
    }
    assert_eq!(game.player().keycards, 1);
    assert!(game.level().doors[0].opened);
    assert!(game.player().x > 3.0);
}

#[test]
fn completing_the_collect_objective_activates_the_exit() {
    let mut game = state_on(&["######", "#...>#", "######"], (1.5, 1.5), GameConfig::default());
    game.level_mut().exits.push(Exit::new(4, 1));
    game.level_mut()
        .objectives
        .push(Objective::new(ObjectiveKind::Collect, 1));
    game.level_mut()
        .pickups
        .push(Pickup::new(PickupKind::Ammo, (2, 1), 5));
    game.take_notifications();

    game.apply_action(GameAction::Wait);
    assert!(!game.level().exits[0].active);

    for _ in 0..3 {
        game.apply_action(GameAction::MoveForward);
    }
    assert!(game.level().exits[0].active);
    let texts: Vec<String> = game.take_notifications().into_iter().map(|n| n.text).collect();
    assert!(texts.iter().any(|t| t == "Exit active"), "{texts:?}");
}

#[test]
fn same_seed_and_actions_replay_identically() {
    let script = [
        GameAction::MoveForward,
        GameAction::TurnRight,
        GameAction::MoveForward,
        GameAction::Fire,
        GameAction::StrafeLeft,
        GameAction::Wait,
        GameAction::TurnLeft,
        GameAction::MoveBack,
    ];
    let run = || {
        let mut game = GameState::new(2024);
        for _ in 0..25 {
            for action in script {
                game.apply_action(action);
            }
        }
        (
            game.player().clone(),
            game.ticks(),
            game.kills(),
            game.level().index,
        )
    };
    assert_eq!(run(), run());
}

#[test]
fn paused_game_ignores_actions() {
    let mut game = wide_hall();
    game.apply_action(GameAction::Pause);
    for action in [GameAction::MoveForward, GameAction::Fire, GameAction::Wait] {
        assert!(!game.apply_action(action));
    }
    assert_eq!(game.ticks(), 0);
}
