//! Key mapping from terminal events to game actions.
//!
//! | Keys                | Action        |
//! |---------------------|---------------|
//! | `w` / Up            | forward       |
//! | `s` / Down          | back          |
//! | `a` / Left          | turn left     |
//! | `d` / Right         | turn right    |
//! | `z` / `,`           | strafe left   |
//! | `c` / `.`           | strafe right  |
//! | Space / `f`         | fire          |
//! | `1` `2` `3`         | weapon select |
//! | `x` / Enter         | wait one tick |
//! | `p` / Esc           | pause         |
//! | `m` / Tab           | toggle map    |
//! | `r`                 | restart       |
//! | `q` / Ctrl-C        | quit          |

use crate::types::{GameAction, WeaponMode};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions. Unknown keys yield `None`.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(GameAction::MoveForward),
        KeyCode::Down | KeyCode::Char('s') => Some(GameAction::MoveBack),
        KeyCode::Left | KeyCode::Char('a') => Some(GameAction::TurnLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(GameAction::TurnRight),
        KeyCode::Char('z') | KeyCode::Char(',') => Some(GameAction::StrafeLeft),
        KeyCode::Char('c') | KeyCode::Char('.') => Some(GameAction::StrafeRight),

        KeyCode::Char(' ') | KeyCode::Char('f') => Some(GameAction::Fire),
        KeyCode::Char('1') => Some(GameAction::SelectWeapon(WeaponMode::Pistol)),
        KeyCode::Char('2') => Some(GameAction::SelectWeapon(WeaponMode::Shotgun)),
        KeyCode::Char('3') => Some(GameAction::SelectWeapon(WeaponMode::Rocket)),
        KeyCode::Char('x') | KeyCode::Enter => Some(GameAction::Wait),

        KeyCode::Char('p') | KeyCode::Esc => Some(GameAction::Pause),
        KeyCode::Char('m') | KeyCode::Tab => Some(GameAction::ToggleMap),
        KeyCode::Char('r') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(key(KeyCode::Up), Some(GameAction::MoveForward));
        assert_eq!(key(KeyCode::Char('W')), Some(GameAction::MoveForward));
        assert_eq!(key(KeyCode::Down), Some(GameAction::MoveBack));
        assert_eq!(key(KeyCode::Left), Some(GameAction::TurnLeft));
        assert_eq!(key(KeyCode::Char('d')), Some(GameAction::TurnRight));
        assert_eq!(key(KeyCode::Char(',')), Some(GameAction::StrafeLeft));
        assert_eq!(key(KeyCode::Char('C')), Some(GameAction::StrafeRight));
    }

    #[test]
    fn test_combat_keys() {
        assert_eq!(key(KeyCode::Char(' ')), Some(GameAction::Fire));
        assert_eq!(
            key(KeyCode::Char('3')),
            Some(GameAction::SelectWeapon(WeaponMode::Rocket))
        );
        assert_eq!(key(KeyCode::Enter), Some(GameAction::Wait));
    }

    #[test]
    fn test_meta_keys() {
        assert_eq!(key(KeyCode::Char('p')), Some(GameAction::Pause));
        assert_eq!(key(KeyCode::Tab), Some(GameAction::ToggleMap));
        assert_eq!(key(KeyCode::Char('r')), Some(GameAction::Restart));
    }

    #[test]
    fn test_unknown_and_released_keys_are_ignored() {
        assert_eq!(key(KeyCode::Char('?')), None);
        assert_eq!(key(KeyCode::F(5)), None);
        let released = KeyEvent {
            code: KeyCode::Char('w'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(released), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(should_quit(ctrl_c));
        // Ctrl-C must not also strafe.
        assert_eq!(handle_key_event(ctrl_c), None);
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
