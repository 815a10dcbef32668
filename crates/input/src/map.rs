//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a game action.
///
/// While `game_over` is set only the restart keys (Enter, `r`) produce an
/// action, and they produce [`GameAction::Restart`]. During play Enter is
/// hard drop.
pub fn handle_key_event(key: KeyEvent, game_over: bool) -> Option<GameAction> {
    if game_over {
        return match key.code {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
            _ => None,
        };
    }

    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char(' ')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameAction::Rotate),

        KeyCode::Enter => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code), false)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(press(KeyCode::Down), Some(GameAction::SoftDrop));

        assert_eq!(press(KeyCode::Char('H')), Some(GameAction::MoveLeft));
        assert_eq!(press(KeyCode::Char('d')), Some(GameAction::MoveRight));
        assert_eq!(press(KeyCode::Char('j')), Some(GameAction::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(press(KeyCode::Up), Some(GameAction::Rotate));
        assert_eq!(press(KeyCode::Char(' ')), Some(GameAction::Rotate));
        assert_eq!(press(KeyCode::Char('W')), Some(GameAction::Rotate));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(press(KeyCode::Enter), Some(GameAction::HardDrop));
        assert_eq!(press(KeyCode::Char('p')), Some(GameAction::TogglePause));
        assert_eq!(press(KeyCode::Char('r')), Some(GameAction::Restart));
        assert_eq!(press(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_game_over_only_restarts() {
        let over = |code| handle_key_event(KeyEvent::from(code), true);
        assert_eq!(over(KeyCode::Enter), Some(GameAction::Restart));
        assert_eq!(over(KeyCode::Char('R')), Some(GameAction::Restart));
        assert_eq!(over(KeyCode::Left), None);
        assert_eq!(over(KeyCode::Char('p')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
