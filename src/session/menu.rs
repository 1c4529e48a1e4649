//! Pre-capture menu state machine.

use crate::display::Key;

/// Where the user is in the pre-capture menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    /// Instructions screen, waiting for `p`, `v` or Enter
    #[default]
    Menu,
    /// Showing the pose reference image
    PreviewingPose,
    /// Showing the live camera feed
    PreviewingFeed,
    /// Enter pressed on the menu; capture starts
    Confirmed,
    /// `q`/Esc pressed on the menu; nothing is captured
    Aborted,
}

impl MenuState {
    /// Next state after `key`. Unrecognized keys leave the state unchanged.
    pub fn on_key(self, key: Key) -> MenuState {
        match (self, key) {
            (MenuState::Menu, Key::Char('p')) => MenuState::PreviewingPose,
            (MenuState::Menu, Key::Char('v')) => MenuState::PreviewingFeed,
            (MenuState::Menu, Key::Enter) => MenuState::Confirmed,
            (MenuState::Menu, k) if k.is_quit() => MenuState::Aborted,
            (MenuState::PreviewingPose | MenuState::PreviewingFeed, k)
                if k.is_confirm() || k.is_quit() =>
            {
                MenuState::Menu
            }
            (state, _) => state,
        }
    }

    /// Whether the menu loop is over.
    pub fn is_terminal(self) -> bool {
        matches!(self, MenuState::Confirmed | MenuState::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_preview_returns_to_menu() {
        let state = MenuState::Menu.on_key(Key::Char('p'));
        assert_eq!(state, MenuState::PreviewingPose);
        let state = state.on_key(Key::Enter);
        assert_eq!(state, MenuState::Menu);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_feed_preview_returns_to_menu() {
        let state = MenuState::Menu.on_key(Key::Char('v'));
        assert_eq!(state, MenuState::PreviewingFeed);
        assert_eq!(state.on_key(Key::Enter), MenuState::Menu);
        assert_eq!(state.on_key(Key::Char('q')), MenuState::Menu);
        assert_eq!(state.on_key(Key::Escape), MenuState::Menu);
    }

    #[test]
    fn test_enter_confirms_directly() {
        let state = MenuState::default().on_key(Key::Enter);
        assert_eq!(state, MenuState::Confirmed);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_quit_from_menu_aborts() {
        assert_eq!(MenuState::Menu.on_key(Key::Escape), MenuState::Aborted);
        assert_eq!(MenuState::Menu.on_key(Key::Char('q')), MenuState::Aborted);
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(MenuState::Menu.on_key(Key::Char('x')), MenuState::Menu);
        assert_eq!(
            MenuState::PreviewingPose.on_key(Key::Char('v')),
            MenuState::PreviewingPose
        );
        assert_eq!(
            MenuState::PreviewingFeed.on_key(Key::Char('p')),
            MenuState::PreviewingFeed
        );
    }

    #[test]
    fn test_terminal_states_are_sticky() {
        for key in [Key::Enter, Key::Char('p'), Key::Char('v'), Key::Escape] {
            assert_eq!(MenuState::Confirmed.on_key(key), MenuState::Confirmed);
            assert_eq!(MenuState::Aborted.on_key(key), MenuState::Aborted);
        }
    }
}
