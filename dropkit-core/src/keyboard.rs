//! Keyboard navigation over the rendered menu
//!
//! The navigator keeps no index of its own. The current position is whatever
//! item holds input focus, read back from the [`FocusModel`] on every key, so
//! it can never drift from what the user sees (mouse hover-focus, programmatic
//! focus and tabbing all count).

use tracing::trace;

/// Keys with menu semantics, named after `KeyboardEvent.key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Escape,
    ArrowDown,
    ArrowUp,
    Home,
    End,
    Enter,
    Space,
    Tab,
}

impl NavKey {
    /// Parse a `KeyboardEvent.key` value. Keys without menu semantics are `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" | "Esc" => Some(Self::Escape),
            "ArrowDown" | "Down" => Some(Self::ArrowDown),
            "ArrowUp" | "Up" => Some(Self::ArrowUp),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            "Enter" => Some(Self::Enter),
            " " | "Spacebar" => Some(Self::Space),
            "Tab" => Some(Self::Tab),
            _ => None,
        }
    }

    /// Whether the browser default should be suppressed while the menu is open.
    /// Tab keeps its default so focus moves on to the next tabbable element.
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Self::Tab)
    }
}

/// Live view of the navigable items in the open menu.
///
/// Indices are positions in the navigable sequence (non-disabled,
/// non-divider items as rendered), not in the caller's item list.
pub trait FocusModel {
    /// Number of navigable items currently rendered
    fn item_count(&self) -> usize;
    /// Index of the navigable item holding input focus, if any
    fn focused_index(&self) -> Option<usize>;
    /// Move input focus to the navigable item at `index`
    fn focus(&mut self, index: usize);
}

/// What the caller has to do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    /// Focus moved to this navigable index
    Focused(usize),
    /// Activate the navigable item at this index
    Select(usize),
    /// Dismiss the menu
    Close,
}

/// Handle a key pressed anywhere in the document while the menu may be open.
pub fn handle_menu_key(is_open: bool, key: NavKey, focus: &mut impl FocusModel) -> KeyOutcome {
    if !is_open {
        return KeyOutcome::Ignored;
    }

    let count = focus.item_count();
    let current = focus.focused_index();

    let target = match key {
        NavKey::Escape | NavKey::Tab => return KeyOutcome::Close,
        NavKey::Enter | NavKey::Space => {
            return match current {
                Some(index) => KeyOutcome::Select(index),
                None => KeyOutcome::Ignored,
            };
        }
        _ if count == 0 => return KeyOutcome::Ignored,
        NavKey::ArrowDown => match current {
            Some(index) if index + 1 < count => index + 1,
            _ => 0,
        },
        NavKey::ArrowUp => match current {
            Some(index) if index > 0 => index - 1,
            _ => count - 1,
        },
        NavKey::Home => 0,
        NavKey::End => count - 1,
    };

    trace!(?key, ?current, target, "Moving menu focus");
    focus.focus(target);
    KeyOutcome::Focused(target)
}

/// Focus the first navigable item, as done once the menu has mounted.
pub fn focus_first(focus: &mut impl FocusModel) -> Option<usize> {
    if focus.item_count() == 0 {
        return None;
    }
    focus.focus(0);
    Some(0)
}

/// Action for a key pressed on the trigger itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKeyAction {
    Toggle,
    Open,
}

/// Enter/Space toggle from the trigger; ArrowDown opens a closed menu.
pub fn handle_trigger_key(is_open: bool, key: NavKey) -> Option<TriggerKeyAction> {
    match key {
        NavKey::Enter | NavKey::Space => Some(TriggerKeyAction::Toggle),
        NavKey::ArrowDown if !is_open => Some(TriggerKeyAction::Open),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal focus model: `count` items, focus stored as an index
    struct Items {
        count: usize,
        focused: Option<usize>,
    }

    impl FocusModel for Items {
        fn item_count(&self) -> usize {
            self.count
        }

        fn focused_index(&self) -> Option<usize> {
            self.focused
        }

        fn focus(&mut self, index: usize) {
            self.focused = Some(index);
        }
    }

    fn items(count: usize, focused: Option<usize>) -> Items {
        Items { count, focused }
    }

    #[test]
    fn test_arrow_down_wraps() {
        let mut focus = items(3, Some(2));
        assert_eq!(
            handle_menu_key(true, NavKey::ArrowDown, &mut focus),
            KeyOutcome::Focused(0)
        );
    }

    #[test]
    fn test_arrow_up_wraps() {
        let mut focus = items(3, Some(0));
        assert_eq!(
            handle_menu_key(true, NavKey::ArrowUp, &mut focus),
            KeyOutcome::Focused(2)
        );
    }

    #[test]
    fn test_arrows_from_no_focus() {
        let mut focus = items(3, None);
        assert_eq!(
            handle_menu_key(true, NavKey::ArrowDown, &mut focus),
            KeyOutcome::Focused(0)
        );
        let mut focus = items(3, None);
        assert_eq!(
            handle_menu_key(true, NavKey::ArrowUp, &mut focus),
            KeyOutcome::Focused(2)
        );
    }

    #[test]
    fn test_home_end() {
        let mut focus = items(4, Some(1));
        assert_eq!(
            handle_menu_key(true, NavKey::End, &mut focus),
            KeyOutcome::Focused(3)
        );
        assert_eq!(
            handle_menu_key(true, NavKey::Home, &mut focus),
            KeyOutcome::Focused(0)
        );
    }

    #[test]
    fn test_enter_selects_focused() {
        let mut focus = items(3, Some(1));
        assert_eq!(
            handle_menu_key(true, NavKey::Enter, &mut focus),
            KeyOutcome::Select(1)
        );
        assert_eq!(
            handle_menu_key(true, NavKey::Space, &mut focus),
            KeyOutcome::Select(1)
        );
    }

    #[test]
    fn test_enter_without_focus_is_ignored() {
        let mut focus = items(3, None);
        assert_eq!(
            handle_menu_key(true, NavKey::Enter, &mut focus),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn test_escape_and_tab_close() {
        let mut focus = items(3, Some(0));
        assert_eq!(
            handle_menu_key(true, NavKey::Escape, &mut focus),
            KeyOutcome::Close
        );
        assert_eq!(
            handle_menu_key(true, NavKey::Tab, &mut focus),
            KeyOutcome::Close
        );
        assert!(NavKey::Escape.prevents_default());
        assert!(!NavKey::Tab.prevents_default());
    }

    #[test]
    fn test_closed_menu_ignores_keys() {
        let mut focus = items(3, Some(0));
        assert_eq!(
            handle_menu_key(false, NavKey::Escape, &mut focus),
            KeyOutcome::Ignored
        );
        assert_eq!(
            handle_menu_key(false, NavKey::ArrowDown, &mut focus),
            KeyOutcome::Ignored
        );
        assert_eq!(focus.focused, Some(0));
    }

    #[test]
    fn test_empty_menu_ignores_movement() {
        let mut focus = items(0, None);
        assert_eq!(
            handle_menu_key(true, NavKey::ArrowDown, &mut focus),
            KeyOutcome::Ignored
        );
        assert_eq!(focus_first(&mut focus), None);
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(NavKey::from_key(" "), Some(NavKey::Space));
        assert_eq!(NavKey::from_key("ArrowDown"), Some(NavKey::ArrowDown));
        assert_eq!(NavKey::from_key("a"), None);
    }

    #[test]
    fn test_trigger_keys() {
        assert_eq!(
            handle_trigger_key(false, NavKey::Enter),
            Some(TriggerKeyAction::Toggle)
        );
        assert_eq!(
            handle_trigger_key(false, NavKey::ArrowDown),
            Some(TriggerKeyAction::Open)
        );
        assert_eq!(handle_trigger_key(true, NavKey::ArrowDown), None);
        assert_eq!(handle_trigger_key(false, NavKey::Escape), None);
    }
}
