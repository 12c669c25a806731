//! Keyboard shortcut registry.

use crate::input::Modifiers;

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    Undo,
    Redo,
}

/// A keyboard shortcut definition.
///
/// `ctrl` means the platform command key: Ctrl, or Cmd on macOS.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: ShortcutAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        action: ShortcutAction,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Check a key press against this shortcut. Keys compare case-insensitively
    /// since browsers report `Z` while shift is held.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == modifiers.command()
            && self.shift == modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, ShortcutAction::Undo, "Undo"),
            Shortcut::new("Z", true, true, ShortcutAction::Redo, "Redo"),
        ]
    }

    /// Find the action bound to a key press, if any.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mods(ctrl: bool, meta: bool, shift: bool) -> Modifiers {
        Modifiers {
            ctrl,
            meta,
            shift,
            alt: false,
        }
    }

    #[test]
    fn test_undo_chord() {
        assert_eq!(
            ShortcutRegistry::resolve("z", mods(true, false, false)),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(
            ShortcutRegistry::resolve("z", mods(false, true, false)),
            Some(ShortcutAction::Undo)
        );
    }

    #[test]
    fn test_redo_chord() {
        assert_eq!(
            ShortcutRegistry::resolve("Z", mods(true, false, true)),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(
            ShortcutRegistry::resolve("z", mods(false, true, true)),
            Some(ShortcutAction::Redo)
        );
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(ShortcutRegistry::resolve("z", mods(false, false, false)), None);
        assert_eq!(ShortcutRegistry::resolve("y", mods(true, false, false)), None);
    }

    #[test]
    fn test_format() {
        let formatted: Vec<String> = ShortcutRegistry::all().iter().map(|s| s.format()).collect();
        assert_eq!(formatted, vec!["Ctrl+Z", "Ctrl+Shift+Z"]);
    }
}
