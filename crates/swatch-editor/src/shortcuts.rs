//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser host and native tests resolve keys identically.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Edit ──
    Undo,
    Redo,
    /// Protected delete of the selected node.
    Delete,
    Duplicate,

    // ── UI ──
    TogglePalette,
    /// Close the palette, else the panel, else clear the selection.
    Dismiss,
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        // ── Modifier combos first (most specific) ──
        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "d" | "D" => Some(ShortcutAction::Duplicate),
                "k" | "K" => Some(ShortcutAction::TogglePalette),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Dismiss),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_undo_redo() {
        // Cmd+Z → Undo
        assert_eq!(
            ShortcutMap::resolve("z", false, false, false, true),
            Some(ShortcutAction::Undo)
        );
        // Ctrl+Z → Undo
        assert_eq!(
            ShortcutMap::resolve("z", true, false, false, false),
            Some(ShortcutAction::Undo)
        );
        // Cmd+Shift+Z → Redo (browsers report "Z" with shift held)
        assert_eq!(
            ShortcutMap::resolve("Z", false, true, false, true),
            Some(ShortcutAction::Redo)
        );
        // Ctrl+Y → Redo
        assert_eq!(
            ShortcutMap::resolve("y", true, false, false, false),
            Some(ShortcutAction::Redo)
        );
    }

    #[test]
    fn resolve_delete() {
        assert_eq!(
            ShortcutMap::resolve("Delete", false, false, false, false),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", false, false, false, false),
            Some(ShortcutAction::Delete)
        );
        // Cmd+Backspace is not bound
        assert_eq!(
            ShortcutMap::resolve("Backspace", false, false, false, true),
            None
        );
    }

    #[test]
    fn resolve_duplicate_and_palette() {
        assert_eq!(
            ShortcutMap::resolve("d", false, false, false, true),
            Some(ShortcutAction::Duplicate)
        );
        assert_eq!(
            ShortcutMap::resolve("k", true, false, false, false),
            Some(ShortcutAction::TogglePalette)
        );
    }

    #[test]
    fn resolve_escape() {
        assert_eq!(
            ShortcutMap::resolve("Escape", false, false, false, false),
            Some(ShortcutAction::Dismiss)
        );
    }

    #[test]
    fn resolve_unknown_key() {
        assert_eq!(ShortcutMap::resolve("q", false, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("d", false, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("k", false, true, false, true), None);
    }

    #[test]
    fn resolve_modifier_precedence() {
        assert_eq!(ShortcutMap::resolve("z", false, false, false, false), None);
        assert_eq!(
            ShortcutMap::resolve("z", false, false, false, true),
            Some(ShortcutAction::Undo)
        );
    }
}
