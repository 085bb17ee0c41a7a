//! Keyboard shortcut registry and resolution.

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Cmd on macOS.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        ..Modifiers::NONE
    };

    pub const META: Modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };

    /// Ctrl or Cmd; the two are interchangeable for editor shortcuts.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    Undo,
    Redo,
    /// Take a save checkpoint.
    Save,
    DeleteSelection,
    /// Clear the selection.
    Deselect,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    /// Ctrl (or Cmd) must be held.
    pub ctrl: bool,
    pub shift: bool,
    pub command: EditorCommand,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: EditorCommand,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl/Cmd");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Whether a key press triggers this shortcut. Letter keys match
    /// case-insensitively.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == modifiers.command() && self.shift == modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, EditorCommand::Undo, "Undo"),
            Shortcut::new("Z", true, true, EditorCommand::Redo, "Redo"),
            Shortcut::new("Y", true, false, EditorCommand::Redo, "Redo"),
            Shortcut::new("S", true, false, EditorCommand::Save, "Save"),
            Shortcut::new("Delete", false, false, EditorCommand::DeleteSelection, "Delete selected element"),
            Shortcut::new("Backspace", false, false, EditorCommand::DeleteSelection, "Delete selected element"),
            Shortcut::new("Escape", false, false, EditorCommand::Deselect, "Clear selection"),
        ]
    }

    /// Find the command bound to a key press.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<EditorCommand> {
        if modifiers.alt {
            return None;
        }
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_bindings() {
        assert_eq!(ShortcutRegistry::resolve("z", Modifiers::CTRL), Some(EditorCommand::Undo));
        assert_eq!(ShortcutRegistry::resolve("Z", Modifiers::CTRL_SHIFT), Some(EditorCommand::Redo));
        assert_eq!(ShortcutRegistry::resolve("y", Modifiers::CTRL), Some(EditorCommand::Redo));
        assert_eq!(ShortcutRegistry::resolve("s", Modifiers::CTRL), Some(EditorCommand::Save));
    }

    #[test]
    fn test_cmd_equals_ctrl() {
        assert_eq!(ShortcutRegistry::resolve("z", Modifiers::META), Some(EditorCommand::Undo));
        let cmd_shift = Modifiers {
            shift: true,
            ..Modifiers::META
        };
        assert_eq!(ShortcutRegistry::resolve("z", cmd_shift), Some(EditorCommand::Redo));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(ShortcutRegistry::resolve("z", Modifiers::NONE), None);
        assert_eq!(ShortcutRegistry::resolve("q", Modifiers::CTRL), None);
        let ctrl_alt = Modifiers {
            alt: true,
            ..Modifiers::CTRL
        };
        assert_eq!(ShortcutRegistry::resolve("z", ctrl_alt), None);
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(ShortcutRegistry::resolve("Delete", Modifiers::NONE), Some(EditorCommand::DeleteSelection));
        assert_eq!(ShortcutRegistry::resolve("Escape", Modifiers::NONE), Some(EditorCommand::Deselect));
    }

    #[test]
    fn test_format() {
        let redo = &ShortcutRegistry::all()[1];
        assert_eq!(redo.format(), "Ctrl/Cmd+Shift+Z");
    }
}
