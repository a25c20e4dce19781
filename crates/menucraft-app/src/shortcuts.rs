//! Keyboard shortcut registry and dispatch.

use menucraft_core::{Editor, KeyPress};

/// Editor command a shortcut triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    DeleteSelected,
    Duplicate,
    ClearSelection,
}

/// A keyboard shortcut definition.
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

    /// Whether `press` triggers this shortcut. Letter keys match either case;
    /// Cmd counts as Ctrl.
    pub fn matches(&self, press: &KeyPress) -> bool {
        press.key.eq_ignore_ascii_case(self.key)
            && press.modifiers.command() == self.ctrl
            && press.modifiers.shift == self.shift
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
            Shortcut::new("Y", true, false, ShortcutAction::Redo, "Redo"),
            Shortcut::new("D", true, false, ShortcutAction::Duplicate, "Duplicate selected object"),
            Shortcut::new(
                "Delete",
                false,
                false,
                ShortcutAction::DeleteSelected,
                "Delete selected objects",
            ),
            Shortcut::new(
                "Backspace",
                false,
                false,
                ShortcutAction::DeleteSelected,
                "Delete selected objects",
            ),
            Shortcut::new(
                "Escape",
                false,
                false,
                ShortcutAction::ClearSelection,
                "Clear selection",
            ),
        ]
    }

    /// The action bound to `press`, if any.
    pub fn lookup(press: &KeyPress) -> Option<ShortcutAction> {
        Self::all()
            .into_iter()
            .find(|s| s.matches(press))
            .map(|s| s.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

/// Run `action` against `editor`. Returns true if anything changed.
pub fn apply_action(editor: &mut Editor, action: ShortcutAction) -> bool {
    match action {
        ShortcutAction::Undo => {
            let done = editor.undo();
            if done {
                log::info!("Undo performed");
            } else {
                log::info!("Nothing to undo");
            }
            done
        }
        ShortcutAction::Redo => {
            let done = editor.redo();
            if done {
                log::info!("Redo performed");
            } else {
                log::info!("Nothing to redo");
            }
            done
        }
        ShortcutAction::DeleteSelected => {
            if editor.selected_objects().is_empty() {
                return false;
            }
            editor.delete_selected() > 0
        }
        ShortcutAction::Duplicate => {
            let Some(id) = editor.selected_object().map(|o| o.id) else {
                return false;
            };
            editor.duplicate_object(id).is_some()
        }
        ShortcutAction::ClearSelection => {
            let had_selection = !editor.selected_objects().is_empty();
            editor.clear_selection();
            had_selection
        }
    }
}
