//! Keyboard bindings of the playground and their documentation.

/// A keyboard binding.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub while_dragging: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, while_dragging: bool, description: &'static str) -> Self {
        Self {
            key,
            while_dragging,
            description,
        }
    }

    /// Format the binding for display (e.g., "Space (dragging)").
    pub fn format(&self) -> String {
        if self.while_dragging {
            format!("{} (dragging)", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard bindings.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Space", false, "Pick up the focused tray entry or instance"),
            Shortcut::new("Enter", false, "Expand or collapse the focused instance"),
            Shortcut::new("Arrows", true, "Move to the nearest drop target"),
            Shortcut::new("Space", true, "Drop at the current target"),
            Shortcut::new("Enter", true, "Drop at the current target"),
            Shortcut::new("Escape", true, "Cancel the drag"),
        ]
    }

    /// Print all bindings to the console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("Escape", true, "").format(), "Escape (dragging)");
        assert_eq!(Shortcut::new("Enter", false, "").format(), "Enter");
    }

    #[test]
    fn test_every_binding_documented() {
        assert!(ShortcutRegistry::all().iter().all(|s| !s.description.is_empty()));
    }
}
