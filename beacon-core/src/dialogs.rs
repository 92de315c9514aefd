//! Lightweight class-toggled dialogs.
//!
//! Unlike the focus-trapping modal, these dialogs only carry an `active`
//! class. Any number may be open; clicking a dialog's own backdrop closes it
//! and Escape closes all of them.

/// Class marking an open dialog.
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Default)]
pub struct DialogRegistry {
    active: Vec<String>,
}

impl DialogRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a dialog active. Returns false when it already was.
    pub fn open(&mut self, id: &str) -> bool {
        if self.is_active(id) {
            return false;
        }
        self.active.push(id.to_string());
        true
    }

    /// Returns false when the dialog was not active.
    pub fn close(&mut self, id: &str) -> bool {
        let before = self.active.len();
        self.active.retain(|open| open != id);
        self.active.len() != before
    }

    /// A click whose target is the dialog element itself (its backdrop).
    pub fn backdrop_click(&mut self, id: &str) -> bool {
        self.close(id)
    }

    /// Close every active dialog, returning their ids in activation order.
    pub fn escape(&mut self) -> Vec<String> {
        std::mem::take(&mut self.active)
    }

    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|open| open == id)
    }

    #[must_use]
    pub fn active(&self) -> &[String] {
        &self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_close_are_idempotent() {
        let mut dialogs = DialogRegistry::new();
        assert!(dialogs.open("terms"));
        assert!(!dialogs.open("terms"));
        assert!(dialogs.close("terms"));
        assert!(!dialogs.close("terms"));
    }

    #[test]
    fn escape_closes_everything_in_order() {
        let mut dialogs = DialogRegistry::new();
        dialogs.open("a");
        dialogs.open("b");
        assert_eq!(dialogs.escape(), vec!["a".to_string(), "b".to_string()]);
        assert!(dialogs.active().is_empty());
        assert!(dialogs.escape().is_empty());
    }

    #[test]
    fn backdrop_click_closes_only_that_dialog() {
        let mut dialogs = DialogRegistry::new();
        dialogs.open("a");
        dialogs.open("b");
        assert!(dialogs.backdrop_click("a"));
        assert!(!dialogs.is_active("a"));
        assert!(dialogs.is_active("b"));
    }
}
