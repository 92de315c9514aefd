//! Mobile navigation menu.

use serde::{Deserialize, Serialize};

/// Class on the nav list while the menu is open.
pub const MENU_ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileMenu {
    expanded: bool,
}

impl MobileMenu {
    #[must_use]
    pub const fn new(expanded: bool) -> Self {
        Self { expanded }
    }

    #[must_use]
    pub const fn expanded(&self) -> bool {
        self.expanded
    }

    #[must_use]
    pub const fn aria_expanded(&self) -> &'static str {
        if self.expanded { "true" } else { "false" }
    }

    /// Flip the menu, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// A link inside the menu was followed.
    pub fn link_activated(&mut self) -> bool {
        self.collapse()
    }

    /// A click anywhere in the document; only clicks outside the nav collapse.
    pub fn document_click(&mut self, inside_nav: bool) -> bool {
        if inside_nav { false } else { self.collapse() }
    }

    fn collapse(&mut self) -> bool {
        let changed = self.expanded;
        self.expanded = false;
        changed
    }
}
