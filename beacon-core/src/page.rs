//! Process-wide page state.
//!
//! Scroll lock and body-level marker classes are global to the document. They
//! live here behind crate-private setters so that only the controller owning
//! a field can change it; the browser shell reads the getters and mirrors
//! them onto the DOM.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    scroll_locked: bool,
    background_inert: bool,
    keyboard_nav: bool,
    reduced_motion: bool,
}

impl PageState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether page scrolling is suppressed (owned by the modal controller).
    #[must_use]
    pub const fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Whether everything outside the open modal is inert (owned by the modal controller).
    #[must_use]
    pub const fn background_inert(&self) -> bool {
        self.background_inert
    }

    /// Whether focus styling should follow keyboard navigation.
    #[must_use]
    pub const fn keyboard_nav(&self) -> bool {
        self.keyboard_nav
    }

    #[must_use]
    pub const fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Assign the scroll lock. Returns true when the value changed.
    pub(crate) fn set_scroll_locked(&mut self, locked: bool) -> bool {
        let changed = self.scroll_locked != locked;
        self.scroll_locked = locked;
        changed
    }

    pub(crate) fn set_background_inert(&mut self, inert: bool) -> bool {
        let changed = self.background_inert != inert;
        self.background_inert = inert;
        changed
    }

    pub(crate) fn set_keyboard_nav(&mut self, active: bool) -> bool {
        let changed = self.keyboard_nav != active;
        self.keyboard_nav = active;
        changed
    }

    pub(crate) fn set_reduced_motion(&mut self, reduced: bool) -> bool {
        let changed = self.reduced_motion != reduced;
        self.reduced_motion = reduced;
        changed
    }
}
