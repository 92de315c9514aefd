//! Focusable-element rules, the modal focus trap and keyboard focus styling.

use crate::page::PageState;

/// Selector matching every element that takes part in the focus trap.
pub const FOCUSABLE_SELECTOR: &str =
    "button, [href], input, select, textarea, [tabindex]:not([tabindex=\"-1\"])";

/// Body class present while the user navigates with the keyboard.
pub const KEYBOARD_NAV_CLASS: &str = "keyboard-nav";

/// The attributes of an element that decide whether it is tabbable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusCandidate {
    pub tag: String,
    pub has_href: bool,
    pub tabindex: Option<i32>,
    pub disabled: bool,
}

impl FocusCandidate {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            has_href: false,
            tabindex: None,
            disabled: false,
        }
    }

    #[must_use]
    pub const fn with_href(mut self) -> Self {
        self.has_href = true;
        self
    }

    #[must_use]
    pub const fn with_tabindex(mut self, tabindex: i32) -> Self {
        self.tabindex = Some(tabindex);
        self
    }

    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Mirrors [`FOCUSABLE_SELECTOR`], minus disabled controls the browser skips.
    #[must_use]
    pub fn is_tabbable(&self) -> bool {
        if self.tabindex == Some(-1) {
            return false;
        }
        let tag = self.tag.to_ascii_lowercase();
        let control = matches!(tag.as_str(), "button" | "input" | "select" | "textarea");
        if control {
            return !self.disabled;
        }
        self.has_href || self.tabindex.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    Forward,
    Backward,
}

impl TabDirection {
    #[must_use]
    pub const fn from_shift(shift: bool) -> Self {
        if shift { Self::Backward } else { Self::Forward }
    }
}

/// What the shell should do with a Tab keypress inside the trap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrapAction<T> {
    /// Let the browser move focus.
    Default,
    /// Cancel the keypress and focus this element instead.
    MoveTo(T),
}

/// Decide how a Tab press wraps within `items`.
///
/// Forward from the last item goes to the first and backward from the first
/// goes to the last. When focus sits outside the set (on `<body>` after a
/// click on plain content, say) it is pulled back to the near end for the
/// direction. Any other position inside the set keeps browser order. An empty
/// set is left alone.
pub fn trap_tab<T>(items: &[T], active: Option<&T>, direction: TabDirection) -> TrapAction<T>
where
    T: PartialEq + Clone,
{
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return TrapAction::Default;
    };
    let inside = active.is_some_and(|active| items.contains(active));
    match direction {
        TabDirection::Forward if !inside || active == Some(last) => {
            TrapAction::MoveTo(first.clone())
        }
        TabDirection::Backward if !inside || active == Some(first) => {
            TrapAction::MoveTo(last.clone())
        }
        _ => TrapAction::Default,
    }
}

/// Tracks whether the last interaction came from the keyboard or a pointer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FocusModality;

impl FocusModality {
    /// A Tab keydown switches the page to keyboard focus styling.
    /// Returns true when the page state changed.
    pub fn on_keydown(self, key: &str, page: &mut PageState) -> bool {
        if key == "Tab" {
            page.set_keyboard_nav(true)
        } else {
            false
        }
    }

    pub fn on_pointer_down(self, page: &mut PageState) -> bool {
        page.set_keyboard_nav(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_tabindex_is_excluded() {
        assert!(!FocusCandidate::new("button").with_tabindex(-1).is_tabbable());
        assert!(FocusCandidate::new("div").with_tabindex(0).is_tabbable());
        assert!(!FocusCandidate::new("div").is_tabbable());
        assert!(FocusCandidate::new("a").with_href().is_tabbable());
        assert!(!FocusCandidate::new("a").is_tabbable());
        assert!(!FocusCandidate::new("INPUT").disabled().is_tabbable());
        assert!(FocusCandidate::new("Select").is_tabbable());
    }

    #[test]
    fn wraps_only_at_the_boundaries() {
        let items = ["close", "name", "send"];
        assert_eq!(
            trap_tab(&items, Some(&"send"), TabDirection::Forward),
            TrapAction::MoveTo("close")
        );
        assert_eq!(
            trap_tab(&items, Some(&"close"), TabDirection::Backward),
            TrapAction::MoveTo("send")
        );
        assert_eq!(
            trap_tab(&items, Some(&"name"), TabDirection::Forward),
            TrapAction::Default
        );
        assert_eq!(
            trap_tab(&items, Some(&"close"), TabDirection::Forward),
            TrapAction::Default
        );
    }

    #[test]
    fn single_item_traps_both_directions() {
        let items = ["close"];
        assert_eq!(
            trap_tab(&items, Some(&"close"), TabDirection::Forward),
            TrapAction::MoveTo("close")
        );
        assert_eq!(
            trap_tab(&items, Some(&"close"), TabDirection::Backward),
            TrapAction::MoveTo("close")
        );
    }

    #[test]
    fn empty_set_is_left_alone() {
        let empty: [&str; 0] = [];
        assert_eq!(
            trap_tab(&empty, Some(&"x"), TabDirection::Forward),
            TrapAction::Default
        );
        assert_eq!(trap_tab(&empty, None, TabDirection::Backward), TrapAction::Default);
    }

    #[test]
    fn focus_outside_the_set_is_pulled_back_in() {
        let items = ["close", "name", "send"];
        assert_eq!(
            trap_tab(&items, Some(&"modal-container"), TabDirection::Forward),
            TrapAction::MoveTo("close")
        );
        assert_eq!(
            trap_tab(&items, Some(&"modal-container"), TabDirection::Backward),
            TrapAction::MoveTo("send")
        );
        assert_eq!(
            trap_tab(&items, None, TabDirection::Forward),
            TrapAction::MoveTo("close")
        );
    }

    #[test]
    fn modality_follows_tab_and_pointer() {
        let mut page = PageState::new();
        let modality = FocusModality;
        assert!(!modality.on_keydown("Enter", &mut page));
        assert!(modality.on_keydown("Tab", &mut page));
        assert!(page.keyboard_nav());
        assert!(!modality.on_keydown("Tab", &mut page));
        assert!(modality.on_pointer_down(&mut page));
        assert!(!page.keyboard_nav());
    }
}
