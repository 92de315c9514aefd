//! Modal dialog controller.
//!
//! A single modal is either closed or open. Opening locks page scroll, records
//! the trigger that opened it and sends focus to the close control; closing
//! undoes both and hands focus back to that trigger. Repeat transitions are
//! reported as [`ModalTransition::Ignored`] and leave everything untouched.

use serde::{Deserialize, Serialize};

use crate::focus::{TabDirection, TrapAction, trap_tab};
use crate::page::PageState;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalState {
    pub visible: bool,
    /// Id of the element that opened the modal, restored on close.
    pub last_focused_trigger: Option<String>,
}

/// Where focus should land after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    CloseControl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalTransition {
    Opened { focus: FocusTarget },
    Closed { return_focus: Option<String> },
    Ignored,
}

impl ModalTransition {
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// Part of the modal a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickRegion {
    Overlay,
    Content,
    CloseControl,
}

/// A keydown as seen by the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub shift: bool,
}

impl KeyInput {
    #[must_use]
    pub fn new(key: impl Into<String>, shift: bool) -> Self {
        Self {
            key: key.into(),
            shift,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome<T> {
    Transition(ModalTransition),
    Trap(TrapAction<T>),
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct ModalController {
    state: ModalState,
}

impl ModalController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &ModalState {
        &self.state
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.visible
    }

    pub fn open(&mut self, trigger_id: &str, page: &mut PageState) -> ModalTransition {
        if self.state.visible {
            log::debug!("modal already open; ignoring open from {trigger_id}");
            return ModalTransition::Ignored;
        }
        self.state.visible = true;
        self.state.last_focused_trigger = Some(trigger_id.to_string());
        page.set_scroll_locked(true);
        page.set_background_inert(true);
        ModalTransition::Opened {
            focus: FocusTarget::CloseControl,
        }
    }

    pub fn close(&mut self, page: &mut PageState) -> ModalTransition {
        if !self.state.visible {
            return ModalTransition::Ignored;
        }
        self.state.visible = false;
        page.set_scroll_locked(false);
        page.set_background_inert(false);
        ModalTransition::Closed {
            return_focus: self.state.last_focused_trigger.clone(),
        }
    }

    pub fn on_click(&mut self, region: ClickRegion, page: &mut PageState) -> ModalTransition {
        match region {
            ClickRegion::Overlay | ClickRegion::CloseControl => self.close(page),
            ClickRegion::Content => ModalTransition::Ignored,
        }
    }

    /// Route a keydown. `focusables` is only consulted for Tab while open and
    /// returns the trap set in document order plus the active element.
    pub fn on_key<T, F>(
        &mut self,
        input: &KeyInput,
        page: &mut PageState,
        focusables: F,
    ) -> KeyOutcome<T>
    where
        T: PartialEq + Clone,
        F: FnOnce() -> (Vec<T>, Option<T>),
    {
        if !self.state.visible {
            return KeyOutcome::Ignored;
        }
        match input.key.as_str() {
            "Escape" => KeyOutcome::Transition(self.close(page)),
            "Tab" => {
                let (items, active) = focusables();
                let direction = TabDirection::from_shift(input.shift);
                KeyOutcome::Trap(trap_tab(&items, active.as_ref(), direction))
            }
            _ => KeyOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_close_restores_trigger_focus() {
        let mut page = PageState::new();
        let mut modal = ModalController::new();
        assert_eq!(
            modal.open("modal-trigger", &mut page),
            ModalTransition::Opened {
                focus: FocusTarget::CloseControl
            }
        );
        assert!(page.scroll_locked());
        assert!(page.background_inert());
        assert_eq!(
            modal.close(&mut page),
            ModalTransition::Closed {
                return_focus: Some("modal-trigger".to_string())
            }
        );
        assert!(!page.scroll_locked());
        assert!(!page.background_inert());
    }

    #[test]
    fn repeat_transitions_are_ignored() {
        let mut page = PageState::new();
        let mut modal = ModalController::new();
        assert!(modal.close(&mut page).is_ignored());
        assert!(!page.scroll_locked());
        modal.open("a", &mut page);
        assert!(modal.open("b", &mut page).is_ignored());
        assert_eq!(modal.state().last_focused_trigger.as_deref(), Some("a"));
        assert!(page.scroll_locked());
    }

    #[test]
    fn content_clicks_do_not_close() {
        let mut page = PageState::new();
        let mut modal = ModalController::new();
        modal.open("t", &mut page);
        assert!(modal.on_click(ClickRegion::Content, &mut page).is_ignored());
        assert!(modal.is_open());
        assert!(!modal.on_click(ClickRegion::Overlay, &mut page).is_ignored());
        assert!(!modal.is_open());
    }

    #[test]
    fn escape_closes_only_when_open() {
        let mut page = PageState::new();
        let mut modal = ModalController::new();
        let esc = KeyInput::new("Escape", false);
        let none = || (Vec::<u8>::new(), None);
        assert_eq!(modal.on_key(&esc, &mut page, none), KeyOutcome::Ignored);
        modal.open("t", &mut page);
        assert!(matches!(
            modal.on_key(&esc, &mut page, none),
            KeyOutcome::Transition(ModalTransition::Closed { .. })
        ));
    }

    #[test]
    fn tab_consults_the_trap_only_while_open() {
        let mut page = PageState::new();
        let mut modal = ModalController::new();
        let tab = KeyInput::new("Tab", false);
        let mut consulted = false;
        let outcome = modal.on_key(&tab, &mut page, || {
            consulted = true;
            (vec![1, 2, 3], Some(3))
        });
        assert_eq!(outcome, KeyOutcome::Ignored);
        assert!(!consulted);

        modal.open("t", &mut page);
        let outcome = modal.on_key(&tab, &mut page, || (vec![1, 2, 3], Some(3)));
        assert_eq!(outcome, KeyOutcome::Trap(TrapAction::MoveTo(1)));
        let back = KeyInput::new("Tab", true);
        let outcome = modal.on_key(&back, &mut page, || (vec![1, 2, 3], Some(1)));
        assert_eq!(outcome, KeyOutcome::Trap(TrapAction::MoveTo(3)));
    }
}
