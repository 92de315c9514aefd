//! Accordion expansion state and trigger keyboard navigation.
//!
//! Panels expand independently. Arrow keys, Home and End move focus between
//! triggers without touching expansion.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccordionPanel {
    pub trigger_id: String,
    /// Target of the trigger's `aria-controls`.
    pub panel_id: String,
    pub expanded: bool,
}

/// Focus-navigation keys understood by accordion triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Previous,
    First,
    Last,
}

impl NavKey {
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | "ArrowRight" => Some(Self::Next),
            "ArrowUp" | "ArrowLeft" => Some(Self::Previous),
            "Home" => Some(Self::First),
            "End" => Some(Self::Last),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accordion {
    panels: Vec<AccordionPanel>,
}

impl Accordion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger in document order, returning its index.
    pub fn push(&mut self, trigger_id: &str, panel_id: &str, expanded: bool) -> usize {
        self.panels.push(AccordionPanel {
            trigger_id: trigger_id.to_string(),
            panel_id: panel_id.to_string(),
            expanded,
        });
        self.panels.len() - 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    #[must_use]
    pub fn panel(&self, index: usize) -> Option<&AccordionPanel> {
        self.panels.get(index)
    }

    #[must_use]
    pub fn panels(&self) -> &[AccordionPanel] {
        &self.panels
    }

    /// Flip one panel, returning its new expansion state.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let panel = self.panels.get_mut(index)?;
        panel.expanded = !panel.expanded;
        Some(panel.expanded)
    }

    pub fn set_expanded(&mut self, index: usize, expanded: bool) -> Option<bool> {
        let panel = self.panels.get_mut(index)?;
        panel.expanded = expanded;
        Some(expanded)
    }

    /// Trigger index that should receive focus, or `None` to stay put.
    #[must_use]
    pub fn focus_target(&self, current: usize, key: NavKey) -> Option<usize> {
        if current >= self.panels.len() {
            return None;
        }
        match key {
            NavKey::Next => current.checked_add(1).filter(|&i| i < self.panels.len()),
            NavKey::Previous => current.checked_sub(1),
            NavKey::First => Some(0),
            NavKey::Last => Some(self.panels.len() - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Accordion {
        let mut acc = Accordion::new();
        acc.push("t1", "p1", false);
        acc.push("t2", "p2", false);
        acc.push("t3", "p3", true);
        acc
    }

    #[test]
    fn panels_toggle_independently() {
        let mut acc = three();
        assert_eq!(acc.toggle(0), Some(true));
        assert_eq!(acc.toggle(1), Some(true));
        assert!(acc.panels().iter().all(|p| p.expanded));
        assert_eq!(acc.toggle(2), Some(false));
        assert!(acc.panel(0).is_some_and(|p| p.expanded));
        assert_eq!(acc.toggle(9), None);
    }

    #[test]
    fn arrows_stop_at_the_ends() {
        let acc = three();
        assert_eq!(acc.focus_target(0, NavKey::Next), Some(1));
        assert_eq!(acc.focus_target(2, NavKey::Next), None);
        assert_eq!(acc.focus_target(0, NavKey::Previous), None);
        assert_eq!(acc.focus_target(2, NavKey::Previous), Some(1));
    }

    #[test]
    fn home_and_end_are_absolute() {
        let acc = three();
        for current in 0..3 {
            assert_eq!(acc.focus_target(current, NavKey::First), Some(0));
            assert_eq!(acc.focus_target(current, NavKey::Last), Some(2));
        }
    }

    #[test]
    fn key_names_map_to_navigation() {
        assert_eq!(NavKey::from_key("ArrowRight"), Some(NavKey::Next));
        assert_eq!(NavKey::from_key("ArrowLeft"), Some(NavKey::Previous));
        assert_eq!(NavKey::from_key("End"), Some(NavKey::Last));
        assert_eq!(NavKey::from_key("Enter"), None);
    }
}
