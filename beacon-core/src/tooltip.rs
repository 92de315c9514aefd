//! Focus-driven tooltips.

use serde::{Deserialize, Serialize};

pub const TOOLTIP_CLASS: &str = "tooltip-text";
pub const TOOLTIP_ROLE: &str = "tooltip";
/// Attribute on the trigger carrying the tooltip copy.
pub const TOOLTIP_ATTR: &str = "data-tooltip";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooltip {
    text: String,
    visible: bool,
}

impl Tooltip {
    /// Build a tooltip from the trigger's attribute. Blank text yields none.
    #[must_use]
    pub fn from_attr(text: Option<&str>) -> Option<Self> {
        let text = text?.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            visible: false,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    pub fn on_focus(&mut self) {
        self.visible = true;
    }

    pub fn on_blur(&mut self) {
        self.visible = false;
    }

    /// Inline opacity for the tooltip element.
    #[must_use]
    pub const fn opacity(&self) -> &'static str {
        if self.visible { "1" } else { "0" }
    }
}
