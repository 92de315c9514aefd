//! Operating-system preference signals, read once at startup.

use serde::{Deserialize, Serialize};

use crate::page::PageState;

pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    #[must_use]
    pub const fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSignals {
    pub color_scheme: ColorScheme,
    pub reduced_motion: bool,
}

impl EnvironmentSignals {
    #[must_use]
    pub const fn new(prefers_dark: bool, reduced_motion: bool) -> Self {
        Self {
            color_scheme: ColorScheme::from_prefers_dark(prefers_dark),
            reduced_motion,
        }
    }

    /// Record the motion preference on the page.
    pub fn apply(&self, page: &mut PageState) {
        page.set_reduced_motion(self.reduced_motion);
    }

    /// Root `scroll-behavior` override, when one is needed.
    #[must_use]
    pub const fn scroll_behavior(&self) -> Option<&'static str> {
        if self.reduced_motion { Some("auto") } else { None }
    }
}
