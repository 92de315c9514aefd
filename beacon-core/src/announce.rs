//! Screen-reader announcements.

use serde::{Deserialize, Serialize};

/// Class hiding an element visually while keeping it in the accessibility tree.
pub const SR_ONLY_CLASS: &str = "sr-only";

/// Accessibility features reported once the page has loaded.
pub const FEATURE_SUMMARY: &[&str] = &[
    "Keyboard navigation enabled",
    "Screen reader support (ARIA labels)",
    "Focus management in modals",
    "Semantic HTML structure",
    "Color contrast compliance (WCAG AA)",
    "Reduced motion support",
    "Dark mode support",
    "Dynamic content announcements",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Politeness {
    #[default]
    Polite,
    Assertive,
}

impl Politeness {
    /// Parse an `aria-live` value, defaulting to polite.
    #[must_use]
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("assertive") => Self::Assertive,
            _ => Self::Polite,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// A transient live-region message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub message: String,
    pub politeness: Politeness,
    /// Milliseconds before the live region is removed again.
    pub ttl_ms: u32,
}

impl Announcement {
    #[must_use]
    pub fn new(message: impl Into<String>, politeness: Politeness, ttl_ms: u32) -> Self {
        Self {
            message: message.into(),
            politeness,
            ttl_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn politeness_defaults_to_polite() {
        assert_eq!(Politeness::from_attr(None), Politeness::Polite);
        assert_eq!(Politeness::from_attr(Some("off")), Politeness::Polite);
        assert_eq!(
            Politeness::from_attr(Some("Assertive")),
            Politeness::Assertive
        );
        assert_eq!(Politeness::Assertive.as_str(), "assertive");
    }

    #[test]
    fn feature_summary_mentions_modal_focus() {
        assert!(FEATURE_SUMMARY.iter().any(|f| f.contains("modals")));
    }
}
