//! Page contract and timing configuration.
//!
//! Every field defaults to the markup shipped with the site, so an empty JSON
//! object is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// `log` level filter name for the browser console (`info`, `debug`, ...).
    pub log_level: String,
    pub selectors: Selectors,
    pub timings: Timings,
    pub messages: Messages,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            selectors: Selectors::default(),
            timings: Timings::default(),
            messages: Messages::default(),
        }
    }
}

impl SiteConfig {
    /// Parse a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Element ids (bare names) and CSS selectors (leading `.`) the shell binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub menu_toggle: String,
    pub nav_menu: String,
    pub nav_scope: String,
    pub accordion_trigger: String,
    pub form: String,
    pub form_status: String,
    pub form_fields: String,
    pub submit_button: String,
    pub modal: String,
    pub modal_trigger: String,
    pub modal_close: String,
    pub modal_overlay: String,
    pub modal_content: String,
    pub dialog: String,
    pub tooltip_trigger: String,
    pub theme_toggle: String,
    pub theme_label: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            menu_toggle: ".menu-toggle".to_string(),
            nav_menu: "nav-menu".to_string(),
            nav_scope: "nav".to_string(),
            accordion_trigger: ".accordion-trigger".to_string(),
            form: "demo-form".to_string(),
            form_status: "form-status".to_string(),
            form_fields: "input, textarea".to_string(),
            submit_button: "button[type=\"submit\"]".to_string(),
            modal: "modal".to_string(),
            modal_trigger: "modal-trigger".to_string(),
            modal_close: ".modal-close".to_string(),
            modal_overlay: ".modal-overlay".to_string(),
            modal_content: ".modal-content".to_string(),
            dialog: ".modal".to_string(),
            tooltip_trigger: ".tooltip-trigger".to_string(),
            theme_toggle: "style-toggle".to_string(),
            theme_label: ".toggle-label".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Simulated network latency before a submission succeeds.
    pub submit_latency_ms: u32,
    /// How long the success message stays before being cleared.
    pub success_display_ms: u32,
    /// Lifetime of a transient screen-reader announcement.
    pub announcement_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            submit_latency_ms: 1500,
            success_display_ms: 5000,
            announcement_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub form_invalid: String,
    pub form_pending: String,
    pub form_success: String,
    pub theme_to_light: String,
    pub theme_to_dark: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            form_invalid: "Please fill in all required fields.".to_string(),
            form_pending: "Sending...".to_string(),
            form_success: "Message sent successfully! Thank you for reaching out.".to_string(),
            theme_to_light: "Light mode".to_string(),
            theme_to_dark: "Dark mode".to_string(),
        }
    }
}
