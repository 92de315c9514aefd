//! Page-supplied configuration.

use beacon_core::SiteConfig;

use crate::dom;

/// Id of the optional `<script type="application/json">` override.
pub const CONFIG_ELEMENT_ID: &str = "beacon-config";

/// Read the page's configuration override, falling back to defaults.
#[must_use]
pub fn load() -> SiteConfig {
    let Some(json) = dom::document()
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    SiteConfig::from_json(&json).unwrap_or_else(|err| {
        log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
        SiteConfig::default()
    })
}
