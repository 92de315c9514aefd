use beacon_core::environment::{DARK_SCHEME_QUERY, REDUCED_MOTION_QUERY};
use beacon_core::{ColorScheme, EnvironmentSignals};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;
use crate::error::WebError;
use crate::state::with_site;

/// Read the OS color-scheme and motion preferences once and apply them.
#[must_use]
pub fn init() -> EnvironmentSignals {
    let signals = EnvironmentSignals::new(
        dom::media_matches(DARK_SCHEME_QUERY),
        dom::media_matches(REDUCED_MOTION_QUERY),
    );
    with_site(|site| signals.apply(&mut site.page));

    if let Err(err) = apply_scroll_behavior(&signals) {
        log::warn!("failed to disable smooth scrolling: {err}");
    }
    if signals.color_scheme == ColorScheme::Dark {
        log::info!("Dark mode preference detected");
    }
    signals
}

/// Write the root `scroll-behavior` override, if the signals call for one.
///
/// # Errors
/// Fails when the document has no root element.
pub fn apply_scroll_behavior(signals: &EnvironmentSignals) -> Result<(), WebError> {
    let Some(behavior) = signals.scroll_behavior() else {
        return Ok(());
    };
    let root = dom::document()
        .and_then(|doc| doc.document_element())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| WebError::missing("documentElement"))?;
    root.style().set_property("scroll-behavior", behavior)?;
    Ok(())
}
