//! `window.__beaconTest`: a read-only view of controller state for browser QA.

use beacon_core::FormPhase;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;
use crate::error::WebError;
use crate::state::{SiteState, with_site};

/// Global the browser tester reads.
pub const BRIDGE_GLOBAL: &str = "__beaconTest";

#[derive(Debug, Serialize)]
struct BridgeState {
    modal_open: bool,
    scroll_locked: bool,
    background_inert: bool,
    keyboard_nav: bool,
    reduced_motion: bool,
    theme: Option<String>,
    menu_expanded: bool,
    accordion_expanded: Vec<bool>,
    form_phase: &'static str,
    active_dialogs: Vec<String>,
}

impl BridgeState {
    fn capture(site: &SiteState) -> Self {
        Self {
            modal_open: site.modal.is_open(),
            scroll_locked: site.page.scroll_locked(),
            background_inert: site.page.background_inert(),
            keyboard_nav: site.page.keyboard_nav(),
            reduced_motion: site.page.reduced_motion(),
            theme: site
                .theme
                .as_ref()
                .map(|theme| theme.effective().as_str().to_string()),
            menu_expanded: site.menu.expanded(),
            accordion_expanded: site.accordion.panels().iter().map(|p| p.expanded).collect(),
            form_phase: match site.form.phase() {
                FormPhase::Idle => "idle",
                FormPhase::Pending(_) => "pending",
                FormPhase::Confirming(_) => "confirming",
            },
            active_dialogs: site.dialogs.active().to_vec(),
        }
    }
}

/// Install the bridge when the page was opened with `?test=1`.
///
/// # Errors
/// Fails when the bridge object cannot be attached to `window`.
pub fn install() -> Result<(), WebError> {
    if !dom::test_mode_enabled() {
        return Ok(());
    }
    let window = dom::window().ok_or_else(|| WebError::missing("window"))?;

    let state = Closure::wrap(Box::new(|| {
        let snapshot = with_site(|site| BridgeState::capture(site));
        serde_wasm_bindgen::to_value(&snapshot).unwrap_or(JsValue::NULL)
    }) as Box<dyn FnMut() -> JsValue>);

    let bridge = js_sys::Object::new();
    js_sys::Reflect::set(
        &bridge,
        &JsValue::from_str("state"),
        state.as_ref().unchecked_ref(),
    )?;
    js_sys::Reflect::set(&window, &JsValue::from_str(BRIDGE_GLOBAL), &bridge)?;
    // The bridge lives as long as the page.
    state.forget();
    log::info!("test bridge installed");
    Ok(())
}
