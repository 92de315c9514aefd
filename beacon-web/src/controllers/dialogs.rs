//! Class-toggled dialogs opened from page script.

use beacon_core::SiteConfig;
use beacon_core::dialogs::ACTIVE_CLASS;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent};

use crate::dom;
use crate::error::WebError;
use crate::state::with_site;

/// Show the dialog with `id`.
#[wasm_bindgen(js_name = openDialog)]
pub fn open_dialog(id: &str) {
    let Ok(dialog) = dom::by_id(id) else {
        log::warn!("openDialog: no element #{id}");
        return;
    };
    if with_site(|site| site.dialogs.open(id)) {
        set_active(&dialog, true);
    }
}

/// Hide the dialog with `id`.
#[wasm_bindgen(js_name = closeDialog)]
pub fn close_dialog(id: &str) {
    let Ok(dialog) = dom::by_id(id) else {
        log::warn!("closeDialog: no element #{id}");
        return;
    };
    with_site(|site| site.dialogs.close(id));
    set_active(&dialog, false);
}

/// Close dialogs on a backdrop click and all of them on Escape.
///
/// # Errors
/// Fails outside a browser window.
pub fn init(config: &SiteConfig) -> Result<(), WebError> {
    let win = dom::window().ok_or_else(|| WebError::missing("window"))?;
    let doc = dom::document().ok_or_else(|| WebError::missing("document"))?;
    let dialog_class = config.selectors.dialog.trim_start_matches('.').to_string();

    dom::listen(&win, "click", move |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if !target.class_list().contains(&dialog_class) {
            return;
        }
        let id = target.id();
        // Dialogs activated from markup are not in the registry yet.
        if with_site(|site| site.dialogs.backdrop_click(&id)) || is_active(&target) {
            set_active(&target, false);
        }
    })?;

    let selector = format!("{}.{ACTIVE_CLASS}", config.selectors.dialog);
    dom::listen(&doc, "keydown", move |event: Event| {
        let escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| key.key() == "Escape");
        if !escape {
            return;
        }
        let closed = with_site(|site| site.dialogs.escape());
        for id in &closed {
            if let Ok(dialog) = dom::by_id(id) {
                set_active(&dialog, false);
            }
        }
        for dialog in dom::query_all(&selector) {
            set_active(&dialog, false);
        }
    })?;
    Ok(())
}

fn is_active(el: &Element) -> bool {
    el.class_list().contains(ACTIVE_CLASS)
}

fn set_active(el: &Element, active: bool) {
    let _ = el.class_list().toggle_with_force(ACTIVE_CLASS, active);
}
