use beacon_core::FocusModality;
use wasm_bindgen::JsCast;
use web_sys::{Event, KeyboardEvent};

use crate::dom;
use crate::error::WebError;
use crate::page;
use crate::state::with_site;

/// Show focus rings for keyboard users only.
///
/// # Errors
/// Fails outside a document.
pub fn init() -> Result<(), WebError> {
    let doc = dom::document().ok_or_else(|| WebError::missing("document"))?;

    dom::listen(&doc, "keydown", |event: Event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        if with_site(|site| FocusModality.on_keydown(&key, &mut site.page)) {
            sync();
        }
    })?;

    dom::listen(&doc, "mousedown", |_| {
        if with_site(|site| FocusModality.on_pointer_down(&mut site.page)) {
            sync();
        }
    })?;
    Ok(())
}

fn sync() {
    if let Err(err) = page::sync() {
        log::warn!("failed to update focus styling: {err}");
    }
}
