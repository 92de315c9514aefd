//! Beacon Web
//!
//! Browser shell for Beacon: binds the `beacon-core` controllers to a static
//! page's markup and applies their outcomes to the DOM.

#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod boot;
pub mod config;
pub mod controllers;
pub mod dom;
pub mod error;
pub mod logger;
pub mod page;
pub mod state;
pub mod storage;
pub mod test_bridge;

pub use controllers::announce::announce;
pub use controllers::dialogs::{close_dialog, open_dialog};
pub use error::WebError;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);

    let Some(doc) = dom::document() else {
        return;
    };
    // The module may load after parsing has finished. Until then a
    // `#beacon-config` block later in the page has not been parsed either.
    if doc.ready_state() == "loading" {
        let result = dom::listen(&doc, "DOMContentLoaded", |_| boot::boot());
        if let Err(err) = result {
            log::error!("failed to schedule startup: {err}");
        }
    } else {
        boot::boot();
    }
}
