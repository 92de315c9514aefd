//! Startup sequencing for the page enhancements.

use beacon_core::{FEATURE_SUMMARY, SiteConfig};

use crate::controllers::{
    accordion, dialogs, environment, focus_visible, form, menu, modal, tables, theme, tooltip,
};
use crate::error::WebError;
use crate::state::with_site;
use crate::{config, dom, logger, test_bridge};

/// Read the page configuration and wire everything with it.
///
/// Must run once the document is parsed, so the config block is visible.
pub fn boot() {
    let config = config::load();
    logger::set_level(&config.log_level);
    init_all(&config);
}

/// Wire every controller once the document has been parsed.
///
/// Each initializer is independent: one that fails is logged and skipped.
pub fn init_all(config: &SiteConfig) {
    with_site(|site| site.timings = config.timings);

    let signals = environment::init();

    run("menu", menu::init(config));
    run("accordion", accordion::init(config));
    run("form", form::init(config));
    run("modal", modal::init(config));
    run("tooltip", tooltip::init(config));
    run("tables", tables::init());
    run("focus", focus_visible::init());
    run("theme", theme::init(config, signals));
    run("dialogs", dialogs::init(config));

    log::info!("Accessibility features initialized");

    if let Some(win) = dom::window() {
        run(
            "summary",
            dom::listen(&win, "load", |_| {
                log::info!("Website Accessibility Features:");
                for feature in FEATURE_SUMMARY {
                    log::info!("✓ {feature}");
                }
            }),
        );
    }

    run("test bridge", test_bridge::install());
}

fn run(name: &str, result: Result<(), WebError>) {
    match result {
        Ok(()) => log::debug!("{name} ready"),
        Err(WebError::MissingElement(what)) => log::debug!("{name} skipped: no {what}"),
        Err(err) => log::warn!("{name} failed: {err}"),
    }
}
