//! The persisted light/dark theme switch.

use beacon_core::{DARK_CLASS, EnvironmentSignals, SiteConfig, ThemeController};
use web_sys::Element;

use crate::dom;
use crate::error::WebError;
use crate::state::with_site;
use crate::storage::LocalPreferenceStore;

/// Apply the resolved theme and wire the toggle.
///
/// # Errors
/// Fails when the toggle control is missing or the body cannot be restyled.
pub fn init(config: &SiteConfig, signals: EnvironmentSignals) -> Result<(), WebError> {
    let selectors = &config.selectors;
    let toggle = dom::by_id(&selectors.theme_toggle)?;
    let label = toggle.query_selector(&selectors.theme_label)?;

    let controller = ThemeController::with_messages(
        LocalPreferenceStore,
        signals.color_scheme,
        &config.messages,
    );
    log::debug!("initial theme {}", controller.effective());
    with_site(|site| site.theme = Some(controller));
    render(&toggle, label.as_ref())?;

    dom::listen(&toggle.clone(), "click", move |_| {
        let next = with_site(|site| site.theme.as_mut().map(ThemeController::toggle));
        if let Some(next) = next {
            log::info!("theme switched to {next}");
        }
        if let Err(err) = render(&toggle, label.as_ref()) {
            log::warn!("failed to apply theme: {err}");
        }
    })?;
    Ok(())
}

fn render(toggle: &Element, label: Option<&Element>) -> Result<(), WebError> {
    let Some((dark, checked, text)) = with_site(|site| {
        site.theme.as_ref().map(|theme| {
            (
                theme.effective().is_dark(),
                theme.aria_checked(),
                theme.toggle_label().to_string(),
            )
        })
    }) else {
        return Ok(());
    };
    dom::body()?
        .class_list()
        .toggle_with_force(DARK_CLASS, dark)?;
    toggle.set_attribute("aria-checked", checked)?;
    if let Some(label) = label {
        label.set_text_content(Some(&text));
    }
    Ok(())
}
