//! Focus-driven tooltips built from `data-tooltip`.

use std::cell::RefCell;
use std::rc::Rc;

use beacon_core::tooltip::{TOOLTIP_ATTR, TOOLTIP_CLASS, TOOLTIP_ROLE};
use beacon_core::{SiteConfig, Tooltip};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::dom;
use crate::error::WebError;

/// Attach a tooltip to every trigger carrying copy in `data-tooltip`.
///
/// # Errors
/// Fails when the page has no triggers or an element cannot be created.
pub fn init(config: &SiteConfig) -> Result<(), WebError> {
    let selector = &config.selectors.tooltip_trigger;
    let triggers = dom::query_all(selector);
    if triggers.is_empty() {
        return Err(WebError::missing(selector));
    }
    let doc = dom::document().ok_or_else(|| WebError::missing("document"))?;

    let tip_selector = format!(":scope > .{TOOLTIP_CLASS}");
    for (index, trigger) in triggers.into_iter().enumerate() {
        let Some(tooltip) = Tooltip::from_attr(trigger.get_attribute(TOOLTIP_ATTR).as_deref())
        else {
            continue;
        };
        if trigger.query_selector(&tip_selector)?.is_some() {
            continue;
        }

        let bubble = doc
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| WebError::Js("div is not an HTMLElement".to_string()))?;
        bubble.set_class_name(TOOLTIP_CLASS);
        bubble.set_attribute("role", TOOLTIP_ROLE)?;
        bubble.set_text_content(Some(tooltip.text()));
        describe(&trigger, &bubble, index)?;
        trigger.append_child(&bubble)?;

        let state = Rc::new(RefCell::new(tooltip));
        {
            let (state, bubble) = (Rc::clone(&state), bubble.clone());
            dom::listen(&trigger, "focus", move |_| {
                state.borrow_mut().on_focus();
                render(&state.borrow(), &bubble);
            })?;
        }
        dom::listen(&trigger, "blur", move |_| {
            state.borrow_mut().on_blur();
            render(&state.borrow(), &bubble);
        })?;
    }
    Ok(())
}

/// Link the bubble through `aria-describedby` unless the author already did.
fn describe(trigger: &Element, bubble: &HtmlElement, index: usize) -> Result<(), WebError> {
    if trigger.has_attribute("aria-describedby") {
        return Ok(());
    }
    let id = format!("beacon-tooltip-{index}");
    bubble.set_id(&id);
    trigger.set_attribute("aria-describedby", &id)?;
    Ok(())
}

fn render(tooltip: &Tooltip, bubble: &HtmlElement) {
    let _ = bubble.style().set_property("opacity", tooltip.opacity());
}
