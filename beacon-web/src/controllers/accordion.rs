use std::rc::Rc;

use beacon_core::{Accordion, NavKey, SiteConfig};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent};

use crate::dom;
use crate::error::WebError;
use crate::state::with_site;

/// Attribute marking an expanded panel.
const EXPANDED_ATTR: &str = "data-expanded";

/// Wire every accordion trigger on the page.
///
/// # Errors
/// Fails when the page has no accordion triggers.
pub fn init(config: &SiteConfig) -> Result<(), WebError> {
    let selector = &config.selectors.accordion_trigger;
    let triggers = Rc::new(dom::query_all(selector));
    if triggers.is_empty() {
        return Err(WebError::missing(selector));
    }

    let mut accordion = Accordion::new();
    for trigger in triggers.iter() {
        let panel_id = trigger.get_attribute("aria-controls").unwrap_or_default();
        let expanded = trigger.get_attribute("aria-expanded").as_deref() == Some("true");
        accordion.push(&trigger.id(), &panel_id, expanded);
    }
    with_site(|site| site.accordion = accordion);

    for (index, trigger) in triggers.iter().enumerate() {
        {
            let trigger_el = trigger.clone();
            dom::listen(trigger, "click", move |_| {
                if let Some(expanded) = with_site(|site| site.accordion.toggle(index)) {
                    render(&trigger_el, expanded);
                }
            })?;
        }

        let all = Rc::clone(&triggers);
        dom::listen(trigger, "keydown", move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            let Some(nav) = NavKey::from_key(&key) else {
                return;
            };
            event.prevent_default();
            let target = with_site(|site| site.accordion.focus_target(index, nav));
            if let Some(next) = target.and_then(|i| all.get(i)) {
                dom::focus(next);
            }
        })?;
    }
    Ok(())
}

fn render(trigger: &Element, expanded: bool) {
    let _ = trigger.set_attribute("aria-expanded", if expanded { "true" } else { "false" });
    let Some(panel) = trigger
        .get_attribute("aria-controls")
        .and_then(|id| dom::by_id(&id).ok())
    else {
        log::debug!("accordion trigger {} controls no panel", trigger.id());
        return;
    };
    let _ = if expanded {
        panel.set_attribute(EXPANDED_ATTR, "true")
    } else {
        panel.remove_attribute(EXPANDED_ATTR)
    };
}
