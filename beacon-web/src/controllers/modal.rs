//! The focus-trapping modal dialog.

use beacon_core::{
    ClickRegion, FOCUSABLE_SELECTOR, FocusCandidate, KeyInput, KeyOutcome, ModalTransition,
    SiteConfig, TrapAction,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent};

use crate::dom;
use crate::error::WebError;
use crate::page;
use crate::state::with_site;

#[derive(Clone)]
struct ModalParts {
    modal: Element,
    close: Option<Element>,
    trigger_id: String,
}

/// Wire the modal, its trigger and its close affordances.
///
/// # Errors
/// Fails when the modal container or its trigger is missing.
pub fn init(config: &SiteConfig) -> Result<(), WebError> {
    let selectors = &config.selectors;
    let modal = dom::by_id(&selectors.modal)?;
    let trigger = dom::by_id(&selectors.modal_trigger)?;
    let doc = dom::document().ok_or_else(|| WebError::missing("document"))?;

    let parts = ModalParts {
        close: modal.query_selector(&selectors.modal_close)?,
        modal: modal.clone(),
        trigger_id: trigger.id(),
    };
    if parts.close.is_none() {
        log::debug!("modal has no {} control", selectors.modal_close);
    }

    {
        let parts = parts.clone();
        dom::listen(&trigger, "click", move |_| open(&parts))?;
    }

    if let Some(close) = parts.close.as_ref() {
        let parts = parts.clone();
        dom::listen(close, "click", move |_| {
            click(&parts, ClickRegion::CloseControl);
        })?;
    }

    if let Some(overlay) = modal.query_selector(&selectors.modal_overlay)? {
        let parts = parts.clone();
        dom::listen(&overlay, "click", move |_| click(&parts, ClickRegion::Overlay))?;
    }

    if let Some(content) = modal.query_selector(&selectors.modal_content)? {
        let parts = parts.clone();
        dom::listen(&content, "click", move |event: Event| {
            event.stop_propagation();
            click(&parts, ClickRegion::Content);
        })?;
    }

    with_site(|site| site.modal_root = Some(modal.clone()));

    // Document level: once focus has fallen to `<body>` a Tab never passes
    // through the modal element.
    dom::listen(&doc, "keydown", move |event: Event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if matches!(key.key().as_str(), "Escape" | "Tab") {
            keydown(&parts, key);
        }
    })?;
    Ok(())
}

fn open(parts: &ModalParts) {
    let transition = with_site(|site| site.modal.open(&parts.trigger_id, &mut site.page));
    apply(parts, &transition);
}

fn click(parts: &ModalParts, region: ClickRegion) {
    let transition = with_site(|site| site.modal.on_click(region, &mut site.page));
    apply(parts, &transition);
}

fn keydown(parts: &ModalParts, event: &KeyboardEvent) {
    let input = KeyInput::new(event.key(), event.shift_key());
    let outcome = with_site(|site| {
        site.modal
            .on_key(&input, &mut site.page, || focusables(&parts.modal))
    });
    match outcome {
        KeyOutcome::Transition(transition) => apply(parts, &transition),
        KeyOutcome::Trap(TrapAction::MoveTo(target)) => {
            event.prevent_default();
            let _ = target.focus();
        }
        KeyOutcome::Trap(TrapAction::Default) | KeyOutcome::Ignored => {}
    }
}

/// Tabbable descendants in document order plus the active element.
fn focusables(modal: &Element) -> (Vec<HtmlElement>, Option<HtmlElement>) {
    let items = modal
        .query_selector_all(FOCUSABLE_SELECTOR)
        .map(|list| dom::elements(&list))
        .unwrap_or_default()
        .into_iter()
        .filter(|el| candidate(el).is_tabbable())
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let active = dom::document()
        .and_then(|doc| doc.active_element())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    (items, active)
}

fn candidate(el: &Element) -> FocusCandidate {
    FocusCandidate {
        tag: el.tag_name(),
        has_href: el.has_attribute("href"),
        tabindex: el
            .get_attribute("tabindex")
            .and_then(|v| v.trim().parse().ok()),
        disabled: el.has_attribute("disabled"),
    }
}

fn apply(parts: &ModalParts, transition: &ModalTransition) {
    match transition {
        ModalTransition::Opened { .. } => {
            let _ = parts.modal.remove_attribute("hidden");
            let _ = parts.modal.set_attribute("data-trigger", &parts.trigger_id);
            sync_page();
            let target = parts
                .close
                .clone()
                .or_else(|| focusables(&parts.modal).0.into_iter().next().map(Into::into));
            if let Some(target) = target {
                dom::focus(&target);
            }
        }
        ModalTransition::Closed { return_focus } => {
            let _ = parts.modal.set_attribute("hidden", "");
            sync_page();
            if let Some(trigger) = return_focus.as_deref().and_then(|id| dom::by_id(id).ok()) {
                dom::focus(&trigger);
            }
        }
        ModalTransition::Ignored => {}
    }
}

fn sync_page() {
    if let Err(err) = page::sync() {
        log::warn!("failed to update page state: {err}");
    }
}
