use beacon_core::SiteConfig;
use beacon_core::menu::MENU_ACTIVE_CLASS;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use crate::dom;
use crate::error::WebError;
use crate::state::with_site;

/// Wire the mobile navigation toggle.
///
/// # Errors
/// Fails when the toggle button or the nav list is missing.
pub fn init(config: &SiteConfig) -> Result<(), WebError> {
    let selectors = &config.selectors;
    let doc = dom::document().ok_or_else(|| WebError::missing("document"))?;
    let toggle = doc
        .query_selector(&selectors.menu_toggle)?
        .ok_or_else(|| WebError::missing(&selectors.menu_toggle))?;
    let nav = dom::by_id(&selectors.nav_menu)?;

    let expanded = toggle.get_attribute("aria-expanded").as_deref() == Some("true");
    with_site(|site| site.menu = beacon_core::MobileMenu::new(expanded));

    {
        let (toggle_el, nav_el) = (toggle.clone(), nav.clone());
        dom::listen(&toggle, "click", move |_| {
            with_site(|site| site.menu.toggle());
            render(&toggle_el, &nav_el);
        })?;
    }

    for link in dom::elements(&nav.query_selector_all("a")?) {
        let (toggle_el, nav_el) = (toggle.clone(), nav.clone());
        dom::listen(&link, "click", move |_| {
            if with_site(|site| site.menu.link_activated()) {
                render(&toggle_el, &nav_el);
            }
        })?;
    }

    let scope = selectors.nav_scope.clone();
    dom::listen(&doc, "click", move |event: Event| {
        let inside = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&scope).ok().flatten())
            .is_some();
        if with_site(|site| site.menu.document_click(inside)) {
            render(&toggle, &nav);
        }
    })?;
    Ok(())
}

fn render(toggle: &Element, nav: &Element) {
    let menu = with_site(|site| site.menu);
    let _ = toggle.set_attribute("aria-expanded", menu.aria_expanded());
    let _ = nav
        .class_list()
        .toggle_with_force(MENU_ACTIVE_CLASS, menu.expanded());
}
