//! Mirror [`PageState`] onto the document.

use beacon_core::{KEYBOARD_NAV_CLASS, PageState};
use web_sys::{Element, HtmlElement};

use crate::dom;
use crate::error::WebError;
use crate::state;

/// Marks the elements this module made inert, so only those are released.
pub const INERT_MARKER: &str = "data-beacon-inert";

/// Apply the current page state to `<body>`.
///
/// # Errors
/// Returns an error if the body is missing or a style write is rejected.
pub fn sync() -> Result<(), WebError> {
    apply(&state::page(), state::modal_root().as_ref())
}

fn apply(page: &PageState, modal: Option<&Element>) -> Result<(), WebError> {
    let body = dom::body()?;
    let style = body.style();
    if page.scroll_locked() {
        style.set_property("overflow", "hidden")?;
    } else {
        style.remove_property("overflow")?;
    }
    body.class_list()
        .toggle_with_force(KEYBOARD_NAV_CLASS, page.keyboard_nav())?;
    match modal {
        Some(modal) if page.background_inert() => make_siblings_inert(&body, modal),
        _ => release_inert(),
    }
}

/// Make every direct child of `<body>` that does not hold the modal inert.
fn make_siblings_inert(body: &HtmlElement, modal: &Element) -> Result<(), WebError> {
    let children = body.children();
    for child in (0..children.length()).filter_map(|i| children.item(i)) {
        if child.contains(Some(modal.as_ref())) || child.has_attribute("inert") {
            continue;
        }
        child.set_attribute("inert", "")?;
        child.set_attribute(INERT_MARKER, "")?;
    }
    Ok(())
}

fn release_inert() -> Result<(), WebError> {
    for el in dom::query_all(&format!("[{INERT_MARKER}]")) {
        el.remove_attribute("inert")?;
        el.remove_attribute(INERT_MARKER)?;
    }
    Ok(())
}
