//! Controller state shared by the page's event handlers.
//!
//! Handlers borrow the state only long enough to compute an outcome and must
//! release it before touching the DOM: focusing an element dispatches focus
//! events synchronously, and those handlers borrow the state again.

use std::cell::RefCell;

use beacon_core::{
    Accordion, DialogRegistry, FormController, MobileMenu, ModalController, PageState,
    ThemeController, Timings,
};

use web_sys::Element;

use crate::storage::LocalPreferenceStore;

#[derive(Default)]
pub struct SiteState {
    pub page: PageState,
    pub modal: ModalController,
    pub menu: MobileMenu,
    pub accordion: Accordion,
    pub form: FormController,
    pub dialogs: DialogRegistry,
    pub theme: Option<ThemeController<LocalPreferenceStore>>,
    pub timings: Timings,
    /// The modal container; its ancestors stay interactive while the rest of the page is inert.
    pub modal_root: Option<Element>,
}

thread_local! {
    static SITE: RefCell<SiteState> = RefCell::new(SiteState::default());
}

/// Run `f` with exclusive access to the site state.
pub fn with_site<R>(f: impl FnOnce(&mut SiteState) -> R) -> R {
    SITE.with(|site| f(&mut site.borrow_mut()))
}

/// Snapshot of the page state for mirroring onto the DOM.
#[must_use]
pub fn page() -> PageState {
    with_site(|site| site.page)
}

#[must_use]
pub fn modal_root() -> Option<Element> {
    with_site(|site| site.modal_root.clone())
}
