//! Beacon Core
//!
//! Platform-agnostic behaviour for Beacon's accessible page enhancements.
//! Every controller here is a plain state machine: the browser shell feeds it
//! input events and applies the returned outcome to the document.

pub mod accordion;
pub mod announce;
pub mod config;
pub mod dialogs;
pub mod environment;
pub mod error;
pub mod focus;
pub mod form;
pub mod menu;
pub mod modal;
pub mod page;
pub mod tables;
pub mod theme;
pub mod tooltip;

// Re-export commonly used types
pub use accordion::{Accordion, AccordionPanel, NavKey};
pub use announce::{Announcement, FEATURE_SUMMARY, Politeness};
pub use config::{Messages, Selectors, SiteConfig, Timings};
pub use dialogs::DialogRegistry;
pub use environment::{ColorScheme, EnvironmentSignals};
pub use error::CoreError;
pub use focus::{
    FOCUSABLE_SELECTOR, FocusCandidate, FocusModality, KEYBOARD_NAV_CLASS, TabDirection,
    TrapAction, trap_tab,
};
pub use form::{
    Completion, FieldConstraints, FieldError, FieldFeedback, FieldInput, FieldKind,
    FormController, FormPhase, StatusRole, SubmitOutcome, Ticket, validate_field,
};
pub use menu::MobileMenu;
pub use modal::{
    ClickRegion, FocusTarget, KeyInput, KeyOutcome, ModalController, ModalState, ModalTransition,
};
pub use page::PageState;
pub use tables::{TABLE_WRAPPER_CLASS, needs_wrapper};
pub use theme::{
    DARK_CLASS, MemoryPreferenceStore, THEME_STORAGE_KEY, Theme, ThemeController,
    ThemePreference, resolve_theme,
};
pub use tooltip::Tooltip;

/// Trait for abstracting persisted preferences.
/// Platform-specific implementations should provide this
pub trait PreferenceStore {
    type Error: std::error::Error + 'static;

    /// Read a stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Persist a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}
