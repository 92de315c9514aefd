//! Light/dark theme resolution and the persisted preference.
//!
//! Precedence is explicit choice, then the OS scheme, then light. The store is
//! read once when the controller is built; every toggle writes the new
//! explicit choice back.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PreferenceStore;
use crate::config::Messages;
use crate::environment::ColorScheme;
use crate::error::CoreError;

/// Storage key holding `light` or `dark`.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Body class applied while the dark theme is active.
pub const DARK_CLASS: &str = "dark-mode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(CoreError::InvalidTheme(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemePreference {
    #[default]
    Unset,
    Explicit(Theme),
}

impl ThemePreference {
    /// Interpret a stored value. Anything other than `light`/`dark` is unset.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::parse::<Theme>) {
            Some(Ok(theme)) => Self::Explicit(theme),
            Some(Err(err)) => {
                log::warn!("ignoring stored theme: {err}");
                Self::Unset
            }
            None => Self::Unset,
        }
    }
}

#[must_use]
pub const fn resolve_theme(preference: ThemePreference, scheme: ColorScheme) -> Theme {
    match (preference, scheme) {
        (ThemePreference::Explicit(theme), _) => theme,
        (ThemePreference::Unset, ColorScheme::Dark) => Theme::Dark,
        (ThemePreference::Unset, ColorScheme::Light) => Theme::Light,
    }
}

pub struct ThemeController<S: PreferenceStore> {
    store: S,
    preference: ThemePreference,
    effective: Theme,
    to_light: String,
    to_dark: String,
}

impl<S: PreferenceStore> ThemeController<S> {
    pub fn new(store: S, scheme: ColorScheme) -> Self {
        Self::with_messages(store, scheme, &Messages::default())
    }

    pub fn with_messages(store: S, scheme: ColorScheme, messages: &Messages) -> Self {
        let stored = store.get(THEME_STORAGE_KEY).unwrap_or_else(|err| {
            log::warn!("theme preference unreadable: {err}");
            None
        });
        let preference = ThemePreference::from_stored(stored.as_deref());
        Self {
            store,
            preference,
            effective: resolve_theme(preference, scheme),
            to_light: messages.theme_to_light.clone(),
            to_dark: messages.theme_to_dark.clone(),
        }
    }

    #[must_use]
    pub const fn effective(&self) -> Theme {
        self.effective
    }

    #[must_use]
    pub const fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// Invert the effective theme and persist it as the explicit choice.
    /// A failed write is logged; the page still switches.
    pub fn toggle(&mut self) -> Theme {
        let next = self.effective.toggled();
        if let Err(err) = self.store.set(THEME_STORAGE_KEY, next.as_str()) {
            log::warn!("failed to persist theme {next}: {err}");
        }
        self.preference = ThemePreference::Explicit(next);
        self.effective = next;
        next
    }

    /// Label describing what the toggle will switch to.
    #[must_use]
    pub fn toggle_label(&self) -> &str {
        if self.effective.is_dark() {
            &self.to_light
        } else {
            &self.to_dark
        }
    }

    #[must_use]
    pub const fn aria_checked(&self) -> &'static str {
        if self.effective.is_dark() { "true" } else { "false" }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

/// In-memory store used by tests and the behaviour replays.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
