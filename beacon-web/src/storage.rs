//! `localStorage`-backed preference store.

use beacon_core::PreferenceStore;

use crate::dom::{js_error_message, local_storage};
use crate::error::WebError;

/// Preference store persisting to the origin's `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPreferenceStore;

impl PreferenceStore for LocalPreferenceStore {
    type Error = WebError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        local_storage()?
            .get_item(key)
            .map_err(|err| WebError::Storage(js_error_message(&err)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        local_storage()?
            .set_item(key, value)
            .map_err(|err| WebError::Storage(js_error_message(&err)))
    }
}
