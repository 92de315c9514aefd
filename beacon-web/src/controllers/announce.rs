//! Transient screen-reader announcements.

use beacon_core::announce::SR_ONLY_CLASS;
use beacon_core::{Announcement, Politeness};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::dom;
use crate::error::WebError;
use crate::state::with_site;

/// Announce `message` through a temporary live region.
///
/// `priority` is an `aria-live` value; anything but `assertive` is polite.
#[wasm_bindgen]
pub fn announce(message: &str, priority: Option<String>) {
    let announcement = Announcement::new(
        message,
        Politeness::from_attr(priority.as_deref()),
        with_site(|site| site.timings.announcement_ms),
    );
    if let Err(err) = speak(announcement) {
        log::warn!("announcement dropped: {err}");
    }
}

/// Append the live region and remove it once its lifetime elapses.
///
/// # Errors
/// Fails when the body is missing or the region cannot be created.
pub fn speak(announcement: Announcement) -> Result<(), WebError> {
    let doc = dom::document().ok_or_else(|| WebError::missing("document"))?;
    let region = doc.create_element("div")?;
    region.set_attribute("role", "status")?;
    region.set_attribute("aria-live", announcement.politeness.as_str())?;
    region.set_class_name(SR_ONLY_CLASS);
    region.set_text_content(Some(&announcement.message));
    dom::body()?.append_child(&region)?;

    let ttl = i32::try_from(announcement.ttl_ms).unwrap_or(i32::MAX);
    spawn_local(async move {
        if let Err(err) = dom::sleep_ms(ttl).await {
            log::debug!("announcement timer failed: {}", dom::js_error_message(&err));
        }
        region.remove();
    });
    Ok(())
}
