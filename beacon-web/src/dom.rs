use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, Storage, Window};

use crate::error::WebError;

/// The browser window; `None` outside a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// The page document.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// The `<body>` element.
///
/// # Errors
/// Returns [`WebError::MissingElement`] outside a browser or before the body exists.
pub fn body() -> Result<HtmlElement, WebError> {
    document()
        .and_then(|doc| doc.body())
        .ok_or_else(|| WebError::missing("body"))
}

/// Look up an element by id.
///
/// # Errors
/// Returns [`WebError::MissingElement`] naming the id when it is absent.
pub fn by_id(id: &str) -> Result<Element, WebError> {
    document()
        .and_then(|doc| doc.get_element_by_id(id))
        .ok_or_else(|| WebError::missing(id))
}

/// Collect a `NodeList` into elements, skipping non-element nodes.
#[must_use]
pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All elements in the document matching `selector`.
#[must_use]
pub fn query_all(selector: &str) -> Vec<Element> {
    document()
        .and_then(|doc| doc.query_selector_all(selector).ok())
        .map(|list| elements(&list))
        .unwrap_or_default()
}

/// Move focus to an element, ignoring elements that cannot take focus.
pub fn focus(element: &Element) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.focus();
    }
}

/// Attach a page-lifetime event listener.
///
/// # Errors
/// Returns an error if the browser rejects the listener.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), WebError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Best-effort text for a thrown JavaScript value.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{value:?}"),
    }
}

/// Resolve after `ms` milliseconds on the window's timer queue.
///
/// # Errors
/// Returns the JavaScript error when there is no window or the timer is rejected.
#[allow(clippy::future_not_send)]
pub async fn sleep_ms(ms: i32) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let mut scheduled = Ok(0);
    let promise = Promise::new(&mut |resolve, _reject| {
        scheduled = win.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
    });
    scheduled?;
    JsFuture::from(promise).await.map(drop)
}

/// A scheduled callback that is cancelled when dropped.
///
/// The callback is owned here rather than leaked, so dropping an unfired
/// timer frees it too. wasm-bindgen defers the free when the drop happens
/// inside the callback itself.
pub struct Timeout {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    /// Run `callback` once after `duration_ms`.
    ///
    /// # Errors
    /// Returns an error if no window is available or the timer cannot be scheduled.
    pub fn schedule<F>(duration_ms: u32, callback: F) -> Result<Self, WebError>
    where
        F: FnOnce() + 'static,
    {
        let win = window().ok_or_else(|| WebError::missing("window"))?;
        let mut pending = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(callback) = pending.take() {
                callback();
            }
        }) as Box<dyn FnMut()>);
        let delay = i32::try_from(duration_ms).unwrap_or(i32::MAX);
        let handle = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay,
        )?;
        Ok(Self {
            handle,
            _callback: closure,
        })
    }
}

impl std::fmt::Debug for Timeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeout").field("handle", &self.handle).finish_non_exhaustive()
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        // Clearing an already-fired handle is a no-op.
        if let Some(win) = window() {
            win.clear_timeout_with_handle(self.handle);
        }
    }
}

/// The origin's `localStorage`.
///
/// # Errors
/// Returns [`WebError::Storage`] when storage is disabled or absent.
pub fn local_storage() -> Result<Storage, WebError> {
    window()
        .ok_or_else(|| WebError::Storage("window unavailable".to_string()))?
        .local_storage()
        .map_err(|err| WebError::Storage(js_error_message(&err)))?
        .ok_or_else(|| WebError::Storage("localStorage unavailable".to_string()))
}

/// Evaluate a media query once.
#[must_use]
pub fn media_matches(query: &str) -> bool {
    window()
        .and_then(|win| win.match_media(query).ok().flatten())
        .is_some_and(|mql| mql.matches())
}

/// Whether the page was opened with `?test=1`.
#[must_use]
pub fn test_mode_enabled() -> bool {
    let Some(search) = window().and_then(|win| win.location().search().ok()) else {
        return false;
    };
    search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "test=1")
}
