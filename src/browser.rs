//! Browser glue — `History`-backed address bar and page attribute helpers.

use crate::error::ViewError;
use crate::shared::InitialPage;
use crate::view::url::AddressBar;
use std::future::Future;
use wasm_bindgen::JsValue;

/// Attribute holding the server-rendered page number.
pub const CURRENT_PAGE_ATTRIBUTE: &str = "data-current-page";

/// Attribute holding the server-rendered view mode.
pub const INITIAL_MODE_ATTRIBUTE: &str = "data-initial-value";

fn window() -> Result<web_sys::Window, ViewError> {
    web_sys::window().ok_or_else(|| ViewError::Browser("no global window".to_string()))
}

/// [`AddressBar`] backed by `window.history`.
pub struct BrowserHistory {
    history: web_sys::History,
}

impl BrowserHistory {
    pub fn from_window() -> Result<Self, ViewError> {
        let history = window()?
            .history()
            .map_err(|e| ViewError::Browser(extract_js_error(&e)))?;
        Ok(Self { history })
    }
}

impl AddressBar for BrowserHistory {
    fn push(&self, url: &str) {
        if let Err(e) = self
            .history
            .push_state_with_url(&JsValue::NULL, "", Some(url))
        {
            tracing::warn!(url, "pushState failed: {}", extract_js_error(&e));
        }
    }

    fn replace(&self, url: &str) {
        if let Err(e) = self
            .history
            .replace_state_with_url(&JsValue::NULL, "", Some(url))
        {
            tracing::warn!(url, "replaceState failed: {}", extract_js_error(&e));
        }
    }
}

/// Read the page number and mode the server rendered into the page.
///
/// `page_selector` and `mode_selector` are CSS selectors for the elements
/// carrying [`CURRENT_PAGE_ATTRIBUTE`] and [`INITIAL_MODE_ATTRIBUTE`]. Missing
/// elements or attributes fall back to page 1 in table mode.
pub fn initial_page(page_selector: &str, mode_selector: &str) -> Result<InitialPage, ViewError> {
    let document = window()?
        .document()
        .ok_or_else(|| ViewError::Browser("no document".to_string()))?;

    let attribute = |selector: &str, name: &str| -> Result<Option<String>, ViewError> {
        let element = document
            .query_selector(selector)
            .map_err(|e| ViewError::Browser(extract_js_error(&e)))?;
        Ok(element.and_then(|el| el.get_attribute(name)))
    };

    let page = attribute(page_selector, CURRENT_PAGE_ATTRIBUTE)?;
    let mode = attribute(mode_selector, INITIAL_MODE_ATTRIBUTE)?;
    Ok(InitialPage::from_attributes(page.as_deref(), mode.as_deref()))
}

/// `window.location.origin`, used as the HTTP base URL in the browser.
pub fn origin() -> Result<String, ViewError> {
    window()?
        .location()
        .origin()
        .map_err(|e| ViewError::Browser(extract_js_error(&e)))
}

/// Run a controller handler without blocking the event callback.
///
/// Handlers only borrow state between awaits, so several may be in flight;
/// the request token decides which response is shown.
pub fn spawn<F>(handler: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(handler);
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn extract_js_error(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        if !s.is_empty() {
            return s;
        }
    }
    if err.is_undefined() {
        return "undefined error".to_string();
    }
    if err.is_null() {
        return "null error".to_string();
    }
    format!("{:?}", err)
}
