//! Address bar synchronisation.

use crate::shared::Query;
use std::cell::RefCell;

/// Browser history boundary.
pub trait AddressBar {
    /// Add a history entry.
    fn push(&self, url: &str);
    /// Overwrite the current history entry.
    fn replace(&self, url: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    Replace,
}

/// Mirrors the resolved query into the address bar.
pub struct UrlSync<A> {
    bar: A,
    last: RefCell<Option<String>>,
}

impl<A: AddressBar> UrlSync<A> {
    pub fn new(bar: A) -> Self {
        Self {
            bar,
            last: RefCell::new(None),
        }
    }

    pub fn bar(&self) -> &A {
        &self.bar
    }

    /// The last address written.
    pub fn last(&self) -> Option<String> {
        self.last.borrow().clone()
    }

    /// Write `path?query` with `mode`, returning the address.
    ///
    /// An address equal to the last one written is replaced even when `mode`
    /// asks for a push, so repeated fetches never stack duplicate entries.
    pub fn sync(&self, path: &str, query: &Query, mode: HistoryMode) -> String {
        let url = query.to_url(path);
        let repeated = self.last.borrow().as_deref() == Some(url.as_str());

        match mode {
            HistoryMode::Push if !repeated => self.bar.push(&url),
            _ => self.bar.replace(&url),
        }
        tracing::debug!(url = %url, ?mode, repeated, "Synced address");

        *self.last.borrow_mut() = Some(url.clone());
        url
    }
}
