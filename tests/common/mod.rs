//! Test doubles shared by the view integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use tokio::sync::oneshot;

use extdata_view::domain::DataKind;
use extdata_view::error::HttpError;
use extdata_view::http::{CachePolicy, Transport};
use extdata_view::shared::{Query, ViewMode};
use extdata_view::view::{
    AddressBar, Banner, Chart, HistoryMode, PaginationView, TableRow, ViewState, ViewSurface,
};

// ─── Transport ───────────────────────────────────────────────────────────────

pub enum Reply {
    Ready(Result<String, HttpError>),
    Deferred(oneshot::Receiver<Result<String, HttpError>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub path: String,
    pub query: Query,
    pub cache: CachePolicy,
}

/// Answers requests from a queue of canned replies, in order.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<Request>>,
}

impl MockTransport {
    pub fn reply(&self, body: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Reply::Ready(Ok(body.to_string())));
        self
    }

    pub fn fail(&self, err: HttpError) -> &Self {
        self.replies.borrow_mut().push_back(Reply::Ready(Err(err)));
        self
    }

    /// Queue a reply that arrives when the returned sender fires.
    pub fn defer(&self) -> oneshot::Sender<Result<String, HttpError>> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Reply::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Request {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was made")
    }
}

impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &Query, cache: CachePolicy) -> Result<String, HttpError> {
        self.requests.borrow_mut().push(Request {
            path: path.to_string(),
            query: query.clone(),
            cache,
        });
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Deferred(rx)) => rx.await.unwrap_or(Err(HttpError::Timeout)),
            None => Err(HttpError::NotFound(format!("no canned reply for {}", path))),
        }
    }
}

// ─── Surface ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    BeginLoading,
    EndLoading,
    Controls { mode: ViewMode, page: u32 },
    Table(Vec<Vec<String>>),
    Pagination(PaginationView),
    Chart(Chart),
    Banner(Banner),
}

/// Records everything the pipeline asks it to display.
#[derive(Default)]
pub struct RecordingSurface {
    events: RefCell<Vec<Event>>,
}

impl RecordingSurface {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    pub fn last_pagination(&self) -> Option<PaginationView> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            Event::Pagination(p) => Some(*p),
            _ => None,
        })
    }

    pub fn last_banner(&self) -> Option<Banner> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            Event::Banner(b) => Some(b.clone()),
            _ => None,
        })
    }

    pub fn last_table(&self) -> Option<Vec<Vec<String>>> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            Event::Table(rows) => Some(rows.clone()),
            _ => None,
        })
    }

    pub fn last_chart(&self) -> Option<Chart> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            Event::Chart(c) => Some(c.clone()),
            _ => None,
        })
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl<K: DataKind> ViewSurface<K> for RecordingSurface {
    fn begin_loading(&self) {
        self.push(Event::BeginLoading);
    }

    fn end_loading(&self) {
        self.push(Event::EndLoading);
    }

    fn sync_controls(&self, state: &ViewState<K>) {
        self.push(Event::Controls {
            mode: state.mode(),
            page: state.current_page(),
        });
    }

    fn render_table(&self, records: &[K::Record]) {
        self.push(Event::Table(records.iter().map(|r| r.cells()).collect()));
    }

    fn set_pagination(&self, view: &PaginationView) {
        self.push(Event::Pagination(*view));
    }

    fn render_chart(&self, chart: &Chart) {
        self.push(Event::Chart(chart.clone()));
    }

    fn show_banner(&self, banner: &Banner) {
        self.push(Event::Banner(banner.clone()));
    }
}

// ─── Address bar ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingAddressBar {
    entries: RefCell<Vec<(HistoryMode, String)>>,
}

impl RecordingAddressBar {
    pub fn entries(&self) -> Vec<(HistoryMode, String)> {
        self.entries.borrow().clone()
    }

    pub fn last(&self) -> Option<(HistoryMode, String)> {
        self.entries.borrow().last().cloned()
    }
}

impl AddressBar for RecordingAddressBar {
    fn push(&self, url: &str) {
        self.entries
            .borrow_mut()
            .push((HistoryMode::Push, url.to_string()));
    }

    fn replace(&self, url: &str) {
        self.entries
            .borrow_mut()
            .push((HistoryMode::Replace, url.to_string()));
    }
}
