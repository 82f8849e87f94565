//! Fetch coordination — one request per user action, stale responses dropped.
//!
//! A request is split into two synchronous halves so no state is borrowed
//! while the network call is pending:
//!
//! 1. [`FetchCoordinator::begin`] builds the query from the current state,
//!    issues a [`RequestToken`] for the active mode and enters loading.
//! 2. [`FetchCoordinator::settle`] takes the raw response body. It is applied
//!    only if its token is still the latest for its mode and that mode is
//!    still active; otherwise it is dropped as [`Settled::Superseded`].

use crate::domain::DataKind;
use crate::error::{FetchError, FetchErrorKind, HttpError};
use crate::http::CachePolicy;
use crate::shared::{InitialPage, Query, ViewMode};
use crate::view::query::QueryBuilder;
use crate::view::reconcile::{PaginationView, ResultReconciler};
use crate::view::series::{Chart, SeriesShaper};
use crate::view::state::ViewState;
use crate::view::surface::{Banner, ViewSurface};
use crate::view::url::{AddressBar, HistoryMode, UrlSync};
use std::cell::RefCell;

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// Identifies one issued request. Tokens increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues tokens and remembers the latest one per mode.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: u64,
    latest_table: Option<RequestToken>,
    latest_chart: Option<RequestToken>,
}

impl RequestSequence {
    pub fn issue(&mut self, mode: ViewMode) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        match mode {
            ViewMode::Table => self.latest_table = Some(token),
            ViewMode::Chart => self.latest_chart = Some(token),
        }
        token
    }

    pub fn is_latest(&self, token: RequestToken, mode: ViewMode) -> bool {
        let latest = match mode {
            ViewMode::Table => self.latest_table,
            ViewMode::Chart => self.latest_chart,
        };
        latest == Some(token)
    }
}

// ─── Intent ──────────────────────────────────────────────────────────────────

/// The user action that triggered a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Initial,
    ModeSwitch,
    FilterChange,
    RowsChange,
    MetricChange,
    PageChange,
    Refresh,
}

impl Intent {
    /// Only navigation adds a history entry.
    pub fn history_mode(&self) -> HistoryMode {
        match self {
            Intent::ModeSwitch | Intent::PageChange => HistoryMode::Push,
            _ => HistoryMode::Replace,
        }
    }
}

/// An issued request, carried from [`FetchCoordinator::begin`] to
/// [`FetchCoordinator::settle`].
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub token: RequestToken,
    pub mode: ViewMode,
    pub intent: Intent,
    /// API route to fetch.
    pub path: &'static str,
    pub query: Query,
    pub cache: CachePolicy,
}

/// What settling a ticket did.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled<R> {
    Table {
        pagination: PaginationView,
        records: Vec<R>,
    },
    Chart(Chart),
    /// The server had nothing to show; an informational banner is up.
    Empty(String),
    /// An error banner is up.
    Failed {
        kind: FetchErrorKind,
        message: String,
    },
    /// A newer request owns the view; nothing was touched.
    Superseded,
}

impl<R> Settled<R> {
    pub fn is_superseded(&self) -> bool {
        matches!(self, Settled::Superseded)
    }
}

// ─── Coordinator ─────────────────────────────────────────────────────────────

/// Owns the view state and routes responses to the surface and address bar.
pub struct FetchCoordinator<K: DataKind, S, A> {
    kind: K,
    state: RefCell<ViewState<K>>,
    sequence: RefCell<RequestSequence>,
    surface: S,
    url: UrlSync<A>,
}

impl<K, S, A> FetchCoordinator<K, S, A>
where
    K: DataKind,
    S: ViewSurface<K>,
    A: AddressBar,
{
    pub fn new(kind: K, initial: InitialPage, surface: S, bar: A) -> Self {
        let state = ViewState::new(&kind, initial);
        Self {
            kind,
            state: RefCell::new(state),
            sequence: RefCell::new(RequestSequence::default()),
            surface,
            url: UrlSync::new(bar),
        }
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState<K> {
        self.state.borrow().clone()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn url(&self) -> &UrlSync<A> {
        &self.url
    }

    /// Run one state mutation.
    pub fn update(&self, f: impl FnOnce(&K, &mut ViewState<K>)) {
        let mut state = self.state.borrow_mut();
        f(&self.kind, &mut *state);
    }

    /// Issue a request for the active mode.
    pub fn begin(&self, intent: Intent) -> Ticket {
        let ticket = {
            let state = self.state.borrow();
            let mode = state.mode();
            let token = self.sequence.borrow_mut().issue(mode);
            Ticket {
                token,
                mode,
                intent,
                path: self.kind.endpoints().for_mode(mode),
                query: QueryBuilder::build(&self.kind, &state, mode),
                cache: match mode {
                    ViewMode::Table => CachePolicy::Default,
                    ViewMode::Chart => CachePolicy::NoStore,
                },
            }
        };

        tracing::debug!(
            kind = self.kind.name(),
            token = ticket.token.value(),
            mode = %ticket.mode,
            ?intent,
            query = %ticket.query,
            "Issuing request"
        );
        self.surface.begin_loading();
        self.surface.sync_controls(&self.state.borrow());
        ticket
    }

    /// Whether `ticket` may still be applied.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.state.borrow().mode() == ticket.mode
            && self.sequence.borrow().is_latest(ticket.token, ticket.mode)
    }

    /// Apply the response for `ticket`, unless a newer request owns the view.
    pub fn settle(&self, ticket: Ticket, raw: Result<String, HttpError>) -> Settled<K::Record> {
        if !self.is_current(&ticket) {
            tracing::debug!(
                kind = self.kind.name(),
                token = ticket.token.value(),
                mode = %ticket.mode,
                "Dropping superseded response"
            );
            return Settled::Superseded;
        }

        self.surface.end_loading();
        let outcome = match ticket.mode {
            ViewMode::Table => self.settle_table(&ticket, raw),
            ViewMode::Chart => self.settle_chart(&ticket, raw),
        };
        outcome.unwrap_or_else(|err| self.settle_error(&ticket, err))
    }

    fn settle_table(
        &self,
        ticket: &Ticket,
        raw: Result<String, HttpError>,
    ) -> Result<Settled<K::Record>, FetchError> {
        let body = raw?;
        let wire: K::PageWire = serde_json::from_str(&body)?;
        let page = self.kind.page_result(wire)?;

        let (pagination, query) = {
            let mut state = self.state.borrow_mut();
            let pagination = ResultReconciler::apply(&self.kind, &mut state, &page);
            (pagination, QueryBuilder::build(&self.kind, &state, ViewMode::Table))
        };

        self.surface.render_table(&page.records);
        self.surface.set_pagination(&pagination);
        self.surface.sync_controls(&self.state.borrow());
        self.url.sync(
            self.kind.endpoints().page,
            &query,
            ticket.intent.history_mode(),
        );

        Ok(Settled::Table {
            pagination,
            records: page.records,
        })
    }

    fn settle_chart(
        &self,
        ticket: &Ticket,
        raw: Result<String, HttpError>,
    ) -> Result<Settled<K::Record>, FetchError> {
        let body = raw?;
        let wire: K::ChartWire = serde_json::from_str(&body)?;

        let (metric, meta) = {
            let state = self.state.borrow();
            (state.metric(), self.kind.series_meta(&state))
        };
        let points = self.kind.chart_points(wire, metric)?;
        let chart = SeriesShaper::shape(points, meta)?;

        tracing::debug!(
            kind = self.kind.name(),
            points = chart.series.len(),
            "Shaped chart series"
        );
        self.surface.render_chart(&chart);
        self.url.sync(
            self.kind.endpoints().page,
            &ticket.query,
            ticket.intent.history_mode(),
        );

        Ok(Settled::Chart(chart))
    }

    fn settle_error(&self, ticket: &Ticket, err: FetchError) -> Settled<K::Record> {
        match err {
            FetchError::Empty(message) => {
                tracing::debug!(kind = self.kind.name(), message = %message, "Empty result");
                if ticket.mode == ViewMode::Table {
                    self.surface.set_pagination(&PaginationView::empty());
                }
                self.surface.show_banner(&Banner::info(message.clone()));
                Settled::Empty(message)
            }
            err => {
                let kind = err.kind();
                let message = err.to_string();
                tracing::warn!(
                    kind = self.kind.name(),
                    error_kind = ?kind,
                    mode = %ticket.mode,
                    "Fetch failed: {}",
                    message
                );
                self.surface.show_banner(&Banner::error(message.clone()));
                Settled::Failed { kind, message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let mut seq = RequestSequence::default();
        let a = seq.issue(ViewMode::Table);
        let b = seq.issue(ViewMode::Chart);
        let c = seq.issue(ViewMode::Table);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_latest_per_mode() {
        let mut seq = RequestSequence::default();
        let a = seq.issue(ViewMode::Table);
        let b = seq.issue(ViewMode::Chart);
        assert!(seq.is_latest(a, ViewMode::Table));
        assert!(seq.is_latest(b, ViewMode::Chart));
        assert!(!seq.is_latest(a, ViewMode::Chart));

        let c = seq.issue(ViewMode::Table);
        assert!(!seq.is_latest(a, ViewMode::Table));
        assert!(seq.is_latest(c, ViewMode::Table));
        assert!(seq.is_latest(b, ViewMode::Chart));
    }

    #[test]
    fn test_history_modes() {
        assert_eq!(Intent::ModeSwitch.history_mode(), HistoryMode::Push);
        assert_eq!(Intent::PageChange.history_mode(), HistoryMode::Push);
        for intent in [
            Intent::Initial,
            Intent::FilterChange,
            Intent::RowsChange,
            Intent::MetricChange,
            Intent::Refresh,
        ] {
            assert_eq!(intent.history_mode(), HistoryMode::Replace);
        }
    }
}
