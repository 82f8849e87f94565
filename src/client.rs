//! High-level controller — `ViewController` with one async handler per user
//! event.
//!
//! Each handler mutates the view state through its named entry point, then
//! runs one fetch: `begin` → transport → `settle`. No state is borrowed across
//! the `.await`, so handlers for overlapping events may run concurrently on a
//! single thread; the request token decides which response wins.

use crate::domain::exchange::Exchange;
use crate::domain::mempool::Mempool;
use crate::domain::DataKind;
use crate::error::ViewError;
use crate::http::Transport;
use crate::shared::{InitialPage, ViewMode};
use crate::view::fetch::{FetchCoordinator, Intent, Settled};
use crate::view::state::ViewState;
use crate::view::surface::ViewSurface;
use crate::view::url::{AddressBar, UrlSync};

/// Controller for the exchange page.
pub type ExchangeController<T, S, A> = ViewController<Exchange, T, S, A>;

/// Controller for the mempool page.
pub type MempoolController<T, S, A> = ViewController<Mempool, T, S, A>;

/// Drives one page: owns its state, fetches through `T`, renders into `S`
/// and mirrors the address into `A`.
pub struct ViewController<K: DataKind, T, S, A> {
    transport: T,
    coordinator: FetchCoordinator<K, S, A>,
}

impl<K, T, S, A> ViewController<K, T, S, A>
where
    K: DataKind,
    T: Transport,
    S: ViewSurface<K>,
    A: AddressBar,
{
    pub fn builder(kind: K) -> ViewControllerBuilder<K, T, S, A> {
        ViewControllerBuilder {
            kind,
            initial: InitialPage::default(),
            transport: None,
            surface: None,
            address_bar: None,
        }
    }

    pub fn new(kind: K, initial: InitialPage, transport: T, surface: S, address_bar: A) -> Self {
        Self {
            transport,
            coordinator: FetchCoordinator::new(kind, initial, surface, address_bar),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn kind(&self) -> &K {
        self.coordinator.kind()
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState<K> {
        self.coordinator.state()
    }

    pub fn mode(&self) -> ViewMode {
        self.coordinator.state().mode()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn surface(&self) -> &S {
        self.coordinator.surface()
    }

    pub fn url(&self) -> &UrlSync<A> {
        self.coordinator.url()
    }

    pub fn coordinator(&self) -> &FetchCoordinator<K, S, A> {
        &self.coordinator
    }

    // ── User events ──────────────────────────────────────────────────────

    /// First load with the server-rendered page and mode.
    pub async fn start(&self) -> Settled<K::Record> {
        self.dispatch(Intent::Initial).await
    }

    pub async fn switch_mode(&self, mode: ViewMode) -> Settled<K::Record> {
        self.coordinator
            .update(|kind, state| state.switch_mode(kind, mode));
        self.dispatch(Intent::ModeSwitch).await
    }

    pub async fn change_filter(&self, change: K::FilterChange) -> Settled<K::Record> {
        self.coordinator
            .update(|kind, state| state.change_filter(kind, change));
        self.dispatch(Intent::FilterChange).await
    }

    pub async fn set_rows_per_page(&self, rows: u32) -> Settled<K::Record> {
        self.coordinator
            .update(|_, state| state.set_rows_per_page(rows));
        self.dispatch(Intent::RowsChange).await
    }

    pub async fn set_metric(&self, metric: K::Metric) -> Settled<K::Record> {
        self.coordinator.update(|_, state| state.set_metric(metric));
        self.dispatch(Intent::MetricChange).await
    }

    pub async fn next_page(&self) -> Settled<K::Record> {
        self.coordinator.update(|_, state| state.next_page());
        self.dispatch(Intent::PageChange).await
    }

    pub async fn previous_page(&self) -> Settled<K::Record> {
        self.coordinator.update(|_, state| state.previous_page());
        self.dispatch(Intent::PageChange).await
    }

    pub async fn go_to_page(&self, page: i64) -> Settled<K::Record> {
        self.coordinator.update(|_, state| state.go_to_page(page));
        self.dispatch(Intent::PageChange).await
    }

    /// Refetch the current view without changing state.
    pub async fn refresh(&self) -> Settled<K::Record> {
        self.dispatch(Intent::Refresh).await
    }

    // ── Internal ─────────────────────────────────────────────────────────

    async fn dispatch(&self, intent: Intent) -> Settled<K::Record> {
        let ticket = self.coordinator.begin(intent);
        let raw = self
            .transport
            .get(ticket.path, &ticket.query, ticket.cache)
            .await;
        self.coordinator.settle(ticket, raw)
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct ViewControllerBuilder<K, T, S, A> {
    kind: K,
    initial: InitialPage,
    transport: Option<T>,
    surface: Option<S>,
    address_bar: Option<A>,
}

impl<K, T, S, A> ViewControllerBuilder<K, T, S, A>
where
    K: DataKind,
    T: Transport,
    S: ViewSurface<K>,
    A: AddressBar,
{
    /// Page and mode rendered by the server; defaults to page 1, table.
    pub fn initial(mut self, initial: InitialPage) -> Self {
        self.initial = initial;
        self
    }

    pub fn transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn address_bar(mut self, address_bar: A) -> Self {
        self.address_bar = Some(address_bar);
        self
    }

    pub fn build(self) -> Result<ViewController<K, T, S, A>, ViewError> {
        let missing = |what: &str| ViewError::Other(format!("{} not set", what));
        Ok(ViewController::new(
            self.kind,
            self.initial,
            self.transport.ok_or_else(|| missing("transport"))?,
            self.surface.ok_or_else(|| missing("surface"))?,
            self.address_bar.ok_or_else(|| missing("address bar"))?,
        ))
    }
}
