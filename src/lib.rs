//! # extdata-view
//!
//! View-state reconciliation and data shaping for the exchange-rate and
//! mempool pages, for native and WASM targets.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Shared types, domain slices (`exchange`, `mempool`), errors
//! 2. **View pipeline** — State, query building, fetch coordination,
//!    reconciliation, series shaping and address sync, generic over `DataKind`
//! 3. **HTTP** — The `Transport` seam and `ExtDataHttp` (`reqwest`)
//! 4. **Controller** — `ViewController` with one async handler per user event
//! 5. **Browser** — `History`-backed address bar and page attributes (`wasm`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use extdata_view::prelude::*;
//!
//! let controller = ExchangeController::builder(Exchange::default())
//!     .initial(browser::initial_page("#pagination", "#view-option")?)
//!     .transport(ExtDataHttp::new(&browser::origin()?)?)
//!     .surface(my_surface)
//!     .address_bar(BrowserHistory::from_window()?)
//!     .build()?;
//!
//! controller.start().await;
//! controller.switch_mode(ViewMode::Chart).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network and routing constants.
pub mod network;

// ── Layer 2: View pipeline ───────────────────────────────────────────────────

/// State, query, fetch, reconcile, series and URL components.
pub mod view;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// Transport trait and the `reqwest` client.
pub mod http;

// ── Layer 4: Controller ──────────────────────────────────────────────────────

/// `ViewController` — the primary entry point.
pub mod client;

// ── Layer 5: Browser ─────────────────────────────────────────────────────────

/// `web-sys` glue for the address bar and server-rendered attributes.
#[cfg(feature = "wasm")]
pub mod browser;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared types
    pub use crate::shared::{InitialPage, Query, ViewMode};

    // Domain types — exchange
    pub use crate::domain::exchange::{
        Exchange, ExchangeControls, ExchangeFilter, ExchangeFilters, ExchangeRecord, Interval,
        TickField,
    };

    // Domain types — mempool
    pub use crate::domain::mempool::{Mempool, MempoolControls, MempoolMetric, MempoolRecord};

    pub use crate::domain::{DataKind, PageResult};

    // View pipeline
    pub use crate::view::{
        AddressBar, Banner, BannerKind, Chart, ChartOptions, ChartSeries, HistoryMode, Intent,
        PaginationView, Plotter, SeriesMeta, SeriesPoint, Settled, TableRow, ViewState,
        ViewSurface,
    };

    // Errors
    pub use crate::error::{FetchError, FetchErrorKind, HttpError, ViewError};

    // Network
    pub use crate::network::DEFAULT_BASE_URL;

    // HTTP
    pub use crate::http::{CachePolicy, Transport};
    #[cfg(feature = "http")]
    pub use crate::http::ExtDataHttp;

    // Controller
    pub use crate::client::{
        ExchangeController, MempoolController, ViewController, ViewControllerBuilder,
    };

    // Browser
    #[cfg(feature = "wasm")]
    pub use crate::browser::{self, BrowserHistory};
}
