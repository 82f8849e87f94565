//! The view pipeline, generic over [`DataKind`](crate::domain::DataKind).
//!
//! - `state` — mode, filters and page cursor
//! - `query` — state → request parameters
//! - `fetch` — request tokens, loading, response routing
//! - `reconcile` — server page → state + pagination controls
//! - `series` — chart points → renderer-ready series
//! - `url` — address bar sync
//! - `surface` — rendering boundary

pub mod fetch;
pub mod query;
pub mod reconcile;
pub mod series;
pub mod state;
pub mod surface;
pub mod url;

pub use fetch::{FetchCoordinator, Intent, RequestSequence, RequestToken, Settled, Ticket};
pub use query::QueryBuilder;
pub use reconcile::{PaginationView, ResultReconciler};
pub use series::{
    AxisOptions, Chart, ChartAxes, ChartOptions, ChartSeries, Plotter, SeriesMeta, SeriesPoint,
    SeriesShaper,
};
pub use state::ViewState;
pub use surface::{Banner, BannerKind, TableRow, ViewSurface};
pub use url::{AddressBar, HistoryMode, UrlSync};
