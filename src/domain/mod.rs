//! Domain modules organized as vertical slices.
//!
//! Each data kind contains:
//! - `mod.rs` — Rich domain types, control options, and the [`DataKind`] impl
//! - `wire.rs` — Raw serde structs matching backend responses
//! - `convert.rs` — Wire → domain conversions, including error/empty detection
//!
//! The view pipeline in [`crate::view`] is generic over [`DataKind`]; nothing
//! outside these slices knows which endpoints or record shapes a page uses.

pub mod exchange;
pub mod mempool;

use crate::error::FetchError;
use crate::shared::{Query, ViewMode};
use crate::view::series::{SeriesMeta, SeriesPoint};
use crate::view::state::ViewState;
use crate::view::surface::TableRow;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Server routes used by one data kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    /// Paginated table data.
    pub table: &'static str,
    /// Chart series data.
    pub chart: &'static str,
    /// The HTML page whose address is kept in sync.
    pub page: &'static str,
}

impl Endpoints {
    pub fn for_mode(&self, mode: ViewMode) -> &'static str {
        match mode {
            ViewMode::Table => self.table,
            ViewMode::Chart => self.chart,
        }
    }
}

/// Filter values the server confirms in a table response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerEcho {
    pub rows_per_page: Option<u32>,
    pub currency_pair: Option<String>,
    pub interval: Option<i64>,
}

/// One page of table data as returned by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<R> {
    pub current_page: u32,
    pub total_pages: u32,
    pub echo: ServerEcho,
    pub records: Vec<R>,
}

/// Capability descriptor for one kind of data shown by the view pipeline.
///
/// Implementations own the control options the page offers and decide
/// how filters map onto query parameters, which defaults a mode switch
/// forces, and how wire responses become records and chart points.
pub trait DataKind: Debug + Clone + PartialEq + Sized {
    /// Query-relevant filters besides page, rows and metric.
    type Filters: Debug + Clone + PartialEq;
    /// A single user edit of [`Self::Filters`].
    type FilterChange: Debug;
    /// The value plotted in chart mode.
    type Metric: Debug + Clone + Copy + PartialEq;
    /// One table row.
    type Record: Debug + Clone + TableRow;
    /// Table endpoint response body.
    type PageWire: DeserializeOwned;
    /// Chart endpoint response body.
    type ChartWire: DeserializeOwned;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn endpoints(&self) -> Endpoints;

    fn default_filters(&self) -> Self::Filters;

    fn default_metric(&self) -> Self::Metric;

    fn default_rows_per_page(&self) -> u32;

    /// Force the known-good filter combination for `mode`.
    fn apply_mode_defaults(&self, mode: ViewMode, state: &mut ViewState<Self>);

    /// Apply one filter edit made while `mode` is active. Options `mode`
    /// does not offer are ignored.
    fn apply_filter(&self, mode: ViewMode, filters: &mut Self::Filters, change: Self::FilterChange);

    /// Write the table query parameters (everything except `viewOption`).
    fn table_params(&self, state: &ViewState<Self>, query: &mut Query);

    /// Write the chart query parameters (everything except `viewOption` and
    /// the refresh marker).
    fn chart_params(&self, state: &ViewState<Self>, query: &mut Query);

    /// Copy server-confirmed filter values into `filters`.
    fn apply_echo(&self, filters: &mut Self::Filters, echo: &ServerEcho);

    /// Validate a table response.
    fn page_result(&self, wire: Self::PageWire) -> Result<PageResult<Self::Record>, FetchError>;

    /// Validate a chart response and select `metric` from each point.
    fn chart_points(
        &self,
        wire: Self::ChartWire,
        metric: Self::Metric,
    ) -> Result<Vec<SeriesPoint>, FetchError>;

    /// Label, axis titles and plot style for the current chart.
    fn series_meta(&self, state: &ViewState<Self>) -> SeriesMeta;
}

/// Map the common `error` / `message` envelope fields onto [`FetchError`].
///
/// An error field wins over a message; a message alone means "no rows".
pub(crate) fn check_envelope(
    error: Option<String>,
    message: Option<String>,
) -> Result<(), FetchError> {
    if let Some(err) = error.filter(|e| !e.trim().is_empty()) {
        return Err(FetchError::Server(err));
    }
    if let Some(msg) = message.filter(|m| !m.trim().is_empty()) {
        return Err(FetchError::Empty(msg));
    }
    Ok(())
}
