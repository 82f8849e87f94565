//! Mempool domain — periodic snapshots of transaction count, size and fees.

mod convert;
pub mod wire;

use crate::domain::{DataKind, Endpoints, PageResult, ServerEcho};
use crate::error::FetchError;
use crate::shared::{Query, ViewMode};
use crate::view::series::{SeriesMeta, SeriesPoint};
use crate::view::state::ViewState;
use crate::view::surface::TableRow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Decimal places shown for the total fee column.
pub const FEE_DIGITS: u32 = 8;

// ─── Metric ──────────────────────────────────────────────────────────────────

/// The snapshot field plotted in chart mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MempoolMetric {
    #[default]
    Size,
    TotalFee,
    NumberOfTransactions,
}

impl MempoolMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::TotalFee => "total_fee",
            Self::NumberOfTransactions => "number_of_transactions",
        }
    }

    /// Axis and legend title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Size => "Size",
            Self::TotalFee => "Total Fee",
            Self::NumberOfTransactions => "# of Transactions",
        }
    }
}

impl std::fmt::Display for MempoolMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MempoolMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "size" => Ok(Self::Size),
            "total_fee" => Ok(Self::TotalFee),
            "number_of_transactions" => Ok(Self::NumberOfTransactions),
            other => Err(format!("unknown mempool metric: {}", other)),
        }
    }
}

// ─── Controls ────────────────────────────────────────────────────────────────

/// Option lists rendered into the mempool page.
#[derive(Debug, Clone, PartialEq)]
pub struct MempoolControls {
    pub rows_per_page: Vec<u32>,
}

impl Default for MempoolControls {
    fn default() -> Self {
        Self {
            rows_per_page: vec![20, 30, 50, 100, 150],
        }
    }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One mempool snapshot row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MempoolRecord {
    pub time: String,
    pub number_of_transactions: u64,
    pub size: u64,
    pub total_fee: Decimal,
}

impl TableRow for MempoolRecord {
    fn columns() -> &'static [&'static str] {
        &["Time", "# of Transactions", "Size", "Total Fee"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.time.clone(),
            self.number_of_transactions.to_string(),
            self.size.to_string(),
            format!("{:.*}", FEE_DIGITS as usize, self.total_fee),
        ]
    }
}

// ─── Mempool kind ────────────────────────────────────────────────────────────

/// Mempool data: `/getmempool` table, `/mempoolcharts` series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mempool {
    controls: MempoolControls,
}

impl Mempool {
    pub fn new(controls: MempoolControls) -> Self {
        Self { controls }
    }

    pub fn controls(&self) -> &MempoolControls {
        &self.controls
    }
}

impl DataKind for Mempool {
    type Filters = ();
    type FilterChange = Infallible;
    type Metric = MempoolMetric;
    type Record = MempoolRecord;
    type PageWire = wire::MempoolPageResponse;
    type ChartWire = wire::MempoolChartResponse;

    fn name(&self) -> &'static str {
        "mempool"
    }

    fn endpoints(&self) -> Endpoints {
        Endpoints {
            table: "/getmempool",
            chart: "/mempoolcharts",
            page: "/mempool",
        }
    }

    fn default_filters(&self) {}

    fn default_metric(&self) -> MempoolMetric {
        MempoolMetric::Size
    }

    fn default_rows_per_page(&self) -> u32 {
        self.controls.rows_per_page.first().copied().unwrap_or(20)
    }

    fn apply_mode_defaults(&self, mode: ViewMode, state: &mut ViewState<Self>) {
        if mode == ViewMode::Chart {
            state.metric = MempoolMetric::Size;
        }
    }

    fn apply_filter(&self, _mode: ViewMode, _filters: &mut (), change: Infallible) {
        match change {}
    }

    fn table_params(&self, state: &ViewState<Self>, query: &mut Query) {
        query
            .set("page", state.current_page())
            .set("recordsPerPage", state.rows_per_page());
    }

    fn chart_params(&self, state: &ViewState<Self>, query: &mut Query) {
        query.set("chartFilter", state.metric());
    }

    fn apply_echo(&self, _filters: &mut (), _echo: &ServerEcho) {}

    fn page_result(
        &self,
        wire: wire::MempoolPageResponse,
    ) -> Result<PageResult<MempoolRecord>, FetchError> {
        PageResult::try_from(wire)
    }

    fn chart_points(
        &self,
        wire: wire::MempoolChartResponse,
        metric: MempoolMetric,
    ) -> Result<Vec<SeriesPoint>, FetchError> {
        convert::chart_points(wire, metric)
    }

    fn series_meta(&self, state: &ViewState<Self>) -> SeriesMeta {
        let title = state.metric().title();
        SeriesMeta::bar(title, title)
            .with_x_label("Date")
            .with_zero()
            .with_kmb()
            .with_range_selector()
    }
}
