//! Exchange domain — OHLCV ticks per exchange, currency pair and interval.

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
use std::str::FromStr;

/// Option text meaning "no restriction" in the exchange and pair selectors.
pub const ALL_OPTION: &str = "All";

/// Currency pair forced when entering chart mode.
pub const DEFAULT_CHART_CURRENCY_PAIR: &str = "BTC/DCR";

const CHART_COLOR: &str = "#007bff";
const PRICE_DIGITS: u32 = 8;

// ─── Interval ────────────────────────────────────────────────────────────────

/// Tick interval in seconds. [`Interval::ALL`] selects every interval and is
/// only offered in table mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interval(i64);

impl Interval {
    pub const ALL: Interval = Interval(-1);

    pub fn new(seconds: i64) -> Self {
        Self(seconds)
    }

    pub fn seconds(&self) -> i64 {
        self.0
    }

    pub fn is_all(&self) -> bool {
        self.0 <= 0
    }

    /// Human label such as `5m`, `2h` or `1d`.
    pub fn label(&self) -> String {
        match self.0 {
            s if s <= 0 => ALL_OPTION.to_string(),
            s if s % 86_400 == 0 => format!("{}d", s / 86_400),
            s if s % 3_600 == 0 => format!("{}h", s / 3_600),
            s if s % 60 == 0 => format!("{}m", s / 60),
            s => format!("{}s", s),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── TickField ───────────────────────────────────────────────────────────────

/// The price field plotted in chart mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickField {
    Open,
    #[default]
    Close,
    High,
    Low,
}

impl TickField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for TickField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TickField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown tick field: {}", other)),
        }
    }
}

// ─── Controls ────────────────────────────────────────────────────────────────

/// The option lists rendered into the exchange page's selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeControls {
    /// Exchange selector; the first entry is the "all exchanges" option.
    pub exchanges: Vec<String>,
    /// Currency pair selector; the first entry is the table default.
    pub currency_pairs: Vec<String>,
    pub intervals: Vec<Interval>,
    pub rows_per_page: Vec<u32>,
    pub chart_currency_pair: String,
}

impl Default for ExchangeControls {
    fn default() -> Self {
        Self {
            exchanges: vec![
                ALL_OPTION.to_string(),
                "bittrex".to_string(),
                "poloniex".to_string(),
                "binance".to_string(),
                "bleutrade".to_string(),
            ],
            currency_pairs: vec![
                ALL_OPTION.to_string(),
                "BTC/DCR".to_string(),
                "USD/BTC".to_string(),
            ],
            intervals: vec![
                Interval::ALL,
                Interval::new(300),
                Interval::new(1_800),
                Interval::new(7_200),
                Interval::new(86_400),
            ],
            rows_per_page: vec![20, 30, 50, 100, 150],
            chart_currency_pair: DEFAULT_CHART_CURRENCY_PAIR.to_string(),
        }
    }
}

impl ExchangeControls {
    pub fn table_exchange(&self) -> String {
        self.exchanges
            .first()
            .cloned()
            .unwrap_or_else(|| ALL_OPTION.to_string())
    }

    /// First concrete exchange; charts cannot aggregate across exchanges.
    pub fn chart_exchange(&self) -> String {
        self.exchanges
            .iter()
            .find(|e| e.as_str() != ALL_OPTION)
            .cloned()
            .unwrap_or_else(|| self.table_exchange())
    }

    pub fn table_currency_pair(&self) -> String {
        self.currency_pairs
            .first()
            .cloned()
            .unwrap_or_else(|| ALL_OPTION.to_string())
    }

    /// Longest concrete interval, falling back to one day.
    pub fn widest_interval(&self) -> Interval {
        self.intervals
            .iter()
            .copied()
            .filter(|i| !i.is_all())
            .max()
            .unwrap_or(Interval::new(86_400))
    }

    pub fn default_rows_per_page(&self) -> u32 {
        self.rows_per_page.first().copied().unwrap_or(20)
    }

    pub fn knows_interval(&self, interval: Interval) -> bool {
        self.intervals.contains(&interval)
    }
}

// ─── Filters ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeFilters {
    pub exchange: String,
    pub currency_pair: String,
    pub interval: Interval,
}

/// One edit of the exchange page's selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeFilter {
    Exchange(String),
    CurrencyPair(String),
    Interval(Interval),
}

impl ExchangeFilter {
    /// Charts need one concrete exchange, pair and interval.
    pub fn allowed_in_chart(&self) -> bool {
        match self {
            Self::Exchange(exchange) => exchange != ALL_OPTION,
            Self::CurrencyPair(pair) => pair != ALL_OPTION,
            Self::Interval(interval) => !interval.is_all(),
        }
    }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One exchange tick row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    pub time: String,
    pub exchange_name: String,
    pub high: Decimal,
    pub low: Decimal,
    pub open: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub interval: i64,
    pub currency_pair: String,
}

impl TableRow for ExchangeRecord {
    fn columns() -> &'static [&'static str] {
        &[
            "Time", "Exchange", "High", "Low", "Open", "Close", "Volume", "Interval", "Pair",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.time.clone(),
            self.exchange_name.clone(),
            self.high.normalize().to_string(),
            self.low.normalize().to_string(),
            self.open.normalize().to_string(),
            self.close.normalize().to_string(),
            self.volume.normalize().to_string(),
            Interval::new(self.interval).label(),
            self.currency_pair.clone(),
        ]
    }
}

// ─── Exchange kind ───────────────────────────────────────────────────────────

/// Exchange-rate data: `/exchange` table, `/exchangechart` series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exchange {
    controls: ExchangeControls,
}

impl Exchange {
    pub fn new(controls: ExchangeControls) -> Self {
        Self { controls }
    }

    pub fn controls(&self) -> &ExchangeControls {
        &self.controls
    }
}

impl DataKind for Exchange {
    type Filters = ExchangeFilters;
    type FilterChange = ExchangeFilter;
    type Metric = TickField;
    type Record = ExchangeRecord;
    type PageWire = wire::ExchangePageResponse;
    type ChartWire = wire::ExchangeChartResponse;

    fn name(&self) -> &'static str {
        "exchange"
    }

    fn endpoints(&self) -> Endpoints {
        Endpoints {
            table: "/exchange",
            chart: "/exchangechart",
            page: "/exchanges",
        }
    }

    fn default_filters(&self) -> ExchangeFilters {
        ExchangeFilters {
            exchange: self.controls.table_exchange(),
            currency_pair: self.controls.table_currency_pair(),
            interval: self.controls.widest_interval(),
        }
    }

    fn default_metric(&self) -> TickField {
        TickField::Close
    }

    fn default_rows_per_page(&self) -> u32 {
        self.controls.default_rows_per_page()
    }

    fn apply_mode_defaults(&self, mode: ViewMode, state: &mut ViewState<Self>) {
        let filters = state.filters_mut();
        filters.interval = self.controls.widest_interval();
        match mode {
            ViewMode::Table => {
                filters.exchange = self.controls.table_exchange();
                filters.currency_pair = self.controls.table_currency_pair();
                state.rows_per_page = self.controls.default_rows_per_page();
            }
            ViewMode::Chart => {
                filters.exchange = self.controls.chart_exchange();
                filters.currency_pair = self.controls.chart_currency_pair.clone();
            }
        }
        state.metric = TickField::Close;
    }

    fn apply_filter(&self, mode: ViewMode, filters: &mut ExchangeFilters, change: ExchangeFilter) {
        if mode == ViewMode::Chart && !change.allowed_in_chart() {
            tracing::warn!(
                ?change,
                "Option is only offered in table mode; keeping the current chart filters"
            );
            return;
        }
        match change {
            ExchangeFilter::Exchange(exchange) => filters.exchange = exchange,
            ExchangeFilter::CurrencyPair(pair) => filters.currency_pair = pair,
            ExchangeFilter::Interval(interval) => filters.interval = interval,
        }
    }

    fn table_params(&self, state: &ViewState<Self>, query: &mut Query) {
        let filters = state.filters();
        query
            .set("page", state.current_page())
            .set("selectedExchange", &filters.exchange)
            .set("recordsPerPage", state.rows_per_page())
            .set("selectedCurrencyPair", &filters.currency_pair)
            .set("selectedInterval", filters.interval);
    }

    fn chart_params(&self, state: &ViewState<Self>, query: &mut Query) {
        let filters = state.filters();
        query
            .set("selectedTick", state.metric())
            .set("selectedCurrencyPair", &filters.currency_pair)
            .set("selectedInterval", filters.interval)
            .set("selectedExchange", &filters.exchange);
    }

    fn apply_echo(&self, filters: &mut ExchangeFilters, echo: &ServerEcho) {
        if let Some(pair) = &echo.currency_pair {
            filters.currency_pair = pair.clone();
        }
        if let Some(seconds) = echo.interval {
            let interval = Interval::new(seconds);
            if self.controls.knows_interval(interval) {
                filters.interval = interval;
            } else {
                tracing::warn!(
                    interval = seconds,
                    "Server confirmed an interval the page does not offer; keeping {}",
                    filters.interval
                );
            }
        }
    }

    fn page_result(
        &self,
        wire: wire::ExchangePageResponse,
    ) -> Result<PageResult<ExchangeRecord>, FetchError> {
        PageResult::try_from(wire)
    }

    fn chart_points(
        &self,
        wire: wire::ExchangeChartResponse,
        _metric: TickField,
    ) -> Result<Vec<SeriesPoint>, FetchError> {
        // The server already selected `selectedTick` into each point's `filter`.
        convert::chart_points(wire)
    }

    fn series_meta(&self, state: &ViewState<Self>) -> SeriesMeta {
        SeriesMeta::line(&state.filters().exchange, "Price")
            .with_color(CHART_COLOR)
            .with_digits(PRICE_DIGITS)
    }
}
