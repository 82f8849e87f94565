//! View state container — controller-owned, mutated only through the entry
//! points below.

use crate::domain::DataKind;
use crate::shared::{clamp_page, InitialPage, ViewMode};

/// Current mode, filter values and page cursor of one page.
///
/// Every query-relevant mutation resets the page cursor to 1; page
/// navigation moves the cursor and touches nothing else. The cursor never
/// drops below 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<K: DataKind> {
    pub(crate) mode: ViewMode,
    pub(crate) filters: K::Filters,
    pub(crate) metric: K::Metric,
    pub(crate) rows_per_page: u32,
    pub(crate) current_page: u32,
}

impl<K: DataKind> ViewState<K> {
    /// Build the state the page loads with.
    ///
    /// The initial mode's defaults are applied but the page supplied by the
    /// server-rendered markup is kept, so a deep link restores its page.
    pub fn new(kind: &K, initial: InitialPage) -> Self {
        let mut state = Self {
            mode: initial.mode,
            filters: kind.default_filters(),
            metric: kind.default_metric(),
            rows_per_page: kind.default_rows_per_page().max(1),
            current_page: initial.current_page.max(1),
        };
        kind.apply_mode_defaults(initial.mode, &mut state);
        state
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn filters(&self) -> &K::Filters {
        &self.filters
    }

    pub fn metric(&self) -> K::Metric {
        self.metric
    }

    pub fn rows_per_page(&self) -> u32 {
        self.rows_per_page
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    // ── Query-relevant mutations ─────────────────────────────────────────

    /// Enter `mode`, forcing the kind's defaults for it.
    pub fn switch_mode(&mut self, kind: &K, mode: ViewMode) {
        self.mode = mode;
        kind.apply_mode_defaults(mode, self);
        self.current_page = 1;
    }

    pub fn change_filter(&mut self, kind: &K, change: K::FilterChange) {
        kind.apply_filter(self.mode, &mut self.filters, change);
        self.current_page = 1;
    }

    pub fn set_rows_per_page(&mut self, rows: u32) {
        self.rows_per_page = rows.max(1);
        self.current_page = 1;
    }

    pub fn set_metric(&mut self, metric: K::Metric) {
        self.metric = metric;
        self.current_page = 1;
    }

    // ── Page navigation ──────────────────────────────────────────────────

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn go_to_page(&mut self, page: i64) {
        self.current_page = clamp_page(page);
    }

    // ── Server reconciliation ────────────────────────────────────────────

    pub(crate) fn confirm_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    pub(crate) fn confirm_rows_per_page(&mut self, rows: u32) {
        if rows > 0 {
            self.rows_per_page = rows;
        }
    }

    pub(crate) fn filters_mut(&mut self) -> &mut K::Filters {
        &mut self.filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exchange::{Exchange, ExchangeFilter, Interval, TickField};
    use crate::domain::mempool::{Mempool, MempoolMetric};

    fn exchange_state(page: u32) -> (Exchange, ViewState<Exchange>) {
        let kind = Exchange::default();
        let state = ViewState::new(
            &kind,
            InitialPage {
                current_page: page,
                mode: ViewMode::Table,
            },
        );
        (kind, state)
    }

    #[test]
    fn test_new_keeps_initial_page() {
        let (_, state) = exchange_state(4);
        assert_eq!(state.current_page(), 4);
        assert_eq!(state.mode(), ViewMode::Table);
    }

    #[test]
    fn test_new_clamps_zero_page() {
        let (_, state) = exchange_state(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let (kind, mut state) = exchange_state(6);
        let changes = vec![
            ExchangeFilter::Exchange("poloniex".into()),
            ExchangeFilter::CurrencyPair("BTC/DCR".into()),
            ExchangeFilter::Interval(Interval::new(300)),
        ];
        for change in changes {
            state.go_to_page(6);
            state.change_filter(&kind, change);
            assert_eq!(state.current_page(), 1);
        }
    }

    #[test]
    fn test_rows_and_metric_reset_page() {
        let (_, mut state) = exchange_state(3);
        state.set_rows_per_page(50);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.rows_per_page(), 50);

        state.go_to_page(3);
        state.set_metric(TickField::High);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.metric(), TickField::High);
    }

    #[test]
    fn test_rows_per_page_never_zero() {
        let (_, mut state) = exchange_state(1);
        state.set_rows_per_page(0);
        assert_eq!(state.rows_per_page(), 1);
    }

    #[test]
    fn test_page_navigation_touches_only_page() {
        let (_, mut state) = exchange_state(2);
        let before = state.clone();

        state.next_page();
        assert_eq!(state.current_page(), 3);
        state.previous_page();
        state.previous_page();
        assert_eq!(state.current_page(), 1);

        let mut expected = before;
        expected.current_page = 1;
        assert_eq!(state, expected);
    }

    #[test]
    fn test_previous_page_clamps_at_one() {
        let (_, mut state) = exchange_state(1);
        for _ in 0..5 {
            state.previous_page();
            assert_eq!(state.current_page(), 1);
        }
    }

    #[test]
    fn test_go_to_page_clamps() {
        let (_, mut state) = exchange_state(1);
        state.go_to_page(-3);
        assert_eq!(state.current_page(), 1);
        state.go_to_page(12);
        assert_eq!(state.current_page(), 12);
    }

    #[test]
    fn test_chart_switch_forces_defaults() {
        let (kind, mut state) = exchange_state(5);
        state.set_metric(TickField::Open);
        state.change_filter(&kind, ExchangeFilter::Interval(Interval::new(300)));
        state.change_filter(&kind, ExchangeFilter::CurrencyPair("USD/BTC".into()));

        state.switch_mode(&kind, ViewMode::Chart);

        assert_eq!(state.mode(), ViewMode::Chart);
        assert_eq!(state.metric(), TickField::Close);
        assert_eq!(state.filters().currency_pair, "BTC/DCR");
        assert_eq!(state.filters().interval, kind.controls().widest_interval());
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_mempool_chart_switch_resets_metric() {
        let kind = Mempool::default();
        let mut state = ViewState::new(&kind, InitialPage::default());
        state.set_metric(MempoolMetric::TotalFee);
        state.switch_mode(&kind, ViewMode::Chart);
        assert_eq!(state.metric(), MempoolMetric::Size);
    }

    #[test]
    fn test_mempool_table_switch_keeps_rows() {
        let kind = Mempool::default();
        let mut state = ViewState::new(&kind, InitialPage::default());
        state.set_rows_per_page(100);
        state.switch_mode(&kind, ViewMode::Table);
        assert_eq!(state.rows_per_page(), 100);
    }
}
