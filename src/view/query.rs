//! Query construction from view state.

use crate::domain::DataKind;
use crate::network::REFRESH_MARKER;
use crate::shared::{Query, ViewMode};
use crate::view::state::ViewState;

/// Builds request parameters for a mode. Pure: equal inputs give equal
/// queries.
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn build<K: DataKind>(kind: &K, state: &ViewState<K>, mode: ViewMode) -> Query {
        let mut query = Query::new();
        match mode {
            ViewMode::Table => {
                kind.table_params(state, &mut query);
                query.set("viewOption", mode);
            }
            ViewMode::Chart => {
                kind.chart_params(state, &mut query);
                query.set("viewOption", mode);
                query.set(REFRESH_MARKER.0, REFRESH_MARKER.1);
            }
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exchange::{Exchange, ExchangeFilter, Interval, TickField};
    use crate::domain::mempool::{Mempool, MempoolMetric};
    use crate::shared::InitialPage;

    #[test]
    fn test_exchange_table_query() {
        let kind = Exchange::default();
        let mut state = ViewState::new(&kind, InitialPage::default());
        state.change_filter(&kind, ExchangeFilter::Exchange("poloniex".into()));
        state.go_to_page(2);

        let q = QueryBuilder::build(&kind, &state, ViewMode::Table);
        assert_eq!(
            q.keys(),
            vec![
                "page",
                "selectedExchange",
                "recordsPerPage",
                "selectedCurrencyPair",
                "selectedInterval",
                "viewOption"
            ]
        );
        assert_eq!(
            q.to_query_string(),
            "page=2&selectedExchange=poloniex&recordsPerPage=20\
             &selectedCurrencyPair=All&selectedInterval=86400&viewOption=table"
        );
    }

    #[test]
    fn test_exchange_chart_query() {
        let kind = Exchange::default();
        let mut state = ViewState::new(&kind, InitialPage::default());
        state.switch_mode(&kind, ViewMode::Chart);
        state.set_metric(TickField::High);
        state.change_filter(&kind, ExchangeFilter::Interval(Interval::new(7_200)));

        let q = QueryBuilder::build(&kind, &state, ViewMode::Chart);
        assert_eq!(
            q.to_query_string(),
            "selectedTick=high&selectedCurrencyPair=BTC%2FDCR&selectedInterval=7200\
             &selectedExchange=bittrex&viewOption=chart&refresh=1"
        );
        assert!(!q.contains("page"));
    }

    #[test]
    fn test_mempool_queries() {
        let kind = Mempool::default();
        let mut state = ViewState::new(&kind, InitialPage::default());
        assert_eq!(
            QueryBuilder::build(&kind, &state, ViewMode::Table).to_query_string(),
            "page=1&recordsPerPage=20&viewOption=table"
        );
        state.set_metric(MempoolMetric::TotalFee);
        assert_eq!(
            QueryBuilder::build(&kind, &state, ViewMode::Chart).to_query_string(),
            "chartFilter=total_fee&viewOption=chart&refresh=1"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let kind = Exchange::default();
        let state = ViewState::new(&kind, InitialPage::default());
        for mode in [ViewMode::Table, ViewMode::Chart] {
            assert_eq!(
                QueryBuilder::build(&kind, &state, mode),
                QueryBuilder::build(&kind, &state.clone(), mode)
            );
        }
    }
}
