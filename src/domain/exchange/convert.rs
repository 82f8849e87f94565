//! Conversions from exchange wire types to domain types.

use super::wire::{ExchangeChartResponse, ExchangePageResponse, ExchangeRecordResponse};
use super::ExchangeRecord;
use crate::domain::{check_envelope, PageResult, ServerEcho};
use crate::error::FetchError;
use crate::view::series::SeriesPoint;
use rust_decimal::Decimal;
use std::str::FromStr;

fn decimal(text: &str) -> Decimal {
    Decimal::from_str(text.trim())
        .or_else(|_| Decimal::from_scientific(text.trim()))
        .unwrap_or_default()
}

impl From<ExchangeRecordResponse> for ExchangeRecord {
    fn from(r: ExchangeRecordResponse) -> Self {
        Self {
            high: decimal(&r.high),
            low: decimal(&r.low),
            open: decimal(&r.open),
            close: decimal(&r.close),
            volume: decimal(&r.volume),
            interval: r.interval.unwrap_or_default(),
            time: r.time,
            exchange_name: r.exchange_name,
            currency_pair: r.currency_pair,
        }
    }
}

impl TryFrom<ExchangePageResponse> for PageResult<ExchangeRecord> {
    type Error = FetchError;

    fn try_from(source: ExchangePageResponse) -> Result<Self, Self::Error> {
        check_envelope(source.error, source.message)?;

        Ok(PageResult {
            current_page: source
                .current_page
                .map(crate::shared::clamp_page)
                .unwrap_or(1),
            total_pages: source
                .total_pages
                .and_then(|t| u32::try_from(t).ok())
                .unwrap_or(0),
            echo: ServerEcho {
                rows_per_page: source.selected_num,
                currency_pair: source.selected_currency_pair,
                interval: source.selected_interval,
            },
            records: source
                .ex_data
                .unwrap_or_default()
                .into_iter()
                .map(ExchangeRecord::from)
                .collect(),
        })
    }
}

/// Validate a chart response and keep points that carry a value.
pub(super) fn chart_points(source: ExchangeChartResponse) -> Result<Vec<SeriesPoint>, FetchError> {
    check_envelope(source.error, None)?;

    match source.chart_data {
        Some(points) => {
            let received = points.len();
            let usable: Vec<SeriesPoint> = points
                .into_iter()
                .filter_map(|p| Some(SeriesPoint::new(p.time?, p.filter?)))
                .collect();
            if usable.len() < received {
                tracing::warn!(
                    dropped = received - usable.len(),
                    "Skipping exchange chart points without a usable time or value"
                );
            }
            Ok(usable)
        }
        // No series at all: the message (if any) explains why.
        None => Err(FetchError::Empty(
            source
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| crate::view::series::NO_DATA_MESSAGE.to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn page_json() -> &'static str {
        r#"{
            "currentPage": 2,
            "totalPages": 5,
            "selectedNum": "30",
            "selectedCurrencyPair": "BTC/DCR",
            "selectedInterval": 300,
            "exData": [
                {
                    "time": "2019-03-01 10:00:00",
                    "exchange_name": "bittrex",
                    "high": 0.0231,
                    "low": "0.0229",
                    "open": 0.023,
                    "close": 0.02305,
                    "volume": 125.5,
                    "interval": 300,
                    "currency_pair": "BTC/DCR"
                }
            ]
        }"#
    }

    #[test]
    fn test_page_response_conversion() {
        let wire: ExchangePageResponse = serde_json::from_str(page_json()).unwrap();
        let page = PageResult::<ExchangeRecord>::try_from(wire).unwrap();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.echo.rows_per_page, Some(30));
        assert_eq!(page.echo.currency_pair.as_deref(), Some("BTC/DCR"));
        assert_eq!(page.echo.interval, Some(300));
        assert_eq!(page.records.len(), 1);

        let r = &page.records[0];
        assert_eq!(r.exchange_name, "bittrex");
        assert_eq!(r.high, Decimal::from_str("0.0231").unwrap());
        assert_eq!(r.low, Decimal::from_str("0.0229").unwrap());
        assert_eq!(r.volume, Decimal::from_str("125.5").unwrap());
        assert_eq!(r.interval, 300);
    }

    #[test]
    fn test_page_message_is_empty_result() {
        let wire: ExchangePageResponse =
            serde_json::from_str(r#"{"message": "no records found"}"#).unwrap();
        let err = PageResult::<ExchangeRecord>::try_from(wire).unwrap_err();
        assert!(matches!(err, FetchError::Empty(m) if m == "no records found"));
    }

    #[test]
    fn test_page_error_is_server_error() {
        let wire: ExchangePageResponse =
            serde_json::from_str(r#"{"error": "invalid filter"}"#).unwrap();
        let err = PageResult::<ExchangeRecord>::try_from(wire).unwrap_err();
        assert!(matches!(err, FetchError::Server(m) if m == "invalid filter"));
    }

    #[test]
    fn test_page_missing_counters_default() {
        let wire: ExchangePageResponse = serde_json::from_str(r#"{"exData": []}"#).unwrap();
        let page = PageResult::<ExchangeRecord>::try_from(wire).unwrap();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_unparsable_price_defaults_to_zero() {
        let wire = ExchangeRecordResponse {
            time: String::new(),
            exchange_name: "x".into(),
            high: "n/a".into(),
            low: "1e-3".into(),
            open: String::new(),
            close: "1".into(),
            volume: "2".into(),
            interval: None,
            currency_pair: String::new(),
        };
        let r = ExchangeRecord::from(wire);
        assert_eq!(r.high, Decimal::ZERO);
        assert_eq!(r.low, Decimal::from_str("0.001").unwrap());
        assert_eq!(r.open, Decimal::ZERO);
    }

    #[test]
    fn test_chart_points_skip_missing_values() {
        let wire: ExchangeChartResponse = serde_json::from_str(
            r#"{"chartData": [
                {"time": "2019-03-01T00:00:00Z", "filter": 0.023},
                {"time": "2019-03-02T00:00:00Z", "filter": null},
                {"time": 1551571200000, "filter": 0.025}
            ]}"#,
        )
        .unwrap();
        let points = chart_points(wire).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].time, Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(points[1].time, Utc.with_ymd_and_hms(2019, 3, 3, 0, 0, 0).unwrap());
        assert_eq!(points[1].value, 0.025);
    }

    #[test]
    fn test_chart_without_data_uses_message() {
        let wire: ExchangeChartResponse =
            serde_json::from_str(r#"{"message": "no chart data"}"#).unwrap();
        let err = chart_points(wire).unwrap_err();
        assert!(matches!(err, FetchError::Empty(m) if m == "no chart data"));
    }

    #[test]
    fn test_chart_error_is_server_error() {
        let wire: ExchangeChartResponse =
            serde_json::from_str(r#"{"error": "bad tick", "chartData": []}"#).unwrap();
        assert!(matches!(chart_points(wire), Err(FetchError::Server(_))));
    }

    #[test]
    fn test_chart_points_tolerate_bad_entries() {
        let wire: ExchangeChartResponse = serde_json::from_str(
            r#"{"chartData": [
                {"time": "2019-03-01T00:00:00Z", "filter": 0.023},
                {"time": "not-a-date", "filter": 0.024},
                {"time": "2019-03-02T00:00:00Z", "filter": "0.025"},
                {"time": "2019-03-03T00:00:00Z", "filter": "n/a"}
            ]}"#,
        )
        .unwrap();
        let points = chart_points(wire).unwrap();
        assert_eq!(
            points.iter().map(|p| p.value).collect::<Vec<_>>(),
            vec![0.023, 0.025]
        );
        assert_eq!(points[1].time, Utc.with_ymd_and_hms(2019, 3, 2, 0, 0, 0).unwrap());
    }
}
