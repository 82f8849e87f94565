//! Conversions from mempool wire types to domain types.

use super::wire::{MempoolChartResponse, MempoolPageResponse, MempoolRecordResponse};
use super::{MempoolMetric, MempoolRecord};
use crate::domain::{check_envelope, PageResult, ServerEcho};
use crate::error::FetchError;
use crate::shared::clamp_page;
use crate::view::series::{SeriesPoint, NO_DATA_MESSAGE};
use rust_decimal::Decimal;
use std::str::FromStr;

fn count(value: Option<i64>) -> u64 {
    value.and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}

impl From<MempoolRecordResponse> for MempoolRecord {
    fn from(r: MempoolRecordResponse) -> Self {
        let fee = r.total_fee.trim();
        Self {
            number_of_transactions: count(r.number_of_transactions),
            size: count(r.size),
            total_fee: Decimal::from_str(fee)
                .or_else(|_| Decimal::from_scientific(fee))
                .unwrap_or_default(),
            time: r.time,
        }
    }
}

impl TryFrom<MempoolPageResponse> for PageResult<MempoolRecord> {
    type Error = FetchError;

    fn try_from(source: MempoolPageResponse) -> Result<Self, Self::Error> {
        check_envelope(source.error, source.message)?;

        Ok(PageResult {
            current_page: source.current_page.map(clamp_page).unwrap_or(1),
            total_pages: source
                .total_pages
                .and_then(|t| u32::try_from(t).ok())
                .unwrap_or(0),
            echo: ServerEcho {
                rows_per_page: source.selected_number_of_rows,
                ..Default::default()
            },
            records: source
                .mempool_data
                .unwrap_or_default()
                .into_iter()
                .map(MempoolRecord::from)
                .collect(),
        })
    }
}

/// Validate a chart response and select `metric` from every snapshot.
pub(super) fn chart_points(
    source: MempoolChartResponse,
    metric: MempoolMetric,
) -> Result<Vec<SeriesPoint>, FetchError> {
    check_envelope(source.error, None)?;

    let Some(points) = source.mempool_chart_data else {
        return Err(FetchError::Empty(
            source
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| NO_DATA_MESSAGE.to_string()),
        ));
    };

    let received = points.len();
    let selected: Vec<SeriesPoint> = points
        .into_iter()
        .filter_map(|p| {
            let value = match metric {
                MempoolMetric::Size => p.size,
                MempoolMetric::TotalFee => p.total_fee,
                MempoolMetric::NumberOfTransactions => p.number_of_transactions,
            };
            Some(SeriesPoint::new(p.time?, value?))
        })
        .collect();

    if selected.len() < received {
        tracing::warn!(
            %metric,
            dropped = received - selected.len(),
            "Skipping mempool chart points without a usable time or value"
        );
    }
    Ok(selected)
}
