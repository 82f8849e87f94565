//! Wire types for mempool responses.

use crate::shared::serde_util::{self, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One snapshot row as sent by `/getmempool`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MempoolRecordResponse {
    #[serde(default, deserialize_with = "serde_util::number_as_string")]
    pub time: String,
    #[serde(default, deserialize_with = "serde_util::lenient_i64")]
    pub number_of_transactions: Option<i64>,
    #[serde(default, deserialize_with = "serde_util::lenient_i64")]
    pub size: Option<i64>,
    #[serde(default, deserialize_with = "serde_util::number_as_string")]
    pub total_fee: String,
}

/// REST response for `/getmempool`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MempoolPageResponse {
    #[serde(default, deserialize_with = "serde_util::lenient_i64")]
    pub current_page: Option<i64>,
    #[serde(default, deserialize_with = "serde_util::lenient_i64")]
    pub total_pages: Option<i64>,
    #[serde(default, deserialize_with = "serde_util::lenient_u32")]
    pub selected_number_of_rows: Option<u32>,
    #[serde(default)]
    pub mempool_data: Option<Vec<MempoolRecordResponse>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One chart point. Every metric is sent; the client picks one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MempoolChartPoint {
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "serde_util::lenient_f64")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "serde_util::lenient_f64")]
    pub total_fee: Option<f64>,
    #[serde(default, deserialize_with = "serde_util::lenient_f64")]
    pub number_of_transactions: Option<f64>,
}

/// REST response for `/mempoolcharts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MempoolChartResponse {
    #[serde(default, rename = "mempoolchartData")]
    pub mempool_chart_data: Option<Vec<MempoolChartPoint>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
