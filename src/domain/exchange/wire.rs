//! Wire types for exchange responses.

use crate::shared::serde_util::{self, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One tick row as sent by `/exchange`. Prices are kept as their decimal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRecordResponse {
    #[serde(default, deserialize_with = "serde_util::number_as_string")]
    pub time: String,
    #[serde(default)]
    pub exchange_name: String,
    #[serde(default, deserialize_with = "serde_util::number_as_string")]
    pub high: String,
    #[serde(default, deserialize_with = "serde_util::number_as_string")]
    pub low: String,
    #[serde(default, deserialize_with = "serde_util::number_as_string")]
    pub open: String,
    #[serde(default, deserialize_with = "serde_util::number_as_string")]
    pub close: String,
    #[serde(default, deserialize_with = "serde_util::number_as_string")]
    pub volume: String,
    #[serde(default, deserialize_with = "serde_util::lenient_i64")]
    pub interval: Option<i64>,
    #[serde(default)]
    pub currency_pair: String,
}

/// REST response for `/exchange`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangePageResponse {
    #[serde(default, deserialize_with = "serde_util::lenient_i64")]
    pub current_page: Option<i64>,
    #[serde(default, deserialize_with = "serde_util::lenient_i64")]
    pub total_pages: Option<i64>,
    #[serde(default, deserialize_with = "serde_util::lenient_u32")]
    pub selected_num: Option<u32>,
    #[serde(default, deserialize_with = "serde_util::lenient_string")]
    pub selected_currency_pair: Option<String>,
    #[serde(default, deserialize_with = "serde_util::lenient_i64")]
    pub selected_interval: Option<i64>,
    #[serde(default)]
    pub ex_data: Option<Vec<ExchangeRecordResponse>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One chart point; `filter` carries the value of the requested tick field.
///
/// Both fields are lenient so one bad point is dropped instead of failing the
/// whole response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExchangeChartPoint {
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "serde_util::lenient_f64")]
    pub filter: Option<f64>,
}

/// REST response for `/exchangechart`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeChartResponse {
    #[serde(default)]
    pub chart_data: Option<Vec<ExchangeChartPoint>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
