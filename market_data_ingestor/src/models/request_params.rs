use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::timeframe::TimeFrame;

/// Vendor-agnostic parameters for requesting the bar history of one symbol.
///
/// It is the standard input for all
/// [`DataProvider`](crate::providers::DataProvider) implementations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarsRequestParams {
    /// Symbol to request (e.g., `"AAPL"`).
    pub symbol: String,

    /// The time interval for each bar (e.g., 1 minute, 1 day).
    pub timeframe: TimeFrame,

    /// Start of the requested time range (inclusive, UTC).
    pub start: DateTime<Utc>,

    /// End of the requested time range (exclusive, UTC). `None` means up to now.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl BarsRequestParams {
    /// Daily bars for `symbol` from `start` up to now.
    pub fn daily_since(symbol: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: TimeFrame::day(),
            start,
            end: None,
        }
    }

    /// The effective end of the range.
    pub fn end_or_now(&self) -> DateTime<Utc> {
        self.end.unwrap_or_else(Utc::now)
    }
}
