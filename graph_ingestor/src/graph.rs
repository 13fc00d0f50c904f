//! Graph shape of the ingested data.
//!
//! ```text
//! (:Asset {ticker, name, type}) -[:HAS_PRICE_DATA]-> (:OHLCV {asset_ticker, timestamp,
//!                                                              open, high, low, close, volume})
//! ```
//!
//! `Asset` is keyed by `ticker`; `OHLCV` by `(asset_ticker, timestamp)`.

use chrono::{DateTime, SecondsFormat, Utc};
use market_data_ingestor::models::bar::{Bar, BarSeries};

/// Merge the asset node. Name and type are only written when the node is created.
pub const MERGE_ASSET: &str = "\
MERGE (a:Asset {ticker: $ticker})
ON CREATE SET a.name = $name, a.type = $asset_type";

/// Merge every bar in `$ohlcv_data`, overwrite its five values, and link it to its asset.
pub const MERGE_OBSERVATIONS: &str = "\
UNWIND $ohlcv_data AS row
MERGE (a:Asset {ticker: $ticker})
MERGE (o:OHLCV {asset_ticker: $ticker, timestamp: datetime(row.date)})
SET
    o.open = row.open,
    o.high = row.high,
    o.low = row.low,
    o.close = row.close,
    o.volume = row.volume
MERGE (a)-[:HAS_PRICE_DATA]->(o)";

pub const CONSTRAINTS: [&str; 2] = [
    "CREATE CONSTRAINT asset_ticker IF NOT EXISTS FOR (a:Asset) REQUIRE a.ticker IS UNIQUE",
    "CREATE CONSTRAINT ohlcv_key IF NOT EXISTS FOR (o:OHLCV) REQUIRE (o.asset_ticker, o.timestamp) IS UNIQUE",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetNode {
    pub ticker: String,
    pub name: String,
    pub asset_type: String,
}

impl AssetNode {
    pub fn from_series(series: &BarSeries) -> Self {
        Self {
            ticker: series.symbol.clone(),
            name: series.name.clone().unwrap_or_else(|| series.symbol.clone()),
            asset_type: series.asset_class.graph_type().to_string(),
        }
    }
}

/// One `OHLCV` node's properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl ObservationRow {
    /// ISO-8601 form handed to Cypher's `datetime()`.
    pub fn date_param(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl TryFrom<&Bar> for ObservationRow {
    type Error = String;

    fn try_from(bar: &Bar) -> Result<Self, Self::Error> {
        let volume = i64::try_from(bar.volume)
            .map_err(|_| format!("volume {} at {} exceeds i64", bar.volume, bar.timestamp))?;
        Ok(Self {
            timestamp: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume,
        })
    }
}

/// Rows for every bar of `series`, in ascending timestamp order.
pub fn observations_from_series(series: &BarSeries) -> Result<Vec<ObservationRow>, String> {
    let mut rows = series
        .bars
        .iter()
        .map(ObservationRow::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    rows.sort_by_key(|r| r.timestamp);
    Ok(rows)
}
