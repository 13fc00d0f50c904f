use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::models::{
    asset::AssetClass,
    bar::{Bar, BarSeries},
    timeframe::TimeFrame,
};

#[derive(Deserialize, Debug)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub instrument_type: Option<String>,
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

impl ChartResult {
    /// Converts the column-oriented chart payload into a [`BarSeries`].
    ///
    /// Rows with any missing OHLCV value are dropped.
    pub fn into_series(self, timeframe: TimeFrame) -> BarSeries {
        let meta = self.meta;
        let offset = Duration::seconds(meta.gmtoffset);
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();

        let mut series = BarSeries::new(meta.symbol, timeframe);
        series.name = meta
            .long_name
            .or(meta.short_name)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        series.asset_class = meta
            .instrument_type
            .as_deref()
            .map(AssetClass::from_instrument_type)
            .unwrap_or_default();

        let mut dropped = 0usize;
        for (i, ts) in self.timestamp.iter().enumerate() {
            let cell = |col: &Vec<Option<f64>>| col.get(i).copied().flatten();
            let row = (
                DateTime::<Utc>::from_timestamp(*ts, 0),
                cell(&quote.open),
                cell(&quote.high),
                cell(&quote.low),
                cell(&quote.close),
                quote.volume.get(i).copied().flatten(),
            );
            let (Some(at), Some(open), Some(high), Some(low), Some(close), Some(volume)) = row
            else {
                dropped += 1;
                continue;
            };

            series.bars.push(Bar {
                timestamp: timeframe.bar_key(at, offset),
                open,
                high,
                low,
                close,
                volume,
            });
        }

        if dropped > 0 {
            debug!(symbol = %series.symbol, dropped, "skipped incomplete chart rows");
        }

        series.sort_and_dedup();
        series
    }
}
