use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::models::{bar::Bar, timeframe::TimeFrame};

#[derive(Deserialize, Debug)]
pub struct AlpacaBar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: u64,
}

impl From<AlpacaBar> for Bar {
    fn from(ab: AlpacaBar) -> Self {
        Bar {
            timestamp: ab.timestamp,
            open: ab.open,
            high: ab.high,
            low: ab.low,
            close: ab.close,
            volume: ab.volume,
        }
    }
}

/// One page of the single-symbol bars endpoint.
#[derive(Deserialize, Debug)]
pub struct AlpacaResponse {
    /// `null` when the range holds no bars.
    #[serde(default)]
    pub bars: Option<Vec<AlpacaBar>>,
    pub symbol: String,
    pub next_page_token: Option<String>,
}

impl AlpacaResponse {
    /// Takes this page's bars, keyed for `timeframe`.
    ///
    /// Alpaca stamps daily bars at New York midnight, which is always on the
    /// trading date in UTC as well, so no exchange offset is applied.
    pub fn take_bars(&mut self, timeframe: TimeFrame) -> Vec<Bar> {
        self.bars
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(|ab| {
                let mut bar = Bar::from(ab);
                bar.timestamp = timeframe.bar_key(bar.timestamp, Duration::zero());
                bar
            })
            .collect()
    }
}
