//! Canonical in-memory representation of a time-series bar (OHLCV).
//!
//! This struct is used as the standard output for all [`DataProvider`](crate::providers::DataProvider)
//! implementations, regardless of which vendor served the data.

use chrono::{DateTime, Utc};

use crate::models::{asset::AssetClass, timeframe::TimeFrame};

/// A single time-series bar (OHLCV) for a given timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// The timestamp for this bar (UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares traded during the bar interval.
    pub volume: u64,
}

/// Represents a complete set of time-series data for a single symbol.
///
/// This struct groups a vector of [`Bar`]s with their corresponding symbol
/// and [`TimeFrame`], making the data set self-describing.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,
    /// Display name reported by the provider, if any.
    pub name: Option<String>,
    /// Asset class reported by the provider.
    pub asset_class: AssetClass,
    /// The time interval for each bar in the series.
    pub timeframe: TimeFrame,
    /// The collection of OHLCV bars.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: impl Into<String>, timeframe: TimeFrame) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
            asset_class: AssetClass::default(),
            timeframe,
            bars: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Orders bars by ascending timestamp. When a timestamp occurs more than
    /// once, the row the provider returned last is kept.
    pub fn sort_and_dedup(&mut self) {
        // stable sort keeps provider order among equal timestamps
        self.bars.sort_by_key(|b| b.timestamp);
        let mut out: Vec<Bar> = Vec::with_capacity(self.bars.len());
        for bar in self.bars.drain(..) {
            match out.last_mut() {
                Some(prev) if prev.timestamp == bar.timestamp => *prev = bar,
                _ => out.push(bar),
            }
        }
        self.bars = out;
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close,
            volume: 100,
        }
    }

    #[test]
    fn sort_and_dedup_keeps_last_duplicate() {
        let mut series = BarSeries::new("AAPL", TimeFrame::day());
        series.bars = vec![bar(5, 1.5), bar(3, 1.1), bar(4, 1.2), bar(3, 1.3)];

        series.sort_and_dedup();

        let closes: Vec<f64> = series.bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![1.3, 1.2, 1.5]);
        assert_eq!(series.len(), 3);
    }
}
