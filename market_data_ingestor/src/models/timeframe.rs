use std::fmt;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFrameUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

/// Universal bar interval (amount x unit).
///
/// Validation of allowed combinations is left to each provider, since every
/// vendor accepts a different set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    pub fn new(amount: u32, unit: TimeFrameUnit) -> Self {
        Self { amount, unit }
    }

    pub fn day() -> Self {
        Self::new(1, TimeFrameUnit::Day)
    }

    /// Whether bars of this timeframe are keyed by calendar date.
    pub fn is_date_keyed(&self) -> bool {
        matches!(
            self.unit,
            TimeFrameUnit::Day | TimeFrameUnit::Week | TimeFrameUnit::Month
        )
    }

    /// Storage key for a bar stamped `at` by an exchange `utc_offset` away from UTC.
    ///
    /// Date-keyed bars collapse to midnight UTC of the exchange-local date, so
    /// every provider yields the same key for the same session. Intraday bars
    /// keep their stamp.
    pub fn bar_key(&self, at: DateTime<Utc>, utc_offset: Duration) -> DateTime<Utc> {
        if self.is_date_keyed() {
            (at + utc_offset)
                .date_naive()
                .and_time(NaiveTime::MIN)
                .and_utc()
        } else {
            at
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.amount, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn daily_key_is_exchange_date_at_midnight_utc() {
        let tf = TimeFrame::day();
        let midnight = Utc.with_ymd_and_hms(2023, 1, 3, 0, 0, 0).unwrap();
        let eastern = Duration::hours(-5);

        // Yahoo: session open, 09:30 New York
        let open = Utc.with_ymd_and_hms(2023, 1, 3, 14, 30, 0).unwrap();
        assert_eq!(tf.bar_key(open, eastern), midnight);
        // Alpaca: New York midnight, both with and without DST
        let ny_midnight = Utc.with_ymd_and_hms(2023, 1, 3, 5, 0, 0).unwrap();
        assert_eq!(tf.bar_key(ny_midnight, Duration::zero()), midnight);
        let ny_midnight_dst = Utc.with_ymd_and_hms(2023, 1, 3, 4, 0, 0).unwrap();
        assert_eq!(tf.bar_key(ny_midnight_dst, Duration::zero()), midnight);
    }

    #[test]
    fn intraday_key_is_unchanged() {
        let tf = TimeFrame::new(5, TimeFrameUnit::Minute);
        let at = Utc.with_ymd_and_hms(2023, 1, 3, 14, 35, 0).unwrap();
        assert!(!tf.is_date_keyed());
        assert_eq!(tf.bar_key(at, Duration::hours(-5)), at);
    }
}
