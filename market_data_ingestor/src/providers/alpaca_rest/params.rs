use serde::{Deserialize, Serialize};

use crate::{
    models::{
        request_params::BarsRequestParams,
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    providers::{ProviderError, ValidationSnafu},
};

/// Specifies the corporate action adjustment for stock data.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    #[default]
    Raw,
    Split,
    Dividend,
    All,
}

/// Specifies the source feed for stock data.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    Sip,
    #[default]
    Iex,
    Otc,
}

/// Alpaca-specific knobs for a bars request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlpacaBarsParams {
    pub adjustment: Adjustment,
    pub feed: Feed,
    /// Page size; Alpaca caps it at 10000.
    pub limit: u32,
}

impl Default for AlpacaBarsParams {
    fn default() -> Self {
        Self {
            adjustment: Adjustment::Raw,
            feed: Feed::Iex,
            limit: 10_000,
        }
    }
}

fn as_query_value<T: Serialize>(v: &T) -> String {
    serde_json::to_value(v)
        .ok()
        .and_then(|j| j.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Checks the timeframe against Alpaca's accepted ranges and renders it.
pub fn validate_timeframe(timeframe: &TimeFrame) -> Result<String, ProviderError> {
    let TimeFrame { amount, unit } = *timeframe;
    let ok = match unit {
        TimeFrameUnit::Minute => (1..=59).contains(&amount),
        TimeFrameUnit::Hour => (1..=23).contains(&amount),
        TimeFrameUnit::Day | TimeFrameUnit::Week => amount == 1,
        TimeFrameUnit::Month => [1, 2, 3, 6, 12].contains(&amount),
    };
    if !ok {
        return ValidationSnafu {
            message: format!("Alpaca does not serve {timeframe} bars"),
        }
        .fail();
    }

    let suffix = match unit {
        TimeFrameUnit::Minute => "Min",
        TimeFrameUnit::Hour => "Hour",
        TimeFrameUnit::Day => "Day",
        TimeFrameUnit::Week => "Week",
        TimeFrameUnit::Month => "Month",
    };
    Ok(format!("{amount}{suffix}"))
}

pub fn construct_params(
    params: &BarsRequestParams,
    alpaca: &AlpacaBarsParams,
) -> Result<Vec<(String, String)>, ProviderError> {
    let mut query = vec![
        ("timeframe".to_string(), validate_timeframe(&params.timeframe)?),
        ("start".to_string(), params.start.to_rfc3339()),
        ("adjustment".to_string(), as_query_value(&alpaca.adjustment)),
        ("feed".to_string(), as_query_value(&alpaca.feed)),
        ("limit".to_string(), alpaca.limit.to_string()),
        ("sort".to_string(), "asc".to_string()),
    ];
    if let Some(end) = params.end {
        query.push(("end".to_string(), end.to_rfc3339()));
    }
    Ok(query)
}
