use crate::{
    models::{
        request_params::BarsRequestParams,
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    providers::{ProviderError, ValidationSnafu},
};

/// Maps a [`TimeFrame`] onto Yahoo's `interval` token.
pub fn interval_token(timeframe: &TimeFrame) -> Result<&'static str, ProviderError> {
    let token = match (timeframe.unit, timeframe.amount) {
        (TimeFrameUnit::Minute, 1) => "1m",
        (TimeFrameUnit::Minute, 2) => "2m",
        (TimeFrameUnit::Minute, 5) => "5m",
        (TimeFrameUnit::Minute, 15) => "15m",
        (TimeFrameUnit::Minute, 30) => "30m",
        (TimeFrameUnit::Minute, 90) => "90m",
        (TimeFrameUnit::Minute, 60) | (TimeFrameUnit::Hour, 1) => "1h",
        (TimeFrameUnit::Day, 1) => "1d",
        (TimeFrameUnit::Day, 5) => "5d",
        (TimeFrameUnit::Week, 1) => "1wk",
        (TimeFrameUnit::Month, 1) => "1mo",
        (TimeFrameUnit::Month, 3) => "3mo",
        _ => {
            return ValidationSnafu {
                message: format!("Yahoo does not serve {timeframe} bars"),
            }
            .fail();
        }
    };
    Ok(token)
}

/// Builds the chart query string for a request.
pub fn construct_params(params: &BarsRequestParams) -> Result<Vec<(String, String)>, ProviderError> {
    let end = params.end_or_now();
    if end <= params.start {
        return ValidationSnafu {
            message: format!("range end {end} is not after start {}", params.start),
        }
        .fail();
    }

    Ok(vec![
        ("period1".to_string(), params.start.timestamp().to_string()),
        ("period2".to_string(), end.timestamp().to_string()),
        ("interval".to_string(), interval_token(&params.timeframe)?.to_string()),
        ("events".to_string(), "history".to_string()),
        ("includePrePost".to_string(), "false".to_string()),
    ])
}
