use async_trait::async_trait;
use reqwest::{Client, header};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{bar::BarSeries, request_params::BarsRequestParams},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, DecodeSnafu, ProviderError, ProviderInitError,
        ReqwestSnafu,
        yahoo::{
            params::construct_params,
            response::{Chart, ChartResponse},
        },
    },
};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// Yahoo rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) graph-ingest/0.1";

pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    /// Creates a provider pointed at the public Yahoo Finance endpoint.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a provider against another host serving the same chart API.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, symbol)
    }
}

#[async_trait]
impl DataProvider for YahooProvider {
    async fn fetch_bars(&self, params: &BarsRequestParams) -> Result<BarSeries, ProviderError> {
        let query_params = construct_params(params)?;
        let url = self.chart_url(&params.symbol);
        debug!(%url, symbol = %params.symbol, "requesting chart");

        let response = self
            .client
            .get(&url)
            .query(&query_params)
            .send()
            .await
            .context(ReqwestSnafu)?;

        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;

        // Unknown symbols come back as 404 with a structured error body.
        let parsed = serde_json::from_str::<ChartResponse>(&body);
        if let Ok(ChartResponse {
            chart: Chart { error: Some(err), .. },
        }) = &parsed
        {
            return ApiSnafu {
                message: format!("{}: {}", err.code, err.description),
            }
            .fail();
        }
        if !status.is_success() {
            return ApiSnafu {
                message: format!("HTTP {status}: {body}"),
            }
            .fail();
        }

        let chart = parsed.context(DecodeSnafu)?.chart;
        let Some(result) = chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(BarSeries::new(params.symbol.clone(), params.timeframe));
        };

        let mut series = result.into_series(params.timeframe);
        // Yahoo echoes its own casing of the symbol; keep the caller's key.
        series.symbol = params.symbol.clone();
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let p = YahooProvider::with_base_url("http://localhost:9999/").unwrap();
        assert_eq!(p.chart_url("AAPL"), "http://localhost:9999/v8/finance/chart/AAPL");
    }
}
