use async_trait::async_trait;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{bar::BarSeries, request_params::BarsRequestParams},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, InvalidApiKeySnafu, MissingEnvVarSnafu,
        ProviderError, ProviderInitError, ReqwestSnafu,
        alpaca_rest::{
            params::{AlpacaBarsParams, construct_params},
            response::AlpacaResponse,
        },
    },
};

const BASE_URL: &str = "https://data.alpaca.markets";

pub struct AlpacaProvider {
    client: Client,
    base_url: String,
    params: AlpacaBarsParams,
    _api_key: SecretString,
    _secret_key: SecretString,
}

impl AlpacaProvider {
    /// Creates a new Alpaca provider.
    ///
    /// Reads API keys from the `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`
    /// environment variables.
    pub fn new() -> Result<Self, ProviderInitError> {
        let api_key = SecretString::new(get_env_var("APCA_API_KEY_ID").context(MissingEnvVarSnafu)?.into());
        let secret_key =
            SecretString::new(get_env_var("APCA_API_SECRET_KEY").context(MissingEnvVarSnafu)?.into());
        Self::with_credentials(api_key, secret_key, BASE_URL)
    }

    pub fn with_credentials(
        api_key: SecretString,
        secret_key: SecretString,
        base_url: &str,
    ) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            header::HeaderValue::from_str(api_key.expose_secret()).context(InvalidApiKeySnafu)?,
        );
        let mut secret =
            header::HeaderValue::from_str(secret_key.expose_secret()).context(InvalidApiKeySnafu)?;
        secret.set_sensitive(true);
        headers.insert("APCA-API-SECRET-KEY", secret);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            params: AlpacaBarsParams::default(),
            _api_key: api_key,
            _secret_key: secret_key,
        })
    }

    pub fn with_params(mut self, params: AlpacaBarsParams) -> Self {
        self.params = params;
        self
    }
}

#[async_trait]
impl DataProvider for AlpacaProvider {
    async fn fetch_bars(&self, params: &BarsRequestParams) -> Result<BarSeries, ProviderError> {
        // Validates the timeframe before any request goes out.
        let base_query = construct_params(params, &self.params)?;
        let url = format!("{}/v2/stocks/{}/bars", self.base_url, params.symbol);

        let mut series = BarSeries::new(params.symbol.clone(), params.timeframe);
        let mut next_page_token: Option<String> = None;

        loop {
            let mut query_params = base_query.clone();
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            let response = self
                .client
                .get(&url)
                .query(&query_params)
                .send()
                .await
                .context(ReqwestSnafu)?;

            if !response.status().is_success() {
                let status = response.status();
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return ApiSnafu {
                    message: format!("HTTP {status}: {error_msg}"),
                }
                .fail();
            }

            let mut page = response.json::<AlpacaResponse>().await.context(ReqwestSnafu)?;
            let bars = page.take_bars(params.timeframe);
            debug!(symbol = %page.symbol, page_len = bars.len(), "received bars page");
            series.bars.extend(bars);

            match page.next_page_token {
                Some(token) => next_page_token = Some(token),
                None => break,
            }
        }

        series.sort_and_dedup();
        Ok(series)
    }
}
