//! Per-symbol fetch-then-upsert.
//!
//! [`Ingestor::ingest`] returns what happened to one symbol instead of logging
//! it; [`Ingestor::ingest_all`] is the batch loop that logs each outcome and
//! always moves on to the next symbol.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use market_data_ingestor::{
    io::sink::{DataSink, SinkError},
    models::request_params::BarsRequestParams,
    providers::{DataProvider, ProviderError},
};
use snafu::{ResultExt, Snafu};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Bars were written; `points` is the number of observations merged.
    Ingested { points: usize },
    /// The provider had no bars for the symbol; nothing was written.
    Empty,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum IngestError {
    /// No graph connection; the provider was not called.
    #[snafu(display("No active Neo4j connection. Aborting ingestion."))]
    StoreUnavailable,

    #[snafu(display("Failed to fetch data for {symbol}: {source}"))]
    Fetch {
        symbol: String,
        source: ProviderError,
    },

    #[snafu(display("Failed during Neo4j data ingestion for {symbol}: {source}"))]
    Write { symbol: String, source: SinkError },
}

/// Tally of one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub ingested: Vec<(String, usize)>,
    pub empty: Vec<String>,
    pub failed: Vec<String>,
}

impl BatchSummary {
    pub fn points(&self) -> usize {
        self.ingested.iter().map(|(_, n)| n).sum()
    }
}

pub struct Ingestor<P, S> {
    provider: P,
    sink: Option<S>,
    start: DateTime<Utc>,
}

impl<P, S> Ingestor<P, S>
where
    P: DataProvider,
    S: DataSink<Output = usize>,
{
    /// `sink` is `None` when the store could not be reached; every call to
    /// [`ingest`](Self::ingest) then fails fast without touching the provider.
    pub fn new(provider: P, sink: Option<S>, start_date: NaiveDate) -> Self {
        Self {
            provider,
            sink,
            start: start_date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub async fn ingest(&self, symbol: &str) -> Result<IngestOutcome, IngestError> {
        let Some(sink) = &self.sink else {
            return StoreUnavailableSnafu.fail();
        };

        info!(symbol, "Fetching data for ticker");
        let params = BarsRequestParams::daily_since(symbol, self.start);
        let series = self
            .provider
            .fetch_bars(&params)
            .await
            .context(FetchSnafu { symbol })?;

        if series.is_empty() {
            return Ok(IngestOutcome::Empty);
        }

        info!(symbol, points = series.len(), "Ingesting data points");
        let points = sink.write(&series).await.context(WriteSnafu { symbol })?;
        Ok(IngestOutcome::Ingested { points })
    }

    /// Ingests each symbol in order. Failures are logged and counted, never raised.
    pub async fn ingest_all<I, T>(&self, symbols: I) -> BatchSummary
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut summary = BatchSummary::default();
        for symbol in symbols {
            let symbol = symbol.as_ref();
            match self.ingest(symbol).await {
                Ok(IngestOutcome::Ingested { points }) => {
                    info!(symbol, points, "Successfully ingested data");
                    summary.ingested.push((symbol.to_string(), points));
                }
                Ok(IngestOutcome::Empty) => {
                    warn!(symbol, "No data returned for ticker");
                    summary.empty.push(symbol.to_string());
                }
                Err(e) => {
                    error!(symbol, error = %e, "Ingestion failed");
                    summary.failed.push(symbol.to_string());
                }
            }
        }
        summary
    }

    /// Releases the store handle.
    pub fn close(self) {
        if let Some(sink) = self.sink {
            drop(sink);
            info!("Neo4j connection closed.");
        }
    }
}
