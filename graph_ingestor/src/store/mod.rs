//! Graph store seam.
//!
//! - [`neo4j::Neo4jStore`] talks bolt to a Neo4j server.
//! - [`memory::MemoryGraph`] keeps nodes in process with the same merge rules,
//!   for tests and dry runs.
//! - [`GraphSink`] adapts any [`GraphStore`] to the provider-side
//!   [`DataSink`] so a whole `BarSeries` is written as the asset merge
//!   followed by the bulk observation merge.

pub mod memory;
pub mod neo4j;

use async_trait::async_trait;
use market_data_ingestor::{
    io::sink::{BackendError, ConversionSnafu, DataSink, SinkError, WriteSnafu},
    models::bar::BarSeries,
};
use snafu::{Backtrace, ResultExt, Snafu};
use tracing::debug;

use crate::graph::{AssetNode, ObservationRow, observations_from_series};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StoreError {
    /// Could not open or verify the connection.
    #[snafu(display("Failed to connect to {uri}: {source}"))]
    Connect {
        uri: String,
        source: neo4rs::Error,
        backtrace: Backtrace,
    },

    /// A statement failed on the server.
    #[snafu(display("{statement} failed: {source}"))]
    Query {
        statement: &'static str,
        source: neo4rs::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Merges the asset node on its ticker.
    async fn merge_asset(&self, asset: &AssetNode) -> Result<(), StoreError>;

    /// Merges one observation per row, linked to the asset, in a single statement.
    /// Returns the number of rows written.
    async fn merge_observations(
        &self,
        ticker: &str,
        rows: &[ObservationRow],
    ) -> Result<usize, StoreError>;

    /// Creates key constraints backing the merges, where the store supports them.
    async fn ensure_constraints(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Writes bar series into a [`GraphStore`].
pub struct GraphSink<G> {
    store: G,
}

impl<G: GraphStore> GraphSink<G> {
    pub fn new(store: G) -> Self {
        Self { store }
    }
}

fn backend(e: StoreError) -> BackendError {
    Box::new(e)
}

#[async_trait]
impl<G: GraphStore> DataSink for GraphSink<G> {
    type Output = usize;

    async fn write(&self, data: &BarSeries) -> Result<usize, SinkError> {
        let asset = AssetNode::from_series(data);
        let rows = observations_from_series(data)
            .map_err(|message| ConversionSnafu { message }.build())?;

        self.store
            .merge_asset(&asset)
            .await
            .map_err(backend)
            .context(WriteSnafu)?;
        debug!(ticker = %asset.ticker, "asset merged");

        self.store
            .merge_observations(&asset.ticker, &rows)
            .await
            .map_err(backend)
            .context(WriteSnafu)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use market_data_ingestor::models::{bar::Bar, timeframe::TimeFrame};

    use super::*;
    use crate::store::memory::MemoryGraph;

    fn series(volume: u64) -> BarSeries {
        let mut series = BarSeries::new("AAPL", TimeFrame::day());
        series.bars = vec![Bar {
            timestamp: Utc.with_ymd_and_hms(2023, 1, 3, 0, 0, 0).unwrap(),
            open: 130.28,
            high: 130.9,
            low: 124.17,
            close: 125.07,
            volume,
        }];
        series
    }

    struct DownStore;

    #[async_trait]
    impl GraphStore for DownStore {
        async fn merge_asset(&self, _asset: &AssetNode) -> Result<(), StoreError> {
            Err(neo4rs::Error::UnexpectedMessage("connection reset".into())).context(QuerySnafu {
                statement: "asset merge",
            })
        }

        async fn merge_observations(
            &self,
            _ticker: &str,
            _rows: &[ObservationRow],
        ) -> Result<usize, StoreError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn sink_writes_asset_and_rows() {
        let graph = MemoryGraph::new();
        let sink = GraphSink::new(graph.clone());

        assert_eq!(sink.write(&series(100)).await.unwrap(), 1);
        assert_eq!(graph.asset("AAPL").unwrap().name, "AAPL");
        assert_eq!(graph.observation_count(), 1);
    }

    #[tokio::test]
    async fn oversized_volume_fails_before_any_write() {
        let graph = MemoryGraph::new();
        let sink = GraphSink::new(graph.clone());

        let err = sink.write(&series(u64::MAX)).await.unwrap_err();

        assert!(matches!(err, SinkError::Conversion { .. }));
        assert_eq!(graph.asset_count(), 0);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_write_error() {
        let err = GraphSink::new(DownStore).write(&series(100)).await.unwrap_err();

        assert!(matches!(err, SinkError::Write { .. }));
        assert!(err.to_string().starts_with("Failed to write data: asset merge failed"));
    }
}
