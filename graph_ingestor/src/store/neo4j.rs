use async_trait::async_trait;
use neo4rs::{BoltList, BoltMap, BoltType, ConfigBuilder, Graph, query};
use secrecy::ExposeSecret;
use snafu::ResultExt;
use tracing::{debug, info};

use crate::{
    config::Neo4jConfig,
    graph::{AssetNode, CONSTRAINTS, MERGE_ASSET, MERGE_OBSERVATIONS, ObservationRow},
    store::{ConnectSnafu, GraphStore, QuerySnafu, StoreError},
};

/// Neo4j-backed [`GraphStore`].
///
/// The driver pool is capped at one connection: ingestion is strictly
/// sequential, and each statement borrows the connection only for its own run.
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Opens the pool and checks the server answers before returning.
    pub async fn connect(cfg: &Neo4jConfig) -> Result<Self, StoreError> {
        let config = ConfigBuilder::default()
            .uri(cfg.uri.as_str())
            .user(cfg.user.as_str())
            .password(cfg.password.expose_secret())
            .max_connections(1)
            .build()
            .context(ConnectSnafu { uri: &cfg.uri })?;

        let graph = Graph::connect(config)
            .await
            .context(ConnectSnafu { uri: &cfg.uri })?;
        graph
            .run(query("RETURN 1"))
            .await
            .context(ConnectSnafu { uri: &cfg.uri })?;

        info!(uri = %cfg.uri, "Successfully connected to Neo4j.");
        Ok(Self { graph })
    }
}

/// `$ohlcv_data` parameter: one map per row.
pub(crate) fn rows_param(rows: &[ObservationRow]) -> BoltType {
    let mut list = BoltList::new();
    for row in rows {
        let mut map = BoltMap::new();
        map.put("date".into(), row.date_param().into());
        map.put("open".into(), row.open.into());
        map.put("high".into(), row.high.into());
        map.put("low".into(), row.low.into());
        map.put("close".into(), row.close.into());
        map.put("volume".into(), row.volume.into());
        list.push(BoltType::Map(map));
    }
    BoltType::List(list)
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn merge_asset(&self, asset: &AssetNode) -> Result<(), StoreError> {
        let q = query(MERGE_ASSET)
            .param("ticker", asset.ticker.as_str())
            .param("name", asset.name.as_str())
            .param("asset_type", asset.asset_type.as_str());
        self.graph
            .run(q)
            .await
            .context(QuerySnafu { statement: "asset merge" })
    }

    async fn merge_observations(
        &self,
        ticker: &str,
        rows: &[ObservationRow],
    ) -> Result<usize, StoreError> {
        if rows.is_empty() {
            return Ok(0);
        }
        let q = query(MERGE_OBSERVATIONS)
            .param("ticker", ticker)
            .param("ohlcv_data", rows_param(rows));
        self.graph
            .run(q)
            .await
            .context(QuerySnafu { statement: "observation merge" })?;
        Ok(rows.len())
    }

    async fn ensure_constraints(&self) -> Result<(), StoreError> {
        for stmt in CONSTRAINTS {
            self.graph
                .run(query(stmt))
                .await
                .context(QuerySnafu { statement: "constraint" })?;
        }
        debug!("key constraints present");
        Ok(())
    }
}
