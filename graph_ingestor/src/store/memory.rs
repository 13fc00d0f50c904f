use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, map::Entry};

use crate::{
    graph::{AssetNode, ObservationRow},
    store::{GraphStore, StoreError},
};

type ObservationKey = (String, DateTime<Utc>);

#[derive(Debug, Default)]
struct AssetProps {
    // unset when the node was created by an observation merge
    name: Option<String>,
    asset_type: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    assets: IndexMap<String, AssetProps>,
    observations: IndexMap<ObservationKey, ObservationRow>,
    edges: HashSet<(String, ObservationKey)>,
}

/// In-process graph with the same merge semantics as the Neo4j statements.
///
/// Clones share state, so a test can keep one handle while the ingestor owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn asset_count(&self) -> usize {
        self.lock().assets.len()
    }

    pub fn observation_count(&self) -> usize {
        self.lock().observations.len()
    }

    pub fn edge_count(&self) -> usize {
        self.lock().edges.len()
    }

    pub fn asset(&self, ticker: &str) -> Option<AssetNode> {
        self.lock().assets.get(ticker).map(|p| AssetNode {
            ticker: ticker.to_string(),
            name: p.name.clone().unwrap_or_default(),
            asset_type: p.asset_type.clone().unwrap_or_default(),
        })
    }

    /// Observations linked to `ticker`, ascending by timestamp.
    pub fn observations(&self, ticker: &str) -> Vec<ObservationRow> {
        let inner = self.lock();
        let mut rows: Vec<ObservationRow> = inner
            .edges
            .iter()
            .filter(|(t, _)| t == ticker)
            .filter_map(|(_, key)| inner.observations.get(key).cloned())
            .collect();
        rows.sort_by_key(|r| r.timestamp);
        rows
    }
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn merge_asset(&self, asset: &AssetNode) -> Result<(), StoreError> {
        let mut inner = self.lock();
        // ON CREATE SET: an existing node keeps whatever it has, even nothing
        if let Entry::Vacant(slot) = inner.assets.entry(asset.ticker.clone()) {
            slot.insert(AssetProps {
                name: Some(asset.name.clone()),
                asset_type: Some(asset.asset_type.clone()),
            });
        }
        Ok(())
    }

    async fn merge_observations(
        &self,
        ticker: &str,
        rows: &[ObservationRow],
    ) -> Result<usize, StoreError> {
        let mut inner = self.lock();
        for row in rows {
            inner.assets.entry(ticker.to_string()).or_default();
            let key = (ticker.to_string(), row.timestamp);
            inner.observations.insert(key.clone(), row.clone());
            inner.edges.insert((ticker.to_string(), key));
        }
        Ok(rows.len())
    }
}
