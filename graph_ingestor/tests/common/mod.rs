#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use graph_ingestor::{
    graph::{AssetNode, ObservationRow},
    store::{GraphStore, QuerySnafu, StoreError, memory::MemoryGraph},
};
use market_data_ingestor::{
    models::{
        bar::{Bar, BarSeries},
        request_params::BarsRequestParams,
    },
    providers::{ApiSnafu, DataProvider, ProviderError},
};
use snafu::ResultExt;

/// Daily bar on 2023-01-`day`.
pub fn bar(day: u32, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Bar {
    Bar {
        timestamp: Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0).unwrap(),
        open,
        high,
        low,
        close,
        volume,
    }
}

pub fn aapl_bars() -> Vec<Bar> {
    vec![
        bar(3, 130.28, 130.90, 124.17, 125.07, 112_117_500),
        bar(4, 126.89, 128.66, 125.08, 126.36, 89_113_600),
        bar(5, 127.13, 127.77, 124.76, 125.02, 80_962_700),
    ]
}

enum Reply {
    Bars(Option<String>, Vec<Bar>),
    Fail(String),
}

/// Canned provider; unknown symbols return an empty series.
#[derive(Clone, Default)]
pub struct StubProvider {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    calls: Arc<AtomicUsize>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(self, symbol: &str, name: Option<&str>, bars: Vec<Bar>) -> Self {
        self.set_bars(symbol, name, bars);
        self
    }

    pub fn with_failure(self, symbol: &str, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(symbol.to_string(), Reply::Fail(message.to_string()));
        self
    }

    /// Replaces the canned reply, e.g. to simulate a revised bar.
    pub fn set_bars(&self, symbol: &str, name: Option<&str>, bars: Vec<Bar>) {
        self.replies.lock().unwrap().insert(
            symbol.to_string(),
            Reply::Bars(name.map(str::to_string), bars),
        );
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataProvider for StubProvider {
    async fn fetch_bars(&self, params: &BarsRequestParams) -> Result<BarSeries, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut series = BarSeries::new(params.symbol.clone(), params.timeframe);
        match self.replies.lock().unwrap().get(&params.symbol) {
            Some(Reply::Bars(name, bars)) => {
                series.name = name.clone();
                series.bars = bars.clone();
            }
            Some(Reply::Fail(message)) => {
                return ApiSnafu {
                    message: message.clone(),
                }
                .fail();
            }
            None => {}
        }
        Ok(series)
    }
}

/// Memory graph whose observation merge fails for one ticker, as a server-side error would.
#[derive(Clone)]
pub struct RejectingStore {
    pub graph: MemoryGraph,
    pub reject: String,
}

#[async_trait]
impl GraphStore for RejectingStore {
    async fn merge_asset(&self, asset: &AssetNode) -> Result<(), StoreError> {
        self.graph.merge_asset(asset).await
    }

    async fn merge_observations(
        &self,
        ticker: &str,
        rows: &[ObservationRow],
    ) -> Result<usize, StoreError> {
        if ticker == self.reject {
            let driver_err =
                neo4rs::Error::UnexpectedMessage(format!("constraint violation for {ticker}"));
            return Err(driver_err).context(QuerySnafu {
                statement: "observation merge",
            });
        }
        self.graph.merge_observations(ticker, rows).await
    }
}
