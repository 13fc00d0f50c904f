//! Loads historical equity prices into a Neo4j graph.
//!
//! Each symbol becomes an `Asset` node; each price bar becomes an `OHLCV` node
//! linked from it by `HAS_PRICE_DATA`. Every statement merges on its key, so
//! ingesting the same data again leaves the graph unchanged.

pub mod config;
pub mod graph;
pub mod ingest;
pub mod providers;
pub mod store;
