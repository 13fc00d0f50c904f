use anyhow::Result;
use graph_ingestor::{
    config::IngestConfig,
    ingest::Ingestor,
    providers::build_provider,
    store::{GraphSink, GraphStore, neo4j::Neo4jStore},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "graph_ingestor=info,market_data_ingestor=info";

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = IngestConfig::from_env()?;
    let provider = build_provider(config.provider)?;

    let sink = match Neo4jStore::connect(&config.neo4j).await {
        Ok(store) => {
            if let Err(e) = store.ensure_constraints().await {
                warn!(error = %e, "Could not create key constraints; continuing without them");
            }
            Some(GraphSink::new(store))
        }
        Err(e) => {
            error!(error = %e, "Failed to connect to Neo4j");
            None
        }
    };

    let ingestor = Ingestor::new(provider, sink, config.start_date);
    let summary = ingestor.ingest_all(&config.tickers).await;
    info!(
        ingested = summary.ingested.len(),
        empty = summary.empty.len(),
        failed = summary.failed.len(),
        points = summary.points(),
        "Ingestion run finished"
    );

    ingestor.close();
    Ok(())
}
