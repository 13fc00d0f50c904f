//! Process configuration, assembled once at start-up.
//!
//! | Variable         | Default                 |
//! |------------------|-------------------------|
//! | `NEO4J_URI`      | `bolt://localhost:8687` |
//! | `NEO4J_USER`     | `neo4j`                 |
//! | `NEO4J_PASSWORD` | `password`              |
//! | `PRICE_PROVIDER` | `yahoo`                 |
//!
//! The ticker list and the history start date are fixed.

use std::str::FromStr;

use chrono::NaiveDate;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use shared_utils::env::get_env_var_or;
use thiserror::Error;

pub const DEFAULT_NEO4J_URI: &str = "bolt://localhost:8687";
pub const DEFAULT_NEO4J_USER: &str = "neo4j";
pub const DEFAULT_NEO4J_PASSWORD: &str = "password";

/// Symbols ingested on every run.
pub const TICKERS: [&str; 3] = ["AAPL", "MSFT", "GOOG"];

/// First day of history requested from the provider.
pub const HISTORY_START: &str = "2023-01-01";

const URI_SCHEMES: [&str; 6] = [
    "bolt://",
    "bolt+s://",
    "bolt+ssc://",
    "neo4j://",
    "neo4j+s://",
    "neo4j+ssc://",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}, expected {expected}")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("unsupported Neo4j URI {0:?}, expected a bolt:// or neo4j:// scheme")]
    InvalidUri(String),
}

/// Which upstream serves the price history (serde snake_case).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Yahoo Finance chart API, no credentials.
    #[default]
    Yahoo,
    /// Alpaca market-data API, keyed by `APCA_API_KEY_ID` / `APCA_API_SECRET_KEY`.
    Alpaca,
}

impl FromStr for ProviderId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(ProviderId::Yahoo),
            "alpaca" => Ok(ProviderId::Alpaca),
            _ => Err(ConfigError::InvalidValue {
                name: "PRICE_PROVIDER",
                value: s.to_string(),
                expected: "yahoo or alpaca",
            }),
        }
    }
}

#[derive(Debug)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: SecretString,
}

impl Neo4jConfig {
    pub fn new(uri: &str, user: &str, password: &str) -> Result<Self, ConfigError> {
        let uri = uri.trim();
        if !URI_SCHEMES.iter().any(|s| uri.starts_with(s)) {
            return Err(ConfigError::InvalidUri(uri.to_string()));
        }
        Ok(Self {
            uri: uri.to_string(),
            user: user.to_string(),
            password: SecretString::from(password.to_string()),
        })
    }
}

#[derive(Debug)]
pub struct IngestConfig {
    pub neo4j: Neo4jConfig,
    pub provider: ProviderId,
    pub tickers: Vec<String>,
    pub start_date: NaiveDate,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let neo4j = Neo4jConfig::new(
            &get_env_var_or("NEO4J_URI", DEFAULT_NEO4J_URI),
            &get_env_var_or("NEO4J_USER", DEFAULT_NEO4J_USER),
            &get_env_var_or("NEO4J_PASSWORD", DEFAULT_NEO4J_PASSWORD),
        )?;
        let provider = get_env_var_or("PRICE_PROVIDER", "yahoo").parse()?;
        let start_date = HISTORY_START
            .parse::<NaiveDate>()
            .map_err(|_| ConfigError::InvalidValue {
                name: "HISTORY_START",
                value: HISTORY_START.to_string(),
                expected: "a YYYY-MM-DD date",
            })?;

        Ok(Self {
            neo4j,
            provider,
            tickers: TICKERS.iter().map(|t| t.to_string()).collect(),
            start_date,
        })
    }
}
