//! Alpaca market-data v2 REST adapter (`/v2/stocks/{symbol}/bars`).

pub mod params;
pub mod provider;
pub mod response;

pub use params::AlpacaBarsParams;
pub use provider::AlpacaProvider;
