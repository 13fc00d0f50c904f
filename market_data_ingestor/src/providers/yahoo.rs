//! Yahoo Finance chart API (`/v8/finance/chart/{symbol}`).
//!
//! No credentials are needed. Daily and coarser bars are keyed by exchange-local
//! calendar date at midnight UTC, so repeated fetches produce the same timestamps
//! even when Yahoo shifts the intraday stamp of a session.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::YahooProvider;
