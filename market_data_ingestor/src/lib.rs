//! Market data models and provider adapters.
//!
//! Providers turn a [`BarsRequestParams`](models::request_params::BarsRequestParams)
//! into a canonical [`BarSeries`](models::bar::BarSeries); sinks consume it.

pub mod io;
pub mod models;
pub mod providers;
