//! Provider registry that maps a ProviderId to a concrete provider.
use market_data_ingestor::providers::{
    DataProvider, ProviderInitError, alpaca_rest::AlpacaProvider, yahoo::YahooProvider,
};

use crate::config::ProviderId;

/// Build and return a boxed data provider corresponding to the supplied ProviderId.
pub fn build_provider(id: ProviderId) -> Result<Box<dyn DataProvider>, ProviderInitError> {
    match id {
        ProviderId::Yahoo => Ok(Box::new(YahooProvider::new()?)),
        ProviderId::Alpaca => Ok(Box::new(AlpacaProvider::new()?)),
    }
}
