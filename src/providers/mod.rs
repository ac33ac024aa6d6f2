pub mod exchange_rate_api;

use crate::core::config::RatesConfig;
use crate::core::rates::RateLoader;
use std::sync::Arc;

/// Builds the rate loader described by `config`.
pub fn rate_loader(config: &RatesConfig) -> RateLoader {
    if config.offline {
        return RateLoader::offline();
    }
    let provider = exchange_rate_api::ExchangeRateApiProvider::new(&config.base_url);
    RateLoader::new(Arc::new(provider), config.timeout())
}
