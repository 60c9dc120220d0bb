use crate::adapters::{sqlite, CurrencyLayerSource, SqliteItemRepository};
use crate::config::AppConfig;
use crate::core::quote_cache::QuoteCache;
use crate::core::service::PricingService;
use crate::utils::error::{PricingError, Result};
use crate::utils::validation::Validate;
use std::sync::Arc;

/// The pricing service wired to its production adapters.
pub type CatalogService = PricingService<SqliteItemRepository, CurrencyLayerSource>;

/// Validate `config`, open the database and assemble the service.
pub async fn build_service(config: &AppConfig) -> Result<CatalogService> {
    config.validate()?;

    if config.quotes.access_key.is_empty() {
        tracing::warn!("quotes.access_key is empty; currency conversion will likely fail");
    }

    let pool = sqlite::connect(&config.database)
        .await
        .map_err(|e| PricingError::Storage(e.to_string()))?;
    let repository = SqliteItemRepository::new(pool);

    let source = CurrencyLayerSource::from_config(&config.quotes)
        .map_err(|e| PricingError::config(format!("cannot build quote client: {}", e)))?;
    let quotes = Arc::new(QuoteCache::with_ttl(source, config.quotes.cache_ttl()));

    Ok(PricingService::new(repository, quotes))
}
