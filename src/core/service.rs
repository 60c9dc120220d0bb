use crate::core::converter::PriceConverter;
use crate::core::quote_cache::QuoteCache;
use crate::core::{ItemRepository, QuoteSource};
use crate::domain::model::{BoxRequest, BoxResult, BoxTarget, Item, NewItem};
use crate::utils::error::{PricingError, RepositoryError, Result};
use crate::utils::validation::{
    validate_currency_code, validate_non_empty_string, validate_optional_currency_code,
};
use std::sync::Arc;

/// Catalog use cases: listing, creation, lookup and box pricing.
pub struct PricingService<R: ItemRepository, S: QuoteSource> {
    repository: R,
    quotes: Arc<QuoteCache<S>>,
}

impl<R: ItemRepository, S: QuoteSource> PricingService<R, S> {
    pub fn new(repository: R, quotes: Arc<QuoteCache<S>>) -> Self {
        Self { repository, quotes }
    }

    pub async fn list(&self) -> Result<Vec<Item>> {
        self.repository.find_all().await.map_err(|e| {
            tracing::error!("Cannot list beers: {}", e);
            PricingError::Storage(e.to_string())
        })
    }

    pub async fn create(&self, mut draft: NewItem) -> Result<Item> {
        validate_new_item(&draft)?;
        draft.currency = draft.currency.to_ascii_uppercase();

        match self.repository.insert(draft.clone()).await {
            Ok(item) => {
                tracing::info!("Created beer {} ({})", item.id, item.name);
                Ok(item)
            }
            Err(RepositoryError::UniqueViolation(detail)) => {
                tracing::warn!("Duplicated beer {}: {}", draft.name, detail);
                Err(PricingError::Duplicate {
                    name: draft.name,
                    producer: draft.producer,
                    origin: draft.origin,
                })
            }
            Err(e) => {
                tracing::error!("Cannot insert beer on DB: {}", e);
                Err(PricingError::Storage(e.to_string()))
            }
        }
    }

    pub async fn get(&self, id: i64) -> Result<Item> {
        match self.repository.find_by_id(id).await {
            Ok(Some(item)) => Ok(item),
            Ok(None) => Err(PricingError::NotFound { id }),
            Err(e) => {
                tracing::error!("Cannot get beer {}: {}", id, e);
                Err(PricingError::Storage(e.to_string()))
            }
        }
    }

    /// Price of a box of `request` quantity, converted when a different target
    /// currency is requested. Quotes are only consulted when converting.
    pub async fn box_price(&self, id: i64, request: BoxRequest) -> Result<BoxResult> {
        let quantity = request.resolved_quantity();
        let target = request.target_currency();
        validate_optional_currency_code("currency", target)?;
        let target = target.to_ascii_uppercase();

        let item = self.get(id).await?;

        let price = if PriceConverter::needs_conversion(&item.currency, &target) {
            let snapshot = self.quotes.get().await.map_err(PricingError::Conversion)?;
            PriceConverter::convert(item.price, &item.currency, &target, quantity, Some(&snapshot))?
        } else {
            PriceConverter::convert(item.price, &item.currency, &target, quantity, None)?
        };

        tracing::debug!(
            "Box of {} x beer {} in {:?} = {}",
            quantity,
            item.id,
            target,
            price
        );

        Ok(BoxResult {
            price,
            target: BoxTarget {
                currency: target,
                quantity,
            },
            item,
        })
    }
}

fn validate_new_item(draft: &NewItem) -> Result<()> {
    validate_non_empty_string("name", &draft.name)?;
    if draft.price == 0.0 || !draft.price.is_finite() {
        return Err(PricingError::validation(
            "price",
            "price cannot be zero nor empty",
        ));
    }
    validate_currency_code("currency", &draft.currency)
}
