use crate::domain::model::{Item, NewItem, QuoteSnapshot};
use crate::utils::error::{RepositoryError, UpstreamError};
use async_trait::async_trait;

/// Persistence capability consumed by the pricing service.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Non-deleted item with `id`, if any.
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, RepositoryError>;
    /// All non-deleted items ordered by id.
    async fn find_all(&self) -> Result<Vec<Item>, RepositoryError>;
    async fn insert(&self, item: NewItem) -> Result<Item, RepositoryError>;
}

/// External provider of currency quotes. Implementations never retry.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self) -> Result<QuoteSnapshot, UpstreamError>;
}
