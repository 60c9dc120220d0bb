use crate::config::DatabaseConfig;
use crate::core::ItemRepository;
use crate::domain::model::{Item, NewItem};
use crate::utils::error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const SELECT_COLUMNS: &str =
    "id, name, brewery, country, price, currency, created_at, updated_at, deleted_at";

#[derive(Debug, sqlx::FromRow)]
struct BeerRow {
    id: i64,
    name: String,
    brewery: String,
    country: String,
    price: f64,
    currency: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<BeerRow> for Item {
    fn from(row: BeerRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            producer: row.brewery,
            origin: row.country,
            price: row.price,
            currency: row.currency,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// Opens a pool for `config.url` and applies pending migrations.
///
/// In-memory databases are pinned to a single long-lived connection so every
/// query sees the same database.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, RepositoryError> {
    tracing::info!("Initializing database connection to {}", config.url);

    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = config.url.contains(":memory:") || config.url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
    };

    let pool = pool_options.connect_with(options).await?;
    MIGRATOR.run(&pool).await?;
    tracing::debug!("Database migrations applied");

    Ok(pool)
}

/// [`ItemRepository`] over the `beers` table. Soft-deleted rows are invisible.
#[derive(Debug, Clone)]
pub struct SqliteItemRepository {
    pool: SqlitePool,
}

impl SqliteItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM beers WHERE id = ?1 AND deleted_at IS NULL",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, BeerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Item::from))
    }

    async fn find_all(&self) -> Result<Vec<Item>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM beers WHERE deleted_at IS NULL ORDER BY id",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, BeerRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!("Listed {} beers", rows.len());
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn insert(&self, item: NewItem) -> Result<Item, RepositoryError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO beers (name, brewery, country, price, currency, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, BeerRow>(&sql)
            .bind(&item.name)
            .bind(&item.producer)
            .bind(&item.origin)
            .bind(item.price)
            .bind(&item.currency)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repository() -> SqliteItemRepository {
        let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();
        SqliteItemRepository::new(pool)
    }

    fn draft(name: &str) -> NewItem {
        NewItem {
            name: name.to_string(),
            producer: "MockingBrewery".to_string(),
            origin: "ChileMock".to_string(),
            price: 2.5,
            currency: "MCK".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids() {
        let repo = repository().await;

        let first = repo.insert(draft("GoldenMock")).await.unwrap();
        let second = repo.insert(draft("Calafate")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.producer, "MockingBrewery");
        assert!(first.deleted_at.is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_triplet() {
        let repo = repository().await;

        repo.insert(draft("Duplicated")).await.unwrap();
        let result = repo.insert(draft("Duplicated")).await;

        assert!(matches!(result, Err(RepositoryError::UniqueViolation(_))));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_same_name_other_brewery_is_allowed() {
        let repo = repository().await;

        repo.insert(draft("Golden")).await.unwrap();
        let mut other = draft("Golden");
        other.producer = "Kunstmann".to_string();

        assert!(repo.insert(other).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = repository().await;
        let created = repo.insert(draft("GoldenMock")).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_soft_deleted_rows_are_hidden_and_reusable() {
        let repo = repository().await;
        let created = repo.insert(draft("Retired")).await.unwrap();

        sqlx::query("UPDATE beers SET deleted_at = ?1 WHERE id = ?2")
            .bind(Utc::now())
            .bind(created.id)
            .execute(repo.pool())
            .await
            .unwrap();

        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
        // The uniqueness index ignores deleted rows.
        assert!(repo.insert(draft("Retired")).await.is_ok());
    }

    #[tokio::test]
    async fn test_closed_pool_is_backend_error() {
        let repo = repository().await;
        repo.pool().close().await;

        let result = repo.find_all().await;
        assert!(matches!(result, Err(RepositoryError::Backend(_))));
    }
}
