// Adapters layer: concrete implementations of the domain ports.

pub mod currency_layer;
pub mod sqlite;

pub use currency_layer::CurrencyLayerSource;
pub use sqlite::SqliteItemRepository;
