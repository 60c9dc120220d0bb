pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::Cli;
pub use crate::config::AppConfig;

pub use crate::app::{build_service, CatalogService};
pub use crate::core::{converter::PriceConverter, quote_cache::QuoteCache, service::PricingService};
pub use crate::domain::model::{BoxRequest, BoxResult, Item, NewItem, QuoteSnapshot};
pub use crate::utils::error::{PricingError, RepositoryError, Result, UpstreamError};
