pub mod converter;
pub mod quote_cache;
pub mod service;

pub use crate::domain::model::{BoxRequest, BoxResult, Item, NewItem, QuoteSnapshot};
pub use crate::domain::ports::{ItemRepository, QuoteSource};
pub use crate::utils::error::Result;
