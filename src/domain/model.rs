use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_BOX_QUANTITY: i64 = 6;

/// A catalog entry as stored by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(rename = "brewery")]
    pub producer: String,
    #[serde(rename = "country")]
    pub origin: String,
    pub price: f64,
    pub currency: String,
    #[serde(skip_serializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing, default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing, default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Creation draft for an [`Item`]; the repository assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "brewery", default)]
    pub producer: String,
    #[serde(rename = "country", default)]
    pub origin: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency: String,
}

/// Raw box-price parameters as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxRequest {
    pub currency: Option<String>,
    pub quantity: Option<String>,
}

impl BoxRequest {
    pub fn new(currency: Option<&str>, quantity: Option<&str>) -> Self {
        Self {
            currency: currency.map(str::to_string),
            quantity: quantity.map(str::to_string),
        }
    }

    /// Parsed quantity, or [`DEFAULT_BOX_QUANTITY`] when missing, unparsable or below one.
    pub fn resolved_quantity(&self) -> i64 {
        self.quantity
            .as_deref()
            .and_then(|q| q.parse::<i64>().ok())
            .filter(|q| *q >= 1)
            .unwrap_or(DEFAULT_BOX_QUANTITY)
    }

    /// Requested currency exactly as received, empty when absent.
    pub fn target_currency(&self) -> &str {
        self.currency.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxTarget {
    pub currency: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxResult {
    pub price: f64,
    pub target: BoxTarget,
    #[serde(rename = "beer")]
    pub item: Item,
}

/// Exchange rates captured in one fetch, expressed against `base`.
///
/// Keys are the concatenated base and target codes, e.g. `USDEUR`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub base: String,
    pub rates: HashMap<String, f64>,
    pub captured_at: DateTime<Utc>,
}

impl QuoteSnapshot {
    pub fn new(base: impl Into<String>, rates: HashMap<String, f64>) -> Self {
        Self {
            base: base.into(),
            rates,
            captured_at: Utc::now(),
        }
    }

    /// Rate of one unit of base in `code`. Missing and non-positive entries are unknown.
    pub fn rate(&self, code: &str) -> Option<f64> {
        let key = format!("{}{}", self.base, code.to_ascii_uppercase());
        self.rates.get(&key).copied().filter(|rate| *rate > 0.0)
    }
}
