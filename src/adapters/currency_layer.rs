use crate::config::QuotesConfig;
use crate::core::QuoteSource;
use crate::domain::model::QuoteSnapshot;
use crate::utils::error::UpstreamError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct LiveResponse {
    success: Option<bool>,
    source: Option<String>,
    quotes: Option<HashMap<String, f64>>,
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    code: i64,
    #[serde(default)]
    info: String,
}

/// [`QuoteSource`] backed by a currencylayer-compatible `/live` endpoint.
#[derive(Debug, Clone)]
pub struct CurrencyLayerSource {
    client: Client,
    endpoint: String,
    access_key: String,
    base_currency: String,
}

impl CurrencyLayerSource {
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        base_currency: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            base_currency: base_currency.into(),
        })
    }

    pub fn from_config(config: &QuotesConfig) -> Result<Self, UpstreamError> {
        Self::new(
            config.endpoint.clone(),
            config.access_key.clone(),
            config.base_currency.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn snapshot_from(&self, body: LiveResponse) -> Result<QuoteSnapshot, UpstreamError> {
        if let Some(error) = body.error {
            return Err(UpstreamError::Provider {
                code: error.code,
                info: error.info,
            });
        }
        if body.success == Some(false) {
            return Err(UpstreamError::Provider {
                code: 0,
                info: "request was not successful".to_string(),
            });
        }

        let quotes = body
            .quotes
            .ok_or_else(|| UpstreamError::Decode("response has no quotes".to_string()))?;
        let base = body
            .source
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.base_currency.clone());

        let mut rates = HashMap::with_capacity(quotes.len());
        for (pair, rate) in quotes {
            if rate > 0.0 && rate.is_finite() {
                rates.insert(pair, rate);
            } else {
                tracing::warn!("Dropping non-positive quote {}={}", pair, rate);
            }
        }

        Ok(QuoteSnapshot::new(base, rates))
    }
}

#[async_trait]
impl QuoteSource for CurrencyLayerSource {
    async fn fetch(&self) -> Result<QuoteSnapshot, UpstreamError> {
        tracing::debug!("Making quote request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("access_key", self.access_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Quote response status: {}", status);
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let body: LiveResponse = serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        self.snapshot_from(body)
    }
}
