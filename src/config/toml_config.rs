use crate::core::quote_cache::DEFAULT_CACHE_TTL;
use crate::utils::error::{PricingError, Result};
use crate::utils::validation::{
    validate_currency_code, validate_non_empty_string, validate_one_of, validate_positive_number,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub quotes: QuotesConfig,
    #[serde(default)]
    pub logger: LoggerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://beers.db".to_string(),
            max_connections: 5,
            acquire_timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Isolated in-memory database, used by tests.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotesConfig {
    pub endpoint: String,
    pub access_key: String,
    pub base_currency: String,
    pub cache_ttl_seconds: u64,
    pub timeout_seconds: u64,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://api.currencylayer.com/live".to_string(),
            access_key: String::new(),
            base_currency: "USD".to_string(),
            cache_ttl_seconds: DEFAULT_CACHE_TTL.as_secs(),
            timeout_seconds: 10,
        }
    }
}

impl QuotesConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text, then apply environment overrides.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: AppConfig = toml::from_str(&processed_content)
            .map_err(|e| PricingError::config(format!("TOML parsing error: {}", e)))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Replace `${VAR}` placeholders with environment values (empty when unset).
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| PricingError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_default()
        });

        Ok(result.to_string())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.is_empty() {
                self.database.url = url;
            }
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("database.url", &self.database.url)?;
        validate_positive_number(
            "database.max_connections",
            self.database.max_connections as u64,
            1,
        )?;
        validate_url("quotes.endpoint", &self.quotes.endpoint)?;
        validate_currency_code("quotes.base_currency", &self.quotes.base_currency)?;
        validate_positive_number("quotes.timeout_seconds", self.quotes.timeout_seconds, 1)?;
        validate_one_of("logger.level", &self.logger.level, &LOG_LEVELS)?;
        Ok(())
    }
}
