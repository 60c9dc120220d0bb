use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Beer not found: {id}")]
    NotFound { id: i64 },

    #[error("The beer already exists: {name} / {producer} / {origin}")]
    Duplicate {
        name: String,
        producer: String,
        origin: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unknown currency: no quote available for {code}")]
    UnknownCurrency { code: String },

    #[error("Currency conversion failed: {0}")]
    Conversion(#[source] UpstreamError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PricingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PricingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        PricingError::Config {
            message: message.into(),
        }
    }

    /// HTTP status a request boundary would answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            PricingError::Validation { .. } => 400,
            PricingError::NotFound { .. } => 404,
            PricingError::Duplicate { .. } => 409,
            PricingError::UnknownCurrency { .. } => 422,
            PricingError::Conversion(_) => 502,
            PricingError::Storage(_)
            | PricingError::Config { .. }
            | PricingError::Io(_)
            | PricingError::Serialization(_) => 500,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            PricingError::Validation { .. } => 2,
            PricingError::NotFound { .. } => 4,
            PricingError::Duplicate { .. } => 5,
            PricingError::UnknownCurrency { .. } | PricingError::Conversion(_) => 6,
            PricingError::Storage(_)
            | PricingError::Config { .. }
            | PricingError::Io(_)
            | PricingError::Serialization(_) => 1,
        }
    }
}

/// Failures talking to the currency quote provider.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("cannot access currency layer API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("currency layer API answered with status {status}")]
    Status { status: u16 },

    #[error("cannot decode currency layer API response: {0}")]
    Decode(String),

    #[error("currency layer API error {code}: {info}")]
    Provider { code: i64, info: String },
}

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("{0}")]
    Backend(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::UniqueViolation(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut => RepositoryError::Backend("connection pool exhausted".into()),
            other => RepositoryError::Backend(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for RepositoryError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        RepositoryError::Backend(format!("migration failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
