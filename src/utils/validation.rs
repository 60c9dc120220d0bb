use crate::utils::error::{PricingError, Result};
use url::Url;

pub const CURRENCY_CODE_LEN: usize = 3;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PricingError::validation(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PricingError::validation(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(PricingError::validation(
            field_name,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(PricingError::validation(
            field_name,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PricingError::validation(
            field_name,
            format!("{} cannot be empty", field_name),
        ));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(PricingError::validation(
            field_name,
            format!("'{}' is not one of: {}", value, allowed.join(", ")),
        ));
    }
    Ok(())
}

/// A currency code is exactly three characters.
pub fn validate_currency_code(field_name: &str, code: &str) -> Result<()> {
    if code.chars().count() != CURRENCY_CODE_LEN {
        return Err(PricingError::validation(
            field_name,
            format!(
                "{} cannot be empty or different than {} characters",
                field_name, CURRENCY_CODE_LEN
            ),
        ));
    }
    Ok(())
}

/// Like [`validate_currency_code`] but an empty code is accepted.
pub fn validate_optional_currency_code(field_name: &str, code: &str) -> Result<()> {
    if code.is_empty() {
        return Ok(());
    }
    if code.chars().count() != CURRENCY_CODE_LEN {
        return Err(PricingError::validation(
            field_name,
            format!("invalid {}: must be empty or {} characters", field_name, CURRENCY_CODE_LEN),
        ));
    }
    Ok(())
}
