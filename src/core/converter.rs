use crate::domain::model::QuoteSnapshot;
use crate::utils::error::{PricingError, Result};

/// Pure box-price arithmetic over a quote snapshot.
pub struct PriceConverter;

impl PriceConverter {
    /// Whether pricing `unit_currency` in `target_currency` requires quotes.
    pub fn needs_conversion(unit_currency: &str, target_currency: &str) -> bool {
        !target_currency.is_empty() && !target_currency.eq_ignore_ascii_case(unit_currency)
    }

    /// Total of `quantity` units priced in `target_currency`.
    ///
    /// Rates are derived through the snapshot base: the cross rate is
    /// `base->target / base->unit`. When no conversion is needed the snapshot is
    /// never read and may be `None`. No rounding is applied.
    pub fn convert(
        unit_price: f64,
        unit_currency: &str,
        target_currency: &str,
        quantity: i64,
        snapshot: Option<&QuoteSnapshot>,
    ) -> Result<f64> {
        let quantity = quantity as f64;

        if !Self::needs_conversion(unit_currency, target_currency) {
            return Ok(unit_price * quantity);
        }

        let snapshot = snapshot.ok_or_else(|| unknown(target_currency))?;
        let target_rate = snapshot
            .rate(target_currency)
            .ok_or_else(|| unknown(target_currency))?;
        let unit_rate = snapshot
            .rate(unit_currency)
            .ok_or_else(|| unknown(unit_currency))?;

        let cross_rate = target_rate / unit_rate;
        tracing::debug!(
            "cross rate {}->{} = {} (base {})",
            unit_currency,
            target_currency,
            cross_rate,
            snapshot.base
        );

        Ok(unit_price * cross_rate * quantity)
    }
}

fn unknown(code: &str) -> PricingError {
    PricingError::UnknownCurrency {
        code: code.to_ascii_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn snapshot() -> QuoteSnapshot {
        let mut rates = HashMap::new();
        rates.insert("USDCLP".to_string(), 828.503912);
        rates.insert("USDARS".to_string(), 105.356594);
        rates.insert("USDEUR".to_string(), 0.873404);
        rates.insert("USDUSD".to_string(), 1.0);
        rates.insert("USDZZZ".to_string(), 0.0);
        QuoteSnapshot::new("USD", rates)
    }

    #[test]
    fn test_cross_rate_reference_scenario() {
        let snapshot = snapshot();
        let total = PriceConverter::convert(1500.0, "CLP", "ARS", 12, Some(&snapshot)).unwrap();
        assert_eq!(total, 2288.9676977167974);
    }

    #[test]
    fn test_same_currency_skips_snapshot() {
        let total = PriceConverter::convert(2.5, "CLP", "CLP", 6, None).unwrap();
        assert_eq!(total, 15.0);

        let total = PriceConverter::convert(2.5, "CLP", "clp", 6, None).unwrap();
        assert_eq!(total, 15.0);
    }

    #[test]
    fn test_empty_target_skips_snapshot() {
        let total = PriceConverter::convert(10.3, "USD", "", 3, None).unwrap();
        assert_eq!(total, 10.3 * 3.0);
    }

    #[test]
    fn test_base_currency_as_source() {
        let snapshot = snapshot();
        let total = PriceConverter::convert(10.0, "USD", "EUR", 2, Some(&snapshot)).unwrap();
        assert_eq!(total, 10.0 * 0.873404 * 2.0);
    }

    #[test]
    fn test_unknown_target_currency() {
        let snapshot = snapshot();
        match PriceConverter::convert(1500.0, "CLP", "NYC", 6, Some(&snapshot)) {
            Err(PricingError::UnknownCurrency { code }) => assert_eq!(code, "NYC"),
            other => panic!("expected unknown currency, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_unit_currency() {
        let snapshot = snapshot();
        match PriceConverter::convert(2.5, "MCK", "EUR", 6, Some(&snapshot)) {
            Err(PricingError::UnknownCurrency { code }) => assert_eq!(code, "MCK"),
            other => panic!("expected unknown currency, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_rate_is_unknown() {
        let snapshot = snapshot();
        let result = PriceConverter::convert(2.5, "USD", "ZZZ", 6, Some(&snapshot));
        assert!(matches!(result, Err(PricingError::UnknownCurrency { .. })));
    }

    #[test]
    fn test_missing_snapshot_on_conversion_path() {
        let result = PriceConverter::convert(2.5, "USD", "EUR", 6, None);
        assert!(matches!(result, Err(PricingError::UnknownCurrency { .. })));
    }
}
