//! Storefront configuration

use std::time::Duration;

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, USD},
};
use thiserror::Error;
use tracing::debug;

use crate::{
    fixtures::{
        FixtureError, STOREFRONT_YAML, config::StorefrontFixture, parse_currency,
        parse_percentage, parse_price,
    },
    payment::DEFAULT_PROCESSING_DELAY,
    pricing::PricingPolicy,
};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be parsed.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// The discount threshold is in another currency (threshold currency, store currency).
    #[error("bulk discount threshold is in {0}, but the store uses {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// The discount threshold is below zero.
    #[error("bulk discount threshold must not be negative")]
    NegativeThreshold,

    /// The discount rate is outside 0% to 100%.
    #[error("bulk discount rate must be between 0% and 100%")]
    RateOutOfRange,
}

/// Checkout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// How long the simulated gateway takes to approve a payment.
    pub processing_delay: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, Copy)]
pub struct StorefrontConfig {
    /// Currency every price and cart uses.
    pub currency: &'static Currency,

    /// Bulk discount rule.
    pub pricing: PricingPolicy,

    /// Checkout settings.
    pub checkout: CheckoutConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: USD,
            pricing: PricingPolicy::default(),
            checkout: CheckoutConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Parse a configuration document; omitted keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the YAML is malformed or a value is out of range.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let fixture: StorefrontFixture =
            serde_norway::from_str(yaml).map_err(FixtureError::from)?;

        let defaults = Self::default();

        let currency = match fixture.currency.as_deref() {
            Some(code) => parse_currency(code)?,
            None => defaults.currency,
        };

        let threshold = match fixture.pricing.bulk_discount_threshold.as_deref() {
            Some(price) => {
                let (minor, threshold_currency) = parse_price(price)?;

                Money::from_minor(minor, threshold_currency)
            }
            None => Money::from_minor(
                defaults.pricing.threshold().to_minor_units(),
                currency,
            ),
        };

        if threshold.currency() != currency {
            return Err(ConfigError::CurrencyMismatch(
                threshold.currency().iso_alpha_code,
                currency.iso_alpha_code,
            ));
        }

        if threshold.to_minor_units() < 0 {
            return Err(ConfigError::NegativeThreshold);
        }

        let rate = match fixture.pricing.bulk_discount_rate.as_deref() {
            Some(rate) => parse_percentage(rate)?,
            None => defaults.pricing.discount_rate(),
        };

        let fraction = rate * Decimal::ONE;

        if fraction < Decimal::ZERO || fraction > Decimal::ONE {
            return Err(ConfigError::RateOutOfRange);
        }

        let processing_delay = fixture
            .checkout
            .processing_delay_ms
            .map_or(defaults.checkout.processing_delay, Duration::from_millis);

        let config = Self {
            currency,
            pricing: PricingPolicy::new(threshold, rate),
            checkout: CheckoutConfig { processing_delay },
        };

        debug!(
            currency = currency.iso_alpha_code,
            threshold = threshold.to_minor_units(),
            delay = ?processing_delay,
            "loaded storefront config"
        );

        Ok(config)
    }

    /// The bundled configuration document.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the bundled document is invalid.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_yaml(STOREFRONT_YAML)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn bundled_matches_defaults() -> TestResult {
        let config = StorefrontConfig::bundled()?;
        let defaults = StorefrontConfig::default();

        assert_eq!(config.currency, defaults.currency);
        assert_eq!(config.pricing.threshold(), defaults.pricing.threshold());
        assert_eq!(config.pricing.label(), "Bulk Discount (10%)");
        assert_eq!(config.checkout, defaults.checkout);

        Ok(())
    }

    #[test]
    fn empty_document_keeps_defaults() -> TestResult {
        let config = StorefrontConfig::from_yaml("{}")?;

        assert_eq!(config.currency, USD);
        assert_eq!(config.checkout.processing_delay, Duration::from_millis(2_000));

        Ok(())
    }

    #[test]
    fn overrides_are_applied() -> TestResult {
        let config = StorefrontConfig::from_yaml(
            "currency: GBP\npricing:\n  bulk_discount_threshold: 500 GBP\n  bulk_discount_rate: 15%\ncheckout:\n  processing_delay_ms: 0\n",
        )?;

        assert_eq!(config.currency, GBP);
        assert_eq!(config.pricing.threshold(), &Money::from_minor(50_000, GBP));
        assert_eq!(config.pricing.label(), "Bulk Discount (15%)");
        assert_eq!(config.checkout.processing_delay, Duration::ZERO);

        Ok(())
    }

    #[test]
    fn currency_only_override_moves_default_threshold() -> TestResult {
        let config = StorefrontConfig::from_yaml("currency: EUR")?;

        assert_eq!(config.pricing.threshold().to_minor_units(), 100_000);
        assert_eq!(config.pricing.threshold().currency().iso_alpha_code, "EUR");

        Ok(())
    }

    #[test]
    fn mismatched_threshold_currency_is_rejected() {
        let result = StorefrontConfig::from_yaml(
            "currency: USD\npricing:\n  bulk_discount_threshold: 1000 GBP\n",
        );

        assert!(matches!(
            result,
            Err(ConfigError::CurrencyMismatch("GBP", "USD"))
        ));
    }

    #[test]
    fn rate_above_one_hundred_percent_is_rejected() {
        let result = StorefrontConfig::from_yaml("pricing:\n  bulk_discount_rate: 150%\n");

        assert!(matches!(result, Err(ConfigError::RateOutOfRange)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = StorefrontConfig::from_yaml("shipping: free\n");

        assert!(matches!(
            result,
            Err(ConfigError::Fixture(FixtureError::Yaml(_)))
        ));
    }
}
