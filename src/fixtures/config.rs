//! Storefront Configuration Fixtures

use serde::Deserialize;

/// Storefront configuration document. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorefrontFixture {
    /// Store currency code (e.g., "USD")
    pub currency: Option<String>,

    /// Bulk discount settings
    pub pricing: PricingFixture,

    /// Checkout settings
    pub checkout: CheckoutFixture,
}

/// Bulk discount settings
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingFixture {
    /// Threshold price (e.g., "1000 USD")
    pub bulk_discount_threshold: Option<String>,

    /// Discount rate (e.g., "10%" or "0.10")
    pub bulk_discount_rate: Option<String>,
}

/// Checkout settings
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckoutFixture {
    /// Simulated payment delay in milliseconds
    pub processing_delay_ms: Option<u64>,
}
