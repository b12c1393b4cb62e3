//! Fixtures
//!
//! Static reference data (the course catalog and storefront defaults) is kept as YAML and
//! compiled into the crate. This module holds the shared parsing helpers.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, USD};
use thiserror::Error;

use crate::{catalog::CatalogError, courses::CourseError};

pub mod config;
pub mod courses;

/// Built-in course catalog.
pub const CATALOG_YAML: &str = include_str!("../../fixtures/courses/catalog.yml");

/// Built-in storefront configuration.
pub const STOREFRONT_YAML: &str = include_str!("../../fixtures/config/storefront.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Invalid rating format
    #[error("Invalid rating format: {0}")]
    InvalidRating(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A course record failed validation.
    #[error("Invalid course {id}: {source}")]
    Course {
        /// Identifier of the offending record
        id: u32,
        /// Underlying validation failure
        source: CourseError,
    },

    /// The assembled catalog was rejected.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Parse a currency code into one of the supported ISO currencies.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for codes other than GBP, USD and EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Parse price string (e.g., "750 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(currency_code)?))
}

/// Parse percentage string (e.g., "10%" or "0.10") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as a number.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        let value = percent_str
            .trim()
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value / 100.0))
    } else {
        let value = trimmed
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}

/// Parse a rating string (e.g., "4.8") into a one-decimal-place `Decimal`.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidRating`] if the string is not a decimal number.
pub fn parse_rating(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map(|rating| rating.round_dp(1))
        .map_err(|_err| FixtureError::InvalidRating(s.to_string()))
}
