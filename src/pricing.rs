//! Pricing
//!
//! Cart totals are derived on demand from the cart entries and a [`PricingPolicy`]; nothing here
//! is stored. All arithmetic runs on minor units with checked operations.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{
    Formatter, LocalFormat, Money, Params, Position,
    iso::{Currency, USD},
};
use thiserror::Error;

use crate::cart::CartEntry;

/// Default bulk discount threshold, in minor units.
pub const DEFAULT_BULK_THRESHOLD_MINOR: i64 = 100_000;

/// Errors that can occur while deriving cart pricing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// A line or the subtotal does not fit in minor units.
    #[error("cart total overflowed")]
    Overflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// An entry was priced in another currency (entry currency, cart currency).
    #[error("entry has currency {0}, but pricing uses {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Bulk discount rule: `discount_rate` off the subtotal once it exceeds `threshold`.
#[derive(Debug, Clone, Copy)]
pub struct PricingPolicy {
    threshold: Money<'static, Currency>,
    discount_rate: Percentage,
}

impl PricingPolicy {
    /// Create a policy.
    pub fn new(threshold: Money<'static, Currency>, discount_rate: Percentage) -> Self {
        Self {
            threshold,
            discount_rate,
        }
    }

    /// Subtotal that must be exceeded before the discount applies.
    pub fn threshold(&self) -> &Money<'static, Currency> {
        &self.threshold
    }

    /// Fraction of the subtotal taken off.
    pub fn discount_rate(&self) -> Percentage {
        self.discount_rate
    }

    /// Whether a subtotal (minor units) qualifies for the bulk discount.
    pub fn qualifies(&self, subtotal_minor: i64) -> bool {
        subtotal_minor > self.threshold.to_minor_units()
    }

    /// Discount label, e.g. "Bulk Discount (10%)".
    pub fn label(&self) -> String {
        let percent = ((self.discount_rate * Decimal::ONE) * Decimal::ONE_HUNDRED)
            .round_dp(2)
            .normalize();

        format!("Bulk Discount ({percent}%)")
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::new(
            Money::from_minor(DEFAULT_BULK_THRESHOLD_MINOR, USD),
            Percentage::from(0.1),
        )
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingSummary {
    /// Sum of price × quantity over all entries
    pub subtotal: Money<'static, Currency>,

    /// Bulk discount taken off the subtotal
    pub discount: Money<'static, Currency>,

    /// Amount payable
    pub total: Money<'static, Currency>,
}

impl PricingSummary {
    /// Whether a discount line should be shown.
    pub fn has_discount(&self) -> bool {
        self.discount.to_minor_units() > 0
    }
}

/// Derive subtotal, discount and total for a set of cart entries.
///
/// # Errors
///
/// - [`PricingError::CurrencyMismatch`]: an entry is priced in another currency.
/// - [`PricingError::Overflow`]: a line or the subtotal does not fit in minor units.
/// - [`PricingError::PercentConversion`]: the discount amount cannot be represented.
pub fn derive_pricing(
    entries: &[CartEntry],
    currency: &'static Currency,
    policy: &PricingPolicy,
) -> Result<PricingSummary, PricingError> {
    let subtotal_minor = entries.iter().try_fold(0_i64, |acc, entry| {
        let price = entry.course().price();

        if price.currency() != currency {
            return Err(PricingError::CurrencyMismatch(
                price.currency().iso_alpha_code,
                currency.iso_alpha_code,
            ));
        }

        line_total(entry)?
            .checked_add(acc)
            .ok_or(PricingError::Overflow)
    })?;

    let discount_minor = if policy.qualifies(subtotal_minor) {
        percent_of_minor(&policy.discount_rate, subtotal_minor)?
    } else {
        0
    };

    let total_minor = subtotal_minor
        .checked_sub(discount_minor)
        .ok_or(PricingError::Overflow)?;

    Ok(PricingSummary {
        subtotal: Money::from_minor(subtotal_minor, currency),
        discount: Money::from_minor(discount_minor, currency),
        total: Money::from_minor(total_minor, currency),
    })
}

/// Calculate a percentage of a minor unit amount, rounding half away from zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the calculation overflows.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// Price × quantity for one entry, in minor units.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the line does not fit in minor units.
pub fn line_total(entry: &CartEntry) -> Result<i64, PricingError> {
    entry
        .course()
        .price()
        .to_minor_units()
        .checked_mul(i64::from(entry.quantity()))
        .ok_or(PricingError::Overflow)
}

const SYMBOL_FIRST: &[Position] = &[Position::Sign, Position::Symbol, Position::Amount];
const SYMBOL_LAST: &[Position] = &[Position::Sign, Position::Amount, Position::Symbol];

/// Format an amount for display: "Free", "$750" or "$100.50".
pub fn format_price(money: &Money<'_, Currency>) -> String {
    if money.is_zero() {
        return "Free".to_string();
    }

    format_amount(money)
}

/// Format an amount with its currency's symbol, separators and exponent, rendering zero as an
/// amount. Whole amounts drop their minor units ("$750", "¥1,000").
pub fn format_amount(money: &Money<'_, Currency>) -> String {
    let currency = money.currency();
    let local = LocalFormat::from_locale(currency.locale);

    let rounding = if money.amount().fract().is_zero() {
        0
    } else {
        currency.exponent
    };

    Formatter::money(
        money,
        Params {
            digit_separator: local.digit_separator,
            exponent_separator: local.exponent_separator,
            separator_pattern: local.digit_separator_pattern,
            positions: if currency.symbol_first {
                SYMBOL_FIRST
            } else {
                SYMBOL_LAST
            },
            rounding: Some(rounding),
            symbol: Some(currency.symbol),
            code: Some(currency.iso_alpha_code),
        },
    )
}
