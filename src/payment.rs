//! Payment
//!
//! The storefront never talks to a real processor. [`SimulatedGateway`] waits a fixed delay on
//! a [`Timer`] and then accepts every charge, so the same code runs under a browser timeout, a
//! tokio runtime or an instant test timer.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use mockall::automock;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

/// Delay applied by the simulated gateway unless configured otherwise.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2_000);

/// Prefix of simulated payment references.
pub const SIMULATED_REFERENCE_PREFIX: &str = "SIM";

/// Errors returned by a payment gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The charge was refused.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The gateway could not be reached.
    #[error("payment gateway unavailable")]
    Unavailable,
}

/// Identifies one checkout submission, so a late payment result cannot settle another order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(pub u64);

impl OrderId {
    /// The id after this one.
    #[must_use]
    pub fn next(self) -> Self {
        OrderId(self.0.saturating_add(1))
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order-{}", self.0)
    }
}

/// A charge for the current cart.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    /// Submission being paid for
    pub order: OrderId,

    /// Amount to charge, after discounts
    pub amount: Money<'static, Currency>,

    /// Receipt email
    pub email: String,

    /// Name on the card
    pub cardholder: String,

    /// Number of seats being bought
    pub item_count: u64,
}

/// A successful charge.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentConfirmation {
    /// Submission that was paid for
    pub order: OrderId,

    /// Gateway reference, e.g. "SIM-000001"
    pub reference: String,

    /// Amount charged
    pub amount: Money<'static, Currency>,
}

/// Something that can take a payment.
#[automock]
#[async_trait(?Send)]
pub trait PaymentGateway {
    /// Charge the request amount.
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentConfirmation, PaymentError>;
}

/// Something that can wait.
#[automock]
#[async_trait(?Send)]
pub trait Timer {
    /// Resolve after `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Timer that resolves immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateTimer;

#[async_trait(?Send)]
impl Timer for ImmediateTimer {
    async fn sleep(&self, _duration: Duration) {}
}

/// Gateway that waits and then approves every charge.
///
/// Clones share one reference counter.
#[derive(Debug, Clone)]
pub struct SimulatedGateway<T> {
    timer: T,
    delay: Duration,
    issued: Arc<AtomicU64>,
}

impl<T: Timer> SimulatedGateway<T> {
    /// A gateway using the default two second delay.
    pub fn new(timer: T) -> Self {
        Self::with_delay(timer, DEFAULT_PROCESSING_DELAY)
    }

    /// A gateway using a custom delay.
    pub fn with_delay(timer: T, delay: Duration) -> Self {
        Self {
            timer,
            delay,
            issued: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn next_reference(&self) -> String {
        let number = self.issued.fetch_add(1, Ordering::Relaxed) + 1;

        format!("{SIMULATED_REFERENCE_PREFIX}-{number:06}")
    }
}

#[async_trait(?Send)]
impl<T: Timer> PaymentGateway for SimulatedGateway<T> {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentConfirmation, PaymentError> {
        debug!(
            order = %request.order,
            amount = request.amount.to_minor_units(),
            delay = ?self.delay,
            "simulating payment"
        );

        self.timer.sleep(self.delay).await;

        let reference = self.next_reference();

        debug!(%reference, "payment approved");

        Ok(PaymentConfirmation {
            order: request.order,
            reference,
            amount: request.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            order: OrderId(7),
            amount: Money::from_minor(126_000, USD),
            email: "ada@example.com".to_string(),
            cardholder: "Ada Lovelace".to_string(),
            item_count: 2,
        }
    }

    #[tokio::test]
    async fn simulated_gateway_waits_then_approves() -> TestResult {
        let mut timer = MockTimer::new();

        timer
            .expect_sleep()
            .once()
            .withf(|duration| *duration == DEFAULT_PROCESSING_DELAY)
            .return_const(());

        let gateway = SimulatedGateway::new(timer);

        let confirmation = gateway.charge(&request()).await?;

        assert_eq!(confirmation.reference, "SIM-000001");
        assert_eq!(confirmation.order, OrderId(7));
        assert_eq!(confirmation.amount, Money::from_minor(126_000, USD));

        Ok(())
    }

    #[tokio::test]
    async fn references_are_sequential_across_clones() -> TestResult {
        let gateway = SimulatedGateway::with_delay(ImmediateTimer, Duration::ZERO);
        let clone = gateway.clone();

        let first = gateway.charge(&request()).await?;
        let second = clone.charge(&request()).await?;

        assert_eq!(first.reference, "SIM-000001");
        assert_eq!(second.reference, "SIM-000002");
        assert_eq!(gateway.delay(), Duration::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn mock_gateway_can_decline() {
        let mut gateway = MockPaymentGateway::new();

        gateway
            .expect_charge()
            .once()
            .returning(|_| Err(PaymentError::Declined("insufficient funds".to_string())));

        let result = gateway.charge(&request()).await;

        assert_eq!(
            result,
            Err(PaymentError::Declined("insufficient funds".to_string()))
        );
    }
}
